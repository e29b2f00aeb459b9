use crate::BackingStore;

/// A backing store that keeps available instances in a chain of fixed-size segments.
///
/// Instead of replacing one flat buffer on growth, this store appends another
/// fixed-size segment and leaves every existing segment untouched. No instance is
/// ever copied by a growth step, so there is no retained-buffer registry either -
/// nothing is ever superseded. The price is one extra indirection when an operation
/// crosses a segment boundary.
///
/// A cursor tracks the segment currently being filled and drained. Segments behind
/// the cursor are full, segments ahead of it are drained spares that later growth
/// reuses before appending anything new.
#[derive(Debug)]
pub struct MultiArrayStore<E> {
    /// Segment payloads are boxed out in each `Vec`'s own allocation, so growing the
    /// spine moves only the segment headers, never an instance.
    segments: Vec<Vec<E>>,

    /// Index of the segment `take()` and `put()` currently operate on.
    current: usize,

    segment_capacity: usize,

    available: usize,
}

impl<E> MultiArrayStore<E> {
    pub(crate) fn new(initial_capacity: usize, segment_capacity: usize) -> Self {
        let segment_count = initial_capacity.div_ceil(segment_capacity);
        let segments = (0..segment_count)
            .map(|_| Vec::with_capacity(segment_capacity))
            .collect();

        Self {
            segments,
            current: 0,
            segment_capacity,
            available: 0,
        }
    }

    /// The number of segments currently allocated.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    fn current_segment(&mut self) -> &mut Vec<E> {
        self.segments
            .get_mut(self.current)
            .expect("the cursor always points at an allocated segment")
    }

    /// Refills one segment via the factory after total exhaustion.
    ///
    /// Reuses the drained segment at the cursor when one exists and only allocates a
    /// fresh segment when the store has none at all (a zero-capacity construction).
    fn repopulate(&mut self, factory: &mut dyn FnMut() -> E) {
        if self.segments.is_empty() {
            self.segments.push(Vec::with_capacity(self.segment_capacity));
        }

        // Every segment is drained at this point; restart filling from the head so
        // the spares sit ahead of the cursor where put() can reach them again.
        self.current = 0;

        let capacity = self.segment_capacity;
        let segment = self.current_segment();
        debug_assert!(segment.is_empty());

        for _ in 0..capacity {
            let instance = factory();
            segment.push(instance);
        }

        self.available = self
            .available
            .checked_add(capacity)
            .expect("available count overflow: more instances than virtual memory can fit");
    }
}

impl<E> BackingStore<E> for MultiArrayStore<E> {
    fn take(&mut self, factory: &mut dyn FnMut() -> E) -> E {
        if self.available == 0 {
            self.repopulate(factory);
        }

        loop {
            if let Some(instance) = self.current_segment().pop() {
                self.available = self
                    .available
                    .checked_sub(1)
                    .expect("an instance was popped, so at least one was available");
                return instance;
            }

            // The cursor segment is drained; fall back to the neighboring full one.
            self.current = self
                .current
                .checked_sub(1)
                .expect("instances are available, so a segment below the cursor holds some");
        }
    }

    fn put(&mut self, instance: E) {
        if self.segments.is_empty() {
            self.segments.push(Vec::with_capacity(self.segment_capacity));
        }

        if self.current_segment().len() == self.segment_capacity {
            // Move to the neighboring spare segment, appending one when the spine
            // is exhausted. Existing segments are never touched.
            let next = self
                .current
                .checked_add(1)
                .expect("segment index overflow: more segments than virtual memory can fit");
            if next == self.segments.len() {
                self.segments.push(Vec::with_capacity(self.segment_capacity));
            }
            self.current = next;
        }

        self.current_segment().push(instance);
        self.available = self
            .available
            .checked_add(1)
            .expect("available count overflow: more instances than virtual memory can fit");
    }

    fn available(&self) -> usize {
        self.available
    }

    fn capacity(&self) -> usize {
        self.segments
            .len()
            .checked_mul(self.segment_capacity)
            .expect("capacity overflow: more slots than virtual memory can fit")
    }
}
