use crate::BackingStore;
use crate::linked_store::Node;

/// A backing store with a fixed array tier and a linked overflow tier.
///
/// Tier one is a flat buffer sized once at construction and never resized, so the
/// common case stays contiguous and no growth step ever copies it. Once tier one is
/// exhausted, operations fall through to tier two: a linked node chain identical in
/// shape to [`LinkedStore`][crate::LinkedStore], extended one node at a time without
/// bound.
///
/// Both operations prefer tier one. `take()` falls back to popping a tier-two node
/// and only invokes the factory when both tiers are dry; `put()` spills into a new
/// tier-two node only when every array slot is occupied.
#[derive(Debug)]
pub struct TieredStore<E> {
    /// Tier one. `len()` is the tier's available count; never grows past
    /// `array_capacity`.
    array: Vec<E>,

    /// The once-and-final slot count of tier one.
    array_capacity: usize,

    /// Head of the tier-two overflow chain.
    overflow_head: Option<Box<Node<E>>>,

    overflow_available: usize,

    /// High-water mark of tier-two instances; an overflow node holds exactly one
    /// instance, so this only ever counts up.
    overflow_capacity: usize,
}

impl<E> TieredStore<E> {
    pub(crate) fn new(array_capacity: usize) -> Self {
        Self {
            array: Vec::with_capacity(array_capacity),
            array_capacity,
            overflow_head: None,
            overflow_available: 0,
            overflow_capacity: 0,
        }
    }

    /// The number of instances currently waiting in the overflow chain.
    #[must_use]
    pub fn overflow_len(&self) -> usize {
        self.overflow_available
    }

    fn pop_overflow(&mut self) -> Option<E> {
        let node = self.overflow_head.take()?;
        let Node { instance, next } = *node;
        self.overflow_head = next;
        self.overflow_available = self
            .overflow_available
            .checked_sub(1)
            .expect("a node was popped, so at least one overflow instance was available");
        Some(instance)
    }

    fn push_overflow(&mut self, instance: E) {
        let node = Box::new(Node {
            instance,
            next: self.overflow_head.take(),
        });
        self.overflow_head = Some(node);
        self.overflow_available = self
            .overflow_available
            .checked_add(1)
            .expect("available count overflow: more instances than virtual memory can fit");
        self.overflow_capacity = self.overflow_capacity.max(self.overflow_available);
    }
}

impl<E> Drop for TieredStore<E> {
    fn drop(&mut self) {
        // The default drop would recurse once per overflow node and could overflow
        // the stack on a long chain, so we unlink iteratively instead.
        let mut next = self.overflow_head.take();
        while let Some(mut node) = next {
            next = node.next.take();
        }
    }
}

impl<E> BackingStore<E> for TieredStore<E> {
    fn take(&mut self, factory: &mut dyn FnMut() -> E) -> E {
        if let Some(instance) = self.array.pop() {
            return instance;
        }

        if let Some(instance) = self.pop_overflow() {
            return instance;
        }

        // Both tiers are dry; grow-by-one in tier-two accounting. The array tier is
        // never resized, so this is the only growth this store performs.
        self.overflow_capacity = self
            .overflow_capacity
            .checked_add(1)
            .expect("capacity overflow: more instances than virtual memory can fit");
        factory()
    }

    fn put(&mut self, instance: E) {
        if self.array.len() < self.array_capacity {
            self.array.push(instance);
        } else {
            self.push_overflow(instance);
        }
    }

    fn available(&self) -> usize {
        self.array
            .len()
            .checked_add(self.overflow_available)
            .expect("available count overflow: more instances than virtual memory can fit")
    }

    fn capacity(&self) -> usize {
        self.array_capacity
            .checked_add(self.overflow_capacity)
            .expect("capacity overflow: more slots than virtual memory can fit")
    }
}
