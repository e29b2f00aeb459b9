use std::mem;

use crate::BackingStore;
use crate::retained::RetainedBuffers;
use crate::store::grown_capacity;

/// A backing store that keeps available instances in one flat buffer.
///
/// The buffer holds the available region as a contiguous run; the buffer's length is
/// the available count and the slot count is fixed until a growth step replaces the
/// whole buffer with a larger one.
///
/// # Growth
///
/// Growth multiplies the slot count by the configured growth factor and swaps in a
/// fresh buffer. The outgrown buffer is not freed on the spot: it moves into a
/// retained-buffer registry and stays allocated until
/// [`release_retained_buffers()`][Self::release_retained_buffers] is called or the
/// store is dropped.
///
/// The two growth triggers differ in cost:
///
/// * `take()` growth happens when the available region is empty, so there is nothing
///   to copy into the new buffer. The added slots are populated via the factory and
///   one of the fresh instances is returned. This is the optimized path.
/// * `put()` growth happens when every slot already holds an available instance, so
///   all of them must move into the new buffer first. This only occurs when more
///   instances are released than were ever taken, i.e. the caller is donating
///   external instances.
#[derive(Debug)]
pub struct ArrayStore<E> {
    /// Available instances. `len()` is the available count; we manage the slot count
    /// ourselves in `slots` and never let the `Vec` reallocate on its own.
    buf: Vec<E>,

    /// The slot count we committed to. The `Vec` allocation may be marginally larger;
    /// this field is what `capacity()` reports and what the growth policy works from.
    slots: usize,

    growth_factor: usize,

    retained: RetainedBuffers<Vec<E>>,
}

impl<E> ArrayStore<E> {
    pub(crate) fn new(initial_capacity: usize, growth_factor: usize) -> Self {
        Self {
            buf: Vec::with_capacity(initial_capacity),
            slots: initial_capacity,
            growth_factor,
            retained: RetainedBuffers::new(),
        }
    }

    /// Drops all buffers currently held in the retained-buffer registry.
    ///
    /// Calling this when nothing is retained is a no-op; the operation is idempotent
    /// and never fails.
    pub fn release_retained_buffers(&mut self) {
        self.retained.release();
    }

    /// The number of outgrown buffers currently held in the registry.
    #[must_use]
    pub fn retained_buffer_count(&self) -> usize {
        self.retained.len()
    }

    /// Swaps in a buffer grown by the configured factor and parks the old one.
    ///
    /// Returns the number of slots added. Any instances in the old buffer are moved
    /// across first, so this covers both the empty (`take`) and the full (`put`)
    /// trigger; on the `take` path the move is over zero instances.
    fn grow(&mut self) -> usize {
        let new_slots = grown_capacity(self.slots, self.growth_factor);
        let mut new_buf = Vec::with_capacity(new_slots);
        new_buf.append(&mut self.buf);

        let old_buf = mem::replace(&mut self.buf, new_buf);
        self.retained.retain(old_buf);

        let added = new_slots
            .checked_sub(self.slots)
            .expect("the grown slot count is always larger than the old one");
        self.slots = new_slots;
        added
    }
}

impl<E> BackingStore<E> for ArrayStore<E> {
    fn take(&mut self, factory: &mut dyn FnMut() -> E) -> E {
        if let Some(instance) = self.buf.pop() {
            return instance;
        }

        // The available region is empty, so growth copies nothing. Populate exactly
        // the added slots; the remaining free slots are headroom for instances that
        // are currently checked out and will be released later.
        let added = self.grow();
        for _ in 0..added {
            let instance = factory();
            self.buf.push(instance);
        }

        self.buf
            .pop()
            .expect("growth adds at least one slot and every added slot was populated")
    }

    fn put(&mut self, instance: E) {
        if self.buf.len() == self.slots {
            _ = self.grow();
        }

        self.buf.push(instance);
    }

    fn available(&self) -> usize {
        self.buf.len()
    }

    fn capacity(&self) -> usize {
        self.slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preallocates_requested_slots() {
        let store = ArrayStore::<u32>::new(8, 2);
        assert_eq!(store.capacity(), 8);
        assert_eq!(store.available(), 0);
    }

    #[test]
    fn put_then_take_round_trips() {
        let mut store = ArrayStore::new(4, 2);
        store.put(7_u32);

        let mut factory = || panic!("an instance was available, the factory must not run");
        assert_eq!(store.take(&mut factory), 7);
        assert_eq!(store.capacity(), 4);
    }

    #[test]
    fn empty_take_grows_and_populates_added_slots() {
        let mut created = 0_u32;
        let mut store = ArrayStore::new(4, 2);

        let mut factory = || {
            created += 1;
            created
        };
        let instance = store.take(&mut factory);

        // 4 slots grew to 8; the 4 added slots were populated and one came back out.
        assert_eq!(created, 4);
        assert!(instance >= 1);
        assert_eq!(store.capacity(), 8);
        assert_eq!(store.available(), 3);
        assert_eq!(store.retained_buffer_count(), 1);
    }

    #[test]
    fn empty_take_from_zero_capacity_produces_one_instance() {
        let mut store = ArrayStore::new(0, 2);

        let mut factory = || 42_u32;
        assert_eq!(store.take(&mut factory), 42);
        assert_eq!(store.capacity(), 1);
        assert_eq!(store.available(), 0);
    }

    #[test]
    fn full_put_grows_and_preserves_instances() {
        let mut store = ArrayStore::new(2, 2);
        store.put(1_u32);
        store.put(2);

        // Every slot is occupied; this donation forces the copying growth path.
        store.put(3);

        assert_eq!(store.capacity(), 4);
        assert_eq!(store.available(), 3);
        assert_eq!(store.retained_buffer_count(), 1);

        let mut factory = || unreachable!();
        assert_eq!(store.take(&mut factory), 3);
        assert_eq!(store.take(&mut factory), 2);
        assert_eq!(store.take(&mut factory), 1);
    }

    #[test]
    fn capacity_never_decreases() {
        let mut store = ArrayStore::new(2, 2);
        let mut previous = store.capacity();

        let mut counter = 0_u32;
        for _ in 0..100 {
            let mut factory = || {
                counter += 1;
                counter
            };
            _ = store.take(&mut factory);
            assert!(store.capacity() >= previous);
            previous = store.capacity();
        }
    }

    #[test]
    fn release_retained_buffers_is_idempotent() {
        let mut store = ArrayStore::new(1, 2);
        let mut factory = || 0_u32;

        // Trigger two growth steps.
        _ = store.take(&mut factory);
        _ = store.take(&mut factory);
        _ = store.take(&mut factory);
        assert!(store.retained_buffer_count() >= 1);

        store.release_retained_buffers();
        assert_eq!(store.retained_buffer_count(), 0);

        // The second release has nothing to do and must not fail.
        store.release_retained_buffers();
        assert_eq!(store.retained_buffer_count(), 0);
    }

    #[test]
    fn growth_factor_is_honored() {
        let mut store = ArrayStore::new(2, 4);
        let mut factory = || 0_u32;
        _ = store.take(&mut factory);
        assert_eq!(store.capacity(), 8);
    }
}
