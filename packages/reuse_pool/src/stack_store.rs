use std::mem;

use crate::BackingStore;
use crate::retained::RetainedBuffers;
use crate::store::grown_capacity;

/// A backing store that keeps available instances in a LIFO slab with a top index.
///
/// Slots `[0, top)` hold available instances; `put()` pushes at `top` and `take()`
/// pops from `top - 1`, so an instance released back into the store is the first one
/// handed out again.
///
/// # Growth
///
/// Growth allocates a larger slab, walks the live range `[0, top)` into it and parks
/// the outgrown slab in the retained-buffer registry. Unlike
/// [`ArrayStore`][crate::ArrayStore], the same copying pass runs for both triggers:
/// the stack layout offers no convention under which `take()` exhaustion guarantees
/// an empty live range worth skipping, so the `take()` path pays the full
/// reallocate-and-copy cost as well. That single difference is what separates the two
/// stores in benchmarks.
#[derive(Debug)]
pub struct StackStore<E> {
    /// Slots `[0, top)` are always `Some`, the rest always `None`.
    slab: Box<[Option<E>]>,

    /// Count of available instances; also the index of the first free slot.
    top: usize,

    growth_factor: usize,

    retained: RetainedBuffers<Box<[Option<E>]>>,
}

fn empty_slab<E>(slots: usize) -> Box<[Option<E>]> {
    (0..slots).map(|_| None).collect()
}

impl<E> StackStore<E> {
    pub(crate) fn new(initial_capacity: usize, growth_factor: usize) -> Self {
        Self {
            slab: empty_slab(initial_capacity),
            top: 0,
            growth_factor,
            retained: RetainedBuffers::new(),
        }
    }

    /// Drops all slabs currently held in the retained-buffer registry.
    ///
    /// Calling this when nothing is retained is a no-op; the operation is idempotent
    /// and never fails.
    pub fn release_retained_buffers(&mut self) {
        self.retained.release();
    }

    /// The number of outgrown slabs currently held in the registry.
    #[must_use]
    pub fn retained_buffer_count(&self) -> usize {
        self.retained.len()
    }

    /// Reallocates the slab at the next capacity step, copying the live range across
    /// and parking the old slab. Returns the number of slots added.
    fn grow(&mut self) -> usize {
        let old_slots = self.slab.len();
        let new_slots = grown_capacity(old_slots, self.growth_factor);
        let mut new_slab = empty_slab(new_slots);

        // The live range must move regardless of which operation triggered the
        // growth; on the take path it happens to be empty, but the pass still runs.
        for index in 0..self.top {
            let slot = self
                .slab
                .get_mut(index)
                .expect("the live range lies within the old slab");
            let target = new_slab
                .get_mut(index)
                .expect("the new slab is strictly larger than the old one");
            *target = slot.take();
        }

        let old_slab = mem::replace(&mut self.slab, new_slab);
        self.retained.retain(old_slab);

        new_slots
            .checked_sub(old_slots)
            .expect("the grown slot count is always larger than the old one")
    }

    fn push(&mut self, instance: E) {
        let slot = self
            .slab
            .get_mut(self.top)
            .expect("push is only called when a free slot exists above the live range");
        *slot = Some(instance);
        self.top = self
            .top
            .checked_add(1)
            .expect("the live range lies within the slab, so the top index cannot overflow");
    }

    fn pop(&mut self) -> Option<E> {
        let below_top = self.top.checked_sub(1)?;
        let instance = self
            .slab
            .get_mut(below_top)
            .expect("the live range lies within the slab")
            .take()
            .expect("slots below the top index always hold an instance");
        self.top = below_top;
        Some(instance)
    }
}

impl<E> BackingStore<E> for StackStore<E> {
    fn take(&mut self, factory: &mut dyn FnMut() -> E) -> E {
        if let Some(instance) = self.pop() {
            return instance;
        }

        // Empty stack: grow (paying the copy pass), then populate the added slots.
        let added = self.grow();
        for _ in 0..added {
            let instance = factory();
            self.push(instance);
        }

        self.pop()
            .expect("growth adds at least one slot and every added slot was populated")
    }

    fn put(&mut self, instance: E) {
        if self.top == self.slab.len() {
            _ = self.grow();
        }

        self.push(instance);
    }

    fn available(&self) -> usize {
        self.top
    }

    fn capacity(&self) -> usize {
        self.slab.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_then_take_returns_the_same_instance() {
        let mut store = StackStore::new(4, 2);
        store.put("mine".to_string());

        let mut factory = || panic!("an instance was available, the factory must not run");
        let instance: String = store.take(&mut factory);
        assert_eq!(instance, "mine");
    }

    #[test]
    fn takes_in_lifo_order() {
        let mut store = StackStore::new(4, 2);
        store.put(1_u32);
        store.put(2);
        store.put(3);

        let mut factory = || unreachable!();
        assert_eq!(store.take(&mut factory), 3);
        assert_eq!(store.take(&mut factory), 2);
        assert_eq!(store.take(&mut factory), 1);
    }

    #[test]
    fn empty_take_grows_and_populates_added_slots() {
        let mut created = 0_u32;
        let mut store = StackStore::new(4, 2);

        let mut factory = || {
            created += 1;
            created
        };
        _ = store.take(&mut factory);

        assert_eq!(created, 4);
        assert_eq!(store.capacity(), 8);
        assert_eq!(store.available(), 3);
        assert_eq!(store.retained_buffer_count(), 1);
    }

    #[test]
    fn full_put_grows_and_preserves_order() {
        let mut store = StackStore::new(2, 2);
        store.put(1_u32);
        store.put(2);
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
    fn zero_capacity_take_produces_one_instance() {
        let mut store = StackStore::new(0, 2);
        let mut factory = || 9_u32;

        assert_eq!(store.take(&mut factory), 9);
        assert_eq!(store.capacity(), 1);
        assert_eq!(store.available(), 0);
    }

    #[test]
    fn release_retained_buffers_is_idempotent() {
        let mut store = StackStore::new(1, 2);
        let mut factory = || 0_u32;
        _ = store.take(&mut factory);
        _ = store.take(&mut factory);
        assert!(store.retained_buffer_count() >= 1);

        store.release_retained_buffers();
        store.release_retained_buffers();
        assert_eq!(store.retained_buffer_count(), 0);
    }

    #[test]
    fn capacity_never_decreases() {
        let mut store = StackStore::new(1, 2);
        let mut previous = store.capacity();

        for round in 0..50_u32 {
            if round % 3 == 0 {
                store.put(round);
            } else {
                let mut factory = || round;
                _ = store.take(&mut factory);
            }
            assert!(store.capacity() >= previous);
            previous = store.capacity();
        }
    }
}
