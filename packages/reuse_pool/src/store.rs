/// The storage strategy behind a [`ReusePool`][crate::ReusePool].
///
/// A backing store owns the reusable instances that are not currently checked out and
/// implements the growth policy that kicks in when the pool runs dry (on `take`) or
/// runs out of room for returned instances (on `put`).
///
/// The five provided implementations are interchangeable behind this trait:
///
/// * [`LinkedStore`][crate::LinkedStore] - singly linked node chain, grow-by-one.
/// * [`ArrayStore`][crate::ArrayStore] - flat buffer, reallocate-and-retain growth.
/// * [`MultiArrayStore`][crate::MultiArrayStore] - fixed-size segments, append-only growth.
/// * [`StackStore`][crate::StackStore] - LIFO slab, reallocate-and-copy growth.
/// * [`TieredStore`][crate::TieredStore] - fixed array plus linked overflow chain.
///
/// # Contract
///
/// At every point in time, `0 <= available() <= capacity()` and `capacity()` never
/// decreases. `take()` must always produce an instance, invoking the factory when no
/// stored instance is available. `put()` must always accept an instance, growing the
/// store when every slot is already occupied (which only happens when the caller
/// donates instances the store never handed out).
pub trait BackingStore<E> {
    /// Removes and returns an available instance, growing the store via `factory`
    /// when none is available.
    fn take(&mut self, factory: &mut dyn FnMut() -> E) -> E;

    /// Stores a returned instance, making it available for a future `take()`.
    ///
    /// Grows the store when no free slot exists.
    fn put(&mut self, instance: E);

    /// The number of instances currently stored and available for `take()`.
    fn available(&self) -> usize;

    /// The number of slots currently allocated, occupied or not.
    ///
    /// Monotone non-decreasing; the stores never compact.
    fn capacity(&self) -> usize;
}

/// The next capacity step for the reallocating stores.
///
/// Multiplies by the configured growth factor, stepping to one slot when starting
/// from an empty store.
pub(crate) fn grown_capacity(current: usize, growth_factor: usize) -> usize {
    current
        .checked_mul(growth_factor)
        .expect("capacity overflow: the pool cannot hold more slots than virtual memory can fit")
        .max(1)
}
