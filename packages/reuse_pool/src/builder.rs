use std::fmt;

use crate::{
    ArrayPool, ArrayStore, BackingStore, LinkedPool, LinkedStore, MultiArrayPool, MultiArrayStore,
    ReusePool, StackPool, StackStore, TieredPool, TieredStore,
};

/// The default slot count a pool starts with.
pub const DEFAULT_INITIAL_CAPACITY: usize = 16;

/// The default multiplier applied to capacity on each growth step of the
/// reallocating stores.
pub const DEFAULT_GROWTH_FACTOR: usize = 2;

/// The default slot count of one multi-array segment.
pub const DEFAULT_SEGMENT_CAPACITY: usize = 32;

/// Builder for every [`ReusePool`] variant.
///
/// Configure the common sizing parameters, supply a factory, then pick the backing
/// store with one of the terminal `build_*` methods. The factory is mandatory; call
/// either [`factory()`][Self::factory] with an explicit capability or
/// [`default_factory()`][Self::default_factory] to construct instances via
/// [`Default`].
///
/// # Examples
///
/// ```
/// use reuse_pool::PoolBuilder;
///
/// let mut pool = PoolBuilder::new()
///     .initial_capacity(64)
///     .preload(8)
///     .factory(|| Vec::<u8>::with_capacity(1024))
///     .build_multi_array();
///
/// assert_eq!(pool.available(), 8);
/// ```
#[must_use]
pub struct PoolBuilder<E> {
    initial_capacity: usize,
    preload: usize,
    growth_factor: usize,
    segment_capacity: usize,
    factory: Option<Box<dyn FnMut() -> E>>,
}

impl<E> PoolBuilder<E> {
    /// Starts a builder with the default sizing and no factory.
    pub fn new() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            preload: 0,
            growth_factor: DEFAULT_GROWTH_FACTOR,
            segment_capacity: DEFAULT_SEGMENT_CAPACITY,
            factory: None,
        }
    }

    /// Sets the slot count the pool starts with.
    ///
    /// Zero is allowed; the first `get()` then performs the first growth step. The
    /// linked variant has no pre-allocatable slots, so for it this value only bounds
    /// [`preload()`][Self::preload].
    pub fn initial_capacity(mut self, slots: usize) -> Self {
        self.initial_capacity = slots;
        self
    }

    /// Sets the number of instances eagerly materialized via the factory at
    /// construction, before the first `get()`.
    ///
    /// Must not exceed the initial capacity; validated when the pool is built.
    pub fn preload(mut self, count: usize) -> Self {
        self.preload = count;
        self
    }

    /// Sets the multiplier applied to capacity on each growth step of the array and
    /// stack stores. Defaults to doubling.
    ///
    /// # Panics
    ///
    /// Panics if `factor` is less than 2 (growth must grow).
    pub fn growth_factor(mut self, factor: usize) -> Self {
        assert!(factor >= 2, "the growth factor must be at least 2");
        self.growth_factor = factor;
        self
    }

    /// Sets the slot count of one segment of the multi-array store.
    ///
    /// # Panics
    ///
    /// Panics if `slots` is zero.
    pub fn segment_capacity(mut self, slots: usize) -> Self {
        assert!(slots > 0, "a segment must hold at least one instance");
        self.segment_capacity = slots;
        self
    }

    /// Supplies the factory invoked whenever the pool must materialize a brand-new
    /// instance.
    pub fn factory(mut self, factory: impl FnMut() -> E + 'static) -> Self {
        self.factory = Some(Box::new(factory));
        self
    }

    /// Builds a [`LinkedPool`]: one node per instance, grow-by-one.
    ///
    /// # Panics
    ///
    /// Panics if no factory was supplied or `preload` exceeds the initial capacity.
    pub fn build_linked(self) -> LinkedPool<E> {
        let (factory, options) = self.into_parts();
        Self::assemble(LinkedStore::new(), factory, options.preload)
    }

    /// Builds an [`ArrayPool`]: flat buffer with reallocate-and-retain growth.
    ///
    /// # Panics
    ///
    /// Panics if no factory was supplied or `preload` exceeds the initial capacity.
    pub fn build_array(self) -> ArrayPool<E> {
        let (factory, options) = self.into_parts();
        let store = ArrayStore::new(options.initial_capacity, options.growth_factor);
        Self::assemble(store, factory, options.preload)
    }

    /// Builds a [`MultiArrayPool`]: fixed-size segments, append-only growth.
    ///
    /// The initial capacity is rounded up to a whole number of segments.
    ///
    /// # Panics
    ///
    /// Panics if no factory was supplied or `preload` exceeds the initial capacity.
    pub fn build_multi_array(self) -> MultiArrayPool<E> {
        let (factory, options) = self.into_parts();
        let store = MultiArrayStore::new(options.initial_capacity, options.segment_capacity);
        Self::assemble(store, factory, options.preload)
    }

    /// Builds a [`StackPool`]: LIFO slab with reallocate-and-copy growth.
    ///
    /// # Panics
    ///
    /// Panics if no factory was supplied or `preload` exceeds the initial capacity.
    pub fn build_stack(self) -> StackPool<E> {
        let (factory, options) = self.into_parts();
        let store = StackStore::new(options.initial_capacity, options.growth_factor);
        Self::assemble(store, factory, options.preload)
    }

    /// Builds a [`TieredPool`]: fixed array tier plus linked overflow tier.
    ///
    /// The initial capacity becomes the fixed size of the array tier.
    ///
    /// # Panics
    ///
    /// Panics if no factory was supplied or `preload` exceeds the initial capacity.
    pub fn build_tiered(self) -> TieredPool<E> {
        let (factory, options) = self.into_parts();
        let store = TieredStore::new(options.initial_capacity);
        Self::assemble(store, factory, options.preload)
    }

    fn into_parts(self) -> (Box<dyn FnMut() -> E>, BuildOptions) {
        assert!(
            self.preload <= self.initial_capacity,
            "preload ({}) must not exceed the initial capacity ({})",
            self.preload,
            self.initial_capacity
        );

        let factory = self
            .factory
            .expect("a factory must be set via .factory() or .default_factory() before building");

        (
            factory,
            BuildOptions {
                initial_capacity: self.initial_capacity,
                preload: self.preload,
                growth_factor: self.growth_factor,
                segment_capacity: self.segment_capacity,
            },
        )
    }

    fn assemble<S>(
        mut store: S,
        mut factory: Box<dyn FnMut() -> E>,
        preload: usize,
    ) -> ReusePool<E, S>
    where
        S: BackingStore<E>,
    {
        for _ in 0..preload {
            let instance = factory();
            store.put(instance);
        }

        ReusePool::new_inner(store, factory)
    }
}

impl<E> PoolBuilder<E>
where
    E: Default + 'static,
{
    /// Uses `E`'s [`Default`] implementation as the factory.
    pub fn default_factory(self) -> Self {
        self.factory(E::default)
    }
}

impl<E> Default for PoolBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Validated sizing parameters, separated from the factory so the builder can be
/// consumed in one move.
struct BuildOptions {
    initial_capacity: usize,
    preload: usize,
    growth_factor: usize,
    segment_capacity: usize,
}

impl<E> fmt::Debug for PoolBuilder<E> {
    #[cfg_attr(test, mutants::skip)] // The exact output format is not part of the contract.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoolBuilder")
            .field(
                "item_type",
                &format_args!("{}", std::any::type_name::<E>()),
            )
            .field("initial_capacity", &self.initial_capacity)
            .field("preload", &self.preload)
            .field("growth_factor", &self.growth_factor)
            .field("segment_capacity", &self.segment_capacity)
            .field("has_factory", &self.factory.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(PoolBuilder<String>: std::fmt::Debug);

    #[test]
    fn defaults_are_documented_values() {
        let builder = PoolBuilder::<u32>::new();
        assert_eq!(builder.initial_capacity, DEFAULT_INITIAL_CAPACITY);
        assert_eq!(builder.preload, 0);
        assert_eq!(builder.growth_factor, DEFAULT_GROWTH_FACTOR);
        assert_eq!(builder.segment_capacity, DEFAULT_SEGMENT_CAPACITY);
        assert!(builder.factory.is_none());
    }

    #[test]
    fn setters_store_values() {
        let builder = PoolBuilder::<u32>::new()
            .initial_capacity(100)
            .preload(10)
            .growth_factor(4)
            .segment_capacity(8);

        assert_eq!(builder.initial_capacity, 100);
        assert_eq!(builder.preload, 10);
        assert_eq!(builder.growth_factor, 4);
        assert_eq!(builder.segment_capacity, 8);
    }

    #[test]
    #[should_panic]
    fn growth_factor_below_two_panics() {
        _ = PoolBuilder::<u32>::new().growth_factor(1);
    }

    #[test]
    #[should_panic]
    fn zero_segment_capacity_panics() {
        _ = PoolBuilder::<u32>::new().segment_capacity(0);
    }

    #[test]
    #[should_panic]
    fn preload_beyond_initial_capacity_panics_at_build() {
        _ = PoolBuilder::<u32>::new()
            .initial_capacity(2)
            .preload(3)
            .factory(|| 0)
            .build_array();
    }

    #[test]
    #[should_panic]
    fn build_without_factory_panics() {
        _ = PoolBuilder::<u32>::new().build_linked();
    }

    #[test]
    fn preload_materializes_instances_eagerly() {
        let mut created = 0_u32;

        let mut pool = PoolBuilder::<u32>::new()
            .initial_capacity(4)
            .preload(3)
            .factory(move || {
                created += 1;
                created
            })
            .build_array();

        assert_eq!(pool.available(), 3);
        assert_eq!(pool.capacity(), 4);

        let mut seen = vec![pool.get(), pool.get(), pool.get()];
        seen.sort_unstable();
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[test]
    fn default_factory_uses_default_instances() {
        let mut pool = PoolBuilder::<String>::new()
            .preload(1)
            .default_factory()
            .build_tiered();

        assert_eq!(pool.get(), String::new());
    }

    #[test]
    fn preload_applies_to_every_variant() {
        let linked = PoolBuilder::<u32>::new()
            .preload(2)
            .factory(|| 0)
            .build_linked();
        assert_eq!(linked.available(), 2);

        let array = PoolBuilder::<u32>::new()
            .preload(2)
            .factory(|| 0)
            .build_array();
        assert_eq!(array.available(), 2);

        let multi = PoolBuilder::<u32>::new()
            .preload(2)
            .factory(|| 0)
            .build_multi_array();
        assert_eq!(multi.available(), 2);

        let stack = PoolBuilder::<u32>::new()
            .preload(2)
            .factory(|| 0)
            .build_stack();
        assert_eq!(stack.available(), 2);

        let tiered = PoolBuilder::<u32>::new()
            .preload(2)
            .factory(|| 0)
            .build_tiered();
        assert_eq!(tiered.available(), 2);
    }

    #[test]
    fn debug_output_elides_the_factory() {
        let builder = PoolBuilder::<u32>::new().factory(|| 0);
        let output = format!("{builder:?}");
        assert!(output.contains("PoolBuilder"));
        assert!(output.contains("has_factory: true"));
    }
}
