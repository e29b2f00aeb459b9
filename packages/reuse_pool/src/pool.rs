use std::fmt;

use crate::{
    ArrayStore, BackingStore, LinkedStore, MultiArrayStore, PoolError, StackStore, TieredStore,
};

/// An object pool that hands out mutable instances of `E` and accepts them back.
///
/// The pool pairs a caller-supplied factory with one of five interchangeable
/// [backing stores][BackingStore] selected at construction time through
/// [`PoolBuilder`][crate::PoolBuilder]. All pool-level behavior is identical across
/// variants; only the growth strategy and its cost profile differ. The per-variant
/// aliases ([`LinkedPool`], [`ArrayPool`], [`MultiArrayPool`], [`StackPool`],
/// [`TieredPool`]) exist so the variant reads at a glance in signatures.
///
/// # Instance state
///
/// The pool treats instances as opaque. An instance released back into the pool keeps
/// whatever state it accumulated while checked out; resetting it before or after
/// reuse is the caller's business.
///
/// # External release
///
/// Releasing instances the pool never produced is permitted. It is the uncommon
/// path: the pool grows through `release()` to make room, which for some variants
/// costs a copy that `get()`-driven growth avoids.
///
/// # Thread safety
///
/// The pool assumes a single logical owner. Every operation takes `&mut self`, there
/// is no internal locking and no operation ever blocks. Wrap the pool in a lock if
/// multiple threads need it.
///
/// # Examples
///
/// ```
/// use reuse_pool::PoolBuilder;
///
/// let mut pool = PoolBuilder::<Vec<u8>>::new()
///     .initial_capacity(4)
///     .preload(2)
///     .default_factory()
///     .build_array();
///
/// let mut buffer = pool.get();
/// buffer.extend_from_slice(b"scratch");
///
/// // Contents survive the round trip; clear before reuse if that matters to you.
/// pool.release(buffer);
/// ```
pub struct ReusePool<E, S>
where
    S: BackingStore<E>,
{
    store: S,
    factory: Box<dyn FnMut() -> E>,
}

/// A [`ReusePool`] over the linked-node store.
pub type LinkedPool<E> = ReusePool<E, LinkedStore<E>>;

/// A [`ReusePool`] over the flat-array store.
pub type ArrayPool<E> = ReusePool<E, ArrayStore<E>>;

/// A [`ReusePool`] over the segmented multi-array store.
pub type MultiArrayPool<E> = ReusePool<E, MultiArrayStore<E>>;

/// A [`ReusePool`] over the LIFO stack store.
pub type StackPool<E> = ReusePool<E, StackStore<E>>;

/// A [`ReusePool`] over the two-tier store.
pub type TieredPool<E> = ReusePool<E, TieredStore<E>>;

impl<E, S> ReusePool<E, S>
where
    S: BackingStore<E>,
{
    pub(crate) fn new_inner(store: S, factory: Box<dyn FnMut() -> E>) -> Self {
        Self { store, factory }
    }

    /// Removes and returns an instance from the pool.
    ///
    /// Never fails and never returns nothing: when no stored instance is available,
    /// the backing store grows (allocating capacity and/or invoking the factory)
    /// and an instance is produced from the fresh capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use reuse_pool::PoolBuilder;
    ///
    /// let mut pool = PoolBuilder::<String>::new().default_factory().build_linked();
    ///
    /// // Works even on a brand-new, empty pool.
    /// let instance = pool.get();
    /// assert!(instance.is_empty());
    /// ```
    #[must_use]
    pub fn get(&mut self) -> E {
        self.store.take(self.factory.as_mut())
    }

    /// Returns an instance to the pool, making it available for a future
    /// [`get()`][Self::get].
    ///
    /// Always succeeds: if every slot already holds an available instance (only
    /// possible when external instances are being donated), the store grows first.
    ///
    /// # Examples
    ///
    /// ```
    /// use reuse_pool::PoolBuilder;
    ///
    /// let mut pool = PoolBuilder::<String>::new().default_factory().build_stack();
    ///
    /// let instance = pool.get();
    /// pool.release(instance);
    /// assert_eq!(pool.available(), 1);
    /// ```
    pub fn release(&mut self, instance: E) {
        self.store.put(instance);
    }

    /// Returns an optional instance to the pool, rejecting an absent one.
    ///
    /// By-value [`release()`][Self::release] cannot express "no instance"; this
    /// variant exists for callers holding an `Option<E>`, e.g. a slot being vacated.
    /// `None` fails with [`PoolError::MissingInstance`] and leaves the pool
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::MissingInstance`] when `instance` is `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use reuse_pool::{PoolBuilder, PoolError};
    ///
    /// let mut pool = PoolBuilder::<String>::new().default_factory().build_tiered();
    ///
    /// assert_eq!(pool.try_release(None), Err(PoolError::MissingInstance));
    /// assert_eq!(pool.try_release(Some(String::new())), Ok(()));
    /// ```
    pub fn try_release(&mut self, instance: Option<E>) -> Result<(), PoolError> {
        let instance = instance.ok_or(PoolError::MissingInstance)?;
        self.store.put(instance);
        Ok(())
    }

    /// The number of instances currently available for [`get()`][Self::get] without
    /// growth.
    #[must_use]
    pub fn available(&self) -> usize {
        self.store.available()
    }

    /// The number of slots currently allocated by the backing store.
    ///
    /// Monotone non-decreasing; the pool never compacts.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }
}

impl<E> ArrayPool<E> {
    /// Drops the outgrown buffers the flat-array store has retained across growth
    /// steps, releasing their memory now instead of at pool drop.
    ///
    /// Idempotent and infallible.
    ///
    /// # Examples
    ///
    /// ```
    /// use reuse_pool::PoolBuilder;
    ///
    /// let mut pool = PoolBuilder::<String>::new()
    ///     .initial_capacity(1)
    ///     .default_factory()
    ///     .build_array();
    ///
    /// // Force growth, then discard the superseded buffer.
    /// let a = pool.get();
    /// let b = pool.get();
    /// pool.release_retained_buffers();
    /// assert_eq!(pool.retained_buffer_count(), 0);
    /// # pool.release(a);
    /// # pool.release(b);
    /// ```
    pub fn release_retained_buffers(&mut self) {
        self.store.release_retained_buffers();
    }

    /// The number of outgrown buffers currently retained.
    #[must_use]
    pub fn retained_buffer_count(&self) -> usize {
        self.store.retained_buffer_count()
    }
}

impl<E> StackPool<E> {
    /// Drops the outgrown slabs the stack store has retained across growth steps,
    /// releasing their memory now instead of at pool drop.
    ///
    /// Idempotent and infallible.
    pub fn release_retained_buffers(&mut self) {
        self.store.release_retained_buffers();
    }

    /// The number of outgrown slabs currently retained.
    #[must_use]
    pub fn retained_buffer_count(&self) -> usize {
        self.store.retained_buffer_count()
    }
}

impl<E, S> fmt::Debug for ReusePool<E, S>
where
    S: BackingStore<E> + fmt::Debug,
{
    #[cfg_attr(test, mutants::skip)] // The exact output format is not part of the contract.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReusePool")
            .field(
                "item_type",
                &format_args!("{}", std::any::type_name::<E>()),
            )
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}
