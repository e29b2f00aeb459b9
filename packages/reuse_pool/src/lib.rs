//! Allocation-reuse object pools with five interchangeable backing-store strategies.
//!
//! This crate provides [`ReusePool`], a pool that hands out mutable instances of a
//! caller-defined type and accepts them back, keeping steady-state operation free of
//! transient allocation. The interesting part is the growth strategy, so the pool is
//! generic over its [`BackingStore`] and ships five of them:
//!
//! - **[`LinkedPool`]** - singly linked node chain; simplest logic, grows one
//!   instance at a time, worst cache locality.
//! - **[`ArrayPool`]** - one flat buffer; growth swaps in a larger buffer and parks
//!   the outgrown one in a retained-buffer registry. The `get()`-driven growth path
//!   copies nothing because an exhausted buffer holds no live entries.
//! - **[`MultiArrayPool`]** - fixed-size segments appended as needed; growth never
//!   copies an instance, at the price of an indirection at segment boundaries.
//! - **[`StackPool`]** - LIFO slab with a top index; growth reallocates and copies
//!   the live range on both the `get()` and `release()` paths.
//! - **[`TieredPool`]** - fixed array tier that is never resized, plus a linked
//!   overflow tier for everything beyond it.
//!
//! # Key properties
//!
//! - **`get()` is total**: it always produces an instance, growing the store when
//!   the pool is dry.
//! - **Capacity only grows**: no variant ever shrinks or compacts.
//! - **Opaque instances**: the pool never touches instance state; reuse hygiene is
//!   the caller's responsibility.
//! - **Single owner**: every operation takes `&mut self`; there is no internal
//!   locking and nothing ever blocks.
//!
//! # Example
//!
//! ```
//! use reuse_pool::PoolBuilder;
//!
//! // A pool of scratch buffers: 4 slots, 2 built up front.
//! let mut pool = PoolBuilder::new()
//!     .initial_capacity(4)
//!     .preload(2)
//!     .factory(|| Vec::<u8>::with_capacity(4096))
//!     .build_array();
//!
//! let mut scratch = pool.get();
//! scratch.extend_from_slice(b"transient work");
//! scratch.clear();
//! pool.release(scratch);
//!
//! // The array and stack variants retain outgrown buffers; drop them on demand.
//! pool.release_retained_buffers();
//! ```
//!
//! # Choosing a variant
//!
//! The array variant is the fastest in steady state and has the cheapest
//! `get()`-driven growth; the stack variant trades a copying growth path for strict
//! LIFO reuse (the most recently released instance, likely still cache-warm, is
//! handed out first); the multi-array variant avoids growth copies entirely; the
//! tiered variant bounds the contiguous tier's size while still growing without
//! bound; the linked variant is the baseline with the least machinery.

mod array_store;
mod builder;
mod error;
mod linked_store;
mod multi_array_store;
mod pool;
mod retained;
mod stack_store;
mod store;
mod tiered_store;

pub use array_store::ArrayStore;
pub use builder::{
    DEFAULT_GROWTH_FACTOR, DEFAULT_INITIAL_CAPACITY, DEFAULT_SEGMENT_CAPACITY, PoolBuilder,
};
pub use error::PoolError;
pub use linked_store::LinkedStore;
pub use multi_array_store::MultiArrayStore;
pub use pool::{ArrayPool, LinkedPool, MultiArrayPool, ReusePool, StackPool, TieredPool};
pub use stack_store::StackStore;
pub use store::BackingStore;
pub use tiered_store::TieredStore;
