//! Demonstrates the retained-buffer registry of the array and stack variants.
//!
//! Growth swaps the backing buffer for a larger one but keeps the outgrown buffer
//! alive in a registry instead of freeing it on the hot path. This example forces a
//! few growth steps and then drops the retained buffers explicitly.

use reuse_pool::PoolBuilder;

fn main() {
    let mut pool = PoolBuilder::new()
        .initial_capacity(1)
        .factory(|| [0_u8; 256])
        .build_array();

    // Each exhaustion doubles the buffer and parks the outgrown one.
    let held: Vec<_> = (0..40).map(|_| pool.get()).collect();

    println!(
        "Pool grew to {} slots, retaining {} outgrown buffers along the way",
        pool.capacity(),
        pool.retained_buffer_count()
    );

    pool.release_retained_buffers();
    println!(
        "After release_retained_buffers(): {} retained",
        pool.retained_buffer_count()
    );

    // Releasing twice is fine; the second call has nothing to do.
    pool.release_retained_buffers();

    for instance in held {
        pool.release(instance);
    }
}
