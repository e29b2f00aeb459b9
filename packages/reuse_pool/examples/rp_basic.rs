//! Basic usage of the `reuse_pool` crate:
//!
//! * Building a pool with a factory and preloaded instances.
//! * Checking instances out and back in.
//! * Observing capacity growth.

use reuse_pool::PoolBuilder;

fn main() {
    // Scratch buffers are the classic pooling candidate: expensive to allocate,
    // trivial to reuse.
    let mut pool = PoolBuilder::new()
        .initial_capacity(4)
        .preload(2)
        .factory(|| Vec::<u8>::with_capacity(4096))
        .build_array();

    println!(
        "Fresh pool: {} available of {} slots",
        pool.available(),
        pool.capacity()
    );

    let mut scratch = pool.get();
    scratch.extend_from_slice(b"some transient payload");
    println!("Checked out a buffer holding {} bytes", scratch.len());

    // The pool does not reset instance state; clear before returning if the next
    // user should see an empty buffer.
    scratch.clear();
    pool.release(scratch);

    // Draining past the available instances makes the pool grow on its own.
    let held: Vec<_> = (0..10).map(|_| pool.get()).collect();
    println!(
        "After checking out {} buffers the pool grew to {} slots",
        held.len(),
        pool.capacity()
    );

    for buffer in held {
        pool.release(buffer);
    }
    println!(
        "Everything returned: {} available of {} slots",
        pool.available(),
        pool.capacity()
    );
}
