//! Runs the same checkout/checkin workload through all five backing-store
//! variants and prints how each one's capacity evolved.

use reuse_pool::{BackingStore, PoolBuilder, ReusePool};

fn exercise<S>(name: &str, mut pool: ReusePool<String, S>)
where
    S: BackingStore<String>,
{
    let initial_capacity = pool.capacity();

    let held: Vec<_> = (0..20).map(|_| pool.get()).collect();
    let peak_capacity = pool.capacity();

    for instance in held {
        pool.release(instance);
    }

    println!(
        "{name:>12}: capacity {initial_capacity:>3} -> {peak_capacity:>3}, \
         {} available after returning everything",
        pool.available()
    );
}

fn main() {
    let sizing = |builder: PoolBuilder<String>| {
        builder
            .initial_capacity(8)
            .preload(4)
            .default_factory()
    };

    exercise("linked", sizing(PoolBuilder::new()).build_linked());
    exercise("array", sizing(PoolBuilder::new()).build_array());
    exercise(
        "multi_array",
        sizing(PoolBuilder::new()).segment_capacity(8).build_multi_array(),
    );
    exercise("stack", sizing(PoolBuilder::new()).build_stack());
    exercise("tiered", sizing(PoolBuilder::new()).build_tiered());
}
