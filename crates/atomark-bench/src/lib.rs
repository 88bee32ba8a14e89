//! Benchmark workloads for the atomark slot manager.
//!
//! - [`populated`]: a refreshed manager of seeded countdown entities
//! - [`churn_round`]: destroy every n-th entity, refill, refresh

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use atomark_store::{Handle, Manager, ManagerConfig};
use atomark_test_utils::{Countdown, CountdownFactory};

/// Growth chunk used by benchmark managers, sized so that growth does
/// not dominate small workloads.
pub const BENCH_GROWTH_CHUNK: usize = 1024;

/// Build a manager holding `count` visible countdown entities.
///
/// Health values come from a [`CountdownFactory`] seeded with `seed`.
pub fn populated(count: usize, seed: u64) -> (Manager<Countdown>, Vec<Handle<Countdown>>) {
    let config = ManagerConfig {
        growth_chunk: BENCH_GROWTH_CHUNK,
        initial_capacity: count,
        max_capacity: None,
    };
    let mut manager = match Manager::with_config(config) {
        Ok(manager) => manager,
        Err(err) => panic!("invalid bench config: {err}"),
    };
    let mut factory = CountdownFactory::new(seed);
    let handles = (0..count)
        .map(|_| manager.create(factory.next_countdown()))
        .collect();
    manager.refresh();
    (manager, handles)
}

/// Destroy every `stride`-th handle, replace each with a fresh entity,
/// and refresh. Replaced handles in `handles` are overwritten in place.
///
/// Returns the number of entities replaced.
pub fn churn_round(
    manager: &mut Manager<Countdown>,
    handles: &mut [Handle<Countdown>],
    stride: usize,
    factory: &mut CountdownFactory,
) -> usize {
    let stride = stride.max(1);
    let mut replaced = 0;
    for slot in handles.iter_mut().step_by(stride) {
        manager.destroy(*slot);
        *slot = manager.create(factory.next_countdown());
        replaced += 1;
    }
    manager.refresh();
    replaced
}
