//! Three countdown entities, one destroyed externally.
//!
//! Demonstrates: create → refresh → update / destroy / refresh loop until
//! every handle reports dead. Run with `RUST_LOG=trace` to see each
//! growth and compaction pass.

use atomark_store::Manager;
use atomark_test_utils::CountdownFactory;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut factory = CountdownFactory::new(1);
    let mut manager = Manager::new();

    let h1 = manager.create(factory.next_countdown());
    let h2 = manager.create(factory.next_countdown());
    let h3 = manager.create(factory.next_countdown());
    manager.refresh();

    log::info!(
        "health: h1={} h2={} h3={}",
        manager[h1].health,
        manager[h2].health,
        manager[h3].health
    );

    let mut tick = 0u32;
    while h1.is_alive(&manager) || h2.is_alive(&manager) || h3.is_alive(&manager) {
        manager.update(1.0);

        // Destroying the same entity every tick is a no-op after the first.
        h3.destroy(&mut manager);

        let stats = manager.refresh();
        tick += 1;
        if stats.reclaimed > 0 {
            log::info!("tick {tick}: reclaimed {}", stats.reclaimed);
        }
    }

    for (name, handle) in [("h1", h1), ("h2", h2), ("h3", h3)] {
        if !handle.is_alive(&manager) {
            log::info!("{name} invalid");
        }
    }
    log::info!("{:?}", manager.metrics());
}
