//! Integration test: the three-entity countdown loop.
//!
//! Creates three countdown entities, refreshes, then repeatedly updates,
//! destroys the third entity and refreshes until every handle reports
//! dead. The third handle must die on the first refresh after its
//! destroy; the other two must survive exactly until their own health
//! runs out.

use atomark_store::Manager;
use atomark_test_utils::{Countdown, CountdownFactory};

#[test]
fn third_entity_dies_first_and_others_follow_their_health() {
    let mut factory = CountdownFactory::new(0x5eed);
    let mut m = Manager::new();

    let e1 = factory.next_countdown();
    let e2 = factory.next_countdown();
    let health1 = e1.health as u32;
    let health2 = e2.health as u32;

    let h1 = m.create(e1);
    let h2 = m.create(e2);
    let h3 = m.create(factory.next_countdown());
    m.refresh();
    assert_eq!(m.len(), 3);

    let mut tick = 0u32;
    let mut h1_death = None;
    let mut h2_death = None;
    while m.is_alive(h1) || m.is_alive(h2) || m.is_alive(h3) {
        m.update(1.0);
        // Destroying the same handle repeatedly is harmless.
        h3.destroy(&mut m);
        m.refresh();
        tick += 1;

        if tick == 1 {
            assert!(!m.is_alive(h3));
            assert!(m.is_alive(h1));
            assert!(m.is_alive(h2));
        }
        if h1_death.is_none() && !m.is_alive(h1) {
            h1_death = Some(tick);
        }
        if h2_death.is_none() && !m.is_alive(h2) {
            h2_death = Some(tick);
        }
        assert!(tick <= 100, "loop did not terminate");
    }

    assert_eq!(h1_death, Some(health1));
    assert_eq!(h2_death, Some(health2));
    assert_eq!(m.len(), 0);
    assert_eq!(m.metrics().reclaimed, 3);
}

#[test]
fn countdowns_are_updated_once_per_tick() {
    let mut m = Manager::new();
    let handles: Vec<_> = (1..=5).map(|hp| m.create(Countdown::new(hp * 3))).collect();
    m.refresh();

    for _ in 0..2 {
        let report = m.update(0.016);
        assert_eq!(report.visited, 5);
        m.refresh();
    }
    for h in handles {
        assert_eq!(m[h].ticks, 2);
    }
}
