//! Counters describing manager activity.
//!
//! [`ManagerMetrics`] accumulates over a manager's lifetime.
//! [`RefreshStats`] and [`UpdateReport`] describe a single pass.

use smallvec::SmallVec;

use crate::handle::Handle;

/// Cumulative counters, updated by every operation that changes layout.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ManagerMetrics {
    /// Entities constructed into a slot.
    pub created: u64,
    /// Entities dropped by a refresh pass.
    pub reclaimed: u64,
    /// Completed refresh passes.
    pub refreshes: u64,
    /// Atom swaps performed while compacting.
    pub relocations: u64,
    /// Times the atom and mark arrays were extended.
    pub growth_events: u64,
}

/// Outcome of a single [`Manager::refresh`](crate::Manager::refresh).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RefreshStats {
    /// Entities left in the visible range.
    pub retained: usize,
    /// Entities dropped and whose marks advanced a generation.
    pub reclaimed: usize,
    /// Atom swaps performed.
    pub relocations: usize,
}

/// Outcome of a single [`Manager::update`](crate::Manager::update).
#[derive(Debug)]
pub struct UpdateReport<T> {
    /// Entities visited.
    pub visited: usize,
    /// Entities that called `destroy_self` during the pass.
    pub self_destroyed: usize,
    /// Handles to entities queued with `spawn`, in queue order.
    pub spawned: SmallVec<[Handle<T>; 4]>,
    /// Queued entities dropped because the slot arrays could not grow.
    pub rejected_spawns: usize,
}

impl<T> Default for UpdateReport<T> {
    fn default() -> Self {
        Self {
            visited: 0,
            self_destroyed: 0,
            spawned: SmallVec::new(),
            rejected_spawns: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = ManagerMetrics::default();
        assert_eq!(m.created, 0);
        assert_eq!(m.reclaimed, 0);
        assert_eq!(m.refreshes, 0);
        assert_eq!(m.relocations, 0);
        assert_eq!(m.growth_events, 0);
    }

    #[test]
    fn default_report_is_empty() {
        let r: UpdateReport<u8> = UpdateReport::default();
        assert_eq!(r.visited, 0);
        assert_eq!(r.self_destroyed, 0);
        assert!(r.spawned.is_empty());
        assert_eq!(r.rejected_spawns, 0);
    }
}
