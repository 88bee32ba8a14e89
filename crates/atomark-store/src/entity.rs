//! The per-tick update protocol for stored entities.
//!
//! [`Manager::update`](crate::Manager::update) visits every visible, alive
//! entity once and hands it an [`UpdateContext`]. Through the context an
//! entity can read the timestep, learn its own handle, queue new entities
//! and mark itself dead, all without holding a handle to itself.

use crate::handle::Handle;

/// A payload type driven by [`Manager::update`](crate::Manager::update).
pub trait Entity: Sized {
    /// Advance this entity by one tick.
    fn update(&mut self, ctx: &mut UpdateContext<'_, Self>);
}

/// Per-visit context passed to [`Entity::update`].
pub struct UpdateContext<'a, T> {
    dt: f64,
    handle: Handle<T>,
    destroyed: bool,
    spawned: &'a mut Vec<T>,
}

impl<'a, T> UpdateContext<'a, T> {
    pub(crate) fn new(dt: f64, handle: Handle<T>, spawned: &'a mut Vec<T>) -> Self {
        Self {
            dt,
            handle,
            destroyed: false,
            spawned,
        }
    }

    /// The timestep passed to `update`.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Handle to the entity being visited.
    pub fn handle(&self) -> Handle<T> {
        self.handle
    }

    /// Mark the visited entity dead.
    ///
    /// The entity keeps running to the end of this call and stays
    /// reachable through valid handles until the next refresh pass
    /// reclaims it.
    pub fn destroy_self(&mut self) {
        self.destroyed = true;
    }

    /// Whether [`destroy_self`](Self::destroy_self) was called during this visit.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Queue a new entity.
    ///
    /// Queued entities are created once the visiting loop finishes and
    /// become visible after the next refresh pass. Their handles are
    /// returned in [`UpdateReport::spawned`](crate::UpdateReport::spawned);
    /// a spawn that exceeds the capacity limit is dropped and counted in
    /// [`UpdateReport::rejected_spawns`](crate::UpdateReport::rejected_spawns).
    pub fn spawn(&mut self, value: T) {
        self.spawned.push(value);
    }
}
