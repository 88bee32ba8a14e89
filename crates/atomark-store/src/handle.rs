//! Entity handles.
//!
//! A [`Handle`] names an entity by the mark that tracks it and the
//! generation that mark had when the entity was created. It is
//! generation-scoped: comparing the captured generation against the
//! mark's current one is an O(1) liveness check with no lookup table.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use atomark_core::{Generation, ManagerId, MarkIndex};

use crate::manager::Manager;

/// Copyable reference to an entity stored in a [`Manager`].
///
/// Handles store indices only, never addresses, so they survive both
/// array growth and the relocations performed by
/// [`Manager::refresh`]. A handle becomes permanently invalid once the
/// entity it names is reclaimed.
#[must_use]
pub struct Handle<T> {
    pub(crate) manager: ManagerId,
    pub(crate) mark: MarkIndex,
    pub(crate) generation: Generation,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    pub(crate) fn new(manager: ManagerId, mark: MarkIndex, generation: Generation) -> Self {
        Self {
            manager,
            mark,
            generation,
            _marker: PhantomData,
        }
    }

    /// The mark this handle points at.
    pub fn mark(&self) -> MarkIndex {
        self.mark
    }

    /// The generation captured when the entity was created.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// The manager that minted this handle.
    pub fn manager_id(&self) -> ManagerId {
        self.manager
    }

    /// Whether the entity is still tracked by `manager`.
    ///
    /// See [`Manager::is_alive`].
    pub fn is_alive(&self, manager: &Manager<T>) -> bool {
        manager.is_alive(*self)
    }

    /// Mark the entity dead. See [`Manager::destroy`].
    pub fn destroy(&self, manager: &mut Manager<T>) -> bool {
        manager.destroy(*self)
    }

    /// Borrow the entity if the handle is still valid.
    pub fn get<'m>(&self, manager: &'m Manager<T>) -> Option<&'m T> {
        manager.get(*self)
    }

    /// Mutably borrow the entity if the handle is still valid.
    pub fn get_mut<'m>(&self, manager: &'m mut Manager<T>) -> Option<&'m mut T> {
        manager.get_mut(*self)
    }
}

// Manual impls: deriving would require `T: Clone` and friends.

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.manager == other.manager
            && self.mark == other.mark
            && self.generation == other.generation
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.manager.hash(state);
        self.mark.hash(state);
        self.generation.hash(state);
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("manager", &self.manager)
            .field("mark", &self.mark)
            .field("generation", &self.generation)
            .finish()
    }
}

impl<T> fmt::Display for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Handle(mgr={}, mark={}, gen={})",
            self.manager, self.mark, self.generation
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct NotClone;

    #[test]
    fn handle_is_copy_without_bounds() {
        let h: Handle<NotClone> = Handle::new(ManagerId::next(), MarkIndex(2), Generation(7));
        let copy = h;
        assert_eq!(h, copy);
        assert_eq!(copy.mark(), MarkIndex(2));
        assert_eq!(copy.generation(), Generation(7));
    }

    #[test]
    fn handles_differ_by_generation() {
        let id = ManagerId::next();
        let a: Handle<u8> = Handle::new(id, MarkIndex(0), Generation(0));
        let b: Handle<u8> = Handle::new(id, MarkIndex(0), Generation(1));
        assert_ne!(a, b);
        let set: HashSet<_> = [a, b, a].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn display_lists_fields() {
        let id = ManagerId::next();
        let h: Handle<u8> = Handle::new(id, MarkIndex(1), Generation(3));
        assert_eq!(h.to_string(), format!("Handle(mgr={id}, mark=1, gen=3)"));
    }
}
