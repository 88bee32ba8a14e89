//! Storage slots.
//!
//! An [`Atom`] holds room for one entity, the entity's liveness flag and
//! the index of the [`Mark`](crate::mark::Mark) currently governing it.
//! Atoms are recycled indefinitely: the payload is constructed into a
//! slot when it is claimed and dropped in place when a refresh pass
//! reclaims it, but the slot itself lives as long as the manager.

use atomark_core::MarkIndex;

/// A reusable storage slot for one entity.
///
/// `alive == true` implies `value` is `Some`. A dead atom may still hold
/// its value until the next refresh pass drops it.
#[derive(Debug)]
pub(crate) struct Atom<T> {
    /// The payload, or `None` for reserve and reclaimed slots.
    value: Option<T>,
    /// Index of the mark this atom is connected to.
    pub(crate) mark: MarkIndex,
    pub(crate) alive: bool,
}

impl<T> Atom<T> {
    /// An empty, dead slot connected to `mark`.
    pub(crate) fn new(mark: MarkIndex) -> Self {
        Self {
            value: None,
            mark,
            alive: false,
        }
    }

    /// Construct `value` into this slot and mark it alive.
    ///
    /// The slot must be empty; a leftover payload would otherwise be
    /// dropped here instead of during a refresh pass.
    pub(crate) fn init(&mut self, value: T) {
        debug_assert!(self.value.is_none(), "init on an occupied atom");
        self.value = Some(value);
        self.alive = true;
    }

    /// Drop the stored payload in place. Returns whether one was present.
    pub(crate) fn deinit(&mut self) -> bool {
        self.alive = false;
        self.value.take().is_some()
    }

    /// Flag the slot as dead. Idempotent; storage is left untouched.
    pub(crate) fn set_dead(&mut self) {
        self.alive = false;
    }

    #[cfg(test)]
    pub(crate) fn is_occupied(&self) -> bool {
        self.value.is_some()
    }

    pub(crate) fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub(crate) fn get_mut(&mut self) -> Option<&mut T> {
        self.value.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_atom_is_dead_and_empty() {
        let atom: Atom<u32> = Atom::new(MarkIndex(3));
        assert!(!atom.alive);
        assert!(!atom.is_occupied());
        assert_eq!(atom.mark, MarkIndex(3));
    }

    #[test]
    fn init_then_deinit() {
        let mut atom = Atom::new(MarkIndex(0));
        atom.init(42u32);
        assert!(atom.alive);
        assert_eq!(atom.get(), Some(&42));
        assert!(atom.deinit());
        assert!(!atom.alive);
        assert!(!atom.is_occupied());
        assert!(!atom.deinit());
    }

    #[test]
    fn set_dead_keeps_value() {
        let mut atom = Atom::new(MarkIndex(0));
        atom.init(String::from("x"));
        atom.set_dead();
        atom.set_dead();
        assert!(!atom.alive);
        assert_eq!(atom.get().map(String::as_str), Some("x"));
    }
}
