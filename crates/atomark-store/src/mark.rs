//! Stable indirection records.

use atomark_core::{AtomIndex, Generation};

/// Points at the atom currently holding an entity and carries the
/// generation handles are checked against.
///
/// Marks are created in lockstep with atoms and never destroyed; only
/// `atom` and `generation` change over a mark's life.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Mark {
    pub(crate) atom: AtomIndex,
    pub(crate) generation: Generation,
}

impl Mark {
    /// A mark at generation zero governing `atom`.
    pub(crate) fn new(atom: AtomIndex) -> Self {
        Self {
            atom,
            generation: Generation::ZERO,
        }
    }

    /// Invalidate every handle captured at the current generation.
    pub(crate) fn bump(&mut self) {
        self.generation = self.generation.next();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bump_advances_generation_only() {
        let mut mark = Mark::new(AtomIndex(5));
        mark.bump();
        mark.bump();
        assert_eq!(mark.generation, Generation(2));
        assert_eq!(mark.atom, AtomIndex(5));
    }
}
