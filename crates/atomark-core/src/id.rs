//! Strongly-typed identifiers for slots, generations and managers.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Index of a mark: the stable indirection record a handle points at.
///
/// Mark indices never move. A mark created at index `n` stays at index
/// `n` for the lifetime of its manager, no matter how the atoms it
/// governs are shuffled around.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkIndex(pub u32);

impl MarkIndex {
    /// Number of addressable slots: one per representable `u32` index.
    pub const MAX_SLOTS: u64 = 1 << 32;

    /// The index as a `usize`, for slice addressing.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for MarkIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for MarkIndex {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Index of an atom: a storage slot in the manager's contiguous array.
///
/// Unlike [`MarkIndex`], the atom holding a given entity may change on
/// every compaction pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AtomIndex(pub u32);

impl AtomIndex {
    /// The index as a `usize`, for slice addressing.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for AtomIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for AtomIndex {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Control counter stored in every mark and captured by every handle.
///
/// Advanced each time the slot a mark governs is reclaimed. A handle is
/// valid exactly when its captured generation equals the mark's current
/// one. Advancing wraps at `u32::MAX`; a handle held across 2^32
/// reclamations of the same mark would alias a newer entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Generation(pub u32);

impl Generation {
    /// Generation of a freshly created mark.
    pub const ZERO: Generation = Generation(0);

    /// The generation that follows this one.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl Default for Generation {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Generation {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Counter for unique [`ManagerId`] allocation.
static MANAGER_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique per-instance identifier for a manager.
///
/// Allocated from a monotonic atomic counter via [`ManagerId::next`].
/// Handles record the id of the manager that minted them, so a handle
/// presented to a different manager is rejected rather than resolved
/// against an unrelated mark array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ManagerId(u64);

impl ManagerId {
    /// Allocate a fresh, unique manager id.
    ///
    /// Each call returns a new id that has never been returned before
    /// within this process. Thread-safe.
    pub fn next() -> Self {
        Self(MANAGER_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ManagerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
