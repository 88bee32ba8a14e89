//! Store-specific error types.

use std::error::Error;
use std::fmt;

use atomark_core::{Generation, ManagerId, MarkIndex};

/// Errors that can occur during manager operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreError {
    /// The handle's generation no longer matches its mark: the entity it
    /// referred to has been reclaimed by a refresh pass.
    StaleHandle {
        /// The mark the handle points at.
        mark: MarkIndex,
        /// The generation captured by the handle.
        handle_generation: Generation,
        /// The mark's current generation.
        current_generation: Generation,
    },
    /// The handle was minted by a different manager.
    ForeignHandle {
        /// The manager that was asked to resolve the handle.
        expected: ManagerId,
        /// The manager recorded in the handle.
        found: ManagerId,
    },
    /// The handle's mark index is outside the manager's capacity.
    UnknownMark {
        /// The out-of-range mark.
        mark: MarkIndex,
        /// Current slot capacity.
        capacity: usize,
    },
    /// Growing the slot arrays would exceed the configured ceiling or the
    /// addressable index space.
    CapacityExceeded {
        /// Capacity the growth step asked for.
        requested: u64,
        /// Largest capacity permitted.
        max: u64,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StaleHandle {
                mark,
                handle_generation,
                current_generation,
            } => {
                write!(
                    f,
                    "stale handle: mark {mark} at generation {handle_generation}, current {current_generation}"
                )
            }
            Self::ForeignHandle { expected, found } => {
                write!(
                    f,
                    "handle belongs to manager {found}, not manager {expected}"
                )
            }
            Self::UnknownMark { mark, capacity } => {
                write!(f, "mark {mark} out of range for capacity {capacity}")
            }
            Self::CapacityExceeded { requested, max } => {
                write!(
                    f,
                    "slot capacity exceeded: requested {requested} slots, max {max}"
                )
            }
        }
    }
}

impl Error for StoreError {}

/// Errors detected by [`ManagerConfig::validate()`](crate::ManagerConfig::validate).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `growth_chunk` is zero, so the manager could never grow.
    ZeroGrowthChunk,
    /// `initial_capacity` is larger than `max_capacity`.
    InitialExceedsMax {
        /// The configured initial capacity.
        initial: usize,
        /// The configured ceiling.
        max: usize,
    },
    /// A configured capacity does not fit the `u32` mark index space.
    IndexSpaceOverflow {
        /// The offending capacity.
        requested: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroGrowthChunk => write!(f, "growth_chunk must be at least 1"),
            Self::InitialExceedsMax { initial, max } => {
                write!(
                    f,
                    "initial_capacity {initial} exceeds max_capacity {max}"
                )
            }
            Self::IndexSpaceOverflow { requested } => {
                write!(
                    f,
                    "capacity {requested} exceeds the addressable slot count"
                )
            }
        }
    }
}

impl Error for ConfigError {}
