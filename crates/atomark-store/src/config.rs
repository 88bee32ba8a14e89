//! Manager configuration parameters.

use atomark_core::MarkIndex;

use crate::error::ConfigError;

/// Configuration for a [`Manager`](crate::Manager).
///
/// Controls how the atom and mark arrays grow. Validated at construction;
/// all values are immutable after creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManagerConfig {
    /// Number of slots appended to both arrays each time `create` finds
    /// them full.
    ///
    /// Default: 10. Must be at least 1.
    pub growth_chunk: usize,

    /// Number of slots reserved when the manager is constructed.
    ///
    /// Default: 0 (the first `create` triggers the first growth step).
    pub initial_capacity: usize,

    /// Hard ceiling on the number of slots, or `None` to allow growth up
    /// to the full `u32` mark index space.
    pub max_capacity: Option<usize>,
}

impl ManagerConfig {
    /// Default growth increment, in slots.
    pub const DEFAULT_GROWTH_CHUNK: usize = 10;

    /// Create a config with the given growth chunk and defaults elsewhere.
    pub fn new(growth_chunk: usize) -> Self {
        Self {
            growth_chunk,
            initial_capacity: 0,
            max_capacity: None,
        }
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.growth_chunk == 0 {
            return Err(ConfigError::ZeroGrowthChunk);
        }
        if self.initial_capacity as u64 > MarkIndex::MAX_SLOTS {
            return Err(ConfigError::IndexSpaceOverflow {
                requested: self.initial_capacity,
            });
        }
        if let Some(max) = self.max_capacity {
            if max as u64 > MarkIndex::MAX_SLOTS {
                return Err(ConfigError::IndexSpaceOverflow { requested: max });
            }
            if self.initial_capacity > max {
                return Err(ConfigError::InitialExceedsMax {
                    initial: self.initial_capacity,
                    max,
                });
            }
        }
        Ok(())
    }

    /// Largest slot count this config permits.
    pub fn capacity_limit(&self) -> u64 {
        match self.max_capacity {
            Some(max) => (max as u64).min(MarkIndex::MAX_SLOTS),
            None => MarkIndex::MAX_SLOTS,
        }
    }
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_GROWTH_CHUNK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ManagerConfig::default();
        assert_eq!(config.growth_chunk, 10);
        assert_eq!(config.initial_capacity, 0);
        assert!(config.validate().is_ok());
        assert_eq!(config.capacity_limit(), MarkIndex::MAX_SLOTS);
    }

    #[test]
    fn zero_growth_chunk_rejected() {
        let config = ManagerConfig::new(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroGrowthChunk));
    }

    #[test]
    fn initial_above_max_rejected() {
        let config = ManagerConfig {
            growth_chunk: 4,
            initial_capacity: 16,
            max_capacity: Some(8),
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InitialExceedsMax {
                initial: 16,
                max: 8
            })
        );
    }

    #[test]
    fn max_capacity_caps_limit() {
        let config = ManagerConfig {
            max_capacity: Some(32),
            ..ManagerConfig::default()
        };
        assert_eq!(config.capacity_limit(), 32);
    }
}
