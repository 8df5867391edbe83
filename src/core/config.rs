//! Rules configuration.
//!
//! Tunable constants for effect timing and reach. The defaults are the
//! standard rules: fire burns for two full rounds, ice holds for one, and
//! both cover the 3×3 block around the target cell.

use serde::{Deserialize, Serialize};

use super::error::GameError;

/// Widest reach fire and ice may be configured with.
pub const MAX_EFFECT_RADIUS: usize = 8;

/// Rules configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Full rounds a burning tile stays impassable.
    pub fire_rounds: u64,

    /// Full rounds a frozen tile blocks insertion into its lines.
    pub freeze_rounds: u64,

    /// Reach of fire and ice around the target (1 = 3×3 block).
    pub effect_radius: usize,

    /// Seed for the default random source.
    pub seed: u64,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            fire_rounds: 2,
            freeze_rounds: 1,
            effect_radius: 1,
            seed: 42,
        }
    }
}

impl RulesConfig {
    /// Use a custom fire duration.
    #[must_use]
    pub fn with_fire_rounds(mut self, rounds: u64) -> Self {
        self.fire_rounds = rounds;
        self
    }

    /// Use a custom freeze duration.
    #[must_use]
    pub fn with_freeze_rounds(mut self, rounds: u64) -> Self {
        self.freeze_rounds = rounds;
        self
    }

    /// Use a custom effect radius.
    #[must_use]
    pub fn with_effect_radius(mut self, radius: usize) -> Self {
        self.effect_radius = radius;
        self
    }

    /// Use a custom seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check the values a game can actually be played with.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.effect_radius > MAX_EFFECT_RADIUS {
            return Err(GameError::InvalidConfig(format!(
                "effect radius {} exceeds {MAX_EFFECT_RADIUS}",
                self.effect_radius
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RulesConfig::default();
        assert_eq!(config.fire_rounds, 2);
        assert_eq!(config.freeze_rounds, 1);
        assert_eq!(config.effect_radius, 1);
    }

    #[test]
    fn test_builder_pattern() {
        let config = RulesConfig::default()
            .with_fire_rounds(3)
            .with_freeze_rounds(2)
            .with_effect_radius(0)
            .with_seed(123);

        assert_eq!(config.fire_rounds, 3);
        assert_eq!(config.freeze_rounds, 2);
        assert_eq!(config.effect_radius, 0);
        assert_eq!(config.seed, 123);
    }

    #[test]
    fn test_validate() {
        assert_eq!(RulesConfig::default().validate(), Ok(()));
        assert!(RulesConfig::default().with_effect_radius(0).validate().is_ok());
        assert!(RulesConfig::default()
            .with_effect_radius(MAX_EFFECT_RADIUS)
            .validate()
            .is_ok());

        let err = RulesConfig::default()
            .with_effect_radius(usize::MAX)
            .validate()
            .unwrap_err();
        assert!(matches!(err, GameError::InvalidConfig(_)));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_serialization() {
        let config = RulesConfig::default().with_seed(9);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: RulesConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
