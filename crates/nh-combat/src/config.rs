//! Combat tunables
//!
//! Defaults reproduce the classic rules. A game may load overrides from a
//! JSON file; every field is optional there.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::BOLT_LIM;

/// Weights used when a monster scores where to aim an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetWeights {
    /// Per enemy caught in the effect
    pub enemy: i32,
    /// Per ally caught in the effect (negative)
    pub ally: i32,
    /// The user caught in a harmful effect
    pub self_harm: i32,
    /// The user caught in a beneficial effect
    pub self_help: i32,
}

impl Default for TargetWeights {
    fn default() -> Self {
        Self {
            enemy: 20,
            ally: -30,
            self_harm: -1000,
            self_help: 1000,
        }
    }
}

/// Combat configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Beam reach for breath, spit and zapped items
    pub bolt_range: i32,
    /// How many times a petrifying gaze may be reflected
    pub gaze_bounce_limit: u8,
    /// Second passive tier fires when `rn2(odds) != 0`
    pub passive_second_tier_odds: u32,
    /// To-hit bonus against a helpless defender
    pub helpless_to_hit_bonus: i32,
    pub targeting: TargetWeights,
    /// Emit "You hear..." messages for fights out of sight
    pub verbose_noises: bool,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            bolt_range: BOLT_LIM,
            gaze_bounce_limit: 2,
            passive_second_tier_odds: 3,
            helpless_to_hit_bonus: 4,
            targeting: TargetWeights::default(),
            verbose_noises: true,
        }
    }
}

impl CombatConfig {
    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_json(&contents)
    }

    /// Parse configuration from JSON; missing fields keep their defaults
    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bolt_range <= 0 {
            return Err(ConfigError::Invalid {
                field: "bolt_range",
                reason: format!("must be positive, got {}", self.bolt_range),
            });
        }
        if self.passive_second_tier_odds == 0 {
            return Err(ConfigError::Invalid {
                field: "passive_second_tier_odds",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
