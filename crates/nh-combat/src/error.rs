//! Error types for combat resolution and configuration
//!
//! `CombatError` values describe broken internal invariants. They are
//! never returned across the attack pipeline: the pipeline records them
//! through `CombatCtx::impossible` and degrades to a harmless outcome.

use thiserror::Error;

use crate::combat::DamageType;
use crate::monster::MonsterId;

/// Internal invariant violations seen while resolving an attack
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CombatError {
    #[error("mdamagem: unknown damage type {0}")]
    UnknownDamageType(DamageType),

    #[error("attack involving already dead monster #{0}")]
    DeadCombatant(MonsterId),

    #[error("no monster #{0} on this level")]
    MissingCombatant(MonsterId),

    #[error("monster #{0} cannot fight itself")]
    SameCombatant(MonsterId),

    #[error("position ({x},{y}) already occupied")]
    PositionOccupied { x: i8, y: i8 },
}

/// Errors from loading a `CombatConfig`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Io(String),

    #[error("malformed config: {0}")]
    Parse(String),

    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}
