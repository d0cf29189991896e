//! nh-combat: Monster-vs-monster combat for a NetHack clone
//!
//! This crate resolves fights between monsters (and the hero standing in
//! as a combatant): the per-slot attack sequence, damage-type effects,
//! passive retaliation, gaze/engulf/explode handling, and the item
//! targeting that monsters use to decide what to zap or throw.
//!
//! It performs no I/O. Messages and map updates go through a
//! [`combat::CombatObserver`] supplied by the caller.

pub mod combat;
pub mod config;
pub mod dungeon;
pub mod error;
pub mod monster;
pub mod muse;
pub mod object;

mod consts;
mod rng;

pub use config::CombatConfig;
pub use consts::*;
pub use error::{CombatError, ConfigError};
pub use rng::{GameRng, RollMode};
