//! Monster system
//!
//! Species data, monster instances and the death pipeline.

mod data;
pub mod lifecycle;
mod monst;
mod permonst;

pub use data::PmId;
pub use lifecycle::{DeathCause, DeathOutcome};
pub use monst::{Monster, MonsterId, MonsterState, Status, StatusTimers, hit_points_for_level};
pub use permonst::{MonsterFlags, MonsterResistances, MonsterSize, PerMonst};
