//! Dungeon map support for combat

mod level;

pub use level::{DIRECTIONS, Level, Pos};
