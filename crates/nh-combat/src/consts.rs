//! Game constants used by combat resolution
//!
//! These are derived from include/global.h, include/monattk.h and mhitm.c.

/// Map dimensions
pub const COLNO: usize = 80;
pub const ROWNO: usize = 21;

/// Maximum number of attacks per monster
pub const NATTK: usize = 6;

/// Maximum distance a beam (breath, spit, zapped wand) travels
pub const BOLT_LIM: i32 = 8;

/// Melee range expressed as squared distance
pub const MELEE_DIST2: i32 = 2;

/// Cap on erosion levels (oeroded/oeroded2)
pub const MAX_ERODE: u8 = 3;

/// Turns until a delayed petrification completes
pub const STONING_TURNS: u16 = 5;

/// Turns until a delayed zombification completes
pub const ZOMBIFY_TURNS: u16 = 20;

/// Turns until sliming completes
pub const SLIMING_TURNS: u16 = 10;

/// Breath weapon cooldown is `BREATH_COOLDOWN_BASE + rn2(BREATH_COOLDOWN_RANGE)`
pub const BREATH_COOLDOWN_BASE: u8 = 10;
pub const BREATH_COOLDOWN_RANGE: u32 = 20;

/// Hit points granted by an amulet of life saving when the victim's max is
/// too low to be useful
pub const LIFESAVE_MIN_HP: i32 = 10;
