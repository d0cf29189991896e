//! Attack types from monattk.h
//!
//! These define HOW an attack is delivered.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Attack type - how the attack is delivered (AT_* from monattk.h)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum AttackType {
    /// Passive attack, or an empty slot (AT_NONE)
    #[default]
    None = 0,

    /// Claw attack (AT_CLAW)
    Claw = 1,

    /// Bite attack (AT_BITE)
    Bite = 2,

    /// Kick attack (AT_KICK)
    Kick = 3,

    /// Head butt attack (AT_BUTT)
    Butt = 4,

    /// Touch attack (AT_TUCH)
    Touch = 5,

    /// Sting attack (AT_STNG)
    Sting = 6,

    /// Crushing hug (AT_HUGS)
    Hug = 7,

    // 8-9 unused
    /// Spit attack (AT_SPIT)
    Spit = 10,

    /// Engulf attack (AT_ENGL)
    Engulf = 11,

    /// Breath weapon (AT_BREA)
    Breath = 12,

    /// Explode on contact (AT_EXPL)
    Explode = 13,

    /// Explode when killed (AT_BOOM)
    ExplodeOnDeath = 14,

    /// Gaze attack (AT_GAZE)
    Gaze = 15,

    /// Tentacle attack (AT_TENT)
    Tentacle = 16,

    // 17-253 unused
    /// Weapon attack (AT_WEAP)
    Weapon = 254,

    /// Magic spell attack (AT_MAGC)
    Magic = 255,
}

impl AttackType {
    /// Attacks that only fire from beyond melee range
    pub const fn is_ranged(&self) -> bool {
        matches!(self, AttackType::Spit | AttackType::Breath)
    }

    /// Attacks resolved by a to-hit roll against an adjacent defender
    pub const fn is_melee(&self) -> bool {
        matches!(
            self,
            AttackType::Claw
                | AttackType::Bite
                | AttackType::Kick
                | AttackType::Butt
                | AttackType::Touch
                | AttackType::Sting
                | AttackType::Hug
                | AttackType::Tentacle
                | AttackType::Weapon
        )
    }

    /// Verb for "The jackal bites the newt." style messages
    ///
    /// Tentacles belong to the attacker: "The mind flayer's tentacles suck".
    pub const fn verb(&self) -> &'static str {
        match self {
            AttackType::Bite => "bites",
            AttackType::Sting => "stings",
            AttackType::Butt => "butts",
            AttackType::Touch => "touches",
            AttackType::Tentacle => "tentacles suck",
            AttackType::Hug => "squeezes",
            _ => "hits",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_ranged_and_melee_disjoint() {
        for at in AttackType::iter() {
            assert!(!(at.is_ranged() && at.is_melee()), "{at} is both");
        }
    }

    #[test]
    fn test_verbs() {
        assert_eq!(AttackType::Bite.verb(), "bites");
        assert_eq!(AttackType::Kick.verb(), "hits");
        assert_eq!(AttackType::Weapon.verb(), "hits");
    }

    #[test]
    fn test_hug_is_melee() {
        assert!(AttackType::Hug.is_melee());
        assert!(!AttackType::Gaze.is_melee());
        assert!(!AttackType::Engulf.is_melee());
    }
}
