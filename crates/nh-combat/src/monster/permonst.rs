//! Monster templates (permonst.h)

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::combat::{AttackSet, AttackType, DamageType};

/// Monster size
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
#[repr(u8)]
pub enum MonsterSize {
    Tiny = 0,
    Small = 1,
    #[default]
    Medium = 2,
    Large = 3,
    Huge = 4,
    Gigantic = 7,
}

bitflags! {
    /// Monster flags (subset of M1_*, M2_*, M3_* from monst.h)
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct MonsterFlags: u64 {
        // M1 flags (movement and basic properties)
        const FLY = 0x00000001;
        const AMORPHOUS = 0x00000004;
        const NOEYES = 0x00001000;
        const NOHANDS = 0x00002000;
        const NOLIMBS = 0x00006000;
        const NOHEAD = 0x00008000;
        const MINDLESS = 0x00010000;
        const HUMANOID = 0x00020000;
        const ANIMAL = 0x00040000;
        const SLITHY = 0x00080000;
        const UNSOLID = 0x00100000;
        const THICK_HIDE = 0x00200000;
        const ACID = 0x08000000;
        const POIS = 0x10000000;
        const CARNIVORE = 0x20000000;

        // M2 flags (behavior and special properties) - shifted
        const UNDEAD = 0x0000000200000000;
        const HUMAN = 0x0000000800000000;
        const ELF = 0x0000001000000000;
        const ORC = 0x0000008000000000;
        const DEMON = 0x0000010000000000;
        const MALE = 0x0000800000000000;
        const FEMALE = 0x0001000000000000;
        const NEUTER = 0x0002000000000000;
        const HOSTILE = 0x0008000000000000;
        const DOMESTIC = 0x0020000000000000;
        const STRONG = 0x0200000000000000;

        // Generation flags folded in
        const NOCORPSE = 0x8000000000000000;
    }
}

bitflags! {
    /// Monster resistances (MR_* from monflag.h)
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct MonsterResistances: u16 {
        const FIRE = 0x0001;
        const COLD = 0x0002;
        const SLEEP = 0x0004;
        const DISINT = 0x0008;
        const ELEC = 0x0010;
        const POISON = 0x0020;
        const ACID = 0x0040;
        const STONE = 0x0080;
        const MAGIC = 0x0100;
    }
}

// Manual serde for MonsterResistances (intrinsics gained in play are saved)
impl Serialize for MonsterResistances {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for MonsterResistances {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u16::deserialize(deserializer)?;
        Ok(MonsterResistances::from_bits_truncate(bits))
    }
}

/// Monster template (static data for each monster type)
#[derive(Debug, Clone)]
pub struct PerMonst {
    /// Monster name
    pub name: &'static str,

    /// Base level (difficulty)
    pub level: i8,

    /// Base armor class
    pub armor_class: i8,

    /// Magic resistance (0-100)
    pub magic_resistance: u8,

    /// Attacks (up to 6)
    pub attacks: AttackSet,

    /// Physical size
    pub size: MonsterSize,

    /// Resistances
    pub resistances: MonsterResistances,

    /// Monster flags
    pub flags: MonsterFlags,
}

impl PerMonst {
    pub const fn has_flag(&self, flag: MonsterFlags) -> bool {
        self.flags.contains(flag)
    }

    pub const fn resists(&self, res: MonsterResistances) -> bool {
        self.resistances.contains(res)
    }

    /// Check if monster is undead
    pub const fn is_undead(&self) -> bool {
        self.flags.contains(MonsterFlags::UNDEAD)
    }

    /// Check if monster is a demon
    pub const fn is_demon(&self) -> bool {
        self.flags.contains(MonsterFlags::DEMON)
    }

    /// Check if monster has no eyes (can't be blinded)
    pub const fn has_no_eyes(&self) -> bool {
        self.flags.contains(MonsterFlags::NOEYES)
    }

    /// Check if monster has no hands
    pub const fn has_no_hands(&self) -> bool {
        self.flags.contains(MonsterFlags::NOHANDS)
    }

    /// Check if monster has no head
    pub const fn has_no_head(&self) -> bool {
        self.flags.contains(MonsterFlags::NOHEAD)
    }

    /// Check if monster is mindless
    pub const fn is_mindless(&self) -> bool {
        self.flags.contains(MonsterFlags::MINDLESS)
    }

    /// Check if monster is insubstantial (unsolid)
    pub const fn is_unsolid(&self) -> bool {
        self.flags.contains(MonsterFlags::UNSOLID)
    }

    /// Check if monster has thick hide (kicks bounce off)
    pub const fn is_thick_skinned(&self) -> bool {
        self.flags.contains(MonsterFlags::THICK_HIDE)
    }

    /// Check if monster is strong (gets damage bonus)
    pub const fn is_strong(&self) -> bool {
        self.flags.contains(MonsterFlags::STRONG)
    }

    /// Huge or bigger creatures cannot be swallowed
    pub fn is_huge(&self) -> bool {
        self.size >= MonsterSize::Huge
    }

    pub fn is_big(&self) -> bool {
        self.size >= MonsterSize::Large
    }

    /// First attack slot of the given type (attacktype_fordmg with AD_ANY)
    pub fn attack_of_type(&self, at: AttackType) -> Option<&crate::combat::Attack> {
        self.attacks.iter().find(|a| a.attack_type == at)
    }

    /// Whether any slot, passive included, deals this damage type (dmgtype in C)
    pub fn has_damage_type(&self, ad: DamageType) -> bool {
        self.attacks
            .iter()
            .any(|a| a.damage_type == ad && *a != crate::combat::Attack::NONE)
    }

    /// Possessive pronoun for messages
    pub const fn possessive(&self) -> &'static str {
        if self.flags.contains(MonsterFlags::MALE) {
            "his"
        } else if self.flags.contains(MonsterFlags::FEMALE) {
            "her"
        } else {
            "its"
        }
    }
}
