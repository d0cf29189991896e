//! Damage types from monattk.h
//!
//! These define WHAT kind of damage is dealt.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::monster::MonsterResistances;

/// Damage type - what kind of damage is dealt (AD_* from monattk.h)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum DamageType {
    /// Physical damage (AD_PHYS)
    #[default]
    Physical = 0,

    /// Magic missile (AD_MAGM)
    MagicMissile = 1,

    /// Fire damage (AD_FIRE)
    Fire = 2,

    /// Cold damage (AD_COLD)
    Cold = 3,

    /// Sleep (AD_SLEE)
    Sleep = 4,

    /// Disintegration (AD_DISN)
    Disintegrate = 5,

    /// Electric shock (AD_ELEC)
    Electric = 6,

    /// Drain strength (AD_DRST)
    DrainStrength = 7,

    /// Acid damage (AD_ACID)
    Acid = 8,

    // 9-10 unused (special attack letter)

    /// Blindness (AD_BLND)
    Blind = 11,

    /// Stun (AD_STUN)
    Stun = 12,

    /// Slow (AD_SLOW)
    Slow = 13,

    /// Paralysis (AD_PLYS)
    Paralyze = 14,

    /// Drain life/experience levels (AD_DRLI)
    DrainLife = 15,

    /// Drain magic energy (AD_DREN)
    DrainEnergy = 16,

    /// Leg wound (AD_LEGS)
    Legs = 17,

    /// Petrification (AD_STON)
    Stone = 18,

    /// Sticking (AD_STCK)
    Stick = 19,

    /// Steal gold (AD_SGLD)
    StealGold = 20,

    /// Steal item (AD_SITM)
    StealItem = 21,

    /// Seduce and steal (AD_SEDU)
    Seduce = 22,

    /// Teleport (AD_TLPT)
    Teleport = 23,

    /// Rust (AD_RUST)
    Rust = 24,

    /// Confusion (AD_CONF)
    Confuse = 25,

    /// Digestion (AD_DGST)
    Digest = 26,

    /// Healing (AD_HEAL)
    Heal = 27,

    /// Wrap/constrict (AD_WRAP)
    Wrap = 28,

    /// Lycanthropy (AD_WERE)
    Lycanthropy = 29,

    /// Drain dexterity (AD_DRDX)
    DrainDexterity = 30,

    /// Drain constitution (AD_DRCO)
    DrainConstitution = 31,

    /// Drain intelligence (AD_DRIN)
    DrainIntelligence = 32,

    /// Disease (AD_DISE)
    Disease = 33,

    /// Decay (AD_DCAY)
    Decay = 34,

    /// Seduction (special) (AD_SSEX)
    SeduceSpecial = 35,

    /// Hallucination (AD_HALU)
    Hallucinate = 36,

    /// Death touch (AD_DETH)
    Death = 37,

    /// Pestilence (AD_PEST)
    Pestilence = 38,

    /// Famine (AD_FAMN)
    Famine = 39,

    /// Slime (AD_SLIM)
    Slime = 40,

    /// Disenchant (AD_ENCH)
    Disenchant = 41,

    /// Corrosion (AD_CORR)
    Corrode = 42,

    /// Zombification (AD_ZOMB)
    Zombify = 43,

    // Spell types (240+)
    /// Clerical spells (AD_CLRC)
    ClericSpell = 240,

    /// Mage spells (AD_SPEL)
    MageSpell = 241,

    /// Random breath weapon (AD_RBRE)
    RandomBreath = 242,

    // 243-251 unused

    /// Steal amulet of yendor (AD_SAMU)
    StealAmulet = 252,

    /// Curse items (AD_CURS)
    Curse = 253,
}

impl DamageType {
    /// Intrinsic that fully blocks this damage type, if any
    pub const fn resistance(&self) -> Option<MonsterResistances> {
        match self {
            DamageType::Fire => Some(MonsterResistances::FIRE),
            DamageType::Cold => Some(MonsterResistances::COLD),
            DamageType::Electric => Some(MonsterResistances::ELEC),
            DamageType::Sleep => Some(MonsterResistances::SLEEP),
            DamageType::Disintegrate => Some(MonsterResistances::DISINT),
            DamageType::Acid => Some(MonsterResistances::ACID),
            DamageType::Stone => Some(MonsterResistances::STONE),
            DamageType::MagicMissile => Some(MonsterResistances::MAGIC),
            DamageType::DrainStrength
            | DamageType::DrainDexterity
            | DamageType::DrainConstitution
            | DamageType::Disease => Some(MonsterResistances::POISON),
            _ => None,
        }
    }

    /// What a monster breathes out ("The red dragon breathes fire!"),
    /// or `None` for types no breath weapon carries
    pub const fn breath_name(&self) -> Option<&'static str> {
        Some(match self {
            DamageType::MagicMissile => "fragments",
            DamageType::Fire => "fire",
            DamageType::Cold => "frost",
            DamageType::Sleep => "sleep gas",
            DamageType::Disintegrate => "a disintegration blast",
            DamageType::Electric => "lightning",
            DamageType::DrainStrength => "poison gas",
            DamageType::Acid => "acid",
            _ => return None,
        })
    }

    /// The beam a breath becomes ("The blast of frost hits the newt.")
    pub const fn blast_name(&self) -> Option<&'static str> {
        Some(match self {
            DamageType::MagicMissile => "blast of missiles",
            DamageType::Fire => "blast of fire",
            DamageType::Cold => "blast of frost",
            DamageType::Sleep => "blast of sleep gas",
            DamageType::Disintegrate => "blast of disintegration",
            DamageType::Electric => "blast of lightning",
            DamageType::DrainStrength => "blast of poison gas",
            DamageType::Acid => "blast of acid",
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elemental_resistances() {
        assert_eq!(DamageType::Fire.resistance(), Some(MonsterResistances::FIRE));
        assert_eq!(DamageType::DrainStrength.resistance(), Some(MonsterResistances::POISON));
        assert_eq!(DamageType::Physical.resistance(), None);
    }

    #[test]
    fn test_breath_names() {
        assert_eq!(DamageType::Cold.breath_name(), Some("frost"));
        assert_eq!(DamageType::MagicMissile.blast_name(), Some("blast of missiles"));
        assert_eq!(DamageType::Physical.breath_name(), None);
    }
}
