//! Object class definitions (objclass.h)

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Material types
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum Material {
    Liquid = 1,
    Wax = 2,
    Veggy = 3,
    Flesh = 4,
    Paper = 5,
    Cloth = 6,
    Leather = 7,
    Wood = 8,
    Bone = 9,
    DragonHide = 10,
    #[default]
    Iron = 11,
    Metal = 12,
    Copper = 13,
    Silver = 14,
    Gold = 15,
    Platinum = 16,
    Mithril = 17,
    Plastic = 18,
    Glass = 19,
    Gemstone = 20,
    Mineral = 21,
}

impl Material {
    /// Check if this material is metallic
    pub const fn is_metallic(&self) -> bool {
        matches!(
            self,
            Material::Iron
                | Material::Metal
                | Material::Copper
                | Material::Silver
                | Material::Gold
                | Material::Platinum
                | Material::Mithril
        )
    }

    /// Check if this material rusts
    pub const fn rusts(&self) -> bool {
        matches!(self, Material::Iron)
    }

    /// Check if this material corrodes
    pub const fn corrodes(&self) -> bool {
        matches!(self, Material::Copper | Material::Iron)
    }

    /// Check if this material burns
    pub const fn burns(&self) -> bool {
        matches!(
            self,
            Material::Wood | Material::Paper | Material::Cloth | Material::Leather | Material::Wax
        )
    }

    /// Check if this material rots
    pub const fn rots(&self) -> bool {
        matches!(
            self,
            Material::Leather | Material::Wood | Material::Veggy | Material::Flesh | Material::Cloth
        )
    }
}

/// Object classes
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum ObjectClass {
    #[default]
    Random = 0,
    IllObj = 1,
    Weapon = 2,
    Armor = 3,
    Ring = 4,
    Amulet = 5,
    Tool = 6,
    Food = 7,
    Potion = 8,
    Scroll = 9,
    Spellbook = 10,
    Wand = 11,
    Coin = 12,
    Gem = 13,
    Rock = 14,
}

impl ObjectClass {
    /// Get the inventory symbol for this class
    pub const fn symbol(&self) -> char {
        match self {
            ObjectClass::Random => '?',
            ObjectClass::IllObj => ']',
            ObjectClass::Weapon => ')',
            ObjectClass::Armor => '[',
            ObjectClass::Ring => '=',
            ObjectClass::Amulet => '"',
            ObjectClass::Tool => '(',
            ObjectClass::Food => '%',
            ObjectClass::Potion => '!',
            ObjectClass::Scroll => '?',
            ObjectClass::Spellbook => '+',
            ObjectClass::Wand => '/',
            ObjectClass::Coin => '$',
            ObjectClass::Gem => '*',
            ObjectClass::Rock => '`',
        }
    }
}

/// Kinds of erosion damage (ERODE_* in C)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum ErodeKind {
    Burn,
    Rust,
    Rot,
    Corrode,
}

impl ErodeKind {
    /// Whether this kind uses the secondary erosion counter (oeroded2)
    pub const fn is_secondary(&self) -> bool {
        matches!(self, ErodeKind::Rot | ErodeKind::Corrode)
    }

    /// Verb used in "Its sword rusts!" style messages
    pub const fn verb(&self) -> &'static str {
        match self {
            ErodeKind::Burn => "burns",
            ErodeKind::Rust => "rusts",
            ErodeKind::Rot => "rots",
            ErodeKind::Corrode => "corrodes",
        }
    }

    pub const fn affects(&self, material: Material) -> bool {
        match self {
            ErodeKind::Burn => material.burns(),
            ErodeKind::Rust => material.rusts(),
            ErodeKind::Rot => material.rots(),
            ErodeKind::Corrode => material.corrodes(),
        }
    }
}

/// Worn slot masks (W_* from prop.h)
pub mod worn_mask {
    pub const W_ARM: u32 = 0x0000_0001;
    pub const W_ARMC: u32 = 0x0000_0002;
    pub const W_ARMH: u32 = 0x0000_0004;
    pub const W_ARMS: u32 = 0x0000_0008;
    pub const W_ARMG: u32 = 0x0000_0010;
    pub const W_ARMF: u32 = 0x0000_0020;
    pub const W_ARMU: u32 = 0x0000_0040;
    pub const W_ARMOR: u32 = W_ARM | W_ARMC | W_ARMH | W_ARMS | W_ARMG | W_ARMF | W_ARMU;

    pub const W_WEP: u32 = 0x0000_0100;
    pub const W_AMUL: u32 = 0x0001_0000;
    pub const W_RINGL: u32 = 0x0002_0000;
    pub const W_RINGR: u32 = 0x0004_0000;
    pub const W_RING: u32 = W_RINGL | W_RINGR;
    pub const W_ACCESSORY: u32 = W_AMUL | W_RING;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_erosion_vulnerability() {
        assert!(ErodeKind::Rust.affects(Material::Iron));
        assert!(!ErodeKind::Rust.affects(Material::Silver));
        assert!(ErodeKind::Corrode.affects(Material::Copper));
        assert!(ErodeKind::Burn.affects(Material::Paper));
        assert!(ErodeKind::Rot.affects(Material::Leather));
        assert!(!ErodeKind::Burn.affects(Material::Mithril));
    }

    #[test]
    fn test_armor_mask_covers_slots() {
        use worn_mask::*;
        for slot in [W_ARM, W_ARMC, W_ARMH, W_ARMS, W_ARMG, W_ARMF, W_ARMU] {
            assert_eq!(W_ARMOR & slot, slot);
        }
        assert_eq!(W_ARMOR & W_WEP, 0);
    }
}
