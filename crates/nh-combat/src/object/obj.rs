//! Object instances and the object type table (obj.h, objects.c)

use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::objclass::{ErodeKind, Material, ObjectClass, worn_mask::*};
use crate::monster::PmId;
use crate::MAX_ERODE;

/// Unique object identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

impl ObjectId {
    pub const NONE: ObjectId = ObjectId(0);
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Blessed/Uncursed/Cursed status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BucStatus {
    Blessed,
    #[default]
    Uncursed,
    Cursed,
}

bitflags! {
    /// Intrinsic powers conferred by wearing or carrying an object
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct ObjPowers: u16 {
        const REFLECTION = 0x0001;
        const LIFE_SAVING = 0x0002;
        const FREE_ACTION = 0x0004;
        const PROTECTION = 0x0008;
        const FIRE_RES = 0x0010;
        const COLD_RES = 0x0020;
        const SHOCK_RES = 0x0040;
        const SLOW_DIGESTION = 0x0080;
    }
}

/// Static description of an object type (struct objclass)
#[derive(Debug, Clone, Copy)]
pub struct ObjDef {
    pub name: &'static str,
    pub class: ObjectClass,
    pub material: Material,
    /// Damage die against small monsters (weapons only)
    pub damage: u8,
    pub hit_bonus: i8,
    /// Worn slot this armor occupies, 0 if not armor
    pub slot: u32,
    pub base_ac: i8,
    /// Magic cancellation granted when worn
    pub mc: i8,
    pub powers: ObjPowers,
}

const fn weapon(name: &'static str, material: Material, damage: u8, hit_bonus: i8) -> ObjDef {
    ObjDef {
        name,
        class: ObjectClass::Weapon,
        material,
        damage,
        hit_bonus,
        slot: 0,
        base_ac: 0,
        mc: 0,
        powers: ObjPowers::empty(),
    }
}

const fn armor(
    name: &'static str,
    material: Material,
    slot: u32,
    base_ac: i8,
    mc: i8,
    powers: ObjPowers,
) -> ObjDef {
    ObjDef {
        name,
        class: ObjectClass::Armor,
        material,
        damage: 0,
        hit_bonus: 0,
        slot,
        base_ac,
        mc,
        powers,
    }
}

const fn item(name: &'static str, class: ObjectClass, material: Material, powers: ObjPowers) -> ObjDef {
    ObjDef {
        name,
        class,
        material,
        damage: 0,
        hit_bonus: 0,
        slot: 0,
        base_ac: 0,
        mc: 0,
        powers,
    }
}

/// Object types known to combat
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum ObjectType {
    // Weapons
    #[default]
    Dagger,
    ElvenDagger,
    OrcishDagger,
    LongSword,
    SilverSaber,
    Mace,
    Club,
    // Armor
    PlateMail,
    LeatherArmor,
    CloakOfProtection,
    LeatherCloak,
    Helmet,
    LeatherGloves,
    Gauntlets,
    LowBoots,
    IronShoes,
    SmallShield,
    ShieldOfReflection,
    // Accessories
    AmuletOfLifeSaving,
    AmuletOfReflection,
    RingOfFreeAction,
    RingOfFireResistance,
    RingOfSlowDigestion,
    // Wands
    WandOfStriking,
    WandOfMagicMissile,
    WandOfFire,
    WandOfCold,
    WandOfSleep,
    WandOfLightning,
    // Scrolls and books
    ScrollOfFire,
    ScrollOfIdentify,
    SpellbookOfForceBolt,
    // Potions
    PotionOfParalysis,
    PotionOfSleeping,
    PotionOfBlindness,
    PotionOfAcid,
    PotionOfHealing,
    // Remains
    GoldPiece,
    Corpse,
    Statue,
}

static DAGGER: ObjDef = weapon("dagger", Material::Iron, 4, 2);
static ELVEN_DAGGER: ObjDef = weapon("elven dagger", Material::Wood, 5, 2);
static ORCISH_DAGGER: ObjDef = weapon("orcish dagger", Material::Iron, 3, 2);
static LONG_SWORD: ObjDef = weapon("long sword", Material::Iron, 8, 0);
static SILVER_SABER: ObjDef = weapon("silver saber", Material::Silver, 8, 0);
static MACE: ObjDef = weapon("mace", Material::Iron, 7, 0);
static CLUB: ObjDef = weapon("club", Material::Wood, 6, 0);

static PLATE_MAIL: ObjDef = armor("plate mail", Material::Iron, W_ARM, 7, 2, ObjPowers::empty());
static LEATHER_ARMOR: ObjDef =
    armor("leather armor", Material::Leather, W_ARM, 2, 1, ObjPowers::empty());
static CLOAK_OF_PROTECTION: ObjDef = armor(
    "cloak of protection",
    Material::Cloth,
    W_ARMC,
    3,
    3,
    ObjPowers::PROTECTION,
);
static LEATHER_CLOAK: ObjDef =
    armor("leather cloak", Material::Leather, W_ARMC, 1, 1, ObjPowers::empty());
static HELMET: ObjDef = armor("helmet", Material::Iron, W_ARMH, 1, 0, ObjPowers::empty());
static LEATHER_GLOVES: ObjDef =
    armor("leather gloves", Material::Leather, W_ARMG, 1, 0, ObjPowers::empty());
static GAUNTLETS: ObjDef = armor("gauntlets", Material::Iron, W_ARMG, 1, 0, ObjPowers::empty());
static LOW_BOOTS: ObjDef = armor("low boots", Material::Leather, W_ARMF, 1, 0, ObjPowers::empty());
static IRON_SHOES: ObjDef = armor("iron shoes", Material::Iron, W_ARMF, 2, 0, ObjPowers::empty());
static SMALL_SHIELD: ObjDef = armor("small shield", Material::Wood, W_ARMS, 1, 0, ObjPowers::empty());
static SHIELD_OF_REFLECTION: ObjDef = armor(
    "shield of reflection",
    Material::Silver,
    W_ARMS,
    2,
    0,
    ObjPowers::REFLECTION,
);

static AMULET_OF_LIFE_SAVING: ObjDef = item(
    "amulet of life saving",
    ObjectClass::Amulet,
    Material::Iron,
    ObjPowers::LIFE_SAVING,
);
static AMULET_OF_REFLECTION: ObjDef = item(
    "amulet of reflection",
    ObjectClass::Amulet,
    Material::Iron,
    ObjPowers::REFLECTION,
);
static RING_OF_FREE_ACTION: ObjDef = item(
    "ring of free action",
    ObjectClass::Ring,
    Material::Iron,
    ObjPowers::FREE_ACTION,
);
static RING_OF_FIRE_RESISTANCE: ObjDef = item(
    "ring of fire resistance",
    ObjectClass::Ring,
    Material::Iron,
    ObjPowers::FIRE_RES,
);

static RING_OF_SLOW_DIGESTION: ObjDef = item(
    "ring of slow digestion",
    ObjectClass::Ring,
    Material::Iron,
    ObjPowers::SLOW_DIGESTION,
);

static WAND_OF_STRIKING: ObjDef =
    item("wand of striking", ObjectClass::Wand, Material::Wood, ObjPowers::empty());
static WAND_OF_MAGIC_MISSILE: ObjDef =
    item("wand of magic missile", ObjectClass::Wand, Material::Wood, ObjPowers::empty());
static WAND_OF_FIRE: ObjDef =
    item("wand of fire", ObjectClass::Wand, Material::Wood, ObjPowers::empty());
static WAND_OF_COLD: ObjDef =
    item("wand of cold", ObjectClass::Wand, Material::Wood, ObjPowers::empty());
static WAND_OF_SLEEP: ObjDef =
    item("wand of sleep", ObjectClass::Wand, Material::Wood, ObjPowers::empty());
static WAND_OF_LIGHTNING: ObjDef =
    item("wand of lightning", ObjectClass::Wand, Material::Wood, ObjPowers::empty());

static SCROLL_OF_FIRE: ObjDef =
    item("scroll of fire", ObjectClass::Scroll, Material::Paper, ObjPowers::empty());
static SCROLL_OF_IDENTIFY: ObjDef =
    item("scroll of identify", ObjectClass::Scroll, Material::Paper, ObjPowers::empty());
static SPELLBOOK_OF_FORCE_BOLT: ObjDef = item(
    "spellbook of force bolt",
    ObjectClass::Spellbook,
    Material::Paper,
    ObjPowers::empty(),
);

static POTION_OF_PARALYSIS: ObjDef =
    item("potion of paralysis", ObjectClass::Potion, Material::Glass, ObjPowers::empty());
static POTION_OF_SLEEPING: ObjDef =
    item("potion of sleeping", ObjectClass::Potion, Material::Glass, ObjPowers::empty());
static POTION_OF_BLINDNESS: ObjDef =
    item("potion of blindness", ObjectClass::Potion, Material::Glass, ObjPowers::empty());
static POTION_OF_ACID: ObjDef =
    item("potion of acid", ObjectClass::Potion, Material::Glass, ObjPowers::empty());
static POTION_OF_HEALING: ObjDef =
    item("potion of healing", ObjectClass::Potion, Material::Glass, ObjPowers::empty());

static GOLD_PIECE: ObjDef =
    item("gold piece", ObjectClass::Coin, Material::Gold, ObjPowers::empty());
static CORPSE: ObjDef = item("corpse", ObjectClass::Food, Material::Flesh, ObjPowers::empty());
static STATUE: ObjDef = item("statue", ObjectClass::Rock, Material::Mineral, ObjPowers::empty());

impl ObjectType {
    /// Static data for this object type
    pub fn def(self) -> &'static ObjDef {
        match self {
            ObjectType::Dagger => &DAGGER,
            ObjectType::ElvenDagger => &ELVEN_DAGGER,
            ObjectType::OrcishDagger => &ORCISH_DAGGER,
            ObjectType::LongSword => &LONG_SWORD,
            ObjectType::SilverSaber => &SILVER_SABER,
            ObjectType::Mace => &MACE,
            ObjectType::Club => &CLUB,
            ObjectType::PlateMail => &PLATE_MAIL,
            ObjectType::LeatherArmor => &LEATHER_ARMOR,
            ObjectType::CloakOfProtection => &CLOAK_OF_PROTECTION,
            ObjectType::LeatherCloak => &LEATHER_CLOAK,
            ObjectType::Helmet => &HELMET,
            ObjectType::LeatherGloves => &LEATHER_GLOVES,
            ObjectType::Gauntlets => &GAUNTLETS,
            ObjectType::LowBoots => &LOW_BOOTS,
            ObjectType::IronShoes => &IRON_SHOES,
            ObjectType::SmallShield => &SMALL_SHIELD,
            ObjectType::ShieldOfReflection => &SHIELD_OF_REFLECTION,
            ObjectType::AmuletOfLifeSaving => &AMULET_OF_LIFE_SAVING,
            ObjectType::AmuletOfReflection => &AMULET_OF_REFLECTION,
            ObjectType::RingOfFreeAction => &RING_OF_FREE_ACTION,
            ObjectType::RingOfFireResistance => &RING_OF_FIRE_RESISTANCE,
            ObjectType::RingOfSlowDigestion => &RING_OF_SLOW_DIGESTION,
            ObjectType::WandOfStriking => &WAND_OF_STRIKING,
            ObjectType::WandOfMagicMissile => &WAND_OF_MAGIC_MISSILE,
            ObjectType::WandOfFire => &WAND_OF_FIRE,
            ObjectType::WandOfCold => &WAND_OF_COLD,
            ObjectType::WandOfSleep => &WAND_OF_SLEEP,
            ObjectType::WandOfLightning => &WAND_OF_LIGHTNING,
            ObjectType::ScrollOfFire => &SCROLL_OF_FIRE,
            ObjectType::ScrollOfIdentify => &SCROLL_OF_IDENTIFY,
            ObjectType::SpellbookOfForceBolt => &SPELLBOOK_OF_FORCE_BOLT,
            ObjectType::PotionOfParalysis => &POTION_OF_PARALYSIS,
            ObjectType::PotionOfSleeping => &POTION_OF_SLEEPING,
            ObjectType::PotionOfBlindness => &POTION_OF_BLINDNESS,
            ObjectType::PotionOfAcid => &POTION_OF_ACID,
            ObjectType::PotionOfHealing => &POTION_OF_HEALING,
            ObjectType::GoldPiece => &GOLD_PIECE,
            ObjectType::Corpse => &CORPSE,
            ObjectType::Statue => &STATUE,
        }
    }
}

/// Object instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Object {
    /// Unique identifier (assigned by the level)
    pub id: ObjectId,

    pub otyp: ObjectType,

    /// Quantity (for stackable items)
    pub quantity: i32,

    /// Enchantment/charges (spe)
    pub spe: i8,

    pub buc: BucStatus,

    /// Rust or burn level (oeroded)
    pub eroded: u8,

    /// Corrosion or rot level (oeroded2)
    pub eroded2: u8,

    pub erodeproof: bool,

    pub greased: bool,

    /// Slots this object is worn or wielded in (W_* bits)
    pub worn_mask: u32,

    /// Species of a corpse or statue
    pub corpse_of: Option<PmId>,

    /// Turns until this corpse rises as a zombie, 0 if it stays dead
    pub revive_in: u16,

    /// Contents of a statue
    pub contents: Vec<Object>,
}

impl Object {
    /// Create a single uncursed object of the given type
    pub fn new(otyp: ObjectType) -> Self {
        Self {
            id: ObjectId::NONE,
            otyp,
            quantity: 1,
            spe: 0,
            buc: BucStatus::Uncursed,
            eroded: 0,
            eroded2: 0,
            erodeproof: false,
            greased: false,
            worn_mask: 0,
            corpse_of: None,
            revive_in: 0,
            contents: Vec::new(),
        }
    }

    /// A stack of gold coins
    pub fn gold(amount: i32) -> Self {
        Self {
            quantity: amount,
            ..Self::new(ObjectType::GoldPiece)
        }
    }

    /// The corpse of a monster
    pub fn corpse(pm: PmId) -> Self {
        Self {
            corpse_of: Some(pm),
            ..Self::new(ObjectType::Corpse)
        }
    }

    /// A statue of a monster holding its former inventory
    pub fn statue(pm: PmId, contents: Vec<Object>) -> Self {
        Self {
            corpse_of: Some(pm),
            contents,
            ..Self::new(ObjectType::Statue)
        }
    }

    pub fn with_spe(mut self, spe: i8) -> Self {
        self.spe = spe;
        self
    }

    pub fn with_quantity(mut self, quantity: i32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn worn_in(mut self, mask: u32) -> Self {
        self.worn_mask = mask;
        self
    }

    pub fn def(&self) -> &'static ObjDef {
        self.otyp.def()
    }

    pub fn class(&self) -> ObjectClass {
        self.def().class
    }

    pub fn material(&self) -> Material {
        self.def().material
    }

    pub fn name(&self) -> &'static str {
        self.def().name
    }

    pub const fn is_wielded(&self) -> bool {
        self.worn_mask & W_WEP != 0
    }

    pub const fn is_worn(&self) -> bool {
        self.worn_mask & (W_ARMOR | W_ACCESSORY) != 0
    }

    pub const fn is_cursed(&self) -> bool {
        matches!(self.buc, BucStatus::Cursed)
    }

    pub const fn is_blessed(&self) -> bool {
        matches!(self.buc, BucStatus::Blessed)
    }

    /// Iron-bearing weapons split puddings
    pub fn is_iron(&self) -> bool {
        matches!(self.material(), Material::Iron | Material::Metal)
    }

    /// Get total erosion level (max of both types)
    pub fn erosion(&self) -> u8 {
        self.eroded.max(self.eroded2)
    }

    /// Erosion counter used by `kind`
    pub fn erosion_of(&self, kind: ErodeKind) -> u8 {
        if kind.is_secondary() {
            self.eroded2
        } else {
            self.eroded
        }
    }

    /// Increase erosion of `kind` by one step, saturating at the cap
    pub fn add_erosion(&mut self, kind: ErodeKind) -> bool {
        let counter = if kind.is_secondary() {
            &mut self.eroded2
        } else {
            &mut self.eroded
        };
        if *counter < MAX_ERODE {
            *counter += 1;
            true
        } else {
            false
        }
    }

    /// Armor class contribution when worn (ARM_BONUS in C)
    pub fn armor_bonus(&self) -> i32 {
        let def = self.def();
        if def.slot == 0 {
            return 0;
        }
        let base = def.base_ac as i32 + self.spe as i32;
        base - (self.erosion() as i32).min(def.base_ac as i32)
    }

    /// To-hit bonus for a wielded weapon (hitval, simplified to the object)
    pub fn hit_value(&self) -> i32 {
        if self.class() != ObjectClass::Weapon {
            return 0;
        }
        self.spe as i32 + self.def().hit_bonus as i32
    }

    /// Damage die for a wielded weapon against `large` or small targets
    /// (the dmgval die, before rolling)
    pub fn damage_die(&self, large: bool) -> u32 {
        let base = self.def().damage as u32;
        if large && base > 0 { base + 2 } else { base }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_type_has_def() {
        for otyp in ObjectType::iter() {
            let def = otyp.def();
            assert!(!def.name.is_empty());
            if def.class == ObjectClass::Armor {
                assert_ne!(def.slot, 0, "{} must occupy a slot", def.name);
            } else {
                assert_eq!(def.slot, 0);
            }
        }
    }

    #[test]
    fn test_erosion_caps() {
        let mut sword = Object::new(ObjectType::LongSword);
        for _ in 0..5 {
            sword.add_erosion(ErodeKind::Rust);
        }
        assert_eq!(sword.eroded, MAX_ERODE);
        assert_eq!(sword.eroded2, 0);
        assert!(!sword.add_erosion(ErodeKind::Rust));
        assert!(sword.add_erosion(ErodeKind::Corrode));
        assert_eq!(sword.erosion_of(ErodeKind::Corrode), 1);
    }

    #[test]
    fn test_armor_bonus() {
        let plate = Object::new(ObjectType::PlateMail).with_spe(2);
        assert_eq!(plate.armor_bonus(), 9);

        let mut helm = Object::new(ObjectType::Helmet);
        helm.eroded = 3;
        assert_eq!(helm.armor_bonus(), 0);

        assert_eq!(Object::new(ObjectType::LongSword).armor_bonus(), 0);
    }

    #[test]
    fn test_weapon_values() {
        let dagger = Object::new(ObjectType::Dagger).with_spe(1);
        assert_eq!(dagger.hit_value(), 3);
        assert_eq!(dagger.damage_die(false), 4);
        assert_eq!(dagger.damage_die(true), 6);
        assert!(dagger.is_iron());
        assert!(!Object::new(ObjectType::ElvenDagger).is_iron());
    }

    #[test]
    fn test_constructors() {
        let gold = Object::gold(50);
        assert_eq!(gold.quantity, 50);
        assert_eq!(gold.class(), ObjectClass::Coin);

        let statue = Object::statue(PmId::Newt, vec![Object::new(ObjectType::Dagger)]);
        assert_eq!(statue.corpse_of, Some(PmId::Newt));
        assert_eq!(statue.contents.len(), 1);

        let worn = Object::new(ObjectType::Helmet).worn_in(W_ARMH);
        assert!(worn.is_worn());
        assert!(!worn.is_wielded());
    }
}
