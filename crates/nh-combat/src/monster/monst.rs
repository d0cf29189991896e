//! Monster instances (monst.h)
//!
//! A `Monster` is any combatant on the level. The hero fighting through
//! this engine is a `Monster` with `is_you` set; hero-only bookkeeping is
//! reported to the `CombatObserver` instead of living here.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter};

use super::data::PmId;
use super::permonst::{MonsterResistances, PerMonst};
use crate::combat::{Attack, AttackSet, AttackType, DamageType};
use crate::dungeon::Pos;
use crate::object::{ObjPowers, Object, ObjectClass, ObjectType, worn_mask::*};

/// Unique monster identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct MonsterId(pub u32);

impl MonsterId {
    pub const NONE: MonsterId = MonsterId(0);
}

impl fmt::Display for MonsterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Timed status effects
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumCount,
)]
pub enum Status {
    Confusion,
    Stun,
    Blind,
    /// Frozen in place (mfrozen)
    Paralysis,
    Slow,
    /// Turning to stone; completes when the timer runs out
    Stoning,
    /// Turning into a zombie; completes when the timer runs out
    Zombifying,
    /// Turning into green slime; completes when the timer runs out
    Sliming,
    Poisoned,
    Hallucination,
    Flee,
}

impl Status {
    /// Timers that end in a transformation rather than a recovery
    pub const fn is_delayed_death(&self) -> bool {
        matches!(self, Status::Stoning | Status::Zombifying | Status::Sliming)
    }
}

/// Per-status countdowns; zero means unaffected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusTimers([u16; Status::COUNT]);

impl StatusTimers {
    pub fn get(&self, status: Status) -> u16 {
        self.0[status as usize]
    }

    pub fn has(&self, status: Status) -> bool {
        self.get(status) > 0
    }

    pub fn set(&mut self, status: Status, turns: u16) {
        self.0[status as usize] = turns;
    }

    /// Extend a timer, never shortening one already running
    pub fn extend(&mut self, status: Status, turns: u16) {
        let slot = &mut self.0[status as usize];
        *slot = slot.saturating_add(turns);
    }

    /// Start a timer only if it is not already running
    pub fn start(&mut self, status: Status, turns: u16) -> bool {
        if self.has(status) {
            return false;
        }
        self.set(status, turns);
        true
    }

    pub fn clear(&mut self, status: Status) {
        self.set(status, 0);
    }

    /// Count every running timer down by one and report those that expired
    pub fn tick(&mut self) -> Vec<Status> {
        use strum::IntoEnumIterator;
        let mut expired = Vec::new();
        for status in Status::iter() {
            let slot = &mut self.0[status as usize];
            if *slot > 0 {
                *slot -= 1;
                if *slot == 0 {
                    expired.push(status);
                }
            }
        }
        expired
    }
}

/// Monster state flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterState {
    pub peaceful: bool,
    pub tame: bool,
    /// Asleep until woken (msleeping); timed sleep uses Status::Paralysis
    pub sleeping: bool,
    pub invisible: bool,
    /// Special abilities suppressed (mcan)
    pub cancelled: bool,
    pub trapped: bool,
    /// Already moved this turn
    pub moved: bool,
    /// Split off a pudding
    pub cloned: bool,
    /// Killed; removed from the map and waiting to be purged
    pub dead: bool,
}

/// Monster instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    /// Unique identifier (assigned by the level)
    pub id: MonsterId,

    /// Current species
    pub pm: PmId,

    /// Given name, if any
    pub name: Option<String>,

    /// The hero standing in as a combatant
    pub is_you: bool,

    pub pos: Pos,

    pub level: u8,

    pub hp: i32,
    pub hp_max: i32,

    /// Attacks, copied from the species and replaced on polymorph
    pub attacks: AttackSet,

    pub state: MonsterState,

    pub status: StatusTimers,

    /// Intrinsics gained beyond the species'
    pub extra_resistances: MonsterResistances,

    /// Breath weapon cooldown (mspec_used)
    pub spec_used: u8,

    pub inventory: Vec<Object>,
}

impl Monster {
    /// Create a monster of `pm` at its base level with average hit points
    pub fn new(pm: PmId) -> Self {
        let data = pm.data();
        let level = data.level.max(0) as u8;
        let hp = hit_points_for_level(level);
        Self {
            id: MonsterId::NONE,
            pm,
            name: None,
            is_you: false,
            pos: Pos::default(),
            level,
            hp,
            hp_max: hp,
            attacks: data.attacks,
            state: MonsterState::default(),
            status: StatusTimers::default(),
            extra_resistances: MonsterResistances::empty(),
            spec_used: 0,
            inventory: Vec::new(),
        }
    }

    /// The hero as a combatant
    pub fn hero(pm: PmId, level: u8, hp: i32) -> Self {
        Self {
            is_you: true,
            level,
            hp,
            hp_max: hp,
            ..Self::new(pm)
        }
    }

    pub fn at(mut self, x: i8, y: i8) -> Self {
        self.pos = Pos::new(x, y);
        self
    }

    pub fn with_hp(mut self, hp: i32) -> Self {
        self.hp = hp;
        self.hp_max = self.hp_max.max(hp);
        self
    }

    pub fn with_level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }

    pub fn tame(mut self) -> Self {
        self.state.tame = true;
        self.state.peaceful = true;
        self
    }

    pub fn peaceful(mut self) -> Self {
        self.state.peaceful = true;
        self
    }

    pub fn carrying(mut self, obj: Object) -> Self {
        self.inventory.push(obj);
        self
    }

    pub fn with_attacks(mut self, attacks: &[Attack]) -> Self {
        self.attacks = [Attack::NONE; crate::NATTK];
        for (slot, attack) in self.attacks.iter_mut().zip(attacks) {
            *slot = *attack;
        }
        self
    }

    pub fn data(&self) -> &'static PerMonst {
        self.pm.data()
    }

    /// Name for messages: "the jackal", "Fido", "you"
    pub fn display_name(&self) -> String {
        if self.is_you {
            return "you".to_string();
        }
        match &self.name {
            Some(name) => name.clone(),
            None => format!("the {}", self.data().name),
        }
    }

    /// Capitalized display name for the start of a sentence (Monnam)
    pub fn monnam(&self) -> String {
        let name = self.display_name();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => name,
        }
    }

    /// "the jackal's", "your"
    pub fn possessive_name(&self) -> String {
        if self.is_you {
            "your".to_string()
        } else {
            format!("{}'s", self.display_name())
        }
    }

    /// "The jackal's", "Your"
    pub fn possessive_monnam(&self) -> String {
        if self.is_you {
            "Your".to_string()
        } else {
            format!("{}'s", self.monnam())
        }
    }

    pub fn possessive(&self) -> &'static str {
        if self.is_you { "your" } else { self.data().possessive() }
    }

    pub fn is_alive(&self) -> bool {
        !self.state.dead && self.hp > 0
    }

    /// Can act this turn (mcanmove && !msleeping)
    pub fn can_move(&self) -> bool {
        !self.status.has(Status::Paralysis) && !self.state.sleeping
    }

    /// Helpless targets are easier to hit
    pub fn is_helpless(&self) -> bool {
        !self.can_move() || self.status.has(Status::Confusion)
    }

    pub fn is_confused(&self) -> bool {
        self.status.has(Status::Confusion)
    }

    pub fn is_stunned(&self) -> bool {
        self.status.has(Status::Stun)
    }

    /// Has working eyes that are not blinded (mcansee && haseyes)
    pub fn can_see(&self) -> bool {
        !self.status.has(Status::Blind) && !self.data().has_no_eyes()
    }

    /// Wake a sleeping monster
    pub fn wake_up(&mut self) {
        self.state.sleeping = false;
    }

    /// Base and acquired resistances combined with worn item powers
    pub fn resistances(&self) -> MonsterResistances {
        let mut res = self.data().resistances | self.extra_resistances;
        let powers = self.worn_powers();
        if powers.contains(ObjPowers::FIRE_RES) {
            res |= MonsterResistances::FIRE;
        }
        if powers.contains(ObjPowers::COLD_RES) {
            res |= MonsterResistances::COLD;
        }
        if powers.contains(ObjPowers::SHOCK_RES) {
            res |= MonsterResistances::ELEC;
        }
        res
    }

    pub fn resists(&self, res: MonsterResistances) -> bool {
        self.resistances().contains(res)
    }

    /// Intrinsic or worn protection against a damage type
    pub fn resists_damage(&self, ad: DamageType) -> bool {
        ad.resistance().is_some_and(|res| self.resists(res))
    }

    pub fn resists_fire(&self) -> bool {
        self.resists(MonsterResistances::FIRE)
    }

    pub fn resists_cold(&self) -> bool {
        self.resists(MonsterResistances::COLD)
    }

    pub fn resists_elec(&self) -> bool {
        self.resists(MonsterResistances::ELEC)
    }

    pub fn resists_sleep(&self) -> bool {
        self.resists(MonsterResistances::SLEEP)
    }

    pub fn resists_poison(&self) -> bool {
        self.resists(MonsterResistances::POISON)
    }

    pub fn resists_acid(&self) -> bool {
        self.resists(MonsterResistances::ACID)
    }

    pub fn resists_ston(&self) -> bool {
        self.resists(MonsterResistances::STONE)
    }

    pub fn resists_disint(&self) -> bool {
        self.resists(MonsterResistances::DISINT)
    }

    /// Magic missile resistance (resists_magm)
    pub fn resists_magm(&self) -> bool {
        self.resists(MonsterResistances::MAGIC) || self.data().has_damage_type(DamageType::MagicMissile)
    }

    /// Immune to blinding (resists_blnd)
    pub fn resists_blnd(&self) -> bool {
        !self.can_see() || self.state.sleeping || self.status.has(Status::Paralysis)
    }

    /// Powers from worn armor and accessories
    pub fn worn_powers(&self) -> ObjPowers {
        self.inventory
            .iter()
            .filter(|o| o.is_worn())
            .fold(ObjPowers::empty(), |acc, o| acc | o.def().powers)
    }

    /// Reflection from a shield, amulet or silver dragon scales (mon_reflects)
    pub fn has_reflection(&self) -> bool {
        self.worn_powers().contains(ObjPowers::REFLECTION)
    }

    /// The worn item doing the reflecting, for messages
    pub fn reflector(&self) -> Option<&Object> {
        self.inventory
            .iter()
            .find(|o| o.is_worn() && o.def().powers.contains(ObjPowers::REFLECTION))
    }

    pub fn has_free_action(&self) -> bool {
        self.worn_powers().contains(ObjPowers::FREE_ACTION)
    }

    /// Cannot be digested by an engulfer
    pub fn has_slow_digestion(&self) -> bool {
        self.worn_powers().contains(ObjPowers::SLOW_DIGESTION)
    }

    /// Union of all worn and wielded slot bits (misc_worn_check)
    pub fn worn_mask(&self) -> u32 {
        self.inventory.iter().fold(0, |acc, o| acc | o.worn_mask)
    }

    /// Armor worn in the given slot (which_armor in C)
    pub fn worn_in_slot(&self, slot: u32) -> Option<&Object> {
        self.inventory.iter().find(|o| o.worn_mask & slot != 0)
    }

    pub fn worn_in_slot_mut(&mut self, slot: u32) -> Option<&mut Object> {
        self.inventory.iter_mut().find(|o| o.worn_mask & slot != 0)
    }

    /// Currently wielded weapon (MON_WEP)
    pub fn wielded(&self) -> Option<&Object> {
        self.worn_in_slot(W_WEP)
    }

    pub fn wielded_mut(&mut self) -> Option<&mut Object> {
        self.worn_in_slot_mut(W_WEP)
    }

    /// Index of a worn amulet of life saving
    pub fn life_saver(&self) -> Option<usize> {
        self.inventory
            .iter()
            .position(|o| o.worn_mask & W_AMUL != 0 && o.def().powers.contains(ObjPowers::LIFE_SAVING))
    }

    /// Total gold carried
    pub fn gold(&self) -> i32 {
        self.inventory
            .iter()
            .filter(|o| o.otyp == ObjectType::GoldPiece)
            .map(|o| o.quantity)
            .sum()
    }

    /// Remove and return all carried gold as one stack
    pub fn take_gold(&mut self) -> Option<Object> {
        let amount = self.gold();
        if amount <= 0 {
            return None;
        }
        self.inventory.retain(|o| o.otyp != ObjectType::GoldPiece);
        Some(Object::gold(amount))
    }

    /// Add an object, merging gold into an existing stack
    pub fn add_to_inventory(&mut self, obj: Object) {
        if obj.otyp == ObjectType::GoldPiece {
            if let Some(stack) = self.inventory.iter_mut().find(|o| o.otyp == ObjectType::GoldPiece) {
                stack.quantity += obj.quantity;
                return;
            }
        }
        self.inventory.push(obj);
    }

    /// Whether any carried object belongs to `class`
    pub fn carries_class(&self, class: ObjectClass) -> bool {
        self.inventory.iter().any(|o| o.class() == class)
    }

    /// Armor class including worn armor (find_mac in C)
    pub fn armor_class(&self) -> i32 {
        let mut base = self.data().armor_class as i32;
        for obj in self.inventory.iter().filter(|o| o.worn_mask & W_ARMOR != 0) {
            base -= obj.armor_bonus();
        }
        base
    }

    /// First slot of a given attack type
    pub fn attack_of_type(&self, at: AttackType) -> Option<Attack> {
        self.attacks.iter().copied().find(|a| a.attack_type == at)
    }

    /// Passive defense slot (first AT_NONE entry with an effect)
    pub fn passive_attack(&self) -> Option<Attack> {
        self.attacks
            .iter()
            .copied()
            .find(|a| a.attack_type == AttackType::None && a.damage_type != DamageType::Physical)
    }

    /// Change species in place (newcham), keeping hit point ratio
    pub fn polymorph_into(&mut self, pm: PmId) {
        let data = pm.data();
        let ratio_hp = if self.hp_max > 0 {
            (self.hp.max(1) as i64 * 1000 / self.hp_max as i64) as i32
        } else {
            1000
        };
        self.pm = pm;
        self.level = data.level.max(0) as u8;
        self.hp_max = hit_points_for_level(self.level);
        self.hp = (self.hp_max as i64 * ratio_hp as i64 / 1000).max(1) as i32;
        self.attacks = data.attacks;
    }
}

/// Average hit points for a monster of `level` (d(level, 8), level 0 is 1d4)
pub fn hit_points_for_level(level: u8) -> i32 {
    if level == 0 {
        2
    } else {
        level as i32 * 9 / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::ObjectType;

    #[test]
    fn test_status_timers() {
        let mut timers = StatusTimers::default();
        assert!(!timers.has(Status::Stun));
        timers.set(Status::Stun, 2);
        timers.extend(Status::Stun, 1);
        assert_eq!(timers.get(Status::Stun), 3);
        assert!(!timers.start(Status::Stun, 9));
        assert!(timers.tick().is_empty());
        assert!(timers.tick().is_empty());
        assert_eq!(timers.tick(), vec![Status::Stun]);
        assert_eq!(timers.get(Status::Stun), 0);
        assert!(timers.tick().is_empty());
    }

    #[test]
    fn test_extend_saturates() {
        let mut timers = StatusTimers::default();
        timers.set(Status::Blind, u16::MAX - 1);
        timers.extend(Status::Blind, 10);
        assert_eq!(timers.get(Status::Blind), u16::MAX);
    }

    #[test]
    fn test_new_monster_copies_species() {
        let mon = Monster::new(PmId::Owlbear);
        assert_eq!(mon.level, 5);
        assert_eq!(mon.attacks, PmId::Owlbear.data().attacks);
        assert!(mon.is_alive());
        assert_eq!(mon.display_name(), "the owlbear");
        assert_eq!(mon.monnam(), "The owlbear");
    }

    #[test]
    fn test_worn_powers_and_ac() {
        let mon = Monster::new(PmId::Soldier)
            .carrying(Object::new(ObjectType::ShieldOfReflection).worn_in(W_ARMS))
            .carrying(Object::new(ObjectType::RingOfFireResistance).worn_in(W_RINGL))
            .carrying(Object::new(ObjectType::AmuletOfReflection));
        assert!(mon.has_reflection());
        assert!(mon.resists_fire());
        assert_eq!(mon.armor_class(), 8);
        assert_eq!(mon.worn_mask(), W_ARMS | W_RINGL);
    }

    #[test]
    fn test_life_saver_must_be_worn() {
        let carried = Monster::new(PmId::Soldier).carrying(Object::new(ObjectType::AmuletOfLifeSaving));
        assert!(carried.life_saver().is_none());
        let worn = Monster::new(PmId::Soldier)
            .carrying(Object::new(ObjectType::AmuletOfLifeSaving).worn_in(W_AMUL));
        assert_eq!(worn.life_saver(), Some(0));
    }

    #[test]
    fn test_gold_handling() {
        let mut mon = Monster::new(PmId::Leprechaun);
        mon.add_to_inventory(Object::gold(10));
        mon.add_to_inventory(Object::gold(5));
        assert_eq!(mon.inventory.len(), 1);
        assert_eq!(mon.gold(), 15);
        let stack = mon.take_gold().unwrap();
        assert_eq!(stack.quantity, 15);
        assert_eq!(mon.gold(), 0);
        assert!(mon.take_gold().is_none());
    }

    #[test]
    fn test_helpless() {
        let mut mon = Monster::new(PmId::Jackal);
        assert!(!mon.is_helpless());
        mon.state.sleeping = true;
        assert!(mon.is_helpless());
        mon.wake_up();
        mon.status.set(Status::Confusion, 3);
        assert!(mon.is_helpless());
    }

    #[test]
    fn test_polymorph_keeps_ratio() {
        let mut mon = Monster::new(PmId::ClayGolem);
        mon.hp = mon.hp_max / 2;
        mon.polymorph_into(PmId::StoneGolem);
        assert_eq!(mon.pm, PmId::StoneGolem);
        assert_eq!(mon.level, 14);
        assert!(mon.hp * 2 <= mon.hp_max + 1);
        assert_eq!(mon.attacks, PmId::StoneGolem.data().attacks);
    }

    #[test]
    fn test_passive_attack_lookup() {
        assert_eq!(
            Monster::new(PmId::AcidBlob).passive_attack().map(|a| a.damage_type),
            Some(DamageType::Acid)
        );
        assert!(Monster::new(PmId::Jackal).passive_attack().is_none());
    }
}
