//! Combat system
//!
//! Monster-vs-monster combat (mhitm.c): the per-slot attack sequence,
//! the damage-type resolver, gaze/engulf/explode/breath handlers and
//! passive retaliation. The hero takes part as a `Monster` flagged
//! `is_you`; hero-only bookkeeping is reported through the observer.

mod attack_type;
mod context;
mod damage_type;
mod handlers;
mod mdamagem;
mod mhitm;
mod observer;
mod passive;

use serde::{Deserialize, Serialize};

use crate::NATTK;
use crate::monster::Monster;
use crate::object::worn_mask::*;
use crate::object::ObjPowers;

pub use attack_type::AttackType;
pub use context::{CombatCtx, NoiseState, Visibility};
pub use damage_type::DamageType;
pub use handlers::{breamm, explmm, gazemm, gulpmm, spitmm, zap_hit};
pub use mdamagem::{mdamagem, rustm};
pub use mhitm::{
    ALLOW_M, ALLOW_TM, AttackReport, fightm, hitmm, m_dbon, mattackm, mattackm_report,
    mdisplacem, missmm, mm_aggression, mswingsm, noises,
};
pub use observer::{Allegiance, CombatObserver, MessageLog, MsgChannel, NullObserver, channel_for};
pub use passive::{golemeffects, passivemm};

/// A single attack definition (from struct attk in monattk.h)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attack {
    /// How the attack is delivered
    pub attack_type: AttackType,
    /// What kind of damage is dealt
    pub damage_type: DamageType,
    /// Number of damage dice
    pub dice_num: u8,
    /// Sides per damage die
    pub dice_sides: u8,
}

impl Attack {
    /// An empty slot
    pub const NONE: Attack = Attack::new(AttackType::None, DamageType::Physical, 0, 0);

    /// Create a new attack
    pub const fn new(
        attack_type: AttackType,
        damage_type: DamageType,
        dice_num: u8,
        dice_sides: u8,
    ) -> Self {
        Self {
            attack_type,
            damage_type,
            dice_num,
            dice_sides,
        }
    }

    /// Check if this is a valid/active attack
    pub const fn is_active(&self) -> bool {
        !matches!(self.attack_type, AttackType::None)
    }
}

/// Attack set for a monster (6 attacks max)
pub type AttackSet = [Attack; NATTK];

/// Outcome of one attack or a whole attack sequence (MM_* bits in C)
///
/// `hit` is independent of the death flags: a killing blow reports both.
/// A death undone by life saving reports `life_saved` and no death flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MmResult {
    pub hit: bool,
    pub def_died: bool,
    pub agr_died: bool,
    /// Engulfed defender was spat out
    pub expelled: bool,
    /// Someone would have died but an amulet saved them
    pub life_saved: bool,
}

impl MmResult {
    pub const MISS: Self = Self {
        hit: false,
        def_died: false,
        agr_died: false,
        expelled: false,
        life_saved: false,
    };

    pub const HIT: Self = Self {
        hit: true,
        ..Self::MISS
    };

    pub const DEF_DIED: Self = Self {
        def_died: true,
        ..Self::HIT
    };

    pub const AGR_DIED: Self = Self {
        agr_died: true,
        ..Self::MISS
    };

    /// Canonical outcome for a death cancelled by life saving
    pub const fn with_life_saved(self) -> Self {
        Self {
            hit: true,
            life_saved: true,
            ..self
        }
    }

    pub const fn expelled(self) -> Self {
        Self {
            expelled: true,
            ..self
        }
    }

    /// Combine two outcomes, keeping every fact either reports
    pub const fn merge(self, other: Self) -> Self {
        Self {
            hit: self.hit || other.hit,
            def_died: self.def_died || other.def_died,
            agr_died: self.agr_died || other.agr_died,
            expelled: self.expelled || other.expelled,
            life_saved: self.life_saved || other.life_saved,
        }
    }

    /// Somebody died; the attack sequence stops
    pub const fn is_terminal(&self) -> bool {
        self.def_died || self.agr_died
    }

    pub const fn is_miss(&self) -> bool {
        !self.hit && !self.def_died && !self.agr_died
    }
}

/// Returns worn mask indicating which armor protects against an attack type.
///
/// The return value is a bitmask of body slots (W_ARMOR*) that must all be
/// covered to touch a petrifying monster safely with this attack type.
/// Special values:
/// - `!0` (all bits set) means attacks that make no contact
/// - `0` means attacks with no armor defense available
pub const fn attk_protection(attack_type: AttackType) -> u32 {
    match attack_type {
        // No contact, so nothing to protect
        AttackType::None
        | AttackType::Spit
        | AttackType::Explode
        | AttackType::ExplodeOnDeath
        | AttackType::Gaze
        | AttackType::Breath
        | AttackType::Magic => !0,

        // Claw/weapon attacks blocked by gloves
        AttackType::Claw | AttackType::Touch | AttackType::Weapon => W_ARMG,

        // Kick attacks blocked by boots
        AttackType::Kick => W_ARMF,

        // Head butt attacks blocked by helmet
        AttackType::Butt => W_ARMH,

        // Hugs need both cloak and gloves
        AttackType::Hug => W_ARMC | W_ARMG,

        // Bite/sting/engulf/tentacle - no armor defense available
        AttackType::Bite | AttackType::Sting | AttackType::Engulf | AttackType::Tentacle => 0,
    }
}

/// Whether `mon` touches a petrifying defender unprotected with `at`
///
/// A wielded weapon counts as a glove for the hand slot.
pub fn touches_bare(mon: &Monster, at: AttackType) -> bool {
    let mut protector = attk_protection(at);
    if protector == !0 {
        return false;
    }
    if at == AttackType::Weapon && mon.wielded().is_some() {
        protector &= !W_ARMG;
        if protector == 0 {
            return false;
        }
    }
    protector == 0 || mon.worn_mask() & protector != protector
}

/// Monster's current armor class (find_mac in C)
pub fn find_mac(mon: &Monster) -> i32 {
    mon.armor_class()
}

/// Magic cancellation level from worn armor and protection (magic_negation in C)
pub fn magic_negation(mon: &Monster) -> i32 {
    let mut mc = 0i32;
    let mut got_protect = false;
    for obj in mon.inventory.iter().filter(|o| o.is_worn()) {
        if obj.worn_mask & W_ARMOR != 0 {
            mc = mc.max(obj.def().mc as i32);
        }
        if obj.def().powers.contains(ObjPowers::PROTECTION) {
            got_protect = true;
        }
    }
    if got_protect && mc < 3 {
        mc += 1;
    }
    mc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monster::PmId;
    use crate::object::{Object, ObjectType};
    use strum::IntoEnumIterator;

    #[test]
    fn test_attk_protection() {
        assert_eq!(attk_protection(AttackType::Magic), !0);
        assert_eq!(attk_protection(AttackType::Breath), !0);
        assert_eq!(attk_protection(AttackType::Gaze), !0);
        assert_eq!(attk_protection(AttackType::Kick), W_ARMF);
        assert_eq!(attk_protection(AttackType::Butt), W_ARMH);
        assert_eq!(attk_protection(AttackType::Hug), W_ARMC | W_ARMG);
        assert_eq!(attk_protection(AttackType::Claw), W_ARMG);
        assert_eq!(attk_protection(AttackType::Weapon), W_ARMG);
        assert_eq!(attk_protection(AttackType::Bite), 0);
        assert_eq!(attk_protection(AttackType::Sting), 0);
        assert_eq!(attk_protection(AttackType::Engulf), 0);
    }

    #[test]
    fn test_attk_protection_is_pure() {
        for at in AttackType::iter() {
            assert_eq!(attk_protection(at), attk_protection(at));
        }
    }

    #[test]
    fn test_touches_bare() {
        let bare = Monster::new(PmId::Soldier);
        assert!(touches_bare(&bare, AttackType::Claw));
        assert!(touches_bare(&bare, AttackType::Bite));
        assert!(!touches_bare(&bare, AttackType::Gaze));

        let gloved = Monster::new(PmId::Soldier)
            .carrying(Object::new(ObjectType::LeatherGloves).worn_in(W_ARMG));
        assert!(!touches_bare(&gloved, AttackType::Claw));
        assert!(touches_bare(&gloved, AttackType::Hug), "hug also needs a cloak");

        let armed = Monster::new(PmId::Soldier).carrying(Object::new(ObjectType::LongSword).worn_in(W_WEP));
        assert!(!touches_bare(&armed, AttackType::Weapon));
        assert!(touches_bare(&armed, AttackType::Claw));
    }

    #[test]
    fn test_mmresult_merge() {
        let r = MmResult::HIT.merge(MmResult::AGR_DIED);
        assert!(r.hit && r.agr_died && !r.def_died);
        assert!(r.is_terminal());
        assert!(MmResult::MISS.is_miss());
        let saved = MmResult::MISS.with_life_saved();
        assert!(saved.hit && saved.life_saved && !saved.is_terminal());
    }

    #[test]
    fn test_magic_negation() {
        let mon = Monster::new(PmId::Soldier)
            .carrying(Object::new(ObjectType::LeatherArmor).worn_in(W_ARM))
            .carrying(Object::new(ObjectType::CloakOfProtection).worn_in(W_ARMC));
        assert_eq!(magic_negation(&mon), 3);
        let plain = Monster::new(PmId::Soldier).carrying(Object::new(ObjectType::PlateMail).worn_in(W_ARM));
        assert_eq!(magic_negation(&plain), 2);
        // carried but not worn
        let carried = Monster::new(PmId::Soldier).carrying(Object::new(ObjectType::CloakOfProtection));
        assert_eq!(magic_negation(&carried), 0);
        assert_eq!(find_mac(&plain), 3);
    }
}
