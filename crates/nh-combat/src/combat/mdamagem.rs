//! Single-attack damage resolution (mdamagem)
//!
//! `mdamagem` applies one attack that has already connected. Effects are
//! dispatched through a table keyed by damage type; each handler works on
//! a [`Strike`] borrowing both combatants, and anything that needs the
//! whole level (deaths, teleports, cloning) is handed back as a
//! [`Followup`] and carried out once the borrows end.

use tracing::{debug, trace};

use super::context::CombatCtx;
use super::mhitm::m_dbon;
use super::passive::golemeffects;
use super::{Attack, AttackType, DamageType, MmResult, MsgChannel, magic_negation, touches_bare};
use crate::dungeon::Level;
use crate::error::CombatError;
use crate::monster::lifecycle::{clone_mon, grow_up, mon_to_stone, monkilled};
use crate::monster::{DeathCause, DeathOutcome, Monster, MonsterId, PmId, Status};
use crate::object::{
    Element, ErodeKind, ErodeResult, Material, Object, ObjectClass, destroy_mitem, erode_armor,
    erode_obj, worn_mask::*,
};
use crate::{SLIMING_TURNS, STONING_TURNS, ZOMBIFY_TURNS};

/// What a handler decided about the rolled damage
enum Partial {
    /// Subtract `Strike::tmp` from the defender
    Damage,
    /// Stop here with this outcome; no damage is applied
    Done(MmResult),
}

/// Level-wide work a handler asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Followup {
    KillDefender(DeathCause),
    TeleportAttacker,
    TeleportDefender,
    ClonePudding,
}

/// One connected attack in progress
struct Strike<'m> {
    magr: &'m mut Monster,
    mdef: &'m mut Monster,
    mattk: Attack,
    /// Damage to apply
    tmp: i32,
    /// Special effect negated by the attacker's cancellation or the
    /// defender's magic cancellation
    cancelled: bool,
    followup: Option<Followup>,
}

impl Strike<'_> {
    /// Message about the defender, shown if the player can see it
    fn about_def(&self, ctx: &mut CombatCtx, text: String) {
        if ctx.vis.def {
            ctx.combat_message(&*self.magr, &*self.mdef, true, text);
        }
    }

    /// Message about the attacker, shown if the player can see it
    fn about_agr(&self, ctx: &mut CombatCtx, text: String) {
        if ctx.vis.agr {
            ctx.combat_message(&*self.magr, &*self.mdef, true, text);
        }
    }

    fn def_name(&self) -> String {
        self.mdef.monnam()
    }
}

type Handler = fn(&mut Strike<'_>, &mut CombatCtx) -> Partial;

/// Handler for each damage type; `None` for types that never reach the
/// resolver (spells, unresolved random breath)
fn handler_for(ad: DamageType) -> Option<Handler> {
    use DamageType as AD;
    let handler: Handler = match ad {
        AD::Physical | AD::Heal | AD::Lycanthropy => ad_phys,
        AD::Stun => ad_stun,
        AD::Legs => ad_legs,
        AD::Fire => ad_fire,
        AD::Cold => ad_cold,
        AD::Electric => ad_elec,
        AD::Acid => ad_acid,
        AD::Rust => ad_rust,
        AD::Corrode => ad_corr,
        AD::Decay => ad_dcay,
        AD::Stone => ad_ston,
        AD::Teleport => ad_tlpt,
        AD::Sleep => ad_slee,
        AD::Paralyze => ad_plys,
        AD::Slow => ad_slow,
        AD::Confuse => ad_conf,
        AD::Blind => ad_blnd,
        AD::Hallucinate => ad_halu,
        AD::Curse => ad_curs,
        AD::StealGold => ad_sgld,
        AD::StealItem | AD::Seduce | AD::SeduceSpecial => ad_sitm,
        AD::DrainEnergy => ad_dren,
        AD::DrainLife => ad_drli,
        AD::DrainStrength | AD::DrainDexterity | AD::DrainConstitution => ad_drst,
        AD::DrainIntelligence => ad_drin,
        AD::Slime => ad_slim,
        AD::Stick => ad_stck,
        AD::Wrap => ad_wrap,
        AD::Disenchant => ad_ench,
        AD::Digest => ad_dgst,
        AD::Zombify => ad_zomb,
        AD::MagicMissile => ad_magm,
        AD::Disintegrate => ad_disn,
        AD::Death | AD::Pestilence | AD::Famine | AD::Disease | AD::StealAmulet => ad_none,
        AD::ClericSpell | AD::MageSpell | AD::RandomBreath => return None,
    };
    Some(handler)
}

/// Apply one attack that has already hit (mdamagem in C)
///
/// Touching a petrifying defender bare is checked first and may stone
/// the attacker before any damage is dealt. Otherwise damage is rolled,
/// the damage-type handler runs, and the defender loses hit points,
/// possibly dying through the usual death pipeline.
pub fn mdamagem(level: &mut Level, agr: MonsterId, def: MonsterId, mattk: Attack, ctx: &mut CombatCtx) -> MmResult {
    ctx.resolver_calls += 1;
    let Some((magr, mdef)) = level.pair_mut(agr, def) else {
        let err = if agr == def {
            CombatError::SameCombatant(agr)
        } else if level.monster(agr).is_none() {
            CombatError::MissingCombatant(agr)
        } else {
            CombatError::MissingCombatant(def)
        };
        ctx.impossible(err);
        return MmResult::MISS;
    };
    if !magr.is_alive() || !mdef.is_alive() {
        let dead = if magr.is_alive() { def } else { agr };
        ctx.impossible(CombatError::DeadCombatant(dead));
        return MmResult::MISS;
    }

    let petrifying = mdef.pm.touch_petrifies()
        || (mattk.damage_type == DamageType::Digest && mdef.pm == PmId::Medusa);
    if petrifying && !magr.resists_ston() && touches_bare(magr, mattk.attack_type) {
        return stone_attacker(level, agr, ctx);
    }

    let mut tmp = ctx.rng.dice(mattk.dice_num as u32, mattk.dice_sides as u32) as i32;
    if magr.data().is_undead() && ctx.night {
        tmp += ctx.rng.dice(mattk.dice_num as u32, mattk.dice_sides as u32) as i32;
    }
    if mattk.damage_type == DamageType::Physical {
        tmp += m_dbon(magr);
    }
    let armpro = magic_negation(mdef);
    // beams and venom are not stopped by magic cancellation
    let negated = !mattk.attack_type.is_ranged() && (ctx.rng.rn2(10) as i32) < 3 * armpro;
    let cancelled = magr.state.cancelled || negated;
    trace!(attacker = %agr, defender = %def, tmp, armpro, cancelled, "damage roll");

    let Some(handler) = handler_for(mattk.damage_type) else {
        ctx.impossible(CombatError::UnknownDamageType(mattk.damage_type));
        return MmResult::MISS;
    };
    let weapon_attack = mattk.attack_type == AttackType::Weapon && magr.wielded().is_some();
    let agr_cancelled = magr.state.cancelled;

    let mut strike = Strike {
        magr,
        mdef,
        mattk,
        tmp,
        cancelled,
        followup: None,
    };
    let partial = handler(&mut strike, ctx);
    let Strike {
        mdef, tmp, followup, ..
    } = strike;
    if mdef.is_you {
        ctx.observer.stop_occupation();
    }
    if let Partial::Done(res) = partial {
        return res;
    }
    debug!(attacker = %agr, defender = %def, damage_type = %mattk.damage_type, tmp, ?followup, "attack resolved");

    match followup {
        Some(Followup::KillDefender(cause)) => return kill_defender(level, agr, def, cause, ctx),
        Some(Followup::TeleportAttacker) => {
            let name = level.monster(agr).map(Monster::monnam).unwrap_or_default();
            if level.rloc(agr, &mut ctx.rng) && ctx.vis.agr {
                ctx.neutral(format!("{name} suddenly disappears!"));
            }
        }
        Some(Followup::TeleportDefender) => {
            let name = level.monster(def).map(Monster::monnam).unwrap_or_default();
            if level.rloc(def, &mut ctx.rng) && ctx.vis.def {
                ctx.neutral(format!("{name} suddenly disappears!"));
            }
        }
        Some(Followup::ClonePudding) => {
            if clone_mon(level, def, ctx).is_some() && ctx.vis.def {
                let name = level.monster(def).map(Monster::monnam).unwrap_or_default();
                ctx.neutral(format!("{name} divides as it is hit!"));
            }
        }
        None => {}
    }

    if tmp <= 0 {
        return MmResult::HIT;
    }
    let Some((magr, mdef)) = level.pair_mut(agr, def) else {
        return MmResult::HIT;
    };
    mdef.hp -= tmp;
    if weapon_attack && !agr_cancelled {
        if let Some(weapon) = magr.wielded_mut() {
            let name = weapon.name();
            if let Some((kind, ErodeResult::Damaged)) = rustm(mdef, weapon, ctx) {
                if ctx.vis.agr {
                    ctx.neutral(format!("{} {name} {}!", magr.possessive_monnam(), kind.verb()));
                }
            }
        }
    }
    if mdef.hp > 0 {
        return MmResult::HIT;
    }
    let cause = match mattk.damage_type {
        DamageType::Digest => DeathCause::Digested,
        DamageType::Zombify if mdef.pm.zombie_form().is_some() => DeathCause::Zombified,
        _ => DeathCause::Killed,
    };
    kill_defender(level, agr, def, cause, ctx)
}

/// The attacker touched a petrifying defender with nothing in between
pub(super) fn stone_attacker(level: &mut Level, agr: MonsterId, ctx: &mut CombatCtx) -> MmResult {
    let Some(magr) = level.monster_mut(agr) else {
        return MmResult::MISS;
    };
    if magr.is_you {
        if magr.status.start(Status::Stoning, STONING_TURNS) {
            ctx.message(MsgChannel::BadForPlayer, "You are slowing down.");
        }
        return MmResult::HIT;
    }
    if magr.pm.poly_when_stoned() {
        mon_to_stone(magr, ctx);
        return MmResult::HIT;
    }
    match monkilled(level, agr, DeathCause::Stoned, ctx) {
        DeathOutcome::Died => MmResult::AGR_DIED,
        DeathOutcome::LifeSaved => MmResult::MISS.with_life_saved(),
        DeathOutcome::Transformed => MmResult::HIT,
    }
}

/// Run the death pipeline on the defender and let the killer profit
fn kill_defender(level: &mut Level, agr: MonsterId, def: MonsterId, cause: DeathCause, ctx: &mut CombatCtx) -> MmResult {
    let (victim_pm, victim_level) = match level.monster(def) {
        Some(mdef) => (mdef.pm, mdef.level),
        None => return MmResult::HIT,
    };
    match monkilled(level, def, cause, ctx) {
        DeathOutcome::Died => {
            if let Some(magr) = level.monster_mut(agr) {
                if magr.is_you {
                    ctx.observer.gain_experience(victim_pm);
                } else {
                    grow_up(magr, victim_level, ctx);
                }
            }
            MmResult::DEF_DIED
        }
        DeathOutcome::LifeSaved => MmResult::HIT.with_life_saved(),
        DeathOutcome::Transformed => MmResult::HIT,
    }
}

/// Erode a weapon that struck a rusting, corroding or burning monster
/// (rustm in C)
///
/// Returns the erosion attempted and its result, or `None` when the
/// defender does not erode weapons or the roll spared it.
pub fn rustm(mdef: &Monster, weapon: &mut Object, ctx: &mut CombatCtx) -> Option<(ErodeKind, ErodeResult)> {
    let data = mdef.data();
    let (kind, chance) = if data.has_damage_type(DamageType::Corrode) {
        (ErodeKind::Corrode, 1)
    } else if data.has_damage_type(DamageType::Rust) {
        (ErodeKind::Rust, 1)
    } else if data.has_damage_type(DamageType::Fire) {
        (ErodeKind::Burn, 6)
    } else {
        return None;
    };
    if ctx.rng.rn2(chance) != 0 {
        return None;
    }
    Some((kind, erode_obj(weapon, kind, &mut ctx.rng)))
}

/// Duration for a status effect delivered along with `tmp` damage
fn effect_turns(tmp: i32, ctx: &mut CombatCtx) -> u16 {
    (tmp.clamp(1, 100) as u16).saturating_add(ctx.rng.rnd(10) as u16)
}

/// Burn, freeze or shock the defender's inventory; returns units lost
fn destroy_items(s: &mut Strike<'_>, classes: &[ObjectClass], element: Element, ctx: &mut CombatCtx) -> i32 {
    let mut total = 0;
    for &class in classes {
        let report = destroy_mitem(s.mdef, class, element, &mut ctx.rng);
        if report.total > 0 {
            let (noun, one, many) = destruction_words(class, element);
            let owner = s.mdef.possessive_name();
            let text = if report.total == 1 {
                format!("One of {owner} {noun} {one}!")
            } else {
                format!("Some of {owner} {noun} {many}!")
            };
            s.about_def(ctx, text);
        }
        total += report.total;
    }
    total
}

/// Inventory losses and resistance shared by fire, frost and lightning
fn elemental(s: &mut Strike<'_>, ctx: &mut CombatCtx, ad: DamageType, element: Element, unhurt: String) -> Partial {
    s.tmp += destroy_items(s, element.classes(), element, ctx);
    if s.mdef.resists_damage(ad) {
        s.about_def(ctx, unhurt);
        golemeffects(s.mdef, ad, s.tmp, ctx);
        s.tmp = 0;
    }
    s.tmp += destroy_items(s, &[element.lingering_class()], element, ctx);
    Partial::Damage
}

/// Plural noun and singular/plural verb phrases for destroyed items
fn destruction_words(class: ObjectClass, element: Element) -> (&'static str, &'static str, &'static str) {
    match (class, element) {
        (ObjectClass::Potion, Element::Cold) => ("potions", "freezes and shatters", "freeze and shatter"),
        (ObjectClass::Potion, _) => ("potions", "boils and explodes", "boil and explode"),
        (ObjectClass::Scroll, _) => ("scrolls", "catches fire and burns", "catch fire and burn"),
        (ObjectClass::Spellbook, _) => ("spellbooks", "catches fire and burns", "catch fire and burn"),
        (ObjectClass::Ring, _) => ("rings", "turns to dust and vanishes", "turn to dust and vanish"),
        (ObjectClass::Wand, _) => ("wands", "breaks apart and explodes", "break apart and explode"),
        _ => ("possessions", "is destroyed", "are destroyed"),
    }
}

fn report_erosion(s: &Strike<'_>, ctx: &mut CombatCtx, kind: ErodeKind, hit: Option<(&'static str, ErodeResult)>) {
    if let Some((name, ErodeResult::Damaged)) = hit {
        s.about_def(ctx, format!("{} {name} {}!", s.mdef.possessive_monnam(), kind.verb()));
    }
}

/// Undead and demons shrug off level drain (resists_drli)
fn resists_drain(mon: &Monster) -> bool {
    let data = mon.data();
    data.is_undead() || data.is_demon()
}

/// Green slimes, flaming and insubstantial creatures cannot be slimed
fn slimeproof(mon: &Monster) -> bool {
    mon.pm == PmId::GreenSlime || mon.data().is_unsolid() || mon.data().has_damage_type(DamageType::Fire)
}

/// Whether this attack can blind the defender (can_blnd in C)
fn can_blind(magr: &Monster, mdef: &Monster, at: AttackType) -> bool {
    if mdef.data().has_no_eyes() {
        return false;
    }
    match at {
        AttackType::Explode
        | AttackType::ExplodeOnDeath
        | AttackType::Gaze
        | AttackType::Magic
        | AttackType::Breath => !magr.state.cancelled && !mdef.resists_blnd(),
        _ => !magr.state.cancelled,
    }
}

fn ad_phys(s: &mut Strike<'_>, ctx: &mut CombatCtx) -> Partial {
    let at = s.mattk.attack_type;
    if at == AttackType::Kick && s.mdef.data().is_thick_skinned() {
        s.tmp = 0;
    } else if at == AttackType::Weapon {
        if let Some(weapon) = s.magr.wielded() {
            let large = s.mdef.data().is_big();
            let mut dmg = ctx.rng.rnd(weapon.damage_die(large)) as i32 + weapon.spe as i32;
            let data = s.mdef.data();
            if weapon.material() == Material::Silver && (data.is_undead() || data.is_demon()) {
                dmg += ctx.rng.rnd(20) as i32;
            }
            s.tmp = (s.tmp + dmg.max(0)).max(1);
            if weapon.is_iron() && s.mdef.pm.is_pudding() && s.mdef.hp > 1 && !s.mdef.state.cancelled {
                s.followup = Some(Followup::ClonePudding);
            }
        }
    } else if s.magr.pm == PmId::PurpleWorm && s.mdef.pm == PmId::Shrieker {
        // leave the shrieker for the engulf that follows
        if s.tmp >= s.mdef.hp && s.mdef.hp > 1 {
            s.tmp = s.mdef.hp - 1;
        }
    }
    Partial::Damage
}

fn ad_stun(s: &mut Strike<'_>, ctx: &mut CombatCtx) -> Partial {
    if s.magr.state.cancelled {
        return Partial::Damage;
    }
    let turns = effect_turns(s.tmp, ctx);
    s.mdef.status.extend(Status::Stun, turns);
    s.about_def(ctx, format!("{} staggers for a moment.", s.def_name()));
    ad_phys(s, ctx)
}

fn ad_legs(s: &mut Strike<'_>, ctx: &mut CombatCtx) -> Partial {
    if s.magr.state.cancelled {
        s.tmp = 0;
        return Partial::Damage;
    }
    ad_phys(s, ctx)
}

fn ad_fire(s: &mut Strike<'_>, ctx: &mut CombatCtx) -> Partial {
    if s.cancelled {
        s.tmp = 0;
        return Partial::Damage;
    }
    s.about_def(ctx, format!("{} is on fire!", s.def_name()));
    if s.mdef.pm.completely_burns() {
        s.about_def(ctx, format!("{} burns completely!", s.def_name()));
        s.tmp = 0;
        s.followup = Some(Followup::KillDefender(DeathCause::Killed));
        return Partial::Damage;
    }
    let unhurt = format!("The fire doesn't seem to burn {}!", s.mdef.display_name());
    elemental(s, ctx, DamageType::Fire, Element::Fire, unhurt)
}

fn ad_cold(s: &mut Strike<'_>, ctx: &mut CombatCtx) -> Partial {
    if s.cancelled {
        s.tmp = 0;
        return Partial::Damage;
    }
    s.about_def(ctx, format!("{} is covered in frost!", s.def_name()));
    let unhurt = format!("The frost doesn't seem to chill {}!", s.mdef.display_name());
    elemental(s, ctx, DamageType::Cold, Element::Cold, unhurt)
}

fn ad_elec(s: &mut Strike<'_>, ctx: &mut CombatCtx) -> Partial {
    if s.cancelled {
        s.tmp = 0;
        return Partial::Damage;
    }
    s.about_def(ctx, format!("{} gets zapped!", s.def_name()));
    let unhurt = format!("The zap doesn't shock {}!", s.mdef.display_name());
    elemental(s, ctx, DamageType::Electric, Element::Shock, unhurt)
}

fn ad_acid(s: &mut Strike<'_>, ctx: &mut CombatCtx) -> Partial {
    if s.magr.state.cancelled {
        s.tmp = 0;
        return Partial::Damage;
    }
    let acid = if ctx.vis.def { ctx.liquid("acid") } else { "acid" };
    if s.mdef.resists_acid() {
        s.about_def(ctx, format!("{} is covered in {acid}, but it seems harmless.", s.def_name()));
        s.tmp = 0;
    } else {
        s.about_def(ctx, format!("{} is covered in {acid}!", s.def_name()));
        s.about_def(ctx, format!("It burns {}!", s.mdef.display_name()));
    }
    if ctx.rng.rn2(30) == 0 {
        let hit = erode_armor(s.mdef, ErodeKind::Corrode, &mut ctx.rng);
        report_erosion(s, ctx, ErodeKind::Corrode, hit);
    }
    if ctx.rng.rn2(6) == 0 {
        if let Some(weapon) = s.mdef.wielded_mut() {
            erode_obj(weapon, ErodeKind::Corrode, &mut ctx.rng);
        }
    }
    Partial::Damage
}

/// A golem of the wrong material simply falls apart
fn falls_to_pieces(s: &mut Strike<'_>, ctx: &mut CombatCtx) -> Partial {
    s.about_def(ctx, format!("{} falls to pieces!", s.def_name()));
    s.tmp = 0;
    s.followup = Some(Followup::KillDefender(DeathCause::Killed));
    Partial::Damage
}

fn ad_rust(s: &mut Strike<'_>, ctx: &mut CombatCtx) -> Partial {
    if s.magr.state.cancelled {
        return Partial::Damage;
    }
    if s.mdef.pm == PmId::IronGolem {
        return falls_to_pieces(s, ctx);
    }
    let hit = erode_armor(s.mdef, ErodeKind::Rust, &mut ctx.rng);
    report_erosion(s, ctx, ErodeKind::Rust, hit);
    s.tmp = 0;
    Partial::Damage
}

fn ad_corr(s: &mut Strike<'_>, ctx: &mut CombatCtx) -> Partial {
    if s.magr.state.cancelled {
        return Partial::Damage;
    }
    let hit = erode_armor(s.mdef, ErodeKind::Corrode, &mut ctx.rng);
    report_erosion(s, ctx, ErodeKind::Corrode, hit);
    s.tmp = 0;
    Partial::Damage
}

fn ad_dcay(s: &mut Strike<'_>, ctx: &mut CombatCtx) -> Partial {
    if s.magr.state.cancelled {
        return Partial::Damage;
    }
    if matches!(s.mdef.pm, PmId::WoodGolem | PmId::LeatherGolem) {
        return falls_to_pieces(s, ctx);
    }
    let hit = erode_armor(s.mdef, ErodeKind::Rot, &mut ctx.rng);
    report_erosion(s, ctx, ErodeKind::Rot, hit);
    s.tmp = 0;
    Partial::Damage
}

fn ad_ston(s: &mut Strike<'_>, ctx: &mut CombatCtx) -> Partial {
    if s.magr.state.cancelled {
        return Partial::Damage;
    }
    s.tmp = 0;
    if s.mdef.is_you {
        if !s.mdef.resists_ston() && s.mdef.status.start(Status::Stoning, STONING_TURNS) {
            ctx.message(MsgChannel::BadForPlayer, "You are slowing down.");
        }
    } else if s.mdef.pm.poly_when_stoned() || !s.mdef.resists_ston() {
        s.followup = Some(Followup::KillDefender(DeathCause::Stoned));
    }
    Partial::Damage
}

fn ad_tlpt(s: &mut Strike<'_>, _ctx: &mut CombatCtx) -> Partial {
    if !s.cancelled && s.tmp < s.mdef.hp {
        s.followup = Some(Followup::TeleportDefender);
    }
    Partial::Damage
}

fn ad_slee(s: &mut Strike<'_>, ctx: &mut CombatCtx) -> Partial {
    if !s.cancelled && !s.mdef.state.sleeping && !s.mdef.resists_sleep() {
        let turns = ctx.rng.rnd(10) as u16;
        s.mdef.status.extend(Status::Paralysis, turns);
        let by = s.magr.display_name();
        s.about_def(ctx, format!("{} is put to sleep by {by}.", s.def_name()));
    }
    Partial::Damage
}

fn ad_plys(s: &mut Strike<'_>, ctx: &mut CombatCtx) -> Partial {
    if !s.cancelled && s.mdef.can_move() {
        let by = s.magr.display_name();
        if s.mdef.has_free_action() {
            s.about_def(ctx, format!("{} momentarily stiffens.", s.def_name()));
        } else {
            let turns = ctx.rng.rnd(10) as u16;
            s.mdef.status.set(Status::Paralysis, turns);
            s.about_def(ctx, format!("{} is frozen by {by}.", s.def_name()));
        }
    }
    Partial::Damage
}

fn ad_slow(s: &mut Strike<'_>, ctx: &mut CombatCtx) -> Partial {
    if !s.cancelled && !s.mdef.status.has(Status::Slow) {
        let turns = effect_turns(s.tmp, ctx);
        s.mdef.status.set(Status::Slow, turns);
        s.about_def(ctx, format!("{} slows down.", s.def_name()));
    }
    Partial::Damage
}

fn ad_conf(s: &mut Strike<'_>, ctx: &mut CombatCtx) -> Partial {
    if !s.magr.state.cancelled && !s.mdef.is_confused() && s.magr.spec_used == 0 {
        let turns = effect_turns(s.tmp, ctx);
        s.mdef.status.set(Status::Confusion, turns);
        s.about_def(ctx, format!("{} looks confused.", s.def_name()));
    }
    Partial::Damage
}

fn ad_blnd(s: &mut Strike<'_>, ctx: &mut CombatCtx) -> Partial {
    if can_blind(s.magr, s.mdef, s.mattk.attack_type) {
        if s.mdef.can_see() {
            s.about_def(ctx, format!("{} is blinded.", s.def_name()));
        }
        let rolled = ctx.rng.dice(s.mattk.dice_num as u32, s.mattk.dice_sides as u32) as u16;
        let turns = s.mdef.status.get(Status::Blind).saturating_add(rolled).min(127);
        s.mdef.status.set(Status::Blind, turns.max(1));
    }
    s.tmp = 0;
    Partial::Damage
}

fn ad_halu(s: &mut Strike<'_>, ctx: &mut CombatCtx) -> Partial {
    if !s.magr.state.cancelled && s.mdef.can_see() {
        let turns = effect_turns(s.tmp, ctx);
        if s.mdef.is_you {
            s.mdef.status.extend(Status::Hallucination, turns);
            ctx.message(MsgChannel::BadForPlayer, "Oh wow!  Everything looks so cosmic!");
        } else {
            let more = if s.mdef.is_confused() { "more " } else { "" };
            s.mdef.status.extend(Status::Confusion, turns);
            s.about_def(ctx, format!("{} looks {more}confused.", s.def_name()));
        }
    }
    s.tmp = 0;
    Partial::Damage
}

fn ad_curs(s: &mut Strike<'_>, ctx: &mut CombatCtx) -> Partial {
    // gremlins only curse at night
    if !ctx.night && s.magr.pm == PmId::Gremlin {
        return Partial::Damage;
    }
    if s.magr.state.cancelled || ctx.rng.rn2(10) != 0 {
        return Partial::Damage;
    }
    s.mdef.state.cancelled = true;
    if s.mdef.pm == PmId::ClayGolem {
        let whose = s.mdef.possessive_name();
        s.about_def(ctx, format!("Some writing vanishes from {whose} head!"));
        s.about_def(ctx, format!("{} is destroyed!", s.def_name()));
        s.tmp = 0;
        s.followup = Some(Followup::KillDefender(DeathCause::Killed));
        return Partial::Damage;
    }
    if ctx.vis.agr {
        s.about_agr(ctx, format!("{} chuckles.", s.magr.monnam()));
    } else if ctx.config.verbose_noises {
        ctx.neutral("You hear laughter.");
    }
    Partial::Damage
}

/// Nymphs vanish after a theft
fn flees_after_theft(mon: &Monster) -> bool {
    mon.data().has_damage_type(DamageType::Seduce) || mon.data().has_damage_type(DamageType::StealGold)
}

fn ad_sgld(s: &mut Strike<'_>, ctx: &mut CombatCtx) -> Partial {
    s.tmp = 0;
    if s.magr.state.cancelled {
        return Partial::Damage;
    }
    let Some(gold) = s.mdef.take_gold() else {
        return Partial::Damage;
    };
    s.magr.add_to_inventory(gold);
    let text = format!("{} steals some gold from {}.", s.magr.monnam(), s.mdef.display_name());
    s.about_agr(ctx, text);
    if flees_after_theft(s.magr) {
        s.followup = Some(Followup::TeleportAttacker);
    }
    Partial::Damage
}

fn ad_sitm(s: &mut Strike<'_>, ctx: &mut CombatCtx) -> Partial {
    s.tmp = 0;
    if s.magr.state.cancelled {
        return Partial::Damage;
    }
    // pets leave cursed items alone
    let tame = s.magr.state.tame;
    let stealable: Vec<usize> = (0..s.mdef.inventory.len())
        .filter(|&i| !tame || !s.mdef.inventory[i].is_cursed())
        .collect();
    let Some(&idx) = ctx.rng.choose(&stealable) else {
        return Partial::Damage;
    };
    let mut obj = s.mdef.inventory.remove(idx);
    obj.worn_mask = 0;
    let name = obj.name();
    s.magr.add_to_inventory(obj);
    let text = format!("{} steals a {name} from {}!", s.magr.monnam(), s.mdef.display_name());
    s.about_agr(ctx, text);
    if flees_after_theft(s.magr) {
        s.followup = Some(Followup::TeleportAttacker);
    }
    Partial::Damage
}

fn ad_dren(s: &mut Strike<'_>, ctx: &mut CombatCtx) -> Partial {
    if !s.cancelled && ctx.rng.rn2(4) == 0 {
        let data = s.mdef.data();
        let caster = data.attack_of_type(AttackType::Magic).is_some()
            || data.attack_of_type(AttackType::Breath).is_some();
        if s.mdef.spec_used < 20 && caster {
            let drained = ctx.rng.dice(2, 2) as u8;
            s.mdef.spec_used = s.mdef.spec_used.saturating_add(drained);
            s.about_def(ctx, format!("{} seems lethargic.", s.def_name()));
        }
    }
    s.tmp = 0;
    Partial::Damage
}

fn ad_drli(s: &mut Strike<'_>, ctx: &mut CombatCtx) -> Partial {
    if !s.cancelled && ctx.rng.rn2(3) == 0 && !resists_drain(s.mdef) {
        s.tmp = ctx.rng.dice(2, 6) as i32;
        s.about_def(ctx, format!("{} suddenly seems weaker!", s.def_name()));
        s.mdef.hp_max = (s.mdef.hp_max - s.tmp).max(1);
        if s.mdef.level == 0 {
            // drained past level 0
            s.tmp = s.mdef.hp;
        } else {
            s.mdef.level -= 1;
        }
    }
    Partial::Damage
}

fn ad_drst(s: &mut Strike<'_>, ctx: &mut CombatCtx) -> Partial {
    if s.cancelled || ctx.rng.rn2(8) != 0 {
        return Partial::Damage;
    }
    let what = match s.mattk.attack_type {
        AttackType::Weapon => "weapon",
        AttackType::Bite => "bite",
        AttackType::Sting => "sting",
        _ => "attack",
    };
    s.about_agr(ctx, format!("{} {what} was poisoned!", s.magr.possessive_monnam()));
    if s.mdef.resists_poison() {
        s.about_def(ctx, format!("The poison doesn't seem to affect {}.", s.mdef.display_name()));
    } else if ctx.rng.rn2(10) != 0 {
        s.tmp += ctx.rng.rn1(10, 6) as i32;
    } else {
        s.about_def(ctx, "The poison was deadly...".to_string());
        s.tmp = s.mdef.hp;
    }
    Partial::Damage
}

fn ad_drin(s: &mut Strike<'_>, ctx: &mut CombatCtx) -> Partial {
    if s.mdef.data().has_no_head() {
        s.about_def(ctx, format!("{} doesn't seem harmed.", s.def_name()));
        s.tmp = 0;
        return Partial::Damage;
    }
    if s.mdef.worn_in_slot(W_ARMH).is_some() && ctx.rng.rn2(8) != 0 {
        let text = format!(
            "{} helmet blocks {} attack to {} head.",
            s.mdef.possessive_monnam(),
            s.magr.possessive_name(),
            s.mdef.possessive()
        );
        s.about_def(ctx, text);
        return Partial::Damage;
    }
    s.about_def(ctx, format!("{} brain is eaten!", s.mdef.possessive_monnam()));
    if s.mdef.data().is_mindless() {
        s.about_def(ctx, format!("{} doesn't notice.", s.def_name()));
        return Partial::Done(MmResult::MISS);
    }
    s.tmp += ctx.rng.rnd(10) as i32;
    if s.magr.state.tame {
        s.magr.status.clear(Status::Confusion);
    }
    if s.tmp >= s.mdef.hp {
        s.about_def(ctx, format!("{} last thought fades away...", s.mdef.possessive_monnam()));
    }
    Partial::Damage
}

fn ad_slim(s: &mut Strike<'_>, ctx: &mut CombatCtx) -> Partial {
    if s.cancelled {
        return Partial::Damage;
    }
    if ctx.rng.rn2(4) == 0 && !slimeproof(s.mdef) {
        if s.mdef.is_you {
            if s.mdef.status.start(Status::Sliming, SLIMING_TURNS) {
                ctx.message(MsgChannel::BadForPlayer, "You don't feel very well.");
            }
        } else {
            s.about_def(ctx, format!("{} turns into a green slime!", s.def_name()));
            s.mdef.polymorph_into(PmId::GreenSlime);
        }
        s.tmp = 0;
    }
    Partial::Damage
}

fn ad_stck(s: &mut Strike<'_>, _ctx: &mut CombatCtx) -> Partial {
    if s.cancelled {
        s.tmp = 0;
    }
    Partial::Damage
}

fn ad_wrap(s: &mut Strike<'_>, _ctx: &mut CombatCtx) -> Partial {
    // monsters cannot grab one another
    if s.magr.state.cancelled {
        s.tmp = 0;
    }
    Partial::Damage
}

fn ad_ench(_s: &mut Strike<'_>, _ctx: &mut CombatCtx) -> Partial {
    Partial::Damage
}

fn ad_dgst(s: &mut Strike<'_>, ctx: &mut CombatCtx) -> Partial {
    if s.mdef.has_slow_digestion() {
        return Partial::Done(MmResult::HIT.expelled());
    }
    if ctx.config.verbose_noises {
        ctx.neutral("\"Burrrrp!\"");
    }
    s.tmp = s.mdef.hp;
    // nothing survives being digested
    if let Some(idx) = s.mdef.life_saver() {
        s.mdef.inventory.remove(idx);
    }
    Partial::Damage
}

fn ad_zomb(s: &mut Strike<'_>, ctx: &mut CombatCtx) -> Partial {
    let partial = ad_phys(s, ctx);
    if !s.cancelled
        && s.mdef.pm.zombie_form().is_some()
        && s.tmp < s.mdef.hp
        && ctx.rng.rn2(4) == 0
        && s.mdef.status.start(Status::Zombifying, ZOMBIFY_TURNS)
    {
        s.about_def(ctx, format!("{} looks feverish.", s.def_name()));
    }
    partial
}

fn ad_magm(s: &mut Strike<'_>, ctx: &mut CombatCtx) -> Partial {
    if s.mdef.resists_magm() {
        s.about_def(ctx, "The missiles bounce off!".to_string());
        s.tmp = 0;
    }
    Partial::Damage
}

fn ad_disn(s: &mut Strike<'_>, ctx: &mut CombatCtx) -> Partial {
    s.tmp = 0;
    if s.mdef.resists_disint() {
        s.about_def(ctx, format!("{} is not disintegrated.", s.def_name()));
        return Partial::Damage;
    }
    if let Some(idx) = s.mdef.inventory.iter().position(|o| o.worn_mask & W_ARMS != 0) {
        let shield = s.mdef.inventory.remove(idx);
        s.about_def(ctx, format!("{} {} crumbles away!", s.mdef.possessive_monnam(), shield.name()));
        return Partial::Damage;
    }
    s.followup = Some(Followup::KillDefender(DeathCause::Disintegrated));
    Partial::Damage
}

fn ad_none(s: &mut Strike<'_>, _ctx: &mut CombatCtx) -> Partial {
    s.tmp = 0;
    Partial::Damage
}
