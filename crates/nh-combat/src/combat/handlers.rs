//! Gaze, engulf, explosion, breath and spit attacks between monsters
//!
//! Each of these wraps the single-attack resolver with the extra
//! bookkeeping its attack category needs: eye contact and reflection for
//! gazes, moving both monsters around for engulfing, the attacker's own
//! death for explosions, and the line-up and cooldown checks for ranged
//! attacks.

use tracing::debug;

use super::context::CombatCtx;
use super::mdamagem::{mdamagem, stone_attacker};
use super::mhitm::{heard_from_afar, noises};
use super::{Attack, AttackType, DamageType, MmResult, MsgChannel, find_mac};
use crate::dungeon::{Level, Pos};
use crate::error::CombatError;
use crate::monster::lifecycle::monkilled;
use crate::monster::{DeathCause, DeathOutcome, MonsterId};
use crate::object::Object;
use crate::rng::GameRng;
use crate::{BREATH_COOLDOWN_BASE, BREATH_COOLDOWN_RANGE};

/// Breath types a random breather picks from, in AD_* order
const BREATH_TYPES: [DamageType; 8] = [
    DamageType::MagicMissile,
    DamageType::Fire,
    DamageType::Cold,
    DamageType::Sleep,
    DamageType::Disintegrate,
    DamageType::Electric,
    DamageType::DrainStrength,
    DamageType::Acid,
];

/// Venom a spitting monster can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Venom {
    Blinding,
    Acid,
}

impl Venom {
    fn of(ad: DamageType) -> Option<Self> {
        match ad {
            DamageType::Blind | DamageType::DrainStrength => Some(Venom::Blinding),
            DamageType::Acid => Some(Venom::Acid),
            _ => None,
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Venom::Blinding => "blinding venom",
            Venom::Acid => "acid venom",
        }
    }

    /// The splash as an attack for the resolver
    const fn splash(self) -> Attack {
        match self {
            Venom::Blinding => Attack::new(AttackType::Spit, DamageType::Blind, 1, 25),
            Venom::Acid => Attack::new(AttackType::Spit, DamageType::Acid, 2, 6),
        }
    }
}

/// Whether a beam hits a target of armor class `ac` (zap_hit in C)
///
/// Even a naked target has a small chance to dodge, and very negative
/// armor class only helps by a random amount.
pub fn zap_hit(ac: i32, rng: &mut GameRng) -> bool {
    let chance = rng.rn2(20) as i32;
    if chance == 0 {
        return (rng.rnd(10) as i32) < ac;
    }
    let ac = if ac >= 0 { ac } else { -(rng.rnd(ac.unsigned_abs()) as i32) };
    3 - chance < ac
}

/// Positions of two distinct living combatants, or a diagnostic
fn combatants(level: &Level, agr: MonsterId, def: MonsterId, ctx: &mut CombatCtx) -> Option<(Pos, Pos)> {
    if agr == def {
        ctx.impossible(CombatError::SameCombatant(agr));
        return None;
    }
    let (magr, mdef) = match (level.monster(agr), level.monster(def)) {
        (Some(a), Some(d)) => (a, d),
        (None, _) => {
            ctx.impossible(CombatError::MissingCombatant(agr));
            return None;
        }
        (_, None) => {
            ctx.impossible(CombatError::MissingCombatant(def));
            return None;
        }
    };
    if !magr.is_alive() || !mdef.is_alive() {
        let dead = if magr.is_alive() { def } else { agr };
        ctx.impossible(CombatError::DeadCombatant(dead));
        return None;
    }
    ctx.observe(magr, mdef);
    Some((magr.pos, mdef.pos))
}

/// Put `id` back on the map at `pos`, or as near to it as possible
fn put_back(level: &mut Level, id: MonsterId, pos: Pos, ctx: &mut CombatCtx) {
    let spot = if level.goodpos(pos) { Some(pos) } else { level.enexto(pos, &mut ctx.rng) };
    match spot {
        Some(spot) => {
            if let Err(err) = level.place_monster(id, spot) {
                ctx.impossible(err);
            }
            ctx.observer.newsym(spot);
        }
        None => debug!(monster = %id, "no room to put monster back"),
    }
}

/// A gaze attack (gazemm in C)
///
/// Needs eye contact both ways. A petrifying gaze can be reflected back
/// and forth up to `gaze_bounce_limit` times; a gaze that comes back to
/// an attacker without reflection stones it.
pub fn gazemm(level: &mut Level, agr: MonsterId, def: MonsterId, mattk: Attack, ctx: &mut CombatCtx) -> MmResult {
    let Some((apos, dpos)) = combatants(level, agr, def, ctx) else {
        return MmResult::MISS;
    };
    let in_view = level.has_line_of_sight(apos, dpos);
    let (Some(magr), Some(mdef)) = (level.monster(agr), level.monster(def)) else {
        return MmResult::MISS;
    };
    if ctx.vis.agr {
        let target = if ctx.vis.def { mdef.display_name() } else { "something".to_string() };
        ctx.combat_message(magr, mdef, true, format!("{} gazes at {target}...", magr.monnam()));
    }
    let eye_contact = in_view
        && !magr.state.cancelled
        && !magr.state.invisible
        && magr.can_see()
        && mdef.can_see()
        && !mdef.state.sleeping;
    if !eye_contact {
        if ctx.vis.def {
            ctx.neutral("But nothing happens.");
        }
        return MmResult::MISS;
    }

    if mattk.damage_type == DamageType::Stone {
        let mut bounces = 0;
        let mut meets_gaze = def;
        while let Some(mon) = level.monster(meets_gaze).filter(|m| m.has_reflection()) {
            if ctx.vis.any() {
                let item = mon.reflector().map(Object::name).unwrap_or("armor");
                ctx.neutral(format!("The gaze is reflected away by {} {item}.", mon.possessive_name()));
            }
            bounces += 1;
            if bounces >= ctx.config.gaze_bounce_limit {
                return MmResult::MISS;
            }
            meets_gaze = if meets_gaze == def { agr } else { def };
        }
        if meets_gaze == agr {
            let (Some(magr), Some(mdef)) = (level.monster(agr), level.monster(def)) else {
                return MmResult::MISS;
            };
            // the reflection off an invisible monster goes unseen
            if mdef.state.invisible {
                if ctx.vis.agr {
                    ctx.neutral(format!(
                        "{} doesn't seem to notice that {} gaze was reflected.",
                        magr.monnam(),
                        magr.possessive()
                    ));
                }
                return MmResult::MISS;
            }
            debug!(attacker = %agr, bounces, "gaze reflected back");
            return stone_attacker(level, agr, ctx);
        }
    }
    mdamagem(level, agr, def, mattk, ctx)
}

/// An engulfing attack (gulpmm in C)
///
/// The attacker moves onto the defender's square while the defender is
/// taken off the map. Afterwards a survivor keeps that square; if both
/// live the defender is let out and the attacker goes back where it was.
pub fn gulpmm(level: &mut Level, agr: MonsterId, def: MonsterId, mattk: Attack, ctx: &mut CombatCtx) -> MmResult {
    let Some((apos, dpos)) = combatants(level, agr, def, ctx) else {
        return MmResult::MISS;
    };
    let (Some(magr), Some(mdef)) = (level.monster(agr), level.monster(def)) else {
        return MmResult::MISS;
    };
    if mdef.data().is_huge() {
        return MmResult::MISS;
    }
    if ctx.vis.any() {
        ctx.combat_message(magr, mdef, true, format!("{} swallows {}.", magr.monnam(), mdef.display_name()));
    }

    level.remove_from_map(def);
    if let Err(err) = level.relocate(agr, dpos) {
        ctx.impossible(err);
        put_back(level, def, dpos, ctx);
        return MmResult::MISS;
    }
    ctx.observer.newsym(apos);
    ctx.observer.newsym(dpos);

    let res = mdamagem(level, agr, def, mattk, ctx);
    debug!(attacker = %agr, defender = %def, ?res, "engulf resolved");
    match (res.agr_died, res.def_died) {
        (true, true) => {}
        (false, true) => {
            if !level.is_on_map(agr) {
                put_back(level, agr, dpos, ctx);
            }
        }
        (true, false) => {
            if !level.is_on_map(def) {
                put_back(level, def, dpos, ctx);
            }
        }
        (false, false) => {
            if let (Some(magr), Some(mdef)) = (level.monster(agr), level.monster(def)) {
                if ctx.vis.any() {
                    let text = if res.expelled {
                        format!("{} is regurgitated!", mdef.monnam())
                    } else {
                        format!("{} expels {}!", magr.monnam(), mdef.display_name())
                    };
                    ctx.neutral(text);
                }
            }
            // a thief may have teleported away while inside
            let still_inside = level.is_on_map(agr) && level.monster(agr).is_some_and(|m| m.pos == dpos);
            if still_inside {
                level.remove_from_map(agr);
                put_back(level, agr, apos, ctx);
            }
            if !level.is_on_map(def) {
                put_back(level, def, dpos, ctx);
            }
        }
    }
    res
}

/// A self-destructing explosion (explmm in C)
///
/// A cancelled monster cannot explode. Otherwise the attacker dies
/// whatever happened to the defender, unless it was life-saved.
pub fn explmm(level: &mut Level, agr: MonsterId, def: MonsterId, mattk: Attack, ctx: &mut CombatCtx) -> MmResult {
    let Some((apos, _)) = combatants(level, agr, def, ctx) else {
        return MmResult::MISS;
    };
    let Some(magr) = level.monster(agr) else {
        return MmResult::MISS;
    };
    if magr.state.cancelled {
        return MmResult::MISS;
    }
    let tame = magr.state.tame;
    if ctx.vis.agr {
        ctx.neutral(format!("{} explodes!", magr.monnam()));
    } else {
        let far = heard_from_afar(level, apos);
        noises(magr, mattk, far, ctx);
    }

    let mut res = mdamagem(level, agr, def, mattk, ctx);
    if !res.agr_died {
        let alive = level.monster(agr).is_some_and(|m| !m.state.dead);
        if alive {
            match monkilled(level, agr, DeathCause::Exploded, ctx) {
                DeathOutcome::Died => res.agr_died = true,
                DeathOutcome::LifeSaved => return res.merge(MmResult::MISS.with_life_saved()),
                DeathOutcome::Transformed => return res,
            }
        }
    }
    if tame {
        ctx.message(
            MsgChannel::BadForPlayer,
            "You have a melancholy feeling for a moment, then it passes.",
        );
    }
    res
}

/// A breath weapon fired at another monster (breamm in C)
///
/// The breather has to be lined up with its target within bolt range,
/// and it needs some rest between breaths.
pub fn breamm(level: &mut Level, agr: MonsterId, mattk: Attack, def: MonsterId, ctx: &mut CombatCtx) -> MmResult {
    let Some((apos, dpos)) = combatants(level, agr, def, ctx) else {
        return MmResult::MISS;
    };
    if level.lined_up(apos, dpos, ctx.config.bolt_range).is_none() {
        return MmResult::MISS;
    }
    let Some((magr, mdef)) = level.pair_mut(agr, def) else {
        return MmResult::MISS;
    };
    if magr.state.cancelled {
        if ctx.vis.agr {
            ctx.neutral(format!("{} coughs.", magr.monnam()));
        } else {
            ctx.neutral("You hear a cough.");
        }
        return MmResult::MISS;
    }
    if magr.spec_used != 0 || ctx.rng.rn2(3) == 0 {
        return MmResult::MISS;
    }

    let typ = match mattk.damage_type {
        DamageType::RandomBreath => BREATH_TYPES[ctx.rng.rn2(BREATH_TYPES.len() as u32) as usize],
        other => other,
    };
    let (Some(breath), Some(beam)) = (typ.breath_name(), typ.blast_name()) else {
        ctx.impossible(CombatError::UnknownDamageType(typ));
        return MmResult::MISS;
    };
    if ctx.vis.agr {
        ctx.neutral(format!("{} breathes {breath}!", magr.monnam()));
    }
    // breath runs out sometimes
    if ctx.rng.rn2(3) == 0 {
        magr.spec_used = BREATH_COOLDOWN_BASE + ctx.rng.rn2(BREATH_COOLDOWN_RANGE) as u8;
    }
    debug!(attacker = %agr, defender = %def, breath = %typ, cooldown = magr.spec_used, "breath");

    if mdef.has_reflection() {
        if ctx.vis.def {
            let item = mdef.reflector().map(Object::name).unwrap_or("armor");
            ctx.neutral(format!("But it reflects from {} {item}!", mdef.possessive_name()));
        }
        return MmResult::MISS;
    }
    if !zap_hit(find_mac(mdef), &mut ctx.rng) {
        if ctx.vis.def {
            ctx.neutral(format!("The {beam} misses {}.", mdef.display_name()));
        }
        return MmResult::MISS;
    }
    if ctx.vis.def {
        ctx.neutral(format!("The {beam} hits {}.", mdef.display_name()));
    }
    let blast = Attack::new(AttackType::Breath, typ, mattk.dice_num, 6);
    mdamagem(level, agr, def, blast, ctx).merge(MmResult::HIT)
}

/// Venom spat at another monster (spitmm in C)
///
/// Only blinding and acid venom exist; the closer the target, the more
/// likely the spitter bothers.
pub fn spitmm(level: &mut Level, agr: MonsterId, mattk: Attack, def: MonsterId, ctx: &mut CombatCtx) -> MmResult {
    let Some((apos, dpos)) = combatants(level, agr, def, ctx) else {
        return MmResult::MISS;
    };
    let (Some(magr), Some(mdef)) = (level.monster(agr), level.monster(def)) else {
        return MmResult::MISS;
    };
    if magr.state.cancelled {
        ctx.neutral(format!("A dry rattle comes from {} throat.", magr.possessive_name()));
        return MmResult::MISS;
    }
    let Some(venom) = Venom::of(mattk.damage_type) else {
        debug!(attacker = %agr, damage_type = %mattk.damage_type, "nothing to spit");
        return MmResult::MISS;
    };
    if level.lined_up(apos, dpos, ctx.config.bolt_range).is_none() {
        return MmResult::MISS;
    }
    let odds = (ctx.config.bolt_range - apos.distmin(dpos)).max(1) as u32;
    if ctx.rng.rn2(odds) != 0 {
        return MmResult::MISS;
    }
    if ctx.vis.agr {
        ctx.neutral(format!("{} spits venom!", magr.monnam()));
    }
    if !zap_hit(find_mac(mdef), &mut ctx.rng) {
        if ctx.vis.def {
            ctx.neutral(format!("The {} misses {}.", venom.name(), mdef.display_name()));
        }
        return MmResult::MISS;
    }
    if ctx.vis.def {
        ctx.neutral(format!("The {} hits {}.", venom.name(), mdef.display_name()));
    }
    mdamagem(level, agr, def, venom.splash(), ctx).merge(MmResult::HIT)
}
