//! Monster attacks monster combat (mhitm.c)
//!
//! `mattackm` runs one monster's whole attack sequence against another,
//! slot by slot, handing each connected attack to the resolver or to the
//! gaze/engulf/explode/breath/spit handlers and letting the defender's
//! passive defense answer after every slot.

use tracing::debug;

use super::context::CombatCtx;
use super::handlers::{breamm, explmm, gazemm, gulpmm, spitmm};
use super::mdamagem::mdamagem;
use super::passive::passivemm;
use super::{Attack, AttackType, DamageType, MmResult, find_mac};
use crate::dungeon::{Level, Pos};
use crate::error::CombatError;
use crate::monster::{Monster, MonsterFlags, MonsterId, PmId};
use crate::object::{Object, ObjectType};

/// May attack other monsters (mfndpos flag)
pub const ALLOW_M: u32 = 0x0008_0000;
/// May attack tame monsters (mfndpos flag)
pub const ALLOW_TM: u32 = 0x0010_0000;

/// Squared distance from the hero beyond which noises are "in the distance"
const FAR_NOISE_DIST2: i32 = 15;

/// Turns between two noise messages from the same distance
const NOISE_INTERVAL: u64 = 10;

/// Outcome of a full attack sequence with the result of every slot that
/// was evaluated, in order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttackReport {
    pub outcome: MmResult,
    /// One entry per evaluated slot; the sequence stops after a death
    pub slots: Vec<(AttackType, MmResult)>,
}

/// What one attack slot did
#[derive(Debug, Clone, Copy)]
struct SlotResult {
    res: MmResult,
    /// The attack connected (for passive retaliation)
    strike: bool,
    /// An attack was actually made, so the defender may retaliate
    attempted: bool,
    /// Delivered with a wielded weapon
    weapon_hit: bool,
}

impl SlotResult {
    const SKIPPED: Self = Self {
        res: MmResult::MISS,
        strike: false,
        attempted: false,
        weapon_hit: false,
    };

    const fn attempted(res: MmResult, strike: bool) -> Self {
        Self {
            res,
            strike,
            attempted: true,
            weapon_hit: false,
        }
    }
}

/// Damage bonus of a strong monster, by level
pub fn m_dbon(mon: &Monster) -> i32 {
    if !mon.data().is_strong() {
        return 0;
    }
    match mon.level {
        0..=5 => 1,
        6..=11 => 2,
        _ => 3,
    }
}

/// Innate hostility between two species (mm_aggression in C)
///
/// Purple worms go after shriekers, and zombies after anything that
/// would rise as one of them.
pub fn mm_aggression(magr: &Monster, mdef: &Monster) -> u32 {
    if magr.pm == PmId::PurpleWorm && mdef.pm == PmId::Shrieker {
        return ALLOW_M | ALLOW_TM;
    }
    if magr.pm.is_zombie() && mdef.pm.zombie_form().is_some() {
        return ALLOW_M | ALLOW_TM;
    }
    0
}

/// Whether `magr` picks a fight with `mdef` on its own
fn hostile_towards(magr: &Monster, mdef: &Monster) -> bool {
    if mdef.is_you || !mdef.is_alive() {
        return false;
    }
    if mm_aggression(magr, mdef) != 0 {
        return true;
    }
    let friendly = magr.state.tame || magr.is_you;
    let pet_vs_hostile = friendly && !mdef.state.tame && !mdef.state.peaceful;
    let hostile_vs_pet = !friendly && !magr.state.peaceful && mdef.state.tame;
    pet_vs_hostile || hostile_vs_pet
}

/// A monster attacks the first adjacent monster it is hostile towards
/// (fightm in C)
///
/// A defender that was hit and survived may strike back once. Returns
/// `None` when there was nobody to fight.
pub fn fightm(level: &mut Level, agr: MonsterId, ctx: &mut CombatCtx) -> Option<MmResult> {
    let magr = level.monster(agr)?;
    if !magr.is_alive() || !magr.can_move() || !level.is_on_map(agr) {
        return None;
    }
    let pos = magr.pos;
    let target = level.living_ids().into_iter().filter(|&id| id != agr).find(|&id| {
        level.is_on_map(id)
            && level
                .monster(id)
                .is_some_and(|m| m.pos.distmin(pos) <= 1 && hostile_towards(magr, m))
    })?;

    let result = mattackm(level, agr, target, ctx);
    if result.agr_died || result.def_died || !result.hit {
        return Some(result);
    }
    // the victim may answer if it has not acted yet this turn
    if ctx.rng.rn2(4) != 0 {
        let answers = match level.monster_mut(target) {
            Some(m) if m.is_alive() && !m.state.moved && m.can_move() => {
                m.state.moved = true;
                true
            }
            _ => false,
        };
        if answers {
            debug!(attacker = %target, defender = %agr, "return attack");
            mattackm(level, target, agr, ctx);
        }
    }
    Some(result)
}

/// Run `agr`'s attack sequence against `def` (mattackm in C)
///
/// Slots are tried in species order. The sequence stops as soon as
/// either side dies or the attacker can no longer move; otherwise the
/// result is a hit if any slot hit.
pub fn mattackm(level: &mut Level, agr: MonsterId, def: MonsterId, ctx: &mut CombatCtx) -> MmResult {
    mattackm_report(level, agr, def, ctx).outcome
}

/// [`mattackm`], also reporting what each evaluated slot did
pub fn mattackm_report(level: &mut Level, agr: MonsterId, def: MonsterId, ctx: &mut CombatCtx) -> AttackReport {
    let mut report = AttackReport::default();
    let Some((magr, mdef)) = level.pair_mut(agr, def) else {
        let err = if agr == def {
            CombatError::SameCombatant(agr)
        } else if level.monster(agr).is_none() {
            CombatError::MissingCombatant(agr)
        } else {
            CombatError::MissingCombatant(def)
        };
        ctx.impossible(err);
        return report;
    };
    if !magr.is_alive() || !mdef.is_alive() {
        let dead = if magr.is_alive() { def } else { agr };
        ctx.impossible(CombatError::DeadCombatant(dead));
        return report;
    }
    if !magr.can_move() {
        return report;
    }
    // grid bugs cannot attack at an angle
    if magr.pm == PmId::GridBug && magr.pos.x != mdef.pos.x && magr.pos.y != mdef.pos.y {
        return report;
    }

    let mut tmp = find_mac(mdef) + magr.level as i32;
    if mdef.is_helpless() {
        tmp += ctx.config.helpless_to_hit_bonus;
        mdef.wake_up();
    }
    if magr.pm.racial_enemy_of(mdef.pm) {
        tmp += 1;
    }
    ctx.observe(magr, mdef);
    magr.state.moved = true;
    let attacks = magr.attacks;

    for (i, mattk) in attacks.into_iter().enumerate() {
        let prev: Vec<MmResult> = report.slots.iter().map(|(_, r)| *r).collect();
        let mut slot = attack_slot(level, agr, def, i, mattk, tmp, &prev, ctx);
        if slot.attempted && !slot.res.agr_died && adjacent(level, agr, def) {
            let retaliation = passivemm(level, agr, def, slot.strike, slot.res.def_died, slot.weapon_hit, ctx);
            slot.res = slot.res.merge(retaliation);
        }
        debug!(slot = i, attack_type = %mattk.attack_type, strike = slot.strike, res = ?slot.res, "slot done");
        report.slots.push((mattk.attack_type, slot.res));
        report.outcome = report.outcome.merge(slot.res);
        if slot.res.is_terminal() {
            return report;
        }
        let still_able = level.monster(agr).is_some_and(|m| m.is_alive() && m.can_move());
        if !still_able {
            return report;
        }
    }
    report
}

fn adjacent(level: &Level, a: MonsterId, b: MonsterId) -> bool {
    match (level.monster(a), level.monster(b)) {
        (Some(ma), Some(mb)) => ma.pos.distmin(mb.pos) <= 1,
        _ => false,
    }
}

/// Evaluate attack slot `i`
#[allow(clippy::too_many_arguments)]
fn attack_slot(
    level: &mut Level,
    agr: MonsterId,
    def: MonsterId,
    i: usize,
    mattk: Attack,
    tmp: i32,
    prev: &[MmResult],
    ctx: &mut CombatCtx,
) -> SlotResult {
    let Some((magr, mdef)) = level.pair_mut(agr, def) else {
        return SlotResult::SKIPPED;
    };
    if !magr.is_alive() || !mdef.is_alive() {
        return SlotResult::SKIPPED;
    }
    let near = magr.pos.distmin(mdef.pos) <= 1;
    // a thief that already teleported away, or a ranged weapon slot
    if mattk.attack_type.is_melee() && !near {
        return SlotResult::SKIPPED;
    }
    let roll_cap = 20 + i as u32;

    match mattk.attack_type {
        AttackType::Weapon
        | AttackType::Claw
        | AttackType::Kick
        | AttackType::Bite
        | AttackType::Sting
        | AttackType::Touch
        | AttackType::Butt
        | AttackType::Tentacle => {
            let armed = magr.wielded().is_some();
            let mut to_hit = tmp;
            if mattk.attack_type == AttackType::Weapon {
                if let Some(weapon) = magr.wielded() {
                    to_hit += weapon.hit_value();
                    mswingsm(magr, mdef, weapon, ctx);
                }
            } else if armed && !magr.is_confused() && mdef.pm.touch_petrifies() {
                // armed monsters know better than to touch a cockatrice
                return SlotResult::attempted(MmResult::MISS, false);
            }
            let dieroll = ctx.rng.rnd(roll_cap) as i32;
            let strike = to_hit > dieroll;
            debug!(slot = i, attack_type = %mattk.attack_type, to_hit, dieroll, strike, "melee roll");
            let res = if strike {
                hitmm(level, agr, def, mattk, ctx)
            } else {
                missmm(level, agr, def, mattk, ctx);
                MmResult::MISS
            };
            SlotResult {
                res,
                strike,
                attempted: true,
                weapon_hit: armed && mattk.attack_type == AttackType::Weapon,
            }
        }
        AttackType::Hug => {
            // automatic if the two previous attacks hit
            let strike = i >= 2 && prev[i - 1] == MmResult::HIT && prev[i - 2] == MmResult::HIT;
            let res = if strike { hitmm(level, agr, def, mattk, ctx) } else { MmResult::MISS };
            SlotResult::attempted(res, strike)
        }
        AttackType::Gaze => SlotResult::attempted(gazemm(level, agr, def, mattk, ctx), false),
        AttackType::Explode => {
            if !near {
                return SlotResult::SKIPPED;
            }
            let res = explmm(level, agr, def, mattk, ctx);
            if res.is_miss() && !res.life_saved {
                // cancelled, no explosion
                SlotResult::SKIPPED
            } else {
                SlotResult::attempted(res, true)
            }
        }
        AttackType::Engulf => {
            if !near {
                return SlotResult::SKIPPED;
            }
            let strike = tmp > ctx.rng.rnd(roll_cap) as i32;
            let res = if strike {
                gulpmm(level, agr, def, mattk, ctx)
            } else {
                missmm(level, agr, def, mattk, ctx);
                MmResult::MISS
            };
            SlotResult::attempted(res, strike)
        }
        AttackType::Breath | AttackType::Spit => {
            if magr.pos.dist2(mdef.pos) <= crate::MELEE_DIST2 {
                return SlotResult::attempted(MmResult::MISS, false);
            }
            let mut res = if mattk.attack_type == AttackType::Breath {
                breamm(level, agr, mattk, def, ctx)
            } else {
                spitmm(level, agr, mattk, def, ctx)
            };
            // a beam that was fired counts as a hit, but nothing touched
            if !res.is_miss() {
                res.hit = true;
            }
            SlotResult::attempted(res, false)
        }
        AttackType::None | AttackType::ExplodeOnDeath | AttackType::Magic => SlotResult::SKIPPED,
    }
}

/// Hero close enough that a fight out of sight is not "in the distance"
pub(super) fn heard_from_afar(level: &Level, pos: Pos) -> bool {
    level
        .monsters()
        .find(|m| m.is_you && m.is_alive())
        .is_none_or(|hero| hero.pos.dist2(pos) > FAR_NOISE_DIST2)
}

/// "You hear some noises" for a fight the player cannot see (noises in C)
pub fn noises(magr: &Monster, mattk: Attack, far: bool, ctx: &mut CombatCtx) {
    if !ctx.config.verbose_noises {
        return;
    }
    let recent = ctx.moves.saturating_sub(ctx.noise.noise_time) <= NOISE_INTERVAL;
    if far == ctx.noise.far_noise && recent {
        return;
    }
    ctx.noise.far_noise = far;
    ctx.noise.noise_time = ctx.moves;
    let what = if mattk.attack_type == AttackType::Explode {
        "an explosion"
    } else {
        "some noises"
    };
    let distance = if far { " in the distance" } else { "" };
    debug!(monster = %magr.id, far, "noise");
    ctx.neutral(format!("You hear {what}{distance}."));
}

fn gender(mon: &Monster) -> u8 {
    let data = mon.data();
    if data.has_flag(MonsterFlags::FEMALE) {
        1
    } else if data.has_flag(MonsterFlags::NEUTER) {
        2
    } else {
        0
    }
}

/// Whether a seduction attack charms instead of hurting (could_seduce in C)
///
/// 1 for the opposite sex, 2 for a nymph facing anyone else.
fn could_seduce(magr: &Monster, mdef: &Monster, mattk: Attack) -> u8 {
    let nymph = magr.pm == PmId::WaterNymph;
    let demon = magr.pm == PmId::Incubus && mattk.damage_type == DamageType::SeduceSpecial;
    if !nymph && !demon {
        return 0;
    }
    let (ga, gd) = (gender(magr), gender(mdef));
    if ga < 2 && gd < 2 && ga != gd {
        1
    } else if nymph {
        2
    } else {
        0
    }
}

/// Report a connected attack and resolve it (hitmm in C)
pub fn hitmm(level: &mut Level, agr: MonsterId, def: MonsterId, mattk: Attack, ctx: &mut CombatCtx) -> MmResult {
    if let (Some(magr), Some(mdef)) = (level.monster(agr), level.monster(def)) {
        if ctx.vis.any() {
            let target = mdef.display_name();
            let text = match could_seduce(magr, mdef, mattk) {
                n if n > 0 && !magr.state.cancelled => {
                    let verb = if mdef.can_see() { "smiles at" } else { "talks to" };
                    let how = if n == 2 { "engagingly" } else { "seductively" };
                    format!("{} {verb} {target} {how}.", magr.monnam())
                }
                _ => {
                    let who = if mattk.attack_type == AttackType::Tentacle {
                        magr.possessive_monnam()
                    } else {
                        magr.monnam()
                    };
                    format!("{who} {} {target}.", mattk.attack_type.verb())
                }
            };
            ctx.combat_message(magr, mdef, true, text);
        } else {
            let far = heard_from_afar(level, magr.pos);
            noises(magr, mattk, far, ctx);
        }
    }
    mdamagem(level, agr, def, mattk, ctx)
}

/// Report a missed attack (missmm in C)
pub fn missmm(level: &Level, agr: MonsterId, def: MonsterId, mattk: Attack, ctx: &mut CombatCtx) {
    let (Some(magr), Some(mdef)) = (level.monster(agr), level.monster(def)) else {
        return;
    };
    if ctx.vis.any() {
        let text = if could_seduce(magr, mdef, mattk) > 0 && !magr.state.cancelled {
            format!("{} pretends to be friendly to {}.", magr.monnam(), mdef.display_name())
        } else {
            format!("{} misses {}.", magr.monnam(), mdef.display_name())
        };
        ctx.combat_message(magr, mdef, false, text);
    } else {
        noises(magr, mattk, heard_from_afar(level, magr.pos), ctx);
    }
}

/// "The soldier swings his long sword at the jackal." (mswingsm in C)
pub fn mswingsm(magr: &Monster, mdef: &Monster, weapon: &Object, ctx: &mut CombatCtx) {
    if !ctx.vis.agr || magr.is_you {
        return;
    }
    let verb = match weapon.otyp {
        ObjectType::Dagger | ObjectType::ElvenDagger | ObjectType::OrcishDagger => "thrusts",
        _ => "swings",
    };
    let one_of = if weapon.quantity > 1 { "one of " } else { "" };
    let text = format!(
        "{} {verb} {one_of}{} {} at {}.",
        magr.monnam(),
        magr.possessive(),
        weapon.name(),
        mdef.display_name()
    );
    ctx.combat_message(magr, mdef, true, text);
}

/// One monster moves another out of its way by trading places
/// (mdisplacem in C)
///
/// Fails against the hero, anything bigger, and usually against a
/// trapped or sleeping monster.
pub fn mdisplacem(level: &mut Level, agr: MonsterId, def: MonsterId, ctx: &mut CombatCtx) -> MmResult {
    let Some((magr, mdef)) = level.pair_mut(agr, def) else {
        let missing = if agr == def { CombatError::SameCombatant(agr) } else { CombatError::MissingCombatant(def) };
        ctx.impossible(missing);
        return MmResult::MISS;
    };
    if !magr.is_alive() || !mdef.is_alive() || mdef.is_you {
        return MmResult::MISS;
    }
    let (from, to) = (magr.pos, mdef.pos);
    if from.distmin(to) != 1 {
        return MmResult::MISS;
    }
    if magr.pm == PmId::GridBug && from.x != to.x && from.y != to.y {
        return MmResult::MISS;
    }
    if magr.data().size < mdef.data().size {
        return MmResult::MISS;
    }
    if (mdef.state.trapped || mdef.state.sleeping) && ctx.rng.rn2(4) != 0 {
        return MmResult::MISS;
    }
    mdef.wake_up();
    magr.state.moved = true;
    ctx.observe(magr, mdef);
    let text = format!("{} moves {} out of {} way!", magr.monnam(), mdef.display_name(), magr.possessive());
    if ctx.vis.any() {
        ctx.combat_message(magr, mdef, true, text);
    }

    level.remove_from_map(agr);
    level.remove_from_map(def);
    for (id, pos) in [(agr, to), (def, from)] {
        if let Err(err) = level.place_monster(id, pos) {
            ctx.impossible(err);
        }
    }
    ctx.observer.newsym(from);
    ctx.observer.newsym(to);
    debug!(attacker = %agr, defender = %def, "displaced");
    MmResult::HIT
}
