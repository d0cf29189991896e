//! Passive retaliation (passivemm) and golem elemental effects

use tracing::debug;

use super::context::CombatCtx;
use super::{DamageType, MmResult};
use crate::dungeon::Level;
use crate::monster::lifecycle::{clone_mon, monkilled};
use crate::monster::{DeathCause, DeathOutcome, Monster, MonsterId, PmId, Status};
use crate::object::{ErodeKind, drain_item, erode_armor, erode_obj, worn_mask::*};

/// Turns a golem stays slowed by an element it is weak to
const GOLEM_SLOW_TURNS: u16 = 50;

/// Longest paralysis a passive can inflict
const MAX_FROZEN: i32 = 127;

/// Elemental damage heals or slows some golems (golemeffects in C)
///
/// Flesh golems feed on electricity and are slowed by fire and cold;
/// iron golems feed on fire and are slowed by electricity.
pub fn golemeffects(mon: &mut Monster, ad: DamageType, dmg: i32, ctx: &mut CombatCtx) {
    let (heal, slow) = match (mon.pm, ad) {
        (PmId::FleshGolem, DamageType::Electric) => ((dmg + 5) / 6, false),
        (PmId::FleshGolem, DamageType::Fire | DamageType::Cold) => (0, true),
        (PmId::IronGolem, DamageType::Electric) => (0, true),
        (PmId::IronGolem, DamageType::Fire) => (dmg, false),
        _ => return,
    };
    if slow && mon.status.start(Status::Slow, GOLEM_SLOW_TURNS) && !mon.state.invisible {
        ctx.neutral(format!("{} seems to be moving slower.", mon.monnam()));
    }
    if heal > 0 && mon.hp < mon.hp_max {
        mon.hp = (mon.hp + heal).min(mon.hp_max);
        if !mon.state.invisible {
            ctx.neutral(format!("{} seems healthier.", mon.monnam()));
        }
    }
}

/// The defender's passive defense strikes back at `agr`
///
/// `mhit` and `mdead` describe the attack that provoked it; `weapon_hit`
/// is set when that attack was delivered with a wielded weapon. A dead
/// defender never retaliates. Acid, disenchantment and magic missiles
/// always answer; the remaining effects need an uncancelled defender and
/// pass a `rn2(passive_second_tier_odds)` roll.
pub fn passivemm(
    level: &mut Level,
    agr: MonsterId,
    def: MonsterId,
    mhit: bool,
    mdead: bool,
    weapon_hit: bool,
    ctx: &mut CombatCtx,
) -> MmResult {
    let base = MmResult {
        hit: mhit,
        def_died: mdead,
        ..MmResult::MISS
    };
    let Some((magr, mdef)) = level.pair_mut(agr, def) else {
        return base;
    };
    if !magr.is_alive() || mdead || !mdef.is_alive() {
        return base;
    }
    let Some(passive) = mdef.passive_attack() else {
        return base;
    };

    let mut tmp = if passive.dice_num > 0 {
        ctx.rng.dice(passive.dice_num as u32, passive.dice_sides as u32) as i32
    } else if passive.dice_sides > 0 {
        let lvl = mdef.level as u32 + 1;
        ctx.rng.dice(lvl, passive.dice_sides as u32) as i32
    } else {
        0
    };
    debug!(defender = %def, damage_type = %passive.damage_type, tmp, "passive");
    let agr_seen = magr.is_you || !magr.state.invisible;

    let mut assess = false;
    match passive.damage_type {
        DamageType::Acid => {
            if mhit && ctx.rng.rn2(2) == 0 {
                if agr_seen {
                    let acid = ctx.liquid("acid");
                    ctx.neutral(format!(
                        "{} is splashed by {} {acid}!",
                        magr.monnam(),
                        mdef.possessive_name()
                    ));
                }
                if magr.resists_acid() {
                    if agr_seen {
                        ctx.neutral(format!("{} is not affected.", magr.monnam()));
                    }
                    tmp = 0;
                }
            } else {
                tmp = 0;
            }
            if ctx.rng.rn2(30) == 0 {
                erode_armor(magr, ErodeKind::Corrode, &mut ctx.rng);
            }
            if ctx.rng.rn2(6) == 0 {
                if let Some(weapon) = magr.wielded_mut() {
                    erode_obj(weapon, ErodeKind::Corrode, &mut ctx.rng);
                }
            }
            assess = true;
        }
        DamageType::Disenchant => {
            if mhit && !mdef.state.cancelled && weapon_hit {
                if let Some(weapon) = magr.wielded_mut() {
                    drain_item(weapon);
                }
            }
        }
        DamageType::MagicMissile => {
            if magr.resists_magm() {
                if agr_seen {
                    ctx.neutral(format!("A hail of magic missiles narrowly misses {}!", magr.display_name()));
                }
                tmp = 0;
            } else if agr_seen {
                ctx.neutral(format!("{} is hit by magic missiles appearing from thin air!", magr.monnam()));
            }
            assess = true;
        }
        _ => {}
    }

    if !assess {
        if mdef.state.cancelled {
            return base;
        }
        if ctx.rng.rn2(ctx.config.passive_second_tier_odds) == 0 {
            tmp = 0;
        } else {
            match passive.damage_type {
                DamageType::Paralyze => {
                    return passive_paralysis(magr, mdef, tmp, base, ctx);
                }
                DamageType::Cold => {
                    if magr.resists_cold() {
                        if agr_seen {
                            ctx.neutral(format!("{} is mildly chilly.", magr.monnam()));
                        }
                        golemeffects(magr, DamageType::Cold, tmp, ctx);
                        tmp = 0;
                    } else {
                        if agr_seen {
                            ctx.neutral(format!("{} is suddenly very cold!", magr.monnam()));
                        }
                        mdef.hp += tmp / 2;
                        mdef.hp_max = mdef.hp_max.max(mdef.hp);
                        if mdef.hp_max > (mdef.level as i32 + 1) * 8 {
                            return split_and_assess(level, agr, def, tmp, base, ctx);
                        }
                    }
                }
                DamageType::Stun => {
                    if magr.status.start(Status::Stun, tmp.max(1) as u16) && agr_seen {
                        ctx.neutral(format!("{} staggers...", magr.monnam()));
                    }
                    tmp = 0;
                }
                DamageType::Fire => {
                    if magr.resists_fire() {
                        if agr_seen {
                            ctx.neutral(format!("{} is mildly warmed.", magr.monnam()));
                        }
                        golemeffects(magr, DamageType::Fire, tmp, ctx);
                        tmp = 0;
                    } else if agr_seen {
                        ctx.neutral(format!("{} is suddenly very hot!", magr.monnam()));
                    }
                }
                DamageType::Electric => {
                    if magr.resists_elec() {
                        if agr_seen {
                            ctx.neutral(format!("{} is mildly tingled.", magr.monnam()));
                        }
                        golemeffects(magr, DamageType::Electric, tmp, ctx);
                        tmp = 0;
                    } else if agr_seen {
                        ctx.neutral(format!("{} is jolted with electricity!", magr.monnam()));
                    }
                }
                _ => tmp = 0,
            }
        }
    }

    assess_damage(level, agr, tmp, base, ctx)
}

/// Floating eyes freeze attackers that meet their gaze; gelatinous cubes
/// freeze anything that touches them
fn passive_paralysis(
    magr: &mut Monster,
    mdef: &Monster,
    tmp: i32,
    base: MmResult,
    ctx: &mut CombatCtx,
) -> MmResult {
    let agr_seen = magr.is_you || !magr.state.invisible;
    let mut frozen = tmp.min(MAX_FROZEN);
    if mdef.pm == PmId::FloatingEye {
        if ctx.rng.rn2(4) == 0 {
            frozen = MAX_FROZEN;
        }
        if !(magr.can_see() && mdef.can_see() && !mdef.state.invisible) {
            return base;
        }
        if magr.has_reflection() {
            if agr_seen {
                let by = if magr.worn_in_slot(W_ARMS).is_some() { "shield" } else { "amulet" };
                ctx.neutral(format!(
                    "{} gaze is reflected by {} {by}.",
                    mdef.possessive_monnam(),
                    magr.possessive()
                ));
            }
            return base;
        }
        if agr_seen {
            ctx.neutral(format!(
                "{} is frozen by {} gaze!",
                magr.monnam(),
                mdef.possessive_name()
            ));
        }
    } else if agr_seen {
        ctx.neutral(format!("{} is frozen by {}.", magr.monnam(), mdef.display_name()));
    }
    if magr.has_free_action() {
        if agr_seen {
            ctx.neutral(format!("{} momentarily stiffens.", magr.monnam()));
        }
        return base;
    }
    magr.status.set(Status::Paralysis, frozen.max(1) as u16);
    if magr.is_you {
        ctx.observer.stop_occupation();
    }
    base
}

/// A cold-bloated defender divides, then the chill lands on the attacker
fn split_and_assess(
    level: &mut Level,
    agr: MonsterId,
    def: MonsterId,
    tmp: i32,
    base: MmResult,
    ctx: &mut CombatCtx,
) -> MmResult {
    if clone_mon(level, def, ctx).is_some() {
        if let Some(mdef) = level.monster(def) {
            if !mdef.state.invisible {
                ctx.neutral(format!("{} multiplies!", mdef.monnam()));
            }
        }
    }
    assess_damage(level, agr, tmp, base, ctx)
}

fn assess_damage(level: &mut Level, agr: MonsterId, tmp: i32, base: MmResult, ctx: &mut CombatCtx) -> MmResult {
    let Some(magr) = level.monster_mut(agr) else {
        return base;
    };
    magr.hp -= tmp;
    if magr.hp > 0 {
        return base;
    }
    match monkilled(level, agr, DeathCause::Killed, ctx) {
        DeathOutcome::Died => MmResult {
            agr_died: true,
            ..base
        },
        DeathOutcome::LifeSaved => base.with_life_saved(),
        DeathOutcome::Transformed => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::MessageLog;
    use crate::dungeon::Level;
    use crate::object::{Object, ObjectType};
    use crate::rng::{GameRng, RollMode};

    fn ctx_with(log: &mut MessageLog, mode: RollMode) -> CombatCtx<'_> {
        CombatCtx::with_rngs(GameRng::with_mode(42, mode), GameRng::new(7), log)
    }

    #[test]
    fn test_flesh_golem_heals_from_lightning() {
        let mut log = MessageLog::new();
        let mut ctx = CombatCtx::new(42, &mut log);
        let mut golem = Monster::new(PmId::FleshGolem).with_hp(10);
        golem.hp_max = 40;
        golemeffects(&mut golem, DamageType::Electric, 13, &mut ctx);
        assert_eq!(golem.hp, 13);
        golemeffects(&mut golem, DamageType::Fire, 13, &mut ctx);
        assert!(golem.status.has(Status::Slow));
    }

    #[test]
    fn test_iron_golem_heals_from_fire() {
        let mut log = MessageLog::new();
        let mut ctx = CombatCtx::new(42, &mut log);
        let mut golem = Monster::new(PmId::IronGolem).with_hp(10);
        golem.hp_max = 80;
        golemeffects(&mut golem, DamageType::Fire, 25, &mut ctx);
        assert_eq!(golem.hp, 35);
        golemeffects(&mut golem, DamageType::Cold, 25, &mut ctx);
        assert_eq!(golem.hp, 35);
        assert!(!golem.status.has(Status::Slow));
    }

    #[test]
    fn test_other_monsters_unaffected() {
        let mut log = MessageLog::new();
        let mut ctx = CombatCtx::new(42, &mut log);
        let mut newt = Monster::new(PmId::Newt).with_hp(1);
        newt.hp_max = 5;
        golemeffects(&mut newt, DamageType::Fire, 10, &mut ctx);
        assert_eq!(newt.hp, 1);
        drop(ctx);
        assert!(log.messages.is_empty());
    }

    #[test]
    fn test_no_passive_is_identity() {
        let mut log = MessageLog::new();
        let mut ctx = ctx_with(&mut log, RollMode::Max);
        let mut level = Level::new();
        let agr = level.add_monster(Monster::new(PmId::Jackal).at(1, 1).with_hp(3)).unwrap();
        let def = level.add_monster(Monster::new(PmId::Newt).at(2, 1).with_hp(3)).unwrap();
        let res = passivemm(&mut level, agr, def, true, false, false, &mut ctx);
        assert_eq!(res, MmResult::HIT);
        assert_eq!(level.monster(agr).unwrap().hp, 3);
    }

    #[test]
    fn test_dead_acid_blob_does_not_splash() {
        let mut log = MessageLog::new();
        let mut ctx = ctx_with(&mut log, RollMode::Min);
        let mut level = Level::new();
        let agr = level.add_monster(Monster::new(PmId::Jackal).at(1, 1).with_hp(3)).unwrap();
        let def = level.add_monster(Monster::new(PmId::AcidBlob).at(2, 1).with_hp(1)).unwrap();
        level.monster_mut(def).unwrap().state.dead = true;
        let res = passivemm(&mut level, agr, def, true, true, false, &mut ctx);
        assert!(res.hit && res.def_died && !res.agr_died);
        assert_eq!(level.monster(agr).unwrap().hp, 3);
        drop(ctx);
        assert!(!log.contains("splashed"));
    }

    #[test]
    fn test_living_acid_blob_splashes() {
        let mut log = MessageLog::new();
        let mut ctx = ctx_with(&mut log, RollMode::Min);
        let mut level = Level::new();
        let agr = level.add_monster(Monster::new(PmId::Jackal).at(1, 1).with_hp(3)).unwrap();
        let def = level.add_monster(Monster::new(PmId::AcidBlob).at(2, 1).with_hp(5)).unwrap();
        // 1d8 pinned low is 1 acid damage on the splash
        let res = passivemm(&mut level, agr, def, true, false, false, &mut ctx);
        assert!(res.hit && !res.def_died && !res.agr_died);
        assert_eq!(level.monster(agr).unwrap().hp, 2);
        drop(ctx);
        assert!(log.contains("splashed"));
    }

    #[test]
    fn test_hallucinated_splash_keeps_the_damage() {
        let mut log = MessageLog::new();
        let mut ctx = CombatCtx::new(11, &mut log);
        ctx.hallucinating = true;
        ctx.rng.set_mode(RollMode::Min);
        let mut level = Level::new();
        let agr = level.add_monster(Monster::new(PmId::Jackal).at(1, 1).with_hp(3)).unwrap();
        let def = level.add_monster(Monster::new(PmId::AcidBlob).at(2, 1).with_hp(5)).unwrap();
        passivemm(&mut level, agr, def, true, false, false, &mut ctx);
        assert_eq!(level.monster(agr).unwrap().hp, 2);
        drop(ctx);
        assert!(log.contains("The jackal is splashed by the acid blob's"));
        assert!(!log.contains("acid!"));
    }

    #[test]
    fn test_acid_kills_attacker() {
        let mut log = MessageLog::new();
        let mut ctx = ctx_with(&mut log, RollMode::Min);
        let mut level = Level::new();
        let agr = level.add_monster(Monster::new(PmId::Newt).at(1, 1).with_hp(1)).unwrap();
        let def = level.add_monster(Monster::new(PmId::AcidBlob).at(2, 1).with_hp(5)).unwrap();
        let res = passivemm(&mut level, agr, def, true, false, false, &mut ctx);
        assert!(res.agr_died);
        assert!(level.monster(agr).unwrap().state.dead);
    }

    #[test]
    fn test_second_tier_needs_living_defender() {
        let mut log = MessageLog::new();
        let mut ctx = ctx_with(&mut log, RollMode::Max);
        let mut level = Level::new();
        let agr = level.add_monster(Monster::new(PmId::Jackal).at(1, 1).with_hp(30)).unwrap();
        let def = level.add_monster(Monster::new(PmId::RedMold).at(2, 1).with_hp(5)).unwrap();
        let res = passivemm(&mut level, agr, def, true, true, false, &mut ctx);
        assert!(res.def_died);
        assert_eq!(level.monster(agr).unwrap().hp, 30);
    }

    #[test]
    fn test_red_mold_burns() {
        let mut log = MessageLog::new();
        let mut ctx = ctx_with(&mut log, RollMode::Max);
        let mut level = Level::new();
        let agr = level.add_monster(Monster::new(PmId::Jackal).at(1, 1).with_hp(30)).unwrap();
        let def = level.add_monster(Monster::new(PmId::RedMold).at(2, 1).with_hp(5)).unwrap();
        // level 3 mold: (3+1)d4 pinned high is 16
        let res = passivemm(&mut level, agr, def, true, false, false, &mut ctx);
        assert!(!res.agr_died);
        assert_eq!(level.monster(agr).unwrap().hp, 14);
    }

    #[test]
    fn test_grown_mold_burns_at_its_own_level() {
        let mut log = MessageLog::new();
        let mut ctx = ctx_with(&mut log, RollMode::Max);
        let mut level = Level::new();
        let agr = level.add_monster(Monster::new(PmId::Jackal).at(1, 1).with_hp(30)).unwrap();
        let mold = Monster::new(PmId::RedMold).with_level(5).at(2, 1).with_hp(5);
        let def = level.add_monster(mold).unwrap();
        // (5+1)d4 pinned high is 24
        passivemm(&mut level, agr, def, true, false, false, &mut ctx);
        assert_eq!(level.monster(agr).unwrap().hp, 6);
    }

    #[test]
    fn test_cancelled_defender_has_no_second_tier() {
        let mut log = MessageLog::new();
        let mut ctx = ctx_with(&mut log, RollMode::Max);
        let mut level = Level::new();
        let agr = level.add_monster(Monster::new(PmId::Jackal).at(1, 1).with_hp(30)).unwrap();
        let mut mold = Monster::new(PmId::RedMold).at(2, 1).with_hp(5);
        mold.state.cancelled = true;
        let def = level.add_monster(mold).unwrap();
        passivemm(&mut level, agr, def, true, false, false, &mut ctx);
        assert_eq!(level.monster(agr).unwrap().hp, 30);
    }

    #[test]
    fn test_floating_eye_freezes() {
        let mut log = MessageLog::new();
        let mut ctx = ctx_with(&mut log, RollMode::Max);
        let mut level = Level::new();
        let agr = level.add_monster(Monster::new(PmId::Jackal).at(1, 1).with_hp(30)).unwrap();
        let def = level.add_monster(Monster::new(PmId::FloatingEye).at(2, 1).with_hp(5)).unwrap();
        let res = passivemm(&mut level, agr, def, true, false, false, &mut ctx);
        assert!(!res.agr_died);
        assert!(level.monster(agr).unwrap().status.has(Status::Paralysis));
        drop(ctx);
        assert!(log.contains("frozen by the floating eye's gaze"));
    }

    #[test]
    fn test_floating_eye_reflected() {
        let mut log = MessageLog::new();
        let mut ctx = ctx_with(&mut log, RollMode::Max);
        let mut level = Level::new();
        let shielded = Monster::new(PmId::Soldier)
            .at(1, 1)
            .with_hp(30)
            .carrying(Object::new(ObjectType::ShieldOfReflection).worn_in(W_ARMS));
        let agr = level.add_monster(shielded).unwrap();
        let def = level.add_monster(Monster::new(PmId::FloatingEye).at(2, 1).with_hp(5)).unwrap();
        passivemm(&mut level, agr, def, true, false, false, &mut ctx);
        assert!(!level.monster(agr).unwrap().status.has(Status::Paralysis));
        drop(ctx);
        assert!(log.contains("reflected by his shield"));
    }

    #[test]
    fn test_disenchanter_drains_weapon() {
        let mut log = MessageLog::new();
        let mut ctx = ctx_with(&mut log, RollMode::Max);
        let mut level = Level::new();
        let armed = Monster::new(PmId::Soldier)
            .at(1, 1)
            .with_hp(30)
            .carrying(Object::new(ObjectType::LongSword).with_spe(2).worn_in(W_WEP));
        let agr = level.add_monster(armed).unwrap();
        let def = level.add_monster(Monster::new(PmId::Disenchanter).at(2, 1).with_hp(40)).unwrap();
        passivemm(&mut level, agr, def, true, false, true, &mut ctx);
        assert_eq!(level.monster(agr).unwrap().wielded().unwrap().spe, 1);
    }
}
