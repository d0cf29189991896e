//! Death, life saving, growth and timed transformations (mon.c)

use serde::{Deserialize, Serialize};
use tracing::info;

use super::data::PmId;
use super::monst::{Monster, MonsterId, Status};
use super::permonst::{MonsterFlags, MonsterSize};
use crate::combat::{CombatCtx, MsgChannel};
use crate::dungeon::Level;
use crate::object::{Object, ObjectType};
use crate::{LIFESAVE_MIN_HP, ZOMBIFY_TURNS};

/// How a monster met its end; decides what it leaves behind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Ordinary death: maybe a corpse, inventory dropped
    Killed,
    /// Turned to stone: a statue holding the inventory
    Stoned,
    /// Digested inside an engulfer: no corpse
    Digested,
    /// Disintegrated: nothing left at all
    Disintegrated,
    /// Killed by a zombie: a corpse that will rise
    Zombified,
    /// Blew itself up: inventory scattered, no corpse
    Exploded,
}

/// Result of running the death pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathOutcome {
    Died,
    /// An amulet of life saving was used up
    LifeSaved,
    /// Survived as something else (a golem turned to stone golem)
    Transformed,
}

impl DeathOutcome {
    pub const fn died(&self) -> bool {
        matches!(self, DeathOutcome::Died)
    }
}

fn death_channel(mon: &Monster) -> MsgChannel {
    if mon.is_you || mon.state.tame {
        MsgChannel::BadForPlayer
    } else {
        MsgChannel::Neutral
    }
}

fn seen(mon: &Monster) -> bool {
    mon.is_you || !mon.state.invisible
}

/// Use up a worn amulet of life saving (lifesaved_monster in C)
pub fn lifesave(mon: &mut Monster, ctx: &mut CombatCtx) -> bool {
    let Some(idx) = mon.life_saver() else {
        return false;
    };
    mon.inventory.remove(idx);
    if seen(mon) {
        let channel = if mon.is_you || mon.state.tame {
            MsgChannel::GoodForPlayer
        } else {
            MsgChannel::Neutral
        };
        if mon.is_you {
            ctx.message(channel, "But wait...  Your medallion begins to glow!");
            ctx.message(channel, "You feel much better!");
        } else {
            ctx.message(
                channel,
                format!("But wait...  {} medallion begins to glow!", mon.possessive_monnam()),
            );
            ctx.message(channel, format!("{} looks much better!", mon.monnam()));
        }
        ctx.message(channel, "The medallion crumbles to dust!");
    }
    if mon.hp_max <= 0 {
        mon.hp_max = LIFESAVE_MIN_HP;
    }
    mon.hp = mon.hp_max;
    mon.state.sleeping = false;
    for status in [Status::Paralysis, Status::Stoning, Status::Sliming, Status::Zombifying] {
        mon.status.clear(status);
    }
    info!(monster = %mon.id, species = %mon.pm, "life saved");
    true
}

/// Chance of leaving a corpse (corpse_chance in C)
fn leaves_corpse(mon: &Monster, ctx: &mut CombatCtx) -> bool {
    let data = mon.data();
    if data.has_flag(MonsterFlags::NOCORPSE) || mon.state.cloned {
        return false;
    }
    if data.is_big() {
        return true;
    }
    let tiny = u32::from(data.size == MonsterSize::Tiny);
    ctx.rng.rn2(2 + tiny) == 0
}

/// Golems other than stone golems become stone golems (mon_to_stone in C)
pub fn mon_to_stone(mon: &mut Monster, ctx: &mut CombatCtx) {
    if seen(mon) {
        ctx.neutral(format!("{} turns to stone!", mon.monnam()));
    }
    mon.polymorph_into(PmId::StoneGolem);
    mon.status.clear(Status::Stoning);
    info!(monster = %mon.id, "golem turned to stone golem");
}

/// Run the death pipeline for a monster at or below zero hit points
/// (monkilled/mondied/monstone in C)
///
/// A worn amulet of life saving revives the monster. Otherwise it drops
/// to zero hit points, is flagged dead and taken off the map, and its
/// remains are left on the floor.
pub fn monkilled(level: &mut Level, id: MonsterId, cause: DeathCause, ctx: &mut CombatCtx) -> DeathOutcome {
    let Some(mon) = level.monster_mut(id) else {
        ctx.impossible(crate::CombatError::MissingCombatant(id));
        return DeathOutcome::Died;
    };
    if mon.state.dead {
        ctx.impossible(crate::CombatError::DeadCombatant(id));
        return DeathOutcome::Died;
    }
    if cause == DeathCause::Stoned && mon.pm.poly_when_stoned() {
        mon_to_stone(mon, ctx);
        return DeathOutcome::Transformed;
    }
    if seen(mon) && cause != DeathCause::Exploded {
        let text = match (cause, mon.is_you) {
            (_, true) => "You die...".to_string(),
            (DeathCause::Stoned, false) => format!("{} turns to stone.", mon.monnam()),
            (DeathCause::Digested, false) => format!("{} is totally digested!", mon.monnam()),
            (DeathCause::Disintegrated, false) => format!("{} is disintegrated!", mon.monnam()),
            _ => format!("{} is killed!", mon.monnam()),
        };
        ctx.message(death_channel(mon), text);
    }

    if lifesave(mon, ctx) {
        return DeathOutcome::LifeSaved;
    }

    mon.hp = 0;
    mon.state.dead = true;
    let pos = mon.pos;
    let pm = mon.pm;
    let is_you = mon.is_you;
    let inventory = std::mem::take(&mut mon.inventory);
    info!(monster = %id, species = %pm, ?cause, "monster died");

    level.remove_from_map(id);
    if is_you {
        ctx.observer.newsym(pos);
        return DeathOutcome::Died;
    }

    match cause {
        DeathCause::Stoned => {
            let statue = Object::statue(pm, inventory);
            level.place_object(pos, statue);
        }
        DeathCause::Disintegrated => {}
        DeathCause::Digested | DeathCause::Exploded => {
            for obj in inventory {
                level.place_object(pos, obj);
            }
        }
        DeathCause::Killed | DeathCause::Zombified => {
            for obj in inventory {
                level.place_object(pos, obj);
            }
            let zombie = cause == DeathCause::Zombified && pm.zombie_form().is_some();
            let corpse = match level.monster(id) {
                Some(dead) if zombie || leaves_corpse(dead, ctx) => {
                    let mut corpse = Object::corpse(pm);
                    if zombie {
                        corpse.revive_in = ZOMBIFY_TURNS;
                    }
                    Some(corpse)
                }
                _ => None,
            };
            if let Some(corpse) = corpse {
                level.place_object(pos, corpse);
            }
        }
    }
    ctx.observer.newsym(pos);
    DeathOutcome::Died
}

/// A killer feeds on its victim's life force (grow_up in C)
///
/// Returns the new species if the monster grew into its adult form.
pub fn grow_up(mon: &mut Monster, victim_level: u8, ctx: &mut CombatCtx) -> Option<PmId> {
    if mon.is_you || !mon.is_alive() {
        return None;
    }
    let increase = ctx.rng.rnd(victim_level as u32 + 1) as i32;
    mon.hp_max += increase;
    mon.hp += increase;

    let threshold = if mon.level == 0 { 4 } else { mon.level as i32 * 8 };
    if mon.hp_max <= threshold {
        return None;
    }
    let base = mon.data().level.max(0) as i32;
    let lev_limit = (base * 3 / 2).clamp(5, 49);
    if mon.level as i32 >= lev_limit {
        mon.hp_max = mon.hp_max.min(threshold + 1).max(mon.hp);
        return None;
    }
    mon.level += 1;

    let adult = mon.pm.grown_up()?;
    if (adult.data().level.max(0) as u8) > mon.level {
        return None;
    }
    let old_name = mon.monnam();
    mon.pm = adult;
    mon.attacks = adult.data().attacks;
    if seen(mon) {
        let channel = if mon.state.tame { MsgChannel::GoodForPlayer } else { MsgChannel::Neutral };
        ctx.message(channel, format!("{old_name} grows up into {}!", article(adult.name())));
    }
    info!(monster = %mon.id, species = %adult, "grew up");
    Some(adult)
}

fn article(noun: &str) -> String {
    let vowel = noun.starts_with(['a', 'e', 'i', 'o', 'u']);
    format!("{} {noun}", if vowel { "an" } else { "a" })
}

/// Split a monster in two, halving its hit points (clone_mon in C)
pub fn clone_mon(level: &mut Level, id: MonsterId, ctx: &mut CombatCtx) -> Option<MonsterId> {
    let mon = level.monster(id)?;
    if mon.hp <= 1 || mon.state.cancelled || mon.state.dead {
        return None;
    }
    let pos = level.enexto(mon.pos, &mut ctx.rng)?;
    let mut copy = mon.clone();
    copy.inventory.clear();
    copy.name = None;
    copy.is_you = false;
    copy.state.cloned = true;
    copy.hp = mon.hp / 2;
    copy.pos = pos;
    let split = copy.hp;

    let new_id = match level.add_monster(copy) {
        Ok(new_id) => new_id,
        Err(err) => {
            ctx.impossible(err);
            return None;
        }
    };
    if let Some(mon) = level.monster_mut(id) {
        mon.hp -= split;
    }
    ctx.observer.newsym(pos);
    Some(new_id)
}

/// Advance status timers one turn for every monster, completing delayed
/// petrification, zombification and sliming, and raising zombie corpses
///
/// Returns the monsters that died this tick.
pub fn tick_timers(level: &mut Level, ctx: &mut CombatCtx) -> Vec<MonsterId> {
    let mut died = Vec::new();
    for id in level.living_ids() {
        let Some(mon) = level.monster_mut(id) else {
            continue;
        };
        mon.state.moved = false;
        mon.spec_used = mon.spec_used.saturating_sub(1);
        let expired = mon.status.tick();
        for status in expired.into_iter().filter(Status::is_delayed_death) {
            let outcome = match status {
                Status::Stoning => monkilled(level, id, DeathCause::Stoned, ctx),
                Status::Zombifying => turn_zombie(level, id, ctx),
                Status::Sliming => {
                    if let Some(mon) = level.monster_mut(id) {
                        if seen(mon) {
                            ctx.neutral(format!("{} turns into a green slime!", mon.monnam()));
                        }
                        mon.polymorph_into(PmId::GreenSlime);
                    }
                    DeathOutcome::Transformed
                }
                _ => continue,
            };
            if outcome.died() {
                died.push(id);
                break;
            }
        }
    }
    raise_corpses(level, ctx);
    died
}

/// Zombification completes: the victim dies and rises as a zombie
fn turn_zombie(level: &mut Level, id: MonsterId, ctx: &mut CombatCtx) -> DeathOutcome {
    let Some(mon) = level.monster_mut(id) else {
        return DeathOutcome::Died;
    };
    let Some(zombie) = mon.pm.zombie_form() else {
        mon.hp = 0;
        return monkilled(level, id, DeathCause::Killed, ctx);
    };
    if seen(mon) {
        ctx.message(
            death_channel(mon),
            format!("{} dies... and rises as {}!", mon.monnam(), article(zombie.name())),
        );
    }
    mon.polymorph_into(zombie);
    mon.hp = mon.hp_max;
    mon.state.tame = false;
    mon.state.peaceful = false;
    info!(monster = %id, species = %zombie, "zombified");
    DeathOutcome::Transformed
}

/// Count down zombie corpses and raise those whose time has come
fn raise_corpses(level: &mut Level, ctx: &mut CombatCtx) {
    let mut risen = Vec::new();
    for pos in level.floor_positions() {
        let Some(pile) = level.objects_at_mut(pos) else {
            continue;
        };
        let mut idx = 0;
        while idx < pile.len() {
            let obj = &mut pile[idx];
            if obj.otyp == ObjectType::Corpse && obj.revive_in > 0 {
                obj.revive_in -= 1;
                if obj.revive_in == 0 {
                    if let Some(zombie) = obj.corpse_of.and_then(PmId::zombie_form) {
                        pile.remove(idx);
                        risen.push((pos, zombie));
                        continue;
                    }
                }
            }
            idx += 1;
        }
    }
    for (pos, zombie) in risen {
        let spot = if level.goodpos(pos) { Some(pos) } else { level.enexto(pos, &mut ctx.rng) };
        let Some(spot) = spot else {
            continue;
        };
        let mut mon = Monster::new(zombie);
        mon.pos = spot;
        match level.add_monster(mon) {
            Ok(_) => {
                ctx.neutral(format!("{} rises from the dead!", capitalize(&article(zombie.name()))));
                ctx.observer.newsym(spot);
            }
            Err(err) => ctx.impossible(err),
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::MessageLog;
    use crate::dungeon::Pos;
    use crate::object::worn_mask::W_AMUL;
    use crate::rng::{GameRng, RollMode};

    fn pinned_ctx(log: &mut MessageLog) -> CombatCtx<'_> {
        CombatCtx::with_rngs(
            GameRng::with_mode(42, RollMode::Min),
            GameRng::new(7),
            log,
        )
    }

    #[test]
    fn test_killed_leaves_corpse_and_drops_inventory() {
        let mut log = MessageLog::new();
        let mut ctx = pinned_ctx(&mut log);
        let mut level = Level::new();
        let id = level
            .add_monster(Monster::new(PmId::Soldier).at(3, 3).carrying(Object::new(ObjectType::Dagger)))
            .unwrap();
        level.monster_mut(id).unwrap().hp = -4;
        let outcome = monkilled(&mut level, id, DeathCause::Killed, &mut ctx);
        assert_eq!(outcome, DeathOutcome::Died);
        let mon = level.monster(id).unwrap();
        assert!(mon.state.dead);
        assert_eq!(mon.hp, 0);
        assert!(!level.is_on_map(id));
        let pile = level.objects_at(Pos::new(3, 3));
        assert!(pile.iter().any(|o| o.otyp == ObjectType::Dagger));
        assert!(pile.iter().any(|o| o.otyp == ObjectType::Corpse));
    }

    #[test]
    fn test_nocorpse_species() {
        let mut log = MessageLog::new();
        let mut ctx = pinned_ctx(&mut log);
        let mut level = Level::new();
        let id = level.add_monster(Monster::new(PmId::YellowLight).at(1, 1)).unwrap();
        monkilled(&mut level, id, DeathCause::Killed, &mut ctx);
        assert!(level.objects_at(Pos::new(1, 1)).is_empty());
    }

    #[test]
    fn test_life_saving_consumes_amulet() {
        let mut log = MessageLog::new();
        let mut ctx = pinned_ctx(&mut log);
        let mut level = Level::new();
        let id = level
            .add_monster(
                Monster::new(PmId::Soldier)
                    .at(2, 2)
                    .carrying(Object::new(ObjectType::AmuletOfLifeSaving).worn_in(W_AMUL)),
            )
            .unwrap();
        level.monster_mut(id).unwrap().hp = -10;
        let outcome = monkilled(&mut level, id, DeathCause::Killed, &mut ctx);
        assert_eq!(outcome, DeathOutcome::LifeSaved);
        let mon = level.monster(id).unwrap();
        assert!(mon.is_alive());
        assert_eq!(mon.hp, mon.hp_max);
        assert!(mon.life_saver().is_none());
        assert!(level.is_on_map(id));
        drop(ctx);
        assert!(log.contains("medallion crumbles"));
    }

    #[test]
    fn test_stoned_golem_transforms() {
        let mut log = MessageLog::new();
        let mut ctx = pinned_ctx(&mut log);
        let mut level = Level::new();
        let id = level.add_monster(Monster::new(PmId::ClayGolem).at(2, 2)).unwrap();
        let outcome = monkilled(&mut level, id, DeathCause::Stoned, &mut ctx);
        assert_eq!(outcome, DeathOutcome::Transformed);
        assert_eq!(level.monster(id).unwrap().pm, PmId::StoneGolem);
    }

    #[test]
    fn test_stoned_monster_leaves_statue_with_inventory() {
        let mut log = MessageLog::new();
        let mut ctx = pinned_ctx(&mut log);
        let mut level = Level::new();
        let id = level
            .add_monster(Monster::new(PmId::Soldier).at(2, 2).carrying(Object::gold(30)))
            .unwrap();
        monkilled(&mut level, id, DeathCause::Stoned, &mut ctx);
        let pile = level.objects_at(Pos::new(2, 2));
        assert_eq!(pile.len(), 1);
        assert_eq!(pile[0].otyp, ObjectType::Statue);
        assert_eq!(pile[0].contents.len(), 1);
    }

    #[test]
    fn test_dead_monster_is_not_killed_twice() {
        let mut log = MessageLog::new();
        let mut ctx = pinned_ctx(&mut log);
        let mut level = Level::new();
        let id = level.add_monster(Monster::new(PmId::Jackal).at(2, 2)).unwrap();
        monkilled(&mut level, id, DeathCause::Killed, &mut ctx);
        monkilled(&mut level, id, DeathCause::Killed, &mut ctx);
        assert_eq!(ctx.diagnostics, vec![crate::CombatError::DeadCombatant(id)]);
    }

    #[test]
    fn test_grow_up_into_adult() {
        let mut log = MessageLog::new();
        let mut ctx = CombatCtx::with_rngs(GameRng::with_mode(1, RollMode::Max), GameRng::new(2), &mut log);
        let mut pup = Monster::new(PmId::LittleDog).tame();
        pup.level = 3;
        pup.hp_max = 24;
        pup.hp = 20;
        let grown = grow_up(&mut pup, 10, &mut ctx);
        assert_eq!(grown, Some(PmId::Dog));
        assert_eq!(pup.level, 4);
        assert_eq!(pup.hp_max, 35);
        drop(ctx);
        assert!(log.contains("grows up into a dog"));
    }

    #[test]
    fn test_grow_up_small_gain() {
        let mut log = MessageLog::new();
        let mut ctx = pinned_ctx(&mut log);
        let mut jackal = Monster::new(PmId::Jackal);
        let before = jackal.hp_max;
        assert_eq!(grow_up(&mut jackal, 0, &mut ctx), None);
        assert_eq!(jackal.hp_max, before + 1);
    }

    #[test]
    fn test_clone_mon_halves_hp() {
        let mut log = MessageLog::new();
        let mut ctx = CombatCtx::new(42, &mut log);
        let mut level = Level::new();
        let id = level.add_monster(Monster::new(PmId::BlackPudding).at(5, 5).with_hp(40)).unwrap();
        let clone = clone_mon(&mut level, id, &mut ctx).unwrap();
        assert_eq!(level.monster(id).unwrap().hp, 20);
        let copy = level.monster(clone).unwrap();
        assert_eq!(copy.hp, 20);
        assert!(copy.state.cloned);
        assert_eq!(copy.pos.distmin(Pos::new(5, 5)), 1);

        level.monster_mut(id).unwrap().hp = 1;
        assert!(clone_mon(&mut level, id, &mut ctx).is_none());
    }

    #[test]
    fn test_tick_completes_stoning() {
        let mut log = MessageLog::new();
        let mut ctx = pinned_ctx(&mut log);
        let mut level = Level::new();
        let id = level.add_monster(Monster::new(PmId::Jackal).at(4, 4)).unwrap();
        level.monster_mut(id).unwrap().status.set(Status::Stoning, 2);
        assert!(tick_timers(&mut level, &mut ctx).is_empty());
        assert_eq!(tick_timers(&mut level, &mut ctx), vec![id]);
        assert_eq!(level.objects_at(Pos::new(4, 4))[0].otyp, ObjectType::Statue);
    }

    #[test]
    fn test_tick_zombifies_human() {
        let mut log = MessageLog::new();
        let mut ctx = pinned_ctx(&mut log);
        let mut level = Level::new();
        let id = level.add_monster(Monster::new(PmId::Soldier).at(4, 4).peaceful()).unwrap();
        level.monster_mut(id).unwrap().status.set(Status::Zombifying, 1);
        assert!(tick_timers(&mut level, &mut ctx).is_empty());
        let mon = level.monster(id).unwrap();
        assert_eq!(mon.pm, PmId::HumanZombie);
        assert!(!mon.state.peaceful);
    }

    #[test]
    fn test_zombie_corpse_rises() {
        let mut log = MessageLog::new();
        let mut ctx = pinned_ctx(&mut log);
        let mut level = Level::new();
        let id = level.add_monster(Monster::new(PmId::Human).at(6, 6)).unwrap();
        monkilled(&mut level, id, DeathCause::Zombified, &mut ctx);
        level.purge_dead();
        for _ in 0..ZOMBIFY_TURNS {
            tick_timers(&mut level, &mut ctx);
        }
        let risen = level.monster_at(Pos::new(6, 6)).unwrap();
        assert_eq!(level.monster(risen).unwrap().pm, PmId::HumanZombie);
        assert!(level.objects_at(Pos::new(6, 6)).is_empty());
    }
}
