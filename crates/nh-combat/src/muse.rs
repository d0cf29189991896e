//! Monster item use: picking an offensive item and where to aim it (muse.c)
//!
//! Scoring never changes the level. Every monster a beam or blast would
//! reach adds the configured weight for an enemy, an ally or the user
//! itself; area blasts divide each contribution by the distance from the
//! center plus one. A choice is only made when the best score is
//! positive, and a confused or stunned user loses control of its aim.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::combat::{CombatCtx, DamageType};
use crate::config::TargetWeights;
use crate::dungeon::{DIRECTIONS, Level, Pos};
use crate::monster::{Monster, MonsterId};
use crate::object::{ObjectClass, ObjectType};

/// How an item's effect reaches its targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reach {
    /// Travels to full range through monsters and bounces off walls
    Ray,
    /// Stops at the first monster it hits
    Immediate,
    /// Explodes around the user
    SelfCentered { radius: i8 },
    /// Thrown at a chosen spot, affecting everything within `radius`
    Thrown { radius: i8 },
}

/// The harmful (or helpful) effect an item delivers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effect {
    pub damage: DamageType,
    pub reach: Reach,
}

impl Effect {
    pub const fn new(damage: DamageType, reach: Reach) -> Self {
        Self { damage, reach }
    }

    /// Helps whoever it reaches
    pub const fn is_beneficial(&self) -> bool {
        matches!(self.damage, DamageType::Heal)
    }

    /// Effect of using an item of this type, if it has one worth aiming
    pub fn of(otyp: ObjectType) -> Option<Self> {
        use DamageType as AD;
        let effect = match otyp {
            ObjectType::WandOfStriking => Effect::new(AD::Physical, Reach::Immediate),
            ObjectType::WandOfMagicMissile => Effect::new(AD::MagicMissile, Reach::Ray),
            ObjectType::WandOfFire => Effect::new(AD::Fire, Reach::Ray),
            ObjectType::WandOfCold => Effect::new(AD::Cold, Reach::Ray),
            ObjectType::WandOfSleep => Effect::new(AD::Sleep, Reach::Ray),
            ObjectType::WandOfLightning => Effect::new(AD::Electric, Reach::Ray),
            ObjectType::ScrollOfFire => Effect::new(AD::Fire, Reach::SelfCentered { radius: 1 }),
            ObjectType::PotionOfParalysis => Effect::new(AD::Paralyze, Reach::Thrown { radius: 0 }),
            ObjectType::PotionOfSleeping => Effect::new(AD::Sleep, Reach::Thrown { radius: 0 }),
            ObjectType::PotionOfBlindness => Effect::new(AD::Blind, Reach::Thrown { radius: 0 }),
            ObjectType::PotionOfAcid => Effect::new(AD::Acid, Reach::Thrown { radius: 0 }),
            ObjectType::PotionOfHealing => Effect::new(AD::Heal, Reach::Thrown { radius: 0 }),
            _ => return None,
        };
        Some(effect)
    }
}

/// Where a chosen item is aimed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MuseTarget {
    Direction(i8, i8),
    Spot(Pos),
}

/// An item a monster has decided to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MuseChoice {
    /// Index into the user's inventory
    pub item: usize,
    pub otyp: ObjectType,
    pub target: MuseTarget,
    pub score: i32,
}

/// Whether `mon` shrugs off this kind of effect
fn unaffected(mon: &Monster, damage: DamageType) -> bool {
    match damage {
        DamageType::Fire => mon.resists_fire(),
        DamageType::Cold => mon.resists_cold(),
        DamageType::Electric => mon.resists_elec(),
        DamageType::Sleep => mon.resists_sleep(),
        DamageType::Acid => mon.resists_acid(),
        DamageType::MagicMissile | DamageType::Physical => mon.resists_magm(),
        DamageType::Blind => mon.data().has_no_eyes(),
        DamageType::Paralyze => mon.has_free_action(),
        DamageType::Disintegrate => mon.resists_disint(),
        _ => false,
    }
}

/// Which side a monster fights for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Hero,
    Bystander,
    Hostile,
}

fn side(mon: &Monster) -> Side {
    if mon.is_you || mon.state.tame {
        Side::Hero
    } else if mon.state.peaceful {
        Side::Bystander
    } else {
        Side::Hostile
    }
}

/// Weight of the effect reaching `target` when `user` uses it
fn contribution(user: &Monster, target: &Monster, effect: Effect, weights: &TargetWeights) -> i32 {
    if target.id == user.id {
        if effect.is_beneficial() {
            return weights.self_help;
        }
        return if unaffected(target, effect.damage) { 0 } else { weights.self_harm };
    }
    if !effect.is_beneficial() && unaffected(target, effect.damage) {
        return 0;
    }
    let enemy = matches!(
        (side(user), side(target)),
        (Side::Hero, Side::Hostile) | (Side::Hostile, Side::Hero)
    );
    let weight = if enemy { weights.enemy } else { weights.ally };
    // help counts against the weights that harm would earn
    if effect.is_beneficial() { -weight } else { weight }
}

/// Score aiming `effect` in direction `dir` from `user`'s square
///
/// Walks the line square by square up to `range`. An immediate effect
/// stops at the first monster; a ray keeps going and, if it hits a wall
/// with enough range left to come back, counts the user as hit too.
pub fn score_direction(
    level: &Level,
    user: &Monster,
    dir: (i8, i8),
    effect: Effect,
    range: i32,
    weights: &TargetWeights,
) -> i32 {
    let mut score = 0i32;
    let mut pos = user.pos;
    for step in 1..=range {
        pos = pos.offset(dir.0, dir.1);
        if !level.is_passable(pos) {
            if effect.reach == Reach::Ray && range - step >= step - 1 {
                score = score.saturating_add(contribution(user, user, effect, weights));
            }
            break;
        }
        let Some(target) = level.monster_at(pos).and_then(|id| level.monster(id)) else {
            continue;
        };
        score = score.saturating_add(contribution(user, target, effect, weights));
        if effect.reach == Reach::Immediate {
            break;
        }
    }
    score
}

/// Score an area effect of `radius` centered on `center`
///
/// Each monster caught in the area contributes its weight divided by
/// its distance from the center plus one.
pub fn score_area(
    level: &Level,
    user: &Monster,
    center: Pos,
    radius: i8,
    effect: Effect,
    weights: &TargetWeights,
) -> i32 {
    let caught: Vec<&Monster> = level
        .monsters()
        .filter(|m| m.is_alive() && level.is_on_map(m.id) && m.pos.distmin(center) <= radius as i32)
        .collect();
    caught.into_iter().fold(0i32, |score, target| {
        let norm = target.pos.distmin(center) + 1;
        score.saturating_add(contribution(user, target, effect, weights) / norm)
    })
}

fn loses_aim(user: &Monster) -> bool {
    user.is_confused() || user.is_stunned()
}

/// Best direction to aim a directional item (mon_choose_dirtarget)
///
/// Directions are tried clockwise from north and a tie keeps the first.
/// Returns `None` unless the best score is positive.
pub fn mon_choose_dirtarget(
    level: &Level,
    user: MonsterId,
    effect: Effect,
    ctx: &mut CombatCtx,
) -> Option<((i8, i8), i32)> {
    let mon = level.monster(user)?;
    let range = ctx.config.bolt_range;
    let mut best: Option<((i8, i8), i32)> = None;
    for dir in DIRECTIONS {
        let score = score_direction(level, mon, dir, effect, range, &ctx.config.targeting);
        debug!(user = %user, ?dir, score, "direction score");
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((dir, score));
        }
    }
    let (dir, score) = best.filter(|&(_, score)| score > 0)?;
    if loses_aim(mon) {
        let wild = ctx.rng.choose(&DIRECTIONS).copied().unwrap_or(dir);
        return Some((wild, score));
    }
    Some((dir, score))
}

/// Best spot to center an area effect on (mon_choose_spectarget)
///
/// Candidates are the squares within bolt range the user can see,
/// scanned row by row; a tie keeps the first. Returns `None` unless the
/// best score is positive.
pub fn mon_choose_spectarget(
    level: &Level,
    user: MonsterId,
    radius: i8,
    effect: Effect,
    ctx: &mut CombatCtx,
) -> Option<(Pos, i32)> {
    let mon = level.monster(user)?;
    let range = ctx.config.bolt_range;
    let candidates: Vec<Pos> = (-range..=range)
        .flat_map(|dy| (-range..=range).map(move |dx| (dx, dy)))
        .map(|(dx, dy)| Pos::new((mon.pos.x as i32 + dx) as i8, (mon.pos.y as i32 + dy) as i8))
        .filter(|&p| level.is_passable(p) && level.has_line_of_sight(mon.pos, p))
        .collect();

    let mut best: Option<(Pos, i32)> = None;
    for &spot in &candidates {
        let score = score_area(level, mon, spot, radius, effect, &ctx.config.targeting);
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((spot, score));
        }
    }
    let (spot, score) = best.filter(|&(_, score)| score > 0)?;
    if loses_aim(mon) {
        let wild = ctx.rng.choose(&candidates).copied().unwrap_or(spot);
        return Some((wild, score));
    }
    Some((spot, score))
}

/// Pick the most useful offensive item in a monster's inventory
/// (find_offensive)
///
/// Wands need charges left. Ties keep the earlier item.
pub fn find_offensive(level: &Level, user: MonsterId, ctx: &mut CombatCtx) -> Option<MuseChoice> {
    let mon = level.monster(user)?;
    if !mon.is_alive() || mon.is_you {
        return None;
    }
    let usable: Vec<(usize, ObjectType, Effect)> = mon
        .inventory
        .iter()
        .enumerate()
        .filter(|(_, obj)| obj.class() != ObjectClass::Wand || obj.spe > 0)
        .filter_map(|(idx, obj)| Effect::of(obj.otyp).map(|e| (idx, obj.otyp, e)))
        .filter(|(_, _, effect)| !effect.is_beneficial())
        .collect();

    let mut best: Option<MuseChoice> = None;
    for (item, otyp, effect) in usable {
        let aimed = match effect.reach {
            Reach::Ray | Reach::Immediate => {
                mon_choose_dirtarget(level, user, effect, ctx).map(|(d, s)| (MuseTarget::Direction(d.0, d.1), s))
            }
            Reach::SelfCentered { radius } => {
                let mon = level.monster(user)?;
                let score = score_area(level, mon, mon.pos, radius, effect, &ctx.config.targeting);
                (score > 0).then_some((MuseTarget::Spot(mon.pos), score))
            }
            Reach::Thrown { radius } => {
                mon_choose_spectarget(level, user, radius, effect, ctx).map(|(p, s)| (MuseTarget::Spot(p), s))
            }
        };
        let Some((target, score)) = aimed else {
            continue;
        };
        if best.is_none_or(|b| score > b.score) {
            best = Some(MuseChoice {
                item,
                otyp,
                target,
                score,
            });
        }
    }
    if let Some(choice) = &best {
        debug!(user = %user, item = choice.item, otyp = ?choice.otyp, score = choice.score, "offensive item chosen");
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::MessageLog;
    use crate::monster::{PmId, Status};
    use crate::object::Object;

    fn weights() -> TargetWeights {
        TargetWeights::default()
    }

    fn fire_ray() -> Effect {
        Effect::new(DamageType::Fire, Reach::Ray)
    }

    #[test]
    fn test_effect_table() {
        assert_eq!(Effect::of(ObjectType::WandOfFire), Some(fire_ray()));
        assert_eq!(Effect::of(ObjectType::LongSword), None);
        assert!(Effect::of(ObjectType::PotionOfHealing).unwrap().is_beneficial());
    }

    #[test]
    fn test_ray_scores_enemies_and_allies() {
        let mut level = Level::new();
        let user = level.add_monster(Monster::new(PmId::Soldier).tame().at(10, 10)).unwrap();
        level.add_monster(Monster::new(PmId::Jackal).at(12, 10)).unwrap();
        level.add_monster(Monster::new(PmId::HillOrc).at(14, 10)).unwrap();
        let mon = level.monster(user).unwrap();
        assert_eq!(score_direction(&level, mon, (1, 0), fire_ray(), 8, &weights()), 40);

        level.add_monster(Monster::new(PmId::LittleDog).tame().at(10, 12)).unwrap();
        let mon = level.monster(user).unwrap();
        assert_eq!(score_direction(&level, mon, (0, 1), fire_ray(), 8, &weights()), -30);
    }

    #[test]
    fn test_resistant_target_scores_nothing() {
        let mut level = Level::new();
        let user = level.add_monster(Monster::new(PmId::Soldier).tame().at(10, 10)).unwrap();
        level.add_monster(Monster::new(PmId::RedMold).at(11, 10)).unwrap();
        let mon = level.monster(user).unwrap();
        assert_eq!(score_direction(&level, mon, (1, 0), fire_ray(), 8, &weights()), 0);
    }

    #[test]
    fn test_immediate_stops_at_first_monster() {
        let mut level = Level::new();
        let user = level.add_monster(Monster::new(PmId::Soldier).tame().at(10, 10)).unwrap();
        level.add_monster(Monster::new(PmId::Jackal).at(11, 10)).unwrap();
        level.add_monster(Monster::new(PmId::Jackal).at(12, 10)).unwrap();
        let striking = Effect::new(DamageType::Physical, Reach::Immediate);
        let mon = level.monster(user).unwrap();
        assert_eq!(score_direction(&level, mon, (1, 0), striking, 8, &weights()), 20);
    }

    #[test]
    fn test_ray_bounce_counts_self() {
        let mut level = Level::new();
        let user = level.add_monster(Monster::new(PmId::Soldier).tame().at(10, 10)).unwrap();
        level.add_monster(Monster::new(PmId::Jackal).at(11, 10)).unwrap();
        level.add_wall(Pos::new(13, 10));
        let mon = level.monster(user).unwrap();
        assert_eq!(score_direction(&level, mon, (1, 0), fire_ray(), 8, &weights()), 20 - 1000);
    }

    #[test]
    fn test_area_normalized_by_distance() {
        let mut level = Level::new();
        let user = level.add_monster(Monster::new(PmId::Soldier).tame().at(2, 2)).unwrap();
        level.add_monster(Monster::new(PmId::Jackal).at(10, 10)).unwrap();
        level.add_monster(Monster::new(PmId::Jackal).at(11, 10)).unwrap();
        let mon = level.monster(user).unwrap();
        // 20 at the center, 20 / 2 next to it
        assert_eq!(score_area(&level, mon, Pos::new(10, 10), 1, fire_ray(), &weights()), 30);
    }

    #[test]
    fn test_dirtarget_picks_first_best() {
        let mut log = MessageLog::new();
        let mut ctx = CombatCtx::new(42, &mut log);
        let mut level = Level::new();
        let user = level.add_monster(Monster::new(PmId::Soldier).tame().at(10, 10)).unwrap();
        level.add_monster(Monster::new(PmId::Jackal).at(13, 10)).unwrap();
        level.add_monster(Monster::new(PmId::Jackal).at(10, 13)).unwrap();
        let (dir, score) = mon_choose_dirtarget(&level, user, fire_ray(), &mut ctx).unwrap();
        assert_eq!(dir, (1, 0));
        assert_eq!(score, 20);
    }

    #[test]
    fn test_dirtarget_none_without_enemies() {
        let mut log = MessageLog::new();
        let mut ctx = CombatCtx::new(42, &mut log);
        let mut level = Level::new();
        let user = level.add_monster(Monster::new(PmId::Soldier).tame().at(10, 10)).unwrap();
        level.add_monster(Monster::new(PmId::Kitten).tame().at(12, 10)).unwrap();
        assert_eq!(mon_choose_dirtarget(&level, user, fire_ray(), &mut ctx), None);
    }

    #[test]
    fn test_confused_user_aims_randomly() {
        let mut log = MessageLog::new();
        let mut ctx = CombatCtx::with_rngs(
            crate::GameRng::with_mode(1, crate::RollMode::Max),
            crate::GameRng::new(2),
            &mut log,
        );
        let mut level = Level::new();
        let mut dizzy = Monster::new(PmId::Soldier).tame().at(10, 10);
        dizzy.status.set(Status::Confusion, 5);
        let user = level.add_monster(dizzy).unwrap();
        level.add_monster(Monster::new(PmId::Jackal).at(12, 10)).unwrap();
        let (dir, score) = mon_choose_dirtarget(&level, user, fire_ray(), &mut ctx).unwrap();
        assert_eq!(score, 20);
        assert_eq!(dir, DIRECTIONS[7]);
    }

    #[test]
    fn test_find_offensive_prefers_better_item() {
        let mut log = MessageLog::new();
        let mut ctx = CombatCtx::new(42, &mut log);
        let mut level = Level::new();
        let orc = Monster::new(PmId::HillOrc)
            .at(10, 10)
            .carrying(Object::new(ObjectType::WandOfSleep).with_spe(0))
            .carrying(Object::new(ObjectType::PotionOfAcid))
            .carrying(Object::new(ObjectType::WandOfFire).with_spe(4));
        let user = level.add_monster(orc).unwrap();
        level.add_monster(Monster::new(PmId::LittleDog).tame().at(12, 10)).unwrap();
        level.add_monster(Monster::new(PmId::Kitten).tame().at(14, 10)).unwrap();
        let choice = find_offensive(&level, user, &mut ctx).unwrap();
        assert_eq!(choice.item, 2);
        assert_eq!(choice.otyp, ObjectType::WandOfFire);
        assert_eq!(choice.target, MuseTarget::Direction(1, 0));
        assert_eq!(choice.score, 40);
    }

    #[test]
    fn test_find_offensive_nothing_to_hit() {
        let mut log = MessageLog::new();
        let mut ctx = CombatCtx::new(42, &mut log);
        let mut level = Level::new();
        let orc = Monster::new(PmId::HillOrc)
            .at(10, 10)
            .carrying(Object::new(ObjectType::WandOfFire).with_spe(4));
        let user = level.add_monster(orc).unwrap();
        assert_eq!(find_offensive(&level, user, &mut ctx), None);
    }
}
