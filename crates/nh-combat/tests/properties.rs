use nh_combat::NATTK;
use nh_combat::combat::{
    AttackType, CombatCtx, DamageType, MessageLog, attk_protection, mattackm_report, touches_bare,
};
use nh_combat::dungeon::{Level, Pos};
use nh_combat::monster::{Monster, PmId};
use nh_combat::muse::{Effect, Reach, mon_choose_dirtarget};
use nh_combat::object::worn_mask::*;
use nh_combat::object::{Object, ObjectType};
use proptest::prelude::*;
use strum::IntoEnumIterator;

const FIGHTERS: &[PmId] = &[
    PmId::Jackal,
    PmId::Newt,
    PmId::Soldier,
    PmId::HillOrc,
    PmId::Dog,
    PmId::Owlbear,
    PmId::Cockatrice,
    PmId::AcidBlob,
    PmId::RedMold,
    PmId::BrownMold,
    PmId::FloatingEye,
    PmId::YellowLight,
    PmId::FlamingSphere,
    PmId::PurpleWorm,
    PmId::FogCloud,
    PmId::Medusa,
    PmId::UmberHulk,
    PmId::RedDragon,
    PmId::Cobra,
    PmId::WaterNymph,
    PmId::Leprechaun,
    PmId::BlackPudding,
    PmId::HumanZombie,
    PmId::Vampire,
    PmId::ClayGolem,
];

fn fighter() -> impl Strategy<Value = PmId> {
    (0..FIGHTERS.len()).prop_map(|i| FIGHTERS[i])
}

fn armor() -> impl Iterator<Item = Object> {
    [
        (ObjectType::LeatherCloak, W_ARMC),
        (ObjectType::LeatherGloves, W_ARMG),
        (ObjectType::LowBoots, W_ARMF),
        (ObjectType::Helmet, W_ARMH),
    ]
    .into_iter()
    .map(|(otyp, mask)| Object::new(otyp).worn_in(mask))
}

proptest! {
    /// Death flags agree with the level, and nothing runs after a death
    #[test]
    fn prop_outcome_matches_level(
        seed in any::<u64>(),
        agr_pm in fighter(),
        def_pm in fighter(),
        agr_hp in 1i32..40,
        def_hp in 1i32..40,
    ) {
        let mut log = MessageLog::new();
        let mut ctx = CombatCtx::new(seed, &mut log);
        let mut level = Level::new();
        let a = level.add_monster(Monster::new(agr_pm).with_hp(agr_hp).at(30, 10)).unwrap();
        let d = level.add_monster(Monster::new(def_pm).with_hp(def_hp).at(31, 10)).unwrap();

        let report = mattackm_report(&mut level, a, d, &mut ctx);
        let res = report.outcome;
        let magr = level.monster(a).unwrap();
        let mdef = level.monster(d).unwrap();

        prop_assert_eq!(res.agr_died, magr.state.dead);
        prop_assert_eq!(res.def_died, mdef.state.dead);
        for mon in [magr, mdef] {
            if !mon.state.dead {
                prop_assert!(mon.hp > 0, "{} alive at {} hp", mon.pm, mon.hp);
            }
        }
        prop_assert!(report.slots.len() <= NATTK);
        if let Some((_, rest)) = report.slots.split_last() {
            prop_assert!(rest.iter().all(|(_, r)| !r.is_terminal()));
        }
        prop_assert!(ctx.diagnostics.is_empty());
    }

    /// A hug never lands unless the two slots before it both hit
    #[test]
    fn prop_hug_needs_two_hits(seed in any::<u64>(), def_hp in 1i32..60) {
        let mut log = MessageLog::new();
        let mut ctx = CombatCtx::new(seed, &mut log);
        let mut level = Level::new();
        let a = level.add_monster(Monster::new(PmId::Owlbear).with_hp(40).at(30, 10)).unwrap();
        let d = level.add_monster(Monster::new(PmId::Soldier).with_hp(def_hp).at(31, 10)).unwrap();

        let report = mattackm_report(&mut level, a, d, &mut ctx);

        for (i, (at, res)) in report.slots.iter().enumerate() {
            if *at == AttackType::Hug && !res.is_miss() {
                prop_assert!(i >= 2);
                prop_assert!(report.slots[i - 1].1.hit && report.slots[i - 2].1.hit);
            }
        }
    }

    /// Full armor covers every contact attack that armor can cover
    #[test]
    fn prop_armor_blocks_what_it_protects(idx in 0usize..16) {
        let Some(at) = AttackType::iter().nth(idx) else {
            return Ok(());
        };
        let bare = Monster::new(PmId::Soldier);
        let armored = armor().fold(Monster::new(PmId::Soldier), Monster::carrying);
        let mask = attk_protection(at);
        prop_assert_eq!(touches_bare(&bare, at), mask != !0);
        prop_assert_eq!(touches_bare(&armored, at), mask == 0);
    }

    /// A recommended direction always scores above zero
    #[test]
    fn prop_dirtarget_only_when_worth_it(
        seed in any::<u64>(),
        spots in prop::collection::vec((1i8..40, 1i8..20, any::<bool>()), 0..6),
    ) {
        let mut log = MessageLog::new();
        let mut ctx = CombatCtx::new(seed, &mut log);
        let mut level = Level::new();
        let user = level.add_monster(Monster::new(PmId::Soldier).at(20, 10)).unwrap();
        for (x, y, tame) in spots {
            if level.is_occupied(Pos::new(x, y)) {
                continue;
            }
            let mon = Monster::new(PmId::Jackal).at(x, y);
            let mon = if tame { mon.tame() } else { mon };
            level.add_monster(mon).unwrap();
        }
        let ray = Effect::new(DamageType::Cold, Reach::Ray);
        if let Some((_, score)) = mon_choose_dirtarget(&level, user, ray, &mut ctx) {
            prop_assert!(score > 0);
        }
    }
}
