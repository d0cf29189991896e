//! Species table (monst.c)
//!
//! Only the species whose attacks or defenses matter to combat are listed.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::permonst::{MonsterFlags as F, MonsterResistances as R, MonsterSize as Sz, PerMonst};
use crate::NATTK;
use crate::combat::{Attack, AttackSet, AttackType as AT, DamageType as AD};

/// Species identifier (PM_* in C)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum PmId {
    #[default]
    Human,
    Soldier,
    WoodlandElf,
    HillOrc,
    Jackal,
    Newt,
    GridBug,
    LittleDog,
    Dog,
    LargeDog,
    Kitten,
    Housecat,
    LargeCat,
    Cockatrice,
    Chickatrice,
    FloatingEye,
    GelatinousCube,
    AcidBlob,
    BrownMold,
    YellowMold,
    RedMold,
    BlueJelly,
    Lichen,
    YellowLight,
    BlackLight,
    FlamingSphere,
    PurpleWorm,
    Shrieker,
    OchreJelly,
    FogCloud,
    DustVortex,
    EnergyVortex,
    Medusa,
    IronGolem,
    ClayGolem,
    StoneGolem,
    PaperGolem,
    StrawGolem,
    WoodGolem,
    LeatherGolem,
    FleshGolem,
    RustMonster,
    BlackPudding,
    BrownPudding,
    Leprechaun,
    WaterNymph,
    Incubus,
    Disenchanter,
    RedDragon,
    WinterWolfCub,
    Cobra,
    Owlbear,
    Python,
    Vampire,
    MindFlayer,
    SoldierAnt,
    Quasit,
    Wraith,
    Skeleton,
    GreenSlime,
    HumanZombie,
    ElfZombie,
    OrcZombie,
    Gremlin,
    QuantumMechanic,
    Homunculus,
    UmberHulk,
    Raven,
}

const fn atk(list: &[Attack]) -> AttackSet {
    let mut set = [Attack::NONE; NATTK];
    let mut i = 0;
    while i < list.len() && i < NATTK {
        set[i] = list[i];
        i += 1;
    }
    set
}

const fn a(at: AT, ad: AD, n: u8, d: u8) -> Attack {
    Attack::new(at, ad, n, d)
}

#[allow(clippy::too_many_arguments)]
const fn mon(
    name: &'static str,
    level: i8,
    armor_class: i8,
    magic_resistance: u8,
    size: Sz,
    attacks: &[Attack],
    resistances: R,
    flags: F,
) -> PerMonst {
    PerMonst {
        name,
        level,
        armor_class,
        magic_resistance,
        attacks: atk(attacks),
        size,
        resistances,
        flags,
    }
}

const NONE: R = R::empty();
const GOLEM: F = F::MINDLESS.union(F::NOCORPSE).union(F::NEUTER).union(F::HUMANOID);
const GOLEM_RES: R = R::SLEEP.union(R::POISON);

static HUMAN: PerMonst = mon("human", 1, 10, 0, Sz::Medium,
    &[a(AT::Weapon, AD::Physical, 1, 6)], NONE, F::HUMAN.union(F::HUMANOID));
static SOLDIER: PerMonst = mon("soldier", 6, 10, 0, Sz::Medium,
    &[a(AT::Weapon, AD::Physical, 1, 8)], NONE,
    F::HUMAN.union(F::HUMANOID).union(F::MALE).union(F::HOSTILE).union(F::STRONG));
static WOODLAND_ELF: PerMonst = mon("Woodland-elf", 4, 10, 10, Sz::Medium,
    &[a(AT::Weapon, AD::Physical, 2, 4), a(AT::Weapon, AD::Physical, 2, 4)],
    R::SLEEP, F::ELF.union(F::HUMANOID));
static HILL_ORC: PerMonst = mon("hill orc", 1, 10, 0, Sz::Medium,
    &[a(AT::Weapon, AD::Physical, 1, 6)], NONE,
    F::ORC.union(F::HUMANOID).union(F::STRONG).union(F::HOSTILE));
static JACKAL: PerMonst = mon("jackal", 0, 7, 0, Sz::Small,
    &[a(AT::Bite, AD::Physical, 1, 2)], NONE, F::ANIMAL.union(F::CARNIVORE).union(F::HOSTILE));
static NEWT: PerMonst = mon("newt", 0, 8, 0, Sz::Tiny,
    &[a(AT::Bite, AD::Physical, 1, 3)], NONE, F::ANIMAL.union(F::HOSTILE));
static GRID_BUG: PerMonst = mon("grid bug", 0, 9, 0, Sz::Tiny,
    &[a(AT::Bite, AD::Electric, 1, 1)], R::ELEC.union(R::POISON), F::ANIMAL.union(F::HOSTILE));
static LITTLE_DOG: PerMonst = mon("little dog", 2, 6, 0, Sz::Small,
    &[a(AT::Bite, AD::Physical, 1, 6)], NONE, F::ANIMAL.union(F::DOMESTIC).union(F::CARNIVORE));
static DOG: PerMonst = mon("dog", 4, 5, 0, Sz::Medium,
    &[a(AT::Bite, AD::Physical, 1, 6)], NONE, F::ANIMAL.union(F::DOMESTIC).union(F::CARNIVORE));
static LARGE_DOG: PerMonst = mon("large dog", 6, 4, 0, Sz::Medium,
    &[a(AT::Bite, AD::Physical, 2, 4)], NONE,
    F::ANIMAL.union(F::DOMESTIC).union(F::CARNIVORE).union(F::STRONG));
static KITTEN: PerMonst = mon("kitten", 3, 6, 0, Sz::Small,
    &[a(AT::Bite, AD::Physical, 1, 6)], NONE, F::ANIMAL.union(F::DOMESTIC).union(F::CARNIVORE));
static HOUSECAT: PerMonst = mon("housecat", 4, 5, 0, Sz::Small,
    &[a(AT::Bite, AD::Physical, 1, 6)], NONE, F::ANIMAL.union(F::DOMESTIC).union(F::CARNIVORE));
static LARGE_CAT: PerMonst = mon("large cat", 6, 4, 0, Sz::Small,
    &[a(AT::Bite, AD::Physical, 2, 4)], NONE,
    F::ANIMAL.union(F::DOMESTIC).union(F::CARNIVORE).union(F::STRONG));
static COCKATRICE: PerMonst = mon("cockatrice", 5, 6, 30, Sz::Small,
    &[a(AT::Bite, AD::Physical, 1, 3), a(AT::Touch, AD::Stone, 0, 0), a(AT::None, AD::Stone, 0, 0)],
    R::POISON.union(R::STONE), F::ANIMAL.union(F::POIS).union(F::HOSTILE));
static CHICKATRICE: PerMonst = mon("chickatrice", 4, 8, 30, Sz::Tiny,
    &[a(AT::Bite, AD::Physical, 1, 2), a(AT::Touch, AD::Stone, 0, 0), a(AT::None, AD::Stone, 0, 0)],
    R::POISON.union(R::STONE), F::ANIMAL.union(F::POIS).union(F::HOSTILE));
static FLOATING_EYE: PerMonst = mon("floating eye", 2, 9, 10, Sz::Small,
    &[a(AT::None, AD::Paralyze, 0, 70)], NONE,
    F::FLY.union(F::NOLIMBS).union(F::NOHEAD).union(F::HOSTILE));
static GELATINOUS_CUBE: PerMonst = mon("gelatinous cube", 6, 8, 0, Sz::Large,
    &[a(AT::Touch, AD::Paralyze, 2, 4), a(AT::None, AD::Paralyze, 1, 4)],
    R::FIRE.union(R::COLD).union(R::ELEC).union(R::SLEEP).union(R::POISON).union(R::ACID).union(R::STONE),
    F::NOEYES.union(F::NOLIMBS).union(F::NOHEAD).union(F::MINDLESS).union(F::HOSTILE));
static ACID_BLOB: PerMonst = mon("acid blob", 1, 8, 0, Sz::Tiny,
    &[a(AT::None, AD::Acid, 1, 8)], R::SLEEP.union(R::POISON).union(R::ACID).union(R::STONE),
    F::AMORPHOUS.union(F::NOEYES).union(F::NOLIMBS).union(F::NOHEAD).union(F::MINDLESS).union(F::ACID));
static BROWN_MOLD: PerMonst = mon("brown mold", 1, 9, 0, Sz::Small,
    &[a(AT::None, AD::Cold, 6, 4)], R::COLD.union(R::POISON),
    F::NOEYES.union(F::NOLIMBS).union(F::NOHEAD).union(F::MINDLESS).union(F::NEUTER));
static YELLOW_MOLD: PerMonst = mon("yellow mold", 1, 9, 0, Sz::Small,
    &[a(AT::None, AD::Stun, 1, 4)], R::POISON,
    F::NOEYES.union(F::NOLIMBS).union(F::NOHEAD).union(F::MINDLESS).union(F::POIS));
static RED_MOLD: PerMonst = mon("red mold", 3, 9, 0, Sz::Small,
    &[a(AT::None, AD::Fire, 0, 4)], R::FIRE.union(R::POISON),
    F::NOEYES.union(F::NOLIMBS).union(F::NOHEAD).union(F::MINDLESS));
static BLUE_JELLY: PerMonst = mon("blue jelly", 4, 8, 10, Sz::Medium,
    &[a(AT::None, AD::Cold, 0, 6)], R::COLD.union(R::POISON),
    F::NOEYES.union(F::NOLIMBS).union(F::NOHEAD).union(F::MINDLESS));
static LICHEN: PerMonst = mon("lichen", 0, 9, 0, Sz::Small,
    &[a(AT::Touch, AD::Stick, 0, 0)], NONE,
    F::NOEYES.union(F::NOLIMBS).union(F::NOHEAD).union(F::MINDLESS).union(F::HOSTILE));
static YELLOW_LIGHT: PerMonst = mon("yellow light", 3, 0, 0, Sz::Small,
    &[a(AT::Explode, AD::Blind, 10, 20)],
    R::FIRE.union(R::COLD).union(R::ELEC).union(R::DISINT).union(R::SLEEP).union(R::POISON).union(R::ACID).union(R::STONE),
    F::FLY.union(F::NOEYES).union(F::NOLIMBS).union(F::NOHEAD).union(F::MINDLESS).union(F::UNSOLID).union(F::NOCORPSE));
static BLACK_LIGHT: PerMonst = mon("black light", 5, 0, 0, Sz::Small,
    &[a(AT::Explode, AD::Hallucinate, 10, 12)],
    R::FIRE.union(R::COLD).union(R::ELEC).union(R::DISINT).union(R::SLEEP).union(R::POISON).union(R::ACID).union(R::STONE),
    F::FLY.union(F::NOEYES).union(F::NOLIMBS).union(F::NOHEAD).union(F::MINDLESS).union(F::UNSOLID).union(F::NOCORPSE));
static FLAMING_SPHERE: PerMonst = mon("flaming sphere", 6, 4, 0, Sz::Small,
    &[a(AT::Explode, AD::Fire, 4, 6)], R::FIRE,
    F::FLY.union(F::NOLIMBS).union(F::NOHEAD).union(F::MINDLESS).union(F::NOCORPSE));
static PURPLE_WORM: PerMonst = mon("purple worm", 15, 6, 20, Sz::Gigantic,
    &[a(AT::Bite, AD::Physical, 2, 8), a(AT::Engulf, AD::Digest, 1, 10)], NONE,
    F::ANIMAL.union(F::NOEYES).union(F::NOLIMBS).union(F::SLITHY).union(F::CARNIVORE).union(F::HOSTILE));
static SHRIEKER: PerMonst = mon("shrieker", 2, 7, 0, Sz::Small, &[], R::POISON,
    F::NOEYES.union(F::NOLIMBS).union(F::NOHEAD).union(F::MINDLESS));
static OCHRE_JELLY: PerMonst = mon("ochre jelly", 6, 8, 20, Sz::Medium,
    &[a(AT::Engulf, AD::Acid, 3, 6), a(AT::None, AD::Acid, 3, 6)], R::ACID.union(R::STONE),
    F::NOEYES.union(F::NOLIMBS).union(F::NOHEAD).union(F::MINDLESS).union(F::ACID));
static FOG_CLOUD: PerMonst = mon("fog cloud", 3, 0, 0, Sz::Huge,
    &[a(AT::Engulf, AD::Physical, 1, 6)], R::SLEEP.union(R::POISON).union(R::STONE),
    F::FLY.union(F::AMORPHOUS).union(F::NOEYES).union(F::NOLIMBS).union(F::NOHEAD).union(F::MINDLESS).union(F::UNSOLID).union(F::NOCORPSE));
static DUST_VORTEX: PerMonst = mon("dust vortex", 4, 2, 30, Sz::Huge,
    &[a(AT::Engulf, AD::Blind, 2, 8)], R::SLEEP.union(R::POISON).union(R::STONE),
    F::FLY.union(F::NOEYES).union(F::NOLIMBS).union(F::NOHEAD).union(F::MINDLESS).union(F::NOCORPSE));
static ENERGY_VORTEX: PerMonst = mon("energy vortex", 6, 2, 30, Sz::Huge,
    &[a(AT::Engulf, AD::Electric, 1, 6), a(AT::Engulf, AD::DrainEnergy, 4, 6), a(AT::None, AD::Electric, 0, 4)],
    R::ELEC.union(R::SLEEP).union(R::DISINT).union(R::POISON).union(R::STONE),
    F::FLY.union(F::NOEYES).union(F::NOLIMBS).union(F::NOHEAD).union(F::MINDLESS).union(F::UNSOLID).union(F::NOCORPSE));
static MEDUSA: PerMonst = mon("Medusa", 20, 2, 50, Sz::Large,
    &[a(AT::Weapon, AD::Physical, 2, 4), a(AT::Claw, AD::Physical, 1, 8), a(AT::Gaze, AD::Stone, 0, 0), a(AT::Bite, AD::DrainStrength, 1, 6)],
    R::POISON.union(R::STONE), F::HUMANOID.union(F::FEMALE).union(F::HOSTILE).union(F::POIS));
static IRON_GOLEM: PerMonst = mon("iron golem", 18, 3, 30, Sz::Large,
    &[a(AT::Weapon, AD::Physical, 4, 10), a(AT::Breath, AD::DrainStrength, 4, 6)],
    R::FIRE.union(R::COLD).union(R::ELEC).union(GOLEM_RES), GOLEM.union(F::THICK_HIDE).union(F::STRONG));
static CLAY_GOLEM: PerMonst = mon("clay golem", 11, 7, 40, Sz::Large,
    &[a(AT::Claw, AD::Physical, 3, 10)], GOLEM_RES, GOLEM.union(F::THICK_HIDE).union(F::STRONG));
static STONE_GOLEM: PerMonst = mon("stone golem", 14, 5, 50, Sz::Large,
    &[a(AT::Claw, AD::Physical, 3, 8)], GOLEM_RES.union(R::STONE), GOLEM.union(F::THICK_HIDE).union(F::STRONG));
static PAPER_GOLEM: PerMonst = mon("paper golem", 3, 10, 0, Sz::Large,
    &[a(AT::Claw, AD::Physical, 1, 3)], GOLEM_RES, GOLEM);
static STRAW_GOLEM: PerMonst = mon("straw golem", 3, 10, 0, Sz::Large,
    &[a(AT::Claw, AD::Physical, 1, 2), a(AT::Claw, AD::Physical, 1, 2)], GOLEM_RES, GOLEM);
static WOOD_GOLEM: PerMonst = mon("wood golem", 7, 4, 0, Sz::Large,
    &[a(AT::Claw, AD::Physical, 3, 4)], GOLEM_RES, GOLEM.union(F::THICK_HIDE));
static LEATHER_GOLEM: PerMonst = mon("leather golem", 6, 6, 0, Sz::Large,
    &[a(AT::Claw, AD::Physical, 1, 6), a(AT::Claw, AD::Physical, 1, 6)], GOLEM_RES, GOLEM);
static FLESH_GOLEM: PerMonst = mon("flesh golem", 9, 9, 30, Sz::Large,
    &[a(AT::Claw, AD::Physical, 2, 8), a(AT::Claw, AD::Physical, 2, 8)],
    R::FIRE.union(R::COLD).union(R::ELEC).union(GOLEM_RES), GOLEM.union(F::STRONG));
static RUST_MONSTER: PerMonst = mon("rust monster", 5, 2, 0, Sz::Medium,
    &[a(AT::Touch, AD::Rust, 0, 0), a(AT::Touch, AD::Rust, 0, 0), a(AT::None, AD::Rust, 0, 0)],
    NONE, F::ANIMAL.union(F::NOHANDS).union(F::HOSTILE));
static BLACK_PUDDING: PerMonst = mon("black pudding", 10, 6, 0, Sz::Large,
    &[a(AT::Bite, AD::Corrode, 3, 8), a(AT::None, AD::Corrode, 0, 0)],
    R::COLD.union(R::ELEC).union(R::POISON).union(R::ACID).union(R::STONE),
    F::AMORPHOUS.union(F::NOEYES).union(F::NOLIMBS).union(F::NOHEAD).union(F::MINDLESS).union(F::ACID));
static BROWN_PUDDING: PerMonst = mon("brown pudding", 5, 8, 0, Sz::Medium,
    &[a(AT::Bite, AD::Decay, 0, 0), a(AT::None, AD::Decay, 0, 0)],
    R::COLD.union(R::ELEC).union(R::POISON).union(R::ACID).union(R::STONE),
    F::AMORPHOUS.union(F::NOEYES).union(F::NOLIMBS).union(F::NOHEAD).union(F::MINDLESS).union(F::ACID));
static LEPRECHAUN: PerMonst = mon("leprechaun", 5, 8, 20, Sz::Tiny,
    &[a(AT::Claw, AD::StealGold, 1, 2)], NONE, F::HUMANOID.union(F::HOSTILE));
static WATER_NYMPH: PerMonst = mon("water nymph", 3, 9, 20, Sz::Medium,
    &[a(AT::Claw, AD::StealItem, 0, 0), a(AT::Claw, AD::Seduce, 0, 0)], NONE,
    F::HUMANOID.union(F::FEMALE).union(F::HOSTILE));
static INCUBUS: PerMonst = mon("incubus", 6, 0, 70, Sz::Medium,
    &[a(AT::Bite, AD::SeduceSpecial, 0, 0), a(AT::Claw, AD::Physical, 1, 3), a(AT::Claw, AD::Physical, 1, 3)],
    R::FIRE.union(R::POISON), F::HUMANOID.union(F::DEMON).union(F::MALE).union(F::HOSTILE));
static DISENCHANTER: PerMonst = mon("disenchanter", 12, -10, 0, Sz::Large,
    &[a(AT::Claw, AD::Disenchant, 4, 4), a(AT::None, AD::Disenchant, 0, 0)], NONE,
    F::ANIMAL.union(F::HOSTILE));
static RED_DRAGON: PerMonst = mon("red dragon", 15, -1, 20, Sz::Gigantic,
    &[a(AT::Breath, AD::Fire, 6, 6), a(AT::Bite, AD::Physical, 3, 8), a(AT::Claw, AD::Physical, 1, 4), a(AT::Claw, AD::Physical, 1, 4)],
    R::FIRE, F::FLY.union(F::THICK_HIDE).union(F::CARNIVORE).union(F::STRONG).union(F::HOSTILE));
static WINTER_WOLF_CUB: PerMonst = mon("winter wolf cub", 5, 4, 0, Sz::Small,
    &[a(AT::Bite, AD::Physical, 1, 8), a(AT::Breath, AD::Cold, 1, 8)], R::COLD,
    F::ANIMAL.union(F::CARNIVORE).union(F::HOSTILE));
static COBRA: PerMonst = mon("cobra", 6, 2, 0, Sz::Medium,
    &[a(AT::Bite, AD::DrainStrength, 2, 4), a(AT::Spit, AD::Blind, 0, 0)], R::POISON,
    F::ANIMAL.union(F::NOLIMBS).union(F::SLITHY).union(F::POIS).union(F::CARNIVORE).union(F::HOSTILE));
static OWLBEAR: PerMonst = mon("owlbear", 5, 5, 0, Sz::Large,
    &[a(AT::Claw, AD::Physical, 1, 6), a(AT::Claw, AD::Physical, 1, 6), a(AT::Hug, AD::Physical, 2, 8)],
    NONE, F::ANIMAL.union(F::CARNIVORE).union(F::STRONG).union(F::HOSTILE));
static PYTHON: PerMonst = mon("python", 6, 5, 0, Sz::Huge,
    &[a(AT::Bite, AD::Physical, 1, 4), a(AT::Touch, AD::Physical, 0, 0), a(AT::Hug, AD::Wrap, 1, 4), a(AT::Hug, AD::Physical, 2, 4)],
    NONE, F::ANIMAL.union(F::NOLIMBS).union(F::SLITHY).union(F::CARNIVORE).union(F::STRONG).union(F::HOSTILE));
static VAMPIRE: PerMonst = mon("vampire", 10, 1, 25, Sz::Medium,
    &[a(AT::Claw, AD::Physical, 1, 6), a(AT::Bite, AD::DrainLife, 1, 6)], R::SLEEP.union(R::POISON),
    F::UNDEAD.union(F::HUMANOID).union(F::STRONG).union(F::HOSTILE).union(F::NOCORPSE));
static MIND_FLAYER: PerMonst = mon("mind flayer", 9, 5, 90, Sz::Medium,
    &[a(AT::Weapon, AD::Physical, 1, 4), a(AT::Tentacle, AD::DrainIntelligence, 2, 1)], NONE,
    F::HUMANOID.union(F::FLY).union(F::CARNIVORE).union(F::HOSTILE));
static SOLDIER_ANT: PerMonst = mon("soldier ant", 3, 3, 0, Sz::Tiny,
    &[a(AT::Bite, AD::Physical, 2, 4), a(AT::Sting, AD::DrainStrength, 3, 4)], R::POISON,
    F::ANIMAL.union(F::NOHANDS).union(F::POIS).union(F::CARNIVORE).union(F::HOSTILE));
static QUASIT: PerMonst = mon("quasit", 3, 2, 20, Sz::Small,
    &[a(AT::Claw, AD::DrainDexterity, 1, 2), a(AT::Claw, AD::DrainDexterity, 1, 2), a(AT::Bite, AD::Physical, 1, 4)],
    R::POISON, F::DEMON.union(F::HUMANOID).union(F::HOSTILE));
static WRAITH: PerMonst = mon("wraith", 6, 4, 15, Sz::Medium,
    &[a(AT::Touch, AD::DrainLife, 1, 6)], R::COLD.union(R::SLEEP).union(R::POISON).union(R::STONE),
    F::UNDEAD.union(F::FLY).union(F::HUMANOID).union(F::UNSOLID).union(F::HOSTILE));
static SKELETON: PerMonst = mon("skeleton", 12, 4, 0, Sz::Medium,
    &[a(AT::Weapon, AD::Physical, 2, 6), a(AT::Touch, AD::Slow, 1, 6)],
    R::COLD.union(R::SLEEP).union(R::POISON).union(R::STONE),
    F::UNDEAD.union(F::MINDLESS).union(F::HUMANOID).union(F::THICK_HIDE).union(F::NOCORPSE).union(F::HOSTILE));
static GREEN_SLIME: PerMonst = mon("green slime", 6, 6, 0, Sz::Large,
    &[a(AT::Touch, AD::Slime, 1, 4), a(AT::None, AD::Slime, 0, 0)],
    R::COLD.union(R::ELEC).union(R::POISON).union(R::ACID).union(R::STONE),
    F::AMORPHOUS.union(F::NOEYES).union(F::NOLIMBS).union(F::NOHEAD).union(F::MINDLESS).union(F::ACID).union(F::HOSTILE));
static HUMAN_ZOMBIE: PerMonst = mon("human zombie", 4, 8, 0, Sz::Medium,
    &[a(AT::Claw, AD::Zombify, 1, 8)], R::COLD.union(R::SLEEP).union(R::POISON),
    F::UNDEAD.union(F::MINDLESS).union(F::HUMANOID).union(F::HOSTILE));
static ELF_ZOMBIE: PerMonst = mon("elf zombie", 3, 9, 0, Sz::Medium,
    &[a(AT::Claw, AD::Zombify, 1, 7)], R::COLD.union(R::SLEEP).union(R::POISON),
    F::UNDEAD.union(F::MINDLESS).union(F::HUMANOID).union(F::HOSTILE));
static ORC_ZOMBIE: PerMonst = mon("orc zombie", 2, 9, 0, Sz::Medium,
    &[a(AT::Claw, AD::Zombify, 1, 6)], R::COLD.union(R::SLEEP).union(R::POISON),
    F::UNDEAD.union(F::MINDLESS).union(F::HUMANOID).union(F::HOSTILE));
static GREMLIN: PerMonst = mon("gremlin", 5, 2, 25, Sz::Small,
    &[a(AT::Claw, AD::Physical, 1, 6), a(AT::Claw, AD::Physical, 1, 6), a(AT::Bite, AD::Physical, 1, 4), a(AT::Claw, AD::Curse, 0, 0)],
    R::POISON, F::HUMANOID.union(F::POIS).union(F::HOSTILE));
static QUANTUM_MECHANIC: PerMonst = mon("quantum mechanic", 7, 3, 10, Sz::Medium,
    &[a(AT::Claw, AD::Teleport, 1, 4)], R::POISON, F::HUMANOID.union(F::POIS).union(F::HOSTILE));
static HOMUNCULUS: PerMonst = mon("homunculus", 2, 6, 10, Sz::Tiny,
    &[a(AT::Bite, AD::Sleep, 1, 3)], R::SLEEP.union(R::POISON), F::FLY.union(F::POIS));
static UMBER_HULK: PerMonst = mon("umber hulk", 9, 2, 25, Sz::Large,
    &[a(AT::Claw, AD::Physical, 3, 4), a(AT::Claw, AD::Physical, 3, 4), a(AT::Bite, AD::Physical, 2, 5), a(AT::Gaze, AD::Confuse, 0, 0)],
    NONE, F::CARNIVORE.union(F::STRONG).union(F::HOSTILE));
static RAVEN: PerMonst = mon("raven", 4, 6, 0, Sz::Small,
    &[a(AT::Bite, AD::Physical, 1, 6), a(AT::Claw, AD::Blind, 1, 6)], NONE,
    F::FLY.union(F::ANIMAL).union(F::CARNIVORE).union(F::HOSTILE));

impl PmId {
    /// Static data for this species
    pub fn data(self) -> &'static PerMonst {
        match self {
            PmId::Human => &HUMAN,
            PmId::Soldier => &SOLDIER,
            PmId::WoodlandElf => &WOODLAND_ELF,
            PmId::HillOrc => &HILL_ORC,
            PmId::Jackal => &JACKAL,
            PmId::Newt => &NEWT,
            PmId::GridBug => &GRID_BUG,
            PmId::LittleDog => &LITTLE_DOG,
            PmId::Dog => &DOG,
            PmId::LargeDog => &LARGE_DOG,
            PmId::Kitten => &KITTEN,
            PmId::Housecat => &HOUSECAT,
            PmId::LargeCat => &LARGE_CAT,
            PmId::Cockatrice => &COCKATRICE,
            PmId::Chickatrice => &CHICKATRICE,
            PmId::FloatingEye => &FLOATING_EYE,
            PmId::GelatinousCube => &GELATINOUS_CUBE,
            PmId::AcidBlob => &ACID_BLOB,
            PmId::BrownMold => &BROWN_MOLD,
            PmId::YellowMold => &YELLOW_MOLD,
            PmId::RedMold => &RED_MOLD,
            PmId::BlueJelly => &BLUE_JELLY,
            PmId::Lichen => &LICHEN,
            PmId::YellowLight => &YELLOW_LIGHT,
            PmId::BlackLight => &BLACK_LIGHT,
            PmId::FlamingSphere => &FLAMING_SPHERE,
            PmId::PurpleWorm => &PURPLE_WORM,
            PmId::Shrieker => &SHRIEKER,
            PmId::OchreJelly => &OCHRE_JELLY,
            PmId::FogCloud => &FOG_CLOUD,
            PmId::DustVortex => &DUST_VORTEX,
            PmId::EnergyVortex => &ENERGY_VORTEX,
            PmId::Medusa => &MEDUSA,
            PmId::IronGolem => &IRON_GOLEM,
            PmId::ClayGolem => &CLAY_GOLEM,
            PmId::StoneGolem => &STONE_GOLEM,
            PmId::PaperGolem => &PAPER_GOLEM,
            PmId::StrawGolem => &STRAW_GOLEM,
            PmId::WoodGolem => &WOOD_GOLEM,
            PmId::LeatherGolem => &LEATHER_GOLEM,
            PmId::FleshGolem => &FLESH_GOLEM,
            PmId::RustMonster => &RUST_MONSTER,
            PmId::BlackPudding => &BLACK_PUDDING,
            PmId::BrownPudding => &BROWN_PUDDING,
            PmId::Leprechaun => &LEPRECHAUN,
            PmId::WaterNymph => &WATER_NYMPH,
            PmId::Incubus => &INCUBUS,
            PmId::Disenchanter => &DISENCHANTER,
            PmId::RedDragon => &RED_DRAGON,
            PmId::WinterWolfCub => &WINTER_WOLF_CUB,
            PmId::Cobra => &COBRA,
            PmId::Owlbear => &OWLBEAR,
            PmId::Python => &PYTHON,
            PmId::Vampire => &VAMPIRE,
            PmId::MindFlayer => &MIND_FLAYER,
            PmId::SoldierAnt => &SOLDIER_ANT,
            PmId::Quasit => &QUASIT,
            PmId::Wraith => &WRAITH,
            PmId::Skeleton => &SKELETON,
            PmId::GreenSlime => &GREEN_SLIME,
            PmId::HumanZombie => &HUMAN_ZOMBIE,
            PmId::ElfZombie => &ELF_ZOMBIE,
            PmId::OrcZombie => &ORC_ZOMBIE,
            PmId::Gremlin => &GREMLIN,
            PmId::QuantumMechanic => &QUANTUM_MECHANIC,
            PmId::Homunculus => &HOMUNCULUS,
            PmId::UmberHulk => &UMBER_HULK,
            PmId::Raven => &RAVEN,
        }
    }

    pub fn name(self) -> &'static str {
        self.data().name
    }

    /// Touching this species bare-handed turns the toucher to stone
    pub const fn touch_petrifies(self) -> bool {
        matches!(self, PmId::Cockatrice | PmId::Chickatrice)
    }

    pub const fn is_golem(self) -> bool {
        matches!(
            self,
            PmId::IronGolem
                | PmId::ClayGolem
                | PmId::StoneGolem
                | PmId::PaperGolem
                | PmId::StrawGolem
                | PmId::WoodGolem
                | PmId::LeatherGolem
                | PmId::FleshGolem
        )
    }

    /// Golems other than stone golems turn into stone golems instead of statues
    pub const fn poly_when_stoned(self) -> bool {
        self.is_golem() && !matches!(self, PmId::StoneGolem)
    }

    /// Paper and straw golems are destroyed outright by fire
    pub const fn completely_burns(self) -> bool {
        matches!(self, PmId::PaperGolem | PmId::StrawGolem)
    }

    pub const fn is_pudding(self) -> bool {
        matches!(self, PmId::BrownPudding | PmId::BlackPudding)
    }

    pub const fn is_zombie(self) -> bool {
        matches!(self, PmId::HumanZombie | PmId::ElfZombie | PmId::OrcZombie)
    }

    /// Species that are not alive to begin with
    pub fn is_nonliving(self) -> bool {
        self.is_golem() || self.data().is_undead() || matches!(
            self,
            PmId::FogCloud | PmId::DustVortex | PmId::EnergyVortex | PmId::YellowLight | PmId::BlackLight | PmId::FlamingSphere
        )
    }

    /// Zombie this species rises as after zombification
    pub const fn zombie_form(self) -> Option<PmId> {
        match self {
            PmId::Human | PmId::Soldier => Some(PmId::HumanZombie),
            PmId::WoodlandElf => Some(PmId::ElfZombie),
            PmId::HillOrc => Some(PmId::OrcZombie),
            _ => None,
        }
    }

    /// Adult form this species grows into (little_to_big in C)
    pub const fn grown_up(self) -> Option<PmId> {
        match self {
            PmId::LittleDog => Some(PmId::Dog),
            PmId::Dog => Some(PmId::LargeDog),
            PmId::Kitten => Some(PmId::Housecat),
            PmId::Housecat => Some(PmId::LargeCat),
            PmId::Chickatrice => Some(PmId::Cockatrice),
            _ => None,
        }
    }

    /// Racial hatred that gives a to-hit bonus (elves and orcs)
    pub fn racial_enemy_of(self, other: PmId) -> bool {
        let (a, b) = (self.data(), other.data());
        (a.has_flag(F::ELF) && b.has_flag(F::ORC)) || (a.has_flag(F::ORC) && b.has_flag(F::ELF))
    }
}
