//! Per-call combat state
//!
//! Everything mhitm.c kept in file-scope statics (visibility of the
//! current fight, the last far-away noise, the random streams) lives in a
//! `CombatCtx` that the caller threads through every combat function.

use tracing::error;

use super::observer::{Allegiance, CombatObserver, MsgChannel, channel_for};
use crate::config::CombatConfig;
use crate::error::CombatError;
use crate::monster::Monster;
use crate::rng::GameRng;

/// Which combatants of the current fight the player can see
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Visibility {
    pub agr: bool,
    pub def: bool,
}

impl Visibility {
    pub const fn any(&self) -> bool {
        self.agr || self.def
    }

    pub const fn both(&self) -> bool {
        self.agr && self.def
    }
}

/// Rate limiting for "You hear some noises" messages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoiseState {
    /// Last noise was in the distance
    pub far_noise: bool,
    /// Turn of the last noise message
    pub noise_time: u64,
}

/// What a hallucinating player sees instead of a real liquid
const HALLU_LIQUIDS: [&str; 8] = [
    "yoghurt",
    "chicken soup",
    "motor oil",
    "ink",
    "grape juice",
    "tomato sauce",
    "liquid nitrogen",
    "pond water",
];

/// Combat context threaded through the attack pipeline
pub struct CombatCtx<'a> {
    /// Core stream: every roll that changes game state
    pub rng: GameRng,
    /// Flavor stream: message and noise choices only
    pub rng_disp: GameRng,
    pub config: CombatConfig,
    pub observer: &'a mut dyn CombatObserver,
    pub vis: Visibility,
    pub noise: NoiseState,
    /// Current turn
    pub moves: u64,
    pub night: bool,
    /// The player is hallucinating; changes what messages say, nothing else
    pub hallucinating: bool,
    /// Broken invariants seen so far
    pub diagnostics: Vec<CombatError>,
    /// Number of times the single-attack resolver ran
    pub resolver_calls: u32,
}

impl<'a> CombatCtx<'a> {
    /// Context with default tunables and two streams derived from `seed`
    pub fn new(seed: u64, observer: &'a mut dyn CombatObserver) -> Self {
        Self::with_rngs(GameRng::new(seed), GameRng::new(seed ^ 0x5eed_d15b), observer)
    }

    pub fn with_rngs(rng: GameRng, rng_disp: GameRng, observer: &'a mut dyn CombatObserver) -> Self {
        Self {
            rng,
            rng_disp,
            config: CombatConfig::default(),
            observer,
            vis: Visibility::default(),
            noise: NoiseState::default(),
            moves: 1,
            night: false,
            hallucinating: false,
            diagnostics: Vec::new(),
            resolver_calls: 0,
        }
    }

    pub fn with_config(mut self, config: CombatConfig) -> Self {
        self.config = config;
        self
    }

    /// Report a broken invariant (impossible() in C)
    ///
    /// The caller is expected to degrade to a harmless outcome.
    pub fn impossible(&mut self, err: CombatError) {
        error!(%err, "impossible");
        self.observer.diagnostic(&err);
        self.diagnostics.push(err);
    }

    pub fn message(&mut self, channel: MsgChannel, text: impl AsRef<str>) {
        self.observer.message(channel, text.as_ref());
    }

    pub fn neutral(&mut self, text: impl AsRef<str>) {
        self.message(MsgChannel::Neutral, text);
    }

    /// Message about `agr` acting on `def`, channelled by allegiance
    pub fn combat_message(&mut self, agr: &Monster, def: &Monster, hit: bool, text: impl AsRef<str>) {
        let channel = channel_for(
            Allegiance::of(agr, self.vis.agr),
            Allegiance::of(def, self.vis.def),
            hit,
        );
        self.message(channel, text);
    }

    /// A liquid as the player perceives it (hliquid in C)
    ///
    /// Draws from the flavor stream only, so hallucination never shifts
    /// the rolls that decide the fight.
    pub fn liquid(&mut self, name: &'static str) -> &'static str {
        if !self.hallucinating {
            return name;
        }
        self.rng_disp.choose(&HALLU_LIQUIDS).copied().unwrap_or(name)
    }

    /// Set visibility for a new fight between `agr` and `def`
    pub fn observe(&mut self, agr: &Monster, def: &Monster) {
        self.vis = Visibility {
            agr: agr.is_you || !agr.state.invisible,
            def: def.is_you || !def.state.invisible,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::MessageLog;
    use crate::monster::{MonsterId, PmId};

    #[test]
    fn test_impossible_records_diagnostic() {
        let mut log = MessageLog::new();
        let mut ctx = CombatCtx::new(42, &mut log);
        ctx.impossible(CombatError::DeadCombatant(MonsterId(3)));
        assert_eq!(ctx.diagnostics.len(), 1);
        drop(ctx);
        assert_eq!(log.diagnostics.len(), 1);
        assert!(log.messages.is_empty(), "diagnostics are not game messages");
    }

    #[test]
    fn test_streams_are_independent() {
        let mut log = MessageLog::new();
        let mut ctx = CombatCtx::new(42, &mut log);
        let core: Vec<u32> = (0..8).map(|_| ctx.rng.rn2(1000)).collect();
        let mut fresh = GameRng::new(42);
        ctx.rng_disp.rn2(1000);
        let replay: Vec<u32> = (0..8).map(|_| fresh.rn2(1000)).collect();
        assert_eq!(core, replay);
    }

    #[test]
    fn test_liquid_only_changes_when_hallucinating() {
        let mut log = MessageLog::new();
        let mut ctx = CombatCtx::new(42, &mut log);
        assert_eq!(ctx.liquid("acid"), "acid");
        ctx.hallucinating = true;
        let seen = ctx.liquid("acid");
        assert!(HALLU_LIQUIDS.contains(&seen));
        let mut fresh = GameRng::new(42);
        assert_eq!(ctx.rng.rn2(1000), fresh.rn2(1000));
    }

    #[test]
    fn test_observe_invisible() {
        let mut log = MessageLog::new();
        let mut ctx = CombatCtx::new(42, &mut log);
        let mut ghost = Monster::new(PmId::Wraith);
        ghost.state.invisible = true;
        ctx.observe(&ghost, &Monster::new(PmId::Jackal));
        assert!(!ctx.vis.agr);
        assert!(ctx.vis.def);
        assert!(ctx.vis.any() && !ctx.vis.both());
    }
}
