//! Presentation hooks: messages, map updates and hero bookkeeping
//!
//! The combat engine never prints or draws. Everything the player would
//! see goes through a `CombatObserver`.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::dungeon::Pos;
use crate::error::CombatError;
use crate::monster::{Monster, PmId};

/// Coarse message classification used for filtering and coloring
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum MsgChannel {
    GoodForPlayer,
    BadForPlayer,
    #[default]
    Neutral,
}

/// How a combatant relates to the player, for channel selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[repr(u8)]
pub enum Allegiance {
    Hero = 0,
    Pet = 1,
    Peaceful = 2,
    Hostile = 3,
    /// Not visible to the player
    Unseen = 4,
}

impl Allegiance {
    pub fn of(mon: &Monster, seen: bool) -> Self {
        if mon.is_you {
            Allegiance::Hero
        } else if !seen {
            Allegiance::Unseen
        } else if mon.state.tame {
            Allegiance::Pet
        } else if mon.state.peaceful {
            Allegiance::Peaceful
        } else {
            Allegiance::Hostile
        }
    }
}

use MsgChannel::{BadForPlayer as B, GoodForPlayer as G, Neutral as N};

/// Channel by [attacker][defender][miss, hit]
const CHANNELS: [[[MsgChannel; 2]; 5]; 5] = [
    // hero attacking
    [[N, N], [N, B], [N, N], [N, G], [N, N]],
    // pet attacking
    [[G, B], [N, B], [N, N], [N, G], [N, N]],
    // peaceful attacking
    [[G, B], [G, B], [N, N], [N, G], [N, N]],
    // hostile attacking
    [[G, B], [G, B], [N, N], [N, N], [N, N]],
    // unseen attacking
    [[G, B], [N, B], [N, N], [N, N], [N, N]],
];

/// Pick the message channel for an attack between two allegiances
pub const fn channel_for(agr: Allegiance, def: Allegiance, hit: bool) -> MsgChannel {
    CHANNELS[agr as usize][def as usize][hit as usize]
}

/// Receiver for everything combat wants the player to know about
pub trait CombatObserver {
    /// A line of game text
    fn message(&mut self, channel: MsgChannel, text: &str);

    /// A map square needs redrawing
    fn newsym(&mut self, _pos: Pos) {}

    /// The hero killed something
    fn gain_experience(&mut self, _victim: PmId) {}

    /// Interrupt whatever multi-turn action the hero is doing
    fn stop_occupation(&mut self) {}

    /// An internal invariant was broken
    fn diagnostic(&mut self, _err: &CombatError) {}
}

/// Observer that drops everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl CombatObserver for NullObserver {
    fn message(&mut self, _channel: MsgChannel, _text: &str) {}
}

/// Observer that records everything, for tests and replays
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MessageLog {
    pub messages: Vec<(MsgChannel, String)>,
    pub redraws: Vec<Pos>,
    pub experience: Vec<PmId>,
    pub interruptions: u32,
    pub diagnostics: Vec<String>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any message contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.messages.iter().any(|(_, text)| text.contains(needle))
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(|(_, text)| text.as_str())
    }
}

impl CombatObserver for MessageLog {
    fn message(&mut self, channel: MsgChannel, text: &str) {
        self.messages.push((channel, text.to_string()));
    }

    fn newsym(&mut self, pos: Pos) {
        self.redraws.push(pos);
    }

    fn gain_experience(&mut self, victim: PmId) {
        self.experience.push(victim);
    }

    fn stop_occupation(&mut self) {
        self.interruptions += 1;
    }

    fn diagnostic(&mut self, err: &CombatError) {
        self.diagnostics.push(err.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_channel_table() {
        use Allegiance::*;
        assert_eq!(channel_for(Pet, Hostile, true), MsgChannel::GoodForPlayer);
        assert_eq!(channel_for(Hostile, Pet, true), MsgChannel::BadForPlayer);
        assert_eq!(channel_for(Hostile, Pet, false), MsgChannel::GoodForPlayer);
        assert_eq!(channel_for(Hostile, Hostile, true), MsgChannel::Neutral);
        assert_eq!(channel_for(Unseen, Unseen, true), MsgChannel::Neutral);
    }

    #[test]
    fn test_hits_on_the_hero_are_bad() {
        for agr in Allegiance::iter().filter(|a| *a != Allegiance::Hero) {
            assert_eq!(channel_for(agr, Allegiance::Hero, true), MsgChannel::BadForPlayer);
        }
    }

    #[test]
    fn test_allegiance_of() {
        let mut mon = Monster::new(PmId::LittleDog).tame();
        assert_eq!(Allegiance::of(&mon, true), Allegiance::Pet);
        assert_eq!(Allegiance::of(&mon, false), Allegiance::Unseen);
        mon.state.tame = false;
        assert_eq!(Allegiance::of(&mon, true), Allegiance::Peaceful);
        mon.state.peaceful = false;
        assert_eq!(Allegiance::of(&mon, true), Allegiance::Hostile);
        let hero = Monster::hero(PmId::Human, 1, 12);
        assert_eq!(Allegiance::of(&hero, false), Allegiance::Hero);
    }

    #[test]
    fn test_message_log_records() {
        let mut log = MessageLog::new();
        log.message(MsgChannel::Neutral, "The jackal bites the newt.");
        log.newsym(Pos::new(1, 2));
        log.stop_occupation();
        assert!(log.contains("bites"));
        assert_eq!(log.redraws, vec![Pos::new(1, 2)]);
        assert_eq!(log.interruptions, 1);
    }
}
