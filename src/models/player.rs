//! Player data and rating.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in queue, rest area, and court slots).
pub type PlayerId = Uuid;

/// Lowest skill level on the club ladder.
pub const MIN_SKILL_LEVEL: u8 = 1;
/// Highest skill level on the club ladder.
pub const MAX_SKILL_LEVEL: u8 = 18;
/// Skill level assigned when the caller doesn't pick one.
pub const DEFAULT_SKILL_LEVEL: u8 = 6;

/// A registered player. Stats are only touched when a game ends.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Club ladder level, 1 (novice) to 18 (pro).
    pub skill_level: u8,
    pub wins: u32,
    pub losses: u32,
    pub total_games: u32,
}

impl Player {
    /// Create a new player with zeroed stats. Skill level is clamped to the ladder range.
    pub fn new(name: impl Into<String>, skill_level: u8) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            skill_level: skill_level.clamp(MIN_SKILL_LEVEL, MAX_SKILL_LEVEL),
            wins: 0,
            losses: 0,
            total_games: 0,
        }
    }

    /// Record a win for this player.
    pub fn record_win(&mut self) {
        self.wins += 1;
        self.total_games += 1;
    }

    /// Record a loss for this player.
    pub fn record_loss(&mut self) {
        self.losses += 1;
        self.total_games += 1;
    }

    /// Wins over games played; 0.5 for a player with no games yet.
    pub fn win_rate(&self) -> f64 {
        if self.total_games > 0 {
            self.wins as f64 / self.total_games as f64
        } else {
            0.5
        }
    }

    /// Composite rating: 70% normalized skill level, 30% win rate.
    pub fn score(&self) -> f64 {
        let skill = self.skill_level as f64 / MAX_SKILL_LEVEL as f64;
        skill * 0.7 + self.win_rate() * 0.3
    }
}
