//! Court state: two team slots, warmup/game clocks, result.

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a court.
pub type CourtId = Uuid;

/// Players per team slot.
pub const MAX_PLAYERS_PER_TEAM: usize = 2;
/// Players needed for a full doubles game.
pub const PLAYERS_PER_GAME: usize = 4;

/// One of a court's two team slots.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Team {
    A,
    B,
}

impl Team {
    pub fn other(self) -> Team {
        match self {
            Team::A => Team::B,
            Team::B => Team::A,
        }
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Team::A => write!(f, "A"),
            Team::B => write!(f, "B"),
        }
    }
}

/// A court with two team slots of up to two players each.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Court {
    pub id: CourtId,
    pub name: String,
    pub team_a: Vec<PlayerId>,
    pub team_b: Vec<PlayerId>,
    /// Warmup countdown in seconds.
    pub warmup_time: u32,
    /// Game clock in seconds (counts up while a game runs).
    pub game_time: u32,
    /// Warmup length as originally set, so reset can restore it.
    #[serde(default)]
    pub warmup_original_time: u32,
    pub is_warmup_active: bool,
    pub is_game_active: bool,
    /// Winner of the last finished game on this court.
    pub game_result: Option<Team>,
}

impl Court {
    /// Create an empty, idle court.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            team_a: Vec::new(),
            team_b: Vec::new(),
            warmup_time: 0,
            game_time: 0,
            warmup_original_time: 0,
            is_warmup_active: false,
            is_game_active: false,
            game_result: None,
        }
    }

    pub fn team(&self, team: Team) -> &Vec<PlayerId> {
        match team {
            Team::A => &self.team_a,
            Team::B => &self.team_b,
        }
    }

    pub fn team_mut(&mut self, team: Team) -> &mut Vec<PlayerId> {
        match team {
            Team::A => &mut self.team_a,
            Team::B => &mut self.team_b,
        }
    }

    /// Total players currently on the court.
    pub fn occupancy(&self) -> usize {
        self.team_a.len() + self.team_b.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occupancy() == 0
    }

    pub fn contains(&self, player_id: PlayerId) -> bool {
        self.team_a.contains(&player_id) || self.team_b.contains(&player_id)
    }

    /// Empty both team slots, leaving clocks and flags alone.
    pub fn clear_teams(&mut self) {
        self.team_a.clear();
        self.team_b.clear();
    }
}
