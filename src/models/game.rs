//! Finished-game records (append-only history).

use crate::models::court::{Court, CourtId, Team};
use crate::models::player::PlayerId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a game record.
pub type GameRecordId = Uuid;

/// One finished game. Created exactly once per game end, never mutated.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub id: GameRecordId,
    pub court_id: CourtId,
    pub team_a: Vec<PlayerId>,
    pub team_b: Vec<PlayerId>,
    pub winner: Team,
    /// Game length in seconds, taken from the court clock.
    pub duration: u32,
    pub timestamp: DateTime<Utc>,
}

impl GameRecord {
    /// Snapshot a court's rosters into a record for the given winner.
    pub fn from_court(court: &Court, winner: Team) -> Self {
        Self {
            id: Uuid::new_v4(),
            court_id: court.id,
            team_a: court.team_a.clone(),
            team_b: court.team_b.clone(),
            winner,
            duration: court.game_time,
            timestamp: Utc::now(),
        }
    }
}
