//! Session and SessionError: the root state every operation works on.

use crate::models::court::{Court, CourtId, Team};
use crate::models::game::GameRecord;
use crate::models::player::{Player, PlayerId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during session operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SessionError {
    /// Player id not in the roster, or not placed anywhere when a placement is required.
    PlayerNotFound(PlayerId),
    /// Court id not in the session.
    CourtNotFound(CourtId),
    /// Plain move into a team slot that already holds two players.
    SlotFull { court_id: CourtId, team: Team },
    /// Auto-fill target already has occupants or a running game.
    CourtNotEmpty(CourtId),
    /// Not enough queued players for the requested fill.
    InsufficientPlayers { required: usize, available: usize },
    /// Swap requested with a target that does not exist or is not placed.
    InvalidSwap(PlayerId),
    /// Team balancing needs exactly four players.
    InvalidTeamSize { expected: usize, actual: usize },
    /// Game start needs a full court with no game running.
    GameNotReady { court_id: CourtId, occupied: usize },
    /// A game is already running on this court.
    GameAlreadyActive(CourtId),
    /// No game is running on this court.
    NoActiveGame(CourtId),
    /// Player names must be non-empty after trimming.
    InvalidPlayerName,
    /// The last court cannot be removed.
    LastCourt,
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::PlayerNotFound(_) => write!(f, "Player not found"),
            SessionError::CourtNotFound(_) => write!(f, "Court not found"),
            SessionError::SlotFull { team, .. } => {
                write!(f, "Team {} already has two players", team)
            }
            SessionError::CourtNotEmpty(_) => {
                write!(f, "Court already has players or a running game")
            }
            SessionError::InsufficientPlayers { required, available } => {
                write!(f, "Need {} queued players but only {} waiting", required, available)
            }
            SessionError::InvalidSwap(_) => write!(f, "Swap target is not placed anywhere"),
            SessionError::InvalidTeamSize { expected, actual } => {
                write!(f, "Balancing needs exactly {} players (got {})", expected, actual)
            }
            SessionError::GameNotReady { occupied, .. } => {
                write!(f, "Need 4 players on court to start (got {})", occupied)
            }
            SessionError::GameAlreadyActive(_) => write!(f, "A game is already running"),
            SessionError::NoActiveGame(_) => write!(f, "No game is running on this court"),
            SessionError::InvalidPlayerName => write!(f, "Player name must not be empty"),
            SessionError::LastCourt => write!(f, "At least one court must remain"),
        }
    }
}

/// Unique identifier for a session.
pub type SessionId = Uuid;

/// How auto-fill splits the four players pulled from the queue.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillPolicy {
    /// Queue order: first two to team A, last two to team B.
    #[default]
    Positional,
    /// Skill-balanced split via the team balancer.
    Balanced,
}

/// Version tag written into exported snapshots.
pub const EXPORT_VERSION: u32 = 1;

/// Full session state: roster, the three location collections, history, settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: SessionId,
    pub players: Vec<Player>,
    /// Ordered wait-list; the head plays next.
    pub waiting_queue: Vec<PlayerId>,
    /// Paused players. Order carries no meaning; they re-enter the queue at its tail.
    pub rest_area: Vec<PlayerId>,
    pub courts: Vec<Court>,
    /// Append-only record of finished games.
    pub game_history: Vec<GameRecord>,
    /// Refill an emptied court from the queue as soon as a game ends.
    pub auto_queue: bool,
    pub fill_policy: FillPolicy,
}

impl Session {
    /// Create a session with one empty court and no players.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            players: Vec::new(),
            waiting_queue: Vec::new(),
            rest_area: Vec::new(),
            courts: vec![Court::new("Court 1")],
            game_history: Vec::new(),
            auto_queue: true,
            fill_policy: FillPolicy::default(),
        }
    }

    pub fn get_player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn get_player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn court(&self, id: CourtId) -> Result<&Court, SessionError> {
        self.courts
            .iter()
            .find(|c| c.id == id)
            .ok_or(SessionError::CourtNotFound(id))
    }

    pub fn court_mut(&mut self, id: CourtId) -> Result<&mut Court, SessionError> {
        self.courts
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(SessionError::CourtNotFound(id))
    }

    /// Register a player and append them to the waiting queue.
    pub fn add_player(
        &mut self,
        name: impl Into<String>,
        skill_level: u8,
    ) -> Result<PlayerId, SessionError> {
        let name = name.into();
        let name_trimmed = name.trim();
        if name_trimmed.is_empty() {
            return Err(SessionError::InvalidPlayerName);
        }
        let player = Player::new(name_trimmed, skill_level);
        let id = player.id;
        self.players.push(player);
        self.waiting_queue.push(id);
        Ok(id)
    }

    /// Register `count` players named Player-N (continuing from the roster size),
    /// all queued at the tail.
    pub fn add_batch_players(&mut self, count: usize, skill_level: u8) -> Vec<PlayerId> {
        let start = self.players.len() + 1;
        (0..count)
            .map(|i| {
                let player = Player::new(format!("Player-{}", start + i), skill_level);
                let id = player.id;
                self.players.push(player);
                self.waiting_queue.push(id);
                id
            })
            .collect()
    }

    /// Rename a player and set their skill level.
    pub fn update_player(
        &mut self,
        id: PlayerId,
        name: impl Into<String>,
        skill_level: u8,
    ) -> Result<(), SessionError> {
        let name = name.into();
        let name_trimmed = name.trim();
        if name_trimmed.is_empty() {
            return Err(SessionError::InvalidPlayerName);
        }
        let player = self
            .get_player_mut(id)
            .ok_or(SessionError::PlayerNotFound(id))?;
        player.name = name_trimmed.to_string();
        player.skill_level = skill_level.clamp(
            crate::models::player::MIN_SKILL_LEVEL,
            crate::models::player::MAX_SKILL_LEVEL,
        );
        Ok(())
    }

    /// Remove a player from the roster and from every location collection.
    pub fn remove_player(&mut self, id: PlayerId) -> Result<(), SessionError> {
        let idx = self
            .players
            .iter()
            .position(|p| p.id == id)
            .ok_or(SessionError::PlayerNotFound(id))?;
        self.players.remove(idx);
        self.purge_placements(id);
        Ok(())
    }

    /// Remove every occurrence of a player id from queue, rest area, and all court slots.
    pub fn purge_placements(&mut self, id: PlayerId) {
        self.waiting_queue.retain(|&p| p != id);
        self.rest_area.retain(|&p| p != id);
        for court in &mut self.courts {
            court.team_a.retain(|&p| p != id);
            court.team_b.retain(|&p| p != id);
        }
    }

    /// Add an empty court named Court N.
    pub fn add_court(&mut self) -> CourtId {
        let court = Court::new(format!("Court {}", self.courts.len() + 1));
        let id = court.id;
        self.courts.push(court);
        id
    }

    /// Remove a court, evicting any occupants to the queue tail (team A first).
    /// The last court cannot be removed.
    pub fn remove_court(&mut self, id: CourtId) -> Result<(), SessionError> {
        if self.courts.len() <= 1 {
            return Err(SessionError::LastCourt);
        }
        let idx = self
            .courts
            .iter()
            .position(|c| c.id == id)
            .ok_or(SessionError::CourtNotFound(id))?;
        let court = self.courts.remove(idx);
        self.waiting_queue.extend(court.team_a);
        self.waiting_queue.extend(court.team_b);
        Ok(())
    }

    /// Players registered but not placed in any location.
    pub fn available_players(&self) -> Vec<&Player> {
        self.players
            .iter()
            .filter(|p| {
                !self.waiting_queue.contains(&p.id)
                    && !self.rest_area.contains(&p.id)
                    && !self.courts.iter().any(|c| c.contains(p.id))
            })
            .collect()
    }

    /// Requeue the whole roster in roster order: rest area emptied, all courts
    /// cleared and their clocks stopped.
    pub fn reset_positions(&mut self) {
        self.waiting_queue = self.players.iter().map(|p| p.id).collect();
        self.rest_area.clear();
        for court in &mut self.courts {
            court.clear_teams();
            court.is_warmup_active = false;
            court.is_game_active = false;
            court.warmup_time = 0;
            court.game_time = 0;
        }
    }

    /// Export the persisted-state snapshot. Active flags are cleared on the way
    /// out so an import never resumes a phantom game.
    pub fn export(&self) -> SessionSnapshot {
        let courts = self
            .courts
            .iter()
            .map(|c| {
                let mut c = c.clone();
                c.is_warmup_active = false;
                c.is_game_active = false;
                c
            })
            .collect();
        SessionSnapshot {
            version: EXPORT_VERSION,
            timestamp: Utc::now(),
            players: self.players.clone(),
            game_history: self.game_history.clone(),
            courts,
            rest_area: self.rest_area.clone(),
        }
    }

    /// Replace this session's data with an imported snapshot.
    ///
    /// The snapshot carries no waiting queue, so it is rebuilt from roster
    /// order: every player not on a court and not resting goes back in line.
    pub fn import(&mut self, snapshot: SessionSnapshot) {
        self.players = snapshot.players;
        self.game_history = snapshot.game_history;
        self.courts = snapshot
            .courts
            .into_iter()
            .map(|mut c| {
                c.is_warmup_active = false;
                c.is_game_active = false;
                c
            })
            .collect();
        let roster: Vec<PlayerId> = self.players.iter().map(|p| p.id).collect();
        self.rest_area = snapshot
            .rest_area
            .into_iter()
            .filter(|id| roster.contains(id))
            .collect();
        self.waiting_queue = roster
            .into_iter()
            .filter(|&id| {
                !self.rest_area.contains(&id) && !self.courts.iter().any(|c| c.contains(id))
            })
            .collect();
        if self.courts.is_empty() {
            self.courts.push(Court::new("Court 1"));
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Persisted-state shape: what export writes and import accepts.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    /// 0 for files written before the tag existed.
    #[serde(default)]
    pub version: u32,
    pub timestamp: DateTime<Utc>,
    pub players: Vec<Player>,
    #[serde(default)]
    pub game_history: Vec<GameRecord>,
    pub courts: Vec<Court>,
    #[serde(default)]
    pub rest_area: Vec<PlayerId>,
}
