//! Data structures for the court manager: players, courts, games, session state.

mod court;
mod game;
mod player;
mod session;

pub use court::{Court, CourtId, Team, MAX_PLAYERS_PER_TEAM, PLAYERS_PER_GAME};
pub use game::{GameRecord, GameRecordId};
pub use player::{Player, PlayerId, DEFAULT_SKILL_LEVEL, MAX_SKILL_LEVEL, MIN_SKILL_LEVEL};
pub use session::{
    FillPolicy, Session, SessionError, SessionId, SessionSnapshot, EXPORT_VERSION,
};
