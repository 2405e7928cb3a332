//! Badminton court manager: library with models and assignment logic.

pub mod logic;
pub mod models;

pub use logic::{
    auto_fill_all_courts, auto_fill_court, balance_teams, end_game, locate_player, move_player,
    pause_warmup, replace_player_in_slot, reset_warmup, set_warmup_time, start_game, start_warmup,
    swap_players, tick_timers, validate_session, BalancedTeams, DuplicatePlacement, Location,
    Placement, ValidationReport,
};
pub use models::{
    Court, CourtId, FillPolicy, GameRecord, GameRecordId, Player, PlayerId, Session, SessionError,
    SessionId, SessionSnapshot, Team, DEFAULT_SKILL_LEVEL, EXPORT_VERSION, MAX_PLAYERS_PER_TEAM,
    MAX_SKILL_LEVEL, MIN_SKILL_LEVEL, PLAYERS_PER_GAME,
};
