//! Session operations: locating, balancing, assignment, fills, lifecycle, validation.

mod assignment;
mod autofill;
mod balance;
mod lifecycle;
mod locate;
mod validate;

pub use assignment::{move_player, replace_player_in_slot, swap_players};
pub use autofill::{auto_fill_all_courts, auto_fill_court};
pub use balance::{balance_teams, BalancedTeams};
pub use lifecycle::{
    end_game, pause_warmup, reset_warmup, set_warmup_time, start_game, start_warmup, tick_timers,
};
pub use locate::{locate_player, Location, Placement};
pub use validate::{validate_session, DuplicatePlacement, ValidationReport};
