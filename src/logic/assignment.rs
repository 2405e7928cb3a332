//! Move, swap, and replace operations across the queue, rest area, and courts.
//!
//! Every operation validates against the current state before the first
//! mutation, so a failure never leaves a player half-moved. Swaps are written
//! as in-place cell writes: exchanging two ids never shifts any other queue
//! position or slot.

use crate::logic::locate::{locate_player, Location};
use crate::models::{PlayerId, Session, SessionError, Team, MAX_PLAYERS_PER_TEAM};

/// Address of one occupied cell in the three collections.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Cell {
    Queue(usize),
    Rest(usize),
    Slot { court: usize, team: Team, idx: usize },
}

/// The cell holding `player_id`, courts first, then rest, then queue (the
/// same priority the resolver uses for duplicates).
fn find_cell(session: &Session, player_id: PlayerId) -> Option<Cell> {
    for (ci, court) in session.courts.iter().enumerate() {
        for team in [Team::A, Team::B] {
            if let Some(idx) = court.team(team).iter().position(|&id| id == player_id) {
                return Some(Cell::Slot { court: ci, team, idx });
            }
        }
    }
    if let Some(idx) = session.rest_area.iter().position(|&id| id == player_id) {
        return Some(Cell::Rest(idx));
    }
    if let Some(idx) = session.waiting_queue.iter().position(|&id| id == player_id) {
        return Some(Cell::Queue(idx));
    }
    None
}

/// Overwrite the id stored at `cell`. Never shifts neighbors.
fn write_cell(session: &mut Session, cell: Cell, id: PlayerId) {
    match cell {
        Cell::Queue(i) => session.waiting_queue[i] = id,
        Cell::Rest(i) => session.rest_area[i] = id,
        Cell::Slot { court, team, idx } => session.courts[court].team_mut(team)[idx] = id,
    }
}

/// Remove the entry at `cell`.
fn take_cell(session: &mut Session, cell: Cell) {
    match cell {
        Cell::Queue(i) => {
            session.waiting_queue.remove(i);
        }
        Cell::Rest(i) => {
            session.rest_area.remove(i);
        }
        Cell::Slot { court, team, idx } => {
            session.courts[court].team_mut(team).remove(idx);
        }
    }
}

/// Move a placed player to a new location, or swap with `target_player_id`
/// when one is given (the target location is then taken from the target
/// player's actual position).
///
/// Moving to the queue or rest area appends at the tail and always succeeds.
/// A plain move into a full team slot fails with `SlotFull` and mutates
/// nothing; the caller decides whether to retry as a replace or swap.
pub fn move_player(
    session: &mut Session,
    player_id: PlayerId,
    target: Location,
    target_player_id: Option<PlayerId>,
) -> Result<(), SessionError> {
    if session.get_player(player_id).is_none() {
        return Err(SessionError::PlayerNotFound(player_id));
    }
    if let Some(target_id) = target_player_id {
        return swap_players(session, player_id, target_id);
    }

    let placement = locate_player(session, player_id)
        .ok_or(SessionError::PlayerNotFound(player_id))?;
    if placement.location == target {
        return Ok(());
    }
    let source = find_cell(session, player_id)
        .ok_or(SessionError::PlayerNotFound(player_id))?;

    match target {
        Location::Waiting => {
            take_cell(session, source);
            session.waiting_queue.push(player_id);
        }
        Location::Rest => {
            take_cell(session, source);
            session.rest_area.push(player_id);
        }
        Location::Court { court_id, team } => {
            let court = session.court(court_id)?;
            if court.team(team).len() >= MAX_PLAYERS_PER_TEAM {
                return Err(SessionError::SlotFull { court_id, team });
            }
            take_cell(session, source);
            let court = session.court_mut(court_id)?;
            court.team_mut(team).push(player_id);
        }
    }
    Ok(())
}

/// Exchange the positions of two placed players.
///
/// Both ids keep the other's exact cell: queue swaps touch only the two
/// indices, court swaps only the two slot entries, and cross-category swaps
/// (queue vs. rest vs. court in any combination) leave every other position
/// untouched, including the queue index the outgoing player held.
pub fn swap_players(
    session: &mut Session,
    player_id: PlayerId,
    target_id: PlayerId,
) -> Result<(), SessionError> {
    if player_id == target_id {
        return Ok(());
    }
    if session.get_player(player_id).is_none() {
        return Err(SessionError::PlayerNotFound(player_id));
    }
    if session.get_player(target_id).is_none() {
        return Err(SessionError::InvalidSwap(target_id));
    }
    let cell_a = find_cell(session, player_id)
        .ok_or(SessionError::PlayerNotFound(player_id))?;
    let cell_b = find_cell(session, target_id).ok_or(SessionError::InvalidSwap(target_id))?;

    write_cell(session, cell_a, target_id);
    write_cell(session, cell_b, player_id);
    Ok(())
}

/// Put an unplaced (available) player into the exact cell another player
/// holds; the displaced player goes to the queue tail. If the incoming
/// player is in fact placed somewhere, this is an ordinary swap and the
/// displaced player takes their cell instead.
pub fn replace_player_in_slot(
    session: &mut Session,
    incoming_id: PlayerId,
    outgoing_id: PlayerId,
) -> Result<(), SessionError> {
    if session.get_player(incoming_id).is_none() {
        return Err(SessionError::PlayerNotFound(incoming_id));
    }
    if session.get_player(outgoing_id).is_none() {
        return Err(SessionError::InvalidSwap(outgoing_id));
    }
    if find_cell(session, incoming_id).is_some() {
        return swap_players(session, incoming_id, outgoing_id);
    }
    let cell = find_cell(session, outgoing_id).ok_or(SessionError::InvalidSwap(outgoing_id))?;
    write_cell(session, cell, incoming_id);
    session.waiting_queue.push(outgoing_id);
    Ok(())
}
