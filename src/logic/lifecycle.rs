//! Game lifecycle: start, finish with stats and requeue, warmup and clocks.

use crate::logic::autofill::auto_fill_court;
use crate::models::{
    CourtId, GameRecord, PlayerId, Session, SessionError, Team, PLAYERS_PER_GAME,
};

/// Start a game on a full court. Requires exactly four players across both
/// teams and no game already running; resets the game clock.
pub fn start_game(session: &mut Session, court_id: CourtId) -> Result<(), SessionError> {
    {
        let court = session.court(court_id)?;
        if court.is_game_active {
            return Err(SessionError::GameAlreadyActive(court_id));
        }
        let occupied = court.occupancy();
        if occupied != PLAYERS_PER_GAME {
            return Err(SessionError::GameNotReady { court_id, occupied });
        }
    }
    let court = session.court_mut(court_id)?;
    court.is_game_active = true;
    court.game_time = 0;
    Ok(())
}

/// Finish the game on a court.
///
/// Appends a `GameRecord` to the history, applies a win to each winner and a
/// loss to each loser, empties the court, and appends all four players to the
/// queue tail in team-A-then-team-B order. When auto-queue is on, the court
/// is refilled from the queue that already contains the finishers, so they
/// can rotate straight back in if the line is short.
pub fn end_game(session: &mut Session, court_id: CourtId, winner: Team) -> Result<(), SessionError> {
    let record = {
        let court = session.court(court_id)?;
        if !court.is_game_active {
            return Err(SessionError::NoActiveGame(court_id));
        }
        GameRecord::from_court(court, winner)
    };

    // all four must still be registered before any stat is touched
    let participants: Vec<PlayerId> = record
        .team_a
        .iter()
        .chain(record.team_b.iter())
        .copied()
        .collect();
    for &id in &participants {
        if session.get_player(id).is_none() {
            return Err(SessionError::PlayerNotFound(id));
        }
    }

    let winners = match winner {
        Team::A => &record.team_a,
        Team::B => &record.team_b,
    };
    for &id in &participants {
        let player = session
            .get_player_mut(id)
            .ok_or(SessionError::PlayerNotFound(id))?;
        if winners.contains(&id) {
            player.record_win();
        } else {
            player.record_loss();
        }
    }

    let court = session.court_mut(court_id)?;
    court.clear_teams();
    court.is_game_active = false;
    court.game_time = 0;
    court.game_result = Some(winner);

    session.waiting_queue.extend(participants);
    session.game_history.push(record);

    if session.auto_queue {
        if let Err(err) = auto_fill_court(session, court_id) {
            log::debug!("court {} not refilled: {}", court_id, err);
        }
    }
    Ok(())
}

/// One-second tick for every court clock: active warmups count down (and
/// deactivate at zero), active games count up. Touches nothing else.
pub fn tick_timers(session: &mut Session) {
    for court in &mut session.courts {
        if court.is_warmup_active && court.warmup_time > 0 {
            court.warmup_time -= 1;
            if court.warmup_time == 0 {
                court.is_warmup_active = false;
            }
        }
        if court.is_game_active {
            court.game_time += 1;
        }
    }
}

/// Set a court's warmup length in minutes. Remembers the value for reset and
/// leaves the countdown paused.
pub fn set_warmup_time(
    session: &mut Session,
    court_id: CourtId,
    minutes: u32,
) -> Result<(), SessionError> {
    let court = session.court_mut(court_id)?;
    court.warmup_time = minutes * 60;
    court.warmup_original_time = minutes * 60;
    court.is_warmup_active = false;
    Ok(())
}

pub fn start_warmup(session: &mut Session, court_id: CourtId) -> Result<(), SessionError> {
    session.court_mut(court_id)?.is_warmup_active = true;
    Ok(())
}

pub fn pause_warmup(session: &mut Session, court_id: CourtId) -> Result<(), SessionError> {
    session.court_mut(court_id)?.is_warmup_active = false;
    Ok(())
}

/// Put the warmup countdown back to its originally set length, paused.
pub fn reset_warmup(session: &mut Session, court_id: CourtId) -> Result<(), SessionError> {
    let court = session.court_mut(court_id)?;
    court.warmup_time = court.warmup_original_time;
    court.is_warmup_active = false;
    Ok(())
}
