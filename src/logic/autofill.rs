//! Pulling queued players onto empty courts.

use crate::logic::balance::balance_teams;
use crate::models::{
    CourtId, FillPolicy, Player, PlayerId, Session, SessionError, PLAYERS_PER_GAME,
};

/// Split four queue-ordered ids into the two team rosters per the session's
/// fill policy: positional (first two vs. last two) or skill-balanced.
fn split_teams(
    session: &Session,
    four: &[PlayerId],
) -> Result<(Vec<PlayerId>, Vec<PlayerId>), SessionError> {
    match session.fill_policy {
        FillPolicy::Positional => Ok((four[..2].to_vec(), four[2..].to_vec())),
        FillPolicy::Balanced => {
            let players: Vec<Player> = four
                .iter()
                .map(|&id| {
                    session
                        .get_player(id)
                        .cloned()
                        .ok_or(SessionError::PlayerNotFound(id))
                })
                .collect::<Result<_, _>>()?;
            let teams = balance_teams(&players)?;
            Ok((teams.team_a, teams.team_b))
        }
    }
}

/// Fill one empty, idle court with the four players at the queue head
/// (FIFO: whoever queued first plays first). Fails without mutating if the
/// court is occupied or mid-game, or if fewer than four players wait.
pub fn auto_fill_court(session: &mut Session, court_id: CourtId) -> Result<(), SessionError> {
    {
        let court = session.court(court_id)?;
        if court.occupancy() > 0 || court.is_game_active {
            return Err(SessionError::CourtNotEmpty(court_id));
        }
    }
    if session.waiting_queue.len() < PLAYERS_PER_GAME {
        return Err(SessionError::InsufficientPlayers {
            required: PLAYERS_PER_GAME,
            available: session.waiting_queue.len(),
        });
    }
    let four: Vec<PlayerId> = session.waiting_queue[..PLAYERS_PER_GAME].to_vec();
    let (team_a, team_b) = split_teams(session, &four)?;

    session.waiting_queue.drain(..PLAYERS_PER_GAME);
    let court = session.court_mut(court_id)?;
    court.team_a = team_a;
    court.team_b = team_b;
    Ok(())
}

/// Fill every empty, idle court from the queue head, four players per court
/// in court order. All-or-nothing: if the queue cannot cover every empty
/// court, nothing is assigned. Returns the number of courts filled.
pub fn auto_fill_all_courts(session: &mut Session) -> Result<usize, SessionError> {
    let empty: Vec<CourtId> = session
        .courts
        .iter()
        .filter(|c| c.occupancy() == 0 && !c.is_game_active)
        .map(|c| c.id)
        .collect();
    if empty.is_empty() {
        return Ok(0);
    }
    let required = empty.len() * PLAYERS_PER_GAME;
    if session.waiting_queue.len() < required {
        return Err(SessionError::InsufficientPlayers {
            required,
            available: session.waiting_queue.len(),
        });
    }

    let mut assignments = Vec::with_capacity(empty.len());
    for (i, &court_id) in empty.iter().enumerate() {
        let four = &session.waiting_queue[i * PLAYERS_PER_GAME..(i + 1) * PLAYERS_PER_GAME];
        let (team_a, team_b) = split_teams(session, four)?;
        assignments.push((court_id, team_a, team_b));
    }

    session.waiting_queue.drain(..required);
    for (court_id, team_a, team_b) in assignments {
        let court = session.court_mut(court_id)?;
        court.team_a = team_a;
        court.team_b = team_b;
    }
    Ok(empty.len())
}
