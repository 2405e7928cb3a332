//! Skill-balanced 2v2 team splitting.

use crate::models::{Player, PlayerId, SessionError, PLAYERS_PER_GAME};
use serde::Serialize;

/// A four-player split into two teams of two.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalancedTeams {
    pub team_a: Vec<PlayerId>,
    pub team_b: Vec<PlayerId>,
}

/// Split exactly four players into two pairs: strongest + weakest against the
/// two middle ranks, by composite rating. The sort is stable, so equal
/// ratings keep their input order.
pub fn balance_teams(players: &[Player]) -> Result<BalancedTeams, SessionError> {
    if players.len() != PLAYERS_PER_GAME {
        return Err(SessionError::InvalidTeamSize {
            expected: PLAYERS_PER_GAME,
            actual: players.len(),
        });
    }
    let mut ranked: Vec<&Player> = players.iter().collect();
    ranked.sort_by(|a, b| {
        b.score()
            .partial_cmp(&a.score())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    Ok(BalancedTeams {
        team_a: vec![ranked[0].id, ranked[3].id],
        team_b: vec![ranked[1].id, ranked[2].id],
    })
}
