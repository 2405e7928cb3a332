//! Locating players across the waiting queue, rest area, and court slots.

use crate::models::{CourtId, PlayerId, Session, Team};
use serde::{Deserialize, Serialize};

/// Where a player currently sits.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Location {
    Waiting,
    Rest,
    Court { court_id: CourtId, team: Team },
}

/// Result of locating a player, including duplicate-placement detection.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    /// The authoritative location. When the player appears more than once,
    /// courts win over the rest area and the rest area over the queue: a
    /// player mid-match is the least safe to silently relocate.
    pub location: Location,
    pub is_duplicate: bool,
    /// Every occurrence found, in scan order (queue, rest, courts).
    pub occurrences: Vec<Location>,
}

/// Every occurrence of `player_id`, in scan order. A clean state yields at
/// most one entry; duplicates within a single collection count individually.
pub(crate) fn collect_occurrences(session: &Session, player_id: PlayerId) -> Vec<Location> {
    let mut occurrences = Vec::new();
    for &id in &session.waiting_queue {
        if id == player_id {
            occurrences.push(Location::Waiting);
        }
    }
    for &id in &session.rest_area {
        if id == player_id {
            occurrences.push(Location::Rest);
        }
    }
    for court in &session.courts {
        for team in [Team::A, Team::B] {
            for &id in court.team(team) {
                if id == player_id {
                    occurrences.push(Location::Court {
                        court_id: court.id,
                        team,
                    });
                }
            }
        }
    }
    occurrences
}

/// Find the single location holding a player, or `None` if they are
/// registered but unplaced. A duplicate placement is never resolved
/// arbitrarily: the court occurrence (first in scan order) wins, then rest,
/// then waiting, and the full occurrence list rides along for the caller.
pub fn locate_player(session: &Session, player_id: PlayerId) -> Option<Placement> {
    let occurrences = collect_occurrences(session, player_id);
    if occurrences.is_empty() {
        return None;
    }
    let location = occurrences
        .iter()
        .copied()
        .find(|l| matches!(l, Location::Court { .. }))
        .or_else(|| {
            occurrences
                .iter()
                .copied()
                .find(|l| matches!(l, Location::Rest))
        })
        .unwrap_or(occurrences[0]);
    Some(Placement {
        location,
        is_duplicate: occurrences.len() > 1,
        occurrences,
    })
}
