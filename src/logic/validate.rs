//! Whole-state consistency scan for duplicate placements.

use crate::logic::locate::{collect_occurrences, Location};
use crate::models::{PlayerId, Session, Team};
use serde::Serialize;

/// One player found in more than one place.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicatePlacement {
    pub player_id: PlayerId,
    pub count: usize,
    pub locations: Vec<Location>,
}

/// Outcome of a consistency scan. Read-only; repairs are the caller's call.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub duplicates: Vec<DuplicatePlacement>,
}

/// Tally every occurrence of every id across the queue, rest area, and all
/// court slots; report each id that appears more than once with its full
/// location list. Ids that are placed but missing from the roster are
/// scanned too.
pub fn validate_session(session: &Session) -> ValidationReport {
    let mut seen: Vec<PlayerId> = Vec::new();
    for &id in &session.waiting_queue {
        if !seen.contains(&id) {
            seen.push(id);
        }
    }
    for &id in &session.rest_area {
        if !seen.contains(&id) {
            seen.push(id);
        }
    }
    for court in &session.courts {
        for team in [Team::A, Team::B] {
            for &id in court.team(team) {
                if !seen.contains(&id) {
                    seen.push(id);
                }
            }
        }
    }

    let duplicates: Vec<DuplicatePlacement> = seen
        .into_iter()
        .filter_map(|id| {
            let locations = collect_occurrences(session, id);
            if locations.len() > 1 {
                Some(DuplicatePlacement {
                    player_id: id,
                    count: locations.len(),
                    locations,
                })
            } else {
                None
            }
        })
        .collect();

    ValidationReport {
        is_valid: duplicates.is_empty(),
        duplicates,
    }
}
