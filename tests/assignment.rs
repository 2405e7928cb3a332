//! Integration tests for the assignment engine: locating, moving, swapping, replacing.

use badminton_court_web::{
    locate_player, move_player, replace_player_in_slot, swap_players, validate_session, Location,
    PlayerId, Session, SessionError, Team,
};
use uuid::Uuid;

fn session_with_players(n: usize) -> Session {
    let mut s = Session::new();
    for i in 0..n {
        s.add_player(format!("P{i}"), 6).unwrap();
    }
    s
}

fn queued(s: &Session) -> Vec<PlayerId> {
    s.waiting_queue.clone()
}

#[test]
fn locate_finds_queued_player() {
    let s = session_with_players(3);
    let p = s.waiting_queue[1];
    let placement = locate_player(&s, p).unwrap();
    assert_eq!(placement.location, Location::Waiting);
    assert!(!placement.is_duplicate);
    assert_eq!(placement.occurrences.len(), 1);
}

#[test]
fn locate_returns_none_for_unplaced_player() {
    let mut s = session_with_players(2);
    let p = s.waiting_queue[0];
    s.purge_placements(p);
    assert!(locate_player(&s, p).is_none());
}

#[test]
fn duplicate_placement_resolves_to_court_and_lists_all_occurrences() {
    let mut s = session_with_players(2);
    let p = s.waiting_queue[0];
    let court_id = s.courts[0].id;
    // corrupt the state on purpose: same id queued and on court
    s.courts[0].team_a.push(p);

    let placement = locate_player(&s, p).unwrap();
    assert_eq!(
        placement.location,
        Location::Court {
            court_id,
            team: Team::A
        }
    );
    assert!(placement.is_duplicate);
    assert_eq!(placement.occurrences.len(), 2);
    assert!(placement.occurrences.contains(&Location::Waiting));
}

#[test]
fn move_to_current_location_is_a_noop() {
    let mut s = session_with_players(4);
    let before = queued(&s);
    let p = before[2];
    move_player(&mut s, p, Location::Waiting, None).unwrap();
    assert_eq!(queued(&s), before);
}

#[test]
fn move_unknown_player_fails() {
    let mut s = session_with_players(2);
    let ghost = Uuid::new_v4();
    assert!(matches!(
        move_player(&mut s, ghost, Location::Rest, None),
        Err(SessionError::PlayerNotFound(id)) if id == ghost
    ));
}

#[test]
fn move_to_rest_appends_at_tail() {
    let mut s = session_with_players(3);
    let ids = queued(&s);
    move_player(&mut s, ids[0], Location::Rest, None).unwrap();
    move_player(&mut s, ids[2], Location::Rest, None).unwrap();
    assert_eq!(s.rest_area, vec![ids[0], ids[2]]);
    assert_eq!(queued(&s), vec![ids[1]]);
    assert!(validate_session(&s).is_valid);
}

#[test]
fn move_into_full_slot_fails_without_mutating() {
    let mut s = session_with_players(3);
    let ids = queued(&s);
    let court_id = s.courts[0].id;
    let slot = Location::Court {
        court_id,
        team: Team::A,
    };
    move_player(&mut s, ids[0], slot, None).unwrap();
    move_player(&mut s, ids[1], slot, None).unwrap();

    let result = move_player(&mut s, ids[2], slot, None);
    assert!(matches!(result, Err(SessionError::SlotFull { .. })));
    assert_eq!(s.courts[0].team_a, vec![ids[0], ids[1]]);
    assert_eq!(queued(&s), vec![ids[2]]);
    assert!(validate_session(&s).is_valid);
}

#[test]
fn swap_within_queue_touches_only_the_two_positions() {
    let mut s = session_with_players(6);
    let ids = queued(&s);
    swap_players(&mut s, ids[1], ids[4]).unwrap();
    assert_eq!(
        queued(&s),
        vec![ids[0], ids[4], ids[2], ids[3], ids[1], ids[5]]
    );
}

#[test]
fn rest_queue_swap_preserves_queue_index() {
    // p0 rests; p1 sits at queue index 0; after the swap p1 rests and p0 is
    // back at index 0 with the queue length unchanged
    let mut s = session_with_players(4);
    let ids = queued(&s);
    move_player(&mut s, ids[0], Location::Rest, None).unwrap();
    assert_eq!(queued(&s), vec![ids[1], ids[2], ids[3]]);

    move_player(&mut s, ids[0], Location::Waiting, Some(ids[1])).unwrap();
    assert_eq!(s.rest_area, vec![ids[1]]);
    assert_eq!(queued(&s), vec![ids[0], ids[2], ids[3]]);
    assert!(validate_session(&s).is_valid);
}

#[test]
fn court_queue_swap_preserves_both_cells() {
    let mut s = session_with_players(4);
    let ids = queued(&s);
    let court_id = s.courts[0].id;
    let slot = Location::Court {
        court_id,
        team: Team::A,
    };
    move_player(&mut s, ids[0], slot, None).unwrap();
    move_player(&mut s, ids[1], slot, None).unwrap();
    assert_eq!(queued(&s), vec![ids[2], ids[3]]);

    swap_players(&mut s, ids[0], ids[3]).unwrap();
    assert_eq!(s.courts[0].team_a, vec![ids[3], ids[1]]);
    assert_eq!(queued(&s), vec![ids[2], ids[0]]);
    assert!(validate_session(&s).is_valid);
}

#[test]
fn swap_with_unplaced_target_fails() {
    let mut s = session_with_players(3);
    let ids = queued(&s);
    s.purge_placements(ids[2]);
    let before = queued(&s);
    assert!(matches!(
        swap_players(&mut s, ids[0], ids[2]),
        Err(SessionError::InvalidSwap(id)) if id == ids[2]
    ));
    assert_eq!(queued(&s), before);
}

#[test]
fn replace_puts_available_player_in_slot_and_requeues_the_displaced() {
    let mut s = session_with_players(4);
    let ids = queued(&s);
    let court_id = s.courts[0].id;
    let slot = Location::Court {
        court_id,
        team: Team::B,
    };
    move_player(&mut s, ids[0], slot, None).unwrap();
    move_player(&mut s, ids[1], slot, None).unwrap();
    s.purge_placements(ids[3]);

    replace_player_in_slot(&mut s, ids[3], ids[0]).unwrap();
    assert_eq!(s.courts[0].team_b, vec![ids[3], ids[1]]);
    assert_eq!(queued(&s), vec![ids[2], ids[0]]);
    assert!(validate_session(&s).is_valid);
}

#[test]
fn validator_reports_duplicate_with_both_locations() {
    let mut s = session_with_players(2);
    let p = s.waiting_queue[0];
    s.courts[0].team_a.push(p);

    let report = validate_session(&s);
    assert!(!report.is_valid);
    assert_eq!(report.duplicates.len(), 1);
    let dup = &report.duplicates[0];
    assert_eq!(dup.player_id, p);
    assert_eq!(dup.count, 2);
    assert!(dup.locations.contains(&Location::Waiting));
    assert!(dup
        .locations
        .iter()
        .any(|l| matches!(l, Location::Court { .. })));
}

#[test]
fn every_operation_keeps_a_valid_state_valid() {
    let mut s = session_with_players(6);
    let ids = queued(&s);
    let court_id = s.courts[0].id;

    move_player(
        &mut s,
        ids[0],
        Location::Court {
            court_id,
            team: Team::A,
        },
        None,
    )
    .unwrap();
    assert!(validate_session(&s).is_valid);

    move_player(&mut s, ids[1], Location::Rest, None).unwrap();
    assert!(validate_session(&s).is_valid);

    swap_players(&mut s, ids[0], ids[2]).unwrap();
    assert!(validate_session(&s).is_valid);

    swap_players(&mut s, ids[1], ids[3]).unwrap();
    assert!(validate_session(&s).is_valid);
}
