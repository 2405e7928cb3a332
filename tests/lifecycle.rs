//! Integration tests for the game lifecycle: start, end, stats, requeue, clocks,
//! and session snapshot round-trips.

use badminton_court_web::{
    auto_fill_court, end_game, set_warmup_time, start_game, start_warmup, tick_timers,
    validate_session, PlayerId, Session, SessionError, Team, EXPORT_VERSION,
};

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
fn start_game_requires_a_full_idle_court() {
    let mut s = session_with_players(4);
    let court_id = s.courts[0].id;

    assert!(matches!(
        start_game(&mut s, court_id),
        Err(SessionError::GameNotReady { occupied: 0, .. })
    ));

    auto_fill_court(&mut s, court_id).unwrap();
    start_game(&mut s, court_id).unwrap();
    assert!(s.courts[0].is_game_active);
    assert_eq!(s.courts[0].game_time, 0);

    assert!(matches!(
        start_game(&mut s, court_id),
        Err(SessionError::GameAlreadyActive(_))
    ));
}

#[test]
fn end_game_updates_stats_and_requeues_in_team_order() {
    let mut s = session_with_players(4);
    s.auto_queue = false;
    let ids = queued(&s);
    let court_id = s.courts[0].id;
    auto_fill_court(&mut s, court_id).unwrap();
    start_game(&mut s, court_id).unwrap();
    tick_timers(&mut s);
    tick_timers(&mut s);

    end_game(&mut s, court_id, Team::A).unwrap();

    for &id in &ids[..2] {
        let p = s.get_player(id).unwrap();
        assert_eq!((p.wins, p.losses, p.total_games), (1, 0, 1));
    }
    for &id in &ids[2..] {
        let p = s.get_player(id).unwrap();
        assert_eq!((p.wins, p.losses, p.total_games), (0, 1, 1));
    }
    assert_eq!(queued(&s), ids);
    assert!(s.courts[0].is_empty());
    assert!(!s.courts[0].is_game_active);
    assert_eq!(s.courts[0].game_result, Some(Team::A));

    assert_eq!(s.game_history.len(), 1);
    let record = &s.game_history[0];
    assert_eq!(record.court_id, court_id);
    assert_eq!(record.team_a, vec![ids[0], ids[1]]);
    assert_eq!(record.team_b, vec![ids[2], ids[3]]);
    assert_eq!(record.winner, Team::A);
    assert_eq!(record.duration, 2);
    assert!(validate_session(&s).is_valid);
}

#[test]
fn end_game_without_an_active_game_fails() {
    let mut s = session_with_players(4);
    let court_id = s.courts[0].id;
    auto_fill_court(&mut s, court_id).unwrap();
    assert!(matches!(
        end_game(&mut s, court_id, Team::B),
        Err(SessionError::NoActiveGame(_))
    ));
    assert!(s.game_history.is_empty());
}

#[test]
fn auto_refill_pulls_from_the_queue_that_includes_the_finishers() {
    let mut s = session_with_players(8);
    let ids = queued(&s);
    let court_id = s.courts[0].id;
    auto_fill_court(&mut s, court_id).unwrap();
    start_game(&mut s, court_id).unwrap();

    end_game(&mut s, court_id, Team::B).unwrap();

    // the next four in line rotate on; the finishers wait at the tail
    assert_eq!(s.courts[0].team_a, vec![ids[4], ids[5]]);
    assert_eq!(s.courts[0].team_b, vec![ids[6], ids[7]]);
    assert_eq!(queued(&s), vec![ids[0], ids[1], ids[2], ids[3]]);
    assert!(validate_session(&s).is_valid);
}

#[test]
fn auto_refill_can_rotate_the_same_four_straight_back_in() {
    let mut s = session_with_players(4);
    let ids = queued(&s);
    let court_id = s.courts[0].id;
    auto_fill_court(&mut s, court_id).unwrap();
    start_game(&mut s, court_id).unwrap();

    end_game(&mut s, court_id, Team::A).unwrap();

    assert_eq!(s.courts[0].team_a, vec![ids[0], ids[1]]);
    assert_eq!(s.courts[0].team_b, vec![ids[2], ids[3]]);
    assert!(s.waiting_queue.is_empty());
}

#[test]
fn ticks_advance_game_clock_and_count_warmup_down() {
    let mut s = session_with_players(4);
    let court_id = s.courts[0].id;
    set_warmup_time(&mut s, court_id, 5).unwrap();
    assert_eq!(s.courts[0].warmup_time, 300);
    start_warmup(&mut s, court_id).unwrap();

    tick_timers(&mut s);
    tick_timers(&mut s);
    assert_eq!(s.courts[0].warmup_time, 298);

    // countdown reaching zero deactivates the warmup
    s.courts[0].warmup_time = 1;
    tick_timers(&mut s);
    assert_eq!(s.courts[0].warmup_time, 0);
    assert!(!s.courts[0].is_warmup_active);

    auto_fill_court(&mut s, court_id).unwrap();
    start_game(&mut s, court_id).unwrap();
    tick_timers(&mut s);
    tick_timers(&mut s);
    tick_timers(&mut s);
    assert_eq!(s.courts[0].game_time, 3);
}

#[test]
fn removing_a_court_evicts_its_players_to_the_queue() {
    let mut s = session_with_players(4);
    let second = s.add_court();
    auto_fill_court(&mut s, second).unwrap();
    let on_court = {
        let c = s.court(second).unwrap();
        let mut v = c.team_a.clone();
        v.extend(&c.team_b);
        v
    };

    s.remove_court(second).unwrap();
    assert_eq!(s.courts.len(), 1);
    assert_eq!(queued(&s), on_court);
    assert!(validate_session(&s).is_valid);

    let last = s.courts[0].id;
    assert!(matches!(s.remove_court(last), Err(SessionError::LastCourt)));
}

#[test]
fn removing_a_player_purges_every_placement() {
    let mut s = session_with_players(4);
    let ids = queued(&s);
    let court_id = s.courts[0].id;
    auto_fill_court(&mut s, court_id).unwrap();

    s.remove_player(ids[0]).unwrap();
    assert!(s.get_player(ids[0]).is_none());
    assert!(!s.courts[0].contains(ids[0]));
    assert!(validate_session(&s).is_valid);
}

#[test]
fn reset_positions_requeues_the_whole_roster() {
    let mut s = session_with_players(6);
    let ids = queued(&s);
    let court_id = s.courts[0].id;
    auto_fill_court(&mut s, court_id).unwrap();
    s.rest_area.push(ids[4]);
    s.waiting_queue.retain(|&id| id != ids[4]);

    s.reset_positions();
    assert_eq!(queued(&s), ids);
    assert!(s.rest_area.is_empty());
    assert!(s.courts.iter().all(|c| c.is_empty()));
    assert!(validate_session(&s).is_valid);
}

#[test]
fn snapshot_round_trip_restores_placements_and_rebuilds_the_queue() {
    let mut s = session_with_players(6);
    s.auto_queue = false;
    let ids = queued(&s);
    let court_id = s.courts[0].id;
    auto_fill_court(&mut s, court_id).unwrap();
    start_game(&mut s, court_id).unwrap();
    end_game(&mut s, court_id, Team::A).unwrap();
    // court now holds ids[4], ids[5], ids[0], ids[1]; queue is [ids[2], ids[3]]
    auto_fill_court(&mut s, court_id).unwrap();
    s.rest_area.push(ids[2]);
    s.waiting_queue.retain(|&id| id != ids[2]);

    let snapshot = s.export();
    assert_eq!(snapshot.version, EXPORT_VERSION);
    assert!(snapshot.courts.iter().all(|c| !c.is_game_active));

    // the snapshot survives the JSON contract unchanged
    let json = serde_json::to_string(&snapshot).unwrap();
    let parsed = serde_json::from_str(&json).unwrap();

    let mut restored = Session::new();
    restored.import(parsed);
    assert_eq!(restored.players, s.players);
    assert_eq!(restored.game_history, s.game_history);
    assert_eq!(restored.rest_area, vec![ids[2]]);
    assert_eq!(
        restored.court(court_id).unwrap().team_a,
        s.court(court_id).unwrap().team_a
    );
    // queue holds everyone not on a court and not resting, in roster order
    assert_eq!(restored.waiting_queue, vec![ids[3]]);
    assert!(validate_session(&restored).is_valid);
}
