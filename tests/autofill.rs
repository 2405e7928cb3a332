//! Integration tests for court auto-fill and team balancing.

use badminton_court_web::{
    auto_fill_all_courts, auto_fill_court, balance_teams, validate_session, FillPolicy, Player,
    PlayerId, Session, SessionError,
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
fn fill_takes_the_front_four_in_queue_order() {
    let mut s = session_with_players(4);
    let ids = queued(&s);
    let court_id = s.courts[0].id;

    auto_fill_court(&mut s, court_id).unwrap();

    assert_eq!(s.courts[0].team_a, vec![ids[0], ids[1]]);
    assert_eq!(s.courts[0].team_b, vec![ids[2], ids[3]]);
    assert!(s.waiting_queue.is_empty());
    assert!(validate_session(&s).is_valid);
}

#[test]
fn fill_fails_on_an_occupied_court() {
    let mut s = session_with_players(8);
    let court_id = s.courts[0].id;
    auto_fill_court(&mut s, court_id).unwrap();

    let queue_before = queued(&s);
    assert!(matches!(
        auto_fill_court(&mut s, court_id),
        Err(SessionError::CourtNotEmpty(_))
    ));
    assert_eq!(queued(&s), queue_before);
}

#[test]
fn fill_fails_when_fewer_than_four_wait() {
    let mut s = session_with_players(3);
    let court_id = s.courts[0].id;
    let result = auto_fill_court(&mut s, court_id);
    assert!(matches!(
        result,
        Err(SessionError::InsufficientPlayers {
            required: 4,
            available: 3
        })
    ));
    assert_eq!(s.waiting_queue.len(), 3);
    assert!(s.courts[0].is_empty());
}

#[test]
fn fill_all_assigns_each_empty_court_in_order() {
    let mut s = session_with_players(8);
    let ids = queued(&s);
    s.add_court();
    let first = s.courts[0].id;
    let second = s.courts[1].id;

    let filled = auto_fill_all_courts(&mut s).unwrap();
    assert_eq!(filled, 2);
    assert_eq!(s.court(first).unwrap().team_a, vec![ids[0], ids[1]]);
    assert_eq!(s.court(first).unwrap().team_b, vec![ids[2], ids[3]]);
    assert_eq!(s.court(second).unwrap().team_a, vec![ids[4], ids[5]]);
    assert_eq!(s.court(second).unwrap().team_b, vec![ids[6], ids[7]]);
    assert!(s.waiting_queue.is_empty());
    assert!(validate_session(&s).is_valid);
}

#[test]
fn fill_all_is_all_or_nothing() {
    let mut s = session_with_players(6);
    s.add_court();

    let result = auto_fill_all_courts(&mut s);
    assert!(matches!(
        result,
        Err(SessionError::InsufficientPlayers {
            required: 8,
            available: 6
        })
    ));
    assert_eq!(s.waiting_queue.len(), 6);
    assert!(s.courts.iter().all(|c| c.is_empty()));
}

#[test]
fn fill_all_with_no_empty_court_fills_nothing() {
    let mut s = session_with_players(8);
    let court_id = s.courts[0].id;
    auto_fill_court(&mut s, court_id).unwrap();

    let filled = auto_fill_all_courts(&mut s).unwrap();
    assert_eq!(filled, 0);
    assert_eq!(s.waiting_queue.len(), 4);
}

#[test]
fn balanced_policy_pairs_strongest_with_weakest() {
    let mut s = Session::new();
    s.fill_policy = FillPolicy::Balanced;
    let strongest = s.add_player("A", 18).unwrap();
    let second = s.add_player("B", 12).unwrap();
    let third = s.add_player("C", 8).unwrap();
    let weakest = s.add_player("D", 2).unwrap();
    let court_id = s.courts[0].id;

    auto_fill_court(&mut s, court_id).unwrap();

    assert_eq!(s.courts[0].team_a, vec![strongest, weakest]);
    assert_eq!(s.courts[0].team_b, vec![second, third]);
}

#[test]
fn balance_is_deterministic_and_stable_on_ties() {
    let players: Vec<Player> = (0..4).map(|i| Player::new(format!("P{i}"), 10)).collect();
    let first = balance_teams(&players).unwrap();
    let second = balance_teams(&players).unwrap();
    assert_eq!(first, second);
    // equal ratings keep input order: ranks are p0..p3 as given
    assert_eq!(first.team_a, vec![players[0].id, players[3].id]);
    assert_eq!(first.team_b, vec![players[1].id, players[2].id]);
}

#[test]
fn balance_weighs_win_rate_not_just_skill() {
    // same skill: a 100% winner outranks a 0% loser
    let mut winner = Player::new("W", 10);
    winner.record_win();
    let mut loser = Player::new("L", 10);
    loser.record_loss();
    let fresh_a = Player::new("F1", 10);
    let fresh_b = Player::new("F2", 10);

    let players = vec![loser.clone(), fresh_a.clone(), winner.clone(), fresh_b.clone()];
    let teams = balance_teams(&players).unwrap();
    // ranking: winner (1.0 rate), fresh_a, fresh_b (0.5), loser (0.0)
    assert_eq!(teams.team_a, vec![winner.id, loser.id]);
    assert_eq!(teams.team_b, vec![fresh_a.id, fresh_b.id]);
}

#[test]
fn balance_rejects_anything_but_four_players() {
    let players: Vec<Player> = (0..3).map(|i| Player::new(format!("P{i}"), 6)).collect();
    assert!(matches!(
        balance_teams(&players),
        Err(SessionError::InvalidTeamSize {
            expected: 4,
            actual: 3
        })
    ));
}
