//! Whole-match scenarios driven through the public API.
//!
//! Run with: cargo test -p oche-core --test match_flow

use oche_core::model::{RedemptionStatus, OVERTIME_SCORE};
use oche_core::{
    apply, initialize, Action, CricketSettings, GameError, GameSettings, Match, MatchRecord,
    Participant, PlayerId, Target, X01Settings,
};

fn roster(names: &[&str]) -> Vec<Participant> {
    names
        .iter()
        .map(|n| Participant::new(*n, None).unwrap())
        .collect()
}

/// Apply an action and check every state invariant afterwards
fn step(state: &Match, action: Action) -> Match {
    let next = apply(state, &action).unwrap();
    let problems = next.audit();
    assert!(problems.is_empty(), "after {:?}: {:?}", action, problems);
    next
}

fn throw(state: &Match, base: u32, multiplier: u32) -> Match {
    step(state, Action::RecordThrow { base, multiplier })
}

fn turn(state: &Match, darts: &[(u32, u32)]) -> Match {
    darts
        .iter()
        .fold(state.clone(), |s, (b, m)| throw(&s, *b, *m))
}

fn ids(players: &[Participant]) -> Vec<PlayerId> {
    players.iter().map(|p| p.id).collect()
}

#[test]
fn test_x01_bust_rollback() {
    let players = roster(&["Ann", "Bob"]);
    let id = ids(&players);
    let mut game = initialize(X01Settings::new(100, false).unwrap().into(), &players).unwrap();
    game = turn(&game, &[(20, 2), (20, 1), (0, 1)]);
    game = turn(&game, &[(1, 1), (1, 1), (1, 1)]);
    assert_eq!(game.score_of(id[0]), Some(40));

    game = throw(&game, 20, 1);
    assert_eq!(game.score_of(id[0]), Some(20));
    game = throw(&game, 25, 1);
    assert_eq!(game.score_of(id[0]), Some(40));
    assert_eq!(game.current_turn.player_id, id[1]);
    assert_eq!(game.stats(id[0]).darts_thrown, 5);
}

#[test]
fn test_x01_score_stays_put_after_single_bust_dart() {
    let players = roster(&["Ann", "Bob"]);
    let id = ids(&players);
    let game = initialize(X01Settings::new(20, false).unwrap().into(), &players).unwrap();
    let game = throw(&game, 25, 1);
    assert_eq!(game.score_of(id[0]), Some(20));
    assert_eq!(game.current_turn.player_id, id[1]);
}

#[test]
fn test_x01_exact_finish_by_last_seat_wins() {
    let players = roster(&["Ann", "Bob"]);
    let id = ids(&players);
    let game = initialize(X01Settings::new(40, false).unwrap().into(), &players).unwrap();
    let game = turn(&game, &[(1, 1), (1, 1), (1, 1)]);
    let game = throw(&game, 20, 2);
    assert_eq!(game.score_of(id[1]), Some(0));
    assert!(game.game_over);
    assert_eq!(game.winner_id, Some(id[1]));
    assert!(game.current_player_id().is_none());
}

#[test]
fn test_x01_double_out_single_is_bust() {
    let players = roster(&["Ann", "Bob"]);
    let id = ids(&players);
    let game = initialize(X01Settings::new(20, true).unwrap().into(), &players).unwrap();
    let game = turn(&game, &[(1, 1), (1, 1), (1, 1)]);
    let game = throw(&game, 20, 1);
    assert!(!game.game_over);
    assert_eq!(game.score_of(id[1]), Some(20));
    assert_eq!(game.current_turn.player_id, id[0]);
}

#[test]
fn test_redemption_into_overtime() {
    let players = roster(&["Ann", "Bob", "Cat"]);
    let id = ids(&players);
    let mut game = initialize(X01Settings::new(60, false).unwrap().into(), &players).unwrap();

    game = throw(&game, 20, 3);
    assert!(game.x01().unwrap().redemption_mode);
    game = throw(&game, 20, 3);
    game = turn(&game, &[(5, 1), (5, 1), (5, 1)]);

    let x01 = game.x01().unwrap();
    assert!(x01.overtime);
    assert_eq!(x01.players[0].score, OVERTIME_SCORE);
    assert_eq!(x01.players[1].score, OVERTIME_SCORE);
    assert!(x01.players[2].eliminated);
    assert_eq!(x01.players[2].redemption, RedemptionStatus::Failed);

    // Cat never gets the throw again, whatever happens
    for _ in 0..5 {
        game = turn(&game, &[(1, 1), (1, 1), (1, 1)]);
        assert_ne!(game.current_turn.player_id, id[2]);
    }
    assert_eq!(game.score_of(id[0]), Some(OVERTIME_SCORE - 9));
    assert_eq!(game.current_turn.player_id, id[1]);

    // Bob busts out of 95 and play returns to Ann
    game = turn(&game, &[(20, 3), (20, 2)]);
    assert!(!game.game_over);
    assert_eq!(game.score_of(id[1]), Some(OVERTIME_SCORE - 6));
    assert_eq!(game.current_turn.player_id, id[0]);
}

#[test]
fn test_overtime_finish_wins_for_first_seat() {
    let players = roster(&["Ann", "Bob", "Cat"]);
    let id = ids(&players);
    let mut game = initialize(X01Settings::new(60, false).unwrap().into(), &players).unwrap();
    game = throw(&game, 20, 3);
    game = throw(&game, 20, 3);
    game = step(&game, Action::AdvanceTurn);
    assert!(game.x01().unwrap().overtime);

    game = turn(&game, &[(20, 3), (20, 2), (1, 1)]);
    assert!(game.game_over);
    assert_eq!(game.winner_id, Some(id[0]));
}

#[test]
fn test_cricket_closing_with_repeat_triples() {
    let players = roster(&["Ann", "Bob"]);
    let id = ids(&players);
    let game = initialize(CricketSettings::default().into(), &players).unwrap();
    let game = turn(&game, &[(20, 3), (20, 3), (20, 3)]);
    let ann = game.cricket().unwrap().player(id[0]).unwrap();
    let marks = ann.marks(Target::Twenty);
    assert_eq!(marks.marks, 3);
    assert!(marks.closed);

    // Bob closes 20 too; Ann's next overflow scores nothing
    let game = turn(&game, &[(20, 3), (0, 1), (0, 1)]);
    let bob_before = game.score_of(id[1]).unwrap();
    let ann_before = game.score_of(id[0]).unwrap();
    let game = throw(&game, 20, 3);
    assert_eq!(game.score_of(id[1]), Some(bob_before));
    assert_eq!(game.score_of(id[0]), Some(ann_before));
}

#[test]
fn test_cricket_overflow_scores_against_open_player() {
    let players = roster(&["Ann", "Bob"]);
    let id = ids(&players);
    let game = initialize(CricketSettings::default().into(), &players).unwrap();
    let game = turn(&game, &[(0, 1), (0, 1), (0, 1)]);
    let game = throw(&game, 20, 1);
    let game = throw(&game, 20, 3);
    assert_eq!(game.score_of(id[0]), Some(20));
    assert_eq!(game.score_of(id[1]), Some(0));
}

#[test]
fn test_rotation_round_increment() {
    let players = roster(&["Ann", "Bob", "Cat"]);
    let id = ids(&players);
    let mut game = initialize(X01Settings::default().into(), &players).unwrap();
    let mut rounds = vec![game.current_round];
    for _ in 0..9 {
        game = throw(&game, 1, 1);
        rounds.push(game.current_round);
    }
    assert_eq!(rounds.iter().filter(|r| **r == 2).count(), 1);
    assert_eq!(game.current_round, 2);
    assert_eq!(game.current_turn.player_id, id[0]);
}

#[test]
fn test_dart_counting_includes_misses_and_busts() {
    let players = roster(&["Ann", "Bob"]);
    let id = ids(&players);
    let mut game = initialize(X01Settings::new(50, true).unwrap().into(), &players).unwrap();
    game = turn(&game, &[(0, 1), (0, 1), (0, 1)]);
    game = turn(&game, &[(20, 3)]);
    game = turn(&game, &[(10, 1), (20, 2)]);
    assert_eq!(game.stats(id[0]).darts_thrown, 5);
    assert_eq!(game.stats(id[1]).darts_thrown, 1);
}

#[test]
fn test_failed_actions_leave_state_alone() {
    let players = roster(&["Ann", "Bob"]);
    let game = initialize(X01Settings::default().into(), &players).unwrap();
    let before = game.clone();
    assert_eq!(apply(&game, &Action::Undo), Err(GameError::NothingToUndo));
    assert!(apply(&game, &Action::RecordThrow { base: 22, multiplier: 1 }).is_err());
    assert_eq!(game, before);
}

#[test]
fn test_completed_match_replays() {
    let players = roster(&["Ann", "Bob", "Cat"]);
    let settings: GameSettings = X01Settings::new(60, true).unwrap().into();
    let mut game = initialize(settings, &players).unwrap();
    // Ann busts on her third dart
    game = turn(&game, &[(20, 1), (10, 2), (20, 3)]);
    // Bob checks out on a double, Cat gets one redemption turn
    game = turn(&game, &[(19, 1), (1, 1), (20, 2)]);
    game = turn(&game, &[(5, 1)]);
    game = step(&game, Action::AdvanceTurn);
    assert!(game.game_over);
    assert_eq!(game.winner_id, Some(players[1].id));

    let record = MatchRecord::from_match(&game).unwrap();
    let rebuilt = record.replay().unwrap();
    assert_eq!(rebuilt.game, game.game);
    assert_eq!(rebuilt.winner_id, game.winner_id);
    assert_eq!(rebuilt.player_stats, game.player_stats);
    assert!(rebuilt
        .seats()
        .iter()
        .all(|s| !s.is_current()));
}
