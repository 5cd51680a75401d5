//! Seeded random matches. Every state reached must pass `Match::audit`, and
//! every finished match must replay to the same result.

use oche_core::{
    apply, initialize, Action, CricketSettings, GameError, GameSettings, Match, MatchRecord,
    Participant, X01Settings,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const MAX_ACTIONS: usize = 5_000;

fn roster(n: usize) -> Vec<Participant> {
    (0..n)
        .map(|i| Participant::new(format!("Player {}", i + 1), None).unwrap())
        .collect()
}

fn random_dart(rng: &mut StdRng) -> Action {
    let (base, multiplier) = match rng.gen_range(0..10) {
        0 => (0, 1),
        1 => (25, rng.gen_range(1..=2)),
        2 => (50, 1),
        // Cricket numbers come up often enough to close
        3..=5 => (rng.gen_range(15..=20), rng.gen_range(1..=3)),
        _ => (rng.gen_range(1..=20), rng.gen_range(1..=3)),
    };
    Action::RecordThrow { base, multiplier }
}

fn random_action(rng: &mut StdRng, allow_adjust: bool, state: &Match) -> Action {
    match rng.gen_range(0..100) {
        0..=5 => Action::Undo,
        6..=8 => Action::AdvanceTurn,
        // Corrections only at a turn boundary, so a later undo never reaches past one
        9 if allow_adjust && state.current_turn.darts.is_empty() => {
            let ids = state.player_ids();
            Action::AdjustScore {
                player_id: ids[rng.gen_range(0..ids.len())],
                new_score: rng.gen_range(2..=60),
            }
        }
        _ => random_dart(rng),
    }
}

fn check_darts_add_up(state: &Match) {
    for id in state.player_ids() {
        let logged: usize = state
            .turns
            .iter()
            .filter(|t| t.player_id == id)
            .map(|t| t.darts.len())
            .sum();
        let open = if state.current_turn.player_id == id {
            state.current_turn.darts.len()
        } else {
            0
        };
        assert_eq!(state.stats(id).darts_thrown as usize, logged + open);
    }
}

fn play_out(seed: u64, settings: GameSettings, players: usize) -> Match {
    let mut rng = StdRng::seed_from_u64(seed);
    let allow_adjust = matches!(settings, GameSettings::X01(_));
    let mut state = initialize(settings, &roster(players)).unwrap();

    for _ in 0..MAX_ACTIONS {
        if state.game_over {
            break;
        }
        let action = random_action(&mut rng, allow_adjust, &state);
        match apply(&state, &action) {
            Ok(next) => {
                let problems = next.audit();
                assert!(
                    problems.is_empty(),
                    "seed {} after {:?}: {:?}",
                    seed,
                    action,
                    problems
                );
                check_darts_add_up(&next);
                state = next;
            }
            Err(GameError::NothingToUndo) => {
                assert!(state.current_turn.darts.is_empty());
            }
            Err(err) => panic!("seed {}: unexpected {:?} for {:?}", seed, err, action),
        }
    }
    state
}

fn assert_replays(state: &Match) {
    let record = MatchRecord::from_match(state).unwrap();
    let rebuilt = record.replay().unwrap();
    assert_eq!(rebuilt.game, state.game);
    assert_eq!(rebuilt.turns, state.turns);
    assert_eq!(rebuilt.winner_id, state.winner_id);
    assert_eq!(rebuilt.current_round, state.current_round);
    assert_eq!(rebuilt.player_stats, state.player_stats);
}

#[test]
fn test_random_x01_matches() {
    for seed in 0..40 {
        let players = 2 + (seed as usize % 3);
        let double_out = seed % 2 == 0;
        let settings = X01Settings::new(101, double_out).unwrap().into();
        let state = play_out(seed, settings, players);
        if state.game_over {
            let winner = state.winner_id.unwrap();
            assert!(state.seats().iter().any(|s| s.id() == winner));
            assert_replays(&state);
        }
    }
}

#[test]
fn test_random_cricket_matches_always_finish() {
    for seed in 100..130 {
        let players = 2 + (seed as usize % 3);
        let settings = CricketSettings::new(15).unwrap().into();
        let state = play_out(seed, settings, players);
        assert!(state.game_over, "seed {} never finished", seed);
        assert!(state.current_round <= 15);
        assert_replays(&state);
    }
}
