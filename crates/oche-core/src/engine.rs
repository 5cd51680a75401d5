//! The game reducer.
//!
//! [`apply`] takes a match and an action and returns the next match. It never
//! mutates its input, so a rejected action leaves the caller's state as it was.
//! Any `Ok` result with `game_over` set is the action that concluded the match,
//! because actions on a finished match are rejected.
//!
//! A match whose current turn names a player who is not seated (only
//! possible for a hand-built or deserialized state) is rejected with
//! [`GameError::PlayerNotFound`].

use crate::error::GameError;
use crate::model::{
    CurrentTurn, Dart, Game, Match, PlayerId, PlayerStats, ScoreCorrection, Seat, TurnEnd,
    TurnRecord, DARTS_PER_TURN,
};
use crate::rules::{GameRules, Handoff, Verdict};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A player action
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Record one dart for the current player
    RecordThrow { base: u32, multiplier: u32 },
    /// Take back the last dart of the open turn
    Undo,
    /// End the current turn early
    AdvanceTurn,
    /// Manually overwrite an X01 player's remaining score
    AdjustScore { player_id: PlayerId, new_score: u32 },
}

impl Action {
    pub fn throw(dart: Dart) -> Self {
        Action::RecordThrow {
            base: dart.base,
            multiplier: dart.multiplier,
        }
    }
}

/// Apply one action to a match
pub fn apply(state: &Match, action: &Action) -> Result<Match, GameError> {
    if state.game_over {
        return Err(GameError::GameOver);
    }
    let mut next = state.clone();
    match action {
        Action::RecordThrow { base, multiplier } => {
            let dart = Dart::new(*base, *multiplier)?;
            let (game, mut table) = Table::split(&mut next);
            match game {
                Game::X01(rules) => table.throw(rules, dart)?,
                Game::Cricket(rules) => table.throw(rules, dart)?,
            }
        }
        Action::Undo => {
            if next.current_turn.darts.is_empty() {
                return Err(GameError::NothingToUndo);
            }
            let (game, mut table) = Table::split(&mut next);
            match game {
                Game::X01(rules) => table.undo(rules)?,
                Game::Cricket(rules) => table.undo(rules)?,
            }
        }
        Action::AdvanceTurn => {
            let (game, mut table) = Table::split(&mut next);
            match game {
                Game::X01(rules) => table.advance(rules)?,
                Game::Cricket(rules) => table.advance(rules)?,
            }
        }
        Action::AdjustScore {
            player_id,
            new_score,
        } => {
            let (game, mut table) = Table::split(&mut next);
            match game {
                Game::X01(rules) => table.adjust(rules, *player_id, *new_score)?,
                Game::Cricket(rules) => table.adjust(rules, *player_id, *new_score)?,
            }
        }
    }
    Ok(next)
}

/// The game-independent parts of a match, borrowed alongside the rules
struct Table<'a> {
    current_turn: &'a mut CurrentTurn,
    turns: &'a mut Vec<TurnRecord>,
    player_stats: &'a mut HashMap<PlayerId, PlayerStats>,
    current_round: &'a mut u32,
    game_over: &'a mut bool,
    winner_id: &'a mut Option<PlayerId>,
    corrections: &'a mut Vec<ScoreCorrection>,
}

impl<'a> Table<'a> {
    fn split(state: &'a mut Match) -> (&'a mut Game, Table<'a>) {
        (
            &mut state.game,
            Table {
                current_turn: &mut state.current_turn,
                turns: &mut state.turns,
                player_stats: &mut state.player_stats,
                current_round: &mut state.current_round,
                game_over: &mut state.game_over,
                winner_id: &mut state.winner_id,
                corrections: &mut state.corrections,
            },
        )
    }

    fn seat<R: GameRules>(&self, rules: &R) -> Result<usize, GameError> {
        let id = self.current_turn.player_id;
        rules
            .players()
            .iter()
            .position(|p| p.id() == id)
            .ok_or(GameError::PlayerNotFound(id))
    }

    fn throw<R: GameRules>(&mut self, rules: &mut R, dart: Dart) -> Result<(), GameError> {
        let seat = self.seat(rules)?;
        let (effect, verdict) = rules.score_dart(seat, self.current_turn, dart);

        let stats = self
            .player_stats
            .entry(self.current_turn.player_id)
            .or_default();
        stats.darts_thrown += 1;
        stats.total_score += dart.score();
        stats.targets_hit += effect.marks_hit();

        self.current_turn.darts.push(dart);
        self.current_turn.effects.push(effect);

        match verdict {
            Verdict::Win(winner) => {
                self.log_turn(TurnEnd::Won);
                self.conclude(rules, winner);
            }
            Verdict::EndTurn(ended) => self.end_turn(rules, seat, ended),
            Verdict::Continue if self.current_turn.darts_thrown() >= DARTS_PER_TURN => {
                self.end_turn(rules, seat, TurnEnd::Exhausted)
            }
            Verdict::Continue => {}
        }
        Ok(())
    }

    fn undo<R: GameRules>(&mut self, rules: &mut R) -> Result<(), GameError> {
        let seat = self.seat(rules)?;
        let (Some(dart), Some(effect)) = (
            self.current_turn.darts.pop(),
            self.current_turn.effects.pop(),
        ) else {
            return Err(GameError::NothingToUndo);
        };
        rules.revert_dart(seat, &dart, &effect);

        let stats = self
            .player_stats
            .entry(self.current_turn.player_id)
            .or_default();
        stats.darts_thrown = stats.darts_thrown.saturating_sub(1);
        stats.total_score = stats.total_score.saturating_sub(dart.score());
        stats.targets_hit = stats.targets_hit.saturating_sub(effect.marks_hit());
        Ok(())
    }

    fn advance<R: GameRules>(&mut self, rules: &mut R) -> Result<(), GameError> {
        let seat = self.seat(rules)?;
        self.end_turn(rules, seat, TurnEnd::Advanced);
        Ok(())
    }

    fn adjust<R: GameRules>(
        &mut self,
        rules: &mut R,
        player_id: PlayerId,
        new_score: u32,
    ) -> Result<(), GameError> {
        let seat = rules
            .players()
            .iter()
            .position(|p| p.id() == player_id)
            .ok_or(GameError::PlayerNotFound(player_id))?;
        rules.adjust_score(seat, new_score)?;
        // A bust later in this turn falls back to the corrected score
        if player_id == self.current_turn.player_id {
            self.current_turn.start_score = new_score;
        }
        self.corrections.push(ScoreCorrection {
            turn_index: self.turns.len(),
            dart_index: self.current_turn.darts_thrown(),
            player_id,
            new_score,
        });
        Ok(())
    }

    fn log_turn(&mut self, ended: TurnEnd) {
        self.current_turn.effects.clear();
        self.turns.push(TurnRecord {
            player_id: self.current_turn.player_id,
            darts: std::mem::take(&mut self.current_turn.darts),
            ended,
        });
    }

    fn end_turn<R: GameRules>(&mut self, rules: &mut R, seat: usize, ended: TurnEnd) {
        self.log_turn(ended);
        match rules.hand_off(seat, *self.current_round) {
            Handoff::Next { seat: next } => {
                if next <= seat {
                    *self.current_round += 1;
                }
                for (i, player) in rules.players_mut().iter_mut().enumerate() {
                    player.set_current(i == next);
                }
                let player = &rules.players()[next];
                *self.current_turn = CurrentTurn::new(player.id(), player.score());
            }
            Handoff::GameOver { winner } => self.conclude(rules, winner),
        }
    }

    fn conclude<R: GameRules>(&mut self, rules: &mut R, winner: PlayerId) {
        for player in rules.players_mut() {
            player.set_current(false);
        }
        *self.game_over = true;
        *self.winner_id = Some(winner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::model::{CricketSettings, DartEffect, Participant, X01Settings};
    use crate::setup::initialize;

    fn x01_match(n: usize) -> Match {
        let players: Vec<Participant> = (0..n)
            .map(|i| Participant::new(format!("P{}", i + 1), None).unwrap())
            .collect();
        initialize(X01Settings::default().into(), &players).unwrap()
    }

    fn throw(state: &Match, base: u32, multiplier: u32) -> Match {
        apply(state, &Action::RecordThrow { base, multiplier }).unwrap()
    }

    #[test]
    fn test_apply_does_not_mutate_input() {
        let game = x01_match(2);
        let before = game.clone();
        let next = throw(&game, 20, 3);
        assert_eq!(game, before);
        assert_ne!(next, before);
    }

    #[test]
    fn test_three_darts_rotate() {
        let game = x01_match(3);
        let ids = game.player_ids();
        let game = throw(&game, 20, 1);
        let game = throw(&game, 20, 1);
        assert_eq!(game.current_turn.player_id, ids[0]);
        let game = throw(&game, 20, 1);
        assert_eq!(game.current_turn.player_id, ids[1]);
        assert_eq!(game.current_turn.darts_thrown(), 0);
        assert_eq!(game.turns.len(), 1);
        assert_eq!(game.turns[0].ended, TurnEnd::Exhausted);
        assert!(game.audit().is_empty());
    }

    #[test]
    fn test_round_increments_once_per_cycle() {
        let mut game = x01_match(3);
        for turn in 0..3 {
            assert_eq!(game.current_round, 1, "turn {}", turn);
            for _ in 0..3 {
                game = throw(&game, 1, 1);
            }
        }
        assert_eq!(game.current_round, 2);
        assert_eq!(game.current_turn.player_id, game.player_ids()[0]);
    }

    #[test]
    fn test_misses_count_as_darts() {
        let game = x01_match(2);
        let id = game.player_ids()[0];
        let game = throw(&game, 0, 1);
        let game = throw(&game, 0, 1);
        assert_eq!(game.stats(id).darts_thrown, 2);
        assert_eq!(game.stats(id).total_score, 0);
        assert_eq!(game.score_of(id), Some(501));
    }

    #[test]
    fn test_invalid_throw_rejected() {
        let game = x01_match(2);
        let result = apply(
            &game,
            &Action::RecordThrow {
                base: 50,
                multiplier: 3,
            },
        );
        assert_eq!(
            result,
            Err(GameError::InvalidThrow {
                base: 50,
                multiplier: 3
            })
        );
    }

    #[test]
    fn test_undo_with_nothing_thrown() {
        let game = x01_match(2);
        let err = apply(&game, &Action::Undo).unwrap_err();
        assert_eq!(err, GameError::NothingToUndo);
        assert_eq!(err.kind(), ErrorKind::IllegalAction);
    }

    #[test]
    fn test_undo_cannot_cross_a_logged_turn() {
        let mut game = x01_match(2);
        for _ in 0..3 {
            game = throw(&game, 20, 1);
        }
        assert_eq!(
            apply(&game, &Action::Undo),
            Err(GameError::NothingToUndo)
        );
    }

    #[test]
    fn test_undo_reverses_stats() {
        let game = x01_match(2);
        let id = game.player_ids()[0];
        let game = throw(&game, 20, 3);
        let game = throw(&game, 19, 3);
        let game = apply(&game, &Action::Undo).unwrap();
        assert_eq!(game.stats(id).darts_thrown, 1);
        assert_eq!(game.stats(id).total_score, 60);
        assert_eq!(game.current_turn.scores(), vec![60]);
        assert!(game.audit().is_empty());
    }

    #[test]
    fn test_advance_logs_partial_turn() {
        let game = x01_match(2);
        let ids = game.player_ids();
        let game = throw(&game, 5, 1);
        let game = apply(&game, &Action::AdvanceTurn).unwrap();
        assert_eq!(game.current_turn.player_id, ids[1]);
        assert_eq!(game.turns.len(), 1);
        assert_eq!(game.turns[0].ended, TurnEnd::Advanced);
        assert_eq!(game.turns[0].scores(), vec![5]);
        assert!(game.audit().is_empty());
    }

    #[test]
    fn test_adjust_score() {
        let game = x01_match(2);
        let ids = game.player_ids();
        let game = throw(&game, 20, 1);
        let game = apply(
            &game,
            &Action::AdjustScore {
                player_id: ids[1],
                new_score: 170,
            },
        )
        .unwrap();
        assert_eq!(game.score_of(ids[1]), Some(170));
        assert_eq!(
            game.corrections,
            vec![ScoreCorrection {
                turn_index: 0,
                dart_index: 1,
                player_id: ids[1],
                new_score: 170,
            }]
        );
    }

    #[test]
    fn test_adjust_unknown_player() {
        let game = x01_match(2);
        let stranger = PlayerId::new();
        let err = apply(
            &game,
            &Action::AdjustScore {
                player_id: stranger,
                new_score: 100,
            },
        )
        .unwrap_err();
        assert_eq!(err, GameError::PlayerNotFound(stranger));
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_unseated_current_player_rejected() {
        let mut game = x01_match(2);
        let stranger = PlayerId::new();
        game.current_turn.player_id = stranger;
        for action in [Action::throw(Dart::miss()), Action::AdvanceTurn] {
            assert_eq!(
                apply(&game, &action),
                Err(GameError::PlayerNotFound(stranger))
            );
        }
        game.current_turn.darts.push(Dart::miss());
        game.current_turn.effects.push(DartEffect::X01 { deducted: 0 });
        assert_eq!(
            apply(&game, &Action::Undo),
            Err(GameError::PlayerNotFound(stranger))
        );
    }

    #[test]
    fn test_actions_rejected_after_game_over() {
        let players: Vec<Participant> = (0..2)
            .map(|i| Participant::new(format!("P{}", i + 1), None).unwrap())
            .collect();
        let game = initialize(X01Settings::new(3, false).unwrap().into(), &players).unwrap();
        let game = throw(&game, 1, 1);
        let game = throw(&game, 1, 1);
        let game = throw(&game, 0, 1);
        let game = throw(&game, 3, 1);
        assert!(game.game_over);
        assert_eq!(game.winner_id, Some(players[1].id));
        assert!(game.audit().is_empty());

        for action in [
            Action::RecordThrow {
                base: 20,
                multiplier: 1,
            },
            Action::Undo,
            Action::AdvanceTurn,
            Action::AdjustScore {
                player_id: players[0].id,
                new_score: 0,
            },
        ] {
            assert_eq!(apply(&game, &action), Err(GameError::GameOver));
        }
    }

    #[test]
    fn test_action_json_shape() {
        let action: Action =
            serde_json::from_str(r#"{"type":"record_throw","base":20,"multiplier":3}"#).unwrap();
        assert_eq!(action, Action::throw(Dart::triple(20).unwrap()));
        let json = serde_json::to_string(&Action::Undo).unwrap();
        assert_eq!(json, r#"{"type":"undo"}"#);
    }

    #[test]
    fn test_cricket_round_limit_via_advance() {
        let players: Vec<Participant> = (0..2)
            .map(|i| Participant::new(format!("P{}", i + 1), None).unwrap())
            .collect();
        let mut game = initialize(CricketSettings::new(15).unwrap().into(), &players).unwrap();
        for _ in 0..29 {
            game = apply(&game, &Action::AdvanceTurn).unwrap();
        }
        assert!(!game.game_over);
        game = apply(&game, &Action::AdvanceTurn).unwrap();
        assert!(game.game_over);
        assert_eq!(game.turns.len(), 30);
        assert!(game.audit().is_empty());
    }
}
