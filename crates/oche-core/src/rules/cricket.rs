//! Cricket rules (cut-throat scoring).
//!
//! Marks beyond a closed target score points against every opponent who has
//! not closed it. Lowest score with all seven targets closed wins.

use super::traits::{next_in_play, GameRules, Handoff, Verdict};
use crate::error::GameError;
use crate::model::{
    CricketGame, CricketPlayer, CurrentTurn, Dart, DartEffect, Target, TargetMarks,
    MARKS_TO_CLOSE,
};
use std::cmp::Reverse;

impl CricketGame {
    /// Has the player in `seat` closed everything while holding the lowest score?
    pub fn qualifies(&self, seat: usize) -> bool {
        let player = &self.players[seat];
        player.has_closed_all()
            && self
                .players
                .iter()
                .enumerate()
                .all(|(i, other)| i == seat || other.score >= player.score)
    }

    /// First qualifying winner, checking the thrower before the rest of the table
    fn find_winner(&self, thrower: usize) -> Option<usize> {
        std::iter::once(thrower)
            .chain((0..self.players.len()).filter(|i| *i != thrower))
            .find(|seat| self.qualifies(*seat))
    }

    /// Winner when the round limit runs out: lowest score, then most marks, then earliest seat
    pub fn round_limit_winner(&self) -> Option<&CricketPlayer> {
        self.players
            .iter()
            .enumerate()
            .min_by_key(|(seat, p)| (p.score, Reverse(p.total_marks()), *seat))
            .map(|(_, p)| p)
    }
}

impl GameRules for CricketGame {
    type Player = CricketPlayer;

    fn players(&self) -> &[CricketPlayer] {
        &self.players
    }

    fn players_mut(&mut self) -> &mut [CricketPlayer] {
        &mut self.players
    }

    fn score_dart(&mut self, seat: usize, _turn: &CurrentTurn, dart: Dart) -> (DartEffect, Verdict) {
        let marks_hit = Target::marks_for(&dart);
        let mut effect = DartEffect::Cricket {
            target: None,
            marks_before: 0,
            marks_hit,
            awarded: Vec::new(),
        };

        if let Some(target) = Target::for_dart(&dart) {
            let marks_before = self.players[seat].marks(target).marks;
            let total = marks_before + marks_hit;
            self.players[seat]
                .cricket_scores
                .insert(target, TargetMarks::with_marks(total));

            let overflow = total.saturating_sub(MARKS_TO_CLOSE);
            let mut awarded = Vec::new();
            if overflow > 0 {
                let points = overflow * target.points();
                for (i, opponent) in self.players.iter_mut().enumerate() {
                    if i != seat && !opponent.has_closed(target) {
                        opponent.score += points;
                        awarded.push((opponent.id, points));
                    }
                }
            }
            effect = DartEffect::Cricket {
                target: Some(target),
                marks_before,
                marks_hit,
                awarded,
            };
        }

        let verdict = match self.find_winner(seat) {
            Some(winner) => Verdict::Win(self.players[winner].id),
            None => Verdict::Continue,
        };
        (effect, verdict)
    }

    fn revert_dart(&mut self, seat: usize, _dart: &Dart, effect: &DartEffect) {
        let DartEffect::Cricket {
            target: Some(target),
            marks_before,
            awarded,
            ..
        } = effect
        else {
            return;
        };
        self.players[seat]
            .cricket_scores
            .insert(*target, TargetMarks::with_marks(*marks_before));
        for (id, points) in awarded {
            if let Some(opponent) = self.players.iter_mut().find(|p| p.id == *id) {
                opponent.score = opponent.score.saturating_sub(*points);
            }
        }
    }

    fn hand_off(&mut self, seat: usize, current_round: u32) -> Handoff {
        let next = next_in_play(&self.players, seat).unwrap_or(seat);
        let wraps = next <= seat;
        if wraps && current_round >= self.max_rounds() {
            if let Some(winner) = self.round_limit_winner() {
                return Handoff::GameOver { winner: winner.id };
            }
        }
        Handoff::Next { seat: next }
    }

    fn adjust_score(&mut self, _seat: usize, _new_score: u32) -> Result<(), GameError> {
        Err(GameError::AdjustNotSupported)
    }
}
