//! X01 rules: count down to exactly zero.
//!
//! The first player to check out takes pole position. Players seated after
//! them get one redemption turn each; if any of them also checks out, every
//! finisher restarts from 101 in a sudden-death overtime and the rest are
//! eliminated.

use super::traits::{next_in_play, GameRules, Handoff, Verdict};
use crate::error::GameError;
use crate::model::{
    CurrentTurn, Dart, DartEffect, RedemptionStatus, Seat, TurnEnd, X01Game, X01Player,
    OVERTIME_SCORE,
};

impl X01Game {
    /// Would this dart bust a player sitting on `remaining`?
    pub fn is_bust(&self, remaining: u32, dart: &Dart) -> bool {
        let scored = dart.score();
        scored > remaining || (self.settings.double_out && scored == remaining && !dart.is_double())
    }

    /// Close the redemption round: crown the pole holder or start overtime
    fn resolve_redemption(&mut self) -> Handoff {
        self.redemption_mode = false;
        let redeemed = self
            .players
            .iter()
            .any(|p| p.redemption == RedemptionStatus::Redeemed);

        if let (false, Some(winner)) = (redeemed, self.first_finished_player_id) {
            return Handoff::GameOver { winner };
        }

        self.overtime = true;
        for player in &mut self.players {
            if player.finished {
                player.score = OVERTIME_SCORE;
                player.finished = false;
            } else {
                player.eliminated = true;
            }
        }
        let first = self.players.iter().position(|p| p.in_play()).unwrap_or(0);
        Handoff::Next { seat: first }
    }
}

fn fail_redemption(player: &mut X01Player) {
    if player.redemption == RedemptionStatus::Pending {
        player.redemption = RedemptionStatus::Failed;
        player.eliminated = true;
    }
}

impl GameRules for X01Game {
    type Player = X01Player;

    fn players(&self) -> &[X01Player] {
        &self.players
    }

    fn players_mut(&mut self) -> &mut [X01Player] {
        &mut self.players
    }

    fn score_dart(&mut self, seat: usize, turn: &CurrentTurn, dart: Dart) -> (DartEffect, Verdict) {
        // Only a scoring dart can finish or bust
        if dart.is_miss() {
            return (DartEffect::X01 { deducted: 0 }, Verdict::Continue);
        }
        if self.is_bust(self.players[seat].score, &dart) {
            let player = &mut self.players[seat];
            player.score = turn.start_score;
            fail_redemption(player);
            return (
                DartEffect::X01 { deducted: 0 },
                Verdict::EndTurn(TurnEnd::Bust),
            );
        }

        let scored = dart.score();
        let player = &mut self.players[seat];
        player.score -= scored;
        let effect = DartEffect::X01 { deducted: scored };
        if player.score > 0 {
            return (effect, Verdict::Continue);
        }

        player.finished = true;
        let id = player.id;
        if self.overtime {
            return (effect, Verdict::Win(id));
        }
        if self.redemption_mode {
            self.players[seat].redemption = RedemptionStatus::Redeemed;
            return (effect, Verdict::EndTurn(TurnEnd::CheckedOut));
        }

        let chasers: Vec<usize> = (seat + 1..self.players.len())
            .filter(|i| self.players[*i].in_play())
            .collect();
        if chasers.is_empty() {
            return (effect, Verdict::Win(id));
        }
        self.first_finished_player_id = Some(id);
        self.redemption_mode = true;
        for i in chasers {
            self.players[i].redemption = RedemptionStatus::Pending;
        }
        (effect, Verdict::EndTurn(TurnEnd::CheckedOut))
    }

    fn revert_dart(&mut self, seat: usize, _dart: &Dart, effect: &DartEffect) {
        if let DartEffect::X01 { deducted } = effect {
            self.players[seat].score += deducted;
        }
    }

    fn hand_off(&mut self, seat: usize, _current_round: u32) -> Handoff {
        if self.redemption_mode {
            fail_redemption(&mut self.players[seat]);
            return match (seat + 1..self.players.len())
                .find(|i| self.players[*i].redemption == RedemptionStatus::Pending)
            {
                Some(next) => Handoff::Next { seat: next },
                None => self.resolve_redemption(),
            };
        }
        Handoff::Next {
            seat: next_in_play(&self.players, seat).unwrap_or(seat),
        }
    }

    fn adjust_score(&mut self, seat: usize, new_score: u32) -> Result<(), GameError> {
        self.players[seat].score = new_score;
        Ok(())
    }
}
