//! Rules traits and types.

use crate::error::GameError;
use crate::model::{CurrentTurn, Dart, DartEffect, PlayerId, Seat, TurnEnd};

/// What the engine should do after a dart has been scored
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Keep throwing (the engine still rotates after the third dart)
    Continue,
    EndTurn(TurnEnd),
    Win(PlayerId),
}

/// Who plays after a turn has been logged
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Handoff {
    Next { seat: usize },
    GameOver { winner: PlayerId },
}

/// Trait for game rules - each game type implements this on its own state
pub trait GameRules {
    type Player: Seat;

    /// Seats in play order
    fn players(&self) -> &[Self::Player];

    fn players_mut(&mut self) -> &mut [Self::Player];

    /// Score one dart for the player in `seat`. `turn` holds the darts thrown before it.
    fn score_dart(&mut self, seat: usize, turn: &CurrentTurn, dart: Dart) -> (DartEffect, Verdict);

    /// Reverse a dart previously scored by `score_dart`
    fn revert_dart(&mut self, seat: usize, dart: &Dart, effect: &DartEffect);

    /// Decide who plays after `seat`'s turn was logged
    fn hand_off(&mut self, seat: usize, current_round: u32) -> Handoff;

    /// Overwrite a player's score, bypassing the rules
    fn adjust_score(&mut self, seat: usize, new_score: u32) -> Result<(), GameError>;
}

/// Next seat after `from` that is still in play, wrapping around
pub fn next_in_play<P: Seat>(players: &[P], from: usize) -> Option<usize> {
    let len = players.len();
    (1..=len)
        .map(|step| (from + step) % len)
        .find(|seat| players[*seat].in_play())
}
