//! Rebuild a match from its turn log.

use crate::engine::{apply, Action};
use crate::error::GameError;
use crate::model::{GameSettings, Match, Participant, ScoreCorrection, TurnEnd, TurnRecord};
use crate::setup::initialize;

/// Replay a logged match from scratch.
///
/// Each turn's darts are thrown again in order, turns that were advanced by
/// hand are advanced again, and score corrections are re-applied at the point
/// in the dart sequence where they were first made.
pub fn replay(
    settings: GameSettings,
    participants: &[Participant],
    turns: &[TurnRecord],
    corrections: &[ScoreCorrection],
) -> Result<Match, GameError> {
    let mut state = initialize(settings, participants)?;
    let mut pending = corrections.iter().peekable();

    for (turn_index, turn) in turns.iter().enumerate() {
        for dart_index in 0..=turn.darts.len() {
            while let Some(correction) = pending
                .next_if(|c| c.turn_index == turn_index && c.dart_index == dart_index)
            {
                state = apply(&state, &correct(correction))?;
            }
            if let Some(dart) = turn.darts.get(dart_index) {
                state = apply(&state, &Action::throw(*dart))?;
            }
        }
        if turn.ended == TurnEnd::Advanced {
            state = apply(&state, &Action::AdvanceTurn)?;
        }
    }

    for correction in pending {
        state = apply(&state, &correct(correction))?;
    }
    Ok(state)
}

fn correct(correction: &ScoreCorrection) -> Action {
    Action::AdjustScore {
        player_id: correction.player_id,
        new_score: correction.new_score,
    }
}
