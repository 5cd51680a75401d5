//! Scripted throwers for the demo matches.
//!
//! Each thrower aims at a sensible target and misses on a fixed schedule,
//! so a demo run is the same every time.

use oche_core::model::{CricketPlayer, DOUBLE_BULL, SINGLE_BULL};
use oche_core::{Action, Match, Target};

/// Picks the next action for whoever is at the oche
pub struct Thrower {
    darts: u32,
}

impl Thrower {
    pub fn new() -> Self {
        Self { darts: 0 }
    }

    /// Next action for the current player, or `None` once the match is over
    pub fn next_action(&mut self, state: &Match) -> Option<Action> {
        let player = state.current_player_id()?;
        let seat = state.player_ids().iter().position(|id| *id == player)? as u32;
        self.darts += 1;

        // Later seats miss more often
        if self.darts % (7 - seat.min(4)) == 0 {
            return Some(throw(0, 1));
        }
        if let Some(x01) = state.x01() {
            let remaining = state.score_of(player)?;
            return Some(aim_x01(remaining, x01.settings.double_out));
        }
        let cricket = state.cricket()?;
        Some(aim_cricket(cricket.player(player)?))
    }
}

impl Default for Thrower {
    fn default() -> Self {
        Self::new()
    }
}

fn throw(base: u32, multiplier: u32) -> Action {
    Action::RecordThrow { base, multiplier }
}

/// Aim for the finish, setting up a double when one is required
fn aim_x01(remaining: u32, double_out: bool) -> Action {
    if double_out {
        return match remaining {
            DOUBLE_BULL => throw(SINGLE_BULL, 2),
            r if r <= 40 && r % 2 == 0 => throw(r / 2, 2),
            r if r <= 40 => throw(1, 1),
            r if r <= 60 => throw(r - 40, 1),
            r if r <= 61 => throw(1, 1),
            _ => throw(20, 3),
        };
    }
    match remaining {
        r if r <= 20 => throw(r, 1),
        SINGLE_BULL | DOUBLE_BULL => throw(remaining, 1),
        r if r <= 60 && r % 3 == 0 => throw(r / 3, 3),
        r if r <= 40 && r % 2 == 0 => throw(r / 2, 2),
        r if r <= 60 => throw(20, 1),
        _ => throw(20, 3),
    }
}

/// Aim at the highest number still open, bull last
fn aim_cricket(player: &CricketPlayer) -> Action {
    let target = [
        Target::Twenty,
        Target::Nineteen,
        Target::Eighteen,
        Target::Seventeen,
        Target::Sixteen,
        Target::Fifteen,
        Target::Bull,
    ]
    .into_iter()
    .find(|t| !player.has_closed(*t));

    match target {
        Some(Target::Bull) => throw(SINGLE_BULL, 2),
        Some(t) => throw(t.points(), 3),
        // Everything closed: keep pressure on the twenty
        None => throw(20, 3),
    }
}
