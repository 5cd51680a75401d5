//! Game rules.

mod cricket;
mod traits;
mod x01;

pub use traits::{next_in_play, GameRules, Handoff, Verdict};
