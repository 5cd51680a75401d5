//! Oche Core Library
//!
//! This crate provides the darts scoring engine: match setup, the X01 and
//! Cricket rules, and a pure reducer that turns a match plus an action into
//! the next match.

pub mod engine;
pub mod error;
pub mod model;
pub mod record;
pub mod replay;
pub mod rules;
pub mod setup;

pub use engine::{apply, Action};
pub use error::{ErrorKind, GameError};
pub use model::{
    CricketSettings, Dart, Game, GameSettings, GameType, Match, MatchId, Participant, PlayerId,
    PlayerStats, Target, TurnEnd, TurnRecord, X01Settings,
};
pub use record::{MatchRecord, MatchSummary, PlayerResult};
pub use replay::replay;
pub use setup::initialize;
