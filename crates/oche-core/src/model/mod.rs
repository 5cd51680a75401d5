//! Match data model.

mod dart;
mod ids;
mod participant;
mod settings;
mod state;

pub use dart::{Dart, Target, DOUBLE_BULL, SINGLE_BULL};
pub use ids::{MatchId, PlayerId};
pub use participant::Participant;
pub use settings::{CricketSettings, GameSettings, GameType, X01Settings, OVERTIME_SCORE};
pub use state::{
    CricketGame, CricketPlayer, CurrentTurn, DartEffect, Game, Match, PlayerStats,
    RedemptionStatus, ScoreCorrection, Seat, TargetMarks, TurnEnd, TurnRecord, X01Game, X01Player,
    DARTS_PER_TURN, MARKS_TO_CLOSE,
};
