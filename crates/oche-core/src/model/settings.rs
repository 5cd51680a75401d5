//! Game types and their settings.

use crate::error::GameError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Score every overtime finisher restarts from
pub const OVERTIME_SCORE: u32 = 101;

/// Type of game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameType {
    X01,
    Cricket,
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameType::X01 => write!(f, "x01"),
            GameType::Cricket => write!(f, "cricket"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct X01Settings {
    pub starting_score: u32,
    #[serde(default)]
    pub double_out: bool,
}

impl X01Settings {
    pub fn new(starting_score: u32, double_out: bool) -> Result<Self, GameError> {
        if starting_score == 0 {
            return Err(GameError::InvalidSettings(
                "starting score must be positive".to_string(),
            ));
        }
        Ok(Self {
            starting_score,
            double_out,
        })
    }
}

impl Default for X01Settings {
    fn default() -> Self {
        Self {
            starting_score: 501,
            double_out: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CricketSettings {
    pub rounds_limit: u32,
}

impl CricketSettings {
    pub const ALLOWED_ROUNDS: [u32; 3] = [15, 20, 25];

    pub fn new(rounds_limit: u32) -> Result<Self, GameError> {
        if !Self::ALLOWED_ROUNDS.contains(&rounds_limit) {
            return Err(GameError::InvalidSettings(format!(
                "cricket rounds must be 15, 20 or 25, got {}",
                rounds_limit
            )));
        }
        Ok(Self { rounds_limit })
    }
}

impl Default for CricketSettings {
    fn default() -> Self {
        Self { rounds_limit: 20 }
    }
}

/// Settings for one match, tagged by game type
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "game_type", rename_all = "lowercase")]
pub enum GameSettings {
    X01(X01Settings),
    Cricket(CricketSettings),
}

impl GameSettings {
    pub fn game_type(&self) -> GameType {
        match self {
            GameSettings::X01(_) => GameType::X01,
            GameSettings::Cricket(_) => GameType::Cricket,
        }
    }

    /// Re-check values that may have bypassed the constructors (e.g. deserialized input)
    pub fn validate(&self) -> Result<(), GameError> {
        match self {
            GameSettings::X01(s) => X01Settings::new(s.starting_score, s.double_out).map(|_| ()),
            GameSettings::Cricket(s) => CricketSettings::new(s.rounds_limit).map(|_| ()),
        }
    }
}

impl From<X01Settings> for GameSettings {
    fn from(settings: X01Settings) -> Self {
        GameSettings::X01(settings)
    }
}

impl From<CricketSettings> for GameSettings {
    fn from(settings: CricketSettings) -> Self {
        GameSettings::Cricket(settings)
    }
}
