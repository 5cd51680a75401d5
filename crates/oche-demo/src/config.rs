//! Demo configuration from the environment.

use oche_core::{CricketSettings, GameError, X01Settings};
use oche_runtime::DEFAULT_QUEUE_DEPTH;
use std::str::FromStr;
use tracing::warn;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DemoConfig {
    pub starting_score: u32,
    pub double_out: bool,
    pub cricket_rounds: u32,
    pub queue_depth: usize,
}

impl Default for DemoConfig {
    fn default() -> Self {
        let x01 = X01Settings::default();
        Self {
            starting_score: x01.starting_score,
            double_out: x01.double_out,
            cricket_rounds: CricketSettings::default().rounds_limit,
            queue_depth: DEFAULT_QUEUE_DEPTH,
        }
    }
}

impl DemoConfig {
    /// Read `DARTS_*` variables, falling back to defaults for anything unset
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            starting_score: parse_or(&lookup, "DARTS_STARTING_SCORE", defaults.starting_score),
            double_out: lookup("DARTS_DOUBLE_OUT")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.double_out),
            cricket_rounds: parse_or(&lookup, "DARTS_CRICKET_ROUNDS", defaults.cricket_rounds),
            queue_depth: parse_or(&lookup, "DARTS_SESSION_QUEUE", defaults.queue_depth),
        }
    }

    pub fn x01(&self) -> Result<X01Settings, GameError> {
        X01Settings::new(self.starting_score, self.double_out)
    }

    pub fn cricket(&self) -> Result<CricketSettings, GameError> {
        CricketSettings::new(self.cricket_rounds)
    }
}

fn parse_or<T: FromStr + Copy>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring {}={:?}: not a number", key, raw);
            default
        }),
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
