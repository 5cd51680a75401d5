//! Completed-match records handed to persistence.

use crate::error::GameError;
use crate::model::{
    GameSettings, GameType, Match, MatchId, Participant, PlayerId, ScoreCorrection, TurnRecord,
};
use crate::replay::replay;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Final standing of one player
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerResult {
    pub player_id: PlayerId,
    pub name: String,
    pub final_score: u32,
    pub darts_thrown: u32,
    pub total_score: u32,
    pub targets_hit: u32,
}

/// Everything needed to store a finished match and replay it later
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub match_id: MatchId,
    pub game_type: GameType,
    pub settings: GameSettings,
    pub winner_id: PlayerId,
    /// Seat order
    pub players: Vec<PlayerResult>,
    pub turns: Vec<TurnRecord>,
    pub corrections: Vec<ScoreCorrection>,
    pub rounds_played: u32,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl MatchRecord {
    /// Snapshot a finished match. Returns `None` while the match is still live.
    pub fn from_match(state: &Match) -> Option<Self> {
        if !state.game_over {
            return None;
        }
        let winner_id = state.winner_id?;
        let players = state
            .seats()
            .iter()
            .map(|seat| {
                let stats = state.stats(seat.id());
                PlayerResult {
                    player_id: seat.id(),
                    name: seat.name().to_string(),
                    final_score: seat.score(),
                    darts_thrown: stats.darts_thrown,
                    total_score: stats.total_score,
                    targets_hit: stats.targets_hit,
                }
            })
            .collect();

        Some(Self {
            match_id: state.id,
            game_type: state.game_type(),
            settings: state.settings(),
            winner_id,
            players,
            turns: state.turns.clone(),
            corrections: state.corrections.clone(),
            rounds_played: state.current_round,
            started_at: state.started_at,
            completed_at: Utc::now(),
        })
    }

    pub fn winner(&self) -> Option<&PlayerResult> {
        self.players.iter().find(|p| p.player_id == self.winner_id)
    }

    /// Rebuild the final match state from the turn log
    pub fn replay(&self) -> Result<Match, GameError> {
        let participants: Vec<Participant> = self
            .players
            .iter()
            .map(|p| Participant {
                id: p.player_id,
                name: p.name.clone(),
                photo_url: None,
                created_at: self.started_at,
            })
            .collect();
        let mut state = replay(self.settings, &participants, &self.turns, &self.corrections)?;
        state.id = self.match_id;
        state.started_at = self.started_at;
        Ok(state)
    }

    pub fn summary(&self) -> MatchSummary {
        MatchSummary {
            match_id: self.match_id,
            game_type: self.game_type,
            winner_id: self.winner_id,
            winner_name: self.winner().map(|p| p.name.clone()),
            players: self.players.clone(),
            completed_at: self.completed_at,
        }
    }
}

/// History list entry
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub match_id: MatchId,
    pub game_type: GameType,
    pub winner_id: PlayerId,
    pub winner_name: Option<String>,
    pub players: Vec<PlayerResult>,
    pub completed_at: DateTime<Utc>,
}
