//! Match state.

use super::{Dart, GameSettings, GameType, MatchId, PlayerId, Target};
use super::{CricketSettings, X01Settings};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Marks needed to close a Cricket target
pub const MARKS_TO_CLOSE: u32 = 3;
/// Darts in a full turn
pub const DARTS_PER_TURN: usize = 3;

/// Common view of a seated player, whatever the game type
pub trait Seat {
    fn id(&self) -> PlayerId;
    fn name(&self) -> &str;
    fn score(&self) -> u32;
    fn is_current(&self) -> bool;
    fn set_current(&mut self, current: bool);
    /// Can this seat still take turns?
    fn in_play(&self) -> bool {
        true
    }
}

/// Where an X01 player stands in the finish-resolution protocol
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedemptionStatus {
    /// Not part of a redemption round
    #[default]
    None,
    /// Still owed a redemption turn
    Pending,
    /// Finished during the redemption round
    Redeemed,
    /// Used the redemption turn without finishing
    Failed,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct X01Player {
    pub id: PlayerId,
    pub name: String,
    /// Remaining points
    pub score: u32,
    pub current: bool,
    pub finished: bool,
    pub eliminated: bool,
    pub redemption: RedemptionStatus,
}

impl Seat for X01Player {
    fn id(&self) -> PlayerId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn is_current(&self) -> bool {
        self.current
    }

    fn set_current(&mut self, current: bool) {
        self.current = current;
    }

    fn in_play(&self) -> bool {
        !self.eliminated
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetMarks {
    pub marks: u32,
    pub closed: bool,
}

impl TargetMarks {
    pub fn with_marks(marks: u32) -> Self {
        let marks = marks.min(MARKS_TO_CLOSE);
        Self {
            marks,
            closed: marks >= MARKS_TO_CLOSE,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CricketPlayer {
    pub id: PlayerId,
    pub name: String,
    /// Points scored against this player; lower is better
    pub score: u32,
    pub current: bool,
    pub cricket_scores: BTreeMap<Target, TargetMarks>,
}

impl CricketPlayer {
    pub fn marks(&self, target: Target) -> TargetMarks {
        self.cricket_scores.get(&target).copied().unwrap_or_default()
    }

    pub fn has_closed(&self, target: Target) -> bool {
        self.marks(target).closed
    }

    pub fn has_closed_all(&self) -> bool {
        Target::ALL.iter().all(|t| self.has_closed(*t))
    }

    pub fn total_marks(&self) -> u32 {
        self.cricket_scores.values().map(|m| m.marks).sum()
    }
}

impl Seat for CricketPlayer {
    fn id(&self) -> PlayerId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn is_current(&self) -> bool {
        self.current
    }

    fn set_current(&mut self, current: bool) {
        self.current = current;
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct X01Game {
    pub settings: X01Settings,
    pub players: Vec<X01Player>,
    /// Pole position holder, set when the first player checks out
    pub first_finished_player_id: Option<PlayerId>,
    pub redemption_mode: bool,
    pub overtime: bool,
}

impl X01Game {
    pub fn player(&self, id: PlayerId) -> Option<&X01Player> {
        self.players.iter().find(|p| p.id == id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CricketGame {
    pub settings: CricketSettings,
    pub players: Vec<CricketPlayer>,
}

impl CricketGame {
    pub fn max_rounds(&self) -> u32 {
        self.settings.rounds_limit
    }

    pub fn player(&self, id: PlayerId) -> Option<&CricketPlayer> {
        self.players.iter().find(|p| p.id == id)
    }
}

/// Game-specific state, tagged by game type
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "game_type", rename_all = "lowercase")]
pub enum Game {
    X01(X01Game),
    Cricket(CricketGame),
}

/// What a dart did, kept so it can be undone exactly
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DartEffect {
    X01 {
        deducted: u32,
    },
    Cricket {
        target: Option<Target>,
        marks_before: u32,
        marks_hit: u32,
        /// Overflow points given to each opponent
        awarded: Vec<(PlayerId, u32)>,
    },
}

/// The turn in progress
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentTurn {
    pub player_id: PlayerId,
    /// Score a bust rolls back to
    #[serde(default)]
    pub start_score: u32,
    pub darts: Vec<Dart>,
    pub effects: Vec<DartEffect>,
}

impl CurrentTurn {
    pub fn new(player_id: PlayerId, start_score: u32) -> Self {
        Self {
            player_id,
            start_score,
            darts: Vec::new(),
            effects: Vec::new(),
        }
    }

    pub fn darts_thrown(&self) -> usize {
        self.darts.len()
    }

    pub fn scores(&self) -> Vec<u32> {
        self.darts.iter().map(Dart::score).collect()
    }
}

/// How a turn came to an end
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnEnd {
    /// All three darts thrown
    Exhausted,
    /// X01 score went below zero or to zero illegally
    Bust,
    /// X01 score reached zero without winning outright
    CheckedOut,
    /// Closed early by an explicit advance
    Advanced,
    /// The turn won the match
    Won,
}

/// A completed turn in the log
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub player_id: PlayerId,
    pub darts: Vec<Dart>,
    pub ended: TurnEnd,
}

impl TurnRecord {
    pub fn scores(&self) -> Vec<u32> {
        self.darts.iter().map(Dart::score).collect()
    }

    pub fn total(&self) -> u32 {
        self.darts.iter().map(Dart::score).sum()
    }
}

impl DartEffect {
    /// Cricket marks the dart hit, overflow included
    pub fn marks_hit(&self) -> u32 {
        match self {
            DartEffect::X01 { .. } => 0,
            DartEffect::Cricket { marks_hit, .. } => *marks_hit,
        }
    }
}

/// Cumulative per-player counters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub total_score: u32,
    pub darts_thrown: u32,
    /// Cricket marks hit, overflow included; always 0 in X01
    pub targets_hit: u32,
}

impl PlayerStats {
    pub fn average_per_dart(&self) -> f64 {
        if self.darts_thrown == 0 {
            return 0.0;
        }
        self.total_score as f64 / self.darts_thrown as f64
    }

    pub fn marks_per_round(&self) -> f64 {
        if self.darts_thrown == 0 {
            return 0.0;
        }
        self.targets_hit as f64 * DARTS_PER_TURN as f64 / self.darts_thrown as f64
    }
}

/// A manual score override, positioned in the dart sequence so replays can re-apply it
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCorrection {
    /// Number of logged turns when the correction was made
    pub turn_index: usize,
    /// Darts already thrown in the open turn at that moment
    pub dart_index: usize,
    pub player_id: PlayerId,
    pub new_score: u32,
}

/// One match, in progress or completed
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub game: Game,
    pub current_turn: CurrentTurn,
    pub turns: Vec<TurnRecord>,
    pub player_stats: HashMap<PlayerId, PlayerStats>,
    pub current_round: u32,
    pub game_over: bool,
    pub winner_id: Option<PlayerId>,
    pub corrections: Vec<ScoreCorrection>,
    pub started_at: DateTime<Utc>,
}

impl Match {
    pub fn game_type(&self) -> GameType {
        match &self.game {
            Game::X01(_) => GameType::X01,
            Game::Cricket(_) => GameType::Cricket,
        }
    }

    pub fn settings(&self) -> GameSettings {
        match &self.game {
            Game::X01(g) => GameSettings::X01(g.settings),
            Game::Cricket(g) => GameSettings::Cricket(g.settings),
        }
    }

    pub fn x01(&self) -> Option<&X01Game> {
        match &self.game {
            Game::X01(g) => Some(g),
            Game::Cricket(_) => None,
        }
    }

    pub fn cricket(&self) -> Option<&CricketGame> {
        match &self.game {
            Game::Cricket(g) => Some(g),
            Game::X01(_) => None,
        }
    }

    /// Seats in play order
    pub fn seats(&self) -> Vec<&dyn Seat> {
        match &self.game {
            Game::X01(g) => g.players.iter().map(|p| p as &dyn Seat).collect(),
            Game::Cricket(g) => g.players.iter().map(|p| p as &dyn Seat).collect(),
        }
    }

    pub fn player_ids(&self) -> Vec<PlayerId> {
        self.seats().iter().map(|s| s.id()).collect()
    }

    pub fn score_of(&self, id: PlayerId) -> Option<u32> {
        self.seats().iter().find(|s| s.id() == id).map(|s| s.score())
    }

    pub fn stats(&self, id: PlayerId) -> PlayerStats {
        self.player_stats.get(&id).copied().unwrap_or_default()
    }

    /// Player whose turn it is, `None` once the match is over
    pub fn current_player_id(&self) -> Option<PlayerId> {
        if self.game_over {
            return None;
        }
        Some(self.current_turn.player_id)
    }

    /// List every broken state invariant. Empty means consistent.
    pub fn audit(&self) -> Vec<String> {
        let mut problems = Vec::new();
        let seats = self.seats();

        let current: Vec<PlayerId> = seats
            .iter()
            .filter(|s| s.is_current())
            .map(|s| s.id())
            .collect();
        if self.game_over {
            if !current.is_empty() {
                problems.push(format!("{} current players after game over", current.len()));
            }
            if self.winner_id.is_none() {
                problems.push("game over without a winner".to_string());
            }
            if !self.current_turn.darts.is_empty() {
                problems.push("open turn left after game over".to_string());
            }
        } else {
            if current.len() != 1 {
                problems.push(format!("expected 1 current player, found {}", current.len()));
            } else if current[0] != self.current_turn.player_id {
                problems.push("current flag disagrees with current turn".to_string());
            }
            if seats.iter().any(|s| s.is_current() && !s.in_play()) {
                problems.push("eliminated player holds the turn".to_string());
            }
            if self.winner_id.is_some() {
                problems.push("winner set while match is live".to_string());
            }
        }

        if self.current_turn.darts.len() >= DARTS_PER_TURN {
            problems.push(format!(
                "open turn holds {} darts",
                self.current_turn.darts.len()
            ));
        }
        if self.current_turn.darts.len() != self.current_turn.effects.len() {
            problems.push("dart and effect counts differ".to_string());
        }

        for seat in &seats {
            let id = seat.id();
            let logged = self
                .turns
                .iter()
                .filter(|t| t.player_id == id)
                .map(|t| t.darts.len())
                .sum::<usize>();
            let open = if self.current_turn.player_id == id {
                self.current_turn.darts.len()
            } else {
                0
            };
            let counted = self.stats(id).darts_thrown as usize;
            if counted != logged + open {
                problems.push(format!(
                    "{} has {} darts counted but {} recorded",
                    seat.name(),
                    counted,
                    logged + open
                ));
            }
        }

        if let Game::Cricket(g) = &self.game {
            for p in &g.players {
                for (target, m) in &p.cricket_scores {
                    if m.marks > MARKS_TO_CLOSE || m.closed != (m.marks >= MARKS_TO_CLOSE) {
                        problems.push(format!("{} target {} inconsistent: {:?}", p.name, target, m));
                    }
                }
            }
        }

        if let Some(winner) = self.winner_id {
            if !seats.iter().any(|s| s.id() == winner) {
                problems.push("winner is not seated".to_string());
            }
        }

        problems
    }
}
