//! Match setup.

use crate::error::GameError;
use crate::model::{
    CricketGame, CricketPlayer, CurrentTurn, Game, GameSettings, Match, MatchId, Participant,
    PlayerStats, RedemptionStatus, Target, TargetMarks, X01Game, X01Player,
};
use chrono::Utc;
use std::collections::{BTreeMap, HashSet};

/// Minimum number of players in a match
pub const MIN_PLAYERS: usize = 2;

/// Build the opening state of a match.
///
/// Participants play in the order given; the first one throws first.
pub fn initialize(settings: GameSettings, participants: &[Participant]) -> Result<Match, GameError> {
    settings.validate()?;
    if participants.len() < MIN_PLAYERS {
        return Err(GameError::NotEnoughPlayers(participants.len()));
    }
    let mut seen = HashSet::new();
    for p in participants {
        if !seen.insert(p.id) {
            return Err(GameError::DuplicatePlayer(p.id));
        }
    }

    let game = match settings {
        GameSettings::X01(settings) => Game::X01(X01Game {
            settings,
            players: participants
                .iter()
                .enumerate()
                .map(|(seat, p)| X01Player {
                    id: p.id,
                    name: p.name.clone(),
                    score: settings.starting_score,
                    current: seat == 0,
                    finished: false,
                    eliminated: false,
                    redemption: RedemptionStatus::None,
                })
                .collect(),
            first_finished_player_id: None,
            redemption_mode: false,
            overtime: false,
        }),
        GameSettings::Cricket(settings) => Game::Cricket(CricketGame {
            settings,
            players: participants
                .iter()
                .enumerate()
                .map(|(seat, p)| CricketPlayer {
                    id: p.id,
                    name: p.name.clone(),
                    score: 0,
                    current: seat == 0,
                    cricket_scores: empty_board(),
                })
                .collect(),
        }),
    };

    let opening_score = match &settings {
        GameSettings::X01(x01) => x01.starting_score,
        GameSettings::Cricket(_) => 0,
    };

    Ok(Match {
        id: MatchId::new(),
        game,
        current_turn: CurrentTurn::new(participants[0].id, opening_score),
        turns: Vec::new(),
        player_stats: participants
            .iter()
            .map(|p| (p.id, PlayerStats::default()))
            .collect(),
        current_round: 1,
        game_over: false,
        winner_id: None,
        corrections: Vec::new(),
        started_at: Utc::now(),
    })
}

fn empty_board() -> BTreeMap<Target, TargetMarks> {
    Target::ALL
        .iter()
        .map(|t| (*t, TargetMarks::default()))
        .collect()
}
