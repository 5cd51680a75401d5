//! Oche Demo
//!
//! Plays one X01 and one Cricket match through match sessions, backed by the
//! in-memory roster and store, then prints the match history as JSON.
//!
//! Configure with `DARTS_STARTING_SCORE`, `DARTS_DOUBLE_OUT`,
//! `DARTS_CRICKET_ROUNDS` and `DARTS_SESSION_QUEUE`; `RUST_LOG` sets the
//! log level.

mod config;
mod script;

use config::DemoConfig;
use oche_core::{GameSettings, Match, PlayerId};
use oche_runtime::{
    start_match, MatchSession, MatchStore, MemoryRoster, MemoryStore, Persistence, Roster,
    SessionError, SessionHandle,
};
use script::Thrower;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Upper bound on scripted actions per match
const MAX_ACTIONS: usize = 2_000;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = DemoConfig::from_env();
    info!("Demo config: {:?}", config);

    if let Err(err) = run(config).await {
        error!("Demo failed: {}", err);
        std::process::exit(1);
    }
}

async fn run(config: DemoConfig) -> Result<(), SessionError> {
    let roster = MemoryRoster::new();
    let store = Arc::new(MemoryStore::new());

    let mut players: Vec<PlayerId> = Vec::new();
    for name in ["Ann", "Bob", "Cat"] {
        let player = roster.create_player(name, None).await?;
        info!("Roster: added {} ({})", player.name, player.id);
        players.push(player.id);
    }

    let x01: GameSettings = config.x01()?.into();
    let state = start_match(&roster, x01, &players).await?;
    play(state, store.clone(), config.queue_depth).await?;

    // Rotate the seats for the second game
    players.rotate_left(1);
    let cricket: GameSettings = config.cricket()?.into();
    let state = start_match(&roster, cricket, &players).await?;
    play(state, store.clone(), config.queue_depth).await?;

    let history = store.list_completed_matches().await?;
    match serde_json::to_string_pretty(&history) {
        Ok(json) => println!("{}", json),
        Err(err) => warn!("Could not serialise history: {}", err),
    }
    Ok(())
}

/// Drive one match to its end through a session
async fn play(
    state: Match,
    store: Arc<dyn MatchStore>,
    queue_depth: usize,
) -> Result<(), SessionError> {
    let handle = MatchSession::spawn(state, store, queue_depth);
    let mut thrower = Thrower::new();
    let mut state = handle.snapshot().await?;

    for _ in 0..MAX_ACTIONS {
        let Some(action) = thrower.next_action(&state) else {
            break;
        };
        state = handle.apply(action).await?;
    }

    if !state.game_over {
        warn!(
            "Match {} still open after {} actions",
            handle.match_id(),
            MAX_ACTIONS
        );
        return Ok(());
    }
    report(&handle, &state).await;
    Ok(())
}

async fn report(handle: &SessionHandle, state: &Match) {
    for seat in state.seats() {
        let stats = state.stats(seat.id());
        info!(
            "  {:<4} score {:>4}  darts {:>3}  avg/dart {:.1}",
            seat.name(),
            seat.score(),
            stats.darts_thrown,
            stats.average_per_dart()
        );
    }
    if let Some(x01) = state.x01() {
        if x01.overtime {
            info!("  decided in overtime");
        }
    }
    match handle.persisted().await {
        Persistence::Saved => info!("Match {} saved", handle.match_id()),
        Persistence::Failed(reason) => warn!("Match {} not saved: {}", handle.match_id(), reason),
        other => warn!("Match {} persistence ended as {:?}", handle.match_id(), other),
    }
}
