//! Per-match session.
//!
//! A session task owns one [`Match`] and is the only writer to it. Handles
//! queue actions over an mpsc channel and get the outcome back on a oneshot,
//! so actions from any number of handles are applied one at a time in the
//! order they arrive.
//!
//! When an action concludes the match, the session hands a [`MatchRecord`]
//! to the [`MatchStore`] on a separate task. The result is published on a
//! `watch` channel as [`Persistence`]; a failed save is logged and never
//! touches the match.

use crate::error::SessionError;
use crate::store::MatchStore;
use oche_core::{apply, Action, GameError, Match, MatchId, MatchRecord};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, warn};

/// Queue depth used when none is configured
pub const DEFAULT_QUEUE_DEPTH: usize = 32;

/// Where the completed-match save stands
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Persistence {
    /// Match still in progress
    Idle,
    /// Save in flight
    Pending,
    Saved,
    /// Save failed; the match itself is unaffected
    Failed(String),
}

impl Persistence {
    /// True once the save has either succeeded or failed
    pub fn is_settled(&self) -> bool {
        matches!(self, Persistence::Saved | Persistence::Failed(_))
    }
}

enum Command {
    Apply {
        action: Action,
        reply: oneshot::Sender<Result<Match, GameError>>,
    },
    Snapshot {
        reply: oneshot::Sender<Match>,
    },
}

/// Cloneable handle to a running session
#[derive(Clone)]
pub struct SessionHandle {
    match_id: MatchId,
    commands: mpsc::Sender<Command>,
    persistence: watch::Receiver<Persistence>,
}

impl SessionHandle {
    pub fn match_id(&self) -> MatchId {
        self.match_id
    }

    /// Queue an action and wait for the resulting match state
    pub async fn apply(&self, action: Action) -> Result<Match, SessionError> {
        let (reply, outcome) = oneshot::channel();
        self.commands
            .send(Command::Apply { action, reply })
            .await
            .map_err(|_| SessionError::Closed)?;
        let result = outcome.await.map_err(|_| SessionError::Closed)?;
        Ok(result?)
    }

    /// Current match state, after every action queued before this call
    pub async fn snapshot(&self) -> Result<Match, SessionError> {
        let (reply, outcome) = oneshot::channel();
        self.commands
            .send(Command::Snapshot { reply })
            .await
            .map_err(|_| SessionError::Closed)?;
        outcome.await.map_err(|_| SessionError::Closed)
    }

    pub fn persistence(&self) -> Persistence {
        self.persistence.borrow().clone()
    }

    /// Receiver for persistence updates
    pub fn subscribe(&self) -> watch::Receiver<Persistence> {
        self.persistence.clone()
    }

    /// Wait until the completed-match save has succeeded or failed
    pub async fn persisted(&self) -> Persistence {
        let mut updates = self.persistence.clone();
        loop {
            let current = updates.borrow_and_update().clone();
            if current.is_settled() {
                return current;
            }
            if updates.changed().await.is_err() {
                return updates.borrow().clone();
            }
        }
    }
}

/// The task that owns a match
pub struct MatchSession {
    state: Match,
    store: Arc<dyn MatchStore>,
    commands: mpsc::Receiver<Command>,
    persistence: Arc<watch::Sender<Persistence>>,
    recorded: bool,
}

impl MatchSession {
    /// Start a session task for `initial` and return its handle
    pub fn spawn(initial: Match, store: Arc<dyn MatchStore>, queue_depth: usize) -> SessionHandle {
        let (commands_tx, commands_rx) = mpsc::channel(queue_depth.max(1));
        let (persistence_tx, persistence_rx) = watch::channel(Persistence::Idle);
        let match_id = initial.id;

        info!(
            "Session: started {} match {} with {} players",
            initial.game_type(),
            match_id,
            initial.player_ids().len()
        );

        let session = MatchSession {
            state: initial,
            store,
            commands: commands_rx,
            persistence: Arc::new(persistence_tx),
            recorded: false,
        };
        tokio::spawn(session.run());

        SessionHandle {
            match_id,
            commands: commands_tx,
            persistence: persistence_rx,
        }
    }

    async fn run(mut self) {
        while let Some(command) = self.commands.recv().await {
            match command {
                Command::Apply { action, reply } => {
                    let result = self.handle(&action);
                    // Caller may have stopped waiting
                    let _ = reply.send(result);
                }
                Command::Snapshot { reply } => {
                    let _ = reply.send(self.state.clone());
                }
            }
        }
        debug!("Session: match {} closed", self.state.id);
    }

    fn handle(&mut self, action: &Action) -> Result<Match, GameError> {
        let next = match apply(&self.state, action) {
            Ok(next) => next,
            Err(err) => {
                debug!("Session: match {} rejected {:?}: {}", self.state.id, action, err);
                return Err(err);
            }
        };
        debug!(
            "Session: match {} applied {:?}, round {}",
            next.id, action, next.current_round
        );
        self.state = next;

        if self.state.game_over && !self.recorded {
            self.recorded = true;
            self.record();
        }
        Ok(self.state.clone())
    }

    /// Fire-and-forget save of the concluded match
    fn record(&self) {
        let Some(record) = MatchRecord::from_match(&self.state) else {
            return;
        };
        info!(
            "Session: match {} won by {}",
            record.match_id,
            record
                .winner()
                .map(|w| w.name.as_str())
                .unwrap_or("unknown player")
        );

        self.persistence.send_replace(Persistence::Pending);
        let store = Arc::clone(&self.store);
        let status = Arc::clone(&self.persistence);
        tokio::spawn(async move {
            match store.record_completed_match(&record).await {
                Ok(()) => {
                    info!("Session: match {} recorded", record.match_id);
                    status.send_replace(Persistence::Saved);
                }
                Err(err) => {
                    warn!("Session: failed to record match {}: {}", record.match_id, err);
                    status.send_replace(Persistence::Failed(err.to_string()));
                }
            }
        });
    }
}
