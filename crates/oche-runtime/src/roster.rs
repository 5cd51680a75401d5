//! Roster of participants available for setup.

use crate::error::StoreError;
use async_trait::async_trait;
use oche_core::{Participant, PlayerId};
use std::sync::{Arc, Mutex};

/// Where participants live between matches
///
/// Only match setup reads the roster; the engine never does.
#[async_trait]
pub trait Roster: Send + Sync {
    /// All participants, most recently created first
    async fn list_players(&self) -> Result<Vec<Participant>, StoreError>;

    /// Add a participant. The name is trimmed and must not be empty.
    async fn create_player(
        &self,
        name: &str,
        photo_url: Option<String>,
    ) -> Result<Participant, StoreError>;

    async fn delete_player(&self, id: PlayerId) -> Result<(), StoreError>;
}

/// In-memory roster
#[derive(Clone, Default)]
pub struct MemoryRoster {
    /// Creation order
    players: Arc<Mutex<Vec<Participant>>>,
}

impl MemoryRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of participants on the roster
    pub fn len(&self) -> usize {
        self.players.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl Roster for MemoryRoster {
    async fn list_players(&self) -> Result<Vec<Participant>, StoreError> {
        let mut players: Vec<Participant> =
            self.players.lock().unwrap().iter().rev().cloned().collect();
        // Stable, so equal timestamps keep newest-inserted first
        players.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(players)
    }

    async fn create_player(
        &self,
        name: &str,
        photo_url: Option<String>,
    ) -> Result<Participant, StoreError> {
        let participant =
            Participant::new(name, photo_url).map_err(|e| StoreError::Rejected(e.to_string()))?;
        self.players.lock().unwrap().push(participant.clone());
        Ok(participant)
    }

    async fn delete_player(&self, id: PlayerId) -> Result<(), StoreError> {
        let mut players = self.players.lock().unwrap();
        let index = players
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("player {}", id)))?;
        players.remove(index);
        Ok(())
    }
}
