//! Roster participants.

use super::PlayerId;
use crate::error::GameError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A player known to the roster.
///
/// Matches reference participants by id and copy the name at setup; they never own them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: PlayerId,
    pub name: String,
    /// Reference to a stored photo (URL or storage key)
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Participant {
    /// Create a new participant with a fresh id
    pub fn new(name: impl Into<String>, photo_url: Option<String>) -> Result<Self, GameError> {
        Ok(Self {
            id: PlayerId::new(),
            name: clean_name(name.into())?,
            photo_url,
            created_at: Utc::now(),
        })
    }

    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), GameError> {
        self.name = clean_name(name.into())?;
        Ok(())
    }

    pub fn set_photo(&mut self, photo_url: Option<String>) {
        self.photo_url = photo_url;
    }
}

fn clean_name(name: String) -> Result<String, GameError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(GameError::InvalidName(name));
    }
    Ok(trimmed.to_string())
}
