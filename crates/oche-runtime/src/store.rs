//! Persistence of completed matches and the history query.

use crate::error::StoreError;
use async_trait::async_trait;
use oche_core::{MatchId, MatchRecord, MatchSummary};
use std::sync::{Arc, Mutex};

/// Storage for finished matches
#[async_trait]
pub trait MatchStore: Send + Sync {
    /// Store a finished match. Recording the same match twice is rejected.
    async fn record_completed_match(&self, record: &MatchRecord) -> Result<(), StoreError>;

    /// History, most recently completed first
    async fn list_completed_matches(&self) -> Result<Vec<MatchSummary>, StoreError>;

    /// Full record of one match, e.g. to replay it
    async fn get_match(&self, id: MatchId) -> Result<MatchRecord, StoreError>;
}

/// In-memory match store
#[derive(Clone)]
pub struct MemoryStore {
    records: Arc<Mutex<Vec<MatchRecord>>>,
    available: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            available: true,
        }
    }

    /// A store whose backend is down: every call fails with `Unavailable`
    pub fn failing() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// Number of stored matches
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.available {
            Ok(())
        } else {
            Err(StoreError::Unavailable("memory store offline".to_string()))
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MatchStore for MemoryStore {
    async fn record_completed_match(&self, record: &MatchRecord) -> Result<(), StoreError> {
        self.check_available()?;
        let mut records = self.records.lock().unwrap();
        if records.iter().any(|r| r.match_id == record.match_id) {
            return Err(StoreError::Rejected(format!(
                "match {} already recorded",
                record.match_id
            )));
        }
        records.push(record.clone());
        Ok(())
    }

    async fn list_completed_matches(&self) -> Result<Vec<MatchSummary>, StoreError> {
        self.check_available()?;
        let mut summaries: Vec<MatchSummary> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .rev()
            .map(MatchRecord::summary)
            .collect();
        summaries.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        Ok(summaries)
    }

    async fn get_match(&self, id: MatchId) -> Result<MatchRecord, StoreError> {
        self.check_available()?;
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.match_id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("match {}", id)))
    }
}
