//! # Oche Runtime
//!
//! Everything around the pure scoring engine:
//!
//! - **Collaborators**: the [`Roster`] of participants and the [`MatchStore`]
//!   for completed matches, with in-memory implementations
//! - **Lobby**: building a new match from roster entries
//! - **Sessions**: one task per match that applies actions in arrival order
//!   and records the match once it concludes

pub mod error;
pub mod lobby;
pub mod roster;
pub mod session;
pub mod store;

pub use error::{SessionError, StoreError};
pub use lobby::start_match;
pub use roster::{MemoryRoster, Roster};
pub use session::{MatchSession, Persistence, SessionHandle, DEFAULT_QUEUE_DEPTH};
pub use store::{MatchStore, MemoryStore};
