//! Match setup from roster entries.

use crate::error::SessionError;
use crate::roster::Roster;
use oche_core::{initialize, GameError, GameSettings, Match, Participant, PlayerId};

/// Build a new match for the selected players, seated in the order given
pub async fn start_match(
    roster: &dyn Roster,
    settings: GameSettings,
    selected: &[PlayerId],
) -> Result<Match, SessionError> {
    let available = roster.list_players().await?;
    let participants = selected
        .iter()
        .map(|id| {
            available
                .iter()
                .find(|p| p.id == *id)
                .cloned()
                .ok_or(GameError::PlayerNotFound(*id))
        })
        .collect::<Result<Vec<Participant>, GameError>>()?;
    Ok(initialize(settings, &participants)?)
}
