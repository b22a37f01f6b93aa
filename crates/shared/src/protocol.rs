//! Inbound frame decoding.

use std::collections::HashSet;

use crate::error::DecodeError;
use crate::models::CompetitionSnapshot;

/// Parse one text frame into a competition snapshot.
///
/// An empty `Users` array is valid. Unknown fields are ignored.
pub fn decode_snapshot(frame: &str) -> Result<CompetitionSnapshot, DecodeError> {
    let snapshot: CompetitionSnapshot = serde_json::from_str(frame)?;

    let mut seen = HashSet::with_capacity(snapshot.users.len());
    for user in &snapshot.users {
        if !seen.insert(&user.id) {
            return Err(DecodeError::DuplicateUser {
                competition_id: snapshot.competition_id.clone(),
                user_id: user.id.clone(),
            });
        }
    }

    Ok(snapshot)
}
