//! Errors raised while decoding inbound frames.

use thiserror::Error;

use crate::models::Identifier;

/// A frame that could not be turned into a [`CompetitionSnapshot`].
///
/// Never fatal: the receiver logs it, drops the frame and carries on.
///
/// [`CompetitionSnapshot`]: crate::models::CompetitionSnapshot
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Not JSON, wrong shape, missing `CompetitionID`/`Users`, or a bad score.
    #[error("malformed snapshot: {0}")]
    Malformed(#[from] serde_json::Error),
    /// The same user appears twice in one roster.
    #[error("competition {competition_id} lists user {user_id} more than once")]
    DuplicateUser {
        competition_id: Identifier,
        user_id: Identifier,
    },
}
