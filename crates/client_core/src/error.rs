use thiserror::Error;

/// Failures surfaced to the user by the lookup and update handlers.
///
/// `NotFound` and `UpdateFailed` are decided from the HTTP status alone; the
/// response body is never inspected.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Pokémon not found")]
    NotFound { status: u16 },
    #[error("Error updating information")]
    UpdateFailed { status: u16 },
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid server url '{url}': {reason}")]
    InvalidServerUrl { url: String, reason: String },
    /// The request never left the client, e.g. no worker to run it.
    #[error("{0}")]
    Unavailable(String),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound { status } | Self::UpdateFailed { status } => Some(*status),
            Self::Transport(err) => err.status().map(|s| s.as_u16()),
            Self::InvalidServerUrl { .. } | Self::Unavailable(_) => None,
        }
    }
}
