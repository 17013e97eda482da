//! Unified Error Model
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackError {
    /// Carrier answered with `statusFlag: false`. Expected outcome, not a bug.
    #[error("NOT_FOUND/{0}")]
    NotFound(String),

    /// Carrier claimed success but the payload is missing required structure.
    #[error("MALFORMED/{0}")]
    MalformedResponse(String),

    /// Caller broke an input contract (e.g. ordering an empty timeline).
    #[error("INPUT/{0}")]
    InvalidInput(String),
}

impl TrackError {
    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::MalformedResponse(_) => "malformed",
            Self::InvalidInput(_) => "invalid_input",
        }
    }
}
