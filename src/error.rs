use thiserror::Error;

/// Errors raised before a simulation starts.
///
/// A game either completes or fails here; nothing is partially mutated.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    #[error("invalid roster for team {team}: {reason}")]
    InvalidRoster { team: u32, reason: String },

    #[error("invalid config field `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("unknown stat name: {0}")]
    UnknownStat(String),

    #[error("unknown rating name: {0}")]
    UnknownRating(String),
}

impl SimError {
    pub(crate) fn roster(team: u32, reason: impl Into<String>) -> Self {
        SimError::InvalidRoster {
            team,
            reason: reason.into(),
        }
    }
}
