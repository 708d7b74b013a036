use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    InsufficientResources(String),

    #[error("{0}")]
    PreconditionFailed(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Minimum price is {min_price} gold (offered {price})")]
    InvalidPrice { price: u64, min_price: u64 },

    #[error("Cannot choose from an empty list")]
    EmptyChoice,

    #[error("Profile '{profile_id}' not found")]
    ProfileNotFound { profile_id: String },

    #[error("Corrupt '{kind}' record: {reason}")]
    CorruptRecord { kind: String, reason: String },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Coarse classification surfaced to callers deciding how to report a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    InsufficientResources,
    PreconditionFailed,
    Configuration,
    Infrastructure,
}

impl GameError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) | Self::EmptyChoice => ErrorKind::InvalidInput,
            Self::InsufficientResources(_) => ErrorKind::InsufficientResources,
            Self::PreconditionFailed(_) => ErrorKind::PreconditionFailed,
            Self::Configuration(_) | Self::InvalidPrice { .. } => ErrorKind::Configuration,
            Self::ProfileNotFound { .. }
            | Self::CorruptRecord { .. }
            | Self::Database(_)
            | Self::Serialization(_) => ErrorKind::Infrastructure,
        }
    }
}

pub type GameResult<T> = Result<T, GameError>;
