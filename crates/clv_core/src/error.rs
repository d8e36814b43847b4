use thiserror::Error;

/// Structural failures surfaced to the caller.
///
/// Plays that are merely not analyzable never produce a `CoreError`; they
/// are reported as [`crate::models::Exclusion`] values instead.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Play {game_id}/{play_id} has no pre-event frames (stitch offset undefined)")]
    NoPreEventFrames { game_id: i64, play_id: i64 },

    #[error("Config (de)serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CoreError {
    /// Whether the batch may skip the offending play/week and continue.
    pub fn is_recoverable(&self) -> bool {
        match self {
            CoreError::NoPreEventFrames { .. } => true,
            CoreError::InvalidConfig(_) => false,
            CoreError::Yaml(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
