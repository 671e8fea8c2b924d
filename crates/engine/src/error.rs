use cosmic_tetris_types::PlayerId;
use thiserror::Error;

/// Lifecycle faults. Illegal moves are not errors; they return `false`.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum EngineError {
    #[error("gravity tasks are still running; stop the session before starting it again")]
    AlreadyRunning,

    #[error("invalid session config: {0}")]
    InvalidConfig(String),

    #[error("gravity task for {} did not shut down cleanly", .player.as_str())]
    TaskFailed { player: PlayerId },
}

pub type Result<T> = std::result::Result<T, EngineError>;
