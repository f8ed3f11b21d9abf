use minegate_protocol::GameId;

/// Errors from the play-time ledger.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("game {0} is already being tracked")]
    AlreadyTracking(GameId),

    #[error("game {0} is not being tracked")]
    NotTracked(GameId),

    #[error("games are still being tracked")]
    StillTracking,

    #[error("invalid time cache: {0}")]
    Decode(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
