/// Errors that can occur at the engine's API surface.
/// Rejected clicks are not errors: the engine ignores them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// Coordinates outside the 8x8 board
    #[error("cell ({row}, {col}) is outside the board")]
    OutOfRange { row: u8, col: u8 },

    /// Configuration rejected by validation or deserialization
    #[error("invalid game config: {message}")]
    InvalidConfig { message: String },

    /// Value could not be converted for the host
    #[error("serialization failed: {message}")]
    Serialization { message: String },
}

/// Result type alias for engine operations
pub type GameResult<T> = Result<T, GameError>;
