use thiserror::Error;

/// Why a board configuration was rejected.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigIssue {
    #[error("width must be positive")]
    ZeroWidth,
    #[error("height must be positive")]
    ZeroHeight,
    #[error("mine count must leave at least one safe cell")]
    TooManyMines,
    #[error("generator placed a different number of mines than requested")]
    MineCountMismatch,
    #[error("an open cell cannot carry a flag")]
    OpenFlaggedCell,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid board configuration: {0}")]
    InvalidConfig(#[from] ConfigIssue),
    #[error("Coordinates out of range")]
    OutOfRange,
    #[error("Operation not allowed in the current state")]
    InvalidOperation,
}

pub type Result<T> = core::result::Result<T, GameError>;
