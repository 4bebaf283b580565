use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates are outside of the board")]
    OutOfBounds,
    #[error("Board width and height must be at least 1")]
    InvalidConfiguration,
}

pub type Result<T> = core::result::Result<T, GameError>;
