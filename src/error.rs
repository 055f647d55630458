// Error types shared by the engine, game loop and tooling

use thiserror::Error;

/// Every recoverable failure the crate reports
///
/// None of these are fatal to a running game: callers keep the previous
/// board and carry on.
#[derive(Error, Debug)]
pub enum GameError {
    #[error("invalid input: '{0}' is not a direction")]
    InvalidInput(String),
    #[error("invalid tile {value} at ({row}, {col}): tiles must be 0 or a power of two from 2 to 131072")]
    InvalidTile { row: usize, col: usize, value: u32 },
    #[error("config error: {0}")]
    Config(String),
    #[error("log error: {0}")]
    Log(String),
}
