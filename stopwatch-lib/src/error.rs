use std::io;

use thiserror::Error;

/// Errors raised by the stopwatch component.
#[derive(Debug, Error)]
pub enum Error {
    #[error("tick interval must be greater than zero")]
    InvalidInterval,
    #[error("failed to spawn tick thread: {0}")]
    TickerSpawn(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
