//! Command-line usage errors

use thiserror::Error;

/// Argument errors. Everything past argument parsing surfaces as the
/// library or config error wrapped in `anyhow` context.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("no command given")]
    MissingCommand,

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("--config requires a path")]
    MissingConfigPath,

    #[error("unexpected argument: {0}")]
    UnexpectedArgument(String),
}

pub type Result<T> = std::result::Result<T, Error>;
