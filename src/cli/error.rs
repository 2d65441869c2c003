use std::process::ExitCode;

use thiserror::Error;

use crate::config::error::ConfigError;
use crate::logging::LoggingError;
use crate::snap::SnapError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to initialize logs: {0}")]
    Logging(#[from] LoggingError),

    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("failed to start the command: {0}")]
    Precondition(String),

    #[error("snap operation failed: {0}")]
    Snap(#[from] SnapError),

    #[error("{0}")]
    Command(String),
}

impl From<CliError> for ExitCode {
    /// Converts the error to an exit code following the BSD `sysexits` conventions.
    fn from(value: CliError) -> Self {
        match value {
            CliError::Precondition(_) => Self::from(69),
            CliError::Logging(_) => Self::from(70),
            CliError::Config(_) => Self::from(78),
            CliError::Snap(_) | CliError::Command(_) => Self::from(1),
        }
    }
}
