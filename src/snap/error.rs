use std::process::ExitStatus;

use thiserror::Error;

use crate::command::CommandError;

#[derive(Error, Debug)]
pub enum SnapError {
    #[error("snap command could not run: `{0}`")]
    Command(#[from] CommandError),

    #[error("`{command}` exited with `{status}`: {stderr}")]
    CommandFailed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("unexpected `{command}` output: {reason}")]
    UnexpectedOutput { command: String, reason: String },
}
