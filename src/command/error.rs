use std::fmt::Debug;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("empty command, a binary must be provided")]
    EmptyCommand,

    #[error("`{0}` could not be executed: `{1}`")]
    IOError(String, #[source] std::io::Error),
}
