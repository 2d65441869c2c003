pub mod command_os;
pub mod error;

use std::process::ExitStatus;

pub use command_os::CommandOS;
pub use error::CommandError;

/// Result of a command whose output was captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

/// Trait that specifies the interface to execute external binaries synchronously.
///
/// The first element of `args` is the binary, the rest are passed as its arguments verbatim.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner {
    /// Runs the command inheriting the parent stdio and blocks until it exits.
    fn run(&self, args: &[String]) -> Result<ExitStatus, CommandError>;

    /// Runs the command capturing stdout and stderr, blocking until it exits.
    ///
    /// `envs` are set on top of the inherited environment.
    fn output(
        &self,
        args: &[String],
        envs: &[(String, String)],
    ) -> Result<CommandOutput, CommandError>;
}
