use std::process::{Command, ExitStatus, Stdio};

use tracing::debug;

use super::{CommandError, CommandOutput, CommandRunner};

/// [CommandRunner] backed by [std::process::Command].
#[derive(Debug, Default, Clone, Copy)]
pub struct CommandOS;

impl CommandOS {
    fn command(args: &[String]) -> Result<(&str, Command), CommandError> {
        let (binary, args) = args.split_first().ok_or(CommandError::EmptyCommand)?;
        let mut cmd = Command::new(binary);
        cmd.args(args);
        Ok((binary.as_str(), cmd))
    }
}

impl CommandRunner for CommandOS {
    fn run(&self, args: &[String]) -> Result<ExitStatus, CommandError> {
        let (binary, mut cmd) = Self::command(args)?;
        debug!(binary, "running command");
        cmd.stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|err| CommandError::IOError(binary.to_string(), err))
    }

    fn output(
        &self,
        args: &[String],
        envs: &[(String, String)],
    ) -> Result<CommandOutput, CommandError> {
        let (binary, mut cmd) = Self::command(args)?;
        debug!(binary, "running command capturing its output");
        let output = cmd
            .envs(envs.iter().map(|(key, value)| (key, value)))
            .stdin(Stdio::null())
            .output()
            .map_err(|err| CommandError::IOError(binary.to_string(), err))?;

        Ok(CommandOutput {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
