use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, info};

use super::{PackageManager, ServiceStatus, Snap, SnapError, SnapState};
use crate::command::{CommandOS, CommandOutput, CommandRunner};
use crate::defaults::SNAP_BINARY;

/// snapd translates its messages and table headers, parsing relies on the untranslated ones.
const SNAP_ENV: [(&str, &str); 1] = [("LC_ALL", "C")];

/// Reported by `snap list <name>` when the snap is not installed.
const NOT_INSTALLED_MSG: &str = "no matching snaps installed";

const LIST_REVISION_COLUMN: &str = "Rev";
const LIST_TRACKING_COLUMN: &str = "Tracking";

/// Matches a `snap services` row: `<snap>.<service>  <startup>  <current>  <notes>`.
const SERVICE_ROW_RE: &str = r"^(?P<snap>[^\s.]+)\.(?P<service>\S+)\s+(?P<startup>\S+)\s+(?P<current>\S+)";

fn service_row_re() -> &'static Regex {
    static RE_ONCE: OnceLock<Regex> = OnceLock::new();
    RE_ONCE.get_or_init(|| Regex::new(SERVICE_ROW_RE).unwrap())
}

/// [PackageManager] driving the host `snap` command line.
pub struct SnapCli<R = CommandOS> {
    runner: R,
    binary: String,
}

impl Default for SnapCli<CommandOS> {
    fn default() -> Self {
        Self::new(CommandOS, SNAP_BINARY)
    }
}

impl<R> SnapCli<R>
where
    R: CommandRunner,
{
    pub fn new(runner: R, binary: impl Into<String>) -> Self {
        Self {
            runner,
            binary: binary.into(),
        }
    }

    fn args(&self, args: &[&str]) -> Vec<String> {
        std::iter::once(self.binary.as_str())
            .chain(args.iter().copied())
            .map(String::from)
            .collect()
    }

    fn output(&self, args: &[&str]) -> Result<CommandOutput, SnapError> {
        let envs: Vec<(String, String)> = SNAP_ENV
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Ok(self.runner.output(&self.args(args), &envs)?)
    }

    /// Runs a snap subcommand, failing when it exits with a non-zero status.
    fn execute(&self, args: &[&str]) -> Result<CommandOutput, SnapError> {
        let output = self.output(args)?;
        if !output.success() {
            return Err(self.failed(args, output));
        }
        Ok(output)
    }

    fn failed(&self, args: &[&str], output: CommandOutput) -> SnapError {
        SnapError::CommandFailed {
            command: self.args(args).join(" "),
            status: output.status,
            stderr: output.stderr.trim().to_string(),
        }
    }

    /// Returns the revision and tracked channel of an installed snap, `None` if it is missing.
    fn installed(&self, name: &str) -> Result<Option<(String, String)>, SnapError> {
        let args = ["list", name, "--unicode=never", "--color=never"];
        let output = self.output(&args)?;
        if !output.success() {
            if output.stderr.contains(NOT_INSTALLED_MSG) {
                return Ok(None);
            }
            return Err(self.failed(&args, output));
        }
        parse_list(name, &output.stdout)
            .map(Some)
            .map_err(|reason| SnapError::UnexpectedOutput {
                command: self.args(&args).join(" "),
                reason,
            })
    }
}

impl<R> PackageManager for SnapCli<R>
where
    R: CommandRunner,
{
    fn snap(&self, name: &str) -> Result<Snap, SnapError> {
        let Some((revision, channel)) = self.installed(name)? else {
            debug!(snap = name, "snap is not installed");
            return Ok(Snap::absent(name));
        };
        debug!(snap = name, %revision, %channel, "snap is installed");

        Ok(Snap {
            name: name.to_string(),
            present: true,
            revision,
            channel,
        })
    }

    fn services(&self, name: &str) -> Result<HashMap<String, ServiceStatus>, SnapError> {
        let output = self.execute(&["services", name])?;
        Ok(parse_services(name, &output.stdout))
    }

    fn ensure(
        &self,
        name: &str,
        state: SnapState,
        channel: Option<String>,
    ) -> Result<(), SnapError> {
        let installed = self.installed(name)?.is_some();
        let channel_arg = channel.map(|channel| format!("--channel={channel}"));

        let action = match (state, installed) {
            (SnapState::Latest, false) => "install",
            (SnapState::Latest, true) => "refresh",
            (SnapState::Absent, true) => "remove",
            (SnapState::Absent, false) => {
                debug!(snap = name, "snap already absent");
                return Ok(());
            }
        };

        let mut args = vec![action, name];
        if let (SnapState::Latest, Some(channel_arg)) = (state, channel_arg.as_deref()) {
            args.push(channel_arg);
        }

        info!(snap = name, action, "updating snap");
        self.execute(&args)?;
        Ok(())
    }

    fn hold(&self, name: &str) -> Result<(), SnapError> {
        info!(snap = name, "holding snap refreshes");
        self.execute(&["refresh", "--hold", name])?;
        Ok(())
    }

    fn start(&self, name: &str, service: &str) -> Result<(), SnapError> {
        info!(snap = name, service, "starting snap service");
        self.execute(&["start", &format!("{name}.{service}")])?;
        Ok(())
    }

    fn stop(&self, name: &str, service: &str) -> Result<(), SnapError> {
        info!(snap = name, service, "stopping snap service");
        self.execute(&["stop", &format!("{name}.{service}")])?;
        Ok(())
    }
}

/// Extracts revision and tracking channel of `name` from a `snap list` table.
fn parse_list(name: &str, stdout: &str) -> Result<(String, String), String> {
    let mut lines = stdout.lines().filter(|line| !line.trim().is_empty());

    let header: Vec<&str> = lines
        .next()
        .ok_or_else(|| "empty output".to_string())?
        .split_whitespace()
        .collect();
    let column = |title: &str| {
        header
            .iter()
            .position(|c| *c == title)
            .ok_or_else(|| format!("missing `{title}` column"))
    };
    let revision_idx = column(LIST_REVISION_COLUMN)?;
    let tracking_idx = column(LIST_TRACKING_COLUMN)?;

    let row: Vec<&str> = lines
        .map(|line| line.split_whitespace().collect::<Vec<_>>())
        .find(|row| row.first() == Some(&name))
        .ok_or_else(|| format!("snap `{name}` not listed"))?;

    match (row.get(revision_idx), row.get(tracking_idx)) {
        (Some(revision), Some(channel)) => Ok((revision.to_string(), channel.to_string())),
        _ => Err(format!("incomplete row for snap `{name}`")),
    }
}

/// Builds the service map of `name` from a `snap services` table, keyed by bare service name.
fn parse_services(name: &str, stdout: &str) -> HashMap<String, ServiceStatus> {
    stdout
        .lines()
        .filter_map(|line| service_row_re().captures(line))
        .filter(|caps| &caps["snap"] == name)
        .map(|caps| {
            (
                caps["service"].to_string(),
                ServiceStatus {
                    enabled: &caps["startup"] == "enabled",
                    active: &caps["current"] == "active",
                },
            )
        })
        .collect()
}
