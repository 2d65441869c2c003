//! Command line interface exposing the MAAS helper operations.
pub mod error;

use std::path::PathBuf;

use tracing::{debug, info, Level};

use crate::command::{CommandOS, CommandRunner};
use crate::config::HelperConfig;
use crate::logging::Logging;
use crate::maas::MaasHelper;
use crate::snap::{PackageManager, SnapCli};
use crate::utils::is_elevated::is_elevated;
use error::CliError;

const NOT_INSTALLED: &str = "not installed";

#[derive(Debug, clap::Parser)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Overrides the default configuration path `/etc/maas-agent-helper/config.yaml`.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level for the cli command
    #[arg(long, global = true, default_value = "info")]
    pub log_level: Level,
}

/// Commands supported by the cli
#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Install the MAAS snap and hold it at the installed revision
    Install(InstallArgs),
    /// Remove the MAAS snap
    Uninstall,
    /// Print the installed MAAS revision
    Version,
    /// Print the channel tracked by the installed MAAS snap
    Channel,
    /// Print whether the MAAS service is running
    Status,
    /// Start the MAAS service
    Start,
    /// Stop the MAAS service
    Stop,
    /// Register this host as a rack controller
    SetupRack(SetupRackArgs),
}

#[derive(Debug, clap::Args)]
pub struct InstallArgs {
    /// Snap store channel, defaults to the configured one
    #[arg(long)]
    channel: Option<String>,
}

#[derive(clap::Args)]
pub struct SetupRackArgs {
    /// URL used by the nodes and the other controllers to reach MAAS
    #[arg(long)]
    maas_url: String,

    /// Enrollment secret of the MAAS region
    #[arg(long, required_unless_present = "secret_file", conflicts_with = "secret_file")]
    secret: Option<String>,

    /// File containing the enrollment secret
    #[arg(long)]
    secret_file: Option<PathBuf>,
}

// The secret must never reach the logs.
impl std::fmt::Debug for SetupRackArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SetupRackArgs")
            .field("maas_url", &self.maas_url)
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("secret_file", &self.secret_file)
            .finish()
    }
}

impl SetupRackArgs {
    fn secret(&self) -> Result<String, CliError> {
        match (&self.secret, &self.secret_file) {
            (Some(secret), _) => Ok(secret.clone()),
            (None, Some(path)) => std::fs::read_to_string(path)
                .map(|secret| secret.trim_end().to_string())
                .map_err(|err| {
                    CliError::Command(format!(
                        "error reading the secret file '{}': {}",
                        path.display(),
                        err
                    ))
                }),
            (None, None) => Err(CliError::Command(
                "either 'secret' or 'secret_file' must be set".to_string(),
            )),
        }
    }
}

impl Commands {
    /// Whether the command changes the host and therefore needs root.
    pub fn requires_root(&self) -> bool {
        !matches!(self, Commands::Version | Commands::Channel | Commands::Status)
    }

    /// Runs the command, returning what should be printed to stdout.
    pub fn execute<P, R>(
        self,
        helper: &MaasHelper<P, R>,
        config: &HelperConfig,
    ) -> Result<Option<String>, CliError>
    where
        P: PackageManager,
        R: CommandRunner,
    {
        match self {
            Commands::Install(args) => {
                let channel = args.channel.unwrap_or_else(|| config.channel.clone());
                helper.install(&channel)?;
                Ok(None)
            }
            Commands::Uninstall => {
                helper.uninstall()?;
                Ok(None)
            }
            Commands::Version => Ok(Some(
                helper
                    .installed_version()?
                    .unwrap_or_else(|| NOT_INSTALLED.to_string()),
            )),
            Commands::Channel => Ok(Some(
                helper
                    .installed_channel()?
                    .unwrap_or_else(|| NOT_INSTALLED.to_string()),
            )),
            Commands::Status => {
                let status = if helper.is_running()? {
                    "running"
                } else {
                    "stopped"
                };
                Ok(Some(status.to_string()))
            }
            Commands::Start => {
                helper.set_running(true)?;
                Ok(None)
            }
            Commands::Stop => {
                helper.set_running(false)?;
                Ok(None)
            }
            Commands::SetupRack(args) => {
                let secret = args.secret()?;
                if !helper.setup_rack(&args.maas_url, &secret) {
                    return Err(CliError::Command(
                        "rack controller initialization failed".to_string(),
                    ));
                }
                Ok(None)
            }
        }
    }
}

/// Initializes logging and configuration, checks preconditions and executes the parsed command.
pub fn run(cli: Cli) -> Result<(), CliError> {
    Logging::try_init(cli.log_level)?;

    let config = HelperConfig::load(cli.config.as_deref())?;
    debug!(?config, "configuration loaded");

    if cli.command.requires_root() {
        let elevated = is_elevated().map_err(|err| CliError::Precondition(err.to_string()))?;
        if !elevated {
            return Err(CliError::Precondition(
                "Program must run as root".to_string(),
            ));
        }
    }

    let helper = MaasHelper::new(
        SnapCli::new(CommandOS, config.snap_binary.clone()),
        CommandOS,
    )
    .with_init_binary(config.maas_binary.clone());

    info!(command = ?cli.command, "running command");
    if let Some(output) = cli.command.execute(&helper, &config)? {
        println!("{output}");
    }
    Ok(())
}
