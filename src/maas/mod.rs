//! Installation and service control of the MAAS snap acting as a rack controller.
use tracing::{debug, info, warn};

use crate::command::{CommandOS, CommandRunner};
use crate::defaults::{MAAS_INIT_BINARY, MAAS_SERVICE, MAAS_SNAP_NAME};
use crate::snap::{PackageManager, SnapCli, SnapError, SnapState};

/// Idempotent facade over the MAAS snap lifecycle plus the rack registration call.
///
/// Every operation looks the snap up again; nothing is cached between calls.
pub struct MaasHelper<P = SnapCli, R = CommandOS> {
    snaps: P,
    runner: R,
    init_binary: String,
}

impl Default for MaasHelper {
    fn default() -> Self {
        Self::new(SnapCli::default(), CommandOS)
    }
}

impl<P, R> MaasHelper<P, R>
where
    P: PackageManager,
    R: CommandRunner,
{
    pub fn new(snaps: P, runner: R) -> Self {
        Self {
            snaps,
            runner,
            init_binary: MAAS_INIT_BINARY.to_string(),
        }
    }

    /// Overrides the binary executed by [MaasHelper::setup_rack].
    pub fn with_init_binary(mut self, init_binary: impl Into<String>) -> Self {
        self.init_binary = init_binary.into();
        self
    }

    /// Installs the snap from `channel` and holds it. Does nothing if it is already installed.
    pub fn install(&self, channel: &str) -> Result<(), SnapError> {
        let maas = self.snaps.snap(MAAS_SNAP_NAME)?;
        if maas.present {
            debug!(revision = %maas.revision, "MAAS already installed");
            return Ok(());
        }
        info!(channel, "installing MAAS");
        self.snaps
            .ensure(MAAS_SNAP_NAME, SnapState::Latest, Some(channel.to_string()))?;
        self.snaps.hold(MAAS_SNAP_NAME)
    }

    /// Removes the snap. Does nothing if it is not installed.
    pub fn uninstall(&self) -> Result<(), SnapError> {
        let maas = self.snaps.snap(MAAS_SNAP_NAME)?;
        if !maas.present {
            debug!("MAAS already absent");
            return Ok(());
        }
        info!("uninstalling MAAS");
        self.snaps.ensure(MAAS_SNAP_NAME, SnapState::Absent, None)
    }

    pub fn installed_version(&self) -> Result<Option<String>, SnapError> {
        let maas = self.snaps.snap(MAAS_SNAP_NAME)?;
        Ok(maas.present.then_some(maas.revision))
    }

    pub fn installed_channel(&self) -> Result<Option<String>, SnapError> {
        let maas = self.snaps.snap(MAAS_SNAP_NAME)?;
        Ok(maas.present.then_some(maas.channel))
    }

    /// Whether the MAAS service is active. A service missing from the snap, or the snap itself
    /// missing, reads as not running.
    pub fn is_running(&self) -> Result<bool, SnapError> {
        let maas = self.snaps.snap(MAAS_SNAP_NAME)?;
        if !maas.present {
            return Ok(false);
        }
        let services = self.snaps.services(MAAS_SNAP_NAME)?;
        Ok(services
            .get(MAAS_SERVICE)
            .map(|service| service.active)
            .unwrap_or_default())
    }

    /// Starts or stops the MAAS service. Repeating the current state is left to the snap daemon.
    pub fn set_running(&self, enable: bool) -> Result<(), SnapError> {
        if enable {
            self.snaps.start(MAAS_SNAP_NAME, MAAS_SERVICE)
        } else {
            self.snaps.stop(MAAS_SNAP_NAME, MAAS_SERVICE)
        }
    }

    /// Registers this host as a rack controller of the MAAS region at `maas_url`.
    ///
    /// Returns `true` only when the init tool exits with status zero. Any other status, a signal,
    /// or failing to launch the tool at all reads as `false`.
    pub fn setup_rack(&self, maas_url: &str, secret: &str) -> bool {
        let args = self.setup_rack_args(maas_url, secret);
        info!(maas_url, "initializing rack controller");
        match self.runner.run(&args) {
            Ok(status) if status.success() => true,
            Ok(status) => {
                warn!(%status, "rack controller initialization failed");
                false
            }
            Err(err) => {
                warn!("rack controller initialization could not run: {err}");
                false
            }
        }
    }

    fn setup_rack_args(&self, maas_url: &str, secret: &str) -> Vec<String> {
        [
            self.init_binary.as_str(),
            "init",
            "rack",
            "--maas-url",
            maas_url,
            "--secret",
            secret,
            "--force",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }
}
