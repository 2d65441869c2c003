//! Package Cache abstraction over the host snap daemon.
pub mod error;
pub mod snap_cli;

use std::collections::HashMap;

pub use error::SnapError;
pub use snap_cli::SnapCli;

/// Desired state for [PackageManager::ensure].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapState {
    Latest,
    Absent,
}

/// Status of a service declared by a snap.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ServiceStatus {
    /// Whether the service starts at boot.
    pub enabled: bool,
    /// Whether the service is currently running.
    pub active: bool,
}

/// Snapshot of a snap installation record at lookup time.
///
/// Service status is not part of the record, it is only queried through
/// [PackageManager::services] when needed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Snap {
    pub name: String,
    pub present: bool,
    pub revision: String,
    pub channel: String,
}

impl Snap {
    pub fn absent(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }
}

/// Operations over snaps, addressed by name.
#[cfg_attr(test, mockall::automock)]
pub trait PackageManager {
    /// Looks up the installation record of a snap. A missing snap is not an error.
    fn snap(&self, name: &str) -> Result<Snap, SnapError>;

    /// Status of the services declared by an installed snap, keyed by bare service name.
    fn services(&self, name: &str) -> Result<HashMap<String, ServiceStatus>, SnapError>;

    /// Brings the snap to `state`, tracking `channel` when installing or refreshing.
    fn ensure(&self, name: &str, state: SnapState, channel: Option<String>)
        -> Result<(), SnapError>;

    /// Holds the snap at its current revision so background refreshes are skipped.
    fn hold(&self, name: &str) -> Result<(), SnapError>;

    fn start(&self, name: &str, service: &str) -> Result<(), SnapError>;

    fn stop(&self, name: &str, service: &str) -> Result<(), SnapError>;
}
