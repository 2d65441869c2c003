//! Fixed identifiers expected by the MAAS snap and its tooling.

pub const MAAS_SNAP_NAME: &str = "maas";
/// Service inside the snap supervising every MAAS process.
pub const MAAS_SERVICE: &str = "pebble";
pub const MAAS_INIT_BINARY: &str = "/snap/bin/maas";

/// Enrollment secret persisted by `maas init`. Documentation only, never read here.
pub const MAAS_SECRET_PATH: &str = "/var/snap/maas/common/maas/secret";
/// Host identity written once the rack registers. Documentation only, never read here.
pub const MAAS_ID_PATH: &str = "/var/snap/maas/common/maas/maas_id";

pub const SNAP_BINARY: &str = "snap";
pub const DEFAULT_CHANNEL: &str = "latest/stable";
pub const HELPER_CONFIG_PATH: &str = "/etc/maas-agent-helper/config.yaml";
