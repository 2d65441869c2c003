pub mod error;

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::defaults::{DEFAULT_CHANNEL, HELPER_CONFIG_PATH, MAAS_INIT_BINARY, SNAP_BINARY};
use error::ConfigError;

/// Settings for the binaries and channel used to manage MAAS.
///
/// Example:
///
/// ```yaml
/// channel: 3.4/stable
/// snap_binary: /usr/bin/snap
/// maas_binary: /snap/bin/maas
/// ```
#[derive(Debug, Deserialize, PartialEq, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct HelperConfig {
    /// Snap store channel MAAS is installed from.
    pub channel: String,
    pub snap_binary: String,
    /// Tool invoked to register the rack controller.
    pub maas_binary: String,
}

impl Default for HelperConfig {
    fn default() -> Self {
        Self {
            channel: DEFAULT_CHANNEL.to_string(),
            snap_binary: SNAP_BINARY.to_string(),
            maas_binary: MAAS_INIT_BINARY.to_string(),
        }
    }
}

impl HelperConfig {
    /// Loads the configuration from `path`, which must exist. Without a path the default
    /// location is used, falling back to defaults if nothing is there.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_file(path),
            None => {
                let default_path = PathBuf::from(HELPER_CONFIG_PATH);
                if !default_path.exists() {
                    debug!(path = HELPER_CONFIG_PATH, "no config file, using defaults");
                    return Ok(Self::default());
                }
                Self::load_file(&default_path)
            }
        }
    }

    fn load_file(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "loading config file");
        let file = std::fs::File::open(path)
            .map_err(|err| ConfigError::Read(path.to_path_buf(), err))?;
        // An empty document deserializes as unit, treat it as all defaults.
        let value: serde_yaml::Value = serde_yaml::from_reader(file)
            .map_err(|err| ConfigError::Parse(path.to_path_buf(), err))?;
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_yaml::from_value(value).map_err(|err| ConfigError::Parse(path.to_path_buf(), err))
    }
}
