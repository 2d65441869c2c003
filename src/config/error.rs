use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("error reading config file `{0}`: `{1}`")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("invalid config file `{0}`: `{1}`")]
    Parse(PathBuf, #[source] serde_yaml::Error),
}
