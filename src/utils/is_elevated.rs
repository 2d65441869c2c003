#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct IsElevatedError(String);

/// Whether the process runs with the privileges snapd requires to change snaps.
pub fn is_elevated() -> Result<bool, IsElevatedError> {
    #[cfg(target_family = "unix")]
    return Ok(nix::unistd::Uid::effective().is_root());

    #[cfg(not(target_family = "unix"))]
    Err(IsElevatedError(
        "snap management is only supported on unix hosts".to_string(),
    ))
}
