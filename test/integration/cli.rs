use assert_cmd::Command;
use predicates::prelude::predicate;
use tempfile::TempDir;

use crate::common::TestResult;

#[test]
fn help_lists_commands() -> TestResult<()> {
    let mut cmd = Command::cargo_bin("maas-agent-helper")?;
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("install"))
        .stdout(predicate::str::contains("setup-rack"));
    Ok(())
}

#[test]
fn setup_rack_requires_secret() -> TestResult<()> {
    let mut cmd = Command::cargo_bin("maas-agent-helper")?;
    cmd.args(["setup-rack", "--maas-url", "http://maas:5240/MAAS"]);
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--secret"));
    Ok(())
}

#[test]
fn missing_config_file_fails() -> TestResult<()> {
    let dir = TempDir::new()?;
    let mut cmd = Command::cargo_bin("maas-agent-helper")?;
    cmd.arg("--config")
        .arg(dir.path().join("missing.yaml"))
        .arg("version");
    cmd.assert()
        .failure()
        .code(78)
        .stderr(predicate::str::contains("error reading config file"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn does_not_run_if_no_root() -> TestResult<()> {
    if nix::unistd::Uid::effective().is_root() {
        return Ok(());
    }
    let mut cmd = Command::cargo_bin("maas-agent-helper")?;
    cmd.args(["install", "--channel", "3.4/stable"]);
    cmd.assert()
        .failure()
        .code(69)
        .stderr(predicate::str::contains("Program must run as root"));
    Ok(())
}

#[cfg(unix)]
mod fake_snap {
    use super::*;
    use crate::common::{
        create_config, create_script, SNAP_INSTALLED, SNAP_NOT_INSTALLED, SNAP_TRANSLATED_UNLESS_C,
    };

    fn command_with_fake_snap(dir: &TempDir, snap_body: &str) -> TestResult<Command> {
        let snap = create_script(dir, "snap", snap_body)?;
        let maas = create_script(dir, "maas", "exit 0")?;
        let config = create_config(dir, &snap, &maas)?;

        let mut cmd = Command::cargo_bin("maas-agent-helper")?;
        cmd.arg("--config").arg(config);
        Ok(cmd)
    }

    #[test]
    fn version_of_installed_snap() -> TestResult<()> {
        let dir = TempDir::new()?;
        let mut cmd = command_with_fake_snap(&dir, SNAP_INSTALLED)?;
        cmd.arg("version");
        cmd.assert().success().stdout("32469\n");
        Ok(())
    }

    #[test]
    fn channel_of_installed_snap() -> TestResult<()> {
        let dir = TempDir::new()?;
        let mut cmd = command_with_fake_snap(&dir, SNAP_INSTALLED)?;
        cmd.arg("channel");
        cmd.assert().success().stdout("3.4/stable\n");
        Ok(())
    }

    #[test]
    fn status_of_running_service() -> TestResult<()> {
        let dir = TempDir::new()?;
        let mut cmd = command_with_fake_snap(&dir, SNAP_INSTALLED)?;
        cmd.arg("status");
        cmd.assert().success().stdout("running\n");
        Ok(())
    }

    #[test]
    fn version_when_not_installed() -> TestResult<()> {
        let dir = TempDir::new()?;
        let mut cmd = command_with_fake_snap(&dir, SNAP_NOT_INSTALLED)?;
        cmd.arg("version");
        cmd.assert().success().stdout("not installed\n");
        Ok(())
    }

    #[test]
    fn status_when_not_installed() -> TestResult<()> {
        let dir = TempDir::new()?;
        let mut cmd = command_with_fake_snap(&dir, SNAP_NOT_INSTALLED)?;
        cmd.arg("status");
        cmd.assert().success().stdout("stopped\n");
        Ok(())
    }

    #[test]
    fn status_ignores_the_caller_locale() -> TestResult<()> {
        let dir = TempDir::new()?;
        let body = format!("{SNAP_TRANSLATED_UNLESS_C}{SNAP_INSTALLED}");
        let mut cmd = command_with_fake_snap(&dir, &body)?;
        cmd.env("LANG", "fr_FR.UTF-8")
            .env("LC_ALL", "fr_FR.UTF-8")
            .arg("status");
        cmd.assert().success().stdout("running\n");
        Ok(())
    }
}

/// Fake `snap` recording every invocation. `list` reports MAAS once `install` has run.
#[cfg(unix)]
fn recording_snap_body(dir: &TempDir) -> String {
    let log = dir.path().join("snap.log");
    let marker = dir.path().join("installed");
    format!(
        r#"
echo "$@" >> "{log}"
case "$1" in
  list)
    if [ ! -f "{marker}" ]; then
      echo "error: no matching snaps installed" >&2
      exit 1
    fi
    echo "Name  Version  Rev    Tracking    Publisher   Notes"
    echo "maas  3.4.2    32469  3.4/stable  canonical*  -"
    ;;
  install)
    touch "{marker}"
    ;;
esac
"#,
        log = log.display(),
        marker = marker.display(),
    )
}

#[cfg(unix)]
#[test]
fn runs_as_root() -> TestResult<()> {
    use crate::common::{create_config, create_script};

    if !nix::unistd::Uid::effective().is_root() {
        return Ok(());
    }
    let dir = TempDir::new()?;
    let snap = create_script(&dir, "snap", &recording_snap_body(&dir))?;
    let maas = create_script(&dir, "maas", "exit 0")?;
    let config = create_config(&dir, &snap, &maas)?;

    let mut cmd = Command::cargo_bin("maas-agent-helper")?;
    cmd.arg("--config")
        .arg(&config)
        .args(["install", "--channel", "3.4/edge"]);
    cmd.assert().success();

    let mut cmd = Command::cargo_bin("maas-agent-helper")?;
    cmd.arg("--config").arg(&config).arg("start");
    cmd.assert().success();

    let log = std::fs::read_to_string(dir.path().join("snap.log"))?;
    let mutations: Vec<&str> = log
        .lines()
        .filter(|line| !line.starts_with("list "))
        .collect();
    assert_eq!(
        mutations,
        vec![
            "install maas --channel=3.4/edge",
            "refresh --hold maas",
            "start maas.pebble",
        ]
    );
    Ok(())
}
