//! # MAAS agent helper
//!
//! Installs the MAAS snap, controls its service and registers the host as a rack controller.
//! The `maas-agent-helper` binary exposes every operation of [maas::MaasHelper] as a subcommand.

pub mod cli;
pub mod command;
pub mod config;
pub mod defaults;
pub mod logging;
pub mod maas;
pub mod snap;
pub mod utils;
