use std::process::ExitCode;

use clap::Parser;
use maas_agent_helper::cli::{self, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = cli::run(cli) {
        // The logger might not be initialized, print the error directly
        eprintln!("Error: {err}");
        return err.into();
    }

    ExitCode::SUCCESS
}
