use std::process::ExitCode;

use clap::Parser;
use key_rotation::KeyRotation;
use keyrotation::commands::{Cli, run};
use keyrotation::configuration::CliConfig;

fn main() -> ExitCode {
    // Enable basic logging; set RUST_LOG=debug for visibility.
    env_logger::init();

    let cli = Cli::parse();

    let config = match cli.conf.as_deref().map(CliConfig::load).transpose() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(2);
        }
    };

    let codec = KeyRotation::with_config(config.key_rotation);
    match run(cli.command, &codec) {
        Ok(line) => {
            println!("{line}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            if e.is_invalid_input() {
                ExitCode::from(1)
            } else {
                ExitCode::from(2)
            }
        }
    }
}
