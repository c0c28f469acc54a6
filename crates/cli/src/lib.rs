pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "shopfront",
    about = "Shopfront operator CLI",
    long_about = "Seed the catalog file, inspect effective configuration, and run readiness checks.",
    after_help = "Examples:\n  shopfront seed\n  shopfront config\n  shopfront doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Write a deterministic demo catalog to the configured data path")]
    Seed {
        #[arg(long, help = "Overwrite an existing catalog file")]
        force: bool,
    },
    #[command(
        about = "Inspect effective configuration values with source attribution (env > file > default)"
    )]
    Config,
    #[command(about = "Validate config, catalog file, and frontend readiness checks")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Seed { force } => commands::seed::run(force),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => {
            commands::CommandResult { exit_code: 0, output: commands::doctor::run(json) }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
