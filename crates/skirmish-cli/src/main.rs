//! Skirmish CLI - headless driver for the Skirmish simulation

mod commands;
mod logging;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{config, simulate};

#[derive(Parser)]
#[command(name = "skirmish")]
#[command(about = "Run scripted top-down combat simulations", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a scripted scenario and print the final state
    Simulate {
        /// Path to scenario file
        scenario: String,

        /// Path to game configuration file
        #[arg(long)]
        config: Option<String>,
    },

    /// Print the effective game configuration as TOML
    Config {
        /// Path to game configuration file (defaults are printed when omitted)
        #[arg(long)]
        config: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Simulate { scenario, config } => simulate::run(simulate::SimulateArgs {
            scenario,
            config,
        }),
        Commands::Config { config } => config::run(config.as_deref()),
    }
}
