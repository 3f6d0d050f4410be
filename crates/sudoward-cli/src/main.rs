//! Sudoward CLI entry point.

use clap::Parser;

mod commands;
mod logging;
mod output;

use commands::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // `serve` sets up logging itself once its configuration is loaded.
    if !cli.command.logs_from_config() {
        logging::init_quiet();
    }

    if let Err(e) = cli.execute().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
