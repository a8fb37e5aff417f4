//! Main entry point for the vslot CLI.
//!
//! This is the command-line interface for the vslot VLAN slot allocator.
//! It provides commands for running allocation batches:
//! - `allocate`: Allocate VLAN slots to a request file
//! - `pools`: Inspect classified per-device pools
//! - `validate`: Check that input record files parse
//! - `completions`: Generate shell completion scripts

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let logger = vslot::init_logger(cli.verbose, cli.quiet);

    // Convert CLI args to GlobalOptions
    let global = GlobalOptions { config: cli.config };

    // Execute the command
    let result = match cli.command {
        cli::Command::Allocate(cmd) => cmd.execute(&global, &logger),
        cli::Command::Pools(cmd) => cmd.execute(&global, &logger),
        cli::Command::Validate(cmd) => cmd.execute(&global, &logger),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
