//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{AllocateCommand, CompletionsCommand, PoolsCommand, ValidateCommand};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for allocating VLAN port slots on network devices.
#[derive(Parser)]
#[command(name = "vslot")]
#[command(version, about = "Allocate VLAN port slots to reservation requests", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Use an explicit configuration file
    #[arg(long, value_name = "FILE", global = true, env = "VSLOT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Allocate VLAN slots to a sequence of requests
    Allocate(AllocateCommand),

    /// Show per-device singular and redundant pools after classification
    Pools(PoolsCommand),

    /// Check that input record files parse cleanly
    Validate(ValidateCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
