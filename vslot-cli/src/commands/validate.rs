//! Validate command implementation.
//!
//! This module implements the `validate` command, which parses the input
//! record files without allocating, reporting row counts or the first
//! error.

use crate::error::CliError;
use crate::utils::{load_configuration, GlobalOptions};
use clap::Args;
use std::fs::File;
use std::path::{Path, PathBuf};
use vslot::{records, Logger};

/// Check that input record files parse cleanly.
#[derive(Args)]
pub struct ValidateCommand {
    /// Assignment records file
    #[arg(long, value_name = "FILE")]
    pub assignments: Option<PathBuf>,

    /// Request records file
    #[arg(long, value_name = "FILE")]
    pub requests: Option<PathBuf>,
}

impl ValidateCommand {
    /// Execute the validate command.
    pub fn execute(self, global: &GlobalOptions, logger: &Logger) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let assignments_path = self.assignments.or(config.assignments);
        let requests_path = self.requests.or(config.requests);

        if assignments_path.is_none() && requests_path.is_none() {
            return Err(CliError::InvalidArguments(
                "nothing to validate (pass --assignments and/or --requests)".to_string(),
            ));
        }

        if let Some(path) = assignments_path {
            let count = validate_file(&path, |file| {
                records::read_assignments(file).map(|records| records.len())
            })?;
            logger.info(&format!("{}: {count} assignment record(s)", path.display()));
            println!("{}: ok ({count} assignment record(s))", path.display());
        }

        if let Some(path) = requests_path {
            let count = validate_file(&path, |file| {
                records::read_requests(file).map(|records| records.len())
            })?;
            logger.info(&format!("{}: {count} request record(s)", path.display()));
            println!("{}: ok ({count} request record(s))", path.display());
        }

        Ok(())
    }
}

/// Parse one file, mapping parse failures to a semantic error naming it.
fn validate_file(
    path: &Path,
    parse: impl FnOnce(File) -> vslot::Result<usize>,
) -> Result<usize, CliError> {
    let file = File::open(path)?;
    parse(file).map_err(|e| CliError::SemanticFailure(format!("{}: {e}", path.display())))
}
