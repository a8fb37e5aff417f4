//! Allocate command implementation.
//!
//! This module implements the `allocate` command: the full batch run of
//! reading assignment and request records, draining the pools, and
//! writing the resulting reservations.

use crate::error::CliError;
use crate::utils::{dump_pools, load_configuration, load_pools, resolve_input, GlobalOptions};
use clap::{Args, ValueEnum};
use std::fs::File;
use std::path::PathBuf;
use vslot::{records, Error, ExhaustionPolicy, Logger, RequestProcessor};

/// Allocate VLAN slots to a sequence of requests.
#[derive(Args)]
pub struct AllocateCommand {
    /// Assignment records file
    #[arg(long, value_name = "FILE")]
    pub assignments: Option<PathBuf>,

    /// Request records file
    #[arg(long, value_name = "FILE")]
    pub requests: Option<PathBuf>,

    /// Write reservations here instead of stdout
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// What to do when a request finds its pool exhausted
    #[arg(long, value_enum, ignore_case = true)]
    pub on_exhausted: Option<PolicyArg>,
}

/// CLI spelling of the exhaustion policy.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum PolicyArg {
    /// Abort the batch on the first unsatisfiable request
    Abort,
    /// Record failures and keep processing remaining requests
    Continue,
}

impl From<PolicyArg> for ExhaustionPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Abort => Self::Abort,
            PolicyArg::Continue => Self::Continue,
        }
    }
}

impl AllocateCommand {
    /// Execute the allocate command.
    pub fn execute(self, global: &GlobalOptions, logger: &Logger) -> Result<(), CliError> {
        // 1. Load configuration; CLI arguments win over it
        let config = load_configuration(global)?;
        let assignments_path = resolve_input(self.assignments, config.assignments, "assignments")?;
        let requests_path = resolve_input(self.requests, config.requests, "requests")?;
        let output_path = self.output.or(config.output);
        let policy = self
            .on_exhausted
            .map(ExhaustionPolicy::from)
            .or(config.on_exhausted)
            .unwrap_or_default();

        // 2. Ingest and classify assignments, then finalize the pools
        let mut pools = load_pools(&assignments_path)?;
        logger.info(&format!(
            "classified assignments across {} device(s)",
            pools.device_count()
        ));
        dump_pools(logger, &pools);

        // 3. Ingest requests
        let requests =
            records::read_requests(File::open(&requests_path)?).map_err(CliError::from)?;

        // 4. Drain pools in request order
        let mut processor = RequestProcessor::new(&mut pools);
        let mut reservations = Vec::new();
        let mut failed = 0usize;
        for request in &requests {
            match processor.process_request(request) {
                Ok(batch) => reservations.extend(batch),
                Err(err @ Error::PoolExhausted { .. })
                    if policy == ExhaustionPolicy::Continue =>
                {
                    logger.error(&err.to_string());
                    failed += 1;
                }
                Err(err) => return Err(err.into()),
            }
        }

        // 5. Serialize reservations in emission order
        match output_path {
            Some(path) => {
                records::write_reservations(File::create(path)?, &reservations)
                    .map_err(CliError::from)?;
            }
            None => {
                let stdout = std::io::stdout();
                records::write_reservations(stdout.lock(), &reservations)
                    .map_err(CliError::from)?;
            }
        }

        logger.info(&format!(
            "emitted {} reservation(s) for {} request(s)",
            reservations.len(),
            requests.len()
        ));

        if failed > 0 {
            return Err(CliError::SemanticFailure(format!(
                "{failed} request(s) could not be satisfied"
            )));
        }
        Ok(())
    }
}
