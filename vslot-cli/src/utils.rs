//! Utility functions for CLI operations.
//!
//! This module provides the shared global options and helpers for
//! configuration loading and input resolution used across commands.

use crate::error::CliError;
use std::fs::File;
use std::path::{Path, PathBuf};
use vslot::{AllocationPools, Config, ConfigBuilder, DeviceRegistry, Logger};

/// Global CLI options shared across all commands.
///
/// Verbosity flags live in the [`Logger`] handed to each command; only
/// configuration selection needs to travel alongside it.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Explicit configuration file.
    pub config: Option<PathBuf>,
}

/// Load configuration, honoring an explicit `--config` file.
///
/// Precedence within the result: CLI arguments are applied by the
/// individual commands on top of what this returns (file, then
/// environment).
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let mut builder = ConfigBuilder::new();
    if let Some(ref path) = global.config {
        builder = builder.with_file(path.clone());
    }
    builder.build().map_err(CliError::from)
}

/// Pick the first available path: CLI argument, then configuration.
///
/// Errors with the field name when neither provided one.
pub fn resolve_input(
    arg: Option<PathBuf>,
    configured: Option<PathBuf>,
    field: &str,
) -> Result<PathBuf, CliError> {
    arg.or(configured).ok_or_else(|| {
        CliError::InvalidArguments(format!(
            "no {field} file given (pass --{field} or set it in the configuration)"
        ))
    })
}

/// Read an assignment records file and build finalized pools from it.
pub fn load_pools(path: &Path) -> Result<AllocationPools, CliError> {
    let file = File::open(path)?;
    let assignments = vslot::records::read_assignments(file).map_err(CliError::from)?;

    let mut registry = DeviceRegistry::new();
    for assignment in assignments {
        registry.register(assignment);
    }
    Ok(registry.finalize())
}

/// Dump per-device pools to the logger at debug level.
pub fn dump_pools(logger: &Logger, pools: &AllocationPools) {
    for (device, device_pools) in pools.iter() {
        logger.debug(&format!("device {device}"));
        logger.debug("  singular assignments:");
        for assignment in device_pools.singular() {
            logger.debug(&format!("    vlan {}", assignment.vlan()));
        }
        logger.debug("  redundant assignments:");
        for assignment in device_pools.redundant() {
            logger.debug(&format!("    vlan {}", assignment.vlan()));
        }
    }
}
