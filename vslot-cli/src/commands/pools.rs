//! Pools command implementation.
//!
//! This module implements the `pools` command, which shows each device's
//! classified singular and redundant pools in various formats (table,
//! JSON, CSV) without allocating anything.

use crate::error::CliError;
use crate::utils::{load_configuration, load_pools, resolve_input, GlobalOptions};
use clap::{Args, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use vslot::{AllocationPools, Logger};

/// Column headers for CSV output.
const COLUMN_HEADERS: [&str; 3] = ["device_id", "kind", "vlan_id"];

/// Show per-device pools after classification.
#[derive(Args)]
pub struct PoolsCommand {
    /// Assignment records file
    #[arg(long, value_name = "FILE")]
    pub assignments: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "table", ignore_case = true)]
    pub format: OutputFormat,
}

/// Output format for the pools command.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-separated table format (human-readable)
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}

/// One row of pool output: a still-allocatable slot.
struct PoolRow {
    device: u32,
    kind: &'static str,
    vlan: u16,
}

impl PoolsCommand {
    /// Execute the pools command.
    pub fn execute(self, global: &GlobalOptions, logger: &Logger) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let assignments_path = resolve_input(self.assignments, config.assignments, "assignments")?;

        let pools = load_pools(&assignments_path)?;
        logger.info(&format!(
            "{} device(s), {} allocatable assignment(s)",
            pools.device_count(),
            pools.remaining()
        ));

        let rows = collect_rows(&pools);
        match self.format {
            OutputFormat::Table => format_as_table(&rows)?,
            OutputFormat::Json => format_as_json(&rows)?,
            OutputFormat::Csv => format_as_csv(&rows)?,
        }

        Ok(())
    }
}

/// Flatten pools into rows, devices ascending, singular before redundant.
fn collect_rows(pools: &AllocationPools) -> Vec<PoolRow> {
    let mut rows = Vec::new();
    for (device, device_pools) in pools.iter() {
        for assignment in device_pools.singular() {
            rows.push(PoolRow {
                device: device.value(),
                kind: "singular",
                vlan: assignment.vlan().value(),
            });
        }
        for assignment in device_pools.redundant() {
            rows.push(PoolRow {
                device: device.value(),
                kind: "redundant",
                vlan: assignment.vlan().value(),
            });
        }
    }
    rows
}

/// Format rows as a human-readable table.
fn format_as_table(rows: &[PoolRow]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let header_line = COLUMN_HEADERS
        .iter()
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(handle, "{header_line}")?;

    for row in rows {
        writeln!(handle, "{}\t{}\t{}", row.device, row.kind, row.vlan)?;
    }

    Ok(())
}

/// Format rows as JSON.
fn format_as_json(rows: &[PoolRow]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let json_data: Vec<serde_json::Value> = rows
        .iter()
        .map(|row| {
            serde_json::json!({
                "device_id": row.device,
                "kind": row.kind,
                "vlan_id": row.vlan,
            })
        })
        .collect();

    serde_json::to_writer_pretty(&mut handle, &json_data)
        .map_err(|e| CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?;

    writeln!(handle)?;

    Ok(())
}

/// Convert csv::Error to CliError.
fn csv_error(e: csv::Error) -> CliError {
    CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e))
}

/// Format rows as CSV.
fn format_as_csv(rows: &[PoolRow]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let handle = stdout.lock();
    let mut writer = csv::Writer::from_writer(handle);

    writer.write_record(COLUMN_HEADERS).map_err(csv_error)?;

    for row in rows {
        writer
            .write_record(&[
                row.device.to_string(),
                row.kind.to_string(),
                row.vlan.to_string(),
            ])
            .map_err(csv_error)?;
    }

    writer.flush()?;

    Ok(())
}
