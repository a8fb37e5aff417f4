//! Delimited record ingestion and serialization.
//!
//! Assignments and requests arrive as CSV with header-named columns;
//! reservations leave the same way. All typing happens here, so the
//! engine never sees a partially-parsed value: numeric parse failures
//! surface as [`Error::Csv`], out-of-range VLANs and bad boolean flags as
//! [`Error::MalformedRecord`].
//!
//! Boolean columns use the flag convention `"1"` = true, `"0"` = false;
//! anything else is malformed.

use std::io;

use serde::{Deserialize, Serialize};

use crate::assignment::{Assignment, DeviceId, PortRole, VlanId};
use crate::error::{Error, Result};
use crate::request::{Request, Reservation};

/// Column headers for reservation output.
const RESERVATION_COLUMNS: [&str; 4] = ["request_id", "device_id", "primary_port", "vlan_id"];

#[derive(Debug, Deserialize)]
struct RawAssignment {
    device_id: u32,
    primary_port: String,
    vlan_id: u16,
}

#[derive(Debug, Deserialize)]
struct RawRequest {
    request_id: u32,
    redundant: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct RawReservation {
    request_id: u32,
    device_id: u32,
    primary_port: String,
    vlan_id: u16,
}

/// Parse a `"1"`/`"0"` boolean flag column.
fn parse_flag(record: &'static str, row: usize, field: &str, raw: &str) -> Result<bool> {
    match raw.trim() {
        "1" => Ok(true),
        "0" => Ok(false),
        other => Err(Error::MalformedRecord {
            record,
            message: format!("row {row}: {field} must be \"0\" or \"1\", got \"{other}\""),
        }),
    }
}

/// Validate a VLAN column, tagging the failure with its row.
fn parse_vlan(record: &'static str, row: usize, raw: u16) -> Result<VlanId> {
    VlanId::try_from(raw).map_err(|e| Error::MalformedRecord {
        record,
        message: format!("row {row}: {e}"),
    })
}

/// Reads assignment records from CSV with a header row.
///
/// Expected columns: `device_id`, `primary_port` (flag), `vlan_id`.
///
/// # Errors
///
/// Returns an error on unreadable input, missing columns, non-numeric
/// ids, out-of-range VLANs, or bad flags.
///
/// # Examples
///
/// ```
/// let data = "device_id,primary_port,vlan_id\n1,1,100\n1,0,100\n";
/// let assignments = vslot::records::read_assignments(data.as_bytes()).unwrap();
/// assert_eq!(assignments.len(), 2);
/// ```
pub fn read_assignments<R: io::Read>(reader: R) -> Result<Vec<Assignment>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut assignments = Vec::new();
    for (row, record) in rdr.deserialize::<RawAssignment>().enumerate() {
        let raw = record?;
        let role = if parse_flag("assignment", row, "primary_port", &raw.primary_port)? {
            PortRole::Primary
        } else {
            PortRole::Backup
        };
        assignments.push(Assignment::new(
            DeviceId::from(raw.device_id),
            parse_vlan("assignment", row, raw.vlan_id)?,
            role,
        ));
    }
    log::debug!("read {} assignment records", assignments.len());
    Ok(assignments)
}

/// Reads request records from CSV with a header row.
///
/// Expected columns: `request_id`, `redundant` (flag).
///
/// # Errors
///
/// Returns an error on unreadable input, missing columns, non-numeric
/// ids, or bad flags.
///
/// # Examples
///
/// ```
/// let data = "request_id,redundant\n0,1\n1,0\n";
/// let requests = vslot::records::read_requests(data.as_bytes()).unwrap();
/// assert_eq!(requests.len(), 2);
/// assert!(requests[0].redundant());
/// ```
pub fn read_requests<R: io::Read>(reader: R) -> Result<Vec<Request>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut requests = Vec::new();
    for (row, record) in rdr.deserialize::<RawRequest>().enumerate() {
        let raw = record?;
        requests.push(Request::new(
            raw.request_id,
            parse_flag("request", row, "redundant", &raw.redundant)?,
        ));
    }
    log::debug!("read {} request records", requests.len());
    Ok(requests)
}

/// Reads reservation records from CSV with a header row.
///
/// Used to compare a run's emissions against a recorded expected output.
///
/// # Errors
///
/// Returns an error on unreadable input, missing columns, non-numeric
/// ids, out-of-range VLANs, or bad flags.
pub fn read_reservations<R: io::Read>(reader: R) -> Result<Vec<Reservation>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut reservations = Vec::new();
    for (row, record) in rdr.deserialize::<RawReservation>().enumerate() {
        let raw = record?;
        reservations.push(Reservation::new(
            raw.request_id,
            DeviceId::from(raw.device_id),
            parse_flag("reservation", row, "primary_port", &raw.primary_port)?,
            parse_vlan("reservation", row, raw.vlan_id)?,
        ));
    }
    Ok(reservations)
}

/// Writes reservations as CSV with a header row, in the given order.
///
/// Columns: `request_id`, `device_id`, `primary_port` (flag), `vlan_id`.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_reservations<W: io::Write>(writer: W, reservations: &[Reservation]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    // serde emits the header before the first row; an empty run still
    // needs one so the output stays a valid record file.
    if reservations.is_empty() {
        wtr.write_record(RESERVATION_COLUMNS)?;
    }
    for reservation in reservations {
        wtr.serialize(RawReservation {
            request_id: reservation.request_id(),
            device_id: reservation.device().value(),
            primary_port: if reservation.primary_port() { "1" } else { "0" }.to_string(),
            vlan_id: reservation.vlan().value(),
        })?;
    }
    wtr.flush()?;
    Ok(())
}
