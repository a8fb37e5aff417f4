//! Request and reservation value types.
//!
//! Requests are the engine's read-only input; reservations are its
//! output, one or two per request depending on redundancy.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::assignment::{DeviceId, VlanId};

/// A single incoming allocation request.
///
/// A redundant request wants a primary+backup pair on the same
/// device+VLAN; a non-redundant request wants a singular primary only.
///
/// # Examples
///
/// ```
/// use vslot::Request;
///
/// let request = Request::new(0, true);
/// assert_eq!(request.request_id(), 0);
/// assert!(request.redundant());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    request_id: u32,
    redundant: bool,
}

impl Request {
    /// Creates a new request.
    #[must_use]
    pub const fn new(request_id: u32, redundant: bool) -> Self {
        Self {
            request_id,
            redundant,
        }
    }

    /// Returns the request identifier.
    #[must_use]
    pub const fn request_id(&self) -> u32 {
        self.request_id
    }

    /// Returns `true` if the request wants a primary+backup pair.
    #[must_use]
    pub const fn redundant(&self) -> bool {
        self.redundant
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "request {} ({})",
            self.request_id,
            if self.redundant {
                "redundant"
            } else {
                "singular"
            }
        )
    }
}

/// A granted, consumed port binding.
///
/// Equality is structural over all four fields, which is what the output
/// comparison in tests relies on. For a redundant request the backup
/// reservation (`primary_port == false`) is emitted before the paired
/// primary.
///
/// # Examples
///
/// ```
/// use vslot::{DeviceId, Reservation, VlanId};
///
/// let reservation = Reservation::new(
///     0,
///     DeviceId::from(1),
///     true,
///     VlanId::try_from(100).unwrap(),
/// );
/// assert_eq!(reservation.request_id(), 0);
/// assert!(reservation.primary_port());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    request_id: u32,
    device: DeviceId,
    primary_port: bool,
    vlan: VlanId,
}

impl Reservation {
    /// Creates a new reservation.
    #[must_use]
    pub const fn new(request_id: u32, device: DeviceId, primary_port: bool, vlan: VlanId) -> Self {
        Self {
            request_id,
            device,
            primary_port,
            vlan,
        }
    }

    /// Returns the id of the request this reservation satisfies.
    #[must_use]
    pub const fn request_id(&self) -> u32 {
        self.request_id
    }

    /// Returns the device the binding was consumed from.
    #[must_use]
    pub const fn device(&self) -> DeviceId {
        self.device
    }

    /// Returns `true` if this is the primary half of the binding.
    #[must_use]
    pub const fn primary_port(&self) -> bool {
        self.primary_port
    }

    /// Returns the VLAN id of the binding.
    #[must_use]
    pub const fn vlan(&self) -> VlanId {
        self.vlan
    }
}

impl fmt::Display for Reservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "request {} device {} {} vlan {}",
            self.request_id,
            self.device,
            if self.primary_port {
                "primary"
            } else {
                "backup"
            },
            self.vlan
        )
    }
}
