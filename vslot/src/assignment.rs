//! Assignment value types for VLAN slot allocation.
//!
//! This module provides the identifiers and the [`Assignment`] value that
//! the registry classifies and the engine consumes, including VLAN id
//! validation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A valid 802.1Q VLAN identifier (1-4094).
///
/// VLAN 0 and 4095 are reserved by the standard and rejected here.
///
/// # Examples
///
/// ```
/// use vslot::VlanId;
///
/// // Valid VLAN id
/// let vlan = VlanId::try_from(100).unwrap();
/// assert_eq!(vlan.value(), 100);
///
/// // Invalid VLAN id (reserved)
/// assert!(VlanId::try_from(0).is_err());
/// assert!(VlanId::try_from(4095).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VlanId(u16);

impl VlanId {
    /// The minimum valid VLAN identifier.
    pub const MIN: u16 = 1;

    /// The maximum valid VLAN identifier.
    pub const MAX: u16 = 4094;

    /// Returns the underlying VLAN number.
    ///
    /// # Examples
    ///
    /// ```
    /// use vslot::VlanId;
    ///
    /// let vlan = VlanId::try_from(100).unwrap();
    /// assert_eq!(vlan.value(), 100);
    /// ```
    #[must_use]
    pub const fn value(self) -> u16 {
        self.0
    }
}

impl TryFrom<u16> for VlanId {
    type Error = InvalidVlanError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        if value < Self::MIN || value > Self::MAX {
            Err(InvalidVlanError {
                value,
                reason: "VLAN ids outside 1-4094 are reserved".into(),
            })
        } else {
            Ok(Self(value))
        }
    }
}

impl fmt::Display for VlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error type for invalid VLAN identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidVlanError {
    /// The invalid VLAN value.
    pub value: u16,
    /// The reason the VLAN id is invalid.
    pub reason: String,
}

impl fmt::Display for InvalidVlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid VLAN id {}: {}", self.value, self.reason)
    }
}

impl std::error::Error for InvalidVlanError {}

/// Identifier of a network device in the pool.
///
/// Any integer is a valid device id; devices are created lazily on first
/// sight. The ordering of device ids is the allocation tie-break (lowest
/// device id wins when two devices offer the same VLAN).
///
/// # Examples
///
/// ```
/// use vslot::DeviceId;
///
/// let device = DeviceId::from(7);
/// assert_eq!(device.value(), 7);
/// assert!(DeviceId::from(1) < DeviceId::from(2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(u32);

impl DeviceId {
    /// Returns the underlying device number.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl From<u32> for DeviceId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The role a port binding plays on its device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortRole {
    /// A standalone usable port binding.
    Primary,
    /// A binding intended to pair with a primary on the same device+VLAN.
    Backup,
}

impl PortRole {
    /// Returns `true` for the primary role.
    ///
    /// # Examples
    ///
    /// ```
    /// use vslot::PortRole;
    ///
    /// assert!(PortRole::Primary.is_primary());
    /// assert!(!PortRole::Backup.is_primary());
    /// ```
    #[must_use]
    pub const fn is_primary(self) -> bool {
        matches!(self, Self::Primary)
    }
}

impl fmt::Display for PortRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => write!(f, "primary"),
            Self::Backup => write!(f, "backup"),
        }
    }
}

/// A candidate (device, VLAN, role) port binding available for allocation.
///
/// Assignments are immutable values. Whether a backup has a matching
/// primary is decided by the registry at ingestion time and tracked there,
/// not on the assignment itself.
///
/// # Examples
///
/// ```
/// use vslot::{Assignment, DeviceId, PortRole, VlanId};
///
/// let assignment = Assignment::new(
///     DeviceId::from(1),
///     VlanId::try_from(100).unwrap(),
///     PortRole::Primary,
/// );
/// assert_eq!(assignment.device().value(), 1);
/// assert_eq!(assignment.vlan().value(), 100);
/// assert!(assignment.role().is_primary());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    device: DeviceId,
    vlan: VlanId,
    role: PortRole,
}

impl Assignment {
    /// Creates a new assignment.
    #[must_use]
    pub const fn new(device: DeviceId, vlan: VlanId, role: PortRole) -> Self {
        Self { device, vlan, role }
    }

    /// Returns the device this assignment belongs to.
    #[must_use]
    pub const fn device(&self) -> DeviceId {
        self.device
    }

    /// Returns the VLAN id of this assignment.
    #[must_use]
    pub const fn vlan(&self) -> VlanId {
        self.vlan
    }

    /// Returns the port role of this assignment.
    #[must_use]
    pub const fn role(&self) -> PortRole {
        self.role
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "device {} vlan {} ({})",
            self.device, self.vlan, self.role
        )
    }
}
