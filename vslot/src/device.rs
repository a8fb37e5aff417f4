//! Device registry and per-device assignment pools.
//!
//! This module classifies incoming assignments into per-device singular
//! and redundant pools, then materializes the sorted pools the allocation
//! engine drains. The registry is an ordinary owned value constructed per
//! batch; [`DeviceRegistry::finalize`] consumes it and returns
//! [`AllocationPools`], the only type the engine accepts, so allocating
//! before finalize (or finalizing twice) cannot compile.

use std::collections::{BTreeMap, VecDeque};

use crate::assignment::{Assignment, DeviceId, VlanId};

/// A backup assignment plus the matching state decided at ingestion time.
///
/// A backup is matched iff a singular primary for the same device+VLAN
/// existed at the moment the backup arrived. Unmatched backups are inert:
/// they are never offered for allocation.
#[derive(Debug, Clone, Copy)]
struct BackupEntry {
    assignment: Assignment,
    matched: bool,
}

/// Per-device classification of assignments, keyed by VLAN id.
///
/// `BTreeMap` keys keep both pools in ascending VLAN order, which is the
/// order finalize materializes.
#[derive(Debug, Default)]
struct Device {
    singular: BTreeMap<VlanId, Assignment>,
    redundant: BTreeMap<VlanId, BackupEntry>,
}

impl Device {
    /// Classify one assignment into this device's pools.
    ///
    /// Primary: dropped if a backup already claimed the VLAN as paired,
    /// otherwise stored (overwriting any prior singular entry). Backup:
    /// removes a matching singular entry (the pairing supersedes the
    /// standalone primary) and records whether that match existed, then
    /// stores itself (overwriting any prior backup entry).
    fn add(&mut self, assignment: Assignment) {
        let vlan = assignment.vlan();
        if assignment.role().is_primary() {
            if self.redundant.contains_key(&vlan) {
                log::debug!("dropping late primary for {assignment}");
                return;
            }
            self.singular.insert(vlan, assignment);
        } else {
            let matched = self.singular.remove(&vlan).is_some();
            self.redundant.insert(
                vlan,
                BackupEntry {
                    assignment,
                    matched,
                },
            );
        }
    }

    fn into_pools(self) -> DevicePools {
        DevicePools {
            singular: self.singular.into_values().collect(),
            redundant: self
                .redundant
                .into_values()
                .filter(|entry| entry.matched)
                .map(|entry| entry.assignment)
                .collect(),
        }
    }
}

/// The full set of devices, keyed by device id, lazily created.
///
/// # Examples
///
/// ```
/// use vslot::{Assignment, DeviceId, DeviceRegistry, PortRole, VlanId};
///
/// let mut registry = DeviceRegistry::new();
/// registry.register(Assignment::new(
///     DeviceId::from(1),
///     VlanId::try_from(100).unwrap(),
///     PortRole::Primary,
/// ));
///
/// let pools = registry.finalize();
/// assert_eq!(pools.device_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct DeviceRegistry {
    devices: BTreeMap<DeviceId, Device>,
}

impl DeviceRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one assignment, classifying it into its device's pools.
    ///
    /// The device is created on first sight. Exactly one device is
    /// mutated per call.
    pub fn register(&mut self, assignment: Assignment) {
        self.devices
            .entry(assignment.device())
            .or_default()
            .add(assignment);
    }

    /// Returns the number of devices seen so far.
    #[must_use]
    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    /// Consumes the registry and materializes the sorted allocation pools.
    ///
    /// For every device the singular pool and the matched subset of the
    /// redundant pool become ascending-by-VLAN queues. Must run after the
    /// full assignment set is registered; the consuming signature makes
    /// registering afterwards, or finalizing twice, a compile error.
    #[must_use]
    pub fn finalize(self) -> AllocationPools {
        AllocationPools {
            devices: self
                .devices
                .into_iter()
                .map(|(id, device)| (id, device.into_pools()))
                .collect(),
        }
    }
}

/// A device's two finalized queues, ascending by VLAN id.
///
/// The engine consumes entries from the front; everything else about the
/// queues is read-only.
#[derive(Debug, Default)]
pub struct DevicePools {
    pub(crate) singular: VecDeque<Assignment>,
    pub(crate) redundant: VecDeque<Assignment>,
}

impl DevicePools {
    /// Remaining singular assignments, ascending by VLAN id.
    pub fn singular(&self) -> impl Iterator<Item = &Assignment> {
        self.singular.iter()
    }

    /// Remaining matched redundant assignments, ascending by VLAN id.
    pub fn redundant(&self) -> impl Iterator<Item = &Assignment> {
        self.redundant.iter()
    }
}

/// The finalized, allocatable form of a [`DeviceRegistry`].
///
/// Obtainable only through [`DeviceRegistry::finalize`]. The engine holds
/// an exclusive borrow while draining, so observe-then-consume is atomic
/// by construction.
#[derive(Debug, Default)]
pub struct AllocationPools {
    pub(crate) devices: BTreeMap<DeviceId, DevicePools>,
}

impl AllocationPools {
    /// Returns the number of devices with pools (including empty ones).
    #[must_use]
    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    /// Iterates devices and their pools in ascending device-id order.
    pub fn iter(&self) -> impl Iterator<Item = (DeviceId, &DevicePools)> {
        self.devices.iter().map(|(id, pools)| (*id, pools))
    }

    /// Total assignments remaining across all devices and both kinds.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.devices
            .values()
            .map(|pools| pools.singular.len() + pools.redundant.len())
            .sum()
    }
}
