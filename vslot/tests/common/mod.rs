//! Shared fixtures for integration tests.

use vslot::{AllocationPools, Assignment, DeviceId, DeviceRegistry, PortRole, VlanId};

/// Builder for assignment sets, usable both as typed values and as the
/// CSV the records module ingests.
pub struct PoolFixture {
    rows: Vec<(u32, u16, bool)>,
}

impl PoolFixture {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn primary(mut self, device: u32, vlan: u16) -> Self {
        self.rows.push((device, vlan, true));
        self
    }

    pub fn backup(mut self, device: u32, vlan: u16) -> Self {
        self.rows.push((device, vlan, false));
        self
    }

    /// Register every row and finalize.
    pub fn build(&self) -> AllocationPools {
        let mut registry = DeviceRegistry::new();
        for &(device, vlan, primary) in &self.rows {
            let role = if primary {
                PortRole::Primary
            } else {
                PortRole::Backup
            };
            registry.register(Assignment::new(
                DeviceId::from(device),
                VlanId::try_from(vlan).unwrap(),
                role,
            ));
        }
        registry.finalize()
    }

    /// The same rows as an assignment records file.
    pub fn to_csv(&self) -> String {
        let mut csv = String::from("device_id,primary_port,vlan_id\n");
        for &(device, vlan, primary) in &self.rows {
            csv.push_str(&format!("{device},{},{vlan}\n", u8::from(primary)));
        }
        csv
    }
}
