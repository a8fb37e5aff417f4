//! Property-based tests for the allocation engine.
//!
//! These tests exercise the selection algorithm against randomly built
//! registries and request sequences, checking the consume-once, ascending
//! and global-minimum invariants.

use std::collections::HashSet;

use proptest::prelude::*;

use super::{PoolKind, RequestProcessor};
use crate::assignment::{Assignment, DeviceId, PortRole, VlanId};
use crate::device::{AllocationPools, DeviceRegistry};
use crate::request::Request;

// Strategy for raw assignment records: a handful of devices sharing a
// small VLAN space so supersede/overwrite cases actually occur.
fn assignments_strategy() -> impl Strategy<Value = Vec<(u32, u16, bool)>> {
    prop::collection::vec((1u32..6, 1u16..30, any::<bool>()), 0..60)
}

// Strategy for request sequences (true = redundant).
fn requests_strategy() -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(any::<bool>(), 0..40)
}

fn build_pools(raw: &[(u32, u16, bool)]) -> AllocationPools {
    let mut registry = DeviceRegistry::new();
    for &(device, vlan, primary) in raw {
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

// The pools' current global minimum for a kind, computed naively from the
// read-only accessors. Used as the selection oracle.
fn oracle_minimum(pools: &AllocationPools, kind: PoolKind) -> Option<VlanId> {
    pools
        .iter()
        .filter_map(|(_, device)| match kind {
            PoolKind::Singular => device.singular().next(),
            PoolKind::Redundant => device.redundant().next(),
        })
        .map(Assignment::vlan)
        .min()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        max_shrink_iters: 10000,
        .. ProptestConfig::default()
    })]

    // Every allocation consumes a distinct (device, vlan, kind) slot and
    // only slots the finalized pools actually offered.
    #[test]
    fn no_double_allocation(raw in assignments_strategy(), reqs in requests_strategy()) {
        let mut pools = build_pools(&raw);
        let offered: HashSet<(DeviceId, VlanId, bool)> = pools
            .iter()
            .flat_map(|(id, device)| {
                device
                    .singular()
                    .map(move |a| (id, a.vlan(), false))
                    .chain(device.redundant().map(move |a| (id, a.vlan(), true)))
            })
            .collect();

        let mut consumed = HashSet::new();
        let mut processor = RequestProcessor::new(&mut pools);
        for (id, &redundant) in reqs.iter().enumerate() {
            let request = Request::new(u32::try_from(id).unwrap(), redundant);
            if let Ok(reservations) = processor.process_request(&request) {
                let key = (reservations[0].device(), reservations[0].vlan(), redundant);
                prop_assert!(offered.contains(&key));
                prop_assert!(consumed.insert(key), "slot consumed twice: {key:?}");
            }
        }
    }

    // Successive allocations of the same kind emit non-decreasing VLAN
    // ids: the engine always takes the global minimum of a shrinking set.
    #[test]
    fn emission_vlans_ascend_per_kind(raw in assignments_strategy(), reqs in requests_strategy()) {
        let mut pools = build_pools(&raw);
        let mut last = [None::<VlanId>; 2];

        let mut processor = RequestProcessor::new(&mut pools);
        for (id, &redundant) in reqs.iter().enumerate() {
            let request = Request::new(u32::try_from(id).unwrap(), redundant);
            if let Ok(reservations) = processor.process_request(&request) {
                let vlan = reservations[0].vlan();
                let slot = usize::from(redundant);
                if let Some(prev) = last[slot] {
                    prop_assert!(vlan >= prev);
                }
                last[slot] = Some(vlan);
            }
        }
    }

    // Each emitted VLAN equals the minimum the pools offered at the time
    // the request was processed.
    #[test]
    fn selection_matches_oracle(raw in assignments_strategy(), reqs in requests_strategy()) {
        let mut pools = build_pools(&raw);
        for (id, &redundant) in reqs.iter().enumerate() {
            let kind = if redundant { PoolKind::Redundant } else { PoolKind::Singular };
            let expected = oracle_minimum(&pools, kind);

            let request = Request::new(u32::try_from(id).unwrap(), redundant);
            let mut processor = RequestProcessor::new(&mut pools);
            match processor.process_request(&request) {
                Ok(reservations) => prop_assert_eq!(Some(reservations[0].vlan()), expected),
                Err(_) => prop_assert_eq!(expected, None),
            }
        }
    }

    // Reservation shape: singular requests emit one primary row,
    // redundant requests emit a backup row then a primary row on the same
    // device+VLAN, all tagged with the request id.
    #[test]
    fn emission_shape(raw in assignments_strategy(), reqs in requests_strategy()) {
        let mut pools = build_pools(&raw);
        let mut processor = RequestProcessor::new(&mut pools);
        for (id, &redundant) in reqs.iter().enumerate() {
            let id = u32::try_from(id).unwrap();
            let Ok(reservations) = processor.process_request(&Request::new(id, redundant)) else {
                continue;
            };
            for reservation in &reservations {
                prop_assert_eq!(reservation.request_id(), id);
            }
            if redundant {
                prop_assert_eq!(reservations.len(), 2);
                prop_assert!(!reservations[0].primary_port());
                prop_assert!(reservations[1].primary_port());
                prop_assert_eq!(reservations[0].device(), reservations[1].device());
                prop_assert_eq!(reservations[0].vlan(), reservations[1].vlan());
            } else {
                prop_assert_eq!(reservations.len(), 1);
                prop_assert!(reservations[0].primary_port());
            }
        }
    }
}
