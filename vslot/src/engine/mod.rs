//! The allocation engine.
//!
//! This module implements the greedy cross-device selection algorithm:
//! for each request, the globally lowest-VLAN eligible assignment of the
//! requested kind is consumed, with ties between devices broken by the
//! lowest device id.
//!
//! # Examples
//!
//! ```
//! use vslot::{
//!     Assignment, DeviceId, DeviceRegistry, PortRole, Request, RequestProcessor, VlanId,
//! };
//!
//! let mut registry = DeviceRegistry::new();
//! registry.register(Assignment::new(
//!     DeviceId::from(1),
//!     VlanId::try_from(100).unwrap(),
//!     PortRole::Primary,
//! ));
//! let mut pools = registry.finalize();
//!
//! let processor = RequestProcessor::new(&mut pools);
//! let reservations = processor.run(&[Request::new(0, false)]).unwrap();
//! assert_eq!(reservations.len(), 1);
//! assert_eq!(reservations[0].vlan().value(), 100);
//! ```

use std::fmt;

use crate::assignment::{Assignment, DeviceId};
use crate::device::AllocationPools;
use crate::error::{Error, Result};
use crate::request::{Request, Reservation};

#[cfg(test)]
mod proptests;

/// Which of a device's two pools a request draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolKind {
    /// Unpaired primary assignments.
    Singular,
    /// Matched backup assignments.
    Redundant,
}

impl PoolKind {
    /// The pool kind a request draws from.
    #[must_use]
    pub const fn for_request(request: &Request) -> Self {
        if request.redundant() {
            Self::Redundant
        } else {
            Self::Singular
        }
    }
}

impl fmt::Display for PoolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Singular => write!(f, "singular"),
            Self::Redundant => write!(f, "redundant"),
        }
    }
}

/// Drains finalized pools to satisfy an ordered sequence of requests.
///
/// The processor holds an exclusive borrow of the pools for its whole
/// life, so every selection observes and consumes atomically; pool
/// depletion is the only state carried between requests.
#[derive(Debug)]
pub struct RequestProcessor<'a> {
    pools: &'a mut AllocationPools,
}

impl<'a> RequestProcessor<'a> {
    /// Creates a processor over finalized pools.
    #[must_use]
    pub fn new(pools: &'a mut AllocationPools) -> Self {
        Self { pools }
    }

    /// Satisfies one request, returning its reservations in emission order.
    ///
    /// A non-redundant request yields one primary reservation. A
    /// redundant request consumes a matched backup and yields the backup
    /// reservation first, then the paired primary on the same
    /// device+VLAN.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PoolExhausted`] if no device has any remaining
    /// assignment of the requested kind. The pools are left untouched in
    /// that case.
    pub fn process_request(&mut self, request: &Request) -> Result<Vec<Reservation>> {
        let kind = PoolKind::for_request(request);
        let assignment = self
            .take_lowest(kind)
            .ok_or(Error::PoolExhausted {
                request_id: request.request_id(),
                kind,
            })?;
        log::debug!("{request} consumes {assignment}");

        let id = request.request_id();
        let reservations = if request.redundant() {
            vec![
                Reservation::new(id, assignment.device(), false, assignment.vlan()),
                Reservation::new(id, assignment.device(), true, assignment.vlan()),
            ]
        } else {
            vec![Reservation::new(id, assignment.device(), true, assignment.vlan())]
        };
        Ok(reservations)
    }

    /// Processes requests left to right, accumulating reservations in
    /// request order.
    ///
    /// # Errors
    ///
    /// Aborts on the first request that finds its pool kind exhausted,
    /// returning [`Error::PoolExhausted`] for it. Callers that want to
    /// keep going past failed requests can drive [`process_request`]
    /// themselves.
    ///
    /// [`process_request`]: Self::process_request
    pub fn run(mut self, requests: &[Request]) -> Result<Vec<Reservation>> {
        let mut reservations = Vec::new();
        for request in requests {
            reservations.extend(self.process_request(request)?);
        }
        Ok(reservations)
    }

    /// Removes and returns the globally lowest-VLAN assignment of `kind`.
    ///
    /// Each device's candidate is the front of its queue (its lowest
    /// remaining VLAN). Devices are scanned in ascending id order and the
    /// comparison is strict, so on a VLAN tie the lowest device id wins.
    fn take_lowest(&mut self, kind: PoolKind) -> Option<Assignment> {
        let mut best: Option<(DeviceId, Assignment)> = None;
        for (id, pools) in &self.pools.devices {
            let queue = match kind {
                PoolKind::Singular => &pools.singular,
                PoolKind::Redundant => &pools.redundant,
            };
            if let Some(candidate) = queue.front() {
                let lower = best
                    .as_ref()
                    .map_or(true, |(_, b)| candidate.vlan() < b.vlan());
                if lower {
                    best = Some((*id, *candidate));
                }
            }
        }

        let (device, _) = best?;
        let pools = self.pools.devices.get_mut(&device)?;
        match kind {
            PoolKind::Singular => pools.singular.pop_front(),
            PoolKind::Redundant => pools.redundant.pop_front(),
        }
    }
}
