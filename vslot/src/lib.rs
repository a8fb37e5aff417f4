#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # vslot
//!
//! A library for allocating VLAN port slots on a pool of network devices.
//!
//! Assignments — candidate (device, VLAN, role) port bindings — are
//! classified into per-device singular and redundant pools, then an
//! ordered sequence of requests drains the pools greedily: each request
//! consumes the globally lowest-numbered eligible VLAN, producing one
//! reservation (singular) or a backup+primary pair (redundant).
//!
//! ## Core Types
//!
//! - [`Assignment`], [`VlanId`], [`DeviceId`], [`PortRole`]: input values
//! - [`DeviceRegistry`] and [`AllocationPools`]: classification and the
//!   finalized pools
//! - [`RequestProcessor`]: the allocation engine
//! - [`Request`] and [`Reservation`]: engine input and output
//! - [`Error`] and [`Result`]: error handling types
//!
//! ## Examples
//!
//! ```
//! use vslot::{
//!     Assignment, DeviceId, DeviceRegistry, PortRole, Request, RequestProcessor, VlanId,
//! };
//!
//! let mut registry = DeviceRegistry::new();
//! for (device, vlan, role) in [
//!     (1, 1, PortRole::Primary),
//!     (1, 1, PortRole::Backup),
//!     (2, 1, PortRole::Primary),
//! ] {
//!     registry.register(Assignment::new(
//!         DeviceId::from(device),
//!         VlanId::try_from(vlan).unwrap(),
//!         role,
//!     ));
//! }
//!
//! let mut pools = registry.finalize();
//! let reservations = RequestProcessor::new(&mut pools)
//!     .run(&[Request::new(0, true), Request::new(1, false)])
//!     .unwrap();
//! assert_eq!(reservations.len(), 3);
//! ```

pub mod assignment;
pub mod config;
pub mod device;
pub mod engine;
pub mod error;
pub mod logging;
pub mod records;
pub mod request;

// Re-export key types at crate root for convenience
pub use assignment::{Assignment, DeviceId, PortRole, VlanId};
pub use config::{Config, ConfigBuilder, ExhaustionPolicy};
pub use device::{AllocationPools, DevicePools, DeviceRegistry};
pub use engine::{PoolKind, RequestProcessor};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use request::{Request, Reservation};
