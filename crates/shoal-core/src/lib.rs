//! Core types and traits for the Shoal validator-dynamics simulation.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the Shoal workspace:
//! identifiers and units, the per-run simulation state record, the
//! validator environment catalog, trajectory-process traits, shared
//! numeric utilities, and error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod environment;
pub mod error;
pub mod id;
pub mod numerics;
pub mod params;
pub mod process;
pub mod state;
pub mod units;

pub use environment::{reference_environments, EnvironmentCatalog, EnvironmentProfile};
pub use error::PolicyError;
pub use id::{RunId, Timestep};
pub use params::{ProtocolParams, SimParams};
pub use process::{Process, StakingDriver};
pub use state::{CountVector, ShareVector, ValidatorSetState};
pub use units::{Eth, Gwei, GWEI_PER_ETH, UPTIME_FLOOR};
