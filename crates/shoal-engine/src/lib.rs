//! Step executor for the Shoal validator-dynamics simulation.
//!
//! [`Simulation`] validates a parameter set once, then executes steps:
//! each step runs the staking-level resolver, the validator activation
//! engine, and the average-effective-balance aggregator in strict
//! sequence against the prior state and assembles a fresh next state.
//! [`Simulation::run`] threads a state through many steps and collects
//! the full [`Trajectory`].
//!
//! Everything is synchronous and single-threaded; independent runs are
//! parallelized by the caller, one state per run, with no shared mutable
//! storage.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod engine;
pub mod trajectory;

pub use config::ConfigError;
pub use engine::{Simulation, StepError};
pub use trajectory::Trajectory;
