//! Reference trajectory processes for the Shoal simulation.
//!
//! Ready-made [`Process`](shoal_core::process::Process) implementations
//! for driving simulations:
//!
//! - [`Constant`] — a fixed rate or level.
//! - [`Schedule`] — piecewise-constant breakpoints, for staged scenarios.
//! - [`NoisyUptime`] — seeded Gaussian noise around a mean participation
//!   level, deterministic per `(run, time)`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod constant;
pub mod noisy;
pub mod schedule;

pub use constant::Constant;
pub use noisy::NoisyUptime;
pub use schedule::Schedule;
