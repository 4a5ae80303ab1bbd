//! Per-step policy stages for the Shoal validator-dynamics simulation.
//!
//! Three pure stages are evaluated once per step, leaf-first:
//!
//! 1. [`resolve_staking`] — the staking level for the step, from an
//!    external trajectory or derived from the validator set.
//! 2. [`advance_validators`] — churn-capped activation-queue admission,
//!    staking-driven population sizing, and pool-adjusted environment
//!    reconciliation.
//! 3. [`average_effective_balance`] — the balance aggregate fed back into
//!    the next step's staking resolution.
//!
//! Each stage reads the prior state and returns its outputs; nothing is
//! committed until the caller assembles the next state, so a failing
//! postcondition aborts the step without partial mutation. The protocol
//! rules the stages depend on (churn limit, awake count, total active
//! balance) live in [`protocol`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod activation;
pub mod balance;
pub mod protocol;
pub mod staking;

pub use activation::{advance_validators, ActivationUpdate};
pub use balance::average_effective_balance;
pub use staking::resolve_staking;
