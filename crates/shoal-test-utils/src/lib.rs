//! Test utilities and fixtures for Shoal development.
//!
//! Provides a constant-valued [`Process`] mock and ready-made parameter
//! and state fixtures so tests across the workspace start from the same
//! self-consistent scenario and only spell out what they vary.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use shoal_core::environment::reference_environments;
use shoal_core::id::RunId;
use shoal_core::params::{ProtocolParams, SimParams};
use shoal_core::process::{Process, StakingDriver};
use shoal_core::state::ValidatorSetState;

/// A process that returns the same value for every `(run, time)`.
#[derive(Clone, Copy, Debug)]
pub struct ConstProcess(pub f64);

impl Process for ConstProcess {
    fn sample(&self, _run: RunId, _time: f64) -> f64 {
        self.0
    }
}

/// Issued supply used by the fixtures, in ETH.
pub const FIXTURE_ETH_SUPPLY: f64 = 120_000_000.0;

/// Average effective balance used by the fixtures, in gwei.
pub const FIXTURE_BALANCE: f64 = 32e9;

/// A genesis state over the reference environment catalog.
///
/// `active` validators at 32 ETH effective each, no backlog, no pending
/// pooled instances, run 1.
pub fn reference_state(active: u64) -> ValidatorSetState {
    ValidatorSetState::genesis(
        RunId(1),
        &reference_environments(),
        active,
        FIXTURE_ETH_SUPPLY,
        FIXTURE_BALANCE,
    )
    .expect("reference catalog absorbs any population")
}

/// Queue-driven parameters: derived staking, 3 arrivals per epoch, 98%
/// uptime, one-epoch steps, pooling disabled.
pub fn queue_driven_params() -> SimParams {
    SimParams {
        environments: reference_environments(),
        staking: StakingDriver::Derived,
        validator_process: Box::new(ConstProcess(3.0)),
        uptime_process: Box::new(ConstProcess(0.98)),
        protocol: ProtocolParams::default(),
        dt: 1.0,
        avg_pool_size: None,
    }
}

/// Staking-driven parameters: a constant staked-capital trajectory at
/// `eth_staked` ETH, otherwise identical to [`queue_driven_params`].
pub fn staking_driven_params(eth_staked: f64) -> SimParams {
    SimParams {
        staking: StakingDriver::Trajectory(Box::new(ConstProcess(eth_staked))),
        ..queue_driven_params()
    }
}

/// Queue-driven parameters with pool-adjusted accounting enabled.
pub fn pooling_params() -> SimParams {
    SimParams {
        avg_pool_size: Some(128),
        ..queue_driven_params()
    }
}
