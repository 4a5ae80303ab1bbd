//! Staking-level resolver.

use shoal_core::error::PolicyError;
use shoal_core::params::SimParams;
use shoal_core::process::StakingDriver;
use shoal_core::state::ValidatorSetState;
use shoal_core::units::{Eth, GWEI_PER_ETH};

/// Resolve the staked capital for the current step, in ETH.
///
/// With a trajectory driver the level is sampled at the step's continuous
/// time; with the derived driver it follows from the validator set:
/// `active * average_effective_balance / GWEI_PER_ETH`.
///
/// # Errors
///
/// [`PolicyError::StakedExceedsSupply`] when the resolved level exceeds
/// the issued supply. Fatal: staking more capital than exists signals a
/// broken trajectory or parameterization upstream.
pub fn resolve_staking(params: &SimParams, state: &ValidatorSetState) -> Result<Eth, PolicyError> {
    let eth_staked = match &params.staking {
        StakingDriver::Trajectory(process) => {
            process.sample(state.run, state.timestep.time(params.dt))
        }
        StakingDriver::Derived => {
            state.active_validators as f64 * state.average_effective_balance / GWEI_PER_ETH
        }
    };

    if eth_staked > state.eth_supply {
        return Err(PolicyError::StakedExceedsSupply {
            eth_staked,
            eth_supply: state.eth_supply,
        });
    }

    Ok(eth_staked)
}
