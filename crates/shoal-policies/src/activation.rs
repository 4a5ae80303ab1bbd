//! Validator activation engine.
//!
//! Advances the validator set by one step. In staking-driven mode the
//! active count follows the staked-capital trajectory directly. In
//! queue-driven mode new arrivals accrue into the activation queue and
//! are admitted under the churn limit; when pooled validator instances
//! are pending, they graduate through the same churn gate and the
//! per-environment distribution is reconciled and renormalized.

use shoal_core::error::PolicyError;
use shoal_core::numerics::apportion;
use shoal_core::params::SimParams;
use shoal_core::process::StakingDriver;
use shoal_core::state::{CountVector, ShareVector, ValidatorSetState};
use shoal_core::units::{GWEI_PER_ETH, UPTIME_FLOOR};

use crate::protocol;
use crate::staking::resolve_staking;

/// Outputs of one activation step.
///
/// Produced against the prior state and merged into the next state by the
/// caller; nothing in the prior state is touched.
#[derive(Clone, Debug, PartialEq)]
pub struct ActivationUpdate {
    /// Remaining activation backlog.
    pub activation_queue: f64,
    /// Updated active-validator count.
    pub active_validators: u64,
    /// Validators counted as awake against the updated active total.
    pub awake_validators: u64,
    /// Participation fraction sampled this step.
    pub uptime: f64,
    /// Updated per-environment counts.
    pub count_distribution: CountVector,
    /// Updated per-environment shares.
    pub percentage_distribution: ShareVector,
    /// Pooled instances still pending. Zeroed once folded into the
    /// queue; carried through unchanged otherwise.
    pub shared_instances: CountVector,
    /// Validators admitted from the queue this step. Zero in
    /// staking-driven mode, where the queue is not consulted.
    pub admitted: u64,
}

/// Advance the validator set by one step.
///
/// # Errors
///
/// - [`PolicyError::StakedExceedsSupply`] — staking-driven mode resolved
///   a level above the issued supply.
/// - [`PolicyError::NonPositiveBalance`] — staking-driven mode cannot
///   size the population against a non-positive average balance.
/// - [`PolicyError::EmptyResidualQueue`] — pool-adjusted reconciliation
///   has no backlog left to derive distribution fractions from.
/// - [`PolicyError::ZeroDistributionWeight`] — admitted validators could
///   not be distributed over all-zero environment weights.
/// - [`PolicyError::UptimeBelowFloor`] — the sampled uptime is below the
///   participation floor.
pub fn advance_validators(
    params: &SimParams,
    state: &ValidatorSetState,
) -> Result<ActivationUpdate, PolicyError> {
    let time = state.timestep.time(params.dt);

    let mut queue = state.activation_queue;
    let mut active = state.active_validators;
    let mut counts = state.count_distribution.clone();
    let mut shares = state.percentage_distribution.clone();
    let mut shared = state.shared_instances.clone();
    let admitted;

    match &params.staking {
        StakingDriver::Trajectory(_) => {
            // Staking-driven: the population follows the capital
            // trajectory; queue and distributions pass through.
            let eth_staked = resolve_staking(params, state)?;
            if state.average_effective_balance <= 0.0 {
                return Err(PolicyError::NonPositiveBalance {
                    balance: state.average_effective_balance,
                });
            }
            let eth_per_validator = state.average_effective_balance / GWEI_PER_ETH;
            active = (eth_staked / eth_per_validator).round_ties_even() as u64;
            admitted = 0;
        }
        StakingDriver::Derived => {
            let arrivals = params.validator_process.sample(state.run, time);
            queue += arrivals * params.dt;
            let churn_limit = protocol::validator_churn_limit(&params.protocol, active) * params.dt;

            let pooled_pending = state.shared_total();
            if params.pooling_enabled() && pooled_pending > 0 {
                // Pooled instances graduate through the same churn gate
                // as organic arrivals.
                queue += pooled_pending as f64;
                admitted = queue.min(churn_limit).floor() as u64;
                active += admitted;
                queue -= admitted as f64;

                // Distribution fractions are derived from the residual
                // backlog; an empty residual leaves them undefined.
                let residual = queue;
                if residual <= 0.0 {
                    return Err(PolicyError::EmptyResidualQueue);
                }
                let mut weights = Vec::with_capacity(counts.len());
                for (i, share) in shares.iter().enumerate() {
                    let mut provisional = (share * residual).round_ties_even();
                    if params.environments.is_pooled(i) {
                        provisional += shared[i] as f64;
                    }
                    weights.push(provisional / residual);
                }

                let increments =
                    apportion(admitted, &weights).ok_or(PolicyError::ZeroDistributionWeight)?;
                for (count, increment) in counts.iter_mut().zip(&increments) {
                    *count += increment;
                }
                if active > 0 {
                    for (share, &count) in shares.iter_mut().zip(&counts) {
                        *share = count as f64 / active as f64;
                    }
                }
                shared.iter_mut().for_each(|s| *s = 0);
            } else {
                admitted = queue.min(churn_limit).floor() as u64;
                active += admitted;
                queue -= admitted as f64;
            }
        }
    }

    let awake_validators = protocol::awake_validator_count(&params.protocol, active);
    let uptime = params.uptime_process.sample(state.run, time);
    if uptime < UPTIME_FLOOR {
        return Err(PolicyError::UptimeBelowFloor { uptime });
    }

    Ok(ActivationUpdate {
        activation_queue: queue,
        active_validators: active,
        awake_validators,
        uptime,
        count_distribution: counts,
        percentage_distribution: shares,
        shared_instances: shared,
        admitted,
    })
}
