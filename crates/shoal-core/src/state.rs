//! Per-run simulation state.

use smallvec::SmallVec;

use crate::environment::EnvironmentCatalog;
use crate::id::{RunId, Timestep};
use crate::numerics::apportion;
use crate::units::{Eth, Gwei, GWEI_PER_ETH};

/// Per-environment validator counts, indexed in catalog order.
///
/// Inline capacity covers the seven-environment reference catalog without
/// heap allocation; larger catalogs spill transparently.
pub type CountVector = SmallVec<[u64; 8]>;

/// Per-environment population shares, indexed in catalog order.
pub type ShareVector = SmallVec<[f64; 8]>;

/// The full state of one simulation run at one timestep.
///
/// Owned by the driving loop and threaded step to step. The engine treats
/// each instance as immutable input: stepping produces a fresh value, so
/// sibling Monte Carlo runs can never alias distribution storage.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidatorSetState {
    /// Which independent run this state belongs to.
    pub run: RunId,
    /// Step counter within the run.
    pub timestep: Timestep,
    /// Total issued capital, in ETH.
    pub eth_supply: Eth,
    /// Capital currently staked, in ETH. Never exceeds `eth_supply`.
    pub eth_staked: Eth,
    /// Validators on active duty.
    pub active_validators: u64,
    /// Backlog of validators awaiting activation. Fractional: arrivals
    /// accrue continuously within a step and are floored at admission.
    pub activation_queue: f64,
    /// Average effective balance across the awake set, in gwei.
    pub average_effective_balance: Gwei,
    /// Active validators per environment, in catalog order.
    pub count_distribution: CountVector,
    /// Fraction of the active set per environment, in catalog order.
    pub percentage_distribution: ShareVector,
    /// Pooled validator instances awaiting admission, per environment.
    /// Only pool-bearing environments carry nonzero entries.
    pub shared_instances: CountVector,
    /// Validators counted as participating this step.
    pub awake_validators: u64,
    /// Participation fraction sampled this step.
    pub uptime: f64,
}

impl ValidatorSetState {
    /// Build a self-consistent genesis state.
    ///
    /// The active count is apportioned across the catalog's environments
    /// by their genesis shares (exact conservation), percentages are
    /// derived back from the apportioned counts, the staking level is
    /// derived from the balance, and the full active set starts awake
    /// with perfect uptime.
    ///
    /// Returns `None` when the catalog cannot absorb the population
    /// (empty, or all-zero shares with a nonzero active count).
    pub fn genesis(
        run: RunId,
        catalog: &EnvironmentCatalog,
        active_validators: u64,
        eth_supply: Eth,
        average_effective_balance: Gwei,
    ) -> Option<Self> {
        let shares = catalog.initial_shares();
        let counts = apportion(active_validators, &shares)?;
        let percentages: ShareVector = if active_validators > 0 {
            counts
                .iter()
                .map(|&c| c as f64 / active_validators as f64)
                .collect()
        } else {
            shares
        };
        let shared: CountVector = counts.iter().map(|_| 0).collect();
        Some(Self {
            run,
            timestep: Timestep(0),
            eth_supply,
            eth_staked: active_validators as f64 * average_effective_balance / GWEI_PER_ETH,
            active_validators,
            activation_queue: 0.0,
            average_effective_balance,
            count_distribution: counts,
            percentage_distribution: percentages,
            shared_instances: shared,
            awake_validators: active_validators,
            uptime: 1.0,
        })
    }

    /// Total pooled instances across all environments.
    pub fn shared_total(&self) -> u64 {
        self.shared_instances.iter().sum()
    }

    /// Whether every percentage matches its count over the active total
    /// within `tol`. Vacuously true with zero active validators.
    pub fn distribution_reconciled(&self, tol: f64) -> bool {
        if self.active_validators == 0 {
            return true;
        }
        self.count_distribution
            .iter()
            .zip(&self.percentage_distribution)
            .all(|(&c, &p)| (p - c as f64 / self.active_validators as f64).abs() <= tol)
    }
}
