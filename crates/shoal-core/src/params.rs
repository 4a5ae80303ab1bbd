//! Simulation and protocol parameters.

use std::fmt;

use crate::environment::EnvironmentCatalog;
use crate::process::{Process, StakingDriver};
use crate::units::Gwei;

/// Protocol constants governing churn, participation, and balances.
///
/// Defaults match the consensus-layer mainnet values.
#[derive(Clone, Debug, PartialEq)]
pub struct ProtocolParams {
    /// Lower bound on validators admitted (or exited) per epoch.
    pub min_per_epoch_churn_limit: u64,
    /// Active-set divisor for the churn limit: larger sets churn faster.
    pub churn_limit_quotient: u64,
    /// Per-validator cap on the balance counted for duties, in gwei.
    pub max_effective_balance: Gwei,
    /// Optional cap on simultaneously awake validators (rotation
    /// proposal). `None` means every active validator is awake.
    pub validator_cap: Option<u64>,
}

impl Default for ProtocolParams {
    fn default() -> Self {
        Self {
            min_per_epoch_churn_limit: 4,
            churn_limit_quotient: 65_536,
            max_effective_balance: 32e9,
            validator_cap: None,
        }
    }
}

/// Full parameter set for one simulation.
///
/// Immutable for the lifetime of a run. The boxed processes are the
/// external trajectory inputs; everything else is plain data.
pub struct SimParams {
    /// Ordered validator environment catalog.
    pub environments: EnvironmentCatalog,
    /// Staking-level driver (external trajectory or derived).
    pub staking: StakingDriver,
    /// New-validator arrival rate, per epoch.
    pub validator_process: Box<dyn Process>,
    /// Participation fraction in `[0, 1]`.
    pub uptime_process: Box<dyn Process>,
    /// Protocol constants.
    pub protocol: ProtocolParams,
    /// Step duration in epochs.
    pub dt: f64,
    /// Average validators per pool. `None` disables pool-adjusted
    /// accounting entirely.
    pub avg_pool_size: Option<u32>,
}

impl SimParams {
    /// Whether pool-adjusted accounting is enabled at all.
    pub fn pooling_enabled(&self) -> bool {
        self.avg_pool_size.is_some()
    }
}

impl fmt::Debug for SimParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimParams")
            .field("environments", &self.environments.len())
            .field("staking", &self.staking)
            .field("protocol", &self.protocol)
            .field("dt", &self.dt)
            .field("avg_pool_size", &self.avg_pool_size)
            .finish()
    }
}
