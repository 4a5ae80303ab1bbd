//! Parameter and initial-state validation.
//!
//! Structural problems are rejected here, before the first step: a
//! mis-sized distribution vector or an ambiguous pooling configuration
//! is a setup error, not a simulation outcome.

use std::error::Error;
use std::fmt;

use shoal_core::numerics::is_normalized;
use shoal_core::params::SimParams;
use shoal_core::state::ValidatorSetState;

/// Tolerance for percentage-sum checks.
const SHARE_SUM_TOL: f64 = 1e-6;

/// Errors detected during [`validate()`] or [`validate_state()`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// The environment catalog is empty.
    NoEnvironments,
    /// An environment's genesis share is negative or non-finite.
    InvalidShare {
        /// Name of the offending environment.
        name: String,
        /// The invalid share.
        share: f64,
    },
    /// Genesis shares do not sum to 1.
    ShareSumInvalid {
        /// The actual sum.
        sum: f64,
    },
    /// `dt` is NaN, infinite, zero, or negative.
    InvalidDt {
        /// The invalid value.
        value: f64,
    },
    /// The churn-limit quotient is zero.
    ZeroChurnQuotient,
    /// The maximum effective balance is not positive.
    NonPositiveMaxBalance {
        /// The invalid value, in gwei.
        value: f64,
    },
    /// Pool-adjusted accounting is enabled with a zero pool size.
    ZeroPoolSize,
    /// Pool-adjusted accounting is enabled but no environment is
    /// pool-bearing, so pooled instances could never be attributed.
    PoolingWithoutPoolEnvironments,
    /// A distribution vector's length does not match the catalog.
    DistributionLengthMismatch {
        /// Which vector is mis-sized.
        vector: &'static str,
        /// Catalog length.
        expected: usize,
        /// Actual vector length.
        actual: usize,
    },
    /// The initial percentage distribution does not sum to 1.
    DistributionNotNormalized {
        /// The actual sum.
        sum: f64,
    },
    /// With pooling enabled, the initial counts must sum to the active
    /// total exactly; conservation is maintained inductively from there.
    CountSumMismatch {
        /// Sum of the count distribution.
        sum: u64,
        /// The active-validator total.
        active: u64,
    },
    /// The initial staking level exceeds the issued supply.
    StakedExceedsSupply {
        /// Staked capital, in ETH.
        eth_staked: f64,
        /// Issued supply, in ETH.
        eth_supply: f64,
    },
    /// The initial average effective balance is not positive.
    NonPositiveBalance {
        /// The invalid balance, in gwei.
        balance: f64,
    },
    /// The initial activation queue is negative or non-finite.
    InvalidQueue {
        /// The invalid backlog.
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoEnvironments => write!(f, "environment catalog is empty"),
            Self::InvalidShare { name, share } => {
                write!(f, "environment '{name}' has invalid share {share}")
            }
            Self::ShareSumInvalid { sum } => {
                write!(f, "environment shares must sum to 1, got {sum}")
            }
            Self::InvalidDt { value } => {
                write!(f, "dt must be finite and positive, got {value}")
            }
            Self::ZeroChurnQuotient => write!(f, "churn_limit_quotient must be at least 1"),
            Self::NonPositiveMaxBalance { value } => {
                write!(f, "max_effective_balance must be positive, got {value}")
            }
            Self::ZeroPoolSize => write!(f, "avg_pool_size must be at least 1 when set"),
            Self::PoolingWithoutPoolEnvironments => {
                write!(f, "pooling enabled but no environment is pool-bearing")
            }
            Self::DistributionLengthMismatch {
                vector,
                expected,
                actual,
            } => write!(
                f,
                "{vector} has {actual} entries but the catalog has {expected} environments"
            ),
            Self::DistributionNotNormalized { sum } => {
                write!(f, "percentage distribution must sum to 1, got {sum}")
            }
            Self::CountSumMismatch { sum, active } => write!(
                f,
                "count distribution sums to {sum} but {active} validators are active"
            ),
            Self::StakedExceedsSupply {
                eth_staked,
                eth_supply,
            } => write!(
                f,
                "initial staked capital {eth_staked} ETH exceeds supply {eth_supply} ETH"
            ),
            Self::NonPositiveBalance { balance } => {
                write!(f, "average effective balance must be positive, got {balance}")
            }
            Self::InvalidQueue { value } => {
                write!(f, "activation queue must be finite and non-negative, got {value}")
            }
        }
    }
}

impl Error for ConfigError {}

/// Validate a parameter set's structural invariants.
pub fn validate(params: &SimParams) -> Result<(), ConfigError> {
    // 1. At least one environment; every share well-formed.
    if params.environments.is_empty() {
        return Err(ConfigError::NoEnvironments);
    }
    for (name, profile) in params.environments.iter() {
        if !profile.initial_share.is_finite() || profile.initial_share < 0.0 {
            return Err(ConfigError::InvalidShare {
                name: name.to_string(),
                share: profile.initial_share,
            });
        }
    }
    let sum = params.environments.share_sum();
    if (sum - 1.0).abs() > SHARE_SUM_TOL {
        return Err(ConfigError::ShareSumInvalid { sum });
    }

    // 2. Step duration.
    if !params.dt.is_finite() || params.dt <= 0.0 {
        return Err(ConfigError::InvalidDt { value: params.dt });
    }

    // 3. Protocol constants.
    if params.protocol.churn_limit_quotient == 0 {
        return Err(ConfigError::ZeroChurnQuotient);
    }
    if !params.protocol.max_effective_balance.is_finite()
        || params.protocol.max_effective_balance <= 0.0
    {
        return Err(ConfigError::NonPositiveMaxBalance {
            value: params.protocol.max_effective_balance,
        });
    }

    // 4. Pooling configuration must be unambiguous.
    match params.avg_pool_size {
        Some(0) => return Err(ConfigError::ZeroPoolSize),
        Some(_) if !params.environments.has_pooled() => {
            return Err(ConfigError::PoolingWithoutPoolEnvironments)
        }
        _ => {}
    }

    Ok(())
}

/// Validate an initial state against a parameter set.
pub fn validate_state(
    params: &SimParams,
    state: &ValidatorSetState,
) -> Result<(), ConfigError> {
    let expected = params.environments.len();
    for (vector, actual) in [
        ("count_distribution", state.count_distribution.len()),
        (
            "percentage_distribution",
            state.percentage_distribution.len(),
        ),
        ("shared_instances", state.shared_instances.len()),
    ] {
        if actual != expected {
            return Err(ConfigError::DistributionLengthMismatch {
                vector,
                expected,
                actual,
            });
        }
    }

    if state.eth_staked > state.eth_supply {
        return Err(ConfigError::StakedExceedsSupply {
            eth_staked: state.eth_staked,
            eth_supply: state.eth_supply,
        });
    }
    if !state.average_effective_balance.is_finite() || state.average_effective_balance <= 0.0 {
        return Err(ConfigError::NonPositiveBalance {
            balance: state.average_effective_balance,
        });
    }
    if !state.activation_queue.is_finite() || state.activation_queue < 0.0 {
        return Err(ConfigError::InvalidQueue {
            value: state.activation_queue,
        });
    }

    if !is_normalized(&state.percentage_distribution, SHARE_SUM_TOL) {
        return Err(ConfigError::DistributionNotNormalized {
            sum: state.percentage_distribution.iter().sum(),
        });
    }

    // Exact conservation is an inductive invariant of pool-adjusted
    // updates, so it must hold at the starting point.
    if params.pooling_enabled() {
        let sum: u64 = state.count_distribution.iter().sum();
        if sum != state.active_validators {
            return Err(ConfigError::CountSumMismatch {
                sum,
                active: state.active_validators,
            });
        }
    }

    Ok(())
}
