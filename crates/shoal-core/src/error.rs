//! Policy-level error types.
//!
//! Every variant is fatal to the step that raised it: the model has no
//! corrective action for a violated invariant or a degenerate state, so
//! errors carry the offending values and propagate out to the driver.

use std::error::Error;
use std::fmt;

use crate::units::{Eth, Gwei};

/// Errors raised by the per-step policy functions.
///
/// The first two variants are invariant violations (the model's
/// assumptions no longer hold); the rest are degenerate states in which
/// a required denominator or weight collapses to zero.
#[derive(Clone, Debug, PartialEq)]
pub enum PolicyError {
    /// The resolved staking level exceeds the issued supply.
    StakedExceedsSupply {
        /// Staking level produced by the resolver, in ETH.
        eth_staked: Eth,
        /// Issued supply it must not exceed, in ETH.
        eth_supply: Eth,
    },
    /// The sampled uptime fell below the participation floor the model
    /// assumes (no inactivity-leak mechanism is simulated).
    UptimeBelowFloor {
        /// The offending uptime sample.
        uptime: f64,
    },
    /// No validators are awake, so the average effective balance is
    /// undefined.
    NoAwakeValidators,
    /// Pool-adjusted reconciliation found an empty residual queue, so
    /// per-environment distribution fractions are undefined.
    EmptyResidualQueue,
    /// Pool-adjusted reconciliation produced an all-zero weight vector
    /// while validators were admitted, so they cannot be distributed.
    ZeroDistributionWeight,
    /// The average effective balance is not positive, so validator
    /// counts cannot be derived from the staking level.
    NonPositiveBalance {
        /// The offending balance, in gwei.
        balance: Gwei,
    },
}

impl fmt::Display for PolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StakedExceedsSupply {
                eth_staked,
                eth_supply,
            } => write!(
                f,
                "staked capital {eth_staked} ETH exceeds issued supply {eth_supply} ETH"
            ),
            Self::UptimeBelowFloor { uptime } => {
                write!(f, "validator uptime {uptime} is below the 2/3 floor")
            }
            Self::NoAwakeValidators => write!(f, "no awake validators"),
            Self::EmptyResidualQueue => {
                write!(f, "activation queue is empty after admission")
            }
            Self::ZeroDistributionWeight => {
                write!(f, "all environment weights are zero")
            }
            Self::NonPositiveBalance { balance } => {
                write!(f, "average effective balance {balance} gwei is not positive")
            }
        }
    }
}

impl Error for PolicyError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_offending_values() {
        let err = PolicyError::StakedExceedsSupply {
            eth_staked: 130000000.0,
            eth_supply: 120000000.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("130000000"));
        assert!(msg.contains("120000000"));

        let err = PolicyError::UptimeBelowFloor { uptime: 0.5 };
        assert!(err.to_string().contains("0.5"));
    }

    #[test]
    fn errors_compare_by_value() {
        assert_eq!(PolicyError::NoAwakeValidators, PolicyError::NoAwakeValidators);
        assert_ne!(
            PolicyError::NoAwakeValidators,
            PolicyError::EmptyResidualQueue
        );
    }
}
