//! Protocol rules consumed by the policy stages.
//!
//! Pure functions of [`ProtocolParams`] and aggregate state, mirroring
//! the consensus-layer definitions the simulation depends on.

use shoal_core::params::ProtocolParams;
use shoal_core::units::{Eth, Gwei, GWEI_PER_ETH};

/// Validators the protocol admits (or exits) per epoch.
///
/// The floor keeps small validator sets moving; past the quotient the
/// limit scales with the active set. Integer division matches the
/// protocol definition.
pub fn validator_churn_limit(protocol: &ProtocolParams, active_validators: u64) -> f64 {
    protocol
        .min_per_epoch_churn_limit
        .max(active_validators / protocol.churn_limit_quotient) as f64
}

/// Validators counted as awake for the current step.
///
/// With a validator cap configured (rotation proposal), participation is
/// limited to the cap; otherwise the whole active set is awake.
pub fn awake_validator_count(protocol: &ProtocolParams, active_validators: u64) -> u64 {
    match protocol.validator_cap {
        Some(cap) => active_validators.min(cap),
        None => active_validators,
    }
}

/// Total balance counted for duties across the awake set, in gwei.
///
/// The staked capital, capped by the per-validator maximum effective
/// balance.
pub fn total_active_balance(
    protocol: &ProtocolParams,
    eth_staked: Eth,
    awake_validators: u64,
) -> Gwei {
    (eth_staked * GWEI_PER_ETH).min(awake_validators as f64 * protocol.max_effective_balance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn churn_limit_floors_at_minimum() {
        let p = ProtocolParams::default();
        assert_eq!(validator_churn_limit(&p, 0), 4.0);
        assert_eq!(validator_churn_limit(&p, 100_000), 4.0);
        // 5 * 65_536 active validators push past the floor.
        assert_eq!(validator_churn_limit(&p, 327_680), 5.0);
    }

    #[test]
    fn churn_limit_uses_integer_division() {
        let p = ProtocolParams::default();
        assert_eq!(validator_churn_limit(&p, 327_679), 4.0);
        assert_eq!(validator_churn_limit(&p, 393_216), 6.0);
    }

    #[test]
    fn awake_count_respects_cap() {
        let mut p = ProtocolParams::default();
        assert_eq!(awake_validator_count(&p, 1_000), 1_000);
        p.validator_cap = Some(600);
        assert_eq!(awake_validator_count(&p, 1_000), 600);
        assert_eq!(awake_validator_count(&p, 400), 400);
    }

    #[test]
    fn total_balance_caps_at_max_effective() {
        let p = ProtocolParams::default();
        // 100 validators, 3_300 ETH staked: 3_300e9 > 100 * 32e9.
        assert_eq!(total_active_balance(&p, 3_300.0, 100), 3_200e9);
        // Under-staked set is bounded by the staked capital.
        assert_eq!(total_active_balance(&p, 3_100.0, 100), 3_100e9);
    }
}
