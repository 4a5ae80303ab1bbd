//! Average effective balance aggregator.

use shoal_core::error::PolicyError;
use shoal_core::params::ProtocolParams;
use shoal_core::units::{Eth, Gwei};

use crate::protocol;

/// Average effective balance across the awake set, in gwei.
///
/// The total active balance divided by the awake-validator count.
///
/// # Errors
///
/// [`PolicyError::NoAwakeValidators`] when the awake count is zero: an
/// empty consensus committee is a degenerate simulation state that must
/// surface, not default.
pub fn average_effective_balance(
    protocol: &ProtocolParams,
    eth_staked: Eth,
    awake_validators: u64,
) -> Result<Gwei, PolicyError> {
    if awake_validators == 0 {
        return Err(PolicyError::NoAwakeValidators);
    }
    let total = protocol::total_active_balance(protocol, eth_staked, awake_validators);
    Ok(total / awake_validators as f64)
}
