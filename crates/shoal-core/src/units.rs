//! Capital unit aliases and protocol-wide constants.

/// Capital measured in whole ETH.
pub type Eth = f64;

/// Capital measured in gwei, the protocol's native balance unit.
///
/// Balances stay fractional here: the simulation tracks population
/// averages, not individual ledger entries.
pub type Gwei = f64;

/// Gwei per whole ETH. Converts native balance units to capital units.
pub const GWEI_PER_ETH: f64 = 1e9;

/// Minimum participation fraction the model tolerates.
///
/// Below two thirds the protocol's inactivity leak would activate, a
/// mechanism this model does not include, so lower uptime samples are a
/// modeling error rather than a simulable state.
pub const UPTIME_FLOOR: f64 = 2.0 / 3.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_eth_is_a_billion_gwei() {
        assert_eq!(GWEI_PER_ETH, 1_000_000_000.0);
    }

    #[test]
    fn uptime_floor_is_two_thirds() {
        assert!((UPTIME_FLOOR - 0.6666666666666666).abs() < 1e-15);
    }
}
