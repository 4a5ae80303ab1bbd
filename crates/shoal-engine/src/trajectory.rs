//! Collected per-step simulation output.

use shoal_core::state::ValidatorSetState;
use shoal_core::units::{Eth, Gwei};

/// The ordered state series produced by [`run`](crate::Simulation::run).
///
/// Index 0 is the initial state; index `i` is the state after `i` steps.
/// The series accessors extract the columns analyses usually plot.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    states: Vec<ValidatorSetState>,
}

impl Trajectory {
    pub(crate) fn new(states: Vec<ValidatorSetState>) -> Self {
        debug_assert!(!states.is_empty());
        Self { states }
    }

    /// Number of collected states, including the initial one.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always `false`: a trajectory contains at least the initial state.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// All collected states in step order.
    pub fn states(&self) -> &[ValidatorSetState] {
        &self.states
    }

    /// The state the run started from.
    pub fn initial_state(&self) -> &ValidatorSetState {
        &self.states[0]
    }

    /// The state after the last step.
    pub fn final_state(&self) -> &ValidatorSetState {
        self.states.last().expect("trajectory is never empty")
    }

    /// Staked capital per step, in ETH.
    pub fn eth_staked_series(&self) -> Vec<Eth> {
        self.states.iter().map(|s| s.eth_staked).collect()
    }

    /// Active-validator count per step.
    pub fn active_validator_series(&self) -> Vec<u64> {
        self.states.iter().map(|s| s.active_validators).collect()
    }

    /// Activation-queue backlog per step.
    pub fn queue_series(&self) -> Vec<f64> {
        self.states.iter().map(|s| s.activation_queue).collect()
    }

    /// Awake-validator count per step.
    pub fn awake_series(&self) -> Vec<u64> {
        self.states.iter().map(|s| s.awake_validators).collect()
    }

    /// Sampled uptime per step.
    pub fn uptime_series(&self) -> Vec<f64> {
        self.states.iter().map(|s| s.uptime).collect()
    }

    /// Average effective balance per step, in gwei.
    pub fn balance_series(&self) -> Vec<Gwei> {
        self.states.iter().map(|s| s.average_effective_balance).collect()
    }
}
