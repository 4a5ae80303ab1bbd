//! The simulation step executor.

use std::error::Error;
use std::fmt;

use shoal_core::error::PolicyError;
use shoal_core::params::SimParams;
use shoal_core::state::ValidatorSetState;
use shoal_policies::{advance_validators, average_effective_balance, resolve_staking};

use crate::config::{self, ConfigError};
use crate::trajectory::Trajectory;

// ── StepError ────────────────────────────────────────────────────

/// Error returned from [`Simulation::step()`] and [`Simulation::run()`].
#[derive(Clone, Debug, PartialEq)]
pub enum StepError {
    /// The initial state failed validation against the parameters.
    Config(ConfigError),
    /// A policy stage failed during the step.
    PolicyFailed {
        /// Name of the failing stage.
        policy: &'static str,
        /// The underlying policy error.
        reason: PolicyError,
    },
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::PolicyFailed { policy, reason } => {
                write!(f, "policy '{policy}' failed: {reason}")
            }
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::PolicyFailed { reason, .. } => Some(reason),
        }
    }
}

impl From<ConfigError> for StepError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ── Simulation ───────────────────────────────────────────────────

/// Synchronous step executor for one parameter set.
///
/// Owns the validated parameters and nothing else: stepping is a pure
/// function of the prior state, so one `Simulation` can serve many
/// independent runs concurrently without synchronization.
#[derive(Debug)]
pub struct Simulation {
    params: SimParams,
}

impl Simulation {
    /// Construct a simulation from a parameter set.
    ///
    /// Validates the parameters' structural invariants; see
    /// [`ConfigError`] for the rejection catalog.
    pub fn new(params: SimParams) -> Result<Self, ConfigError> {
        config::validate(&params)?;
        Ok(Self { params })
    }

    /// The validated parameter set.
    pub fn params(&self) -> &SimParams {
        &self.params
    }

    /// Execute one step against `state`, producing the next state.
    ///
    /// The three stages run in strict sequence — staking-level resolver,
    /// validator activation engine, balance aggregator — and the next
    /// state is assembled only after all three succeed, so a failing
    /// postcondition never commits partial results. The input state is
    /// untouched; the returned state shares no storage with it.
    pub fn step(&self, state: &ValidatorSetState) -> Result<ValidatorSetState, StepError> {
        let eth_staked = resolve_staking(&self.params, state).map_err(|reason| {
            StepError::PolicyFailed {
                policy: "staking",
                reason,
            }
        })?;

        let update = advance_validators(&self.params, state).map_err(|reason| {
            StepError::PolicyFailed {
                policy: "activation",
                reason,
            }
        })?;

        let balance = average_effective_balance(
            &self.params.protocol,
            eth_staked,
            update.awake_validators,
        )
        .map_err(|reason| StepError::PolicyFailed {
            policy: "balance",
            reason,
        })?;

        Ok(ValidatorSetState {
            run: state.run,
            timestep: state.timestep.next(),
            eth_supply: state.eth_supply,
            eth_staked,
            active_validators: update.active_validators,
            activation_queue: update.activation_queue,
            average_effective_balance: balance,
            count_distribution: update.count_distribution,
            percentage_distribution: update.percentage_distribution,
            shared_instances: update.shared_instances,
            awake_validators: update.awake_validators,
            uptime: update.uptime,
        })
    }

    /// Execute `steps` steps from `initial`, collecting every state.
    ///
    /// The initial state is validated against the parameters and cloned;
    /// the caller's value is never aliased, so the same initial state can
    /// seed many runs.
    pub fn run(
        &self,
        initial: &ValidatorSetState,
        steps: u64,
    ) -> Result<Trajectory, StepError> {
        config::validate_state(&self.params, initial)?;

        let mut states = Vec::with_capacity(steps as usize + 1);
        states.push(initial.clone());
        for _ in 0..steps {
            let next = self.step(states.last().expect("states starts non-empty"))?;
            states.push(next);
        }
        Ok(Trajectory::new(states))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shoal_core::id::Timestep;
    use shoal_test_utils::{
        queue_driven_params, reference_state, staking_driven_params, ConstProcess,
    };

    #[test]
    fn new_rejects_invalid_params() {
        let mut params = queue_driven_params();
        params.dt = f64::NAN;
        assert!(Simulation::new(params).is_err());
    }

    #[test]
    fn step_advances_timestep_and_threads_staking() {
        let sim = Simulation::new(queue_driven_params()).unwrap();
        let state = reference_state(100_000);

        let next = sim.step(&state).unwrap();
        assert_eq!(next.timestep, Timestep(1));
        assert_eq!(next.run, state.run);
        assert_eq!(next.eth_supply, state.eth_supply);
        // Derived staking level from the prior set.
        assert_eq!(next.eth_staked, 3_200_000.0);
        assert_eq!(next.average_effective_balance, 32e9);
    }

    #[test]
    fn step_leaves_input_state_untouched() {
        let sim = Simulation::new(queue_driven_params()).unwrap();
        let state = reference_state(100_000);
        let before = state.clone();

        let next = sim.step(&state).unwrap();
        assert_eq!(state, before);
        assert_ne!(next.timestep, state.timestep);
    }

    #[test]
    fn failed_step_commits_nothing() {
        let mut params = queue_driven_params();
        params.uptime_process = Box::new(ConstProcess(0.5));
        let sim = Simulation::new(params).unwrap();
        let state = reference_state(100_000);
        let before = state.clone();

        let err = sim.step(&state).unwrap_err();
        assert!(matches!(
            err,
            StepError::PolicyFailed {
                policy: "activation",
                ..
            }
        ));
        assert_eq!(state, before);
    }

    #[test]
    fn run_collects_initial_and_each_step() {
        let sim = Simulation::new(queue_driven_params()).unwrap();
        let initial = reference_state(100_000);

        let trajectory = sim.run(&initial, 10).unwrap();
        assert_eq!(trajectory.len(), 11);
        assert_eq!(trajectory.initial_state(), &initial);
        assert_eq!(trajectory.final_state().timestep, Timestep(10));
    }

    #[test]
    fn run_validates_initial_state() {
        let sim = Simulation::new(queue_driven_params()).unwrap();
        let mut initial = reference_state(100_000);
        initial.activation_queue = f64::NAN;

        match sim.run(&initial, 1) {
            Err(StepError::Config(_)) => {}
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn staking_driven_run_tracks_trajectory() {
        let sim = Simulation::new(staking_driven_params(3_200_000.0)).unwrap();
        let initial = reference_state(100);

        let trajectory = sim.run(&initial, 3).unwrap();
        assert_eq!(trajectory.final_state().active_validators, 100_000);
        assert_eq!(trajectory.final_state().eth_staked, 3_200_000.0);
    }

    #[test]
    fn error_display_names_the_stage() {
        let err = StepError::PolicyFailed {
            policy: "balance",
            reason: shoal_core::error::PolicyError::NoAwakeValidators,
        };
        let msg = err.to_string();
        assert!(msg.contains("balance"));
        assert!(msg.contains("no awake validators"));
    }
}
