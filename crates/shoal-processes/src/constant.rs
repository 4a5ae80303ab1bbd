//! Constant-valued process.

use shoal_core::id::RunId;
use shoal_core::process::Process;

/// A process that yields the same value for every run and time.
///
/// The workhorse for state-space analyses: a constant arrival rate or
/// uptime level with all variation coming from the model itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Constant(pub f64);

impl Process for Constant {
    fn sample(&self, _run: RunId, _time: f64) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_value_everywhere() {
        let p = Constant(3.5);
        assert_eq!(p.sample(RunId(0), 0.0), 3.5);
        assert_eq!(p.sample(RunId(9), 1e6), 3.5);
    }
}
