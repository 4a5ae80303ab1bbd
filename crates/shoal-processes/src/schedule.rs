//! Piecewise-constant schedule process.

use shoal_core::id::RunId;
use shoal_core::process::Process;

/// A piecewise-constant trajectory defined by `(from_time, value)`
/// breakpoints.
///
/// Sampling returns the value of the latest breakpoint whose time is at
/// or before the sample time; times before the first breakpoint clamp to
/// the first value. Runs share the same schedule.
///
/// Constructed via [`Schedule::builder`].
#[derive(Clone, Debug, PartialEq)]
pub struct Schedule {
    breakpoints: Vec<(f64, f64)>,
}

/// Builder for [`Schedule`].
///
/// At least one breakpoint is required.
#[derive(Clone, Debug, Default)]
pub struct ScheduleBuilder {
    breakpoints: Vec<(f64, f64)>,
}

impl Schedule {
    /// Create a new builder.
    pub fn builder() -> ScheduleBuilder {
        ScheduleBuilder::default()
    }
}

impl ScheduleBuilder {
    /// Append a breakpoint: from `time` onward the process yields `value`.
    pub fn point(mut self, time: f64, value: f64) -> Self {
        self.breakpoints.push((time, value));
        self
    }

    /// Build the schedule, validating all breakpoints.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - no breakpoints were added
    /// - a time or value is non-finite
    /// - times are not strictly increasing
    pub fn build(self) -> Result<Schedule, String> {
        if self.breakpoints.is_empty() {
            return Err("at least one breakpoint is required".to_string());
        }
        for &(time, value) in &self.breakpoints {
            if !time.is_finite() || !value.is_finite() {
                return Err(format!("breakpoint ({time}, {value}) must be finite"));
            }
        }
        for pair in self.breakpoints.windows(2) {
            if pair[1].0 <= pair[0].0 {
                return Err(format!(
                    "breakpoint times must be strictly increasing, got {} then {}",
                    pair[0].0, pair[1].0
                ));
            }
        }
        Ok(Schedule {
            breakpoints: self.breakpoints,
        })
    }
}

impl Process for Schedule {
    fn sample(&self, _run: RunId, time: f64) -> f64 {
        let mut value = self.breakpoints[0].1;
        for &(from, v) in &self.breakpoints {
            if from <= time {
                value = v;
            } else {
                break;
            }
        }
        value
    }
}
