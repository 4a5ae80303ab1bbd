//! Stochastic uptime process.
//!
//! Adds deterministic Gaussian noise to a mean participation level.
//!
//! Respects the determinism contract: the RNG is seeded from
//! `seed XOR run XOR time bits`, so equal `(run, time)` samples are
//! identical across replays while runs draw independent series.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use shoal_core::id::RunId;
use shoal_core::process::Process;
use shoal_core::units::UPTIME_FLOOR;

/// A noisy participation-level process.
///
/// Samples `mean + std_dev * N(0,1)` (Box-Muller transform), clamped to
/// `[floor, 1]`. The default floor is the model's 2/3 participation
/// floor, so samples never trip the uptime invariant; lower the floor
/// explicitly to simulate invariant violations.
///
/// Constructed via the builder pattern: [`NoisyUptime::builder`].
#[derive(Clone, Copy, Debug)]
pub struct NoisyUptime {
    mean: f64,
    std_dev: f64,
    floor: f64,
    seed: u64,
}

/// Builder for [`NoisyUptime`].
#[derive(Clone, Copy, Debug)]
pub struct NoisyUptimeBuilder {
    mean: f64,
    std_dev: f64,
    floor: f64,
    seed: u64,
}

impl NoisyUptime {
    /// Create a new builder with mean 0.98, no noise, the 2/3 floor,
    /// and seed 0.
    pub fn builder() -> NoisyUptimeBuilder {
        NoisyUptimeBuilder {
            mean: 0.98,
            std_dev: 0.0,
            floor: UPTIME_FLOOR,
            seed: 0,
        }
    }

    /// Generate a Gaussian sample using the Box-Muller transform.
    /// Avoids the `rand_distr` dependency.
    fn box_muller(rng: &mut ChaCha8Rng) -> f64 {
        let u1: f64 = rng.random::<f64>().max(1e-300); // avoid ln(0)
        let u2: f64 = rng.random();
        (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
    }
}

impl NoisyUptimeBuilder {
    /// Set the mean participation level (default: 0.98).
    pub fn mean(mut self, mean: f64) -> Self {
        self.mean = mean;
        self
    }

    /// Set the noise standard deviation (default: 0). Must be >= 0.
    pub fn std_dev(mut self, std_dev: f64) -> Self {
        self.std_dev = std_dev;
        self
    }

    /// Set the lower clamp (default: 2/3). Must be in `[0, 1]`.
    pub fn floor(mut self, floor: f64) -> Self {
        self.floor = floor;
        self
    }

    /// Set the RNG seed (default: 0).
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Build the process, validating all configuration.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - `mean` is outside `[0, 1]`
    /// - `std_dev` is negative or non-finite
    /// - `floor` is outside `[0, 1]`
    pub fn build(self) -> Result<NoisyUptime, String> {
        if !self.mean.is_finite() || !(0.0..=1.0).contains(&self.mean) {
            return Err(format!("mean must be in [0, 1], got {}", self.mean));
        }
        if !self.std_dev.is_finite() || self.std_dev < 0.0 {
            return Err(format!(
                "std_dev must be finite and >= 0, got {}",
                self.std_dev
            ));
        }
        if !self.floor.is_finite() || !(0.0..=1.0).contains(&self.floor) {
            return Err(format!("floor must be in [0, 1], got {}", self.floor));
        }
        Ok(NoisyUptime {
            mean: self.mean,
            std_dev: self.std_dev,
            floor: self.floor,
            seed: self.seed,
        })
    }
}

impl Process for NoisyUptime {
    fn sample(&self, run: RunId, time: f64) -> f64 {
        let mut rng =
            ChaCha8Rng::seed_from_u64(self.seed ^ u64::from(run.0) ^ time.to_bits());
        let value = self.mean + self.std_dev * Self::box_muller(&mut rng);
        value.clamp(self.floor, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noisy(seed: u64) -> NoisyUptime {
        NoisyUptime::builder()
            .mean(0.95)
            .std_dev(0.02)
            .seed(seed)
            .build()
            .unwrap()
    }

    #[test]
    fn identical_inputs_resample_identically() {
        let p = noisy(42);
        assert_eq!(p.sample(RunId(1), 10.0), p.sample(RunId(1), 10.0));
    }

    #[test]
    fn runs_draw_independent_series() {
        let p = noisy(42);
        let a: Vec<f64> = (0..20).map(|t| p.sample(RunId(1), t as f64)).collect();
        let b: Vec<f64> = (0..20).map(|t| p.sample(RunId(2), t as f64)).collect();
        assert_ne!(a, b);
    }

    #[test]
    fn seeds_change_the_series() {
        let a = noisy(1).sample(RunId(1), 5.0);
        let b = noisy(2).sample(RunId(1), 5.0);
        assert_ne!(a, b);
    }

    #[test]
    fn samples_respect_floor_and_ceiling() {
        let p = NoisyUptime::builder()
            .mean(0.7)
            .std_dev(0.5)
            .seed(7)
            .build()
            .unwrap();
        for t in 0..200 {
            let v = p.sample(RunId(3), t as f64);
            assert!((UPTIME_FLOOR..=1.0).contains(&v), "sample {v} out of range");
        }
    }

    #[test]
    fn zero_std_dev_returns_the_mean() {
        let p = NoisyUptime::builder().mean(0.9).build().unwrap();
        assert_eq!(p.sample(RunId(1), 0.0), 0.9);
        assert_eq!(p.sample(RunId(5), 123.0), 0.9);
    }

    #[test]
    fn build_rejects_bad_configuration() {
        assert!(NoisyUptime::builder().mean(1.5).build().is_err());
        assert!(NoisyUptime::builder().std_dev(-0.1).build().is_err());
        assert!(NoisyUptime::builder().floor(2.0).build().is_err());
        assert!(NoisyUptime::builder().mean(f64::NAN).build().is_err());
    }
}
