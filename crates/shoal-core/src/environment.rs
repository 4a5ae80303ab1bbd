//! Validator environment catalog.
//!
//! An environment is a named category of validator operating setup (solo
//! hardware, cloud, custodial pools, staking-as-a-service). The catalog is
//! loaded once at configuration time and never mutated afterwards; its
//! insertion order defines the indexing of every distribution vector in
//! the simulation state.

use indexmap::IndexMap;

use crate::state::ShareVector;

/// Per-environment configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnvironmentProfile {
    /// This environment's share of the validator population at genesis.
    /// Shares across the catalog must sum to 1.
    pub initial_share: f64,
    /// Whether this environment accumulates shared (pooled) validator
    /// instances that graduate through the activation queue.
    pub pooled: bool,
}

/// Ordered, immutable catalog of validator environments.
///
/// Backed by an insertion-ordered map so environments can be addressed
/// both by index (distribution vectors) and by name (configuration,
/// reporting). The catalog's length defines the dimensionality of the
/// `count_distribution`, `percentage_distribution`, and
/// `shared_instances` vectors.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EnvironmentCatalog {
    environments: IndexMap<String, EnvironmentProfile>,
}

impl EnvironmentCatalog {
    /// Build a catalog from `(name, profile)` pairs, preserving order.
    ///
    /// A repeated name keeps the last profile, consistent with map
    /// semantics; callers validate share sums separately.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, EnvironmentProfile)>,
        S: Into<String>,
    {
        Self {
            environments: entries
                .into_iter()
                .map(|(name, profile)| (name.into(), profile))
                .collect(),
        }
    }

    /// Number of environments.
    pub fn len(&self) -> usize {
        self.environments.len()
    }

    /// Returns `true` if the catalog has no environments.
    pub fn is_empty(&self) -> bool {
        self.environments.is_empty()
    }

    /// Iterate over `(name, profile)` in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &EnvironmentProfile)> {
        self.environments.iter().map(|(n, p)| (n.as_str(), p))
    }

    /// Look up a profile by environment name.
    pub fn get(&self, name: &str) -> Option<&EnvironmentProfile> {
        self.environments.get(name)
    }

    /// Position of an environment in the distribution-vector ordering.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.environments.get_index_of(name)
    }

    /// Whether the environment at `index` is pool-bearing.
    ///
    /// Out-of-range indices report `false`.
    pub fn is_pooled(&self, index: usize) -> bool {
        self.environments
            .get_index(index)
            .map(|(_, p)| p.pooled)
            .unwrap_or(false)
    }

    /// Returns `true` if any environment is pool-bearing.
    pub fn has_pooled(&self) -> bool {
        self.environments.values().any(|p| p.pooled)
    }

    /// Genesis shares in catalog order.
    pub fn initial_shares(&self) -> ShareVector {
        self.environments.values().map(|p| p.initial_share).collect()
    }

    /// Sum of the genesis shares. Expected to be 1 within float tolerance.
    pub fn share_sum(&self) -> f64 {
        self.environments.values().map(|p| p.initial_share).sum()
    }
}

/// The seven-environment staker taxonomy used by the reference model.
///
/// Shares reflect the staker-type composition at the model's calibration
/// point; the three custodial pool categories are pool-bearing.
pub fn reference_environments() -> EnvironmentCatalog {
    EnvironmentCatalog::new([
        (
            "diy_hardware",
            EnvironmentProfile {
                initial_share: 0.37,
                pooled: false,
            },
        ),
        (
            "diy_cloud",
            EnvironmentProfile {
                initial_share: 0.13,
                pooled: false,
            },
        ),
        (
            "pool_staas",
            EnvironmentProfile {
                initial_share: 0.27,
                pooled: true,
            },
        ),
        (
            "pool_hardware",
            EnvironmentProfile {
                initial_share: 0.05,
                pooled: true,
            },
        ),
        (
            "pool_cloud",
            EnvironmentProfile {
                initial_share: 0.02,
                pooled: true,
            },
        ),
        (
            "staas_full",
            EnvironmentProfile {
                initial_share: 0.08,
                pooled: false,
            },
        ),
        (
            "staas_self_custodied",
            EnvironmentProfile {
                initial_share: 0.08,
                pooled: false,
            },
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_catalog_count_and_order() {
        let catalog = reference_environments();
        assert_eq!(catalog.len(), 7);
        let names: Vec<&str> = catalog.iter().map(|(n, _)| n).collect();
        assert_eq!(
            names,
            [
                "diy_hardware",
                "diy_cloud",
                "pool_staas",
                "pool_hardware",
                "pool_cloud",
                "staas_full",
                "staas_self_custodied",
            ]
        );
    }

    #[test]
    fn reference_shares_sum_to_one() {
        let catalog = reference_environments();
        assert!((catalog.share_sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn pool_bearing_environments() {
        let catalog = reference_environments();
        let pooled: Vec<usize> = (0..catalog.len()).filter(|&i| catalog.is_pooled(i)).collect();
        assert_eq!(pooled, [2, 3, 4]);
        assert!(catalog.has_pooled());
    }

    #[test]
    fn index_lookup_matches_order() {
        let catalog = reference_environments();
        assert_eq!(catalog.index_of("pool_cloud"), Some(4));
        assert_eq!(catalog.index_of("unknown"), None);
        assert!(catalog.get("diy_cloud").is_some());
    }

    #[test]
    fn out_of_range_index_is_not_pooled() {
        let catalog = reference_environments();
        assert!(!catalog.is_pooled(99));
    }

    #[test]
    fn empty_catalog() {
        let catalog = EnvironmentCatalog::default();
        assert!(catalog.is_empty());
        assert!(!catalog.has_pooled());
        assert_eq!(catalog.share_sum(), 0.0);
    }
}
