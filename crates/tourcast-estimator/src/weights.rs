//! Weight vector for the demand index D.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::metrics::{PLATFORM_A, PLATFORM_B, SEARCH_INDEX};

/// Dimension → weight. Conceptually sums to 1.0; not enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightConfig(BTreeMap<String, f64>);

impl Default for WeightConfig {
    fn default() -> Self {
        Self(BTreeMap::from([
            (SEARCH_INDEX.to_string(), 0.45),
            (PLATFORM_A.to_string(),   0.35),
            (PLATFORM_B.to_string(),   0.20),
        ]))
    }
}

impl WeightConfig {
    pub fn new(weights: BTreeMap<String, f64>) -> Self {
        Self(weights)
    }

    /// Weight for `dimension`; unknown dimensions weigh nothing.
    pub fn weight(&self, dimension: &str) -> f64 {
        self.0.get(dimension).copied().unwrap_or(0.0)
    }

    pub fn sum(&self) -> f64 {
        self.0.values().sum()
    }

    /// Whether the weights sum to ~1.0
    pub fn validate(&self) -> bool {
        (self.sum() - 1.0).abs() < 1e-6
    }

    /// D = Σ w_d × n_d over the normalised dimensions.
    pub fn demand_index(&self, normalised: &BTreeMap<String, f64>) -> f64 {
        normalised
            .iter()
            .map(|(dim, n)| self.weight(dim) * n)
            .sum()
    }
}

impl FromIterator<(String, f64)> for WeightConfig {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
