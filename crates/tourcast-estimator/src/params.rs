//! Complete, canonical estimator parameter set.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::benchmark::{default_benchmarks, BenchmarkArtist};
use crate::conversion::ConversionConfig;
use crate::document::ParamsOverride;
use crate::premium::{default_city_tiers, CityTierInfo, TierPremiumConfig};
use crate::weights::WeightConfig;

/// Everything the estimator needs besides the target's metrics.
/// Passed explicitly per call; never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimatorParams {
    pub weights: WeightConfig,
    #[serde(rename = "lc", alias = "conversion")]
    pub conversion: ConversionConfig,
    pub tier_premiums: TierPremiumConfig,
    #[serde(default)]
    pub city_tiers: BTreeMap<String, CityTierInfo>,
    pub benchmarks: Vec<BenchmarkArtist>,
}

impl Default for EstimatorParams {
    fn default() -> Self {
        Self {
            weights: WeightConfig::default(),
            conversion: ConversionConfig::default(),
            tier_premiums: TierPremiumConfig::default(),
            city_tiers: default_city_tiers(),
            benchmarks: default_benchmarks(),
        }
    }
}

impl EstimatorParams {
    /// Layer caller overrides on top of `self`.
    ///
    /// Weights, premiums, city tiers and benchmarks replace the whole section;
    /// conversion settings merge field by field.
    pub fn with_overrides(&self, patch: ParamsOverride) -> Self {
        let ParamsOverride { weights, lc, tier_premiums, city_tiers, benchmarks } = patch;
        Self {
            weights: weights.map(Into::into).unwrap_or_else(|| self.weights.clone()),
            conversion: match lc {
                Some(lc) => self.conversion.merged(&lc),
                None => self.conversion.clone(),
            },
            tier_premiums: tier_premiums
                .map(|t| t.into_config(&self.tier_premiums.default_tier))
                .unwrap_or_else(|| self.tier_premiums.clone()),
            city_tiers: city_tiers.unwrap_or_else(|| self.city_tiers.clone()),
            benchmarks: benchmarks.map(Into::into).unwrap_or_else(|| self.benchmarks.clone()),
        }
    }
}
