//! Boundary adapter for parameter documents.
//!
//! Callers (request bodies, parameter files) send parameters in a couple of
//! historical shapes: weights as a `{dim: w}` map or as a list of
//! `{id, value}` entries, benchmarks as a list or as a map keyed by id,
//! premiums either canonical or as a bare `{tier: triple}` map. Everything is
//! normalised here so the estimator only ever sees [`EstimatorParams`].
//!
//! [`EstimatorParams`]: crate::params::EstimatorParams

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::benchmark::{BenchmarkArtist, ANCHOR_TIER};
use crate::conversion::ConversionOverride;
use crate::metrics::MetricSet;
use crate::premium::{CityTierInfo, PremiumTriple, TierPremiumConfig};
use crate::weights::WeightConfig;

/// Partial parameter set. Absent sections keep their base value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamsOverride {
    pub weights: Option<WeightsShape>,
    #[serde(alias = "conversion")]
    pub lc: Option<ConversionOverride>,
    pub tier_premiums: Option<TierPremiumsShape>,
    pub city_tiers: Option<BTreeMap<String, CityTierInfo>>,
    pub benchmarks: Option<BenchmarksShape>,
}

// ── Weights ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WeightsShape {
    Keyed(BTreeMap<String, f64>),
    Listed(Vec<WeightEntry>),
}

/// One row of the list form; display fields such as `name` or `icon` are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct WeightEntry {
    pub id: String,
    #[serde(alias = "weight")]
    pub value: f64,
}

impl From<WeightsShape> for WeightConfig {
    fn from(shape: WeightsShape) -> Self {
        match shape {
            WeightsShape::Keyed(map) => WeightConfig::new(map),
            WeightsShape::Listed(rows) => rows.into_iter().map(|r| (r.id, r.value)).collect(),
        }
    }
}

// ── Benchmarks ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BenchmarksShape {
    Listed(Vec<BenchmarkArtist>),
    Keyed(BTreeMap<String, KeyedBenchmark>),
}

/// A benchmark whose id is its map key.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyedBenchmark {
    pub name: Option<String>,
    pub city: Option<String>,
    pub tier: Option<String>,
    pub box_office: f64,
    #[serde(alias = "data")]
    pub metrics: MetricSet,
}

impl From<BenchmarksShape> for Vec<BenchmarkArtist> {
    fn from(shape: BenchmarksShape) -> Self {
        match shape {
            BenchmarksShape::Listed(list) => list,
            BenchmarksShape::Keyed(map) => map
                .into_iter()
                .map(|(id, b)| BenchmarkArtist {
                    name: b.name.unwrap_or_else(|| id.clone()),
                    id,
                    city: b.city,
                    tier: b.tier.unwrap_or_else(|| ANCHOR_TIER.to_string()),
                    box_office: b.box_office,
                    metrics: b.metrics,
                })
                .collect(),
        }
    }
}

// ── Tier premiums ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TierPremiumsShape {
    Canonical(TierPremiumConfig),
    Keyed(BTreeMap<String, PremiumTriple>),
}

impl TierPremiumsShape {
    /// A bare map inherits `default_tier` from the base configuration.
    /// Legacy `toTierN` keys are renamed to `tierN`.
    pub fn into_config(self, default_tier: &str) -> TierPremiumConfig {
        let (default_tier, tiers) = match self {
            TierPremiumsShape::Canonical(cfg) => (cfg.default_tier, cfg.tiers),
            TierPremiumsShape::Keyed(tiers) => (default_tier.to_string(), tiers),
        };
        TierPremiumConfig {
            default_tier: canonical_tier_id(&default_tier),
            tiers: tiers
                .into_iter()
                .map(|(id, triple)| (canonical_tier_id(&id), triple))
                .collect(),
        }
    }
}

/// `toTier2` → `tier2`; anything else is returned unchanged.
fn canonical_tier_id(id: &str) -> String {
    match id.strip_prefix("toTier") {
        Some(rest) if !rest.is_empty() => format!("tier{}", rest),
        _ => id.to_string(),
    }
}
