//! Benchmark artists: reference acts with a known box office.

use serde::{Deserialize, Serialize};

use crate::metrics::{metric_set, MetricSet, PLATFORM_A, PLATFORM_B, SEARCH_INDEX};

/// Tier the benchmark box offices are quoted in.
pub const ANCHOR_TIER: &str = "tier3";

fn default_anchor_tier() -> String { ANCHOR_TIER.to_string() }

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkArtist {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default = "default_anchor_tier")]
    pub tier: String,
    /// Single-show gross in the anchor tier, in millions.
    pub box_office: f64,
    #[serde(alias = "data")]
    pub metrics: MetricSet,
}

/// The two reference shows the model was calibrated on.
pub fn default_benchmarks() -> Vec<BenchmarkArtist> {
    vec![
        BenchmarkArtist {
            id: "travis".to_string(),
            name: "Travis Scott".to_string(),
            city: Some("Changsha".to_string()),
            tier: ANCHOR_TIER.to_string(),
            box_office: 78.15,
            metrics: metric_set([(SEARCH_INDEX, 280.0), (PLATFORM_A, 126.6), (PLATFORM_B, 1.0)]),
        },
        BenchmarkArtist {
            id: "kanye".to_string(),
            name: "Kanye West".to_string(),
            city: Some("Macau".to_string()),
            tier: ANCHOR_TIER.to_string(),
            box_office: 51.00,
            metrics: metric_set([(SEARCH_INDEX, 616.0), (PLATFORM_A, 99.7), (PLATFORM_B, 13.9)]),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_data_key_and_default_tier() {
        let json = r#"{"id":"x","name":"X","boxOffice":10.0,"data":{"search_index":5}}"#;
        let b: BenchmarkArtist = serde_json::from_str(json).unwrap();
        assert_eq!(b.tier, ANCHOR_TIER);
        assert_eq!(b.metrics[SEARCH_INDEX], 5.0);
        assert!(b.city.is_none());
    }
}
