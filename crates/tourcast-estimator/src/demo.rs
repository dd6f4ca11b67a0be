//! Fixed walkthrough case used to explain the six computation steps.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::estimator::{ComparableEstimator, EstimateError, EstimationResult};
use crate::metrics::{metric_set, MetricSet, PLATFORM_A, PLATFORM_B, SEARCH_INDEX};
use crate::params::EstimatorParams;

pub const DEMO_ARTIST: &str = "Cardi B";
pub const DEMO_TIER: &str = "tier1";

pub fn demo_metrics() -> MetricSet {
    metric_set([(SEARCH_INDEX, 388.0), (PLATFORM_A, 80.6), (PLATFORM_B, 82.0)])
}

#[derive(Debug, Clone, Serialize)]
pub struct DemoReport {
    pub artist: String,
    pub input: MetricSet,
    pub result: EstimationResult,
    /// `step1` … `step6` captions.
    pub explanation: BTreeMap<String, String>,
}

/// Captions for each step, quoting the live conversion formula.
pub fn step_captions(params: &EstimatorParams) -> BTreeMap<String, String> {
    let steps = [
        "Step A: normalisation - divide each dimension by the cohort maximum so values are comparable".to_string(),
        "Step B: demand index D = Σ(weight_i × dimension_i')".to_string(),
        format!("Step C: live conversion LC = {}", params.conversion.describe()),
        "Step D: combined index F = D × LC".to_string(),
        "Step E: benchmark calibration - map the ratio of F onto each benchmark artist's real box office".to_string(),
        "Step F: city premium - project the anchor-tier baseline onto the target city tier".to_string(),
    ];
    steps
        .into_iter()
        .enumerate()
        .map(|(i, text)| (format!("step{}", i + 1), text))
        .collect()
}

pub fn run_demo(params: &EstimatorParams) -> Result<DemoReport, EstimateError> {
    let input = demo_metrics();
    let result = ComparableEstimator::new(params.clone()).estimate(&input, DEMO_TIER)?;
    Ok(DemoReport {
        artist: DEMO_ARTIST.to_string(),
        input,
        result,
        explanation: step_captions(params),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_has_six_captions() {
        let report = run_demo(&EstimatorParams::default()).unwrap();
        assert_eq!(report.explanation.len(), 6);
        assert!(report.explanation["step3"].contains("clip(0.6"));
        assert_eq!(report.result.applied_tier, DEMO_TIER);
    }
}
