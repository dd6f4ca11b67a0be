//! The Comparable estimator.
//!
//! ```text
//! Step A  n_d   = x_d / max_cohort(x_d)
//! Step B  D     = Σ w_d × n_d
//! Step C  LC    = clip(c + Σ k_d × n_d, min, max)
//! Step D  F     = D × LC
//! Step E  B_i   = box_office_i × F_target / F_i        (anchor tier)
//! Step F  out   = (min B × p_c, mean B × p_n, max B × p_a)
//! ```
//!
//! The cohort used for normalisation is every benchmark plus the target, so
//! adding or removing a benchmark moves the target's indices.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::metrics::MetricSet;
use crate::normalise::{dimension_maxima, normalise_member};
use crate::params::EstimatorParams;
use crate::premium::PremiumTriple;

/// Cohort id of the artist being estimated.
pub const TARGET_ID: &str = "target";

#[derive(Debug, Error, PartialEq)]
pub enum EstimateError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("non-finite value produced in {0}")]
    Computation(String),
}

// ── Result types ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizationSummary {
    pub method: String,
    pub dimensions: Vec<String>,
    pub max_values: BTreeMap<String, f64>,
}

/// Indices of one cohort member.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberIndices {
    pub id: String,
    pub name: String,
    pub is_target: bool,
    pub raw: MetricSet,
    pub normalized: BTreeMap<String, f64>,
    #[serde(rename = "D")]
    pub demand: f64,
    #[serde(rename = "LC")]
    pub conversion: f64,
    #[serde(rename = "F")]
    pub combined: f64,
}

/// Target calibrated against one benchmark.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnchorResult {
    pub id: String,
    pub name: String,
    pub anchor_tier: String,
    pub reference_box_office: f64,
    pub ratio: f64,
    pub implied_baseline: f64,
    pub formula: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaselineRange {
    pub values: Vec<f64>,
    pub min: f64,
    pub avg: f64,
    pub max: f64,
}

impl BaselineRange {
    /// `values` must be non-empty.
    fn from_values(values: Vec<f64>) -> Self {
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let avg = values.iter().sum::<f64>() / values.len() as f64;
        Self { values, min, avg, max }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scenario {
    pub value: f64,
    pub premium: f64,
    pub formula: String,
}

impl Scenario {
    fn apply(baseline: f64, premium: f64) -> Self {
        let value = baseline * premium;
        Self {
            value,
            premium,
            formula: format!("{:.2} × {} = {:.2}", baseline, premium, value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioOutput {
    pub conservative: Scenario,
    pub neutral: Scenario,
    pub aggressive: Scenario,
    /// `[conservative, aggressive]`
    pub range: [f64; 2],
    /// Same as the neutral value.
    pub mid: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationResult {
    pub normalization: NormalizationSummary,
    /// Benchmarks in configured order, then the target.
    pub indices: Vec<MemberIndices>,
    pub anchors: Vec<AnchorResult>,
    pub baseline: BaselineRange,
    pub target_tier: String,
    pub applied_tier: String,
    pub output: ScenarioOutput,
}

impl EstimationResult {
    pub fn target(&self) -> Option<&MemberIndices> {
        self.indices.iter().find(|m| m.is_target)
    }

    fn ensure_finite(&self) -> Result<(), EstimateError> {
        let checks = [
            ("combined index", self.indices.iter().all(|m| m.combined.is_finite())),
            ("anchor baselines", self.baseline.values.iter().all(|v| v.is_finite())),
            (
                "scenario output",
                [&self.output.conservative, &self.output.neutral, &self.output.aggressive]
                    .iter()
                    .all(|s| s.value.is_finite()),
            ),
        ];
        match checks.iter().find(|(_, ok)| !ok) {
            Some((stage, _)) => Err(EstimateError::Computation(stage.to_string())),
            None => Ok(()),
        }
    }
}

// ── Estimator ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct ComparableEstimator {
    params: EstimatorParams,
}

impl ComparableEstimator {
    pub fn new(params: EstimatorParams) -> Self {
        Self { params }
    }

    /// Forecast the target's box office in `target_tier`.
    ///
    /// Unknown tiers fall back to the configured default tier.
    pub fn estimate(
        &self,
        target: &MetricSet,
        target_tier: &str,
    ) -> Result<EstimationResult, EstimateError> {
        if target.is_empty() {
            return Err(EstimateError::InvalidInput(
                "target metrics must contain at least one dimension".to_string(),
            ));
        }
        let benchmarks = &self.params.benchmarks;
        if benchmarks.is_empty() {
            return Err(EstimateError::InvalidInput(
                "at least one benchmark artist is required".to_string(),
            ));
        }

        // Step A: only the target's dimensions take part.
        let dimensions: Vec<String> = target.keys().cloned().collect();
        let cohort: Vec<&MetricSet> = benchmarks
            .iter()
            .map(|b| &b.metrics)
            .chain(std::iter::once(target))
            .collect();
        let max_values = dimension_maxima(&dimensions, &cohort);

        // Steps B–D
        let member = |id: &str, name: &str, is_target: bool, metrics: &MetricSet| {
            let (raw, normalized) = normalise_member(&dimensions, metrics, &max_values);
            let demand = self.params.weights.demand_index(&normalized);
            let conversion = self.params.conversion.rate(&normalized);
            MemberIndices {
                id: id.to_string(),
                name: name.to_string(),
                is_target,
                raw,
                normalized,
                demand,
                conversion,
                combined: demand * conversion,
            }
        };
        let mut indices: Vec<MemberIndices> = benchmarks
            .iter()
            .map(|b| member(b.id.as_str(), b.name.as_str(), false, &b.metrics))
            .collect();
        let target_idx = member(TARGET_ID, "Target", true, target);

        // Step E
        let anchors: Vec<AnchorResult> = benchmarks
            .iter()
            .zip(&indices)
            .map(|(b, idx)| {
                let ratio = if idx.combined > 0.0 { target_idx.combined / idx.combined } else { 0.0 };
                let implied_baseline = b.box_office * ratio;
                AnchorResult {
                    id: b.id.clone(),
                    name: b.name.clone(),
                    anchor_tier: b.tier.clone(),
                    reference_box_office: b.box_office,
                    ratio,
                    implied_baseline,
                    formula: format!("{} × {:.3} = {:.2}", b.box_office, ratio, implied_baseline),
                }
            })
            .collect();
        indices.push(target_idx);

        let baseline = BaselineRange::from_values(
            anchors.iter().map(|a| a.implied_baseline).collect(),
        );

        // Step F
        let applied = self.params.tier_premiums.resolve(target_tier);
        let output = scenarios(&baseline, &applied.premiums);

        debug!(
            tier = %applied.tier,
            conservative = output.conservative.value,
            neutral = output.neutral.value,
            aggressive = output.aggressive.value,
            "comparable estimate computed"
        );

        let result = EstimationResult {
            normalization: NormalizationSummary {
                method: "max".to_string(),
                dimensions,
                max_values,
            },
            indices,
            anchors,
            baseline,
            target_tier: target_tier.to_string(),
            applied_tier: applied.tier,
            output,
        };
        result.ensure_finite()?;
        Ok(result)
    }
}

fn scenarios(baseline: &BaselineRange, premiums: &PremiumTriple) -> ScenarioOutput {
    let conservative = Scenario::apply(baseline.min, premiums.conservative);
    let neutral = Scenario::apply(baseline.avg, premiums.neutral);
    let aggressive = Scenario::apply(baseline.max, premiums.aggressive);
    ScenarioOutput {
        range: [conservative.value, aggressive.value],
        mid: neutral.value,
        conservative,
        neutral,
        aggressive,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchmark::BenchmarkArtist;
    use crate::metrics::{metric_set, PLATFORM_A, PLATFORM_B, SEARCH_INDEX};

    fn reference_target() -> MetricSet {
        metric_set([(SEARCH_INDEX, 388.0), (PLATFORM_A, 80.6), (PLATFORM_B, 82.0)])
    }

    #[test]
    fn test_empty_target_is_invalid_input() {
        let est = ComparableEstimator::default();
        let err = est.estimate(&MetricSet::new(), "tier1").unwrap_err();
        assert!(matches!(err, EstimateError::InvalidInput(_)));
    }

    #[test]
    fn test_no_benchmarks_is_invalid_input() {
        let params = EstimatorParams { benchmarks: vec![], ..Default::default() };
        let err = ComparableEstimator::new(params)
            .estimate(&reference_target(), "tier1")
            .unwrap_err();
        assert!(matches!(err, EstimateError::InvalidInput(_)));
    }

    #[test]
    fn test_target_is_last_member() {
        let result = ComparableEstimator::default()
            .estimate(&reference_target(), "tier1")
            .unwrap();
        assert_eq!(result.indices.len(), 3);
        assert!(result.indices[2].is_target);
        assert_eq!(result.target().map(|t| t.id.as_str()), Some(TARGET_ID));
    }

    #[test]
    fn test_zero_benchmark_index_gives_zero_ratio() {
        let mut params = EstimatorParams::default();
        params.benchmarks.push(BenchmarkArtist {
            id: "silent".into(),
            name: "Silent".into(),
            city: None,
            tier: "tier3".into(),
            box_office: 30.0,
            metrics: MetricSet::new(),
        });
        let result = ComparableEstimator::new(params)
            .estimate(&reference_target(), "tier1")
            .unwrap();
        let silent = result.anchors.iter().find(|a| a.id == "silent").unwrap();
        assert_eq!(silent.ratio, 0.0);
        assert_eq!(silent.implied_baseline, 0.0);
        assert_eq!(result.baseline.min, 0.0);
    }

    #[test]
    fn test_unknown_tier_reports_applied_tier() {
        let result = ComparableEstimator::default()
            .estimate(&reference_target(), "tier7")
            .unwrap();
        assert_eq!(result.target_tier, "tier7");
        assert_eq!(result.applied_tier, "tier1");
        assert_eq!(result.output.conservative.premium, 1.15);
    }

    #[test]
    fn test_overflow_is_computation_failure() {
        let mut params = EstimatorParams::default();
        params.benchmarks[0].box_office = f64::MAX;
        // target beats the first benchmark, so ratio > 1 and the product overflows
        let target = metric_set([(SEARCH_INDEX, 10_000.0), (PLATFORM_A, 10_000.0), (PLATFORM_B, 10_000.0)]);
        let err = ComparableEstimator::new(params).estimate(&target, "tier1").unwrap_err();
        assert!(matches!(err, EstimateError::Computation(_)));
    }

    #[test]
    fn test_formula_trace() {
        let result = ComparableEstimator::default()
            .estimate(&reference_target(), "tier1")
            .unwrap();
        assert_eq!(result.anchors[0].formula, "78.15 × 0.832 = 65.03");
        assert_eq!(result.output.neutral.formula, "50.13 × 1.25 = 62.67");
    }
}
