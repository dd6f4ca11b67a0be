//! Live conversion rate LC: a clipped affine function of normalised values.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::metrics::{PLATFORM_A, PLATFORM_B};

/// LC = clip(constant + Σ coef_d × n_d, min, max)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionConfig {
    pub constant: f64,
    /// Signed coefficient per dimension.
    #[serde(default)]
    pub coefficients: BTreeMap<String, f64>,
    pub min: f64,
    pub max: f64,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            constant: 0.60,
            coefficients: BTreeMap::from([
                (PLATFORM_A.to_string(),  0.40),
                (PLATFORM_B.to_string(), -0.20),
            ]),
            min: 0.60,
            max: 1.00,
        }
    }
}

impl ConversionConfig {
    /// The affine part before clipping. Coefficients for dimensions the
    /// member does not carry contribute nothing.
    pub fn raw_rate(&self, normalised: &BTreeMap<String, f64>) -> f64 {
        self.constant
            + self
                .coefficients
                .iter()
                .map(|(dim, coef)| coef * normalised.get(dim).copied().unwrap_or(0.0))
                .sum::<f64>()
    }

    /// Hard floor then ceiling; an inverted range yields `max`.
    pub fn rate(&self, normalised: &BTreeMap<String, f64>) -> f64 {
        self.raw_rate(normalised).max(self.min).min(self.max)
    }

    /// Field-by-field merge of a partial override.
    pub fn merged(&self, patch: &ConversionOverride) -> Self {
        Self {
            constant: patch.constant.unwrap_or(self.constant),
            coefficients: patch
                .coefficients
                .clone()
                .unwrap_or_else(|| self.coefficients.clone()),
            min: patch.min.unwrap_or(self.min),
            max: patch.max.unwrap_or(self.max),
        }
    }

    /// Human-readable formula, e.g. `clip(0.6 + 0.4×platform_a' - 0.2×platform_b', 0.6, 1)`.
    pub fn describe(&self) -> String {
        let mut expr = format!("{}", self.constant);
        for (dim, coef) in &self.coefficients {
            let sign = if *coef < 0.0 { '-' } else { '+' };
            expr.push_str(&format!(" {} {}×{}'", sign, coef.abs(), dim));
        }
        format!("clip({}, {}, {})", expr, self.min, self.max)
    }
}

/// Partial conversion settings supplied by a caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConversionOverride {
    pub constant: Option<f64>,
    pub coefficients: Option<BTreeMap<String, f64>>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normed(a: f64, b: f64) -> BTreeMap<String, f64> {
        BTreeMap::from([(PLATFORM_A.to_string(), a), (PLATFORM_B.to_string(), b)])
    }

    #[test]
    fn test_rate_is_clipped_to_floor() {
        let lc = ConversionConfig::default();
        // 0.60 + 0 - 0.20 = 0.40 → floor 0.60
        assert_eq!(lc.rate(&normed(0.0, 1.0)), 0.60);
    }

    #[test]
    fn test_rate_is_clipped_to_ceiling() {
        let lc = ConversionConfig { constant: 0.9, ..Default::default() };
        // 0.9 + 0.4 = 1.3 → ceiling 1.0
        assert_eq!(lc.rate(&normed(1.0, 0.0)), 1.0);
    }

    #[test]
    fn test_rate_stays_in_bounds_for_extreme_inputs() {
        let lc = ConversionConfig::default();
        for &(a, b) in &[(1e9, -1e9), (-1e9, 1e9), (f64::MAX, 0.0), (0.3, 0.7)] {
            let r = lc.rate(&normed(a, b));
            assert!(r >= lc.min && r <= lc.max, "rate {} out of bounds", r);
        }
    }

    #[test]
    fn test_missing_dimension_contributes_nothing() {
        let lc = ConversionConfig::default();
        assert!((lc.raw_rate(&BTreeMap::new()) - 0.60).abs() < 1e-12);
    }

    #[test]
    fn test_merge_keeps_unpatched_fields() {
        let lc = ConversionConfig::default();
        let merged = lc.merged(&ConversionOverride { max: Some(0.9), ..Default::default() });
        assert_eq!(merged.max, 0.9);
        assert_eq!(merged.constant, lc.constant);
        assert_eq!(merged.coefficients, lc.coefficients);
    }

    #[test]
    fn test_describe_shows_signed_terms() {
        let text = ConversionConfig::default().describe();
        assert_eq!(text, "clip(0.6 + 0.4×platform_a' - 0.2×platform_b', 0.6, 1)");
    }
}
