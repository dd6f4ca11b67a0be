//! Max normalisation: x' = x / max(x) over the cohort.

use std::collections::BTreeMap;

use crate::metrics::MetricSet;

/// `value / max`, or 0 when the dimension has no positive maximum.
pub fn max_normalise(value: f64, max: f64) -> f64 {
    if max > 0.0 {
        value / max
    } else {
        0.0
    }
}

/// Per-dimension maximum across the cohort. Missing values count as 0.
pub fn dimension_maxima(dimensions: &[String], cohort: &[&MetricSet]) -> BTreeMap<String, f64> {
    dimensions
        .iter()
        .map(|dim| {
            let max = cohort
                .iter()
                .map(|m| m.get(dim).copied().unwrap_or(0.0))
                .fold(0.0, f64::max);
            (dim.clone(), max)
        })
        .collect()
}

/// Raw and normalised values of one cohort member over `dimensions`.
pub fn normalise_member(
    dimensions: &[String],
    metrics: &MetricSet,
    maxima: &BTreeMap<String, f64>,
) -> (MetricSet, BTreeMap<String, f64>) {
    let mut raw = MetricSet::new();
    let mut normalised = BTreeMap::new();
    for dim in dimensions {
        let value = metrics.get(dim).copied().unwrap_or(0.0);
        let max = maxima.get(dim).copied().unwrap_or(0.0);
        raw.insert(dim.clone(), value);
        normalised.insert(dim.clone(), max_normalise(value, max));
    }
    (raw, normalised)
}
