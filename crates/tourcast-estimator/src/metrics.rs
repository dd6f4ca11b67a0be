//! Engagement metric sets.

use std::collections::BTreeMap;

/// Dimension name → raw engagement value.
///
/// Ordered so that every pass over the dimensions (and every serialised
/// result) is deterministic.
pub type MetricSet = BTreeMap<String, f64>;

/// Search-engine popularity index.
pub const SEARCH_INDEX: &str = "search_index";
/// Followers on the music-streaming platform (ten-thousands).
pub const PLATFORM_A: &str = "platform_a";
/// Followers on the lifestyle social platform (ten-thousands).
pub const PLATFORM_B: &str = "platform_b";

/// Build a metric set from `(dimension, value)` pairs.
pub fn metric_set<I, K>(pairs: I) -> MetricSet
where
    I: IntoIterator<Item = (K, f64)>,
    K: Into<String>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v)).collect()
}
