//! Ask a language model for an artist's engagement metrics.
//!
//! The model is a black box: its reply is only checked for shape (one JSON
//! object carrying every requested dimension as a finite, non-negative
//! number) before being handed to the estimator.

use std::sync::{Arc, OnceLock};
use std::time::Instant;

use regex::Regex;
use tourcast_estimator::metrics::{MetricSet, PLATFORM_A, PLATFORM_B, SEARCH_INDEX};
use tracing::{debug, warn};

use crate::audit::LlmAuditEntry;
use crate::backend::{LlmBackend, LlmError, LlmRequest, Message};

/// A dimension the model is asked to fill in.
#[derive(Debug, Clone)]
pub struct DimensionHint {
    pub id: String,
    pub description: String,
}

impl DimensionHint {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self { id: id.into(), description: description.into() }
    }
}

pub fn default_dimension_hints() -> Vec<DimensionHint> {
    vec![
        DimensionHint::new(SEARCH_INDEX, "average daily search-engine popularity index in mainland China"),
        DimensionHint::new(PLATFORM_A, "followers on the leading music-streaming platform, in ten-thousands"),
        DimensionHint::new(PLATFORM_B, "followers on the leading lifestyle social platform, in ten-thousands"),
    ]
}

pub struct MetricsEstimator {
    backend: Arc<dyn LlmBackend>,
    dimensions: Vec<DimensionHint>,
}

impl MetricsEstimator {
    pub fn new(backend: Arc<dyn LlmBackend>) -> Self {
        Self { backend, dimensions: default_dimension_hints() }
    }

    pub fn with_dimensions(mut self, dimensions: Vec<DimensionHint>) -> Self {
        self.dimensions = dimensions;
        self
    }

    pub fn model_id(&self) -> &str {
        self.backend.model_id()
    }

    fn build_request(&self, artist: &str) -> LlmRequest {
        let fields = self
            .dimensions
            .iter()
            .map(|d| format!("- \"{}\": {}", d.id, d.description))
            .collect::<Vec<_>>()
            .join("\n");
        let system = format!(
            "You estimate public engagement metrics for music artists. \
             Reply with a single JSON object and nothing else. \
             Use exactly these keys, each mapped to a non-negative number:\n{}",
            fields
        );
        LlmRequest {
            messages: vec![
                Message::system(system),
                Message::user(format!("Artist: {}", artist)),
            ],
            model: None,
            max_tokens: Some(256),
            temperature: Some(0.1),
        }
    }

    pub async fn estimate(&self, artist: &str) -> Result<MetricSet, LlmError> {
        let started = Instant::now();
        let resp = self.backend.complete(self.build_request(artist)).await?;
        let latency_ms = started.elapsed().as_millis() as u64;

        LlmAuditEntry::new(
            "artist_metrics",
            resp.model.clone(),
            resp.prompt_tokens,
            resp.completion_tokens,
            &resp.content,
            latency_ms,
        )
        .record();

        let metrics = parse_metric_reply(&resp.content, &self.dimensions).map_err(|e| {
            warn!(artist, error = %e, "unusable metric estimate from model");
            e
        })?;
        debug!(artist, ?metrics, "model metric estimate");
        Ok(metrics)
    }
}

fn object_start_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // '{' opening an object with a quoted key, so prose like "{approx}" is skipped
    RE.get_or_init(|| Regex::new(r#"\{\s*""#).expect("static regex"))
}

/// Pull the requested dimensions out of a model reply.
///
/// Exactly one JSON value is read from the first object start; anything
/// after it (closing fences, notes) is ignored.
pub fn parse_metric_reply(content: &str, dimensions: &[DimensionHint]) -> Result<MetricSet, LlmError> {
    let start = object_start_regex()
        .find(content)
        .ok_or_else(|| LlmError::MalformedOutput("no JSON object in reply".to_string()))?
        .start();
    let value: serde_json::Value = serde_json::Deserializer::from_str(&content[start..])
        .into_iter::<serde_json::Value>()
        .next()
        .ok_or_else(|| LlmError::MalformedOutput("no JSON object in reply".to_string()))?
        .map_err(|e| LlmError::MalformedOutput(format!("invalid JSON: {}", e)))?;

    let mut metrics = MetricSet::new();
    for dim in dimensions {
        let raw = value
            .get(&dim.id)
            .ok_or_else(|| LlmError::MalformedOutput(format!("missing \"{}\"", dim.id)))?;
        let number = match raw {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
        .ok_or_else(|| LlmError::MalformedOutput(format!("\"{}\" is not a number", dim.id)))?;
        if !number.is_finite() || number < 0.0 {
            return Err(LlmError::MalformedOutput(format!(
                "\"{}\" must be a non-negative number, got {}",
                dim.id, number
            )));
        }
        metrics.insert(dim.id.clone(), number);
    }
    Ok(metrics)
}
