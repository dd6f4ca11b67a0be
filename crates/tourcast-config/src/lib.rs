//! Configuration loading for Tourcast.
//! Reads tourcast.toml from the current directory or the path in the
//! TOURCAST_CONFIG env var, then applies environment overrides.

use std::path::Path;

use anyhow::Context;
use secrecy::SecretString;
use serde::Deserialize;
use tourcast_estimator::{EstimatorParams, ParamsOverride};

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub estimator: EstimatorConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

fn default_host()       -> String { "127.0.0.1".to_string() }
fn default_port()       -> u16    { 3001 }
fn default_static_dir() -> String { "static".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,
    #[serde(default = "default_llm_model")]
    pub model: String,
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
    /// Only ever read from the environment (OPENAI_API_KEY).
    #[serde(skip)]
    pub api_key: Option<SecretString>,
}

fn default_llm_base_url() -> String { "https://api.openai.com".to_string() }
fn default_llm_model()    -> String { "gpt-4o-mini".to_string() }
fn default_llm_timeout()  -> u64    { 30 }

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_llm_base_url(),
            model: default_llm_model(),
            timeout_secs: default_llm_timeout(),
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EstimatorConfig {
    /// Parameter document (.toml, .yaml/.yml or .json) layered over the
    /// built-in defaults.
    pub params_file: Option<String>,
    #[serde(default = "default_target_tier")]
    pub default_tier: String,
}

fn default_target_tier() -> String { "tier1".to_string() }

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self { params_file: None, default_tier: default_target_tier() }
    }
}


impl Config {
    /// Load configuration.
    /// A missing tourcast.toml means defaults; a missing file named by
    /// TOURCAST_CONFIG is an error.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let explicit = std::env::var("TOURCAST_CONFIG").ok();
        let path = explicit.clone().unwrap_or_else(|| "tourcast.toml".to_string());

        let mut config = if Path::new(&path).exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path))?;
            Self::from_toml_str(&content).with_context(|| format!("parsing {}", path))?
        } else if explicit.is_some() {
            anyhow::bail!("Config file not found: {}", path);
        } else {
            tracing::info!("no tourcast.toml found, using built-in defaults");
            Config::default()
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply environment overrides through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("OPENAI_API_KEY").filter(|k| !k.trim().is_empty()) {
            self.llm.api_key = Some(SecretString::from(key));
        }
        if let Some(url) = lookup("OPENAI_BASE_URL") {
            self.llm.base_url = url;
        }
        if let Some(model) = lookup("OPENAI_MODEL") {
            self.llm.model = model;
        }
        if let Some(host) = lookup("TOURCAST_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("TOURCAST_PORT") {
            self.server.port = port
                .parse()
                .with_context(|| format!("TOURCAST_PORT is not a port number: {}", port))?;
        }
        Ok(())
    }

    /// Estimator parameters: defaults, overlaid with `params_file` if set.
    pub fn load_params(&self) -> anyhow::Result<EstimatorParams> {
        let Some(path) = &self.estimator.params_file else {
            return Ok(EstimatorParams::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading parameter file {}", path))?;
        let format = ParamsFormat::from_path(path)?;
        let params = parse_params(&content, format)
            .with_context(|| format!("parsing parameter file {}", path))?;
        tracing::info!(path = %path, benchmarks = params.benchmarks.len(), "loaded estimator parameters");
        Ok(params)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamsFormat {
    Toml,
    Yaml,
    Json,
}

impl ParamsFormat {
    pub fn from_path(path: &str) -> anyhow::Result<Self> {
        match Path::new(path).extension().and_then(|e| e.to_str()) {
            Some("toml") => Ok(ParamsFormat::Toml),
            Some("yaml") | Some("yml") => Ok(ParamsFormat::Yaml),
            Some("json") => Ok(ParamsFormat::Json),
            _ => anyhow::bail!("unsupported parameter file type: {}", path),
        }
    }
}

/// Parse a parameter document and layer it over the defaults.
pub fn parse_params(content: &str, format: ParamsFormat) -> anyhow::Result<EstimatorParams> {
    let doc: ParamsOverride = match format {
        ParamsFormat::Toml => toml::from_str(content)?,
        ParamsFormat::Yaml => serde_yaml::from_str(content)?,
        ParamsFormat::Json => serde_json::from_str(content)?,
    };
    let params = EstimatorParams::default().with_overrides(doc);
    if params.benchmarks.is_empty() {
        anyhow::bail!("parameter document must keep at least one benchmark");
    }
    if !params.weights.validate() {
        tracing::warn!(sum = params.weights.sum(), "demand weights do not sum to 1.0");
    }
    Ok(params)
}
