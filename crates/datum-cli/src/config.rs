//! YAML configuration file

use std::path::Path;

use anyhow::Context;
use datum_pipeline::PipelineConfig;
use serde::Deserialize;

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Contents of the `--config` file; every section is optional
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub log_level: Option<String>,
    pub pipeline: PipelineConfig,
}

impl CliConfig {
    /// Load `path`, or the defaults when no file is given
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }
}
