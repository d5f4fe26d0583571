use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use crate::kernel::ReactorConfig;

/// Names a YAML config file to load instead of the defaults.
pub const CONFIG_ENV: &str = "LABO_CONFIG";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub planner: PlannerConfig,
    pub transport: TransportConfig,
    pub capture: CaptureConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    /// Unset means the planning request may block indefinitely.
    pub timeout_secs: Option<u64>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key: None,
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    pub url: String,
    /// Unset means a reply read may block indefinitely.
    pub read_timeout_ms: Option<u64>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            url: "ws://localhost:8080/ws".to_string(),
            read_timeout_ms: None,
        }
    }
}

impl TransportConfig {
    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout_ms.map(Duration::from_millis)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    pub dir: PathBuf,
    pub jpeg_quality: u8,
    pub settle_delay_ms: u64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            jpeg_quality: 30,
            settle_delay_ms: 5000,
        }
    }
}

impl AgentConfig {
    /// Defaults, or the file named by `LABO_CONFIG`, then env overrides.
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        config.capture.jpeg_quality = config.capture.jpeg_quality.clamp(1, 100);
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let mut config: Self = serde_yaml::from_str(content)?;
        config.capture.jpeg_quality = config.capture.jpeg_quality.clamp(1, 100);
        Ok(config)
    }

    /// Override selected fields from an environment lookup.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("LABO_PLANNER_URL") {
            self.planner.base_url = url;
        }
        if let Some(model) = lookup("LABO_PLANNER_MODEL") {
            self.planner.model = model;
        }
        if let Some(key) = lookup("LABO_PLANNER_API_KEY") {
            self.planner.api_key = Some(key);
        }
        if let Some(url) = lookup("LABO_TRANSPORT_URL") {
            self.transport.url = url;
        }
    }

    pub fn reactor_config(&self) -> ReactorConfig {
        ReactorConfig {
            capture_dir: self.capture.dir.clone(),
            jpeg_quality: self.capture.jpeg_quality,
            settle_delay: Duration::from_millis(self.capture.settle_delay_ms),
        }
    }
}
