use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub toast: ToastConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Unset means requests wait indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ToastConfig {
    #[serde(default = "default_toast_timeout")]
    pub timeout_ms: u64,
    #[serde(default = "default_toast_grace")]
    pub grace_ms: u64,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_toast_timeout(),
            grace_ms: default_toast_grace(),
        }
    }
}

impl ToastConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn grace(&self) -> Duration {
        Duration::from_millis(self.grace_ms)
    }
}

fn default_toast_timeout() -> u64 {
    3500
}
fn default_toast_grace() -> u64 {
    380
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    #[serde(default = "default_snippet_chars")]
    pub snippet_chars: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            snippet_chars: default_snippet_chars(),
        }
    }
}

fn default_snippet_chars() -> usize {
    220
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    validate(&config)?;
    Ok(config)
}

pub fn validate(config: &Config) -> Result<()> {
    let url = reqwest::Url::parse(&config.backend.base_url)
        .with_context(|| format!("backend.base_url is not a URL: {}", config.backend.base_url))?;
    match url.scheme() {
        "http" | "https" => {}
        other => bail!("backend.base_url must use http or https, got '{}'", other),
    }

    if config.backend.timeout_secs == Some(0) {
        bail!("backend.timeout_secs must be > 0 when set");
    }

    if config.toast.timeout_ms == 0 {
        bail!("toast.timeout_ms must be > 0");
    }

    // Fade transition runs in CSS for this long before the node goes away.
    if !(350..=400).contains(&config.toast.grace_ms) {
        bail!("toast.grace_ms must be in [350, 400]");
    }

    if config.search.snippet_chars == 0 {
        bail!("search.snippet_chars must be > 0");
    }

    Ok(())
}
