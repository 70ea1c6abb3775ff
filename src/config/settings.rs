use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::ai::PromptTemplate;
use crate::config::defaults::DefaultConfig;

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub backend: BackendConfig,
    pub prompt: PromptConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct PromptConfig {
    /// Replaces the built-in instruction text; must contain `{input_text}`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    pub strip_reasoning: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub use_colors: bool,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "deepseek-r1:1.5b".to_string(),
            timeout_secs: 120,
            temperature: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { use_colors: true }
    }
}

impl Settings {
    /// Falls back to defaults when the file does not exist.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let settings: Settings = toml::from_str(&content)
            .with_context(|| format!("Invalid configuration in {}", config_path.display()))?;

        // Surface a broken template at load time rather than on first use
        settings.prompt_template()?;

        Ok(settings)
    }

    /// Writes the commented default configuration unless a file already
    /// exists. Returns whether a file was written.
    pub fn write_default(config_path: &Path) -> Result<bool> {
        if config_path.exists() {
            return Ok(false);
        }

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        fs::write(config_path, DefaultConfig::create_default_config_file())
            .with_context(|| format!("Failed to write {}", config_path.display()))?;

        Ok(true)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let home_dir =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?;

        Ok(home_dir.join(".textclass").join("config.toml"))
    }

    pub fn prompt_template(&self) -> Result<PromptTemplate> {
        match &self.prompt.template {
            Some(template) => PromptTemplate::new(template.as_str())
                .context("Invalid [prompt] template in configuration"),
            None => Ok(PromptTemplate::default()),
        }
    }
}
