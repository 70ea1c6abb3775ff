// External dependencies
use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

// Internal dependencies
use crate::ai::classifier::TextGenerator;
use crate::ai::error::BackendFailure;
use crate::config::BackendConfig;

const PULL_TIMEOUT: Duration = Duration::from_secs(60 * 60);

// ============================================================================
// Ollama API Structures
// ============================================================================

#[derive(Debug, Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    options: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct OllamaGenerateResponse {
    response: String,
    #[serde(default)]
    done: bool,
}

#[derive(Debug, Deserialize)]
struct OllamaModel {
    name: String,
}

#[derive(Debug, Deserialize)]
struct OllamaModelsResponse {
    models: Vec<OllamaModel>,
}

#[derive(Debug, Deserialize)]
struct OllamaVersionResponse {
    version: String,
}

/// HTTP client for a local Ollama server, bound to one model.
pub struct OllamaClient {
    client: Client,
    base_url: Url,
    model_name: String,
    temperature: Option<f32>,
}

// ============================================================================
// Client Implementation
// ============================================================================

impl OllamaClient {
    /// Creates a client for the configured server and model
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = Url::parse(&config.base_url)
            .with_context(|| format!("Invalid Ollama base URL: {}", config.base_url))?;

        Ok(Self {
            client,
            base_url,
            model_name: config.model.clone(),
            temperature: config.temperature,
        })
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ========================================================================
    // Connection and Model Management
    // ========================================================================

    /// Verifies connection to the Ollama service and returns its version
    pub async fn verify_connection(&self) -> Result<String> {
        debug!("Verifying Ollama connection at {}", self.base_url);

        let url = self
            .base_url
            .join("/api/version")
            .context("Failed to build version URL")?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to connect to Ollama service")?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "Ollama service returned error: {}",
                response.status()
            ));
        }

        let version: OllamaVersionResponse = response
            .json()
            .await
            .context("Failed to parse version response")?;

        info!("Ollama {} reachable", version.version);
        Ok(version.version)
    }

    /// Lists all models installed on the Ollama service
    pub async fn list_models(&self) -> Result<Vec<String>> {
        debug!("Listing available models");

        let url = self
            .base_url
            .join("/api/tags")
            .context("Failed to build tags URL")?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to list models")?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "Failed to list models: {}",
                response.status()
            ));
        }

        let models_response: OllamaModelsResponse = response
            .json()
            .await
            .context("Failed to parse models response")?;

        let model_names: Vec<String> = models_response.models.into_iter().map(|m| m.name).collect();

        debug!("Found {} models", model_names.len());
        Ok(model_names)
    }

    /// Whether the configured model is installed. Ollama reports untagged
    /// names with an implicit `:latest`.
    pub async fn has_model(&self) -> Result<bool> {
        let models = self.list_models().await?;
        let wanted = &self.model_name;
        let tagged = format!("{wanted}:latest");

        Ok(models.iter().any(|m| m == wanted || *m == tagged))
    }

    /// Ensures the configured model is available, pulling it if necessary.
    /// Returns `true` when a pull was performed.
    pub async fn ensure_model_available(&self) -> Result<bool> {
        debug!("Ensuring model {} is available", self.model_name);

        if self.has_model().await? {
            info!("Model {} already available", self.model_name);
            return Ok(false);
        }

        info!("Model {} not found, pulling...", self.model_name);
        self.pull_model().await?;
        Ok(true)
    }

    async fn pull_model(&self) -> Result<()> {
        let url = self
            .base_url
            .join("/api/pull")
            .context("Failed to build pull URL")?;

        let request_body = serde_json::json!({
            "name": self.model_name,
            "stream": false,
        });

        info!(
            "Pulling model {}, this may take a while...",
            self.model_name
        );

        let response = self
            .client
            .post(url)
            .timeout(PULL_TIMEOUT)
            .json(&request_body)
            .send()
            .await
            .context("Failed to start model pull")?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "Failed to pull model: {}",
                response.status()
            ));
        }

        info!("Model {} pulled successfully", self.model_name);
        Ok(())
    }

    fn generation_options(&self) -> HashMap<String, serde_json::Value> {
        let mut options = HashMap::new();
        if let Some(temperature) = self.temperature {
            options.insert(
                "temperature".to_string(),
                serde_json::Value::from(temperature),
            );
        }
        options
    }
}

// ============================================================================
// Text Generation
// ============================================================================

#[async_trait]
impl TextGenerator for OllamaClient {
    async fn generate(&self, prompt: &str) -> Result<String, BackendFailure> {
        let url = self
            .base_url
            .join("/api/generate")
            .map_err(|e| BackendFailure::Client(format!("failed to build generate URL: {e}")))?;

        let request = OllamaGenerateRequest {
            model: &self.model_name,
            prompt,
            stream: false,
            options: self.generation_options(),
        };

        debug!(
            "Sending request to Ollama model {}, prompt length: {}",
            self.model_name,
            prompt.len()
        );

        let response = self
            .client
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(|e| BackendFailure::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendFailure::Status {
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }

        let generate_response: OllamaGenerateResponse = response
            .json()
            .await
            .map_err(|e| BackendFailure::MalformedResponse(e.to_string()))?;

        if !generate_response.done {
            warn!("Generation was not completed");
        }

        debug!(
            "Generated response length: {}",
            generate_response.response.len()
        );
        Ok(generate_response.response)
    }

    fn model(&self) -> &str {
        &self.model_name
    }
}
