use async_trait::async_trait;
use log::{debug, info, warn};

use crate::ai::error::{BackendFailure, FAILURE_SENTINEL};
use crate::ai::prompt::PromptTemplate;
use crate::ai::response::{Category, ResponseParser};

/// A backend that turns one prompt into one completion.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, BackendFailure>;

    /// Identifier of the model serving completions.
    fn model(&self) -> &str;
}

/// Text submitted for classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationRequest {
    pub input_text: String,
}

impl ClassificationRequest {
    pub fn new(input_text: impl Into<String>) -> Self {
        Self {
            input_text: input_text.into(),
        }
    }

    /// Only non-blank text is ever sent to the backend.
    pub fn is_dispatchable(&self) -> bool {
        !self.input_text.trim().is_empty()
    }
}

pub type ClassificationResult = Result<Category, BackendFailure>;

/// Renders text into the prompt template and asks the backend for a
/// category. Holds no per-call state.
pub struct Classifier<G> {
    template: PromptTemplate,
    generator: G,
    parser: ResponseParser,
}

impl<G: TextGenerator> Classifier<G> {
    pub fn new(template: PromptTemplate, generator: G) -> Self {
        Self {
            template,
            generator,
            parser: ResponseParser::default(),
        }
    }

    pub fn with_parser(mut self, parser: ResponseParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn template(&self) -> &PromptTemplate {
        &self.template
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// One round trip to the backend. No retries.
    pub async fn classify(&self, input_text: &str) -> ClassificationResult {
        let prompt = self.template.render(input_text);
        debug!(
            "Classifying {} chars with model {}",
            input_text.len(),
            self.generator.model()
        );

        let response = self.generator.generate(&prompt).await?;
        let category = self
            .parser
            .parse(&response)
            .ok_or(BackendFailure::EmptyResponse)?;

        info!("Classified input as {category}");
        Ok(category)
    }

    /// Like [`classify`](Self::classify), but collapses any failure into
    /// the `"Error"` sentinel. This is the contract for library callers
    /// that only want a display string; the CLI keeps the structured
    /// result and renders the sentinel itself.
    pub async fn classify_or_sentinel(&self, input_text: &str) -> String {
        match self.classify(input_text).await {
            Ok(category) => category.into_inner(),
            Err(e) => {
                warn!("Classification error: {e}");
                FAILURE_SENTINEL.to_string()
            }
        }
    }

    pub async fn classify_request(&self, request: &ClassificationRequest) -> ClassificationResult {
        self.classify(&request.input_text).await
    }
}
