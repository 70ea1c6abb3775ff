pub mod classifier;
pub mod error;
pub mod ollama_client;
pub mod prompt;
pub mod response;

pub use classifier::{ClassificationRequest, ClassificationResult, Classifier, TextGenerator};
pub use error::{BackendFailure, PromptError, FAILURE_SENTINEL};
pub use ollama_client::OllamaClient;
pub use prompt::PromptTemplate;
pub use response::{Category, ResponseParser};
