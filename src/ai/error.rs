use thiserror::Error;

/// String shown in place of a category whenever classification fails.
pub const FAILURE_SENTINEL: &str = "Error";

/// Every way a round trip to the text-generation backend can go wrong.
///
/// Callers are not expected to recover differently per variant; the detail
/// exists for logs and diagnostics.
#[derive(Debug, Error)]
pub enum BackendFailure {
    #[error("failed to set up backend client: {0}")]
    Client(String),

    #[error("backend unreachable: {0}")]
    Unreachable(String),

    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed backend response: {0}")]
    MalformedResponse(String),

    #[error("backend returned an empty response")]
    EmptyResponse,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromptError {
    #[error("prompt template has no {{input_text}} placeholder")]
    MissingPlaceholder,
}
