use crate::ai::error::PromptError;

/// Placeholder substituted with the text being classified.
pub const INPUT_PLACEHOLDER: &str = "{input_text}";

// Trailing spaces on the first two instruction lines are part of the prompt.
pub const DEFAULT_TEMPLATE: &str = concat!(
    "\n",
    "You are an expert text classifier. Based on the content provided, \n",
    "classify the text into one of the appropriate categories. \n",
    "If the text does not fit any standard category, simply respond with \"Other\".\n",
    "\n",
    "Text: {input_text}\n",
    "Category:",
);

/// Instruction template with a single `{input_text}` slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    template: String,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }
}

impl PromptTemplate {
    /// Builds a template from configuration, rejecting one without a slot
    /// for the input text.
    pub fn new(template: impl Into<String>) -> Result<Self, PromptError> {
        let template = template.into();
        if !template.contains(INPUT_PLACEHOLDER) {
            return Err(PromptError::MissingPlaceholder);
        }
        Ok(Self { template })
    }

    /// Substitutes the input literally; no escaping is performed.
    pub fn render(&self, input_text: &str) -> String {
        self.template.replace(INPUT_PLACEHOLDER, input_text)
    }

    /// Instructional text that precedes the first placeholder.
    pub fn preamble(&self) -> &str {
        self.template
            .split(INPUT_PLACEHOLDER)
            .next()
            .unwrap_or(&self.template)
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }
}
