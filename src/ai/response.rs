use regex::Regex;
use std::fmt;

/// A category as answered by the model: trimmed and never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category(String);

impl Category {
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Turns raw completion text into a [`Category`].
pub struct ResponseParser {
    reasoning: Option<Regex>,
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::new(false)
    }
}

impl ResponseParser {
    /// With `strip_reasoning`, `<think>...</think>` blocks emitted by
    /// reasoning models are removed before trimming.
    pub fn new(strip_reasoning: bool) -> Self {
        let reasoning = if strip_reasoning {
            Regex::new(r"(?s)<think>.*?(</think>|\z)").ok()
        } else {
            None
        };

        Self { reasoning }
    }

    pub fn parse(&self, response: &str) -> Option<Category> {
        match &self.reasoning {
            Some(pattern) => Category::new(&pattern.replace_all(response, "")),
            None => Category::new(response),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_is_trimmed() {
        let category = Category::new(" Other \n").unwrap();
        assert_eq!(category.as_str(), "Other");
        assert_eq!(category.to_string(), "Other");
    }

    #[test]
    fn test_blank_category_is_rejected() {
        assert_eq!(Category::new(""), None);
        assert_eq!(Category::new(" \n\t "), None);
    }

    #[test]
    fn test_default_parser_keeps_text_verbatim() {
        let parser = ResponseParser::default();
        let category = parser.parse("<think>hmm</think>\nSpam").unwrap();
        assert_eq!(category.as_str(), "<think>hmm</think>\nSpam");
    }

    #[test]
    fn test_reasoning_blocks_are_stripped() {
        let parser = ResponseParser::new(true);
        let response = "<think>\nThe user mentions lunch.\nProbably social.\n</think>\n\nSocial\n";
        assert_eq!(parser.parse(response).unwrap().as_str(), "Social");
    }

    #[test]
    fn test_unterminated_reasoning_yields_nothing() {
        let parser = ResponseParser::new(true);
        assert_eq!(parser.parse("<think>still going"), None);
    }
}
