pub struct DefaultConfig;

impl DefaultConfig {
    /// Contents written by `textclass init`. Must deserialize to
    /// `Settings::default()`.
    pub fn create_default_config_file() -> String {
        r#"[backend]
base_url = "http://localhost:11434"
model = "deepseek-r1:1.5b"
timeout_secs = 120
# temperature = 0.0

[prompt]
# Replaces the built-in instructions. Must contain {input_text}.
# template = """Classify this email as Work, Personal, Spam or Other.
#
# Text: {input_text}
# Category:"""
strip_reasoning = false

[output]
use_colors = true
"#
        .to_string()
    }
}
