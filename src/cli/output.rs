use console::{style, Color};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::ai::{Category, FAILURE_SENTINEL};

pub const BLANK_INPUT_WARNING: &str = "Please enter some text for classification.";
pub const CLASSIFY_FAILED: &str = "An error occurred while classifying the text.";
pub const CLASSIFY_COMPLETE: &str = "Classification Complete!";

pub struct OutputFormatter {
    use_colors: bool,
}

/// Spinner on stderr while a request is in flight. Hidden when stderr is
/// not a terminal.
pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    pub fn new(message: &str) -> Self {
        let bar = if console::Term::stderr().is_term() {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };

        if let Ok(spinner_style) = ProgressStyle::with_template("{spinner} {msg}") {
            bar.set_style(
                spinner_style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", ""]),
            );
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    pub fn stop(self) {
        self.bar.finish_and_clear();
    }
}

impl OutputFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    pub fn format_category(&self, category: &Category) -> String {
        format!(
            "{}\n{} {}",
            self.format_success(CLASSIFY_COMPLETE),
            self.style_bold("Category:"),
            self.style_text(category.as_str(), Color::Cyan)
        )
    }

    pub fn format_failure(&self) -> String {
        format!(
            "{}\n{} {}",
            self.format_error(CLASSIFY_FAILED),
            self.style_bold("Category:"),
            FAILURE_SENTINEL
        )
    }

    pub fn format_error(&self, message: &str) -> String {
        format!("{} {}", self.style_text("Error:", Color::Red), message)
    }

    pub fn format_success(&self, message: &str) -> String {
        format!("{} {}", self.style_text("✓", Color::Green), message)
    }

    pub fn format_warning(&self, message: &str) -> String {
        format!("{} {}", self.style_text("⚠", Color::Yellow), message)
    }

    pub fn format_info(&self, message: &str) -> String {
        format!("{} {}", self.style_text("ℹ", Color::Blue), message)
    }

    fn style_text(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            style(text).fg(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn style_bold(&self, text: &str) -> String {
        if self.use_colors {
            style(text).bold().to_string()
        } else {
            text.to_string()
        }
    }
}
