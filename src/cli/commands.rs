use anyhow::{Context, Result};
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use log::{debug, info, warn};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::ai::{
    BackendFailure, Category, ClassificationRequest, Classifier, OllamaClient, ResponseParser,
    TextGenerator,
};
use crate::cli::{Cli, Commands, InputSource, OutputFormatter, Spinner, BLANK_INPUT_WARNING};
use crate::config::Settings;

/// What happened to one piece of user input.
#[derive(Debug)]
pub enum ClassifyOutcome {
    /// Blank input; the backend was never called.
    Rejected,
    Classified(Category),
    Failed(BackendFailure),
}

impl ClassifyOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Classified(_))
    }
}

pub struct CommandHandler<G = OllamaClient> {
    classifier: Classifier<G>,
    settings: Settings,
    config_path: PathBuf,
    formatter: OutputFormatter,
}

impl CommandHandler<OllamaClient> {
    /// Loads configuration, applies command-line overrides and connects the
    /// classifier to Ollama.
    pub fn new(cli: &Cli) -> Result<Self> {
        let config_path = match &cli.config {
            Some(path) => path.clone(),
            None => Settings::default_config_path()?,
        };

        let mut settings = Settings::load_from(&config_path)?;
        if let Some(model) = &cli.model {
            settings.backend.model = model.clone();
        }
        if let Some(host) = &cli.host {
            settings.backend.base_url = host.clone();
        }
        if cli.no_color {
            settings.output.use_colors = false;
        }

        let client = OllamaClient::new(&settings.backend)?;
        Self::with_generator(settings, config_path, client)
    }

    pub async fn handle_command(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Init => self.handle_init().await,
            Commands::Config => self.handle_config(),
            Commands::Doctor => Ok(self.handle_doctor().await),
            Commands::Version => Ok(Self::handle_version()),
        }
    }

    async fn handle_init(&self) -> Result<String> {
        info!("Initializing textclass");
        let mut messages = Vec::new();

        if Settings::write_default(&self.config_path)? {
            messages.push(self.formatter.format_success(&format!(
                "Wrote default configuration to {}",
                self.config_path.display()
            )));
        } else {
            messages.push(self.formatter.format_info(&format!(
                "Keeping existing configuration at {}",
                self.config_path.display()
            )));
        }

        let client = self.classifier.generator();
        if let Err(e) = client.verify_connection().await {
            messages.push(self.formatter.format_warning(&format!(
                "Ollama service not available: {e}. Make sure Ollama is installed and running."
            )));
            return Ok(messages.join("\n"));
        }

        let spinner = Spinner::new(&format!("Checking model {}...", client.model_name()));
        let pulled = client.ensure_model_available().await;
        spinner.stop();

        match pulled {
            Ok(true) => messages.push(
                self.formatter
                    .format_success(&format!("Pulled model {}", client.model_name())),
            ),
            Ok(false) => messages.push(
                self.formatter
                    .format_success(&format!("Model {} is installed", client.model_name())),
            ),
            Err(e) => messages.push(self.formatter.format_warning(&format!(
                "Could not install model {}: {e}",
                client.model_name()
            ))),
        }

        Ok(messages.join("\n"))
    }

    async fn handle_doctor(&self) -> String {
        let spinner = Spinner::new("Running diagnostics...");
        let client = self.classifier.generator();
        let mut diagnostics = Vec::new();

        if self.config_path.exists() {
            diagnostics.push(format!("✓ Config file {}", self.config_path.display()));
        } else {
            diagnostics.push(format!(
                "✗ Config file {} missing, using defaults (run: textclass init)",
                self.config_path.display()
            ));
        }

        match client.verify_connection().await {
            Ok(version) => {
                diagnostics.push(format!(
                    "✓ Ollama {version} running at {}",
                    client.base_url()
                ));

                match client.has_model().await {
                    Ok(true) => diagnostics.push(format!("✓ Model {} installed", client.model_name())),
                    Ok(false) => diagnostics.push(format!(
                        "✗ Model {} missing (run: ollama pull {})",
                        client.model_name(),
                        client.model_name()
                    )),
                    Err(e) => diagnostics.push(format!("✗ Could not list models: {e}")),
                }
            }
            Err(e) => diagnostics.push(format!(
                "✗ Ollama service at {}: {e}",
                client.base_url()
            )),
        }

        spinner.stop();
        format!("textclass health check:\n{}", diagnostics.join("\n"))
    }

    fn handle_version() -> String {
        format!(
            "textclass {}\nRust version: {}\nPlatform: {}-{}",
            env!("CARGO_PKG_VERSION"),
            env!("TEXTCLASS_RUSTC_VERSION"),
            std::env::consts::OS,
            std::env::consts::ARCH
        )
    }
}

impl<G: TextGenerator> CommandHandler<G> {
    pub fn with_generator(settings: Settings, config_path: PathBuf, generator: G) -> Result<Self> {
        let template = settings.prompt_template()?;
        let classifier = Classifier::new(template, generator)
            .with_parser(ResponseParser::new(settings.prompt.strip_reasoning));
        let formatter = OutputFormatter::new(settings.output.use_colors);

        Ok(Self {
            classifier,
            settings,
            config_path,
            formatter,
        })
    }

    pub fn classifier(&self) -> &Classifier<G> {
        &self.classifier
    }

    /// Rejects blank input, otherwise runs one classification.
    pub async fn classify_input(&self, input: &str) -> ClassifyOutcome {
        let request = ClassificationRequest::new(input);
        if !request.is_dispatchable() {
            debug!("Rejected blank input");
            return ClassifyOutcome::Rejected;
        }

        let spinner = Spinner::new("Classifying text...");
        let result = self.classifier.classify_request(&request).await;
        spinner.stop();

        match result {
            Ok(category) => ClassifyOutcome::Classified(category),
            Err(e) => {
                // Logged below the default level; output shows only the notice
                warn!("Classification error: {e}");
                ClassifyOutcome::Failed(e)
            }
        }
    }

    pub fn format_outcome(&self, outcome: &ClassifyOutcome) -> String {
        match outcome {
            ClassifyOutcome::Rejected => self.formatter.format_warning(BLANK_INPUT_WARNING),
            ClassifyOutcome::Classified(category) => self.formatter.format_category(category),
            ClassifyOutcome::Failed(_) => self.formatter.format_failure(),
        }
    }

    /// Prompts for text on the terminal until the user stops. Returns
    /// whether every classification succeeded.
    pub async fn run_interactive(&self) -> Result<bool> {
        self.run_session(&mut TerminalPrompter::default()).await
    }

    pub async fn run_session<P: Prompter>(&self, prompter: &mut P) -> Result<bool> {
        let mut all_ok = true;

        loop {
            let text = prompter.read_text()?;

            let outcome = self.classify_input(&text).await;
            all_ok &= outcome.is_success();
            prompter.show(&self.format_outcome(&outcome));

            if !prompter.another()? {
                return Ok(all_ok);
            }
        }
    }

    pub fn handle_config(&self) -> Result<String> {
        let backend = &self.settings.backend;
        let config_state = if self.config_path.exists() {
            ""
        } else {
            " (not found, using defaults)"
        };

        let mut config_info = format!(
            "textclass configuration:\n\
            - Config file: {}{}\n\
            - Ollama URL: {}\n\
            - Model: {}\n\
            - Timeout: {}s\n\
            - Temperature: {}\n\
            - Strip reasoning: {}\n\
            - Use colors: {}\n\n",
            self.config_path.display(),
            config_state,
            backend.base_url,
            backend.model,
            backend.timeout_secs,
            backend
                .temperature
                .map_or_else(|| "model default".to_string(), |t| t.to_string()),
            self.settings.prompt.strip_reasoning,
            self.settings.output.use_colors
        );

        config_info.push_str("Prompt template:\n");
        config_info.push_str(self.classifier.template().as_str());

        Ok(config_info)
    }

    pub fn format_error(&self, message: &str) -> String {
        self.formatter.format_error(message)
    }
}

/// Question-and-answer side of an interactive session.
pub trait Prompter {
    fn read_text(&mut self) -> Result<String>;
    fn show(&mut self, rendered: &str);
    /// Whether to classify another text.
    fn another(&mut self) -> Result<bool>;
}

#[derive(Default)]
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl Prompter for TerminalPrompter {
    fn read_text(&mut self) -> Result<String> {
        Input::with_theme(&self.theme)
            .with_prompt("Enter your email or text content for classification")
            .allow_empty(true)
            .interact_text()
            .context("Failed to read input")
    }

    fn show(&mut self, rendered: &str) {
        println!("{rendered}");
    }

    fn another(&mut self) -> Result<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt("Classify another text?")
            .default(true)
            .interact()
            .context("Failed to read input")
    }
}

/// Reads non-interactive input.
pub fn read_input(source: &InputSource) -> Result<String> {
    match source {
        InputSource::Text(text) => Ok(text.clone()),
        InputSource::File(path) => read_file(path),
        InputSource::Stdin => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            Ok(buffer)
        }
        InputSource::Interactive => Err(anyhow::anyhow!(
            "interactive input is read by the interactive session"
        )),
    }
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
