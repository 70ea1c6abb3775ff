use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "textclass")]
#[command(about = "Classify emails and free-form text into categories using a local model")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct Cli {
    /// Text to classify. Use "-" to read from stdin
    pub text: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Read the text to classify from a file
    #[arg(short, long, value_name = "PATH", conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// Configuration file [default: ~/.textclass/config.toml]
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Model to use instead of the configured one
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    /// Ollama server URL instead of the configured one
    #[arg(long, global = true, value_name = "URL")]
    pub host: Option<String>,

    /// Disable coloured output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Write a default config and make sure the model is installed
    Init,
    /// Show configuration
    Config,
    /// Run diagnostics
    Doctor,
    /// Show version information
    Version,
}

/// Where the text to classify comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Text(String),
    File(PathBuf),
    Stdin,
    Interactive,
}

impl Cli {
    /// `stdin_is_terminal` decides between piped input and an interactive
    /// session when nothing was given on the command line.
    pub fn input_source(&self, stdin_is_terminal: bool) -> InputSource {
        match (&self.text, &self.file) {
            (_, Some(path)) => InputSource::File(path.clone()),
            (Some(text), None) if text == "-" => InputSource::Stdin,
            (Some(text), None) => InputSource::Text(text.clone()),
            (None, None) if stdin_is_terminal => InputSource::Interactive,
            (None, None) => InputSource::Stdin,
        }
    }
}
