pub mod ai;
pub mod cli;
pub mod config;

pub use ai::{BackendFailure, Category, Classifier, OllamaClient, PromptTemplate, TextGenerator};
pub use cli::{Cli, CommandHandler, Commands};
pub use config::Settings;
