pub mod defaults;
pub mod settings;

pub use defaults::DefaultConfig;
pub use settings::{BackendConfig, OutputConfig, PromptConfig, Settings};
