pub mod args;
pub mod commands;
pub mod output;

pub use args::{Cli, Commands, InputSource};
pub use commands::{read_input, ClassifyOutcome, CommandHandler, Prompter, TerminalPrompter};
pub use output::{OutputFormatter, Spinner, BLANK_INPUT_WARNING};
