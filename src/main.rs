use anyhow::Result;
use clap::Parser;
use log::error;
use std::io::IsTerminal;

use textclass::cli::{read_input, ClassifyOutcome, InputSource};
use textclass::{Cli, CommandHandler};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Errors only unless asked for more; RUST_LOG still applies
    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Error
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let handler = match CommandHandler::new(&cli) {
        Ok(h) => h,
        Err(e) => {
            error!("Failed to initialize textclass: {e:#}");
            eprintln!("Error: Failed to initialize textclass: {e:#}");
            eprintln!("Check your configuration with 'textclass config'.");
            std::process::exit(1);
        }
    };

    if let Some(command) = cli.command.clone() {
        match handler.handle_command(command).await {
            Ok(output) => println!("{output}"),
            Err(e) => {
                error!("Command failed: {e:#}");
                eprintln!("{}", handler.format_error(&format!("{e:#}")));
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    let succeeded = match cli.input_source(std::io::stdin().is_terminal()) {
        InputSource::Interactive => match handler.run_interactive().await {
            Ok(all_ok) => all_ok,
            Err(e) => {
                eprintln!("{}", handler.format_error(&format!("{e:#}")));
                false
            }
        },
        source => match read_input(&source) {
            Ok(text) => {
                let outcome = handler.classify_input(&text).await;
                let rendered = handler.format_outcome(&outcome);
                if matches!(outcome, ClassifyOutcome::Rejected) {
                    eprintln!("{rendered}");
                } else {
                    println!("{rendered}");
                }
                outcome.is_success()
            }
            Err(e) => {
                eprintln!("{}", handler.format_error(&format!("{e:#}")));
                false
            }
        },
    };

    if !succeeded {
        std::process::exit(1);
    }

    Ok(())
}
