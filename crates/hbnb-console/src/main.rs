use std::io::{self, IsTerminal};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use hbnb_console::cli::Cli;
use hbnb_console::{ConsoleConfig, Interpreter};
use hbnb_store::Storage;
use tracing::{info, Level};

fn main() -> ExitCode {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = ConsoleConfig::from_cli(&cli)?;
    let storage = Storage::open(&config.store)
        .with_context(|| format!("cannot load {}", config.store.file_path.display()))?;
    info!(
        file = %config.store.file_path.display(),
        objects = storage.count(None),
        "store loaded"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let interactive = stdin.is_terminal() && !cli.no_prompt;
    let color = stdin.is_terminal() && stdout.is_terminal();

    let mut interpreter = Interpreter::new(storage, stdout.lock())
        .with_prompt(config.prompt, interactive)
        .with_color(color);
    interpreter.run(stdin.lock())?;
    Ok(())
}
