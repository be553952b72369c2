// spoofer-cli/src/main.rs
//
// Entry point for the Spoofer command-line tool.
//
// Responsibilities:
// - Parsing command-line arguments.
// - Setting up logging (env_logger, or log4rs with --log-dir).
// - Dispatching to the `export` or `check` command.
// - Mapping errors to a non-zero exit code.

use clap::Parser;
use spoofer_cli::{Cli, Commands, logging, run_check, run_export, terminal};
use std::process;

fn main() {
    let cli = Cli::parse();

    terminal::set_color(console::colors_enabled());

    let log_path = match logging::init_logging(cli.global.verbose, cli.global.log_dir.as_deref()) {
        Ok(path) => path,
        Err(e) => {
            terminal::print_error(&e.to_string());
            process::exit(1);
        }
    };
    if let Some(path) = &log_path {
        log::info!("Logging to {}", path.display());
    }
    log::debug!("Run started: {}", chrono::Local::now());

    let result = match cli.command {
        Commands::Export(args) => run_export(args, &cli.global),
        Commands::Check => run_check(&cli.global),
    };

    if let Err(e) = result {
        log::error!("{e}");
        terminal::print_error(&e.to_string());
        process::exit(1);
    }
    log::debug!("Run finished: {}", chrono::Local::now());
}
