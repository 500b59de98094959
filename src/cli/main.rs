//! Command-line interface entry point for `gpacalc`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use gpa_ledger::config::Config;
use gpa_ledger::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};
use gpa_ledger::{debug, info};

#[tokio::main]
async fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag overrides config logging.level; fallback warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| config.logging.level.parse().ok())
        .unwrap_or(Level::Warn);
    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }
    set_level(level);

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }

    // File logging: CLI flag wins, otherwise config logging.file if set
    let config_log_path = (!config.logging.file.is_empty())
        .then(|| std::path::PathBuf::from(&config.logging.file));
    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            info!("File logging initialized at: {display_path}");
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }
    debug!("gpacalc v{} starting", gpa_ledger::get_version());

    let precision = config.display.precision;
    let result = match args.command {
        Command::Config { subcommand } => commands::config::run(subcommand, &mut config, &defaults),
        Command::Add {
            course,
            credits,
            grade,
        } => {
            let mut ledger = commands::courses::open_ledger(&config).await;
            commands::courses::add(&mut ledger, &course, &credits, &grade, precision).await
        }
        Command::Delete { id } => {
            let mut ledger = commands::courses::open_ledger(&config).await;
            commands::courses::delete(&mut ledger, id, precision).await;
            Ok(())
        }
        Command::List => {
            let ledger = commands::courses::open_ledger(&config).await;
            commands::courses::list(&ledger, precision);
            Ok(())
        }
        Command::Gpa => {
            let ledger = commands::courses::open_ledger(&config).await;
            commands::courses::gpa(&ledger, precision);
            Ok(())
        }
        Command::Form => {
            let mut ledger = commands::courses::open_ledger(&config).await;
            let stdin = std::io::stdin();
            commands::form::run_session(&mut ledger, stdin.lock(), std::io::stdout(), precision)
                .await
                .map(|added| info!("Form session added {added} course(s)"))
                .map_err(|e| format!("✗ Form input failed: {e}"))
        }
    };

    if let Err(message) = result {
        eprintln!("{message}");
        std::process::exit(1);
    }
}
