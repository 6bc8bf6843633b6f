// FILE: crates/cli/src/main.rs

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgGroup, ArgMatches, Command};
use shelfkeeper_catalog::{CatalogEngine, RebuildSummary};
use shelfkeeper_config::{
    Config, ConfigError, ConfigManager, IoConfig, LogLevel, LoggingConfig, StripConfig,
};
use std::path::PathBuf;
use std::process::ExitCode;

mod io;
mod logging;

fn build_cli() -> Command {
    Command::new("shelfkeeper")
        .version(env!("CARGO_PKG_VERSION"))
        .author("DrTomLLC")
        .about("Rebuild the collections of a Sony PRS-505 catalog from the book folders")
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Read xml from FILE (if - then read from stdin) [default: -]"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Write xml to FILE (if - then write to stdout) [default: -]"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Be quiet")
                .action(ArgAction::SetTrue)
                .conflicts_with("verbose"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Make more noise")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Read settings from FILE instead of the user config file"),
        )
        .arg(
            Arg::new("no-backup")
                .long("no-backup")
                .help("Do not copy an existing output file to <FILE>.bak")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("strip-dir")
                .long("strip-dir")
                .value_name("DIR")
                .help("Strip DIR from path")
                .help_heading("Strip Options"),
        )
        .arg(
            Arg::new("strip-last")
                .long("strip-last")
                .value_name("WORD")
                .help("Strip path to last WORD")
                .help_heading("Strip Options"),
        )
        .arg(
            Arg::new("strip-first")
                .long("strip-first")
                .value_name("WORD")
                .help("Strip path to first WORD")
                .help_heading("Strip Options"),
        )
        .group(
            ArgGroup::new("strip")
                .args(["strip-dir", "strip-last", "strip-first"])
                .multiple(false),
        )
}

/// Settings given on the command line, as the top layer of the config chain
fn cli_overrides(matches: &ArgMatches) -> Config {
    let level = if matches.get_flag("quiet") {
        Some(LogLevel::Error)
    } else if matches.get_flag("verbose") {
        Some(LogLevel::Debug)
    } else {
        None
    };

    Config {
        io: IoConfig {
            input: matches.get_one::<PathBuf>("input").cloned(),
            output: matches.get_one::<PathBuf>("output").cloned(),
            backup: matches.get_flag("no-backup").then_some(false),
        },
        strip: StripConfig {
            strip_dir: matches.get_one::<String>("strip-dir").cloned(),
            strip_first: matches.get_one::<String>("strip-first").cloned(),
            strip_last: matches.get_one::<String>("strip-last").cloned(),
        },
        logging: LoggingConfig { level },
        ..Default::default()
    }
}

/// Loads the config file named by `--config`, or the user config file
fn load_file_config(path: Option<&PathBuf>) -> Result<Config> {
    let manager = match path {
        Some(path) => ConfigManager::from_file(path.clone()),
        None => ConfigManager::new()?,
    };
    manager
        .load()
        .with_context(|| format!("Failed to load config {}", manager.config_path().display()))
}

fn run(config: &Config) -> Result<RebuildSummary> {
    config.validate().map_err(ConfigError::from)?;
    let engine = CatalogEngine::new(config.strip_strategy()?);
    log::debug!("Using {}", engine.strategy());

    let input = io::open_input(config.io.input_path())?;
    let transform = |out: &mut dyn std::io::Write| {
        engine
            .transform(input, out)
            .context("Failed to rebuild catalog")
    };

    match config.io.output_path() {
        Some(path) => io::write_atomically(path, config.io.backup_enabled(), transform),
        None => io::write_stdout(transform),
    }
}

fn main() -> ExitCode {
    let matches = build_cli().get_matches();

    let explicit_config = matches.get_one::<PathBuf>("config");

    let mut config = Config::default();
    let file_error = match load_file_config(explicit_config) {
        Ok(file_config) => {
            config.merge(file_config);
            None
        }
        Err(e) => Some(e),
    };
    config.merge(cli_overrides(&matches));

    logging::init(config.logging.level());

    // A broken user config file only costs its settings; a file named on the
    // command line has to load.
    let result = match file_error {
        Some(e) if explicit_config.is_some() => Err(e),
        Some(e) => {
            log::warn!("{:#}; using defaults", e);
            run(&config)
        }
        None => run(&config),
    };

    match result {
        Ok(summary) => {
            log::info!(
                "Done: {} books, {} attributes indexed, {} collections removed, {} created",
                summary.books,
                summary.indexed_attributes,
                summary.removed_playlists,
                summary.created_playlists
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
