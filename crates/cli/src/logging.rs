//! Log output for the command-line tool

use shelfkeeper_config::LogLevel;
use std::io::Write;

/// Installs the global logger writing `   LEVEL: message` lines to stderr.
///
/// `RUST_LOG` takes precedence over `level` when set.
pub fn init(level: LogLevel) {
    let env = env_logger::Env::default().default_filter_or(level.to_string());
    let result = env_logger::Builder::from_env(env)
        .format(|buf, record| writeln!(buf, "{}", format_line(record.level(), record.args())))
        .try_init();

    if let Err(e) = result {
        eprintln!("Logger already initialized: {}", e);
    }
}

fn format_line(level: log::Level, message: impl std::fmt::Display) -> String {
    format!("{:>8}: {}", level, message)
}
