use std::time::SystemTime;

use log::LevelFilter;

use crate::config::LoggingConfig;

/// installs the global logger: every line goes to stdout and to the configured log file.
///
/// An unknown level name falls back to `info`
pub fn setup_logger(config: &LoggingConfig) -> Result<(), fern::InitError> {
    let level = parse_level(&config.level);
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                humantime::format_rfc3339_seconds(SystemTime::now()),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        // sqlite's own chatter isn't interesting unless something is broken
        .level_for("rusqlite", LevelFilter::Warn)
        .chain(std::io::stdout())
        .chain(fern::log_file(&config.file)?)
        .apply()?;
    log::debug!("Logging at {level} to stdout and {}", config.file);
    Ok(())
}

fn parse_level(level: &str) -> LevelFilter {
    level.parse().unwrap_or_else(|_| {
        eprintln!("{level} is not a log level, using info");
        LevelFilter::Info
    })
}
