//! Process-wide logger
//!
//! The global logger is installed at most once. Call [`try_init`] at startup
//! to surface configuration errors; the free functions below fall back to
//! initializing from the environment on first use.

use std::sync::OnceLock;

use tiologger_errors::{LogError, Result};

use crate::config::LoggerConfig;
use crate::field::Field;
use crate::level::Level;
use crate::logger::Logger;

static GLOBAL: OnceLock<Logger> = OnceLock::new();

/// Build the global logger from the environment and install it
///
/// Returns the already-installed logger if one exists.
///
/// # Errors
///
/// Returns [`LogError::OpenOutput`] if `LOG_OUTPUT` names a file that cannot
/// be opened.
pub fn try_init() -> Result<&'static Logger> {
    if let Some(logger) = GLOBAL.get() {
        return Ok(logger);
    }
    let logger = Logger::from_env()?;
    Ok(GLOBAL.get_or_init(|| logger))
}

/// Install a logger built from `config`
///
/// # Errors
///
/// Returns [`LogError::AlreadyInitialized`] if a global logger is already
/// installed, including one installed by a concurrent caller after `config`
/// was built. Returns [`LogError::OpenOutput`] if an output cannot be opened.
pub fn init_with(config: &LoggerConfig) -> Result<&'static Logger> {
    if GLOBAL.get().is_some() {
        return Err(LogError::AlreadyInitialized);
    }
    let logger = Logger::build(config)?;
    let mut installed = false;
    let current = GLOBAL.get_or_init(|| {
        installed = true;
        logger
    });
    if installed {
        Ok(current)
    } else {
        Err(LogError::AlreadyInitialized)
    }
}

/// The global logger, initialized from the environment on first use
///
/// # Panics
///
/// Panics if the logger has not been installed and cannot be built from the
/// environment.
pub fn get_logger() -> &'static Logger {
    match try_init() {
        Ok(logger) => logger,
        Err(err) => panic!("tiologger: cannot initialize logger: {err}"),
    }
}

pub fn log(level: Level, msg: &str, fields: &[Field]) {
    get_logger().log(level, msg, fields);
}

pub fn debug(msg: &str, fields: &[Field]) {
    get_logger().debug(msg, fields);
}

pub fn info(msg: &str, fields: &[Field]) {
    get_logger().info(msg, fields);
}

pub fn warn(msg: &str, fields: &[Field]) {
    get_logger().warn(msg, fields);
}

pub fn error(msg: &str, err: &(dyn std::error::Error + '_), fields: &[Field]) {
    get_logger().error(msg, err, fields);
}

pub fn critical(msg: &str, err: &(dyn std::error::Error + '_), fields: &[Field]) {
    get_logger().critical(msg, err, fields);
}

/// # Panics
///
/// Panics under the development profile.
pub fn dpanic(msg: &str, err: &(dyn std::error::Error + '_), fields: &[Field]) {
    get_logger().dpanic(msg, err, fields);
}

/// # Panics
///
/// Always panics with `msg` after writing.
pub fn panic(msg: &str, err: &(dyn std::error::Error + '_), fields: &[Field]) -> ! {
    get_logger().panic(msg, err, fields)
}

pub fn print(args: std::fmt::Arguments<'_>) {
    get_logger().print(args);
}
