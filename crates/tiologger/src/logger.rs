//! The logger handle
//!
//! A [`Logger`] is immutable once built and cheap to clone; clones share the
//! same sinks and failure counter.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Local;
use tiologger_core_types::schema::{LABEL_CRITICAL, LABEL_DPANIC, LABEL_ERROR, LABEL_PANIC};
use tiologger_errors::{LogError, Result};

use crate::config::LoggerConfig;
use crate::field::Field;
use crate::level::{Level, Profile};
use crate::record::{format_time, Record};
use crate::sink::Sink;

#[derive(Clone)]
pub struct Logger {
    inner: Arc<Inner>,
}

struct Inner {
    level: Level,
    profile: Profile,
    sink: Sink,
    error_sink: Option<Sink>,
    write_failures: AtomicU64,
}

impl Logger {
    /// Build a logger from explicit settings
    ///
    /// # Errors
    ///
    /// Returns [`LogError::OpenOutput`] if the output or error output cannot
    /// be opened.
    pub fn build(config: &LoggerConfig) -> Result<Self> {
        let sink = Sink::open(&config.output)?;
        let error_sink = Sink::open_error_output(&config.error_output)?;
        Ok(Self::from_sinks(config.level, config.profile, sink, error_sink))
    }

    /// Build a logger from `LOG_LEVEL`, `LOG_OUTPUT` and `LOG_PROFILE`
    ///
    /// # Errors
    ///
    /// Returns [`LogError::OpenOutput`] if `LOG_OUTPUT` names a file that
    /// cannot be opened.
    pub fn from_env() -> Result<Self> {
        Self::build(&LoggerConfig::from_env())
    }

    pub fn from_sinks(level: Level, profile: Profile, sink: Sink, error_sink: Option<Sink>) -> Self {
        Self {
            inner: Arc::new(Inner {
                level,
                profile,
                sink,
                error_sink,
                write_failures: AtomicU64::new(0),
            }),
        }
    }

    pub fn level(&self) -> Level {
        self.inner.level
    }

    pub fn profile(&self) -> Profile {
        self.inner.profile
    }

    pub fn output_name(&self) -> &str {
        self.inner.sink.name()
    }

    pub fn enabled(&self, level: Level) -> bool {
        level >= self.inner.level
    }

    /// Number of records lost to write or flush failures
    pub fn write_failures(&self) -> u64 {
        self.inner.write_failures.load(Ordering::Relaxed)
    }

    /// Encode and write one record if `level` is enabled
    ///
    /// # Errors
    ///
    /// Returns the encoding or sink error. Unlike the leveled methods, the
    /// failure is not counted or reported.
    pub fn write_record(
        &self,
        level: Level,
        msg: &str,
        fields: &[Field],
        named_error: Option<&Field>,
    ) -> Result<()> {
        if !self.enabled(level) {
            return Ok(());
        }
        let line = Record::new(level, msg, fields)
            .with_named_error(named_error)
            .encode()?;
        self.inner.sink.write_line(&line)
    }

    /// Write at an arbitrary level with no panic behaviour
    pub fn log(&self, level: Level, msg: &str, fields: &[Field]) {
        self.emit(level, msg, fields, None);
    }

    pub fn debug(&self, msg: &str, fields: &[Field]) {
        self.emit(Level::Debug, msg, fields, None);
    }

    pub fn info(&self, msg: &str, fields: &[Field]) {
        self.emit(Level::Info, msg, fields, None);
    }

    pub fn warn(&self, msg: &str, fields: &[Field]) {
        self.emit(Level::Warn, msg, fields, None);
    }

    /// Write at `Error` with `err` under the `ERROR` key
    pub fn error(&self, msg: &str, err: &(dyn std::error::Error + '_), fields: &[Field]) {
        let named = Field::named_error(LABEL_ERROR, err);
        self.emit(Level::Error, msg, fields, Some(&named));
    }

    /// Write at `Error` with `err` under the `CRITICAL` key
    pub fn critical(&self, msg: &str, err: &(dyn std::error::Error + '_), fields: &[Field]) {
        let named = Field::named_error(LABEL_CRITICAL, err);
        self.emit(Level::Error, msg, fields, Some(&named));
    }

    /// Write at `DPanic`, then panic if the profile is development
    ///
    /// # Panics
    ///
    /// Panics with `msg` under [`Profile::Development`], whether or not the
    /// record itself was enabled.
    pub fn dpanic(&self, msg: &str, err: &(dyn std::error::Error + '_), fields: &[Field]) {
        let named = Field::named_error(LABEL_DPANIC, err);
        self.emit(Level::DPanic, msg, fields, Some(&named));
        if self.inner.profile.is_development() {
            panic!("{msg}");
        }
    }

    /// Write at `Panic`, then panic
    ///
    /// # Panics
    ///
    /// Always panics with `msg`, even when `Panic` is below the configured
    /// level and nothing was written.
    pub fn panic(&self, msg: &str, err: &(dyn std::error::Error + '_), fields: &[Field]) -> ! {
        let named = Field::named_error(LABEL_PANIC, err);
        self.emit(Level::Panic, msg, fields, Some(&named));
        panic!("{msg}");
    }

    /// Write preformatted arguments at `Info`
    ///
    /// ```
    /// # use tiologger::{Level, Logger, Profile, Sink};
    /// # let logger = Logger::from_sinks(Level::Info, Profile::Production, Sink::stdout(), None);
    /// logger.print(format_args!("retrying in {}s", 5));
    /// ```
    pub fn print(&self, args: fmt::Arguments<'_>) {
        match args.as_str() {
            Some(msg) => self.info(msg, &[]),
            None => self.info(&args.to_string(), &[]),
        }
    }

    fn emit(&self, level: Level, msg: &str, fields: &[Field], named_error: Option<&Field>) {
        if let Err(err) = self.write_record(level, msg, fields, named_error) {
            self.report_failure(&err);
        }
    }

    fn report_failure(&self, err: &LogError) {
        self.inner.write_failures.fetch_add(1, Ordering::Relaxed);
        if let Some(error_sink) = &self.inner.error_sink {
            let line = format!("{} write error: {}\n", format_time(&Local::now()), err);
            // nowhere left to report a failing error output
            let _ = error_sink.write_line(line.as_bytes());
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.inner.level)
            .field("profile", &self.inner.profile)
            .field("output", &self.inner.sink.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::{CaptureBuffer, FailingWriter};
    use crate::tags;
    use std::io;

    fn capture_logger(level: Level, profile: Profile) -> (Logger, CaptureBuffer) {
        let buffer = CaptureBuffer::new();
        let logger = Logger::from_sinks(
            level,
            profile,
            Sink::from_writer("capture", buffer.clone()),
            None,
        );
        (logger, buffer)
    }

    #[test]
    fn test_records_below_level_are_dropped() {
        let (logger, buffer) = capture_logger(Level::Warn, Profile::Production);

        logger.debug("d", &[]);
        logger.info("i", &[]);
        logger.warn("w", &[]);

        let records = buffer.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["msg"], "w");
        assert_eq!(records[0]["level"], "warn");
    }

    #[test]
    fn test_debug_writes_at_debug() {
        let (logger, buffer) = capture_logger(Level::Debug, Profile::Production);
        logger.debug("tick", &tags![attempt = 1]);

        let records = buffer.records();
        assert_eq!(records[0]["level"], "debug");
        assert_eq!(records[0]["attempt"], 1);
    }

    #[test]
    fn test_error_and_critical_share_level() {
        let (logger, buffer) = capture_logger(Level::Error, Profile::Production);
        let err = io::Error::other("disk full");

        logger.error("save failed", &err, &[]);
        logger.critical("save failed", &err, &[]);

        let records = buffer.records();
        assert_eq!(records[0]["level"], "error");
        assert_eq!(records[0]["ERROR"], "disk full");
        assert_eq!(records[1]["level"], "error");
        assert_eq!(records[1]["CRITICAL"], "disk full");
        assert!(records[1].get("ERROR").is_none());
    }

    #[test]
    fn test_dpanic_logs_only_in_production() {
        let (logger, buffer) = capture_logger(Level::Debug, Profile::Production);
        logger.dpanic("unexpected state", &io::Error::other("bad"), &[]);

        let records = buffer.records();
        assert_eq!(records[0]["level"], "dpanic");
        assert_eq!(records[0]["D-PANIC"], "bad");
    }

    #[test]
    fn test_print_formats_at_info() {
        let (logger, buffer) = capture_logger(Level::Info, Profile::Production);
        logger.print(format_args!("retrying in {}s", 5));
        logger.print(format_args!("plain"));

        let records = buffer.records();
        assert_eq!(records[0]["msg"], "retrying in 5s");
        assert_eq!(records[0]["level"], "info");
        assert_eq!(records[1]["msg"], "plain");
    }

    #[test]
    fn test_write_record_returns_sink_error() {
        let logger = Logger::from_sinks(
            Level::Info,
            Profile::Production,
            Sink::from_writer("broken", FailingWriter::on_write()),
            None,
        );

        let result = logger.write_record(Level::Info, "lost", &[], None);
        assert!(matches!(result, Err(LogError::Write(_))));
        assert_eq!(logger.write_failures(), 0);

        assert!(logger.write_record(Level::Debug, "filtered", &[], None).is_ok());
    }

    #[test]
    fn test_clones_share_failure_counter() {
        let logger = Logger::from_sinks(
            Level::Info,
            Profile::Production,
            Sink::from_writer("broken", FailingWriter::on_flush()),
            None,
        );
        let clone = logger.clone();

        clone.info("lost", &[]);
        assert_eq!(logger.write_failures(), 1);
    }

    #[test]
    fn test_debug_format_names_output() {
        let (logger, _buffer) = capture_logger(Level::Info, Profile::Development);
        let rendered = format!("{:?}", logger);
        assert!(rendered.contains("capture"));
        assert!(rendered.contains("Development"));
    }
}
