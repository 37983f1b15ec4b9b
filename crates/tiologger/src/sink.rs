//! Output sinks
//!
//! A sink wraps a `tracing_subscriber` [`MakeWriter`]. Each record asks for a
//! fresh writer, writes its whole line and flushes before the writer is
//! dropped. Owned writers such as files sit behind a [`LockedWriter`], so
//! lines from concurrent callers never interleave.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tiologger_errors::{LogError, Result};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;

use crate::config::{ErrorOutput, OutputTarget};

/// `MakeWriter` handing out exclusive access to one owned writer
///
/// A writer that panicked mid-record poisons the lock; the next record
/// recovers it, since every record is written and flushed as a unit.
pub struct LockedWriter<W> {
    inner: Mutex<W>,
}

impl<W: Write> LockedWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            inner: Mutex::new(writer),
        }
    }
}

pub struct LockedGuard<'a, W>(MutexGuard<'a, W>);

impl<W: Write> Write for LockedGuard<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.0.write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

impl<'a, W: Write + 'a> MakeWriter<'a> for LockedWriter<W> {
    type Writer = LockedGuard<'a, W>;

    fn make_writer(&'a self) -> Self::Writer {
        LockedGuard(self.inner.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

pub struct Sink {
    name: String,
    make_writer: BoxMakeWriter,
}

impl Sink {
    /// Open the sink named by `target`
    ///
    /// # Errors
    ///
    /// Returns [`LogError::OpenOutput`] if a file target cannot be opened.
    pub fn open(target: &OutputTarget) -> Result<Self> {
        match target {
            OutputTarget::Stdout => Ok(Self::stdout()),
            OutputTarget::Stderr => Ok(Self::stderr()),
            OutputTarget::File(path) => Self::file(path),
        }
    }

    /// Open the error sink, if failures are reported anywhere
    ///
    /// # Errors
    ///
    /// Returns [`LogError::OpenOutput`] if a file target cannot be opened.
    pub fn open_error_output(target: &ErrorOutput) -> Result<Option<Self>> {
        match target {
            ErrorOutput::Stderr => Ok(Some(Self::stderr())),
            ErrorOutput::Stdout => Ok(Some(Self::stdout())),
            ErrorOutput::File(path) => Self::file(path).map(Some),
            ErrorOutput::Discard => Ok(None),
        }
    }

    pub fn stdout() -> Self {
        Self::from_make_writer(OutputTarget::Stdout.name(), io::stdout)
    }

    pub fn stderr() -> Self {
        Self::from_make_writer(OutputTarget::Stderr.name(), io::stderr)
    }

    /// Open `path` for appending, creating it if missing
    ///
    /// # Errors
    ///
    /// Returns [`LogError::OpenOutput`] if the file cannot be opened.
    pub fn file(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| LogError::OpenOutput {
                target: path.display().to_string(),
                source,
            })?;
        Ok(Self::from_writer(path.display().to_string(), file))
    }

    /// Sink over a single owned writer
    pub fn from_writer<W>(name: impl Into<String>, writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self::from_make_writer(name, LockedWriter::new(writer))
    }

    pub fn from_make_writer<M>(name: impl Into<String>, make_writer: M) -> Self
    where
        M: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            make_writer: BoxMakeWriter::new(make_writer),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Write one complete line and flush it
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Write`] or [`LogError::Flush`] when the writer
    /// fails.
    pub fn write_line(&self, line: &[u8]) -> Result<()> {
        let mut writer = self.make_writer.make_writer();
        writer.write_all(line).map_err(LogError::Write)?;
        writer.flush().map_err(LogError::Flush)
    }
}

impl std::fmt::Debug for Sink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sink").field("name", &self.name).finish()
    }
}
