//! In-memory writers for asserting on emitted records
//!
//! A [`CaptureBuffer`] is handed to a logger as its sink; the test keeps a
//! clone and reads back what was written. [`FailingWriter`] drives the write
//! failure path.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;

/// Shared byte buffer implementing `Write`
#[derive(Clone, Default)]
pub struct CaptureBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl CaptureBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    fn bytes(&self) -> MutexGuard<'_, Vec<u8>> {
        self.bytes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Everything written so far, lossily decoded
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    /// Captured lines parsed as JSON; lines that are not JSON are skipped
    pub fn records(&self) -> Vec<Value> {
        self.lines()
            .iter()
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect()
    }

    pub fn clear(&self) {
        self.bytes().clear();
    }
}

impl Write for CaptureBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writer that fails on every write or every flush
#[derive(Debug, Clone, Copy)]
pub struct FailingWriter {
    fail_write: bool,
}

impl FailingWriter {
    pub fn on_write() -> Self {
        Self { fail_write: true }
    }

    /// Accepts writes, fails flushes
    pub fn on_flush() -> Self {
        Self { fail_write: false }
    }
}

impl Write for FailingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.fail_write {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "write refused"))
        } else {
            Ok(buf.len())
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::InvalidInput, "flush refused"))
    }
}
