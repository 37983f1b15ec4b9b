//! Error facility for tiologger
//!
//! `LogError` is the single error type returned by logger construction and
//! record writes. Each variant maps to a stable [`LogErrorKind`] whose code can
//! be matched on programmatically and asserted in tests.

use std::io;

use thiserror::Error;

/// Result type alias using LogError
pub type Result<T> = std::result::Result<T, LogError>;

/// Canonical error kind taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogErrorKind {
    /// The configured output could not be opened
    InvalidOutput,
    /// A record could not be serialized
    Encoding,
    /// Writing or flushing a sink failed
    Io,
    /// A global logger was already installed
    AlreadyInitialized,
    /// The tracing bridge could not be installed
    Subscriber,
}

impl LogErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            LogErrorKind::InvalidOutput => "ERR_INVALID_OUTPUT",
            LogErrorKind::Encoding => "ERR_ENCODING",
            LogErrorKind::Io => "ERR_IO",
            LogErrorKind::AlreadyInitialized => "ERR_ALREADY_INITIALIZED",
            LogErrorKind::Subscriber => "ERR_SUBSCRIBER",
        }
    }
}

#[derive(Debug, Error)]
pub enum LogError {
    #[error("failed to open log output '{target}': {source}")]
    OpenOutput {
        target: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode log record: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write log record: {0}")]
    Write(#[source] io::Error),

    #[error("failed to flush log output: {0}")]
    Flush(#[source] io::Error),

    #[error("a global logger is already installed")]
    AlreadyInitialized,

    #[error("failed to install tracing subscriber: {0}")]
    SubscriberInstall(String),
}

impl LogError {
    pub fn kind(&self) -> LogErrorKind {
        match self {
            LogError::OpenOutput { .. } => LogErrorKind::InvalidOutput,
            LogError::Encode(_) => LogErrorKind::Encoding,
            LogError::Write(_) | LogError::Flush(_) => LogErrorKind::Io,
            LogError::AlreadyInitialized => LogErrorKind::AlreadyInitialized,
            LogError::SubscriberInstall(_) => LogErrorKind::Subscriber,
        }
    }

    pub fn code(&self) -> &'static str {
        self.kind().code()
    }
}
