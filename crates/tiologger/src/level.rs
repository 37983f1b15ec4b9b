//! Severity levels and profiles

use std::fmt;

use serde::{Serialize, Serializer};

/// Ordered severity of a record
///
/// Ordering follows the integer codes used by `LOG_LEVEL`, so a logger at
/// `Warn` writes `Warn` and everything above it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(i8)]
pub enum Level {
    Debug = -1,
    Info = 0,
    Warn = 1,
    #[default]
    Error = 2,
    /// Logs in production, panics in development
    DPanic = 3,
    Panic = 4,
    Fatal = 5,
}

impl Level {
    pub const ALL: [Level; 7] = [
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::DPanic,
        Level::Panic,
        Level::Fatal,
    ];

    /// Resolve a `LOG_LEVEL` value
    ///
    /// Only the integer codes -1..5 are recognized; anything else, including
    /// an empty value or a level name, falls back to `Error`.
    pub fn from_code(raw: &str) -> Level {
        match raw.trim() {
            "-1" => Level::Debug,
            "0" => Level::Info,
            "1" => Level::Warn,
            "2" => Level::Error,
            "3" => Level::DPanic,
            "4" => Level::Panic,
            "5" => Level::Fatal,
            _ => Level::Error,
        }
    }

    pub fn code(self) -> i8 {
        self as i8
    }

    /// Lowercase name as written in the `level` key
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::DPanic => "dpanic",
            Level::Panic => "panic",
            Level::Fatal => "fatal",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl From<&tracing::Level> for Level {
    fn from(level: &tracing::Level) -> Self {
        if *level == tracing::Level::ERROR {
            Level::Error
        } else if *level == tracing::Level::WARN {
            Level::Warn
        } else if *level == tracing::Level::INFO {
            Level::Info
        } else {
            Level::Debug
        }
    }
}

/// Logger profile
///
/// The profile only changes how `dpanic` behaves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Profile {
    /// `dpanic` panics after writing its record
    Development,
    /// `dpanic` only writes its record
    #[default]
    Production,
}

impl Profile {
    /// Resolve a `LOG_PROFILE` value; unknown values mean production
    pub fn from_name(raw: &str) -> Profile {
        match raw.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Profile::Development,
            _ => Profile::Production,
        }
    }

    pub fn is_development(self) -> bool {
        self == Profile::Development
    }
}
