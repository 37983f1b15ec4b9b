//! Structured JSON logging facade
//!
//! One logger, configured from the environment, writing one JSON object per
//! line:
//!
//! ```text
//! {"level":"error","time":"2024-03-09T07:05:01.123Z","msg":"save failed","user_id":42,"ERROR":"disk full"}
//! ```
//!
//! # Configuration
//!
//! - `LOG_LEVEL`: `-1` debug, `0` info, `1` warn, `2` error, `3` dpanic,
//!   `4` panic, `5` fatal. Anything else means error.
//! - `LOG_OUTPUT`: `stdout` (default), `stderr` or a file path.
//! - `LOG_PROFILE`: `development` makes `dpanic` panic.
//!
//! # Usage
//!
//! ```no_run
//! use tiologger::tags;
//!
//! // Surface a bad LOG_OUTPUT at startup instead of on first use
//! let logger = tiologger::try_init().expect("logger");
//!
//! logger.info("listening", &tags![port = 8080]);
//! tiologger::warn("slow request", &tags![elapsed_ms = 1200]);
//!
//! let err = std::io::Error::other("disk full");
//! tiologger::error("save failed", &err, &tags![user_id = 42]);
//! ```

pub mod bridge;
pub mod capture;
pub mod config;
pub mod field;
pub mod global;
pub mod level;
pub mod logger;
pub mod record;
pub mod sink;

pub use bridge::LoggerLayer;
pub use config::{resolve_output, ErrorOutput, LoggerConfig, OutputTarget};
pub use field::Field;
pub use global::{
    critical, debug, dpanic, error, get_logger, info, init_with, log, panic, print, try_init, warn,
};
pub use level::{Level, Profile};
pub use logger::Logger;
pub use record::Record;
pub use sink::{LockedWriter, Sink};
pub use tiologger_core_types::{schema, Sensitive};
pub use tiologger_errors::{LogError, LogErrorKind};
