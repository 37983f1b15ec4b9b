//! Canonical schema constants for emitted records
//!
//! Every record carries the three fixed keys below, followed by caller tags.

// Fixed record keys
pub const FIELD_LEVEL: &str = "level";
pub const FIELD_TIME: &str = "time";
pub const FIELD_MSG: &str = "msg";

// Named error labels
pub const LABEL_ERROR: &str = "ERROR";
pub const LABEL_CRITICAL: &str = "CRITICAL";
pub const LABEL_DPANIC: &str = "D-PANIC";
pub const LABEL_PANIC: &str = "PANIC";

// Environment variables
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
pub const ENV_LOG_OUTPUT: &str = "LOG_OUTPUT";
pub const ENV_LOG_PROFILE: &str = "LOG_PROFILE";

// Well-known sink names
pub const OUTPUT_STDOUT: &str = "stdout";
pub const OUTPUT_STDERR: &str = "stderr";

/// Placeholder written in place of sensitive values
pub const REDACTED: &str = "***REDACTED***";
