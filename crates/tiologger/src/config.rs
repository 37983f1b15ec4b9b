//! Environment-driven logger configuration
//!
//! `LOG_LEVEL`, `LOG_OUTPUT` and `LOG_PROFILE` are resolved through a lookup
//! function so the same rules apply to the real environment and to tests.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::PathBuf;

use tiologger_core_types::schema::{
    ENV_LOG_LEVEL, ENV_LOG_OUTPUT, ENV_LOG_PROFILE, OUTPUT_STDERR, OUTPUT_STDOUT,
};

use crate::level::{Level, Profile};

/// Where records are written
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputTarget {
    #[default]
    Stdout,
    Stderr,
    File(PathBuf),
}

impl OutputTarget {
    /// Interpret a resolved sink name
    pub fn parse(name: &str) -> OutputTarget {
        match name {
            OUTPUT_STDOUT => OutputTarget::Stdout,
            OUTPUT_STDERR => OutputTarget::Stderr,
            path => OutputTarget::File(PathBuf::from(path)),
        }
    }

    /// Interpret a raw `LOG_OUTPUT` value
    ///
    /// A value that is not valid UTF-8 can only be a path, and is used as one
    /// byte for byte.
    pub fn from_os(raw: Option<&OsStr>) -> OutputTarget {
        match raw {
            Some(value) => match value.to_str() {
                Some(text) => OutputTarget::parse(&resolve_output(Some(text))),
                None => OutputTarget::File(PathBuf::from(value)),
            },
            None => OutputTarget::parse(&resolve_output(None)),
        }
    }

    pub fn name(&self) -> String {
        match self {
            OutputTarget::Stdout => OUTPUT_STDOUT.to_string(),
            OutputTarget::Stderr => OUTPUT_STDERR.to_string(),
            OutputTarget::File(path) => path.display().to_string(),
        }
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Resolve a `LOG_OUTPUT` value to a sink name
///
/// Unset, empty and blank values mean `stdout`; anything else is used as
/// given, minus surrounding whitespace.
pub fn resolve_output(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => OUTPUT_STDOUT.to_string(),
    }
}

/// Settings used to build a [`Logger`](crate::Logger)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggerConfig {
    pub level: Level,
    pub output: OutputTarget,
    pub error_output: ErrorOutput,
    pub profile: Profile,
}

/// Destination for the logger's own write failures
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ErrorOutput {
    #[default]
    Stderr,
    Stdout,
    File(PathBuf),
    /// Failures are counted but not reported anywhere
    Discard,
}

impl LoggerConfig {
    /// Read the configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_os_lookup(|key| std::env::var_os(key))
    }

    /// Resolve the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_os_lookup(|key| lookup(key).map(OsString::from))
    }

    /// Resolve the configuration from a lookup returning raw OS strings
    ///
    /// Non-UTF-8 `LOG_LEVEL` and `LOG_PROFILE` values are invalid and fall
    /// back to their defaults; a non-UTF-8 `LOG_OUTPUT` is a file path.
    pub fn from_os_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let level = lookup(ENV_LOG_LEVEL)
            .and_then(|raw| raw.to_str().map(Level::from_code))
            .unwrap_or_default();
        let output = OutputTarget::from_os(lookup(ENV_LOG_OUTPUT).as_deref());
        let profile = lookup(ENV_LOG_PROFILE)
            .and_then(|raw| raw.to_str().map(Profile::from_name))
            .unwrap_or_default();

        Self {
            level,
            output,
            error_output: ErrorOutput::default(),
            profile,
        }
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn with_output(mut self, output: OutputTarget) -> Self {
        self.output = output;
        self
    }

    pub fn with_error_output(mut self, error_output: ErrorOutput) -> Self {
        self.error_output = error_output;
        self
    }

    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| env.get(key).cloned()
    }

    #[test]
    fn test_resolve_output_defaults_to_stdout() {
        assert_eq!(resolve_output(None), "stdout");
        assert_eq!(resolve_output(Some("")), "stdout");
        assert_eq!(resolve_output(Some("  \t")), "stdout");
    }

    #[test]
    fn test_resolve_output_keeps_given_value() {
        assert_eq!(resolve_output(Some("stdout")), "stdout");
        assert_eq!(resolve_output(Some("stderr")), "stderr");
        assert_eq!(resolve_output(Some("/var/log/app.log")), "/var/log/app.log");
        assert_eq!(resolve_output(Some(" stderr ")), "stderr");
    }

    #[test]
    fn test_output_target_parse() {
        assert_eq!(OutputTarget::parse("stdout"), OutputTarget::Stdout);
        assert_eq!(OutputTarget::parse("stderr"), OutputTarget::Stderr);
        assert_eq!(
            OutputTarget::parse("logs/app.log"),
            OutputTarget::File(PathBuf::from("logs/app.log"))
        );
        assert_eq!(OutputTarget::parse("logs/app.log").name(), "logs/app.log");
    }

    #[test]
    fn test_from_lookup_empty_environment() {
        let config = LoggerConfig::from_lookup(|_| None);
        assert_eq!(config, LoggerConfig::default());
        assert_eq!(config.level, Level::Error);
        assert_eq!(config.output, OutputTarget::Stdout);
        assert_eq!(config.profile, Profile::Production);
    }

    #[test]
    fn test_from_lookup_reads_every_variable() {
        let config = LoggerConfig::from_lookup(lookup_from(&[
            ("LOG_LEVEL", "-1"),
            ("LOG_OUTPUT", "stderr"),
            ("LOG_PROFILE", "development"),
        ]));

        assert_eq!(config.level, Level::Debug);
        assert_eq!(config.output, OutputTarget::Stderr);
        assert_eq!(config.profile, Profile::Development);
        assert_eq!(config.error_output, ErrorOutput::Stderr);
    }

    #[test]
    fn test_from_lookup_invalid_level_falls_back() {
        let config = LoggerConfig::from_lookup(lookup_from(&[("LOG_LEVEL", "verbose")]));
        assert_eq!(config.level, Level::Error);
    }

    #[test]
    fn test_output_from_os_matches_text_rules() {
        assert_eq!(OutputTarget::from_os(None), OutputTarget::Stdout);
        assert_eq!(OutputTarget::from_os(Some(OsStr::new("  "))), OutputTarget::Stdout);
        assert_eq!(
            OutputTarget::from_os(Some(OsStr::new(" stderr "))),
            OutputTarget::Stderr
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_from_os_lookup_keeps_non_utf8_output_path() {
        use std::os::unix::ffi::OsStringExt;

        let raw = OsString::from_vec(b"/tmp/app-\xff.log".to_vec());
        let expected = PathBuf::from(raw.clone());
        let config = LoggerConfig::from_os_lookup(move |key| match key {
            "LOG_OUTPUT" => Some(raw.clone()),
            "LOG_LEVEL" => Some(OsString::from_vec(b"\xfe".to_vec())),
            _ => None,
        });

        assert_eq!(config.output, OutputTarget::File(expected));
        assert_eq!(config.level, Level::Error);
    }

    #[test]
    fn test_builder_overrides() {
        let config = LoggerConfig::default()
            .with_level(Level::Warn)
            .with_output(OutputTarget::Stderr)
            .with_error_output(ErrorOutput::Discard)
            .with_profile(Profile::Development);

        assert_eq!(config.level, Level::Warn);
        assert_eq!(config.output, OutputTarget::Stderr);
        assert_eq!(config.error_output, ErrorOutput::Discard);
        assert!(config.profile.is_development());
    }
}
