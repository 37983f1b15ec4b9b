//! Redaction wrapper for values that must never reach a log sink
//!
//! `Sensitive<T>` prints and serializes as [`REDACTED`], so passing one as a
//! tag value keeps tokens and passwords out of emitted records.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::schema::REDACTED;

/// Wrapper that hides its value from `Debug`, `Display` and `Serialize`
///
/// # Example
///
/// ```
/// use tiologger_core_types::Sensitive;
///
/// let token = Sensitive::new("s3cr3t");
/// assert_eq!(format!("{token}"), "***REDACTED***");
/// assert_eq!(serde_json::to_string(&token).unwrap(), "\"***REDACTED***\"");
/// assert_eq!(token.expose(), &"s3cr3t");
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Borrow the wrapped value
    pub fn expose(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> From<T> for Sensitive<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T> Serialize for Sensitive<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(REDACTED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_and_display_redact() {
        let secret = Sensitive::new("hunter2");
        assert_eq!(format!("{:?}", secret), REDACTED);
        assert_eq!(secret.to_string(), REDACTED);
    }

    #[test]
    fn test_serialize_redacts() {
        let secret = Sensitive::new(String::from("api-key-12345"));
        let json = serde_json::to_string(&secret).unwrap();
        assert_eq!(json, format!("\"{REDACTED}\""));
        assert!(!json.contains("api-key"));
    }

    #[test]
    fn test_redaction_inside_serialized_struct() {
        #[derive(Serialize)]
        struct Credentials {
            user: &'static str,
            password: Sensitive<&'static str>,
        }

        let creds = Credentials {
            user: "alice",
            password: Sensitive::new("secret123"),
        };
        let value = serde_json::to_value(&creds).unwrap();
        assert_eq!(value["user"], "alice");
        assert_eq!(value["password"], REDACTED);
    }

    #[test]
    fn test_expose_and_into_inner() {
        let secret: Sensitive<u32> = 42.into();
        assert_eq!(secret.expose(), &42);
        assert_eq!(secret.into_inner(), 42);
    }
}
