//! Structured tags attached to a record

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;
use serde_json::Value;
use tiologger_core_types::Sensitive;

/// A single key/value pair written after the fixed record keys
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    key: Cow<'static, str>,
    value: Value,
}

impl Field {
    pub fn new(key: impl Into<Cow<'static, str>>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn string(key: impl Into<Cow<'static, str>>, value: impl Into<String>) -> Self {
        Self::new(key, Value::String(value.into()))
    }

    /// Tag holding the `Display` form of `value`
    pub fn display(key: impl Into<Cow<'static, str>>, value: &dyn fmt::Display) -> Self {
        Self::new(key, value.to_string())
    }

    /// Tag holding any serializable value
    ///
    /// A value that fails to serialize is recorded as its error message under
    /// `<key>Error` so the record itself is never lost.
    pub fn any<T>(key: impl Into<Cow<'static, str>>, value: &T) -> Self
    where
        T: Serialize + ?Sized,
    {
        let key = key.into();
        match serde_json::to_value(value) {
            Ok(value) => Self { key, value },
            Err(err) => Self {
                key: Cow::Owned(format!("{key}Error")),
                value: Value::String(err.to_string()),
            },
        }
    }

    /// Tag pairing a label with the stringified error
    pub fn named_error(
        label: impl Into<Cow<'static, str>>,
        err: &(dyn std::error::Error + '_),
    ) -> Self {
        Self::new(label, err.to_string())
    }

    pub fn sensitive<T>(key: impl Into<Cow<'static, str>>, value: &Sensitive<T>) -> Self {
        Self::display(key, value)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// Build a `Vec<Field>` from `key = value` pairs
///
/// ```
/// use tiologger::tags;
///
/// let fields = tags![port = 8080, tls = true, host = "localhost"];
/// assert_eq!(fields.len(), 3);
/// assert_eq!(fields[0].key(), "port");
/// ```
#[macro_export]
macro_rules! tags {
    () => {
        ::std::vec::Vec::<$crate::Field>::new()
    };
    ($($key:ident = $value:expr),+ $(,)?) => {
        ::std::vec![$($crate::Field::new(stringify!($key), $value)),+]
    };
}
