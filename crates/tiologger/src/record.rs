//! JSON encoding of a single record

use chrono::{DateTime, Local, Offset, TimeZone};
use serde::ser::{Serialize, SerializeMap, Serializer};
use tiologger_core_types::schema::{FIELD_LEVEL, FIELD_MSG, FIELD_TIME};

use crate::field::Field;
use crate::level::Level;

/// Format a timestamp as ISO-8601 with millisecond precision
///
/// UTC is written as `Z`, any other offset as `+hhmm`/`-hhmm`.
pub fn format_time<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let base = time.format("%Y-%m-%dT%H:%M:%S%.3f");
    if time.offset().fix().local_minus_utc() == 0 {
        format!("{base}Z")
    } else {
        format!("{base}{}", time.format("%z"))
    }
}

/// One log line, borrowed from the call site
///
/// Keys are written in a fixed order: `level`, `time`, `msg`, the caller's
/// tags in call order, then the named error if any.
#[derive(Debug)]
pub struct Record<'a> {
    pub level: Level,
    pub time: String,
    pub msg: &'a str,
    pub fields: &'a [Field],
    pub named_error: Option<&'a Field>,
}

impl<'a> Record<'a> {
    pub fn new(level: Level, msg: &'a str, fields: &'a [Field]) -> Self {
        Self {
            level,
            time: format_time(&Local::now()),
            msg,
            fields,
            named_error: None,
        }
    }

    pub fn with_named_error(mut self, named_error: Option<&'a Field>) -> Self {
        self.named_error = named_error;
        self
    }

    /// Encode as a newline-terminated JSON object
    ///
    /// # Errors
    ///
    /// Returns [`tiologger_errors::LogError::Encode`] if serialization fails.
    pub fn encode(&self) -> tiologger_errors::Result<Vec<u8>> {
        let mut line = serde_json::to_vec(self)?;
        line.push(b'\n');
        Ok(line)
    }
}

impl Serialize for Record<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let extra = usize::from(self.named_error.is_some());
        let mut map = serializer.serialize_map(Some(3 + self.fields.len() + extra))?;
        map.serialize_entry(FIELD_LEVEL, &self.level)?;
        map.serialize_entry(FIELD_TIME, &self.time)?;
        map.serialize_entry(FIELD_MSG, self.msg)?;
        for field in self.fields.iter().chain(self.named_error) {
            map.serialize_entry(field.key(), field.value())?;
        }
        map.end()
    }
}
