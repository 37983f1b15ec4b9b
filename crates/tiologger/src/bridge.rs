//! Bridge from `tracing` events to a [`Logger`]
//!
//! Libraries that log through `tracing` end up in the same JSON stream as
//! direct facade calls. The event's `message` becomes `msg`; every other field
//! becomes a tag.

use tracing::field::{Field as TracingField, Visit};
use tracing::{Event, Metadata, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use tiologger_errors::{LogError, Result};

use crate::field::Field;
use crate::level::Level;
use crate::logger::Logger;

const MESSAGE_FIELD: &str = "message";

#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    fields: Vec<Field>,
}

impl FieldVisitor {
    fn push(&mut self, field: &TracingField, value: serde_json::Value) {
        if field.name() == MESSAGE_FIELD {
            self.message = Some(match value {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            });
        } else {
            self.fields.push(Field::new(field.name(), value));
        }
    }
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &TracingField, value: &dyn std::fmt::Debug) {
        self.push(field, format!("{:?}", value).into());
    }

    fn record_str(&mut self, field: &TracingField, value: &str) {
        self.push(field, value.into());
    }

    fn record_i64(&mut self, field: &TracingField, value: i64) {
        self.push(field, value.into());
    }

    fn record_u64(&mut self, field: &TracingField, value: u64) {
        self.push(field, value.into());
    }

    fn record_f64(&mut self, field: &TracingField, value: f64) {
        self.push(field, value.into());
    }

    fn record_bool(&mut self, field: &TracingField, value: bool) {
        self.push(field, value.into());
    }

    fn record_error(
        &mut self,
        field: &TracingField,
        value: &(dyn std::error::Error + 'static),
    ) {
        self.push(field, value.to_string().into());
    }
}

/// Layer writing every enabled `tracing` event through a [`Logger`]
pub struct LoggerLayer {
    logger: Logger,
}

impl LoggerLayer {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }
}

impl<S> Layer<S> for LoggerLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn enabled(&self, metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        self.logger.enabled(Level::from(metadata.level()))
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let level = Level::from(event.metadata().level());
        let msg = visitor.message.unwrap_or_default();
        self.logger.log(level, &msg, &visitor.fields);
    }
}

impl Logger {
    /// A layer that forwards `tracing` events to this logger
    pub fn tracing_layer(&self) -> LoggerLayer {
        LoggerLayer::new(self.clone())
    }

    /// Install this logger as the global `tracing` subscriber
    ///
    /// # Errors
    ///
    /// Returns [`LogError::SubscriberInstall`] if a global subscriber is
    /// already set.
    pub fn install_tracing(&self) -> Result<()> {
        tracing_subscriber::registry()
            .with(self.tracing_layer())
            .try_init()
            .map_err(|e| LogError::SubscriberInstall(e.to_string()))
    }
}
