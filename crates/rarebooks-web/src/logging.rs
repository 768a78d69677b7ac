//! Structured logging to the browser console.
//!
//! Installs a `tracing-subscriber` registry with a [`ConsoleLayer`] that
//! renders each event as a JSON object or a human-readable line and writes it
//! to the browser console (stderr off-wasm).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::prelude::*;

use crate::config::{ConfigError, LoggingConfig};

/// Output format for logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per event.
    Json,
    /// `[LEVEL] target: message | key=value ...`
    #[default]
    Human,
}

/// A structured log entry.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: String,
    pub target: String,
    pub message: String,
    #[serde(flatten)]
    pub fields: BTreeMap<String, serde_json::Value>,
}

impl LogEntry {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.message.clone())
    }

    pub fn to_human(&self) -> String {
        let mut s = format!("[{}] {}: {}", self.level, self.target, self.message);

        if !self.fields.is_empty() {
            s.push_str(" | ");
            let fields: Vec<String> = self
                .fields
                .iter()
                .map(|(k, v)| match v {
                    serde_json::Value::String(text) => format!("{k}={text}"),
                    other => format!("{k}={other}"),
                })
                .collect();
            s.push_str(&fields.join(" "));
        }

        s
    }

    pub fn render(&self, format: LogFormat) -> String {
        match format {
            LogFormat::Json => self.to_json(),
            LogFormat::Human => self.to_human(),
        }
    }
}

type Sink = Box<dyn Fn(Level, &str) + Send + Sync>;

/// Layer writing formatted events to a sink.
pub struct ConsoleLayer {
    format: LogFormat,
    sink: Sink,
}

impl ConsoleLayer {
    /// Layer writing to the platform console.
    pub fn new(format: LogFormat) -> Self {
        Self::with_sink(format, write_console)
    }

    pub fn with_sink(format: LogFormat, sink: impl Fn(Level, &str) + Send + Sync + 'static) -> Self {
        Self {
            format,
            sink: Box::new(sink),
        }
    }
}

impl<S: Subscriber> Layer<S> for ConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let entry = LogEntry {
            timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            level: meta.level().to_string(),
            target: meta.target().to_string(),
            message: visitor.message,
            fields: visitor.fields,
        };

        (self.sink)(*meta.level(), &entry.render(self.format));
    }
}

#[derive(Default)]
struct FieldVisitor {
    message: String,
    fields: BTreeMap<String, serde_json::Value>,
}

impl FieldVisitor {
    fn insert(&mut self, field: &Field, value: serde_json::Value) {
        if field.name() == "message" {
            self.message = match value {
                serde_json::Value::String(text) => text,
                other => other.to_string(),
            };
        } else {
            self.fields.insert(field.name().to_string(), value);
        }
    }
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.insert(field, serde_json::Value::String(format!("{value:?}")));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert(field, serde_json::Value::String(value.to_string()));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, value.into());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, value.into());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, value.into());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, value.into());
    }
}

#[cfg(target_arch = "wasm32")]
fn write_console(level: Level, line: &str) {
    use web_sys::console;

    let line = wasm_bindgen::JsValue::from_str(line);
    match level {
        Level::ERROR => console::error_1(&line),
        Level::WARN => console::warn_1(&line),
        Level::INFO => console::info_1(&line),
        _ => console::debug_1(&line),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_console(_level: Level, line: &str) {
    eprintln!("{line}");
}

/// Install the console layer as the global subscriber.
///
/// A subscriber that is already installed is left in place.
pub fn init(config: &LoggingConfig) -> Result<(), ConfigError> {
    let level = config.level_filter()?;
    let _ = tracing_subscriber::registry()
        .with(ConsoleLayer::new(config.format).with_filter(level))
        .try_init();
    Ok(())
}
