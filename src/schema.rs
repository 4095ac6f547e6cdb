//! Structured data (JSON-LD) validation for the post editor.
//!
//! The editor keeps JSON-LD as raw text. Before saving, the text is parsed into
//! one of three outcomes so the caller can tell "nothing supplied" apart from
//! "malformed, block the save".

use serde_json::{Map, Value};
use tracing::{debug, error, info, warn};

/// Message shown to the editor when the JSON-LD block cannot be used.
pub const INVALID_SCHEMA_MESSAGE: &str = "Schema JSON must be a valid JSON object";

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

/// Receiver for user-facing notifications raised during validation.
pub trait Notify {
    fn notify(&mut self, message: &str, severity: Severity);
}

impl<F> Notify for F
where
    F: FnMut(&str, Severity),
{
    fn notify(&mut self, message: &str, severity: Severity) {
        self(message, severity)
    }
}

/// Notifier that writes to the `tracing` log instead of a UI.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notify for TracingNotifier {
    fn notify(&mut self, message: &str, severity: Severity) {
        match severity {
            Severity::Info | Severity::Success => info!("{}", message),
            Severity::Warning => warn!("{}", message),
            Severity::Error => error!("{}", message),
        }
    }
}

/// Outcome of parsing a JSON-LD block.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaJson {
    /// No structured data supplied
    Absent,

    /// A JSON object, returned unchanged
    Valid(Map<String, Value>),

    /// Not JSON, or JSON that is not an object
    Invalid,
}

impl SchemaJson {
    /// `true` when the block must be fixed before saving.
    pub fn is_invalid(&self) -> bool {
        matches!(self, SchemaJson::Invalid)
    }

    /// The parsed object, if valid.
    pub fn into_object(self) -> Option<Map<String, Value>> {
        match self {
            SchemaJson::Valid(object) => Some(object),
            _ => None,
        }
    }
}

/// Classify a raw JSON-LD block without notifying anyone.
pub fn classify_schema_json(raw: Option<&str>) -> SchemaJson {
    let raw = match raw.map(str::trim) {
        Some(text) if !text.is_empty() => text,
        _ => return SchemaJson::Absent,
    };

    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(object)) => SchemaJson::Valid(object),
        Ok(other) => {
            debug!("Schema JSON rejected: top-level value is not an object ({})", kind(&other));
            SchemaJson::Invalid
        }
        Err(e) => {
            debug!("Schema JSON rejected: {}", e);
            SchemaJson::Invalid
        }
    }
}

/// Parse a raw JSON-LD block, notifying once with `Severity::Error` when it is
/// invalid.
///
/// # Returns
/// * `SchemaJson::Absent` if `raw` is `None` or blank
/// * `SchemaJson::Valid` with the parsed object
/// * `SchemaJson::Invalid` for malformed JSON, arrays and scalars
pub fn parse_schema_json<N: Notify + ?Sized>(raw: Option<&str>, notify: &mut N) -> SchemaJson {
    let outcome = classify_schema_json(raw);
    if outcome.is_invalid() {
        notify.notify(INVALID_SCHEMA_MESSAGE, Severity::Error);
    }
    outcome
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
