//! Telemetry event payloads
//!
//! An event line is either a single object or an array of up to
//! [`MAX_EVENTS_PER_LINE`] objects, each shaped like
//! `{"id": string, "text": string, "value": integer}`.
//!
//! Parsing happens in two layers: the line as a whole must be well-formed
//! ([`EventError`]), then each item is checked on its own ([`ItemError`]) so
//! one bad item does not hide its siblings.

use heapless::{String, Vec};
use serde_json::{Map, Value};

use crate::message::truncated;

/// Maximum number of events carried by one line
pub const MAX_EVENTS_PER_LINE: usize = 5;

/// Maximum widget identifier length in bytes
pub const MAX_ID_LEN: usize = 32;

/// Maximum display text length in bytes (longer text is cut)
pub const MAX_TEXT_LEN: usize = 32;

/// A single decoded telemetry update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryEvent {
    /// Target gauge or rate row identifier
    pub id: String<MAX_ID_LEN>,
    /// Preformatted display text
    pub text: String<MAX_TEXT_LEN>,
    /// Raw numeric value
    pub value: i32,
}

/// Line-level decoding errors; nothing on the line is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventError {
    /// Not valid JSON
    Json { line: usize, column: usize },
    /// Root is neither an object nor an array
    BadRoot,
    /// Array carries more than [`MAX_EVENTS_PER_LINE`] items
    TooManyItems { count: usize },
    /// An array element is not an object
    ItemNotObject { index: usize },
}

impl core::fmt::Display for EventError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EventError::Json { line, column } => {
                write!(f, "JSON parse error at {}:{}", line, column)
            }
            EventError::BadRoot => f.write_str("root must be object or array"),
            EventError::TooManyItems { count } => {
                write!(f, "too many items ({} > {})", count, MAX_EVENTS_PER_LINE)
            }
            EventError::ItemNotObject { index } => {
                write!(f, "array item {} is not an object", index)
            }
        }
    }
}

/// Per-item decoding errors; the item is skipped
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ItemError {
    /// `id` missing or not a string
    MissingId,
    /// `text` missing or not a string
    MissingText,
    /// `value` missing, not an integer, or outside i32
    InvalidValue,
    /// `id` longer than [`MAX_ID_LEN`]; cannot name any widget
    IdTooLong { prefix: String<MAX_ID_LEN> },
}

impl core::fmt::Display for ItemError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            ItemError::MissingId => "missing id",
            ItemError::MissingText => "missing text",
            ItemError::InvalidValue => "missing/invalid value",
            ItemError::IdTooLong { .. } => "id too long",
        })
    }
}

/// Decoded items of one event line, in line order
pub type EventBatch = Vec<Result<TelemetryEvent, ItemError>, MAX_EVENTS_PER_LINE>;

/// Decode an event line
pub fn parse_events(payload: &str) -> Result<EventBatch, EventError> {
    let root: Value = serde_json::from_str(payload).map_err(|e| EventError::Json {
        line: e.line(),
        column: e.column(),
    })?;

    let mut batch = EventBatch::new();
    match &root {
        Value::Object(obj) => {
            let _ = batch.push(decode_item(obj));
        }
        Value::Array(items) => {
            if items.len() > MAX_EVENTS_PER_LINE {
                return Err(EventError::TooManyItems { count: items.len() });
            }
            for (index, item) in items.iter().enumerate() {
                let obj = item
                    .as_object()
                    .ok_or(EventError::ItemNotObject { index })?;
                // Length checked above
                let _ = batch.push(decode_item(obj));
            }
        }
        _ => return Err(EventError::BadRoot),
    }

    Ok(batch)
}

fn decode_item(obj: &Map<alloc::string::String, Value>) -> Result<TelemetryEvent, ItemError> {
    let id = obj
        .get("id")
        .and_then(Value::as_str)
        .ok_or(ItemError::MissingId)?;
    let text = obj
        .get("text")
        .and_then(Value::as_str)
        .ok_or(ItemError::MissingText)?;
    let value = obj
        .get("value")
        .and_then(Value::as_i64)
        .and_then(|v| i32::try_from(v).ok())
        .ok_or(ItemError::InvalidValue)?;

    let id = String::try_from(id).map_err(|_| ItemError::IdTooLong {
        prefix: truncated(id),
    })?;

    Ok(TelemetryEvent {
        id,
        text: truncated(text),
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_object() {
        let batch = parse_events(r#"{"id":"temp","text":"42C","value":42}"#).unwrap();
        assert_eq!(batch.len(), 1);
        let event = batch[0].as_ref().unwrap();
        assert_eq!(event.id.as_str(), "temp");
        assert_eq!(event.text.as_str(), "42C");
        assert_eq!(event.value, 42);
    }

    #[test]
    fn test_array_keeps_item_errors() {
        let batch = parse_events(
            r#"[{"id":"a","text":"1","value":1},{"id":"b","value":2},{"id":"c","text":"x","value":1.5}]"#,
        )
        .unwrap();
        assert_eq!(batch.len(), 3);
        assert!(batch[0].is_ok());
        assert_eq!(batch[1], Err(ItemError::MissingText));
        assert_eq!(batch[2], Err(ItemError::InvalidValue));
    }

    #[test]
    fn test_too_many_items() {
        let item = r#"{"id":"a","text":"1","value":1}"#;
        let line = alloc::format!("[{item},{item},{item},{item},{item},{item}]");
        assert_eq!(parse_events(&line), Err(EventError::TooManyItems { count: 6 }));

        let line = alloc::format!("[{item},{item},{item},{item},{item}]");
        assert_eq!(parse_events(&line).unwrap().len(), 5);
    }

    #[test]
    fn test_array_item_not_object() {
        let line = r#"[{"id":"a","text":"1","value":1}, 3]"#;
        assert_eq!(parse_events(line), Err(EventError::ItemNotObject { index: 1 }));
    }

    #[test]
    fn test_bad_root_and_bad_json() {
        assert_eq!(parse_events("42"), Err(EventError::BadRoot));
        assert!(matches!(parse_events("{\"id\":"), Err(EventError::Json { .. })));
    }

    #[test]
    fn test_value_out_of_i32_range() {
        let batch = parse_events(r#"{"id":"a","text":"big","value":4294967296}"#).unwrap();
        assert_eq!(batch[0], Err(ItemError::InvalidValue));
    }

    #[test]
    fn test_id_too_long() {
        let id = "x".repeat(MAX_ID_LEN + 1);
        let line = alloc::format!(r#"{{"id":"{id}","text":"t","value":0}}"#);
        assert_eq!(
            parse_events(&line).unwrap()[0],
            Err(ItemError::IdTooLong {
                prefix: truncated(&id[..MAX_ID_LEN])
            })
        );
    }

    #[test]
    fn test_long_text_is_cut() {
        let text = "y".repeat(MAX_TEXT_LEN + 10);
        let line = alloc::format!(r#"{{"id":"a","text":"{text}","value":0}}"#);
        let batch = parse_events(&line).unwrap();
        assert_eq!(batch[0].as_ref().unwrap().text.len(), MAX_TEXT_LEN);
    }
}
