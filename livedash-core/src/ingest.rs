//! Line ingestion
//!
//! Classifies an inbound line and applies it: telemetry events publish to
//! the widget registry, commands go to the action dispatcher. Every failure
//! here is recoverable; the line is dropped with a diagnostic and nothing
//! else changes.

use livedash_protocol::{
    parse_events, EventError, ItemError, LineError, Message, MAX_LINE_LEN,
};

use crate::action::{ActionDispatcher, Dispatch};
use crate::config::Id;
use crate::registry::WidgetRegistry;
use crate::traits::WidgetChange;

/// Why a telemetry payload was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Malformed {
    /// The line as a whole
    Line(EventError),
    /// A single item
    Item(ItemError),
    /// Array with no items
    Empty,
    /// Bytes are not UTF-8
    Utf8,
}

impl core::fmt::Display for Malformed {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Malformed::Line(e) => write!(f, "{}", e),
            Malformed::Item(e) => write!(f, "{}", e),
            Malformed::Empty => f.write_str("no items"),
            Malformed::Utf8 => f.write_str("not UTF-8"),
        }
    }
}

/// Ingestion error
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IngestError {
    /// Payload is not a well-formed event
    MalformedPayload(Malformed),
    /// No gauge or rate row has this identifier
    UnknownIdentifier { id: Id },
    /// Event array longer than the per-line limit
    TooManyItems { count: usize },
    /// Line longer than [`MAX_LINE_LEN`]
    LineTooLong,
    /// No button carries this action
    UnknownCommand,
    /// A button matched but no handler is bound
    UnboundAction,
}

impl core::fmt::Display for IngestError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            IngestError::MalformedPayload(reason) => write!(f, "malformed payload: {}", reason),
            IngestError::UnknownIdentifier { id } => write!(f, "unknown id '{}'", id),
            IngestError::TooManyItems { count } => write!(f, "too many items ({})", count),
            IngestError::LineTooLong => write!(f, "line too long (max {})", MAX_LINE_LEN),
            IngestError::UnknownCommand => f.write_str("unknown command"),
            IngestError::UnboundAction => f.write_str("action has no handler"),
        }
    }
}

impl From<EventError> for IngestError {
    fn from(e: EventError) -> Self {
        match e {
            EventError::TooManyItems { count } => IngestError::TooManyItems { count },
            other => IngestError::MalformedPayload(Malformed::Line(other)),
        }
    }
}

impl From<ItemError> for IngestError {
    fn from(e: ItemError) -> Self {
        match e {
            // Longer than any configured id
            ItemError::IdTooLong { prefix } => IngestError::UnknownIdentifier { id: prefix },
            other => IngestError::MalformedPayload(Malformed::Item(other)),
        }
    }
}

impl From<LineError> for IngestError {
    fn from(e: LineError) -> Self {
        match e {
            LineError::TooLong => IngestError::LineTooLong,
            LineError::InvalidUtf8 => IngestError::MalformedPayload(Malformed::Utf8),
        }
    }
}

/// What a successfully ingested line did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// Blank line
    Ignored,
    /// Telemetry applied to at least one widget
    Telemetry { applied: usize, rejected: usize },
    /// Action handler invoked
    Command,
}

impl Outcome {
    /// Whether the line changed anything
    pub fn is_applied(&self) -> bool {
        match self {
            Outcome::Ignored => false,
            Outcome::Telemetry { applied, .. } => *applied > 0,
            Outcome::Command => true,
        }
    }
}

/// Classify and apply one line
pub fn consume_line(
    registry: &mut WidgetRegistry,
    actions: &ActionDispatcher,
    line: &str,
    now_ms: u32,
    notify: impl FnMut(WidgetChange),
) -> Result<Outcome, IngestError> {
    let Some(message) = Message::classify(line) else {
        return Ok(Outcome::Ignored);
    };
    check_length(message.as_str())?;

    match message {
        Message::Event(payload) => apply_events(registry, payload, now_ms, notify),
        Message::Command(command) => dispatch_command(actions, command),
    }
}

/// Apply a line already known to be telemetry
pub fn consume_event(
    registry: &mut WidgetRegistry,
    line: &str,
    now_ms: u32,
    notify: impl FnMut(WidgetChange),
) -> Result<Outcome, IngestError> {
    let payload = livedash_protocol::trim_line(line);
    if payload.is_empty() {
        return Ok(Outcome::Ignored);
    }
    check_length(payload)?;
    apply_events(registry, payload, now_ms, notify)
}

fn check_length(line: &str) -> Result<(), IngestError> {
    if line.len() > MAX_LINE_LEN {
        warn!("LINE: too long ({} > {})", line.len(), MAX_LINE_LEN);
        return Err(IngestError::LineTooLong);
    }
    Ok(())
}

/// Publish every item of an event payload
///
/// Items are independent: an unknown identifier or a bad item is reported
/// and skipped. The line fails only if no item applied.
fn apply_events(
    registry: &mut WidgetRegistry,
    payload: &str,
    now_ms: u32,
    mut notify: impl FnMut(WidgetChange),
) -> Result<Outcome, IngestError> {
    let batch = parse_events(payload).map_err(|e| {
        warn!("EVENT: {}", e);
        IngestError::from(e)
    })?;

    let mut applied = 0;
    let mut rejected = 0;
    let mut first_error = None;

    for item in batch {
        let result = item.map_err(IngestError::from).and_then(|event| {
            registry
                .publish(&event.id, event.value, &event.text, now_ms)
                .ok_or(IngestError::UnknownIdentifier { id: event.id })
        });
        match result {
            Ok(change) => {
                applied += 1;
                notify(change);
            }
            Err(e) => {
                warn!("EVENT: {}", e);
                rejected += 1;
                first_error.get_or_insert(e);
            }
        }
    }

    if applied == 0 {
        return Err(first_error.unwrap_or(IngestError::MalformedPayload(Malformed::Empty)));
    }
    Ok(Outcome::Telemetry { applied, rejected })
}

fn dispatch_command(actions: &ActionDispatcher, command: &str) -> Result<Outcome, IngestError> {
    match actions.dispatch(command) {
        Dispatch::Invoked => {
            debug!("CMD: {}", command);
            Ok(Outcome::Command)
        }
        Dispatch::Unbound => {
            warn!("CMD: '{}' has no handler", command);
            Err(IngestError::UnboundAction)
        }
        Dispatch::Unknown => {
            warn!("CMD: unknown '{}'", command);
            Err(IngestError::UnknownCommand)
        }
    }
}
