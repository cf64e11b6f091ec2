//! Live dashboard line protocol
//!
//! The dashboard is fed newline-delimited messages over a serial link (or
//! replayed from a recording). Each line is one of:
//!
//! ```text
//! {"id":"temp","text":"42C","value":42}          telemetry event (object)
//! [{"id":"a",...},{"id":"b",...}]                telemetry batch (<= 5 items)
//! shutdown                                       command (button action id)
//! ```
//!
//! A line is a telemetry event when its first non-blank character is `{` or
//! `[`; anything else is a command. Lines are bounded to [`MAX_LINE_LEN`]
//! bytes.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod event;
pub mod line;
pub mod message;

pub use event::{parse_events, EventBatch, EventError, ItemError, TelemetryEvent};
pub use event::{MAX_EVENTS_PER_LINE, MAX_ID_LEN, MAX_TEXT_LEN};
pub use line::{read_line, ByteSource, LineAccumulator, LineError, LineRead, MAX_LINE_LEN};
pub use message::{trim_line, truncated, Message};
