//! Board-agnostic core of the live telemetry dashboard
//!
//! Everything that does not touch a real display or file system lives here:
//!
//! - Configuration model and validation (`config.json`)
//! - Grid layout resolution into rectangular tiles
//! - Widget registry with per-widget freshness tracking
//! - Line ingestion (telemetry events and button commands)
//! - Demo replay of a recorded event log, plus frame capture sync
//! - Renderer and replay source capability traits
//!
//! [`Dashboard`] ties these together for one loaded configuration.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

#[macro_use]
mod fmt;

pub mod action;
pub mod capture;
pub mod config;
pub mod dashboard;
pub mod ingest;
pub mod intro;
pub mod layout;
pub mod registry;
pub mod replay;
pub mod traits;
pub mod widget;

pub use action::{ActionDispatcher, ActionHandler, Dispatch};
pub use capture::{CapturePoll, FrameCapture};
pub use dashboard::Dashboard;
pub use ingest::{IngestError, Malformed, Outcome};
pub use intro::IntroPhase;
pub use replay::{DemoReplayEngine, ReplayStatus, REPLAY_ATTEMPTS};
