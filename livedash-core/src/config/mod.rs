//! Dashboard configuration
//!
//! Parsed from `config.json` at startup. See [`validate`] for the accepted
//! document shape.

mod color;
mod error;
mod types;
mod validate;

pub use color::Color;
pub use error::ConfigError;
pub use types::*;
pub use validate::{load, validate};
