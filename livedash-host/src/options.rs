//! Runtime options
//!
//! Loaded from an optional TOML file, then overridden by command line flags.
//!
//! ```toml
//! demo = true
//! demo_path = "/test.jsonl"
//! demo_period_ms = 1000
//! tick_ms = 10
//! screenshot_dir = "screenshots"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Default demo recording path
pub const DEFAULT_DEMO_PATH: &str = "/test.jsonl";

/// Default demo period
pub const DEFAULT_DEMO_PERIOD_MS: u32 = 1000;

/// Default main loop interval
pub const DEFAULT_TICK_MS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeOptions {
    /// Replay `demo_path` until the first external input
    pub demo: bool,
    pub demo_path: PathBuf,
    pub demo_period_ms: u32,
    pub tick_ms: u64,
    /// Capture one text frame per replayed line into `run_<N>` here
    pub screenshot_dir: Option<PathBuf>,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            demo: false,
            demo_path: PathBuf::from(DEFAULT_DEMO_PATH),
            demo_period_ms: DEFAULT_DEMO_PERIOD_MS,
            tick_ms: DEFAULT_TICK_MS,
            screenshot_dir: None,
        }
    }
}

/// Command line overrides; `None` keeps the file value
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub demo: bool,
    pub demo_path: Option<PathBuf>,
    pub demo_period_ms: Option<u32>,
    pub tick_ms: Option<u64>,
    pub screenshot_dir: Option<PathBuf>,
}

impl RuntimeOptions {
    /// Read an options file, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = fs::read_to_string(path)
            .with_context(|| format!("read options file {}", path.display()))?;
        Self::from_toml_str(&raw).with_context(|| format!("parse options file {}", path.display()))
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn apply(mut self, overrides: Overrides) -> Self {
        self.demo |= overrides.demo;
        if let Some(path) = overrides.demo_path {
            self.demo_path = path;
        }
        if let Some(period) = overrides.demo_period_ms {
            self.demo_period_ms = period;
        }
        if let Some(tick) = overrides.tick_ms {
            self.tick_ms = tick;
        }
        if overrides.screenshot_dir.is_some() {
            self.screenshot_dir = overrides.screenshot_dir;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = RuntimeOptions::load(None).unwrap();
        assert!(!options.demo);
        assert_eq!(options.demo_path, PathBuf::from("/test.jsonl"));
        assert_eq!(options.demo_period_ms, 1000);
        assert_eq!(options.tick_ms, 10);
    }

    #[test]
    fn test_partial_file() {
        let options = RuntimeOptions::from_toml_str("demo = true\ndemo_period_ms = 250\n").unwrap();
        assert!(options.demo);
        assert_eq!(options.demo_period_ms, 250);
        assert_eq!(options.demo_path, PathBuf::from(DEFAULT_DEMO_PATH));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(RuntimeOptions::from_toml_str("demo_perod_ms = 5").is_err());
    }

    #[test]
    fn test_flags_override_file() {
        let options = RuntimeOptions::from_toml_str("demo_path = \"a.jsonl\"\ntick_ms = 5").unwrap();
        let options = options.apply(Overrides {
            demo: true,
            demo_path: Some(PathBuf::from("b.jsonl")),
            ..Default::default()
        });
        assert!(options.demo);
        assert_eq!(options.demo_path, PathBuf::from("b.jsonl"));
        assert_eq!(options.tick_ms, 5);
    }
}
