//! Rate (Hz) row: actual rate as a fraction of its target

use crate::config::{Color, RateRowConfig, Text, DEFAULT_STALE_TEXT};
use crate::traits::RateRowView;
use livedash_protocol::truncated;

use super::freshness::{Freshness, FreshnessState};

/// `value / target` in permille, clamped to 0..=1000
pub fn ratio_permille(value: i32, target: i32) -> u16 {
    let target = i64::from(target.max(1));
    let permille = (i64::from(value) * 1000 / target).clamp(0, 1000);
    permille as u16
}

/// Bar colour for a ratio: >= 90% green, >= 70% amber, else red
pub fn band_color(permille: u16) -> Color {
    match permille {
        900.. => Color::GREEN,
        700..=899 => Color::AMBER,
        _ => Color::RED,
    }
}

/// Live state of one rate row
#[derive(Debug, Clone)]
pub struct RateRow {
    config: RateRowConfig,
    permille: u16,
    text: Text,
    freshness: Freshness,
}

impl RateRow {
    pub fn new(config: RateRowConfig, stale_timeout_ms: u32) -> Self {
        Self {
            config,
            permille: 0,
            text: Text::new(),
            freshness: Freshness::new(stale_timeout_ms),
        }
    }

    pub fn id(&self) -> &str {
        &self.config.id
    }

    pub fn config(&self) -> &RateRowConfig {
        &self.config
    }

    pub fn permille(&self) -> u16 {
        self.permille
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn freshness(&self) -> &Freshness {
        &self.freshness
    }

    pub fn state(&self) -> FreshnessState {
        self.freshness.state()
    }

    pub fn publish(&mut self, value: i32, text: &str, now_ms: u32) {
        self.permille = ratio_permille(value, self.config.target);
        self.text = truncated(text);
        self.freshness.mark_fresh(now_ms);
    }

    /// Returns true when the row just went stale
    pub fn tick(&mut self, now_ms: u32) -> bool {
        self.freshness.tick(now_ms)
    }

    pub fn view(&self, index: usize) -> RateRowView {
        if self.freshness.is_stale() {
            RateRowView {
                index,
                id: self.config.id.clone(),
                permille: 0,
                text: truncated(DEFAULT_STALE_TEXT),
                color: Color::STALE,
                stale: true,
            }
        } else {
            RateRowView {
                index,
                id: self.config.id.clone(),
                permille: self.permille,
                text: self.text.clone(),
                color: band_color(self.permille),
                stale: false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Id;

    fn row(target: i32) -> RateRow {
        RateRow::new(
            RateRowConfig {
                id: Id::try_from("lidar").unwrap(),
                label: truncated("Lidar"),
                target,
            },
            500,
        )
    }

    #[test]
    fn test_ratio() {
        assert_eq!(ratio_permille(9, 10), 900);
        assert_eq!(ratio_permille(25, 10), 1000);
        assert_eq!(ratio_permille(-3, 10), 0);
        assert_eq!(ratio_permille(i32::MAX, 1), 1000);
        assert_eq!(ratio_permille(1, 3), 333);
    }

    #[test]
    fn test_bands() {
        assert_eq!(band_color(1000), Color::GREEN);
        assert_eq!(band_color(900), Color::GREEN);
        assert_eq!(band_color(899), Color::AMBER);
        assert_eq!(band_color(700), Color::AMBER);
        assert_eq!(band_color(699), Color::RED);
        assert_eq!(band_color(0), Color::RED);
    }

    #[test]
    fn test_publish_and_stale() {
        let mut r = row(200);
        assert!(r.view(0).stale);

        r.publish(150, "150 Hz", 1000);
        let view = r.view(0);
        assert!(!view.stale);
        assert_eq!(view.permille, 750);
        assert_eq!(view.color, Color::AMBER);
        assert_eq!(view.text.as_str(), "150 Hz");

        assert!(!r.tick(1500));
        assert!(r.tick(1501));
        let view = r.view(0);
        assert_eq!(view.permille, 0);
        assert_eq!(view.text.as_str(), "--");
    }
}
