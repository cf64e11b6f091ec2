//! Colour values and their config spellings

#[cfg(feature = "serde")]
use serde::Serialize;

/// 24-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Color(u32);

impl Color {
    pub const GREEN: Color = Color(0x4CAF50);
    pub const AMBER: Color = Color(0xFFC107);
    pub const ORANGE: Color = Color(0xFF9800);
    pub const RED: Color = Color(0xF44336);
    pub const BLUE: Color = Color(0x2196F3);
    pub const CYAN: Color = Color(0x00BCD4);
    pub const PURPLE: Color = Color(0x9C27B0);
    pub const TEAL: Color = Color(0x009688);
    pub const YELLOW: Color = Color(0xFFEB3B);
    pub const GREY: Color = Color(0x9E9E9E);
    pub const WHITE: Color = Color(0xFFFFFF);

    /// Default screen background
    pub const BACKGROUND: Color = Color(0x0B1220);
    /// Indicator colour of a stale widget
    pub const STALE: Color = Color(0x475569);

    /// Build from a `0xRRGGBB` value (upper byte ignored)
    pub const fn rgb(value: u32) -> Self {
        Color(value & 0x00FF_FFFF)
    }

    /// Parse `#RRGGBB`, `0xRRGGBB`, or a palette name (case-insensitive)
    pub fn parse(text: &str) -> Option<Self> {
        if let Some(hex) = text.strip_prefix('#') {
            return parse_hex(hex);
        }
        if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
            return parse_hex(hex);
        }

        const PALETTE: [(&str, Color); 12] = [
            ("green", Color::GREEN),
            ("amber", Color::AMBER),
            ("orange", Color::ORANGE),
            ("red", Color::RED),
            ("blue", Color::BLUE),
            ("cyan", Color::CYAN),
            ("purple", Color::PURPLE),
            ("teal", Color::TEAL),
            ("yellow", Color::YELLOW),
            ("grey", Color::GREY),
            ("gray", Color::GREY),
            ("white", Color::WHITE),
        ];

        PALETTE
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(text))
            .map(|&(_, color)| color)
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(hex, 16).ok().map(Color)
}

impl core::fmt::Display for Color {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{:06X}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(Color::parse("#0B1220"), Some(Color::rgb(0x0B1220)));
        assert_eq!(Color::parse("0x00ff00"), Some(Color::rgb(0x00FF00)));
        assert_eq!(Color::parse("0XABCDEF"), Some(Color::rgb(0xABCDEF)));
    }

    #[test]
    fn test_parse_rejects_bad_hex() {
        assert_eq!(Color::parse("#12345"), None);
        assert_eq!(Color::parse("#1234567"), None);
        assert_eq!(Color::parse("#GG0000"), None);
        assert_eq!(Color::parse("0x"), None);
        assert_eq!(Color::parse("#+12345"), None);
    }

    #[test]
    fn test_parse_palette_case_insensitive() {
        assert_eq!(Color::parse("Green"), Some(Color::GREEN));
        assert_eq!(Color::parse("AMBER"), Some(Color::AMBER));
        assert_eq!(Color::parse("gray"), Some(Color::GREY));
        assert_eq!(Color::parse("grey"), Some(Color::GREY));
        assert_eq!(Color::parse("magenta"), None);
        assert_eq!(Color::parse(""), None);
    }

    #[test]
    fn test_mask_and_display() {
        let c = Color::rgb(0xFF123456);
        assert_eq!(c, Color::rgb(0x123456));
        assert_eq!(alloc::format!("{}", c), "#123456");
    }
}
