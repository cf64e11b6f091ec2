//! Line classification
//!
//! Decides whether a framed line is a telemetry event or a command.

/// A classified, trimmed inbound line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Message<'a> {
    /// JSON telemetry payload (object or array), starting with `{` or `[`
    Event(&'a str),
    /// Literal action identifier
    Command(&'a str),
}

impl<'a> Message<'a> {
    /// Classify a raw line
    ///
    /// Returns `None` for a line that is blank after trimming.
    pub fn classify(line: &'a str) -> Option<Self> {
        let line = trim_line(line);
        match line.as_bytes().first()? {
            b'{' | b'[' => Some(Message::Event(line)),
            _ => Some(Message::Command(line)),
        }
    }

    /// The trimmed line text
    pub fn as_str(&self) -> &'a str {
        match self {
            Message::Event(s) | Message::Command(s) => s,
        }
    }
}

/// Trim the whitespace the feed can carry (space, tab, CR, LF)
pub fn trim_line(line: &str) -> &str {
    line.trim_matches(|c| matches!(c, ' ' | '\t' | '\r' | '\n'))
}

/// Copy `text` into a fixed-capacity string, cutting on a char boundary
pub fn truncated<const N: usize>(text: &str) -> heapless::String<N> {
    let mut end = text.len().min(N);
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    let mut out = heapless::String::new();
    // Cannot fail: end <= N
    let _ = out.push_str(&text[..end]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_event() {
        assert_eq!(
            Message::classify("  {\"id\":\"a\"}\r\n"),
            Some(Message::Event("{\"id\":\"a\"}"))
        );
        assert_eq!(Message::classify("[]"), Some(Message::Event("[]")));
    }

    #[test]
    fn test_classify_command() {
        assert_eq!(Message::classify("\tshutdown "), Some(Message::Command("shutdown")));
    }

    #[test]
    fn test_classify_blank() {
        assert_eq!(Message::classify(""), None);
        assert_eq!(Message::classify(" \t\r\n"), None);
    }

    #[test]
    fn test_truncated_respects_char_boundary() {
        let s: heapless::String<4> = truncated("ab°C");
        // '°' is two bytes, so only "ab°" (4 bytes) fits
        assert_eq!(s.as_str(), "ab°");

        let s: heapless::String<3> = truncated("ab°C");
        assert_eq!(s.as_str(), "ab");

        let s: heapless::String<8> = truncated("ok");
        assert_eq!(s.as_str(), "ok");
    }
}
