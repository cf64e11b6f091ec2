//! Line framing for the dashboard feed.
//!
//! Two readers share the same rules (`\r` ignored, `\n` terminates, lines
//! longer than the buffer are dropped whole):
//! - [`LineAccumulator`] is fed bytes as they trickle in from a serial link
//!   and never blocks.
//! - [`read_line`] pulls one line at a time from a [`ByteSource`], used by
//!   demo replay.

use heapless::Vec;

/// Maximum line length in bytes (excluding the terminator)
pub const MAX_LINE_LEN: usize = 1024;

/// Errors that can occur while framing a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// Line exceeded the buffer capacity and was dropped
    TooLong,
    /// Line is not valid UTF-8
    InvalidUtf8,
}

impl core::fmt::Display for LineError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LineError::TooLong => write!(f, "line too long (max {} bytes)", MAX_LINE_LEN),
            LineError::InvalidUtf8 => f.write_str("line is not valid UTF-8"),
        }
    }
}

/// Byte-fed line accumulator
///
/// Holds at most `N` bytes of the line in progress. Once a line overflows,
/// the remaining bytes up to the next newline are discarded and the overflow
/// is reported once, when that newline arrives.
#[derive(Debug, Clone)]
pub struct LineAccumulator<const N: usize = MAX_LINE_LEN> {
    buffer: Vec<u8, N>,
    /// Dropping bytes until the next newline
    dropping: bool,
    /// Previous call returned a complete line still held in `buffer`
    complete: bool,
}

impl<const N: usize> Default for LineAccumulator<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> LineAccumulator<N> {
    /// Create an empty accumulator
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            dropping: false,
            complete: false,
        }
    }

    /// Number of bytes buffered for the line in progress
    pub fn pending(&self) -> usize {
        if self.complete {
            0
        } else {
            self.buffer.len()
        }
    }

    /// Feed a single byte
    ///
    /// Returns `Some(Ok(line))` when a newline completes a non-empty line,
    /// `Some(Err(_))` when a newline ends a dropped or undecodable line, and
    /// `None` otherwise.
    pub fn feed(&mut self, byte: u8) -> Option<Result<&str, LineError>> {
        if self.complete {
            self.buffer.clear();
            self.complete = false;
        }

        match byte {
            b'\n' => {
                if self.dropping {
                    self.dropping = false;
                    self.buffer.clear();
                    return Some(Err(LineError::TooLong));
                }
                if self.buffer.is_empty() {
                    return None;
                }
                self.complete = true;
                Some(core::str::from_utf8(&self.buffer).map_err(|_| LineError::InvalidUtf8))
            }
            b'\r' => None,
            _ if self.dropping => None,
            _ => {
                if self.buffer.push(byte).is_err() {
                    self.buffer.clear();
                    self.dropping = true;
                }
                None
            }
        }
    }

    /// Feed every byte in `bytes`, calling `on_line` for each completed line
    pub fn feed_bytes<F>(&mut self, bytes: &[u8], mut on_line: F)
    where
        F: FnMut(Result<&str, LineError>),
    {
        for &byte in bytes {
            if let Some(result) = self.feed(byte) {
                on_line(result);
            }
        }
    }
}

/// Forward-only byte stream that lines are read from
pub trait ByteSource {
    /// Next byte, or `None` at end of data (or on a read fault)
    fn next_byte(&mut self) -> Option<u8>;
}

/// Result of a successful [`read_line`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineRead {
    /// A line (possibly blank) was read into the buffer
    Line,
    /// The source was already exhausted; nothing was read
    Eof,
}

/// Read one line from `source` into `out`
///
/// `out` is cleared first. A line longer than `out`'s capacity is consumed up
/// to its newline and reported as [`LineError::TooLong`].
pub fn read_line<S, const N: usize>(source: &mut S, out: &mut Vec<u8, N>) -> Result<LineRead, LineError>
where
    S: ByteSource + ?Sized,
{
    out.clear();
    let mut got_any = false;

    while let Some(byte) = source.next_byte() {
        got_any = true;
        match byte {
            b'\n' => break,
            b'\r' => continue,
            _ => {
                if out.push(byte).is_err() {
                    out.clear();
                    while let Some(rest) = source.next_byte() {
                        if rest == b'\n' {
                            break;
                        }
                    }
                    return Err(LineError::TooLong);
                }
            }
        }
    }

    if got_any {
        Ok(LineRead::Line)
    } else {
        Ok(LineRead::Eof)
    }
}
