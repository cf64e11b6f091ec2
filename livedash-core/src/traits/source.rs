//! Demo recording source

use livedash_protocol::ByteSource;

/// Errors from a replay source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SourceError {
    /// The source could not seek back to its start
    RewindFailed,
}

impl core::fmt::Display for SourceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SourceError::RewindFailed => f.write_str("rewind failed"),
        }
    }
}

/// A recorded event log that can be read line by line and looped
pub trait ReplaySource: ByteSource {
    /// Seek back to the first byte
    fn rewind(&mut self) -> Result<(), SourceError>;
}

/// In-memory recording
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }
}

impl ByteSource for SliceSource<'_> {
    fn next_byte(&mut self) -> Option<u8> {
        let byte = self.data.get(self.pos).copied()?;
        self.pos += 1;
        Some(byte)
    }
}

impl ReplaySource for SliceSource<'_> {
    fn rewind(&mut self) -> Result<(), SourceError> {
        self.pos = 0;
        Ok(())
    }
}
