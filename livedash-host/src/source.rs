//! File-backed demo recording

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use anyhow::{Context, Result};
use livedash_core::traits::{ReplaySource, SourceError};
use livedash_protocol::ByteSource;

/// A recording read from disk through a buffered reader
#[derive(Debug)]
pub struct FileSource {
    reader: BufReader<File>,
}

impl FileSource {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("demo file not found: {}", path.display()))?;
        Ok(Self {
            reader: BufReader::new(file),
        })
    }
}

impl ByteSource for FileSource {
    fn next_byte(&mut self) -> Option<u8> {
        let mut byte = [0u8; 1];
        match self.reader.read(&mut byte) {
            Ok(1) => Some(byte[0]),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!("DEMO: read failed: {e}");
                None
            }
        }
    }
}

impl ReplaySource for FileSource {
    fn rewind(&mut self) -> Result<(), SourceError> {
        self.reader
            .seek(SeekFrom::Start(0))
            .map(|_| ())
            .map_err(|_| SourceError::RewindFailed)
    }
}
