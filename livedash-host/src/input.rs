//! Stdin feed
//!
//! A reader thread forwards raw stdin chunks over a channel so the main loop
//! can drain whatever has arrived without blocking.

use std::io::{self, Read};
use std::thread;

use crossbeam_channel::{unbounded, Receiver, TryRecvError};
use livedash_protocol::{LineAccumulator, LineError};

const CHUNK: usize = 256;

/// Spawn the reader; the channel disconnects at end of input
pub fn spawn_stdin_reader() -> Receiver<Vec<u8>> {
    let (tx, rx) = unbounded();
    thread::spawn(move || {
        let mut stdin = io::stdin().lock();
        let mut buf = [0u8; CHUNK];
        loop {
            match stdin.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => {
                    if tx.send(buf[..n].to_vec()).is_err() {
                        break;
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    tracing::warn!("LINE: stdin read failed: {e}");
                    break;
                }
            }
        }
    });
    rx
}

/// Non-blocking line feed over a byte channel
#[derive(Debug)]
pub struct LineFeed {
    rx: Receiver<Vec<u8>>,
    lines: LineAccumulator,
    open: bool,
}

impl LineFeed {
    pub fn new(rx: Receiver<Vec<u8>>) -> Self {
        Self {
            rx,
            lines: LineAccumulator::new(),
            open: true,
        }
    }

    /// False once the sender is gone and everything was drained
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Hand every complete line received so far to `on_line`
    pub fn drain(&mut self, mut on_line: impl FnMut(Result<&str, LineError>)) {
        loop {
            match self.rx.try_recv() {
                Ok(chunk) => self.lines.feed_bytes(&chunk, &mut on_line),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if self.open && self.lines.pending() > 0 {
                        // Unterminated last line
                        self.lines.feed_bytes(b"\n", &mut on_line);
                    }
                    self.open = false;
                    break;
                }
            }
        }
    }
}
