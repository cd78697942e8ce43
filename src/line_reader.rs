//! Serial line framing
//!
//! Splits the raw byte stream coming from the serial port into
//! newline-terminated lines. Carriage returns are dropped so both `\n` and
//! `\r\n` terminators work.

use core::fmt;

use heapless::Vec;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::channel::LevelSender;
use crate::input::parse_line;

/// Default line buffer size, enough for `"255,255"` with generous padding
pub const DEFAULT_LINE_CAPACITY: usize = 32;

/// Reason a framed line could not be returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineError {
    /// The line did not fit into the buffer and was dropped
    TooLong,
    /// The line is not valid UTF-8
    InvalidUtf8,
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLong => f.write_str("line exceeds buffer capacity"),
            Self::InvalidUtf8 => f.write_str("line is not valid UTF-8"),
        }
    }
}

/// Accumulates bytes until a line terminator arrives
///
/// N is the maximum line length in bytes, excluding the terminator.
#[derive(Debug, Default)]
pub struct LineReader<const N: usize = DEFAULT_LINE_CAPACITY> {
    buffer: Vec<u8, N>,
    overflowed: bool,
    complete: bool,
}

impl<const N: usize> LineReader<N> {
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            overflowed: false,
            complete: false,
        }
    }

    /// Push one byte
    ///
    /// Returns the finished line when `byte` is a newline. The returned
    /// line stays valid until the next call.
    pub fn push(&mut self, byte: u8) -> Option<Result<&str, LineError>> {
        if self.complete {
            self.buffer.clear();
            self.overflowed = false;
            self.complete = false;
        }

        match byte {
            b'\r' => None,
            b'\n' => {
                self.complete = true;
                if self.overflowed {
                    return Some(Err(LineError::TooLong));
                }
                Some(core::str::from_utf8(&self.buffer).map_err(|_| LineError::InvalidUtf8))
            }
            _ => {
                if self.buffer.push(byte).is_err() {
                    self.overflowed = true;
                }
                None
            }
        }
    }

    /// Push a chunk of bytes, calling `on_line` for every finished line
    pub fn feed(&mut self, bytes: &[u8], mut on_line: impl FnMut(Result<&str, LineError>)) {
        for &byte in bytes {
            if let Some(line) = self.push(byte) {
                on_line(line);
            }
        }
    }

    /// Parse every finished line in `bytes` and queue accepted samples
    ///
    /// Malformed lines are dropped. When the channel is full the oldest
    /// queued sample makes room, so the newest line always reaches the
    /// renderer. Returns the number of queued samples.
    pub fn forward<const SIZE: usize>(
        &mut self,
        bytes: &[u8],
        sender: &LevelSender<'_, SIZE>,
    ) -> usize {
        let mut queued = 0;
        self.feed(bytes, |line| {
            let line = match line {
                Ok(line) => line,
                Err(_error) => {
                    #[cfg(feature = "esp32-log")]
                    println!("[LineReader.forward] dropping line: {}", _error);
                    return;
                }
            };
            match parse_line(line) {
                Ok(sample) => {
                    let _evicted = sender.send_overwrite(sample);
                    #[cfg(feature = "esp32-log")]
                    if _evicted.is_some() {
                        println!("[LineReader.forward] channel full, oldest sample dropped");
                    }
                    queued += 1;
                }
                Err(_error) => {
                    #[cfg(feature = "esp32-log")]
                    println!("[LineReader.forward] ignoring {:?}: {}", line, _error);
                }
            }
        });
        queued
    }
}
