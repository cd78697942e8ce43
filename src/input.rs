//! Level input protocol
//!
//! The audio monitor sends one newline-terminated ASCII line per update in
//! the form `low[,high]`, where both fields are decimal integers. Whitespace
//! around each field is ignored and values above 255 are clamped.
//!
//! Malformed lines never reach the display: an invalid low field discards the
//! whole line, an invalid high field only marks the high band unavailable.

use core::fmt::{self, Write};

use heapless::String;

/// Capacity of an encoded line (`"255,255\n"` plus headroom)
pub const ENCODED_LINE_CAPACITY: usize = 16;

/// One decoded protocol line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelSample {
    /// Low band level
    pub low: u8,
    /// High band level, `None` when the line carried no valid high field
    pub high: Option<u8>,
}

impl LevelSample {
    pub const fn new(low: u8, high: Option<u8>) -> Self {
        Self { low, high }
    }
}

/// Reason a line was discarded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// The line has no low field at all
    MissingLow,
    /// The low field is not an integer
    InvalidLow,
    /// The low field is a negative integer
    NegativeLow,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingLow => f.write_str("missing low level"),
            Self::InvalidLow => f.write_str("low level is not an integer"),
            Self::NegativeLow => f.write_str("low level is negative"),
        }
    }
}

/// Latest accepted levels, read by the render loop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    low: u8,
    high: u8,
    high_available: bool,
}

impl InputState {
    pub const fn new() -> Self {
        Self {
            low: 0,
            high: 0,
            high_available: false,
        }
    }

    pub const fn low(&self) -> u8 {
        self.low
    }

    /// High band level, zero while unavailable
    pub const fn high(&self) -> u8 {
        self.high
    }

    pub const fn high_available(&self) -> bool {
        self.high_available
    }

    /// High band level if the last accepted line carried one
    pub const fn high_level(&self) -> Option<u8> {
        if self.high_available {
            Some(self.high)
        } else {
            None
        }
    }

    /// Store an accepted sample
    pub fn apply(&mut self, sample: LevelSample) {
        self.low = sample.low;
        match sample.high {
            Some(high) => {
                self.high = high;
                self.high_available = true;
            }
            None => {
                self.high = 0;
                self.high_available = false;
            }
        }
    }

    /// Parse a line and store it
    ///
    /// On error the state is left untouched.
    pub fn apply_line(&mut self, line: &str) -> Result<LevelSample, ParseError> {
        let sample = parse_line(line)?;
        self.apply(sample);
        Ok(sample)
    }
}

/// Parse one protocol line (without its terminator)
///
/// Fields after the second one are ignored.
pub fn parse_line(line: &str) -> Result<LevelSample, ParseError> {
    let mut fields = line.trim_end_matches(['\r', '\n']).split(',');

    let low = fields
        .next()
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .ok_or(ParseError::MissingLow)?;
    let low = parse_level(low)?;

    let high = fields.next().and_then(|field| parse_level(field.trim()).ok());

    Ok(LevelSample { low, high })
}

/// Encode a sample the way the audio monitor writes it to the serial port
pub fn encode_line(sample: &LevelSample) -> Result<String<ENCODED_LINE_CAPACITY>, fmt::Error> {
    let mut line = String::new();
    write!(line, "{}", sample.low)?;
    if let Some(high) = sample.high {
        write!(line, ",{}", high)?;
    }
    line.push('\n').map_err(|()| fmt::Error)?;
    Ok(line)
}

/// Parse a decimal level, clamping anything above 255
///
/// Digit strings of any length are accepted, so oversized values saturate
/// instead of failing.
fn parse_level(field: &str) -> Result<u8, ParseError> {
    let (negative, digits) = match field.as_bytes().first() {
        Some(b'-') => (true, &field[1..]),
        Some(b'+') => (false, &field[1..]),
        _ => (false, field),
    };
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(ParseError::InvalidLow);
    }

    let value = digits.bytes().fold(0u16, |value, digit| {
        value
            .saturating_mul(10)
            .saturating_add(u16::from(digit - b'0'))
    });
    if negative && value > 0 {
        return Err(ParseError::NegativeLow);
    }
    Ok(u8::try_from(value).unwrap_or(u8::MAX))
}
