//! Bounded line framing for the serial transport.
//!
//! The transport delivers raw bytes; this module turns them into
//! newline-terminated ASCII lines of at most [`MAX_LINE_LEN`] bytes.
//! An over-long line is consumed through its terminator and reported,
//! after which the accumulator is back in sync for the next line.

use heapless::{String, Vec};

/// Maximum accepted line length in bytes, terminator excluded
pub const MAX_LINE_LEN: usize = 40;

/// A completed line, trailing `\r\n`/`\n` stripped
pub type Line = String<MAX_LINE_LEN>;

/// Errors that can occur while framing lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// Line exceeded [`MAX_LINE_LEN`] before its terminator
    TooLong,
    /// Line contained non-ASCII bytes
    NotAscii,
}

/// State machine for framing incoming lines
///
/// Feed bytes one at a time; a completed line is returned at each `\n`.
#[derive(Debug, Clone, Default)]
pub struct LineAccumulator {
    buf: Vec<u8, MAX_LINE_LEN>,
    overflowed: bool,
}

impl LineAccumulator {
    /// Create a new, empty accumulator
    pub fn new() -> Self {
        Self {
            buf: Vec::new(),
            overflowed: false,
        }
    }

    /// Discard any partially accumulated line
    pub fn reset(&mut self) {
        self.buf.clear();
        self.overflowed = false;
    }

    /// Feed a single byte to the accumulator
    ///
    /// Returns `Ok(Some(line))` when a terminator completes a valid line,
    /// `Ok(None)` when more bytes are needed, or `Err` at the terminator
    /// of an over-long or non-ASCII line.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Line>, LineError> {
        if byte != b'\n' {
            if self.buf.push(byte).is_err() {
                // Keep consuming until the terminator so the next line
                // starts clean.
                self.overflowed = true;
            }
            return Ok(None);
        }

        let overflowed = self.overflowed;
        // Tolerate CRLF terminators
        if self.buf.last() == Some(&b'\r') {
            self.buf.pop();
        }
        let line = match core::str::from_utf8(&self.buf) {
            Ok(s) if s.is_ascii() => String::try_from(s).ok(),
            _ => None,
        };
        self.reset();

        if overflowed {
            return Err(LineError::TooLong);
        }
        line.map(Some).ok_or(LineError::NotAscii)
    }

    /// Feed multiple bytes to the accumulator
    ///
    /// Returns the first complete line found, if any.
    /// Remaining bytes after a complete line are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<Line>, LineError> {
        for &byte in bytes {
            if let Some(line) = self.feed(byte)? {
                return Ok(Some(line));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_complete_line() {
        let mut acc = LineAccumulator::new();
        let line = acc.feed_bytes(b"10 20\n").unwrap().unwrap();
        assert_eq!(line.as_str(), "10 20");
    }

    #[test]
    fn test_feed_crlf() {
        let mut acc = LineAccumulator::new();
        let line = acc.feed_bytes(b"3\r\n").unwrap().unwrap();
        assert_eq!(line.as_str(), "3");
    }

    #[test]
    fn test_feed_empty_line() {
        let mut acc = LineAccumulator::new();
        let line = acc.feed_bytes(b"\n").unwrap().unwrap();
        assert_eq!(line.as_str(), "");
    }

    #[test]
    fn test_partial_line_pends() {
        let mut acc = LineAccumulator::new();
        assert_eq!(acc.feed_bytes(b"10 2").unwrap(), None);
        let line = acc.feed_bytes(b"0\n").unwrap().unwrap();
        assert_eq!(line.as_str(), "10 20");
    }

    #[test]
    fn test_overlong_line_rejected() {
        let mut acc = LineAccumulator::new();
        let long = [b'7'; MAX_LINE_LEN + 5];
        assert_eq!(acc.feed_bytes(&long).unwrap(), None);
        assert_eq!(acc.feed(b'\n'), Err(LineError::TooLong));
    }

    #[test]
    fn test_resync_after_overlong_line() {
        let mut acc = LineAccumulator::new();
        let long = [b'7'; MAX_LINE_LEN + 5];
        let _ = acc.feed_bytes(&long);
        assert_eq!(acc.feed(b'\n'), Err(LineError::TooLong));

        let line = acc.feed_bytes(b"10 20\n").unwrap().unwrap();
        assert_eq!(line.as_str(), "10 20");
    }

    #[test]
    fn test_non_ascii_rejected() {
        let mut acc = LineAccumulator::new();
        assert_eq!(acc.feed_bytes(&[0xC3, 0xA9, b'\n']), Err(LineError::NotAscii));

        // And back in sync afterwards
        let line = acc.feed_bytes(b"5\n").unwrap().unwrap();
        assert_eq!(line.as_str(), "5");
    }

    #[test]
    fn test_exact_capacity_line() {
        let mut acc = LineAccumulator::new();
        let full = [b'9'; MAX_LINE_LEN];
        assert_eq!(acc.feed_bytes(&full).unwrap(), None);
        let line = acc.feed(b'\n').unwrap().unwrap();
        assert_eq!(line.len(), MAX_LINE_LEN);
    }
}
