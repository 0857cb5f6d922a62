//! Serial Path Protocol
//!
//! This crate defines the line-oriented serial protocol used to send a
//! travel path from a host to the Meridian map display. The protocol is
//! plain ASCII so it can be driven from a terminal for bench testing.
//!
//! # Protocol Overview
//!
//! A path is a count line followed by one coordinate line per point:
//!
//! ```text
//! <N>\n            declared coordinate count (decimal integer)
//! <lat> <lon>\n    repeated N times, decimal integers
//! ```
//!
//! Fields are whitespace-separated. There is no checksum and no explicit
//! end-of-path marker beyond the count. Lines are bounded to
//! [`MAX_LINE_LEN`] bytes; the framer resynchronizes on the next newline
//! after an over-long line.
//!
//! Coordinates are in the map's native integer units, not pixels - the
//! display owns the conversion to pixel space.

#![no_std]
#![deny(unsafe_code)]

pub mod line;
pub mod messages;

pub use line::{Line, LineAccumulator, LineError, MAX_LINE_LEN};
pub use messages::{PathHeader, TrackPoint, WireError};
