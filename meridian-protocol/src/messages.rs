//! Record types carried on the serial path protocol
//!
//! Two line-oriented records exist:
//! - the path header, whose first field is the declared coordinate count
//! - a track point, whose first two fields are latitude then longitude
//!
//! Fields beyond the ones a record needs are ignored, so a sender may
//! append diagnostics without breaking older firmware.

use core::fmt::Write;

use heapless::String;

/// Errors that can occur while parsing a record from a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WireError {
    /// A required field is absent
    MissingField,
    /// A field is not a decimal integer in range
    InvalidNumber,
}

fn parse_int(field: &str) -> Result<i32, WireError> {
    field.parse().map_err(|_| WireError::InvalidNumber)
}

/// Path header: the declared coordinate count
///
/// The count is carried as a signed 32-bit value so that out-of-range
/// declarations (negative, absurdly large) survive parsing and can be
/// rejected by the ingestion layer rather than wrapping silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PathHeader {
    /// Declared number of track points to follow
    pub count: i32,
}

impl PathHeader {
    /// Parse a header from its line
    pub fn parse(line: &str) -> Result<Self, WireError> {
        let field = line
            .split_ascii_whitespace()
            .next()
            .ok_or(WireError::MissingField)?;
        Ok(Self {
            count: parse_int(field)?,
        })
    }

    /// Encode this header as a line (for testing or simulation)
    pub fn to_line(&self) -> String<16> {
        let mut s = String::new();
        let _ = write!(s, "{}", self.count);
        s
    }
}

/// A single track point in map-native integer units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TrackPoint {
    /// Latitude, map-native units
    pub lat: i32,
    /// Longitude, map-native units
    pub lon: i32,
}

impl TrackPoint {
    /// Parse a track point from its line
    pub fn parse(line: &str) -> Result<Self, WireError> {
        let mut fields = line.split_ascii_whitespace();
        let lat = parse_int(fields.next().ok_or(WireError::MissingField)?)?;
        let lon = parse_int(fields.next().ok_or(WireError::MissingField)?)?;
        Ok(Self { lat, lon })
    }

    /// Encode this track point as a line (for testing or simulation)
    pub fn to_line(&self) -> String<24> {
        let mut s = String::new();
        let _ = write!(s, "{} {}", self.lat, self.lon);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_parse() {
        let header = PathHeader::parse("12").unwrap();
        assert_eq!(header.count, 12);
    }

    #[test]
    fn test_header_negative_count_survives_parse() {
        let header = PathHeader::parse("-1").unwrap();
        assert_eq!(header.count, -1);
    }

    #[test]
    fn test_header_leading_whitespace() {
        let header = PathHeader::parse("  7 ").unwrap();
        assert_eq!(header.count, 7);
    }

    #[test]
    fn test_header_empty_line() {
        assert_eq!(PathHeader::parse(""), Err(WireError::MissingField));
        assert_eq!(PathHeader::parse("   "), Err(WireError::MissingField));
    }

    #[test]
    fn test_header_non_numeric() {
        assert_eq!(PathHeader::parse("twelve"), Err(WireError::InvalidNumber));
        assert_eq!(PathHeader::parse("12a"), Err(WireError::InvalidNumber));
    }

    #[test]
    fn test_header_overflow() {
        assert_eq!(
            PathHeader::parse("99999999999"),
            Err(WireError::InvalidNumber)
        );
    }

    #[test]
    fn test_track_point_parse() {
        let point = TrackPoint::parse("10 20").unwrap();
        assert_eq!(point, TrackPoint { lat: 10, lon: 20 });
    }

    #[test]
    fn test_track_point_negative_coordinates() {
        let point = TrackPoint::parse("-5346262 -11330462").unwrap();
        assert_eq!(point.lat, -5346262);
        assert_eq!(point.lon, -11330462);
    }

    #[test]
    fn test_track_point_trailing_fields_ignored() {
        let point = TrackPoint::parse("10 20 extra junk").unwrap();
        assert_eq!(point, TrackPoint { lat: 10, lon: 20 });
    }

    #[test]
    fn test_track_point_missing_longitude() {
        assert_eq!(TrackPoint::parse("10"), Err(WireError::MissingField));
    }

    #[test]
    fn test_track_point_non_numeric_field() {
        assert_eq!(TrackPoint::parse("10 abc"), Err(WireError::InvalidNumber));
        assert_eq!(TrackPoint::parse("x 20"), Err(WireError::InvalidNumber));
    }

    #[test]
    fn test_roundtrip() {
        let point = TrackPoint { lat: -42, lon: 117 };
        let parsed = TrackPoint::parse(&point.to_line()).unwrap();
        assert_eq!(parsed, point);

        let header = PathHeader { count: 3 };
        let parsed = PathHeader::parse(&header.to_line()).unwrap();
        assert_eq!(parsed, header);
    }
}
