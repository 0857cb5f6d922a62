//! Serial path ingestion
//!
//! Turns the line-oriented serial stream into an owned, validated
//! [`Path`], bounding the single allocation to a ceiling derived from
//! the live free-heap figure.
//!
//! [`PathAssembler`] is the line-by-line state machine, in the same
//! incremental style as the transport's line framer, so an async task
//! can drive it directly as lines arrive. [`read_path`] is the blocking
//! driver over a [`LineSource`] for synchronous callers and tests.

use alloc::vec::Vec;

use meridian_protocol::{PathHeader, TrackPoint, MAX_LINE_LEN};

use crate::config::IngestConfig;
use crate::path::{max_path_len, Coordinate, Path, MAX_PATH_LEN};
use crate::traits::mem::HeapGauge;

/// Errors that can fail a path ingestion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PathError {
    /// Declared count negative, unparseable, or above the memory ceiling
    InvalidLength,
    /// Allocator refused the coordinate array
    OutOfMemory,
    /// A coordinate line failed to parse
    MalformedCoordinate,
    /// No line arrived within the transport's configured wait
    Timeout,
    /// Transport-level failure
    Link,
}

impl PathError {
    /// Numeric status for diagnostics; 0 is reserved for success
    pub fn code(&self) -> u8 {
        match self {
            PathError::InvalidLength => 1,
            PathError::OutOfMemory => 2,
            PathError::MalformedCoordinate => 3,
            PathError::Timeout => 4,
            PathError::Link => 5,
        }
    }
}

/// Errors a [`LineSource`] can report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SourceError {
    /// No complete line within the source's configured wait
    Timeout,
    /// Framing failure (over-long or non-ASCII line)
    BadLine,
    /// Bus failure
    Link,
}

/// Blocking line transport consumed by [`read_path`]
///
/// Implementations own the byte-level framing (see
/// [`meridian_protocol::LineAccumulator`]) and the timeout policy from
/// [`IngestConfig::header_timeout_ms`].
pub trait LineSource {
    /// Read one line, terminator excluded
    ///
    /// Blocks until a full line arrives, the configured wait elapses,
    /// or the transport fails.
    fn read_line<'a>(&mut self, buf: &'a mut [u8]) -> Result<&'a str, SourceError>;
}

/// Line-by-line ingestion state machine
///
/// Construct with the admissible maximum length - normally via
/// [`PathAssembler::with_gauge`] at the moment ingestion starts, so the
/// ceiling reflects the heap as it is then - and feed one line at a
/// time. Any error resets the assembler to await a fresh header, and a
/// completed path leaves it ready for the next one.
#[derive(Debug)]
pub struct PathAssembler {
    limit: usize,
    state: AssembleState,
}

#[derive(Debug)]
enum AssembleState {
    /// Waiting for the count line
    AwaitHeader,
    /// Collecting `expect` coordinates
    Collecting {
        points: Vec<Coordinate>,
        expect: usize,
    },
}

impl PathAssembler {
    /// Create an assembler that accepts declared counts up to `limit`
    pub fn new(limit: usize) -> Self {
        Self {
            limit: limit.min(MAX_PATH_LEN),
            state: AssembleState::AwaitHeader,
        }
    }

    /// Create an assembler sized against the live heap
    pub fn with_gauge<G: HeapGauge>(gauge: &G, config: &IngestConfig) -> Self {
        Self::new(max_path_len(gauge.free_bytes(), config.reserve_bytes))
    }

    /// The admissible maximum declared count
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Coordinate lines still expected, once a header has been accepted
    pub fn remaining(&self) -> Option<usize> {
        match &self.state {
            AssembleState::AwaitHeader => None,
            AssembleState::Collecting { points, expect } => Some(expect - points.len()),
        }
    }

    /// Discard any partially assembled path
    pub fn reset(&mut self) {
        self.state = AssembleState::AwaitHeader;
    }

    /// Feed one line
    ///
    /// Returns `Ok(Some(path))` when the declared count is reached,
    /// `Ok(None)` when more lines are needed.
    pub fn feed_line(&mut self, line: &str) -> Result<Option<Path>, PathError> {
        // Errors leave the state at AwaitHeader, dropping any partial
        // allocation with it.
        match core::mem::replace(&mut self.state, AssembleState::AwaitHeader) {
            AssembleState::AwaitHeader => {
                let header = PathHeader::parse(line).map_err(|_| PathError::InvalidLength)?;
                if header.count < 0 || header.count as usize > self.limit {
                    return Err(PathError::InvalidLength);
                }
                let expect = header.count as usize;
                if expect == 0 {
                    return Ok(Some(Path::empty()));
                }

                let mut points = Vec::new();
                points
                    .try_reserve_exact(expect)
                    .map_err(|_| PathError::OutOfMemory)?;
                self.state = AssembleState::Collecting { points, expect };
                Ok(None)
            }
            AssembleState::Collecting { mut points, expect } => {
                let point =
                    TrackPoint::parse(line).map_err(|_| PathError::MalformedCoordinate)?;
                points.push(point.into());
                if points.len() == expect {
                    Ok(Some(Path::from_points(points)))
                } else {
                    self.state = AssembleState::Collecting { points, expect };
                    Ok(None)
                }
            }
        }
    }
}

/// Read one complete path from a line source
///
/// Blocks until a path is complete or an error ends the attempt. The
/// memory ceiling is sampled from the gauge when the call starts, so a
/// shrinking heap bounds what the stream may claim. Consumes exactly
/// `N + 1` lines on success and only the header line when its
/// validation fails.
pub fn read_path<S, G>(source: &mut S, gauge: &G, config: &IngestConfig) -> Result<Path, PathError>
where
    S: LineSource,
    G: HeapGauge,
{
    let mut assembler = PathAssembler::with_gauge(gauge, config);
    let mut buf = [0u8; MAX_LINE_LEN];

    loop {
        let line = match source.read_line(&mut buf) {
            Ok(line) => line,
            Err(err) => return Err(source_error(err, assembler.remaining().is_none())),
        };
        if let Some(path) = assembler.feed_line(line)? {
            return Ok(path);
        }
    }
}

fn source_error(err: SourceError, awaiting_header: bool) -> PathError {
    match err {
        SourceError::Timeout => PathError::Timeout,
        SourceError::Link => PathError::Link,
        SourceError::BadLine if awaiting_header => PathError::InvalidLength,
        SourceError::BadLine => PathError::MalformedCoordinate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::mem::FixedGauge;
    use alloc::vec;
    use alloc::vec::Vec;

    const COORD_SIZE: usize = core::mem::size_of::<Coordinate>();

    /// Replays scripted lines, then reports `then` forever
    struct ScriptSource {
        lines: Vec<&'static str>,
        consumed: usize,
        then: SourceError,
    }

    impl ScriptSource {
        fn new(lines: &[&'static str]) -> Self {
            Self {
                lines: lines.to_vec(),
                consumed: 0,
                then: SourceError::Timeout,
            }
        }
    }

    impl LineSource for ScriptSource {
        fn read_line<'a>(&mut self, buf: &'a mut [u8]) -> Result<&'a str, SourceError> {
            let Some(line) = self.lines.get(self.consumed) else {
                return Err(self.then);
            };
            self.consumed += 1;
            let bytes = line.as_bytes();
            buf[..bytes.len()].copy_from_slice(bytes);
            Ok(core::str::from_utf8(&buf[..bytes.len()]).unwrap())
        }
    }

    fn roomy_gauge() -> FixedGauge {
        // Plenty of headroom over the default reserve
        FixedGauge(8 * 1024)
    }

    #[test]
    fn test_read_path_success() {
        let mut source = ScriptSource::new(&["2", "10 20", "30 40"]);
        let path = read_path(&mut source, &roomy_gauge(), &IngestConfig::default()).unwrap();

        assert_eq!(path.len(), 2);
        assert_eq!(
            path.points(),
            &[
                Coordinate { lat: 10, lon: 20 },
                Coordinate { lat: 30, lon: 40 },
            ]
        );
        // Exactly N + 1 lines consumed
        assert_eq!(source.consumed, 3);
    }

    #[test]
    fn test_read_path_every_length_up_to_ceiling() {
        // Small heap: ceiling of exactly 4 coordinates
        let gauge = FixedGauge(256 + 4 * COORD_SIZE);
        let config = IngestConfig::default();
        let coord_lines = ["0 0", "1 1", "2 2", "3 3"];

        for n in 0..=4usize {
            let mut lines = vec![match n {
                0 => "0",
                1 => "1",
                2 => "2",
                3 => "3",
                _ => "4",
            }];
            lines.extend_from_slice(&coord_lines[..n]);
            let mut source = ScriptSource::new(&lines);
            let path = read_path(&mut source, &gauge, &config).unwrap();
            assert_eq!(path.len(), n);
        }
    }

    #[test]
    fn test_read_path_zero_count() {
        let mut source = ScriptSource::new(&["0"]);
        let path = read_path(&mut source, &roomy_gauge(), &IngestConfig::default()).unwrap();

        assert!(path.is_empty());
        assert_eq!(source.consumed, 1);
    }

    #[test]
    fn test_read_path_negative_count() {
        let mut source = ScriptSource::new(&["-1", "10 20"]);
        let err = read_path(&mut source, &roomy_gauge(), &IngestConfig::default()).unwrap_err();

        assert_eq!(err, PathError::InvalidLength);
        assert_eq!(err.code(), 1);
        // Zero coordinate lines consumed
        assert_eq!(source.consumed, 1);
    }

    #[test]
    fn test_read_path_count_above_ceiling() {
        // Room for 4 coordinates, stream claims 5
        let gauge = FixedGauge(256 + 4 * COORD_SIZE);
        let mut source = ScriptSource::new(&["5", "0 0"]);
        let err = read_path(&mut source, &gauge, &IngestConfig::default()).unwrap_err();

        assert_eq!(err, PathError::InvalidLength);
        assert_eq!(source.consumed, 1);
    }

    #[test]
    fn test_read_path_memory_pressure() {
        // Free heap below the reserve: ceiling is 0, any N > 0 rejected
        // before an allocation is attempted
        let gauge = FixedGauge(100);
        let mut source = ScriptSource::new(&["1", "0 0"]);
        let err = read_path(&mut source, &gauge, &IngestConfig::default()).unwrap_err();

        assert_eq!(err, PathError::InvalidLength);
        assert_eq!(source.consumed, 1);
    }

    #[test]
    fn test_read_path_unparseable_header() {
        let mut source = ScriptSource::new(&["garbage"]);
        let err = read_path(&mut source, &roomy_gauge(), &IngestConfig::default()).unwrap_err();
        assert_eq!(err, PathError::InvalidLength);
    }

    #[test]
    fn test_read_path_malformed_coordinate() {
        let mut source = ScriptSource::new(&["2", "10 zzz", "30 40"]);
        let err = read_path(&mut source, &roomy_gauge(), &IngestConfig::default()).unwrap_err();

        assert_eq!(err, PathError::MalformedCoordinate);
        assert_eq!(err.code(), 3);
    }

    #[test]
    fn test_read_path_missing_longitude() {
        let mut source = ScriptSource::new(&["1", "10"]);
        let err = read_path(&mut source, &roomy_gauge(), &IngestConfig::default()).unwrap_err();
        assert_eq!(err, PathError::MalformedCoordinate);
    }

    #[test]
    fn test_read_path_timeout_on_silent_sender() {
        let mut source = ScriptSource::new(&[]);
        let err = read_path(&mut source, &roomy_gauge(), &IngestConfig::default()).unwrap_err();

        assert_eq!(err, PathError::Timeout);
        assert_eq!(err.code(), 4);
    }

    #[test]
    fn test_read_path_truncated_stream() {
        // Declared 3, sender stops after 1
        let mut source = ScriptSource::new(&["3", "10 20"]);
        let err = read_path(&mut source, &roomy_gauge(), &IngestConfig::default()).unwrap_err();
        assert_eq!(err, PathError::Timeout);
    }

    #[test]
    fn test_read_path_idempotent() {
        let lines = ["2", "10 20", "30 40"];
        let config = IngestConfig::default();

        let mut first_source = ScriptSource::new(&lines);
        let first = read_path(&mut first_source, &roomy_gauge(), &config).unwrap();
        let mut second_source = ScriptSource::new(&lines);
        let second = read_path(&mut second_source, &roomy_gauge(), &config).unwrap();

        // Structurally equal, independently owned
        assert_eq!(first, second);
        drop(first);
        assert_eq!(second.len(), 2);
    }

    #[test]
    fn test_assembler_rejects_count_above_u16() {
        // Even an effectively unbounded heap keeps counts within the
        // path length width - no silent truncation
        let mut assembler = PathAssembler::new(usize::MAX);
        assert_eq!(assembler.limit(), MAX_PATH_LEN);
        assert_eq!(
            assembler.feed_line("65536"),
            Err(PathError::InvalidLength)
        );
        assert_eq!(assembler.feed_line("65535"), Ok(None));
    }

    #[test]
    fn test_assembler_recovers_after_error() {
        let mut assembler = PathAssembler::new(16);

        assert_eq!(assembler.feed_line("bogus"), Err(PathError::InvalidLength));
        assert_eq!(assembler.feed_line("1"), Ok(None));
        assert_eq!(assembler.remaining(), Some(1));
        let path = assembler.feed_line("7 8").unwrap().unwrap();
        assert_eq!(path.points(), &[Coordinate { lat: 7, lon: 8 }]);

        // Ready for the next path without a reset
        assert_eq!(assembler.remaining(), None);
        assert_eq!(assembler.feed_line("0").unwrap().unwrap(), Path::empty());
    }

    #[test]
    fn test_assembler_malformed_drops_partial_path() {
        let mut assembler = PathAssembler::new(16);
        assert_eq!(assembler.feed_line("3"), Ok(None));
        assert_eq!(assembler.feed_line("1 2"), Ok(None));
        assert_eq!(
            assembler.feed_line("not numbers"),
            Err(PathError::MalformedCoordinate)
        );
        // Back to awaiting a header; the partial array is gone
        assert_eq!(assembler.remaining(), None);
    }

    #[test]
    fn test_source_error_classification() {
        assert_eq!(
            source_error(SourceError::BadLine, true),
            PathError::InvalidLength
        );
        assert_eq!(
            source_error(SourceError::BadLine, false),
            PathError::MalformedCoordinate
        );
        assert_eq!(source_error(SourceError::Link, true), PathError::Link);
        assert_eq!(PathError::Link.code(), 5);
        assert_eq!(PathError::OutOfMemory.code(), 2);
    }
}
