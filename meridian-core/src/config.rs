//! Configuration type definitions

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Heap bytes held back from any path allocation
pub const DEFAULT_RESERVE_BYTES: usize = 256;

/// Default wait for the path header line (ms)
pub const DEFAULT_HEADER_TIMEOUT_MS: u32 = 10_000;

/// Ingestion tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IngestConfig {
    /// Heap bytes never given to a path allocation, so the rest of the
    /// firmware keeps working while a path is resident
    pub reserve_bytes: usize,
    /// How long the transport waits for the header line before the
    /// attempt fails with a timeout (ms). Enforced by the
    /// [`LineSource`](crate::path::ingest::LineSource) implementation.
    pub header_timeout_ms: u32,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            reserve_bytes: DEFAULT_RESERVE_BYTES,
            header_timeout_ms: DEFAULT_HEADER_TIMEOUT_MS,
        }
    }
}
