//! Path UART receive task
//!
//! Receives bytes from the path server, frames them into lines, and
//! feeds the ingestion assembler. A finished path is handed to the
//! render task; a failed ingestion is logged and dropped, and the next
//! header starts fresh.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embassy_time::{with_timeout, Duration};
use embedded_io_async::Read;

use meridian_core::config::IngestConfig;
use meridian_core::path::PathAssembler;
use meridian_protocol::LineAccumulator;

use crate::channels::{PATH_READY, REDRAW};
use crate::heap::AllocatorGauge;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Path RX task - frames lines and assembles paths from the serial link
#[embassy_executor::task]
pub async fn path_rx_task(mut rx: BufferedUartRx) {
    info!("Path RX task started");

    let config = IngestConfig::default();
    let timeout = Duration::from_millis(u64::from(config.header_timeout_ms));
    let mut lines = LineAccumulator::new();
    let mut assembler: Option<PathAssembler> = None;
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        // An idle link is not an error; the timeout guards a sender
        // that goes quiet mid-path.
        let read = if assembler.is_some() {
            match with_timeout(timeout, rx.read(&mut buf)).await {
                Ok(result) => result,
                Err(_) => {
                    warn!("path timed out mid-stream, dropping partial path");
                    assembler = None;
                    lines.reset();
                    continue;
                }
            }
        } else {
            rx.read(&mut buf).await
        };

        let n = match read {
            Ok(n) if n > 0 => n,
            Ok(_) => continue,
            Err(e) => {
                warn!("UART read error: {:?}", e);
                continue;
            }
        };
        trace!("RX: {} bytes", n);

        for &byte in &buf[..n] {
            let line = match lines.feed(byte) {
                Ok(Some(line)) => line,
                Ok(None) => continue,
                Err(e) => {
                    warn!("line framing error: {:?}", e);
                    // A broken line invalidates any path in flight
                    assembler = None;
                    continue;
                }
            };

            // The ceiling is sampled from the live heap at the header
            let mut asm = assembler
                .take()
                .unwrap_or_else(|| PathAssembler::with_gauge(&AllocatorGauge, &config));
            match asm.feed_line(&line) {
                Ok(Some(path)) => {
                    info!("path received: {} points", path.len());
                    PATH_READY.signal(path);
                    REDRAW.signal(());
                }
                Ok(None) => assembler = Some(asm),
                Err(e) => {
                    warn!("path ingestion failed: status {}", e.code());
                }
            }
        }
    }
}
