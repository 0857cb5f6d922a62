//! Meridian - Map Navigation Display Firmware
//!
//! Main firmware binary for the RP2040-based map display. A path
//! server on the other end of the UART sends travel paths as
//! line-oriented ASCII; the device keeps the latest path on the heap
//! and draws it over a scrollable tile map on the TFT.

#![no_std]
#![no_main]

extern crate alloc;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel as AdcChannel, Config as AdcConfig, InterruptHandler as AdcInterruptHandler};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::spi::{Config as SpiConfig, Spi};
use embassy_rp::uart::{BufferedInterruptHandler, BufferedUart, Config as UartConfig};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use meridian_core::map::Atlas;

mod atlas;
mod channels;
mod display;
mod heap;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    ADC_IRQ_FIFO => AdcInterruptHandler;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Meridian firmware starting...");

    // Initialize heap allocator - the path array lives here
    heap::init();

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Serial link to the path server
    let tx_buf = TX_BUF.init([0; 256]);
    let rx_buf = RX_BUF.init([0; 256]);
    let uart = BufferedUart::new(
        p.UART0,
        Irqs,
        p.PIN_0,
        p.PIN_1,
        tx_buf,
        rx_buf,
        UartConfig::default(),
    );
    let (_tx, rx) = uart.split();

    // TFT on SPI0
    let mut spi_config = SpiConfig::default();
    spi_config.frequency = 32_000_000;
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, spi_config);
    let cs = Output::new(p.PIN_17, Level::High);
    let dc = Output::new(p.PIN_20, Level::Low);
    let rst = Output::new(p.PIN_21, Level::Low);
    let tft = display::init(spi, cs, dc, rst);
    info!("TFT initialized");

    // Map atlas baked from atlas.toml at build time
    let atlas = Atlas::from_tiles(atlas::TILES);
    info!("Atlas: {} tiles", atlas.len());

    // Joystick on the ADC pins
    let adc = Adc::new(p.ADC, Irqs, AdcConfig::default());
    let joy_x = AdcChannel::new_pin(p.PIN_26, Pull::None);
    let joy_y = AdcChannel::new_pin(p.PIN_27, Pull::None);

    unwrap!(spawner.spawn(tasks::path_rx::path_rx_task(rx)));
    unwrap!(spawner.spawn(tasks::render::render_task(tft, atlas.clone())));
    unwrap!(spawner.spawn(tasks::scroll::scroll_task(adc, joy_x, joy_y, atlas)));

    info!("All tasks spawned");
}
