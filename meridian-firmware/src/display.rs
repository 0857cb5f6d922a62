//! TFT panel bring-up
//!
//! The display is a 128x160 ST7735 behind SPI0. Rendering goes through
//! `meridian_core`'s `GraphicsBackend`, so everything past init is
//! plain `embedded-graphics`.

use display_interface_spi::SPIInterface;
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Blocking, Spi};
use embassy_time::Delay;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_hal_bus::spi::ExclusiveDevice;
use mipidsi::models::ST7735s;
use mipidsi::{Builder, Display};

/// Visible raster width in pixels
pub const SCREEN_WIDTH: u32 = 128;

/// Visible raster height in pixels
pub const SCREEN_HEIGHT: u32 = 160;

/// Path segments are drawn in this color
pub const PATH_COLOR: Rgb565 = Rgb565::BLUE;

/// Everything that is not path is this color
pub const MAP_BACKGROUND: Rgb565 = Rgb565::BLACK;

type SpiDevice = ExclusiveDevice<Spi<'static, SPI0, Blocking>, Output<'static>, Delay>;
type TftInterface = SPIInterface<SpiDevice, Output<'static>>;

/// The concrete panel type the render task owns
pub type Tft = Display<TftInterface, ST7735s, Output<'static>>;

/// Bring up the panel
///
/// Boot-time failure here leaves nothing to display errors on, so it
/// is terminal.
pub fn init(
    spi: Spi<'static, SPI0, Blocking>,
    cs: Output<'static>,
    dc: Output<'static>,
    rst: Output<'static>,
) -> Tft {
    let device = match ExclusiveDevice::new(spi, cs, Delay) {
        Ok(device) => device,
        Err(_) => defmt::panic!("SPI device init failed"),
    };
    let interface = SPIInterface::new(device, dc);

    match Builder::new(ST7735s, interface)
        .reset_pin(rst)
        .display_size(SCREEN_WIDTH as u16, SCREEN_HEIGHT as u16)
        .init(&mut Delay)
    {
        Ok(tft) => tft,
        Err(_) => defmt::panic!("TFT init failed"),
    }
}
