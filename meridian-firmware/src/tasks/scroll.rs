//! Joystick viewport scrolling
//!
//! Samples the joystick and pans the shared view within the active
//! tile's raster. Only this task mutates the view.

use defmt::*;
use embassy_rp::adc::{Adc, Async, Channel};
use embassy_time::Timer;

use meridian_core::map::Atlas;

use crate::channels::{REDRAW, VIEW};

/// ADC midpoint for a centered stick (12-bit)
const CENTER: i32 = 2048;

/// Deflection below this is treated as centered
const DEADZONE: i32 = 500;

/// Pan step per poll, pixels
const STEP: i32 = 4;

fn pan(raw: u16) -> i32 {
    let deflection = i32::from(raw) - CENTER;
    if deflection.abs() < DEADZONE {
        0
    } else if deflection > 0 {
        STEP
    } else {
        -STEP
    }
}

/// Scroll task - pans the viewport from joystick input
#[embassy_executor::task]
pub async fn scroll_task(
    mut adc: Adc<'static, Async>,
    mut joy_x: Channel<'static>,
    mut joy_y: Channel<'static>,
    atlas: Atlas,
) {
    info!("Scroll task started");

    loop {
        Timer::after_millis(40).await;

        let (Ok(x_raw), Ok(y_raw)) = (adc.read(&mut joy_x).await, adc.read(&mut joy_y).await)
        else {
            warn!("joystick read failed");
            continue;
        };
        let (dx, dy) = (pan(x_raw), pan(y_raw));
        if dx == 0 && dy == 0 {
            continue;
        }

        let changed = VIEW.lock(|cell| {
            let mut view = cell.borrow_mut();
            let Some(tile) = atlas.tile(view.map) else {
                return false;
            };

            // Keep the viewport inside the tile raster
            let max_x = tile.width.saturating_sub(view.viewport.width) as i32;
            let max_y = tile.height.saturating_sub(view.viewport.height) as i32;
            let x = (view.viewport.x + dx).clamp(0, max_x);
            let y = (view.viewport.y + dy).clamp(0, max_y);

            let changed = x != view.viewport.x || y != view.viewport.y;
            view.viewport.x = x;
            view.viewport.y = y;
            changed
        });

        if changed {
            REDRAW.signal(());
        }
    }
}
