//! Display render task
//!
//! Owns the panel and the atlas. Holds the latest path and redraws it
//! whenever a new one arrives or the view changes.

use defmt::*;
use embassy_futures::select::{select, Either};
use embedded_graphics::prelude::*;

use meridian_core::map::Atlas;
use meridian_core::path::Path;
use meridian_core::render::draw_path;
use meridian_core::traits::display::GraphicsBackend;

use crate::channels::{PATH_READY, REDRAW, VIEW};
use crate::display::{Tft, MAP_BACKGROUND, PATH_COLOR};

/// Render task - draws the current path over the current view
#[embassy_executor::task]
pub async fn render_task(tft: Tft, atlas: Atlas) {
    info!("Render task started");

    let mut backend = GraphicsBackend::new(tft);
    let mut path = Path::empty();

    loop {
        match select(PATH_READY.wait(), REDRAW.wait()).await {
            Either::First(fresh) => path = fresh,
            Either::Second(()) => {}
        }
        let view = VIEW.lock(|cell| *cell.borrow());
        trace!("redraw at ({}, {})", view.viewport.x, view.viewport.y);

        // No double buffer: clear, then one pass over the segments
        if backend.target_mut().clear(MAP_BACKGROUND).is_err() {
            warn!("display clear failed");
            continue;
        }
        if draw_path(&mut backend, &atlas, &view, &path, PATH_COLOR).is_err() {
            warn!("path draw failed");
        }
    }
}
