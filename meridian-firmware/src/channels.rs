//! Inter-task communication
//!
//! Defines the statics the Embassy tasks share. The view state is the
//! one piece of genuinely shared mutable data, so it sits behind a
//! blocking mutex; everything else is signal-shaped.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;

use meridian_core::map::{MapId, MapView, Viewport};
use meridian_core::path::Path;

use crate::display::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Latest complete path from the serial link
///
/// A newer path replaces an unrendered one; the device shows one path
/// at a time.
pub static PATH_READY: Signal<CriticalSectionRawMutex, Path> = Signal::new();

/// Current map and viewport; the scroll task writes, the render task reads
pub static VIEW: Mutex<CriticalSectionRawMutex, RefCell<MapView>> = Mutex::new(RefCell::new(MapView {
    map: MapId(0),
    viewport: Viewport {
        x: 0,
        y: 0,
        width: SCREEN_WIDTH,
        height: SCREEN_HEIGHT,
    },
}));

/// Redraw request (the view scrolled or a new path arrived)
pub static REDRAW: Signal<CriticalSectionRawMutex, ()> = Signal::new();
