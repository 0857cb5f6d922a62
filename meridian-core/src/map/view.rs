//! Viewport state and visibility

use crate::map::{MapId, MapPoint, ScreenPoint};
use crate::path::Coordinate;
use crate::traits::projection::MapProjection;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The rectangle of map-pixel space currently on the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Viewport {
    /// Top-left origin, map-pixel space
    pub x: i32,
    pub y: i32,
    /// Size in pixels
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Strict containment: a point exactly on any edge is outside
    pub fn contains(&self, p: MapPoint) -> bool {
        self.x < p.x
            && p.x < self.x + self.width as i32
            && self.y < p.y
            && p.y < self.y + self.height as i32
    }
}

/// Ambient view state: the active map plus the viewport within it
///
/// Owned by the caller; rendering reads it and never mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MapView {
    /// Currently active tile
    pub map: MapId,
    /// Viewport within that tile
    pub viewport: Viewport,
}

impl MapView {
    /// Convert a map-pixel position to screen-local space
    pub fn to_screen(&self, p: MapPoint) -> ScreenPoint {
        ScreenPoint {
            x: p.x - self.viewport.x,
            y: p.y - self.viewport.y,
        }
    }
}

/// Whether a coordinate falls strictly inside the current viewport
///
/// Projects the coordinate on the view's active map, then tests the
/// open rectangle. A coordinate the projection cannot place is not
/// visible. Pure, no side effects.
pub fn is_visible<P: MapProjection>(proj: &P, view: &MapView, coord: Coordinate) -> bool {
    proj.project(view.map, coord)
        .is_some_and(|p| view.viewport.contains(p))
}
