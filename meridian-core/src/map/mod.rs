//! Map-space types, the tile atlas, and viewport state
//!
//! Two pixel coordinate systems are in play: *map-pixel space*, the
//! pixel grid of a specific named tile, and *screen-local space*,
//! obtained by subtracting the viewport origin. Geographic coordinates
//! enter map-pixel space through a
//! [`MapProjection`](crate::traits::projection::MapProjection).

pub mod tiles;
pub mod view;

pub use tiles::{Atlas, TileBounds, MAX_TILES};
pub use view::{is_visible, MapView, Viewport};

/// Identifier of a tile in the atlas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapId(pub u8);

impl MapId {
    /// Atlas slot this id addresses
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A position in map-pixel space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MapPoint {
    pub x: i32,
    pub y: i32,
}

/// A position in screen-local pixel space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}
