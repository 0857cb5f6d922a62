//! Tile atlas and linear pixel projection
//!
//! Each tile covers a geographic span (west/east longitude, north/south
//! latitude, map-native integer units) rendered onto a fixed pixel
//! raster. Projection is linear interpolation across the span, with y
//! growing downward from the northern edge.

use heapless::Vec;

use crate::map::MapId;
use crate::traits::projection::MapProjection;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum tiles in an atlas
pub const MAX_TILES: usize = 8;

/// Geographic span and raster size of one tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TileBounds {
    /// Western edge, map-native longitude units
    pub west: i32,
    /// Eastern edge
    pub east: i32,
    /// Northern edge, map-native latitude units
    pub north: i32,
    /// Southern edge
    pub south: i32,
    /// Raster width in pixels
    pub width: u32,
    /// Raster height in pixels
    pub height: u32,
}

impl TileBounds {
    fn x_from_lon(&self, lon: i32) -> i32 {
        let span = self.east as i64 - self.west as i64;
        if span == 0 {
            // Degenerate tile projects onto its origin column
            return 0;
        }
        ((lon as i64 - self.west as i64) * self.width as i64 / span) as i32
    }

    fn y_from_lat(&self, lat: i32) -> i32 {
        let span = self.north as i64 - self.south as i64;
        if span == 0 {
            return 0;
        }
        ((self.north as i64 - lat as i64) * self.height as i64 / span) as i32
    }
}

/// Bounded table of tiles addressed by [`MapId`]
#[derive(Debug, Clone, Default)]
pub struct Atlas {
    tiles: Vec<TileBounds, MAX_TILES>,
}

impl Atlas {
    /// Create an empty atlas
    pub fn new() -> Self {
        Self { tiles: Vec::new() }
    }

    /// Create an atlas from a tile table, truncating at [`MAX_TILES`]
    pub fn from_tiles(tiles: &[TileBounds]) -> Self {
        let mut atlas = Self::new();
        for &tile in tiles.iter().take(MAX_TILES) {
            let _ = atlas.push(tile);
        }
        atlas
    }

    /// Append a tile, returning its id, or `None` when the atlas is full
    pub fn push(&mut self, tile: TileBounds) -> Option<MapId> {
        let id = MapId(self.tiles.len() as u8);
        self.tiles.push(tile).ok()?;
        Some(id)
    }

    /// Look up a tile by id
    pub fn tile(&self, map: MapId) -> Option<&TileBounds> {
        self.tiles.get(map.index())
    }

    /// Number of tiles
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the atlas holds no tiles
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

impl MapProjection for Atlas {
    fn x_from_lon(&self, map: MapId, lon: i32) -> Option<i32> {
        self.tile(map).map(|tile| tile.x_from_lon(lon))
    }

    fn y_from_lat(&self, map: MapId, lat: i32) -> Option<i32> {
        self.tile(map).map(|tile| tile.y_from_lat(lat))
    }
}
