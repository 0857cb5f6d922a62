//! Geodesy seam: map-native coordinates to tile pixel space

use crate::map::{MapId, MapPoint};
use crate::path::Coordinate;

/// Converts map-native coordinates to pixel positions on a named tile
///
/// Returns `None` for a tile the projection does not know; a point
/// that cannot be projected is treated as not visible.
pub trait MapProjection {
    /// Horizontal pixel position of a longitude on the tile
    fn x_from_lon(&self, map: MapId, lon: i32) -> Option<i32>;

    /// Vertical pixel position of a latitude on the tile
    fn y_from_lat(&self, map: MapId, lat: i32) -> Option<i32>;

    /// Project a full coordinate onto the tile
    fn project(&self, map: MapId, coord: Coordinate) -> Option<MapPoint> {
        Some(MapPoint {
            x: self.x_from_lon(map, coord.lon)?,
            y: self.y_from_lat(map, coord.lat)?,
        })
    }
}
