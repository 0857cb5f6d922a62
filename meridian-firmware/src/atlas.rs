//! Tile table baked from atlas.toml at build time

use meridian_core::map::TileBounds;

include!(concat!(env!("OUT_DIR"), "/atlas_tiles.rs"));
