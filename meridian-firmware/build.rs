//! Build script for meridian-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates atlas.toml and bakes the tile table at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    generate_atlas();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate atlas.toml and generate the tile table
///
/// The atlas is fixed per firmware image, so the table is baked into
/// the binary instead of being parsed at runtime.
fn generate_atlas() {
    println!("cargo:rerun-if-changed=atlas.toml");

    let config_path = Path::new("atlas.toml");
    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: atlas.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires an atlas.toml tile table.                 ║\n\
            ║  Please create one in the meridian-firmware directory.           ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = fs::read_to_string(config_path).expect("failed to read atlas.toml");
    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => panic!("invalid TOML syntax in atlas.toml: {e}"),
    };

    let tiles = match config.get("tile") {
        Some(toml::Value::Array(tiles)) if !tiles.is_empty() => tiles,
        _ => panic!("atlas.toml must define at least one [[tile]]"),
    };

    let mut errors = Vec::new();
    let mut rows = Vec::new();
    for (i, tile) in tiles.iter().enumerate() {
        let Some(tile) = tile.as_table() else {
            errors.push(format!("[[tile]] {i} must be a table"));
            continue;
        };
        let name = tile
            .get("name")
            .and_then(|v| v.as_str())
            .unwrap_or("<unnamed>");

        let mut field = |key: &str| -> i64 {
            match tile.get(key).and_then(|v| v.as_integer()) {
                Some(v) => v,
                None => {
                    errors.push(format!("tile '{name}' missing integer field '{key}'"));
                    0
                }
            }
        };

        let (west, east) = (field("west"), field("east"));
        let (north, south) = (field("north"), field("south"));
        let (width, height) = (field("width"), field("height"));

        if west >= east {
            errors.push(format!("tile '{name}': west must be less than east"));
        }
        if south >= north {
            errors.push(format!("tile '{name}': south must be less than north"));
        }
        if !(1..=i64::from(u16::MAX)).contains(&width)
            || !(1..=i64::from(u16::MAX)).contains(&height)
        {
            errors.push(format!("tile '{name}': width/height must be 1-65535"));
        }

        rows.push(format!(
            "    TileBounds {{ west: {west}, east: {east}, north: {north}, \
             south: {south}, width: {width}, height: {height} }},"
        ));
    }

    if !errors.is_empty() {
        panic!("invalid atlas.toml:\n  {}", errors.join("\n  "));
    }

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let mut f = File::create(out_dir.join("atlas_tiles.rs")).unwrap();
    writeln!(f, "// Generated from atlas.toml - do not edit").unwrap();
    writeln!(f, "pub static TILES: &[TileBounds] = &[").unwrap();
    for row in rows {
        writeln!(f, "{row}").unwrap();
    }
    writeln!(f, "];").unwrap();
}
