//! Path renderer
//!
//! One pass over consecutive coordinate pairs. A segment is drawn only
//! when both endpoints are visible; it is then converted to
//! screen-local space and issued as a single line draw. Segments
//! crossing the viewport edge are dropped whole - this is culling, not
//! clipping, and a boundary-crossing segment simply does not appear.

use crate::map::view::MapView;
use crate::path::Path;
use crate::traits::display::PathDisplay;
use crate::traits::projection::MapProjection;

/// Draw a path over the current view
///
/// Issues one line draw per fully visible segment, in the given color.
/// Empty and single-point paths draw nothing. Errors from the display
/// backend propagate; the renderer adds no error states of its own.
pub fn draw_path<D, P>(
    display: &mut D,
    proj: &P,
    view: &MapView,
    path: &Path,
    color: D::Color,
) -> Result<(), D::Error>
where
    D: PathDisplay,
    P: MapProjection,
{
    for (start, stop) in path.segments() {
        let (Some(from), Some(to)) = (
            proj.project(view.map, start),
            proj.project(view.map, stop),
        ) else {
            continue;
        };
        if view.viewport.contains(from) && view.viewport.contains(to) {
            display.draw_line(view.to_screen(from), view.to_screen(to), color)?;
        }
    }
    Ok(())
}
