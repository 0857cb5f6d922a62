//! Display seam for path rendering

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};

use crate::map::ScreenPoint;

/// A line-drawing surface in screen-local pixel space
///
/// The renderer needs exactly one primitive. Implementations report
/// errors on their own channel; the renderer only propagates them.
pub trait PathDisplay {
    /// Color type of the surface
    type Color: PixelColor;
    /// Error type of the drawing backend
    type Error;

    /// Draw one segment in device pixel space
    fn draw_line(
        &mut self,
        from: ScreenPoint,
        to: ScreenPoint,
        color: Self::Color,
    ) -> Result<(), Self::Error>;
}

/// Adapter implementing [`PathDisplay`] for any `embedded-graphics`
/// draw target
///
/// Keeps the renderer usable with a real panel driver and with host
/// test surfaces alike.
pub struct GraphicsBackend<D> {
    target: D,
}

impl<D> GraphicsBackend<D> {
    /// Wrap a draw target
    pub fn new(target: D) -> Self {
        Self { target }
    }

    /// Access the wrapped target
    pub fn target(&self) -> &D {
        &self.target
    }

    /// Mutable access, for backend operations beyond line drawing
    /// (screen clear, for one)
    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    /// Unwrap, returning the target
    pub fn release(self) -> D {
        self.target
    }
}

impl<D: DrawTarget> PathDisplay for GraphicsBackend<D> {
    type Color = D::Color;
    type Error = D::Error;

    fn draw_line(
        &mut self,
        from: ScreenPoint,
        to: ScreenPoint,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        Line::new(Point::new(from.x, from.y), Point::new(to.x, to.y))
            .into_styled(PrimitiveStyle::with_stroke(color, 1))
            .draw(&mut self.target)
    }
}
