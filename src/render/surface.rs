use crate::foundation::core::{Affine, Line, Rgba8, SurfaceSize};
use crate::foundation::error::DotfieldResult;

/// Paint for one round-capped stroke.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Straight-alpha colour before `opacity` is applied.
    pub color: Rgba8,
    /// Width in the local coordinate space of the stroke transform.
    pub width: f64,
    /// Extra opacity multiplier in `[0, 1]`.
    pub opacity: f64,
}

/// Immediate-mode 2D drawing target.
///
/// Implemented by the CPU rasterizer, the browser canvas binding and the
/// recording surface used in tests.
pub trait Surface {
    /// Backing-store size in device pixels.
    fn size(&self) -> SurfaceSize;

    /// Erase the whole surface.
    fn clear(&mut self) -> DotfieldResult<()>;

    /// Stroke `line` (in local space) under `transform` with round caps.
    fn stroke_line(
        &mut self,
        transform: Affine,
        line: Line,
        style: &StrokeStyle,
    ) -> DotfieldResult<()>;

    /// Adopt a new backing-store size. The default keeps the current size.
    fn resize(&mut self, _size: SurfaceSize) -> DotfieldResult<()> {
        Ok(())
    }
}
