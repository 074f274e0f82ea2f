use crate::foundation::core::{Affine, Line, Point, SurfaceSize};
use crate::foundation::error::DotfieldResult;
use crate::render::surface::{StrokeStyle, Surface};

/// One call observed by a [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    /// `clear()`.
    Clear,
    /// `stroke_line()`, with the endpoints already mapped to device space.
    Stroke {
        /// Transform passed by the caller.
        transform: Affine,
        /// Start point in device pixels.
        p0: Point,
        /// End point in device pixels.
        p1: Point,
        /// Paint passed by the caller.
        style: StrokeStyle,
    },
}

/// A [`Surface`] that keeps every call instead of drawing.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    size: SurfaceSize,
    calls: Vec<DrawCall>,
}

impl RecordingSurface {
    /// Create an empty recorder reporting `size`.
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            calls: Vec::new(),
        }
    }

    /// Calls recorded so far, in order.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Strokes recorded since the most recent `clear()`.
    pub fn last_frame_strokes(&self) -> Vec<&DrawCall> {
        let start = self
            .calls
            .iter()
            .rposition(|c| matches!(c, DrawCall::Clear))
            .map_or(0, |i| i + 1);
        self.calls[start..].iter().collect()
    }

    /// Remove and return every recorded call.
    pub fn take_calls(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn clear(&mut self) -> DotfieldResult<()> {
        self.calls.push(DrawCall::Clear);
        Ok(())
    }

    fn stroke_line(
        &mut self,
        transform: Affine,
        line: Line,
        style: &StrokeStyle,
    ) -> DotfieldResult<()> {
        self.calls.push(DrawCall::Stroke {
            transform,
            p0: transform * line.p0,
            p1: transform * line.p1,
            style: *style,
        });
        Ok(())
    }

    fn resize(&mut self, size: SurfaceSize) -> DotfieldResult<()> {
        self.size = size;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/record.rs"]
mod tests;
