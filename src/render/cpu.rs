use crate::foundation::core::{Affine, Line, Point, SurfaceSize};
use crate::foundation::error::{DotfieldError, DotfieldResult};
use crate::foundation::math::premul_rgba8;
use crate::render::frame::FrameRGBA;
use crate::render::surface::{StrokeStyle, Surface};

/// Flattening tolerance for stroke outlines, in local units.
const STROKE_TOLERANCE: f64 = 0.05;

/// Options for [`CpuSurface`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuSurfaceOpts {
    /// Straight-alpha RGBA8 the surface is cleared to; transparent when `None`.
    pub clear_rgba: Option<[u8; 4]>,
}

impl CpuSurfaceOpts {
    /// Return options with a configured clear colour.
    pub fn with_clear_rgba(mut self, clear: Option<[u8; 4]>) -> Self {
        self.clear_rgba = clear;
        self
    }
}

/// Headless [`Surface`] rasterized by `vello_cpu`.
///
/// Strokes are recorded into a render context and resolved into the pixmap
/// on [`CpuSurface::readback`].
pub struct CpuSurface {
    width: u16,
    height: u16,
    opts: CpuSurfaceOpts,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
}

impl std::fmt::Debug for CpuSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("opts", &self.opts)
            .finish_non_exhaustive()
    }
}

impl CpuSurface {
    /// Allocate a surface; each side must fit in `u16`.
    pub fn new(size: SurfaceSize, opts: CpuSurfaceOpts) -> DotfieldResult<Self> {
        let (width, height) = dims_u16(size)?;
        Ok(Self {
            width,
            height,
            opts,
            ctx: vello_cpu::RenderContext::new(width, height),
            pixmap: vello_cpu::Pixmap::new(width, height),
        })
    }

    /// Rasterize everything stroked since the last `clear` and copy the
    /// pixels out.
    pub fn readback(&mut self) -> DotfieldResult<FrameRGBA> {
        let clear = self
            .opts
            .clear_rgba
            .map(|[r, g, b, a]| premul_rgba8(r, g, b, a))
            .unwrap_or([0, 0, 0, 0]);
        clear_pixmap(&mut self.pixmap, clear);

        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);

        Ok(FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

impl Surface for CpuSurface {
    fn size(&self) -> SurfaceSize {
        SurfaceSize::new(u32::from(self.width), u32::from(self.height))
    }

    fn clear(&mut self) -> DotfieldResult<()> {
        self.ctx = vello_cpu::RenderContext::new(self.width, self.height);
        Ok(())
    }

    fn stroke_line(
        &mut self,
        transform: Affine,
        line: Line,
        style: &StrokeStyle,
    ) -> DotfieldResult<()> {
        let color = style.color.with_opacity(style.opacity);
        if color.a == 0 {
            return Ok(());
        }

        let outline = stroke_outline(line, style.width);
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(affine_to_cpu(transform));
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(color.r, color.g, color.b, color.a));
        self.ctx.fill_path(&bezpath_to_cpu(&outline));
        Ok(())
    }

    fn resize(&mut self, size: SurfaceSize) -> DotfieldResult<()> {
        let (width, height) = dims_u16(size)?;
        if (width, height) != (self.width, self.height) {
            self.width = width;
            self.height = height;
            self.ctx = vello_cpu::RenderContext::new(width, height);
            self.pixmap = vello_cpu::Pixmap::new(width, height);
        }
        Ok(())
    }
}

fn dims_u16(size: SurfaceSize) -> DotfieldResult<(u16, u16)> {
    let width: u16 = size
        .width
        .try_into()
        .map_err(|_| DotfieldError::render("surface width exceeds u16"))?;
    let height: u16 = size
        .height
        .try_into()
        .map_err(|_| DotfieldError::render("surface height exceeds u16"))?;
    if width == 0 || height == 0 {
        return Err(DotfieldError::render("surface must be at least 1x1"));
    }
    Ok((width, height))
}

/// Round-capped outline of `line` as a fillable path.
fn stroke_outline(line: Line, width: f64) -> kurbo::BezPath {
    let stroke = kurbo::Stroke::new(width).with_caps(kurbo::Cap::Round);
    let mut path = kurbo::BezPath::new();
    path.move_to(line.p0);
    path.line_to(line.p1);
    kurbo::stroke(path.iter(), &stroke, &kurbo::StrokeOpts::default(), STROKE_TOLERANCE)
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    let data = pixmap.data_as_u8_slice_mut();
    for px in data.chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
