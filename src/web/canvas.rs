use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::foundation::core::{Affine, Line, Point, SurfaceSize};
use crate::foundation::error::{DotfieldError, DotfieldResult};
use crate::interact::pointer::relative_to;
use crate::render::surface::{StrokeStyle, Surface};
use crate::web::js_error;

/// [`Surface`] over a `<canvas>` element's 2D context.
#[derive(Clone, Debug)]
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Acquire the canvas' `2d` context.
    pub fn new(canvas: HtmlCanvasElement) -> DotfieldResult<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(js_error)?
            .ok_or_else(|| DotfieldError::platform("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| DotfieldError::platform("2d context has an unexpected type"))?;
        Ok(Self { canvas, ctx })
    }

    /// The underlying element.
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Let the canvas fill its container as a block.
    pub fn fill_container(&self) -> DotfieldResult<()> {
        let style = self.canvas.style();
        style.set_property("display", "block").map_err(js_error)?;
        style.set_property("width", "100%").map_err(js_error)?;
        style.set_property("height", "100%").map_err(js_error)?;
        Ok(())
    }

    /// Size the backing store to `css size x device_pixel_ratio` and pin the
    /// CSS size in pixels.
    pub fn fit_css(
        &mut self,
        css_width: f64,
        css_height: f64,
        device_pixel_ratio: f64,
    ) -> DotfieldResult<SurfaceSize> {
        let size = SurfaceSize::from_logical(css_width, css_height, device_pixel_ratio);
        self.resize(size)?;
        let style = self.canvas.style();
        style
            .set_property("width", &format!("{css_width}px"))
            .map_err(js_error)?;
        style
            .set_property("height", &format!("{css_height}px"))
            .map_err(js_error)?;
        Ok(size)
    }

    /// Client coordinates to canvas-relative logical pixels.
    pub fn to_local(&self, client_x: i32, client_y: i32) -> Point {
        let rect = self.canvas.get_bounding_client_rect();
        relative_to(
            Point::new(f64::from(client_x), f64::from(client_y)),
            Point::new(rect.left(), rect.top()),
        )
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.canvas.width(), self.canvas.height())
    }

    fn clear(&mut self) -> DotfieldResult<()> {
        let size = self.size();
        self.ctx
            .clear_rect(0.0, 0.0, f64::from(size.width), f64::from(size.height));
        Ok(())
    }

    fn stroke_line(
        &mut self,
        transform: Affine,
        line: Line,
        style: &StrokeStyle,
    ) -> DotfieldResult<()> {
        let [a, b, c, d, e, f] = transform.as_coeffs();
        self.ctx.save();
        let drawn = self.ctx.set_transform(a, b, c, d, e, f).map(|()| {
            self.ctx.set_line_cap("round");
            self.ctx.set_line_width(style.width);
            self.ctx.set_global_alpha(style.opacity.clamp(0.0, 1.0));
            self.ctx.set_stroke_style_str(&style.color.to_hex());
            self.ctx.begin_path();
            self.ctx.move_to(line.p0.x, line.p0.y);
            self.ctx.line_to(line.p1.x, line.p1.y);
            self.ctx.stroke();
        });
        self.ctx.restore();
        drawn.map_err(js_error)
    }

    fn resize(&mut self, size: SurfaceSize) -> DotfieldResult<()> {
        self.canvas.set_width(size.width);
        self.canvas.set_height(size.height);
        Ok(())
    }
}
