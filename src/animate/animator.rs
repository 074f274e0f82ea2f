use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::animate::fade::CanvasAlpha;
use crate::config::options::DotFieldOptions;
use crate::field::dot::{DotStyle, MIN_MAGNITUDE, OscillatorParams};
use crate::field::grid::Grid;
use crate::foundation::core::{Point, SurfaceSize};
use crate::foundation::error::{DotfieldError, DotfieldResult};
use crate::foundation::math::attraction;
use crate::interact::pointer::{InteractionTracker, PointerEvent, PointerOutcome, PointerState};
use crate::render::surface::Surface;

/// Facts about the host a field is attached to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HostEnv {
    /// Backing-store size in device pixels.
    pub size: SurfaceSize,
    /// Device pixels per logical pixel.
    pub device_pixel_ratio: f64,
    /// Viewport width in logical pixels; decides the mobile branch.
    pub viewport_width: f64,
}

impl HostEnv {
    /// A desktop host with a device pixel ratio of one.
    pub fn desktop(size: SurfaceSize) -> Self {
        Self {
            size,
            device_pixel_ratio: 1.0,
            viewport_width: 1920.0,
        }
    }
}

/// Per-surface animation state: the grid, pointer tracking and fade-in.
///
/// One frame is [`Animator::update`] followed by [`Animator::draw`]; see
/// [`Animator::tick`].
#[derive(Clone, Debug)]
pub struct Animator {
    opts: DotFieldOptions,
    device_pixel_ratio: f64,
    size: SurfaceSize,
    grid: Grid,
    tracker: InteractionTracker,
    canvas_alpha: CanvasAlpha,
    rng: StdRng,
    frames: u64,
}

impl Animator {
    /// Validate `opts` and build the initial grid.
    pub fn new(opts: DotFieldOptions, env: HostEnv, mut rng: StdRng) -> DotfieldResult<Self> {
        opts.validate()?;
        let dpr = env.device_pixel_ratio;
        if !dpr.is_finite() || dpr <= 0.0 {
            return Err(DotfieldError::validation(format!(
                "device pixel ratio must be finite and > 0, got {dpr}"
            )));
        }

        let grid = Grid::build(
            env.size,
            opts.spacing * dpr,
            OscillatorParams::from_options(&opts),
            &mut rng,
        )?;
        Ok(Self {
            canvas_alpha: CanvasAlpha::new(opts.fade_in_frames),
            tracker: InteractionTracker::for_viewport(env.viewport_width),
            device_pixel_ratio: dpr,
            size: env.size,
            opts,
            grid,
            rng,
            frames: 0,
        })
    }

    /// Same as [`Animator::new`] with a seeded random source.
    pub fn with_seed(opts: DotFieldOptions, env: HostEnv, seed: u64) -> DotfieldResult<Self> {
        Self::new(opts, env, StdRng::seed_from_u64(seed))
    }

    /// Options this field runs with.
    pub fn options(&self) -> &DotFieldOptions {
        &self.opts
    }

    /// Device pixels per logical pixel.
    pub fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    /// Surface size the grid was built for.
    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    /// Current grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Current pointer state.
    pub fn pointer(&self) -> PointerState {
        self.tracker.state()
    }

    /// `false` when the mobile branch disabled pointer input.
    pub fn is_interactive(&self) -> bool {
        self.tracker.is_enabled()
    }

    /// Global opacity from the fade-in.
    pub fn global_alpha(&self) -> f64 {
        self.canvas_alpha.value()
    }

    /// Frames run so far.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Discard the grid and build a new one for `size`.
    ///
    /// Says nothing about the pointer: a pending move still applies next frame.
    /// On error the previous grid and size are kept.
    #[tracing::instrument(skip(self), fields(old = ?self.size))]
    pub fn resize(&mut self, size: SurfaceSize) -> DotfieldResult<()> {
        self.grid = Grid::build(
            size,
            self.opts.spacing * self.device_pixel_ratio,
            OscillatorParams::from_options(&self.opts),
            &mut self.rng,
        )?;
        self.size = size;
        Ok(())
    }

    /// Feed one input event.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> PointerOutcome {
        let outcome = self.tracker.handle(event);
        if outcome == PointerOutcome::Released {
            self.grid.release_targets();
        }
        outcome
    }

    /// Clear hover and release every dot toward rest.
    pub fn reset(&mut self) {
        self.tracker.reset();
        self.grid.release_targets();
    }

    /// Simulation half of a frame: fade-in, retarget from the pointer, ease.
    pub fn update(&mut self) {
        self.canvas_alpha.tick();

        if let Some(p) = self.tracker.take_move() {
            let dpr = self.device_pixel_ratio;
            let pointer = Point::new(p.x * dpr, p.y * dpr);
            let (radius, max_magnitude) = (self.opts.radius, self.opts.max_magnitude);
            for dot in self.grid.dots_mut() {
                let (magnitude, angle) =
                    attraction(dot.position(), pointer, radius, MIN_MAGNITUDE, max_magnitude);
                dot.snap_alpha();
                dot.set_target(magnitude, angle);
            }
        }

        self.grid.ease_all();
        self.frames += 1;
    }

    /// Drawing half of a frame: clear, then render every dot.
    ///
    /// Each dot's oscillator advances as it is drawn.
    pub fn draw(&mut self, surface: &mut dyn Surface) -> DotfieldResult<()> {
        surface.clear()?;
        self.render_dots(surface)
    }

    /// One full frame.
    ///
    /// The surface is cleared before [`Animator::update`] runs, so a surface
    /// that refuses to clear leaves the field untouched. A stroke failing
    /// mid-frame leaves the update applied and the oscillators of the dots
    /// already drawn advanced.
    pub fn tick(&mut self, surface: &mut dyn Surface) -> DotfieldResult<()> {
        surface.clear()?;
        self.update();
        self.render_dots(surface)
    }

    fn render_dots(&mut self, surface: &mut dyn Surface) -> DotfieldResult<()> {
        let style = DotStyle {
            color: self.opts.color,
            line_width: self.opts.line_width,
            device_pixel_ratio: self.device_pixel_ratio,
        };
        let hovered = self.tracker.is_hovered();
        let global_alpha = self.canvas_alpha.value();
        for dot in self.grid.dots_mut() {
            dot.render(surface, &style, hovered, global_alpha)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animate/animator.rs"]
mod tests;
