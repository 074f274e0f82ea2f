use rand::Rng;

use crate::config::options::DotFieldOptions;
use crate::foundation::core::{Affine, Line, Point, Rgba8};
use crate::foundation::error::DotfieldResult;
use crate::foundation::math::ease_toward;
use crate::render::surface::{StrokeStyle, Surface};

/// Resting segment length. Targets are never clamped below this.
pub const MIN_MAGNITUDE: f64 = 0.001;

/// Fraction of the remaining distance covered by one [`Dot::ease`] call.
pub const EASE_FACTOR: f64 = 0.1;

/// Shape of the per-dot twinkle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OscillatorParams {
    /// Upper phase bound (inclusive).
    pub tick_count: u32,
    /// Phase increment per advance.
    pub step: u32,
    /// Alpha at phase 0.
    pub min_alpha: f64,
    /// Alpha at phase `tick_count`.
    pub max_alpha: f64,
}

impl OscillatorParams {
    /// Extract oscillator tuning from field options.
    pub fn from_options(opts: &DotFieldOptions) -> Self {
        Self {
            tick_count: opts.tick_count,
            step: opts.alpha_step,
            min_alpha: opts.min_alpha,
            max_alpha: opts.max_alpha,
        }
    }
}

/// Triangle-wave alpha oscillator.
///
/// Invariant: `phase` stays in `[0, tick_count]`.
#[derive(Clone, Debug, PartialEq)]
pub struct AlphaOscillator {
    params: OscillatorParams,
    phase: u32,
    increasing: bool,
}

impl AlphaOscillator {
    /// Start at an explicit phase; out-of-range phases are clamped.
    pub fn new(params: OscillatorParams, phase: u32, increasing: bool) -> Self {
        Self {
            phase: phase.min(params.tick_count),
            params,
            increasing,
        }
    }

    /// Start at a uniformly random phase and direction.
    pub fn random<R: Rng + ?Sized>(params: OscillatorParams, rng: &mut R) -> Self {
        let phase = rng.gen_range(0..=params.tick_count);
        let increasing = rng.gen_bool(0.5);
        Self::new(params, phase, increasing)
    }

    /// Advance one step and return the new alpha.
    pub fn advance(&mut self) -> f64 {
        let top = self.params.tick_count;
        if (self.increasing && self.phase >= top) || (!self.increasing && self.phase == 0) {
            self.increasing = !self.increasing;
        }

        self.phase = if self.increasing {
            self.phase.saturating_add(self.params.step).min(top)
        } else {
            self.phase.saturating_sub(self.params.step)
        };
        self.alpha()
    }

    /// Alpha for the current phase.
    pub fn alpha(&self) -> f64 {
        let OscillatorParams {
            tick_count,
            min_alpha,
            max_alpha,
            ..
        } = self.params;
        if tick_count == 0 {
            return max_alpha;
        }
        let t = f64::from(self.phase) / f64::from(tick_count);
        min_alpha + (max_alpha - min_alpha) * t
    }

    /// Current phase in `[0, tick_count]`.
    pub fn phase(&self) -> u32 {
        self.phase
    }

    /// Direction of phase travel.
    pub fn is_increasing(&self) -> bool {
        self.increasing
    }

    /// Tuning this oscillator was built with.
    pub fn params(&self) -> OscillatorParams {
        self.params
    }
}

/// Stroke parameters shared by every dot of a field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DotStyle {
    /// Stroke colour.
    pub color: Rgba8,
    /// Stroke width in logical pixels.
    pub line_width: f64,
    /// Device pixels per logical pixel.
    pub device_pixel_ratio: f64,
}

/// One oriented line segment of the grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Dot {
    position: Point,
    magnitude: f64,
    angle: f64,
    target_magnitude: f64,
    target_angle: f64,
    oscillator: AlphaOscillator,
    alpha: f64,
}

impl Dot {
    /// A resting dot centred at `position` (device pixels).
    pub fn new(position: Point, oscillator: AlphaOscillator) -> Self {
        Self {
            position,
            magnitude: MIN_MAGNITUDE,
            angle: 0.0,
            target_magnitude: MIN_MAGNITUDE,
            target_angle: 0.0,
            alpha: oscillator.alpha(),
            oscillator,
        }
    }

    /// Centre of the segment in device pixels.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Current drawn length.
    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// Current drawn rotation in radians.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Length the dot is easing toward.
    pub fn target_magnitude(&self) -> f64 {
        self.target_magnitude
    }

    /// Rotation the dot is easing toward.
    pub fn target_angle(&self) -> f64 {
        self.target_angle
    }

    /// Alpha computed by the last oscillator step (or snap).
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// The twinkle state.
    pub fn oscillator(&self) -> &AlphaOscillator {
        &self.oscillator
    }

    /// Step the twinkle oscillator.
    pub fn advance_alpha(&mut self) -> f64 {
        self.alpha = self.oscillator.advance();
        self.alpha
    }

    /// Force the current alpha to fully opaque; the phase is left alone.
    pub fn snap_alpha(&mut self) {
        self.alpha = 1.0;
    }

    /// Store new targets. Callers clamp `magnitude` to `[MIN_MAGNITUDE, max_magnitude]`.
    pub fn set_target(&mut self, magnitude: f64, angle: f64) {
        self.target_magnitude = magnitude;
        self.target_angle = angle;
    }

    /// Move magnitude and angle [`EASE_FACTOR`] of the way toward their targets.
    pub fn ease(&mut self) {
        self.magnitude = ease_toward(self.magnitude, self.target_magnitude, EASE_FACTOR);
        self.angle = ease_toward(self.angle, self.target_angle, EASE_FACTOR);
    }

    /// Advance the oscillator, then stroke the segment.
    ///
    /// Opacity is `(hovered ? 1 : alpha) * global_alpha`.
    pub fn render(
        &mut self,
        surface: &mut dyn Surface,
        style: &DotStyle,
        hovered: bool,
        global_alpha: f64,
    ) -> DotfieldResult<()> {
        self.advance_alpha();
        let base = if hovered { 1.0 } else { self.alpha };

        let transform = Affine::translate(self.position.to_vec2())
            * Affine::scale(style.device_pixel_ratio)
            * Affine::rotate(self.angle);
        let half = self.magnitude / 2.0;
        let line = Line::new((-half, 0.0), (half, 0.0));

        surface.stroke_line(
            transform,
            line,
            &StrokeStyle {
                color: style.color,
                width: style.line_width,
                opacity: base * global_alpha,
            },
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/field/dot.rs"]
mod tests;
