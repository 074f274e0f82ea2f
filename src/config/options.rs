use crate::config::theme::{Theme, Variant};
use crate::field::dot::MIN_MAGNITUDE;
use crate::foundation::core::Rgba8;
use crate::foundation::error::{DotfieldError, DotfieldResult};

/// Tuning for one dot field instance.
///
/// Lengths are logical (CSS) pixels; the animator scales them by the device
/// pixel ratio. Missing fields deserialize from [`DotFieldOptions::default`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DotFieldOptions {
    /// Distance between neighbouring dot centres.
    pub spacing: f64,
    /// Stroke colour.
    pub color: Rgba8,
    /// Stroke width.
    pub line_width: f64,
    /// Oscillator period half-length in frames (phase runs `0..=tick_count`).
    pub tick_count: u32,
    /// Phase increment per frame.
    pub alpha_step: u32,
    /// Alpha at phase 0.
    pub min_alpha: f64,
    /// Alpha at phase `tick_count`.
    pub max_alpha: f64,
    /// Upper clamp for a dot's segment length.
    pub max_magnitude: f64,
    /// Pointer influence: magnitude is `radius / distance` before clamping.
    pub radius: f64,
    /// Frames over which the whole field fades in; `None` disables the fade.
    pub fade_in_frames: Option<u32>,
}

impl Default for DotFieldOptions {
    fn default() -> Self {
        Self::preset(Theme::default(), Variant::default())
    }
}

impl DotFieldOptions {
    /// Shipped tuning for a palette and variant.
    pub fn preset(theme: Theme, variant: Variant) -> Self {
        let base = Self {
            spacing: 10.0,
            color: theme.stroke_color(),
            line_width: 2.0,
            tick_count: 200,
            alpha_step: 1,
            min_alpha: 0.0,
            max_alpha: 1.0,
            max_magnitude: 8.0,
            radius: 1000.0,
            fade_in_frames: None,
        };

        match variant {
            Variant::Classic => base,
            Variant::FadeIn => Self {
                tick_count: match theme {
                    Theme::Light => 200,
                    Theme::Dark => 100,
                },
                min_alpha: 0.2,
                fade_in_frames: Some(100),
                ..base
            },
        }
    }

    /// Parse a JSON object and lay its fields over `base`.
    pub fn from_json_over(json: &str, base: &Self) -> DotfieldResult<Self> {
        let overlay: serde_json::Value = serde_json::from_str(json)?;
        let serde_json::Value::Object(overlay) = overlay else {
            return Err(DotfieldError::serde("options JSON must be an object"));
        };

        let mut merged = serde_json::to_value(base)?;
        if let serde_json::Value::Object(fields) = &mut merged {
            fields.extend(overlay);
        }
        let opts: Self = serde_json::from_value(merged)?;
        opts.validate()?;
        Ok(opts)
    }

    /// Reject values the animator cannot work with.
    pub fn validate(&self) -> DotfieldResult<()> {
        fn positive(name: &str, v: f64) -> DotfieldResult<()> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(DotfieldError::validation(format!(
                    "{name} must be finite and > 0, got {v}"
                )))
            }
        }

        positive("spacing", self.spacing)?;
        positive("line_width", self.line_width)?;
        if !self.max_magnitude.is_finite() || self.max_magnitude < MIN_MAGNITUDE {
            return Err(DotfieldError::validation(format!(
                "max_magnitude must be finite and >= {MIN_MAGNITUDE}"
            )));
        }
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(DotfieldError::validation("radius must be finite and >= 0"));
        }
        if self.tick_count == 0 {
            return Err(DotfieldError::validation("tick_count must be > 0"));
        }
        if self.alpha_step == 0 {
            return Err(DotfieldError::validation("alpha_step must be > 0"));
        }
        let alpha_ok = |a: f64| (0.0..=1.0).contains(&a);
        if !alpha_ok(self.min_alpha) || !alpha_ok(self.max_alpha) {
            return Err(DotfieldError::validation("alpha bounds must lie in [0, 1]"));
        }
        if self.min_alpha > self.max_alpha {
            return Err(DotfieldError::validation("min_alpha must be <= max_alpha"));
        }
        if self.fade_in_frames == Some(0) {
            return Err(DotfieldError::validation("fade_in_frames must be > 0 when set"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/options.rs"]
mod tests;
