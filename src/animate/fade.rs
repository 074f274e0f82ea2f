/// Global fade-in progress of a whole field.
///
/// Computed from an integer frame counter so it lands exactly on `1.0` after
/// `duration` ticks and never overshoots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CanvasAlpha {
    duration: Option<u32>,
    elapsed: u32,
}

impl CanvasAlpha {
    /// Fade over `duration_frames`; `None` holds at full opacity from the start.
    pub fn new(duration_frames: Option<u32>) -> Self {
        Self {
            duration: duration_frames.filter(|&d| d > 0),
            elapsed: 0,
        }
    }

    /// Advance one frame if the fade is still running; return the new value.
    pub fn tick(&mut self) -> f64 {
        if let Some(d) = self.duration
            && self.elapsed < d
        {
            self.elapsed += 1;
        }
        self.value()
    }

    /// Current opacity in `[0, 1]`.
    pub fn value(&self) -> f64 {
        match self.duration {
            None => 1.0,
            Some(d) if self.elapsed >= d => 1.0,
            Some(d) => f64::from(self.elapsed) / f64::from(d),
        }
    }

    /// `true` once the value has reached `1.0`.
    pub fn is_complete(&self) -> bool {
        self.duration.is_none_or(|d| self.elapsed >= d)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animate/fade.rs"]
mod tests;
