use rand::Rng;

use crate::field::dot::{AlphaOscillator, Dot, MIN_MAGNITUDE, OscillatorParams};
use crate::foundation::core::{Point, SurfaceSize};
use crate::foundation::error::{DotfieldError, DotfieldResult};

/// Largest grid [`Grid::build`] will allocate.
pub const MAX_DOTS: usize = 1 << 22;

/// Row-major grid of dots covering a surface.
///
/// A grid is never resized in place; [`Grid::build`] produces a fresh one for
/// every surface size.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    spacing: f64,
    dots: Vec<Dot>,
}

impl Grid {
    /// Lay out `ceil(h / spacing) x ceil(w / spacing)` dots, each centred in its
    /// cell. `spacing` is in device pixels; a non-positive spacing gives an
    /// empty grid.
    ///
    /// Fails when the layout would exceed [`MAX_DOTS`].
    pub fn build<R: Rng + ?Sized>(
        size: SurfaceSize,
        spacing: f64,
        params: OscillatorParams,
        rng: &mut R,
    ) -> DotfieldResult<Self> {
        let cells = |extent: u32| -> f64 {
            if spacing > 0.0 && spacing.is_finite() {
                (f64::from(extent) / spacing).ceil()
            } else {
                0.0
            }
        };
        let (rows, cols) = (cells(size.height), cells(size.width));
        if rows * cols > MAX_DOTS as f64 {
            return Err(DotfieldError::validation(format!(
                "spacing {spacing} on a {}x{} surface needs {rows}x{cols} dots, more than {MAX_DOTS}",
                size.width, size.height
            )));
        }
        let (rows, cols) = (rows as usize, cols as usize);

        let mut dots = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                let center = Point::new(
                    (col as f64 + 0.5) * spacing,
                    (row as f64 + 0.5) * spacing,
                );
                dots.push(Dot::new(center, AlphaOscillator::random(params, rng)));
            }
        }

        tracing::debug!(rows, cols, spacing, "built dot grid");
        Ok(Self {
            rows,
            cols,
            spacing,
            dots,
        })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cell size in device pixels.
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Total dot count.
    pub fn len(&self) -> usize {
        self.dots.len()
    }

    /// `true` when the grid holds no dots.
    pub fn is_empty(&self) -> bool {
        self.dots.is_empty()
    }

    /// Dot at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Option<&Dot> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.dots.get(row * self.cols + col)
    }

    /// All dots in row-major order.
    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }

    /// Mutable dots in row-major order.
    pub fn dots_mut(&mut self) -> &mut [Dot] {
        &mut self.dots
    }

    /// Relax every dot back toward `(MIN_MAGNITUDE, 0)`.
    pub fn release_targets(&mut self) {
        for dot in &mut self.dots {
            dot.set_target(MIN_MAGNITUDE, 0.0);
        }
    }

    /// Ease every dot one step toward its target.
    pub fn ease_all(&mut self) {
        for dot in &mut self.dots {
            dot.ease();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/field/grid.rs"]
mod tests;
