use crate::foundation::core::{Point, Vec2};

/// One exponential-decay step: move `current` by `factor` of the remaining
/// distance to `target`.
pub(crate) fn ease_toward(current: f64, target: f64, factor: f64) -> f64 {
    current + (target - current) * factor
}

/// Euclidean distance between `from` and `to`, floored at 1.
pub(crate) fn floored_distance(delta: Vec2) -> f64 {
    let d = delta.hypot();
    if d < 1.0 || !d.is_finite() { 1.0 } else { d }
}

/// Attraction of a dot at `dot` toward `pointer`: `(magnitude, angle)`.
///
/// Magnitude is `radius / distance` clamped to `[min_magnitude, max_magnitude]`;
/// angle points from the dot toward the pointer.
pub(crate) fn attraction(
    dot: Point,
    pointer: Point,
    radius: f64,
    min_magnitude: f64,
    max_magnitude: f64,
) -> (f64, f64) {
    let delta = pointer - dot;
    let distance = floored_distance(delta);
    let angle = delta.y.atan2(delta.x);
    let magnitude = (radius / distance).clamp(min_magnitude, max_magnitude);
    (magnitude, angle)
}

pub(crate) fn premul_rgba8(r: u8, g: u8, b: u8, a: u8) -> [u8; 4] {
    let af = (a as u16) + 1;
    let premul = |c: u8| -> u8 { (((c as u16) * af) >> 8) as u8 };
    [premul(r), premul(g), premul(b), a]
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
