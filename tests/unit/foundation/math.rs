use super::*;

#[test]
fn ease_covers_ten_percent_of_the_gap() {
    let next = ease_toward(0.0, 10.0, 0.1);
    assert!((next - 1.0).abs() < 1e-12);
    assert!(((10.0 - next) - 0.9 * 10.0).abs() < 1e-12);
    assert_eq!(ease_toward(3.5, 3.5, 0.1), 3.5);
}

#[test]
fn coincident_points_floor_distance_at_one() {
    assert_eq!(floored_distance(Vec2::ZERO), 1.0);
    assert_eq!(floored_distance(Vec2::new(0.3, 0.4)), 1.0);
    assert_eq!(floored_distance(Vec2::new(3.0, 4.0)), 5.0);
}

#[test]
fn attraction_at_pointer_is_capped_by_max_magnitude() {
    let p = Point::new(5.0, 5.0);
    let (m, a) = attraction(p, p, 1000.0, 0.001, 8.0);
    assert_eq!(m, 8.0);
    assert_eq!(a, 0.0);

    let (m, _) = attraction(p, p, 3.0, 0.001, 8.0);
    assert_eq!(m, 3.0);
}

#[test]
fn attraction_points_toward_pointer() {
    let (m, a) = attraction(Point::new(0.0, 0.0), Point::new(0.0, 10.0), 20.0, 0.001, 8.0);
    assert_eq!(m, 2.0);
    assert!((a - std::f64::consts::FRAC_PI_2).abs() < 1e-12);

    let (m, _) = attraction(Point::ZERO, Point::new(1e9, 0.0), 1.0, 0.001, 8.0);
    assert_eq!(m, 0.001);
}

#[test]
fn premul_keeps_opaque_channels() {
    assert_eq!(premul_rgba8(10, 20, 30, 255), [10, 20, 30, 255]);
    assert_eq!(premul_rgba8(255, 255, 255, 0), [0, 0, 0, 0]);
}
