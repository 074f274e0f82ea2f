use super::*;

#[test]
fn reaches_one_after_exactly_duration_ticks() {
    let mut alpha = CanvasAlpha::new(Some(100));
    assert_eq!(alpha.value(), 0.0);
    for i in 1..100 {
        let v = alpha.tick();
        assert!(v < 1.0, "tick {i} reached {v} early");
    }
    assert_eq!(alpha.tick(), 1.0);
    assert!(alpha.is_complete());
    for _ in 0..50 {
        assert_eq!(alpha.tick(), 1.0);
    }
}

#[test]
fn monotonic_progress() {
    let mut alpha = CanvasAlpha::new(Some(7));
    let mut prev = alpha.value();
    for _ in 0..20 {
        let v = alpha.tick();
        assert!(v >= prev && v <= 1.0);
        prev = v;
    }
}

#[test]
fn no_fade_is_always_opaque() {
    let mut alpha = CanvasAlpha::new(None);
    assert!(alpha.is_complete());
    assert_eq!(alpha.value(), 1.0);
    assert_eq!(alpha.tick(), 1.0);

    assert_eq!(CanvasAlpha::new(Some(0)).value(), 1.0);
}
