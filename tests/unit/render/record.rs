use super::*;
use crate::foundation::core::Rgba8;

fn style() -> StrokeStyle {
    StrokeStyle {
        color: Rgba8::rgb(1, 2, 3),
        width: 2.0,
        opacity: 0.5,
    }
}

#[test]
fn strokes_are_mapped_to_device_space() {
    let mut s = RecordingSurface::new(SurfaceSize::new(10, 10));
    let t = Affine::translate((5.0, 5.0)) * Affine::scale(2.0);
    s.stroke_line(t, Line::new((-1.0, 0.0), (1.0, 0.0)), &style())
        .unwrap();

    let [DrawCall::Stroke { p0, p1, .. }] = s.calls() else {
        panic!("expected one stroke, got {:?}", s.calls());
    };
    assert_eq!(*p0, Point::new(3.0, 5.0));
    assert_eq!(*p1, Point::new(7.0, 5.0));
}

#[test]
fn last_frame_starts_after_the_latest_clear() {
    let mut s = RecordingSurface::new(SurfaceSize::new(10, 10));
    let line = Line::new((0.0, 0.0), (1.0, 0.0));
    s.stroke_line(Affine::IDENTITY, line, &style()).unwrap();
    s.clear().unwrap();
    s.stroke_line(Affine::IDENTITY, line, &style()).unwrap();
    s.stroke_line(Affine::IDENTITY, line, &style()).unwrap();

    assert_eq!(s.last_frame_strokes().len(), 2);
    assert_eq!(s.take_calls().len(), 4);
    assert!(s.calls().is_empty());
}

#[test]
fn resize_updates_reported_size() {
    let mut s = RecordingSurface::new(SurfaceSize::new(10, 10));
    s.resize(SurfaceSize::new(3, 4)).unwrap();
    assert_eq!(s.size(), SurfaceSize::new(3, 4));
}
