use super::*;
use crate::config::theme::{Theme, Variant};
use crate::render::record::{DrawCall, RecordingSurface};

fn classic() -> DotFieldOptions {
    DotFieldOptions::preset(Theme::Light, Variant::Classic)
}

fn animator(opts: DotFieldOptions, env: HostEnv) -> Animator {
    Animator::with_seed(opts, env, 3).unwrap()
}

#[test]
fn spacing_scales_with_device_pixel_ratio() {
    let env = HostEnv {
        size: SurfaceSize::new(200, 200),
        device_pixel_ratio: 2.0,
        viewport_width: 1280.0,
    };
    let a = animator(classic(), env);
    assert_eq!((a.grid().rows(), a.grid().cols()), (10, 10));
    assert_eq!(a.grid().spacing(), 20.0);
    assert_eq!(a.grid().get(0, 0).unwrap().position(), Point::new(10.0, 10.0));
}

#[test]
fn bad_device_pixel_ratio_is_rejected() {
    let env = HostEnv {
        device_pixel_ratio: 0.0,
        ..HostEnv::desktop(SurfaceSize::new(10, 10))
    };
    assert!(Animator::with_seed(classic(), env, 1).is_err());
}

#[test]
fn move_retargets_and_snaps_alpha() {
    let mut a = animator(classic(), HostEnv::desktop(SurfaceSize::new(100, 100)));
    a.handle_pointer(PointerEvent::Enter);
    a.handle_pointer(PointerEvent::Move(Point::new(50.0, 50.0)));
    a.update();

    assert!(!a.pointer().moved);
    let dot = a.grid().get(4, 4).unwrap();
    // (45, 45) to (50, 50): distance 5 * sqrt(2).
    let expected = (1000.0 / (50.0f64).sqrt()).clamp(MIN_MAGNITUDE, 8.0);
    assert_eq!(dot.target_magnitude(), expected);
    assert!((dot.target_angle() - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
    assert_eq!(dot.alpha(), 1.0);
}

#[test]
fn move_without_hover_does_nothing() {
    let mut a = animator(classic(), HostEnv::desktop(SurfaceSize::new(40, 40)));
    a.handle_pointer(PointerEvent::Move(Point::new(10.0, 10.0)));
    a.update();
    assert!(a
        .grid()
        .dots()
        .iter()
        .all(|d| d.target_magnitude() == MIN_MAGNITUDE));
}

#[test]
fn leave_releases_targets() {
    let mut a = animator(classic(), HostEnv::desktop(SurfaceSize::new(40, 40)));
    a.handle_pointer(PointerEvent::Enter);
    a.handle_pointer(PointerEvent::Move(Point::new(10.0, 10.0)));
    a.update();
    assert_eq!(a.handle_pointer(PointerEvent::Leave), PointerOutcome::Released);
    assert!(a
        .grid()
        .dots()
        .iter()
        .all(|d| d.target_magnitude() == MIN_MAGNITUDE && d.target_angle() == 0.0));
}

#[test]
fn mobile_hosts_ignore_pointer() {
    let env = HostEnv {
        viewport_width: 375.0,
        ..HostEnv::desktop(SurfaceSize::new(40, 40))
    };
    let mut a = animator(classic(), env);
    assert!(!a.is_interactive());
    a.handle_pointer(PointerEvent::TouchStart(Point::new(10.0, 10.0)));
    a.update();
    assert!(!a.pointer().over);
    assert!(a
        .grid()
        .dots()
        .iter()
        .all(|d| d.target_magnitude() == MIN_MAGNITUDE));
}

#[test]
fn draw_clears_then_strokes_every_dot() {
    let size = SurfaceSize::new(30, 20);
    let mut a = animator(classic(), HostEnv::desktop(size));
    let mut surface = RecordingSurface::new(size);
    a.tick(&mut surface).unwrap();

    let calls = surface.calls();
    assert_eq!(calls.first(), Some(&DrawCall::Clear));
    assert_eq!(calls.len(), 1 + a.grid().len());
    assert!(calls[1..]
        .iter()
        .all(|c| matches!(c, DrawCall::Stroke { .. })));
}

#[test]
fn hovered_frames_draw_opaque() {
    let size = SurfaceSize::new(20, 20);
    let mut a = animator(classic(), HostEnv::desktop(size));
    a.handle_pointer(PointerEvent::Enter);
    let mut surface = RecordingSurface::new(size);
    a.tick(&mut surface).unwrap();
    for call in surface.last_frame_strokes() {
        let DrawCall::Stroke { style, .. } = call else {
            continue;
        };
        assert_eq!(style.opacity, 1.0);
    }
}

#[test]
fn fade_in_scales_stroke_opacity() {
    let size = SurfaceSize::new(20, 20);
    let opts = DotFieldOptions {
        fade_in_frames: Some(4),
        ..classic()
    };
    let mut a = animator(opts, HostEnv::desktop(size));
    a.handle_pointer(PointerEvent::Enter);
    let mut surface = RecordingSurface::new(size);

    a.tick(&mut surface).unwrap();
    assert_eq!(a.global_alpha(), 0.25);
    for call in surface.last_frame_strokes() {
        if let DrawCall::Stroke { style, .. } = call {
            assert_eq!(style.opacity, 0.25);
        }
    }

    for _ in 0..3 {
        a.tick(&mut surface).unwrap();
    }
    assert_eq!(a.global_alpha(), 1.0);
}

#[test]
fn resize_rebuilds_grid() {
    let mut a = animator(classic(), HostEnv::desktop(SurfaceSize::new(20, 20)));
    a.handle_pointer(PointerEvent::Enter);
    a.handle_pointer(PointerEvent::Move(Point::new(1.0, 1.0)));
    a.update();
    assert!(a.grid().dots()[0].target_magnitude() > MIN_MAGNITUDE);

    a.resize(SurfaceSize::new(55, 31)).unwrap();
    assert_eq!(a.size(), SurfaceSize::new(55, 31));
    assert_eq!((a.grid().rows(), a.grid().cols()), (4, 6));
    assert!(a
        .grid()
        .dots()
        .iter()
        .all(|d| d.target_magnitude() == MIN_MAGNITUDE));
}

#[test]
fn microscopic_spacing_is_an_error_not_a_panic() {
    let opts = DotFieldOptions {
        spacing: 1e-12,
        ..DotFieldOptions::preset(Theme::Dark, Variant::Classic)
    };
    assert!(opts.validate().is_ok());

    let err = Animator::with_seed(opts, HostEnv::desktop(SurfaceSize::new(100, 100)), 1)
        .unwrap_err();
    assert!(
        err.to_string().starts_with("validation error:"),
        "{err}"
    );
}

#[test]
fn oversized_resize_keeps_the_previous_grid() {
    let mut a = animator(classic(), HostEnv::desktop(SurfaceSize::new(40, 30)));
    let before = a.grid().clone();

    assert!(a.resize(SurfaceSize::new(60_000, 60_000)).is_err());
    assert_eq!(a.size(), SurfaceSize::new(40, 30));
    assert_eq!(a.grid(), &before);
}
