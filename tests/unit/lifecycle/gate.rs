use super::*;
use crate::animate::animator::HostEnv;
use crate::config::options::DotFieldOptions;
use crate::foundation::core::{Affine, Line, Point, SurfaceSize};
use crate::foundation::error::DotfieldError;
use crate::interact::pointer::PointerEvent;
use crate::lifecycle::scheduler::{FrameHandle, ManualScheduler};
use crate::render::record::RecordingSurface;
use crate::render::surface::StrokeStyle;

const SIZE: SurfaceSize = SurfaceSize {
    width: 40,
    height: 40,
};

fn build() -> DotfieldResult<Animator> {
    Animator::with_seed(DotFieldOptions::default(), HostEnv::desktop(SIZE), 11)
}

#[test]
fn first_show_constructs_then_resumes() {
    let mut gate = VisibilityGate::new(ManualScheduler::new());
    assert_eq!(gate.lifecycle(), Lifecycle::Suspended);
    assert_eq!(gate.show(build).unwrap(), Transition::Constructed);
    assert_eq!(
        gate.lifecycle(),
        Lifecycle::Active {
            handle: FrameHandle(1)
        }
    );

    assert_eq!(gate.hide(), Transition::Suspended);
    assert_eq!(gate.scheduler().cancelled(), 1);
    assert_eq!(gate.scheduler().pending(), None);

    let mut built_again = false;
    let t = gate
        .show(|| {
            built_again = true;
            build()
        })
        .unwrap();
    assert_eq!(t, Transition::Resumed);
    assert!(!built_again);
}

#[test]
fn transitions_are_idempotent() {
    let mut gate = VisibilityGate::new(ManualScheduler::new());
    assert_eq!(gate.hide(), Transition::Unchanged);
    gate.show(build).unwrap();
    assert_eq!(gate.show(build).unwrap(), Transition::Unchanged);
    assert_eq!(gate.scheduler().requested(), 1);
    gate.hide();
    assert_eq!(gate.hide(), Transition::Unchanged);
    assert_eq!(gate.scheduler().cancelled(), 1);
}

#[test]
fn frames_reschedule_while_active() {
    let mut gate = VisibilityGate::new(ManualScheduler::new());
    let mut surface = RecordingSurface::new(SIZE);
    gate.set_visible(true, build).unwrap();

    for expected in 2..6 {
        assert!(gate.scheduler_mut().fire().is_some());
        assert_eq!(gate.on_frame(&mut surface).unwrap(), FrameStatus::Rendered);
        assert_eq!(gate.scheduler().pending(), Some(FrameHandle(expected)));
    }
    assert_eq!(gate.animator().unwrap().frame_count(), 4);
}

#[test]
fn hidden_gate_freezes_state_and_resumes_exactly() {
    let mut gate = VisibilityGate::new(ManualScheduler::new());
    let mut surface = RecordingSurface::new(SIZE);
    gate.show(build).unwrap();
    {
        let a = gate.animator_mut().unwrap();
        a.handle_pointer(PointerEvent::Enter);
        a.handle_pointer(PointerEvent::Move(Point::new(20.0, 20.0)));
    }
    for _ in 0..3 {
        gate.scheduler_mut().fire();
        gate.on_frame(&mut surface).unwrap();
    }

    gate.set_visible(false, build).unwrap();
    let frozen = gate.animator().unwrap().grid().clone();
    for _ in 0..5 {
        assert_eq!(gate.on_frame(&mut surface).unwrap(), FrameStatus::Ignored);
    }
    assert_eq!(gate.animator().unwrap().grid(), &frozen);
    assert_eq!(gate.animator().unwrap().frame_count(), 3);

    gate.set_visible(true, build).unwrap();
    gate.scheduler_mut().fire();
    gate.on_frame(&mut surface).unwrap();

    let mut expected = frozen;
    expected.ease_all();
    let resumed = gate.animator().unwrap().grid();
    for (want, got) in expected.dots().iter().zip(resumed.dots()) {
        assert_eq!(want.magnitude(), got.magnitude());
        assert_eq!(want.angle(), got.angle());
    }
}

#[test]
fn build_failure_leaves_gate_suspended() {
    let mut gate = VisibilityGate::new(ManualScheduler::new());
    let err = gate
        .show(|| Err(DotfieldError::validation("nope")))
        .unwrap_err();
    assert!(err.to_string().contains("nope"));
    assert!(!gate.is_active());
    assert!(gate.animator().is_none());
    assert_eq!(gate.scheduler().requested(), 0);
}

struct FailingSurface;

impl Surface for FailingSurface {
    fn size(&self) -> SurfaceSize {
        SIZE
    }

    fn clear(&mut self) -> DotfieldResult<()> {
        Err(DotfieldError::render("context lost"))
    }

    fn stroke_line(&mut self, _: Affine, _: Line, _: &StrokeStyle) -> DotfieldResult<()> {
        Ok(())
    }
}

#[test]
fn failed_draw_skips_but_keeps_running() {
    let mut gate = VisibilityGate::new(ManualScheduler::new());
    gate.show(build).unwrap();
    gate.scheduler_mut().fire();
    assert_eq!(gate.on_frame(&mut FailingSurface).unwrap(), FrameStatus::Skipped);
    assert!(gate.is_active());
    assert!(gate.scheduler().pending().is_some());
}

#[test]
fn refused_clear_leaves_the_field_untouched() {
    let mut gate = VisibilityGate::new(ManualScheduler::new());
    gate.show(build).unwrap();
    let before = gate.animator().unwrap().grid().clone();

    gate.scheduler_mut().fire();
    assert_eq!(gate.on_frame(&mut FailingSurface).unwrap(), FrameStatus::Skipped);

    let animator = gate.animator().unwrap();
    assert_eq!(animator.frame_count(), 0);
    assert_eq!(animator.grid(), &before);
}

/// Accepts the clear and the first stroke, then fails every later stroke.
struct StrokeOnceSurface {
    strokes: usize,
}

impl Surface for StrokeOnceSurface {
    fn size(&self) -> SurfaceSize {
        SIZE
    }

    fn clear(&mut self) -> DotfieldResult<()> {
        Ok(())
    }

    fn stroke_line(&mut self, _: Affine, _: Line, _: &StrokeStyle) -> DotfieldResult<()> {
        self.strokes += 1;
        if self.strokes > 1 {
            return Err(DotfieldError::render("out of memory"));
        }
        Ok(())
    }
}

#[test]
fn stroke_failure_mid_frame_still_counts_the_update() {
    let mut gate = VisibilityGate::new(ManualScheduler::new());
    gate.show(build).unwrap();
    assert!(gate.animator().unwrap().grid().len() > 1);

    gate.scheduler_mut().fire();
    let mut surface = StrokeOnceSurface { strokes: 0 };
    assert_eq!(gate.on_frame(&mut surface).unwrap(), FrameStatus::Skipped);
    assert_eq!(surface.strokes, 2);
    assert_eq!(gate.animator().unwrap().frame_count(), 1);
    assert!(gate.scheduler().pending().is_some());
}
