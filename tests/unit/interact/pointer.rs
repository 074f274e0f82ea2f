use super::*;

#[test]
fn enter_move_leave_cycle() {
    let mut t = InteractionTracker::desktop();
    assert_eq!(t.handle(PointerEvent::Enter), PointerOutcome::Tracked);
    assert!(t.is_hovered());
    assert_eq!(t.take_move(), None);

    t.handle(PointerEvent::Move(Point::new(3.0, 4.0)));
    assert_eq!(t.take_move(), Some(Point::new(3.0, 4.0)));
    assert_eq!(t.take_move(), None, "move is consumed once");

    assert_eq!(t.handle(PointerEvent::Leave), PointerOutcome::Released);
    assert!(!t.is_hovered());
}

#[test]
fn move_without_hover_is_kept_until_enter() {
    let mut t = InteractionTracker::desktop();
    t.handle(PointerEvent::Move(Point::new(1.0, 1.0)));
    assert_eq!(t.take_move(), None);
    assert!(t.state().moved);

    t.handle(PointerEvent::Enter);
    assert_eq!(t.take_move(), Some(Point::new(1.0, 1.0)));
}

#[test]
fn touch_start_is_enter_plus_move() {
    let mut t = InteractionTracker::desktop();
    t.handle(PointerEvent::TouchStart(Point::new(8.0, 9.0)));
    assert!(t.is_hovered());
    assert_eq!(t.take_move(), Some(Point::new(8.0, 9.0)));

    t.handle(PointerEvent::TouchMove(Point::new(1.0, 2.0)));
    assert_eq!(t.take_move(), Some(Point::new(1.0, 2.0)));

    assert_eq!(t.handle(PointerEvent::TouchEnd), PointerOutcome::Released);
    assert!(!t.is_hovered());
}

#[test]
fn mobile_viewport_ignores_everything() {
    let mut t = InteractionTracker::for_viewport(767.9);
    assert!(!t.is_enabled());
    assert_eq!(t.handle(PointerEvent::Enter), PointerOutcome::Ignored);
    assert_eq!(
        t.handle(PointerEvent::TouchStart(Point::new(1.0, 1.0))),
        PointerOutcome::Ignored
    );
    assert_eq!(t.handle(PointerEvent::Leave), PointerOutcome::Ignored);
    assert!(!t.is_hovered());
    assert_eq!(t.take_move(), None);

    assert!(InteractionTracker::for_viewport(768.0).is_enabled());
}

#[test]
fn client_points_become_relative() {
    assert_eq!(
        relative_to(Point::new(110.0, 45.0), Point::new(100.0, 40.0)),
        Point::new(10.0, 5.0)
    );
}
