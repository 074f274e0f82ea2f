use crate::foundation::core::Point;

/// Viewports narrower than this (logical pixels) are treated as mobile and
/// get no pointer interaction.
pub const MOBILE_BREAKPOINT: f64 = 768.0;

/// Input delivered to a dot field, positions relative to the surface's
/// top-left corner in logical pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    /// Mouse entered the surface.
    Enter,
    /// Mouse moved.
    Move(Point),
    /// Mouse left the surface.
    Leave,
    /// A touch began.
    TouchStart(Point),
    /// A touch moved.
    TouchMove(Point),
    /// A touch ended.
    TouchEnd,
}

/// What the owner of the grid must do after an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerOutcome {
    /// Nothing beyond the tracker's own state change.
    Tracked,
    /// Pointer left: every dot target must be released.
    Released,
    /// Tracker is disabled; event dropped.
    Ignored,
}

/// Last known pointer state, consumed once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    /// Last relative position in logical pixels.
    pub position: Point,
    /// Set by moves, cleared by the animator after it retargets the grid.
    pub moved: bool,
    /// Pointer currently over the surface.
    pub over: bool,
}

/// Convert a client-space point into surface-relative coordinates given the
/// surface's bounding-rectangle origin.
pub fn relative_to(client: Point, surface_origin: Point) -> Point {
    Point::new(client.x - surface_origin.x, client.y - surface_origin.y)
}

/// Records pointer and touch input for one surface.
#[derive(Clone, Debug, PartialEq)]
pub struct InteractionTracker {
    enabled: bool,
    state: PointerState,
}

impl InteractionTracker {
    /// Tracker that ignores everything when `viewport_width` is below
    /// [`MOBILE_BREAKPOINT`]. The decision is fixed for the tracker's lifetime.
    pub fn for_viewport(viewport_width: f64) -> Self {
        Self {
            enabled: !is_mobile_viewport(viewport_width),
            state: PointerState::default(),
        }
    }

    /// Tracker that always records input.
    pub fn desktop() -> Self {
        Self {
            enabled: true,
            state: PointerState::default(),
        }
    }

    /// `false` on mobile viewports.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Current pointer state.
    pub fn state(&self) -> PointerState {
        self.state
    }

    /// `true` when the pointer is over the surface.
    pub fn is_hovered(&self) -> bool {
        self.state.over
    }

    /// Apply one input event.
    pub fn handle(&mut self, event: PointerEvent) -> PointerOutcome {
        if !self.enabled {
            return PointerOutcome::Ignored;
        }

        match event {
            PointerEvent::Enter => {
                self.state.over = true;
                PointerOutcome::Tracked
            }
            PointerEvent::Move(p) | PointerEvent::TouchMove(p) => {
                self.update_position(p);
                PointerOutcome::Tracked
            }
            PointerEvent::TouchStart(p) => {
                self.state.over = true;
                self.update_position(p);
                PointerOutcome::Tracked
            }
            PointerEvent::Leave | PointerEvent::TouchEnd => {
                self.reset();
                PointerOutcome::Released
            }
        }
    }

    /// Clear the hover flag. The caller releases the grid's targets.
    pub fn reset(&mut self) {
        self.state.over = false;
    }

    /// Return the pending move, if the pointer moved while over the surface,
    /// and clear the moved flag. Returns `None` without touching the flag
    /// otherwise.
    pub fn take_move(&mut self) -> Option<Point> {
        if self.enabled && self.state.moved && self.state.over {
            self.state.moved = false;
            Some(self.state.position)
        } else {
            None
        }
    }

    fn update_position(&mut self, p: Point) {
        self.state.position = p;
        self.state.moved = true;
    }
}

/// `true` when a viewport of this logical width counts as mobile.
pub fn is_mobile_viewport(viewport_width: f64) -> bool {
    viewport_width < MOBILE_BREAKPOINT
}

#[cfg(test)]
#[path = "../../tests/unit/interact/pointer.rs"]
mod tests;
