use crate::animate::animator::Animator;
use crate::foundation::error::DotfieldResult;
use crate::lifecycle::scheduler::FrameScheduler;
use crate::render::surface::Surface;

/// Whether a frame request is outstanding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle<H> {
    /// Running; `handle` is the pending frame request.
    Active {
        /// Pending request, cancelled on suspend.
        handle: H,
    },
    /// No frame pending; all state is frozen.
    Suspended,
}

/// Effect of a visibility notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// First sighting: the animator was built and started.
    Constructed,
    /// The existing animator was restarted.
    Resumed,
    /// The pending frame was cancelled.
    Suspended,
    /// Already in the requested state.
    Unchanged,
}

/// Outcome of a fired frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStatus {
    /// A frame was simulated and drawn.
    Rendered,
    /// Drawing failed; the frame was dropped and the next one scheduled.
    Skipped,
    /// The gate is suspended (or never started); nothing ran.
    Ignored,
}

/// Pauses and resumes one field's frame loop with the surface's visibility.
///
/// The animator is built on the first `show` and kept for the gate's
/// lifetime; hiding only cancels the pending frame, so a later `show` resumes
/// from exactly where the field stopped.
#[derive(Debug)]
pub struct VisibilityGate<S: FrameScheduler> {
    scheduler: S,
    lifecycle: Lifecycle<S::Handle>,
    animator: Option<Animator>,
}

impl<S: FrameScheduler> VisibilityGate<S> {
    /// Suspended gate with no animator yet.
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            lifecycle: Lifecycle::Suspended,
            animator: None,
        }
    }

    /// Current lifecycle state.
    pub fn lifecycle(&self) -> Lifecycle<S::Handle> {
        self.lifecycle
    }

    /// `true` while a frame request is outstanding.
    pub fn is_active(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Active { .. })
    }

    /// The animator, once built.
    pub fn animator(&self) -> Option<&Animator> {
        self.animator.as_ref()
    }

    /// Mutable animator, once built. Input and resize go through here.
    pub fn animator_mut(&mut self) -> Option<&mut Animator> {
        self.animator.as_mut()
    }

    /// The frame scheduler.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Mutable frame scheduler.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Surface entered the viewport. `build` runs only on the first call.
    pub fn show<F>(&mut self, build: F) -> DotfieldResult<Transition>
    where
        F: FnOnce() -> DotfieldResult<Animator>,
    {
        if self.is_active() {
            return Ok(Transition::Unchanged);
        }

        let transition = if self.animator.is_none() {
            self.animator = Some(build()?);
            Transition::Constructed
        } else {
            Transition::Resumed
        };

        let handle = self.scheduler.request_frame()?;
        self.lifecycle = Lifecycle::Active { handle };
        tracing::debug!(?transition, ?handle, "dot field visible");
        Ok(transition)
    }

    /// Surface left the viewport: cancel the pending frame.
    pub fn hide(&mut self) -> Transition {
        let Lifecycle::Active { handle } = self.lifecycle else {
            return Transition::Unchanged;
        };
        self.scheduler.cancel_frame(handle);
        self.lifecycle = Lifecycle::Suspended;
        tracing::debug!(?handle, "dot field hidden");
        Transition::Suspended
    }

    /// Dispatch a visibility notification to [`show`](Self::show) or
    /// [`hide`](Self::hide).
    pub fn set_visible<F>(&mut self, visible: bool, build: F) -> DotfieldResult<Transition>
    where
        F: FnOnce() -> DotfieldResult<Animator>,
    {
        if visible {
            self.show(build)
        } else {
            Ok(self.hide())
        }
    }

    /// The pending frame fired: run one animator tick and request the next
    /// frame. Draw failures are logged and the frame is [`FrameStatus::Skipped`].
    ///
    /// A skipped frame is not necessarily a no-op: see [`Animator::tick`] for
    /// how much of the frame has been applied when a draw fails.
    pub fn on_frame(&mut self, surface: &mut dyn Surface) -> DotfieldResult<FrameStatus> {
        if !self.is_active() {
            return Ok(FrameStatus::Ignored);
        }
        let Some(animator) = self.animator.as_mut() else {
            return Ok(FrameStatus::Ignored);
        };

        let result = animator.tick(surface);
        let handle = self.scheduler.request_frame()?;
        self.lifecycle = Lifecycle::Active { handle };

        match result {
            Ok(()) => Ok(FrameStatus::Rendered),
            Err(err) => {
                tracing::warn!(%err, "skipping dot field frame");
                Ok(FrameStatus::Skipped)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/lifecycle/gate.rs"]
mod tests;
