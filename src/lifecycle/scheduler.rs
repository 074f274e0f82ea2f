use std::fmt::Debug;

use crate::foundation::error::DotfieldResult;

/// Host primitive that calls back once per display refresh.
///
/// Mirrors `requestAnimationFrame` / `cancelAnimationFrame`: each request
/// yields a handle, and a cancelled handle never fires.
pub trait FrameScheduler {
    /// Identifies one pending request.
    type Handle: Copy + Eq + Debug;

    /// Ask for one callback on the next frame.
    fn request_frame(&mut self) -> DotfieldResult<Self::Handle>;

    /// Withdraw a pending request.
    fn cancel_frame(&mut self, handle: Self::Handle);
}

/// Handle issued by [`ManualScheduler`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Scheduler driven by hand: headless renders and tests decide when a frame
/// "fires".
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    next: u64,
    pending: Option<FrameHandle>,
    requested: u64,
    cancelled: u64,
}

impl ManualScheduler {
    /// Scheduler with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that would fire next, if any.
    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Consume the pending request, as the host does when it runs the
    /// callback. Returns the handle that fired.
    pub fn fire(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }

    /// Requests made so far.
    pub fn requested(&self) -> u64 {
        self.requested
    }

    /// Cancellations that hit a pending request.
    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    type Handle = FrameHandle;

    fn request_frame(&mut self) -> DotfieldResult<FrameHandle> {
        self.next += 1;
        self.requested += 1;
        let handle = FrameHandle(self.next);
        self.pending = Some(handle);
        Ok(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
            self.cancelled += 1;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/lifecycle/scheduler.rs"]
mod tests;
