//! Headless playback: drive a [`VisibilityGate`] with a [`ManualScheduler`],
//! replay scripted input, and stream the rendered frames into a sink.

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::SurfaceSize;
use crate::foundation::error::{DotfieldError, DotfieldResult};
use crate::interact::pointer::PointerEvent;
use crate::lifecycle::gate::{FrameStatus, VisibilityGate};
use crate::lifecycle::scheduler::ManualScheduler;
use crate::render::cpu::CpuSurface;
use crate::render::surface::Surface;

/// Something that happens to the host before a given frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScriptAction {
    /// Deliver an input event.
    Pointer(PointerEvent),
    /// Surface scrolled out of view.
    Hide,
    /// Surface scrolled back into view.
    Show,
    /// Container resized: the grid is rebuilt for this size (device pixels).
    /// The preview output keeps its dimensions.
    Resize(SurfaceSize),
}

/// Ordered list of `(frame, action)` pairs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PreviewScript {
    steps: Vec<(u64, ScriptAction)>,
}

impl PreviewScript {
    /// Empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an action before `frame`. Actions at the same frame run in
    /// insertion order.
    pub fn at(mut self, frame: u64, action: ScriptAction) -> Self {
        self.steps.push((frame, action));
        self
    }

    /// Actions scheduled before `frame`.
    pub fn actions_at(&self, frame: u64) -> impl Iterator<Item = ScriptAction> + '_ {
        self.steps
            .iter()
            .filter(move |(f, _)| *f == frame)
            .map(|(_, a)| *a)
    }

    /// Number of scripted actions.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// `true` when nothing is scripted.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Frame counters from a preview run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PreviewStats {
    /// Frames simulated, drawn and pushed to the sink.
    pub rendered: u64,
    /// Host frames that passed while the gate was suspended.
    pub suspended: u64,
    /// Frames whose drawing failed.
    pub skipped: u64,
}

/// Run `frames` host refreshes.
///
/// The gate must already hold an animator (call [`VisibilityGate::show`]
/// first) unless the script shows it. Only rendered frames reach the sink,
/// indexed by host frame.
#[tracing::instrument(skip_all, fields(frames = frames))]
pub fn run_preview(
    gate: &mut VisibilityGate<ManualScheduler>,
    surface: &mut CpuSurface,
    script: &PreviewScript,
    frames: u64,
    sink: &mut dyn FrameSink,
) -> DotfieldResult<PreviewStats> {
    let size = surface.size();
    sink.begin(SinkConfig {
        width: size.width,
        height: size.height,
    })?;

    let mut stats = PreviewStats::default();
    for idx in 0..frames {
        for action in script.actions_at(idx) {
            apply_action(gate, action)?;
        }

        if gate.scheduler_mut().fire().is_none() {
            stats.suspended += 1;
            continue;
        }
        match gate.on_frame(surface)? {
            FrameStatus::Rendered => {
                let frame = surface.readback()?;
                sink.push_frame(idx, &frame)?;
                stats.rendered += 1;
            }
            FrameStatus::Skipped => stats.skipped += 1,
            FrameStatus::Ignored => stats.suspended += 1,
        }
    }

    sink.end()?;
    tracing::debug!(?stats, "preview finished");
    Ok(stats)
}

fn apply_action(
    gate: &mut VisibilityGate<ManualScheduler>,
    action: ScriptAction,
) -> DotfieldResult<()> {
    match action {
        ScriptAction::Pointer(ev) => {
            if let Some(animator) = gate.animator_mut() {
                animator.handle_pointer(ev);
            }
        }
        ScriptAction::Hide => {
            gate.hide();
        }
        ScriptAction::Show => {
            gate.show(|| {
                Err(DotfieldError::validation(
                    "preview gate must be primed with an animator before it is shown",
                ))
            })?;
        }
        ScriptAction::Resize(size) => {
            if let Some(animator) = gate.animator_mut() {
                animator.resize(size)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/preview.rs"]
mod tests;
