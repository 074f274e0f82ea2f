//! dotfield is a decorative, pointer-reactive dot-grid background animation.
//!
//! A grid of short line segments twinkles on its own and swings toward the
//! pointer when it hovers the drawing surface. The crate keeps the effect
//! independent of where it is drawn:
//!
//! 1. **Field**: [`Dot`]s laid out by a [`Grid`], each with an eased
//!    magnitude/angle and a triangle-wave alpha oscillator.
//! 2. **Input**: [`InteractionTracker`] turns pointer/touch events into
//!    surface-relative state.
//! 3. **Frame**: [`Animator::tick`] retargets, eases and redraws onto any
//!    [`Surface`].
//! 4. **Lifecycle**: [`VisibilityGate`] suspends and resumes the frame loop
//!    through a [`FrameScheduler`].
//!
//! Surfaces shipped here: [`CpuSurface`] (`vello_cpu`, headless previews),
//! [`RecordingSurface`] (tests), and the browser canvas binding in `web`
//! (`wasm32` with the `web` feature).
//!
//! Every instance owns its state; there is no global or static mutable state,
//! so any number of surfaces can animate side by side.
#![cfg_attr(
    not(all(target_arch = "wasm32", feature = "web")),
    forbid(unsafe_code)
)]
#![deny(missing_docs)]

mod animate;
mod config;
mod encode;
mod field;
mod foundation;
mod interact;
mod lifecycle;
mod preview;
mod render;

/// Browser binding: `<canvas data-dots-bg>` discovery and the canvas surface.
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub mod web;

pub use animate::animator::{Animator, HostEnv};
pub use animate::fade::CanvasAlpha;
pub use config::options::DotFieldOptions;
pub use config::theme::{THEME_ATTRIBUTE, Theme, VARIANT_ATTRIBUTE, Variant};
pub use encode::png::{PngSequenceSink, write_png};
pub use encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use field::dot::{
    AlphaOscillator, Dot, DotStyle, EASE_FACTOR, MIN_MAGNITUDE, OscillatorParams,
};
pub use field::grid::{Grid, MAX_DOTS};
pub use foundation::core::{Affine, Line, Point, Rgba8, SurfaceSize, Vec2};
pub use foundation::error::{DotfieldError, DotfieldResult};
pub use interact::pointer::{
    InteractionTracker, MOBILE_BREAKPOINT, PointerEvent, PointerOutcome, PointerState,
    is_mobile_viewport, relative_to,
};
pub use lifecycle::gate::{FrameStatus, Lifecycle, Transition, VisibilityGate};
pub use lifecycle::scheduler::{FrameHandle, FrameScheduler, ManualScheduler};
pub use preview::{PreviewScript, PreviewStats, ScriptAction, run_preview};
pub use render::cpu::{CpuSurface, CpuSurfaceOpts};
pub use render::frame::FrameRGBA;
pub use render::record::{DrawCall, RecordingSurface};
pub use render::surface::{StrokeStyle, Surface};
