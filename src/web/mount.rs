use std::cell::RefCell;
use std::rc::{Rc, Weak};

use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;
use web_sys::{
    Element, EventTarget, HtmlCanvasElement, IntersectionObserver, IntersectionObserverEntry,
    MouseEvent, ResizeObserver, ResizeObserverEntry, TouchEvent, Window,
};

use crate::animate::animator::{Animator, HostEnv};
use crate::config::options::DotFieldOptions;
use crate::config::theme::{THEME_ATTRIBUTE, Theme, VARIANT_ATTRIBUTE, Variant};
use crate::foundation::core::Point;
use crate::foundation::error::{DotfieldError, DotfieldResult};
use crate::interact::pointer::PointerEvent;
use crate::lifecycle::gate::{Transition, VisibilityGate};
use crate::lifecycle::scheduler::FrameScheduler;
use crate::render::surface::Surface;
use crate::web::canvas::CanvasSurface;
use crate::web::{init_console_tracing, install_panic_hook, js_error};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// [`FrameScheduler`] backed by `requestAnimationFrame`.
pub struct RafScheduler {
    window: Window,
    callback: FrameCallback,
}

impl RafScheduler {
    fn new(window: Window) -> Self {
        Self {
            window,
            callback: Rc::new(RefCell::new(None)),
        }
    }
}

impl std::fmt::Debug for RafScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RafScheduler")
            .field("installed", &self.callback.borrow().is_some())
            .finish()
    }
}

impl FrameScheduler for RafScheduler {
    type Handle = i32;

    fn request_frame(&mut self) -> DotfieldResult<i32> {
        let callback = self.callback.borrow();
        let callback = callback
            .as_ref()
            .ok_or_else(|| DotfieldError::platform("frame callback not installed"))?;
        self.window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .map_err(js_error)
    }

    fn cancel_frame(&mut self, handle: i32) {
        if let Err(err) = self.window.cancel_animation_frame(handle) {
            tracing::warn!(err = %js_error(err), "cancelAnimationFrame failed");
        }
    }
}

struct Instance {
    window: Window,
    gate: VisibilityGate<RafScheduler>,
    surface: CanvasSurface,
    opts: DotFieldOptions,
}

type Shared = Rc<RefCell<Instance>>;

/// Attach a dot field to every `<canvas data-dots-bg>` in the document.
///
/// Call once after the page has loaded. Each canvas starts animating the
/// first time it intersects the viewport and pauses whenever it leaves it.
/// Warnings are written to the browser console unless the embedder already
/// installed a tracing subscriber. Returns the number of canvases mounted.
#[wasm_bindgen(js_name = mountAll)]
pub fn mount_all() -> Result<u32, JsValue> {
    install_panic_hook();
    init_console_tracing(tracing::Level::WARN);
    mount_all_inner().map_err(|err| JsValue::from_str(&err.to_string()))
}

#[tracing::instrument]
fn mount_all_inner() -> DotfieldResult<u32> {
    let window = web_sys::window().ok_or_else(|| DotfieldError::platform("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| DotfieldError::platform("no document"))?;
    let nodes = document
        .query_selector_all(&format!("canvas[{THEME_ATTRIBUTE}]"))
        .map_err(js_error)?;

    let mut mounted = 0;
    for idx in 0..nodes.length() {
        let Some(canvas) = nodes
            .item(idx)
            .and_then(|node| node.dyn_into::<HtmlCanvasElement>().ok())
        else {
            continue;
        };
        match mount(&window, canvas) {
            Ok(()) => mounted += 1,
            Err(err) => tracing::warn!(%err, idx, "skipping dot field canvas"),
        }
    }
    tracing::debug!(mounted, "dot fields mounted");
    Ok(mounted)
}

fn mount(window: &Window, canvas: HtmlCanvasElement) -> DotfieldResult<()> {
    let Some(theme) =
        Theme::from_optional_attribute(canvas.get_attribute(THEME_ATTRIBUTE).as_deref())
    else {
        return Err(DotfieldError::platform(format!(
            "canvas lost its {THEME_ATTRIBUTE} attribute"
        )));
    };
    let variant = Variant::from_attribute(canvas.get_attribute(VARIANT_ATTRIBUTE).as_deref());
    let surface = CanvasSurface::new(canvas.clone())?;

    let shared: Shared = Rc::new(RefCell::new(Instance {
        window: window.clone(),
        gate: VisibilityGate::new(RafScheduler::new(window.clone())),
        surface,
        opts: DotFieldOptions::preset(theme, variant),
    }));
    install_frame_callback(&shared);

    let on_intersect = {
        let shared = Rc::clone(&shared);
        Closure::<dyn FnMut(js_sys::Array)>::new(move |entries: js_sys::Array| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if let Err(err) = set_visible(&shared, entry.is_intersecting()) {
                    tracing::warn!(%err, "dot field visibility change failed");
                }
            }
        })
    };
    let observer =
        IntersectionObserver::new(on_intersect.as_ref().unchecked_ref()).map_err(js_error)?;
    observer.observe(&canvas);
    on_intersect.forget();
    Ok(())
}

// The frame callback holds the instance weakly: the instance owns it
// through its scheduler.
fn install_frame_callback(shared: &Shared) {
    let weak: Weak<RefCell<Instance>> = Rc::downgrade(shared);
    let callback = Closure::<dyn FnMut()>::new(move || {
        let Some(shared) = weak.upgrade() else {
            return;
        };
        let Ok(mut inst) = shared.try_borrow_mut() else {
            return;
        };
        let Instance { gate, surface, .. } = &mut *inst;
        if let Err(err) = gate.on_frame(surface) {
            tracing::warn!(%err, "dot field frame failed");
        }
    });
    let inst = shared.borrow();
    *inst.gate.scheduler().callback.borrow_mut() = Some(callback);
}

fn set_visible(shared: &Shared, visible: bool) -> DotfieldResult<()> {
    let transition = {
        let mut inst = shared.borrow_mut();
        let Instance {
            window,
            gate,
            surface,
            opts,
            ..
        } = &mut *inst;
        gate.set_visible(visible, || build_animator(window, surface, opts))?
    };
    if transition == Transition::Constructed {
        attach_observers(shared)?;
    }
    Ok(())
}

fn build_animator(
    window: &Window,
    surface: &mut CanvasSurface,
    opts: &DotFieldOptions,
) -> DotfieldResult<Animator> {
    let dpr = window.device_pixel_ratio();
    let viewport_width = window
        .inner_width()
        .map_err(js_error)?
        .as_f64()
        .unwrap_or_default();

    surface.fill_container()?;
    let size = match surface.canvas().parent_element() {
        Some(parent) => {
            let rect = parent.get_bounding_client_rect();
            surface.fit_css(rect.width(), rect.height(), dpr)?
        }
        None => surface.size(),
    };

    Animator::new(
        opts.clone(),
        HostEnv {
            size,
            device_pixel_ratio: dpr,
            viewport_width,
        },
        StdRng::from_entropy(),
    )
}

fn attach_observers(shared: &Shared) -> DotfieldResult<()> {
    let (canvas, interactive) = {
        let inst = shared.borrow();
        let interactive = inst.gate.animator().is_some_and(Animator::is_interactive);
        (inst.surface.canvas().clone(), interactive)
    };

    if let Some(parent) = canvas.parent_element() {
        observe_resize(shared, &parent)?;
    }
    if !interactive {
        return Ok(());
    }

    let target: &EventTarget = canvas.as_ref();
    listen::<MouseEvent>(target, "mouseenter", shared, |_, _| {
        Some(PointerEvent::Enter)
    })?;
    listen::<MouseEvent>(target, "mousemove", shared, |surface, e| {
        Some(PointerEvent::Move(
            surface.to_local(e.client_x(), e.client_y()),
        ))
    })?;
    listen::<MouseEvent>(target, "mouseleave", shared, |_, _| {
        Some(PointerEvent::Leave)
    })?;

    let document = canvas
        .owner_document()
        .ok_or_else(|| DotfieldError::platform("canvas is detached from a document"))?;
    let target: &EventTarget = document.as_ref();
    listen::<TouchEvent>(target, "touchstart", shared, |surface, e| {
        first_touch(surface, &e).map(PointerEvent::TouchStart)
    })?;
    listen::<TouchEvent>(target, "touchmove", shared, |surface, e| {
        first_touch(surface, &e).map(PointerEvent::TouchMove)
    })?;
    listen::<TouchEvent>(target, "touchend", shared, |_, _| {
        Some(PointerEvent::TouchEnd)
    })?;
    Ok(())
}

#[tracing::instrument(skip_all)]
fn observe_resize(shared: &Shared, parent: &Element) -> DotfieldResult<()> {
    let on_resize = {
        let shared = Rc::clone(shared);
        Closure::<dyn FnMut(js_sys::Array)>::new(move |entries: js_sys::Array| {
            let Ok(entry) = entries.get(0).dyn_into::<ResizeObserverEntry>() else {
                return;
            };
            let rect = entry.content_rect();
            let Ok(mut inst) = shared.try_borrow_mut() else {
                return;
            };
            let dpr = match inst.gate.animator() {
                Some(animator) => animator.device_pixel_ratio(),
                None => inst.window.device_pixel_ratio(),
            };
            let resized = inst
                .surface
                .fit_css(rect.width(), rect.height(), dpr)
                .and_then(|size| match inst.gate.animator_mut() {
                    Some(animator) => animator.resize(size),
                    None => Ok(()),
                });
            if let Err(err) = resized {
                tracing::warn!(%err, "dot field resize failed");
            }
        })
    };
    let observer = ResizeObserver::new(on_resize.as_ref().unchecked_ref()).map_err(js_error)?;
    observer.observe(parent);
    on_resize.forget();
    Ok(())
}

fn listen<E>(
    target: &EventTarget,
    kind: &str,
    shared: &Shared,
    map: fn(&CanvasSurface, E) -> Option<PointerEvent>,
) -> DotfieldResult<()>
where
    E: FromWasmAbi + 'static,
{
    let shared = Rc::clone(shared);
    let callback = Closure::<dyn FnMut(E)>::new(move |event: E| {
        let Ok(mut inst) = shared.try_borrow_mut() else {
            return;
        };
        let Some(event) = map(&inst.surface, event) else {
            return;
        };
        if let Some(animator) = inst.gate.animator_mut() {
            animator.handle_pointer(event);
        }
    });
    target
        .add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())
        .map_err(js_error)?;
    callback.forget();
    Ok(())
}

fn first_touch(surface: &CanvasSurface, event: &TouchEvent) -> Option<Point> {
    event
        .target_touches()
        .get(0)
        .map(|touch| surface.to_local(touch.client_x(), touch.client_y()))
}
