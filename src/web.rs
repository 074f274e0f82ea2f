use wasm_bindgen::{JsCast, JsValue};

use crate::foundation::error::DotfieldError;

mod canvas;
mod console;
mod mount;

pub use canvas::CanvasSurface;
pub use console::{ConsoleWriter, MakeConsoleWriter, console_method, init_console_tracing};
pub use mount::{RafScheduler, mount_all};

pub(crate) fn js_error(err: JsValue) -> DotfieldError {
    let msg = err
        .as_string()
        .or_else(|| {
            err.dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{err:?}"));
    DotfieldError::platform(msg)
}

fn install_panic_hook() {
    use std::sync::Once;
    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            console::console_call("error", &info.to_string());
        }));
    });
}
