use std::io;

use js_sys::Reflect;
use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use wasm_bindgen::{JsCast, JsValue};

/// `console` method a record at `level` is written with.
pub fn console_method(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "error",
        Level::WARN => "warn",
        Level::INFO => "info",
        _ => "debug",
    }
}

/// Buffers one formatted record and hands it to the console when dropped.
#[derive(Debug)]
pub struct ConsoleWriter {
    method: &'static str,
    buf: Vec<u8>,
}

impl ConsoleWriter {
    /// Writer for the given `console` method (`"warn"`, `"error"`, ...).
    pub fn new(method: &'static str) -> Self {
        Self {
            method,
            buf: Vec::new(),
        }
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        let line = String::from_utf8_lossy(&self.buf);
        console_call(self.method, line.trim_end());
    }
}

/// [`MakeWriter`] that routes each record to the console method for its level.
#[derive(Clone, Copy, Debug, Default)]
pub struct MakeConsoleWriter;

impl<'a> MakeWriter<'a> for MakeConsoleWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new("log")
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(console_method(meta.level()))
    }
}

/// Install a global subscriber writing records up to `max_level` to the
/// browser console.
///
/// Returns `false` when a global subscriber was already set.
pub fn init_console_tracing(max_level: Level) -> bool {
    tracing_subscriber::fmt()
        .with_writer(MakeConsoleWriter)
        .with_max_level(max_level)
        .without_time()
        .with_ansi(false)
        .try_init()
        .is_ok()
}

// Looked up through `Reflect` so a host without a console (or without the
// method) is silently skipped.
pub(crate) fn console_call(method: &str, msg: &str) {
    let global = js_sys::global();
    if let Ok(console) = Reflect::get(&global, &"console".into())
        && let Ok(f) = Reflect::get(&console, &method.into())
        && let Ok(f) = f.dyn_into::<js_sys::Function>()
    {
        let _ = f.call1(&console, &JsValue::from_str(msg));
    }
}
