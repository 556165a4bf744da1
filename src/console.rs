//! Browser console logging.
//!
//! On wasm32 messages go to `console.log` / `console.warn` with a
//! `[kids-bank]` prefix. Native builds (unit tests) drop them.

#[cfg(target_arch = "wasm32")]
const PREFIX: &str = "[kids-bank]";

/// Informational message (saves, migrations, successful claims).
#[cfg(target_arch = "wasm32")]
pub fn log(msg: &str) {
    web_sys::console::log_1(&format!("{PREFIX} {msg}").into());
}

/// Something went wrong but the app keeps running.
#[cfg(target_arch = "wasm32")]
pub fn warn(msg: &str) {
    web_sys::console::warn_1(&format!("{PREFIX} {msg}").into());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn log(_msg: &str) {}

#[cfg(not(target_arch = "wasm32"))]
pub fn warn(_msg: &str) {}
