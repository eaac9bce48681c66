//! # smart-slides-client
//!
//! WASM client layer for the Smart Slides collaborative editor. It covers
//! three concerns: the one-shot slide-generation HTTP call, the WebSocket
//! chat/collaboration channel, and reconciliation of incremental edit
//! payloads received over that channel into the locally-held slide document.
//!
//! UI rendering is out of scope; consumers subscribe to the published
//! subjects (slides state, connection state, raw message log) and render
//! however they like. Browser I/O is gated behind the `browser` feature so
//! the state machine and reconciler compile and test natively.

pub mod edits;
pub mod error;
pub mod net;
pub mod session;
pub mod state;
pub mod store;

/// Install the console panic hook and console logger.
///
/// Safe to call more than once; later calls are no-ops.
#[cfg(feature = "browser")]
pub fn init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
}

/// Module entry point when loaded as a WASM bundle.
#[cfg(feature = "browser")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
fn start() {
    init();
}
