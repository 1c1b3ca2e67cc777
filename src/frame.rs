use osmo_core::time::FrameCallback;
use osmo_core::{FrameHandle, FrameScheduler};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// `FrameScheduler` backed by `requestAnimationFrame`.
///
/// Each registration is a one-shot JS closure that frees itself when it
/// runs. A cancelled registration never runs, so its closure stays
/// allocated; only teardown cancels.
pub struct RafScheduler {
    window: web::Window,
}

impl RafScheduler {
    pub fn new(window: web::Window) -> Self {
        Self { window }
    }
}

impl FrameScheduler for RafScheduler {
    fn register(&self, callback: FrameCallback) -> Option<FrameHandle> {
        let js = Closure::once_into_js(move |timestamp_ms: f64| callback(timestamp_ms));
        match self.window.request_animation_frame(js.unchecked_ref()) {
            Ok(id) => Some(FrameHandle(id)),
            Err(e) => {
                log::error!("[frame] requestAnimationFrame failed: {:?}", e);
                None
            }
        }
    }

    fn cancel(&self, handle: FrameHandle) {
        if let Err(e) = self.window.cancel_animation_frame(handle.0) {
            log::error!("[frame] cancelAnimationFrame failed: {:?}", e);
        }
    }
}
