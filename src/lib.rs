#![cfg(target_arch = "wasm32")]
use osmo_core::{
    DrawingSurface, MotionConfig, MotionPolicy, OrbConfig, OrbScene, SceneRunner, StarfieldConfig,
    StarfieldScene,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod render;

use constants::{COSMIC_BG_CANVAS_STYLE, COSMIC_BG_CONTAINER_ID, PARTICLE_ORB_CANVAS_ID};
use events::Listeners;
use frame::RafScheduler;
use render::Canvas2dSurface;

thread_local! {
    // Scenes mounted by the start hook live for the page's lifetime.
    static AUTO_MOUNTS: RefCell<Vec<SceneMount>> = RefCell::new(Vec::new());
}

/// Handle to one mounted scene. Tearing down (or dropping) it cancels the
/// pending frame, detaches listeners and discards the particle population.
#[wasm_bindgen]
pub struct SceneMount {
    listeners: Listeners,
    stop: Option<Box<dyn FnOnce()>>,
}

impl SceneMount {
    fn new(listeners: Listeners, stop: impl FnOnce() + 'static) -> Self {
        Self {
            listeners,
            stop: Some(Box::new(stop)),
        }
    }
}

#[wasm_bindgen]
impl SceneMount {
    pub fn teardown(&mut self) {
        self.listeners.remove_all();
        if let Some(stop) = self.stop.take() {
            stop();
        }
    }
}

impl Drop for SceneMount {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn random_seed() -> u64 {
    (js_sys::Math::random() * u64::MAX as f64) as u64
}

fn scheduler(window: web::Window) -> Rc<RafScheduler> {
    Rc::new(RafScheduler::new(window))
}

fn try_mount_cosmic_background(container_id: &str) -> anyhow::Result<Option<SceneMount>> {
    let Some(window) = web::window() else {
        return Ok(None);
    };
    let Some(document) = window.document() else {
        return Ok(None);
    };
    let Some(container) = document.get_element_by_id(container_id) else {
        log::debug!("[mount] #{} not found; cosmic background skipped", container_id);
        return Ok(None);
    };

    let canvas = dom::append_canvas(&document, &container, COSMIC_BG_CANVAS_STYLE)?;
    let ctx = dom::context_2d(&canvas)?;
    let policy = MotionPolicy::from_preference(dom::prefers_reduced_motion());
    let scene = StarfieldScene::new(
        StarfieldConfig::default(),
        MotionConfig::default(),
        dom::viewport_size(),
        policy,
        random_seed(),
    )?;
    let runner = SceneRunner::new(
        scene,
        Canvas2dSurface::new(canvas.clone(), ctx),
        scheduler(window.clone()),
    );

    let mut listeners = Listeners::default();
    events::wire_pointer(&mut listeners, &container, &runner)?;
    events::wire_window_resize(&mut listeners, &window, &runner)?;
    runner.start(instant::now());

    Ok(Some(SceneMount::new(listeners, move || {
        runner.teardown();
        canvas.remove();
    })))
}

fn try_mount_particle_orb(canvas_id: &str) -> anyhow::Result<Option<SceneMount>> {
    let Some(window) = web::window() else {
        return Ok(None);
    };
    let Some(document) = window.document() else {
        return Ok(None);
    };
    let Some(el) = document.get_element_by_id(canvas_id) else {
        log::debug!("[mount] #{} not found; particle orb skipped", canvas_id);
        return Ok(None);
    };
    let Ok(canvas) = el.dyn_into::<web::HtmlCanvasElement>() else {
        log::debug!("[mount] #{} is not a canvas; particle orb skipped", canvas_id);
        return Ok(None);
    };

    let ctx = dom::context_2d(&canvas)?;
    let policy = MotionPolicy::from_preference(dom::prefers_reduced_motion());
    let scene = OrbScene::new(
        OrbConfig::default(),
        MotionConfig::default(),
        dom::viewport_size(),
        policy,
        random_seed(),
    )?;
    let runner = SceneRunner::new(
        scene,
        Canvas2dSurface::new(canvas.clone(), ctx),
        scheduler(window.clone()),
    );

    let mut listeners = Listeners::default();
    events::wire_pointer(&mut listeners, &canvas, &runner)?;
    events::wire_window_resize(&mut listeners, &window, &runner)?;
    runner.start(instant::now());

    Ok(Some(SceneMount::new(listeners, move || {
        runner.teardown();
        runner.with_surface(|s| s.clear());
    })))
}

/// Mount the starfield into `container_id`. Returns `undefined` when the
/// element is missing or the browser refuses a canvas; never throws.
#[wasm_bindgen]
pub fn mount_cosmic_background(container_id: &str) -> Option<SceneMount> {
    try_mount_cosmic_background(container_id).unwrap_or_else(|e| {
        log::error!("[mount] cosmic background failed: {:?}", e);
        None
    })
}

/// Mount the orb onto the existing canvas `canvas_id`. Same failure
/// behaviour as `mount_cosmic_background`.
#[wasm_bindgen]
pub fn mount_particle_orb(canvas_id: &str) -> Option<SceneMount> {
    try_mount_particle_orb(canvas_id).unwrap_or_else(|e| {
        log::error!("[mount] particle orb failed: {:?}", e);
        None
    })
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("osmo-web starting");

    let mounts: Vec<SceneMount> = [
        mount_cosmic_background(COSMIC_BG_CONTAINER_ID),
        mount_particle_orb(PARTICLE_ORB_CANVAS_ID),
    ]
    .into_iter()
    .flatten()
    .collect();
    AUTO_MOUNTS.with(|m| m.borrow_mut().extend(mounts));
    Ok(())
}
