use crate::constants::{CONTEXT_2D, REDUCED_MOTION_QUERY};
use osmo_core::Viewport;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn js_err(e: wasm_bindgen::JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

/// `true` when the user asked the OS for reduced motion. Browsers without
/// `matchMedia` report `false`.
pub fn prefers_reduced_motion() -> bool {
    web::window()
        .and_then(|w| w.match_media(REDUCED_MOTION_QUERY).ok().flatten())
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

/// `innerWidth × innerHeight` in CSS pixels; zero when unavailable.
pub fn viewport_size() -> Viewport {
    let Some(w) = web::window() else {
        return Viewport::new(0.0, 0.0);
    };
    let dim = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
    };
    Viewport::new(dim(w.inner_width()), dim(w.inner_height()))
}

/// Create a canvas, style it to fill its parent and append it to `container`.
pub fn append_canvas(
    document: &web::Document,
    container: &web::Element,
    style: &str,
) -> anyhow::Result<web::HtmlCanvasElement> {
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(js_err)?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("created element is not a canvas: {:?}", e))?;
    canvas.set_attribute("style", style).map_err(js_err)?;
    container.append_child(&canvas).map_err(js_err)?;
    Ok(canvas)
}

pub fn context_2d(canvas: &web::HtmlCanvasElement) -> anyhow::Result<web::CanvasRenderingContext2d> {
    canvas
        .get_context(CONTEXT_2D)
        .map_err(js_err)?
        .ok_or_else(|| anyhow::anyhow!("canvas has no 2d context"))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|e| anyhow::anyhow!("unexpected context type: {:?}", e))
}
