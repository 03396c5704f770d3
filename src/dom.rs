use crate::constants::MAX_PIXEL_RATIO;
use crate::core::{ScrollExtent, Viewport};
use crate::error::InitError;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Result<(web::Window, web::Document), InitError> {
    let window = web::window().ok_or(InitError::NoWindow)?;
    let document = window.document().ok_or(InitError::NoDocument)?;
    Ok((window, document))
}

/// Resolve a required anchor element, failing with the id in the diagnostic.
pub fn require_element(
    document: &web::Document,
    id: &'static str,
) -> Result<web::HtmlElement, InitError> {
    document
        .get_element_by_id(id)
        .ok_or(InitError::MissingAnchor(id))?
        .dyn_into::<web::HtmlElement>()
        .map_err(|_| InitError::WrongElement {
            id,
            expected: "HTML element",
        })
}

/// Create the full-bleed render canvas inside `container`.
pub fn create_canvas(
    document: &web::Document,
    container: &web::HtmlElement,
) -> Result<web::HtmlCanvasElement, InitError> {
    let canvas = document
        .create_element("canvas")
        .map_err(|e| InitError::CanvasCreation(format!("{:?}", e)))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|_| InitError::CanvasCreation("element is not a canvas".into()))?;
    let style = canvas.style();
    _ = style.set_property("display", "block");
    _ = style.set_property("width", "100%");
    _ = style.set_property("height", "100%");
    container
        .append_child(&canvas)
        .map_err(|e| InitError::CanvasCreation(format!("{:?}", e)))?;
    Ok(canvas)
}

/// Window inner size in CSS pixels.
pub fn viewport(window: &web::Window) -> Viewport {
    let read = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
    };
    Viewport::new(read(window.inner_width()), read(window.inner_height()))
}

pub fn user_agent(window: &web::Window) -> String {
    window.navigator().user_agent().unwrap_or_default()
}

pub fn scroll_y(window: &web::Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

pub fn scroll_extent(window: &web::Window, document: &web::Document) -> ScrollExtent {
    let document_height = document
        .body()
        .map(|b| b.scroll_height() as f64)
        .unwrap_or(0.0);
    let viewport_height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    ScrollExtent::new(document_height, viewport_height)
}

/// Milliseconds from the page's monotonic clock, falling back to wall time.
pub fn now_ms(window: &web::Window) -> f64 {
    window
        .performance()
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Keep the canvas backing store at CSS size × device pixel ratio (capped).
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio().min(MAX_PIXEL_RATIO);
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}
