#![cfg(target_arch = "wasm32")]
use crate::constants::{OVERLAY_ANCHOR_ID, SURFACE_ANCHOR_ID};
use crate::core::{CapabilityProfile, ScrollSignal};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

mod constants;
mod core;
mod dom;
mod error;
mod events;
mod frame;
mod overlay;
mod render;

use frame::RenderSurface;

thread_local! {
    static ACTIVE: RefCell<Option<Rc<RefCell<RenderSurface>>>> = const { RefCell::new(None) };
}

fn with_active(f: impl FnOnce(&mut RenderSurface)) {
    ACTIVE.with(|slot| {
        if let Some(surface) = slot.borrow().as_ref() {
            f(&mut surface.borrow_mut());
        }
    });
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("[init] folio-web starting");

    static STARTED: AtomicBool = AtomicBool::new(false);
    if !STARTED.swap(true, Ordering::SeqCst) {
        spawn_local(async move {
            if let Err(e) = init().await {
                log::error!("[init] {:#}", e);
            }
        });
    }
    Ok(())
}

/// Stop the animation loop and release the GPU surface.
#[wasm_bindgen]
pub fn teardown() {
    ACTIVE.with(|slot| {
        if let Some(surface) = slot.borrow_mut().take() {
            surface.borrow_mut().teardown();
        }
    });
}

#[wasm_bindgen(js_name = setRotationSpeed)]
pub fn set_rotation_speed(speed: f32) {
    with_active(|s| s.set_rotation_speed(speed));
}

#[wasm_bindgen(js_name = setDistortion)]
pub fn set_distortion(distortion: f32) {
    with_active(|s| s.set_distortion(distortion));
}

async fn init() -> anyhow::Result<()> {
    let (window, document) = dom::window_document()?;
    let surface_anchor = dom::require_element(&document, SURFACE_ANCHOR_ID)?;
    let overlay_anchor = dom::require_element(&document, OVERLAY_ANCHOR_ID)?;

    let canvas = dom::create_canvas(&document, &surface_anchor)?;
    dom::sync_canvas_backing_size(&canvas);

    let viewport = dom::viewport(&window);
    let profile = CapabilityProfile::detect(viewport.width as f64, &dom::user_agent(&window));
    log::info!(
        "[init] profile={} points={} overlay={} scroll_throttle={}ms",
        profile.name(),
        profile.point_count(),
        profile.overlay_count(),
        profile.scroll_throttle_ms()
    );

    let mut rng = rand::thread_rng();
    let mut surface = RenderSurface::init(canvas.clone(), viewport, profile, &mut rng).await?;
    surface.attach_overlay(&document, overlay_anchor)?;
    surface.register_frame_callback(|tick, scene| {
        scene.centerpiece.update(tick.elapsed, tick.scroll_amount);
        scene.particles.update(tick.elapsed);
    });
    let surface = Rc::new(RefCell::new(surface));

    let signal = Rc::new(RefCell::new(ScrollSignal::new(profile)));
    {
        let surface = Rc::downgrade(&surface);
        signal.borrow_mut().subscribe(move |state| {
            let Some(surface) = surface.upgrade() else {
                return;
            };
            let mut s = surface.borrow_mut();
            s.update_scroll_amount(state.progress);
            s.scene_mut().camera.ease_toward_scroll(state.progress);
        });
    }
    // pick up a restored scroll position before the first frame
    signal
        .borrow_mut()
        .prime(dom::scroll_y(&window), dom::scroll_extent(&window, &document));

    events::wire_scroll(&window, signal);
    events::wire_resize(&window, canvas, Rc::downgrade(&surface));

    frame::start_loop(&surface);
    ACTIVE.with(|slot| *slot.borrow_mut() = Some(surface));
    log::info!("[init] running");
    Ok(())
}
