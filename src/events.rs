use crate::core::ScrollSignal;
use crate::dom;
use crate::frame::RenderSurface;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn request_gate_frame(window: &web::Window, slot: &FrameSlot) {
    if let Some(cb) = slot.borrow().as_ref() {
        if window
            .request_animation_frame(cb.as_ref().unchecked_ref())
            .is_err()
        {
            log::warn!("[scroll] requestAnimationFrame failed");
        }
    }
}

/// Passive window `scroll` listener feeding `signal`; dispatch itself runs
/// on animation frames through the signal's throttle.
pub fn wire_scroll(window: &web::Window, signal: Rc<RefCell<ScrollSignal>>) {
    let gate: FrameSlot = Rc::new(RefCell::new(None));
    {
        let gate_inner = gate.clone();
        let signal = signal.clone();
        *gate.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            let Some(w) = web::window() else {
                return;
            };
            let again = signal.borrow_mut().on_frame(dom::now_ms(&w));
            if again {
                request_gate_frame(&w, &gate_inner);
            }
        }) as Box<dyn FnMut()>));
    }

    let on_scroll = Closure::wrap(Box::new(move || {
        let Some(w) = web::window() else {
            return;
        };
        let Some(d) = w.document() else {
            return;
        };
        let y = dom::scroll_y(&w);
        let extent = dom::scroll_extent(&w, &d);
        if signal.borrow_mut().on_scroll(y, extent, dom::now_ms(&w)) {
            request_gate_frame(&w, &gate);
        }
    }) as Box<dyn FnMut()>);

    let opts = web::AddEventListenerOptions::new();
    opts.set_passive(true);
    if window
        .add_event_listener_with_callback_and_add_event_listener_options(
            "scroll",
            on_scroll.as_ref().unchecked_ref(),
            &opts,
        )
        .is_err()
    {
        log::warn!("[scroll] could not attach scroll listener");
    }
    on_scroll.forget();
}

/// Keep the canvas backing store, the camera and the overlay in step with
/// the window size.
pub fn wire_resize(
    window: &web::Window,
    canvas: web::HtmlCanvasElement,
    surface: Weak<RefCell<RenderSurface>>,
) {
    let resize_closure = Closure::wrap(Box::new(move || {
        let (Some(w), Some(surface)) = (web::window(), surface.upgrade()) else {
            return;
        };
        dom::sync_canvas_backing_size(&canvas);
        surface.borrow_mut().resize(dom::viewport(&w));
    }) as Box<dyn FnMut()>);
    _ = window.add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    resize_closure.forget();
}
