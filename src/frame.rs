use crate::core::{CapabilityProfile, FrameLoop, FrameTick, Scene, Viewport};
use crate::error::InitError;
use crate::overlay::ParticleOverlay;
use crate::render;
use instant::Instant;
use rand::Rng;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type TickSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Owns the scene, the GPU target it is drawn into and the frame loop.
pub struct RenderSurface {
    scene: Scene,
    frame_loop: FrameLoop<Scene>,
    gpu: Option<render::GpuState>,
    canvas: web::HtmlCanvasElement,
    overlay: Option<ParticleOverlay>,
    raf_id: Option<i32>,
    tick: Option<TickSlot>,
}

impl RenderSurface {
    pub async fn init<R: Rng + ?Sized>(
        canvas: web::HtmlCanvasElement,
        viewport: Viewport,
        profile: CapabilityProfile,
        rng: &mut R,
    ) -> Result<Self, InitError> {
        let scene = Scene::new(profile, viewport, rng);
        let gpu = render::GpuState::new(&canvas, &scene).await?;
        Ok(Self {
            scene,
            frame_loop: FrameLoop::new(),
            gpu: Some(gpu),
            canvas,
            overlay: None,
            raf_id: None,
            tick: None,
        })
    }

    /// Mirror the overlay particles into `container`.
    pub fn attach_overlay(
        &mut self,
        document: &web::Document,
        container: web::HtmlElement,
    ) -> Result<(), InitError> {
        let overlay = ParticleOverlay::new(document, container, self.scene.particles.overlay())?;
        self.overlay = Some(overlay);
        Ok(())
    }

    pub fn register_frame_callback(&mut self, callback: impl FnMut(FrameTick, &mut Scene) + 'static) {
        self.frame_loop.register_frame_callback(callback);
    }

    pub fn update_scroll_amount(&mut self, amount: f32) {
        self.frame_loop.update_scroll_amount(amount);
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn set_rotation_speed(&mut self, speed: f32) {
        self.scene.centerpiece.set_rotation_speed(speed);
    }

    pub fn set_distortion(&mut self, distortion: f32) {
        self.scene.centerpiece.set_distortion(distortion);
    }

    pub fn is_running(&self) -> bool {
        self.frame_loop.is_running()
    }

    /// Apply a new window size. The canvas backing store must already be synced.
    pub fn resize(&mut self, viewport: Viewport) {
        self.scene.camera.set_viewport(viewport);
        self.scene.particles.resize(viewport);
        if let Some(g) = self.gpu.as_mut() {
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
        }
        if let Some(o) = &self.overlay {
            o.sync(self.scene.particles.overlay());
        }
    }

    /// One animation frame: tick callbacks, draw, then move the overlay.
    /// The overlay only follows frames that reached the screen.
    pub fn frame(&mut self) {
        if self
            .frame_loop
            .step(Instant::now(), &mut self.scene)
            .is_none()
        {
            return;
        }
        let presented = match self.gpu.as_mut() {
            Some(g) => match g.render(&self.scene) {
                Ok(presented) => presented,
                Err(e) => {
                    log::error!("[surface] render error: {:?}", e);
                    false
                }
            },
            None => true,
        };
        if presented {
            if let Some(o) = &self.overlay {
                o.sync(self.scene.particles.overlay());
            }
        }
    }

    /// Stop the loop for good and free the GPU resources.
    pub fn teardown(&mut self) {
        self.frame_loop.stop();
        if let (Some(id), Some(w)) = (self.raf_id.take(), web::window()) {
            _ = w.cancel_animation_frame(id);
        }
        if let Some(g) = self.gpu.take() {
            g.release();
        }
        if let Some(mut o) = self.overlay.take() {
            o.remove();
        }
        // drops the RAF closure; nothing else keeps it alive
        self.tick = None;
        log::info!(
            "[surface] torn down after {} frames",
            self.frame_loop.frame_count()
        );
    }
}

/// Drive `surface` from requestAnimationFrame until it stops running.
///
/// The closure holds the surface weakly and the surface owns the closure, so
/// dropping the last strong handle after `teardown` frees both.
pub fn start_loop(surface: &Rc<RefCell<RenderSurface>>) {
    let tick: TickSlot = Rc::new(RefCell::new(None));
    let tick_weak: Weak<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::downgrade(&tick);
    let surface_weak = Rc::downgrade(surface);
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let (Some(surface), Some(tick)) = (surface_weak.upgrade(), tick_weak.upgrade()) else {
            return;
        };
        let mut s = surface.borrow_mut();
        s.raf_id = None;
        s.frame();
        if !s.is_running() {
            return;
        }
        s.raf_id = request_frame(&tick);
    }) as Box<dyn FnMut()>));
    let mut s = surface.borrow_mut();
    s.raf_id = request_frame(&tick);
    s.tick = Some(tick);
}

fn request_frame(tick: &TickSlot) -> Option<i32> {
    let w = web::window()?;
    let slot = tick.borrow();
    let closure = slot.as_ref()?;
    w.request_animation_frame(closure.as_ref().unchecked_ref()).ok()
}
