use crate::constants::OVERLAY_PARTICLE_CLASS;
use crate::core::ScreenOverlay;
use crate::error::InitError;
use wasm_bindgen::JsCast;
use web_sys as web;

/// DOM mirror of the screen-space overlay: one absolutely positioned node
/// per particle inside the overlay container.
pub struct ParticleOverlay {
    container: web::HtmlElement,
    nodes: Vec<web::HtmlElement>,
}

impl ParticleOverlay {
    pub fn new(
        document: &web::Document,
        container: web::HtmlElement,
        overlay: &ScreenOverlay,
    ) -> Result<Self, InitError> {
        let mut nodes = Vec::with_capacity(overlay.particles().len());
        for p in overlay.particles() {
            let node = document
                .create_element("div")
                .map_err(|e| InitError::OverlayNode(format!("{:?}", e)))?
                .dyn_into::<web::HtmlElement>()
                .map_err(|_| InitError::OverlayNode("div is not an HTML element".into()))?;
            node.set_class_name(OVERLAY_PARTICLE_CLASS);
            let [r, g, b] = p.tint();
            let style = node.style();
            _ = style.set_property("position", "absolute");
            _ = style.set_property("pointer-events", "none");
            // pulse goes through `opacity`, so the colour itself stays opaque
            _ = style.set_property("background", &format!("rgb({}, {}, {})", r, g, b));
            _ = container.append_child(&node);
            nodes.push(node);
        }
        let out = Self { container, nodes };
        out.sync(overlay);
        log::info!("[particles] overlay nodes={}", out.nodes.len());
        Ok(out)
    }

    /// Write current positions and opacities to the DOM.
    pub fn sync(&self, overlay: &ScreenOverlay) {
        for (node, p) in self.nodes.iter().zip(overlay.particles()) {
            let style = node.style();
            _ = style.set_property("left", &format!("{:.2}px", p.x));
            _ = style.set_property("top", &format!("{:.2}px", p.y));
            _ = style.set_property("opacity", &format!("{:.3}", p.opacity));
        }
    }

    pub fn remove(&mut self) {
        for node in self.nodes.drain(..) {
            _ = self.container.remove_child(&node);
        }
    }
}
