//! Browser bindings: the JS-facing widget classes and the
//! `requestAnimationFrame` loop that drives a `ParticleField`.
//!
//! Usage from JS:
//!
//! ```js
//! const theme = new MoodTheme();
//! const viz = new MoodVisualizer(canvas, "happy", theme);
//! const bg = new MoodBackground(containerDiv, "happy", theme);
//! viz.set_mood(detectedEmotion);
//! bg.set_mood(detectedEmotion);
//! viz.destroy();
//! bg.destroy();
//! ```

use crate::background::BackgroundLayer;
use crate::config::FieldConfig;
use crate::field::ParticleField;
use crate::mood::Mood;
use crate::palette::{DescriptionTable, PaletteTable};
use crate::rng::host_rng;
use crate::surface::CanvasSurface;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, HtmlElement, window};

type SharedField = Rc<RefCell<ParticleField<CanvasSurface>>>;
type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Mood lookup tables, built once and shared by every visualizer created
/// with this theme.
#[wasm_bindgen]
pub struct MoodTheme {
    palettes: Rc<PaletteTable>,
    descriptions: Rc<DescriptionTable>,
}

impl Default for MoodTheme {
    fn default() -> Self {
        Self {
            palettes: Rc::new(PaletteTable::standard()),
            descriptions: Rc::new(DescriptionTable::standard()),
        }
    }
}

#[wasm_bindgen]
impl MoodTheme {
    #[wasm_bindgen(constructor)]
    pub fn new() -> MoodTheme {
        MoodTheme::default()
    }

    /// Heading text, e.g. "Happy".
    pub fn title(&self, mood: Option<String>) -> String {
        Mood::parse(mood.as_deref()).title()
    }

    pub fn description(&self, mood: Option<String>) -> String {
        self.descriptions.resolve(mood.as_deref()).to_string()
    }

    /// Canonical lowercase name the mood resolves to.
    pub fn resolve(&self, mood: Option<String>) -> String {
        resolve_mood(mood)
    }

    /// Palette speed factor for the mood.
    pub fn speed(&self, mood: Option<String>) -> f64 {
        self.palettes.resolve(mood.as_deref()).speed
    }

    /// CSS colors of the mood's particle palette.
    pub fn colors(&self, mood: Option<String>) -> Vec<String> {
        self.palettes
            .resolve(mood.as_deref())
            .colors
            .iter()
            .map(|c| c.to_string())
            .collect()
    }
}

/// Canonical lowercase mood name; unknown input yields "neutral".
#[wasm_bindgen]
pub fn resolve_mood(mood: Option<String>) -> String {
    Mood::parse(mood.as_deref()).as_str().to_string()
}

#[wasm_bindgen]
pub fn mood_title(mood: Option<String>) -> String {
    Mood::parse(mood.as_deref()).title()
}

/// Pending `requestAnimationFrame` callback for one field.
struct FrameLoop {
    callback: FrameCallback,
    handle: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    fn start(field: SharedField) -> FrameLoop {
        let f: FrameCallback = Rc::new(RefCell::new(None));
        let g = f.clone();
        let handle: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let h = handle.clone();
        *g.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
            h.set(None);
            let running = {
                let mut field = field.borrow_mut();
                if field.is_seed_pending() {
                    // Container may have been laid out since the last frame.
                    let (cw, ch) = field.surface().client_size();
                    field.resize(cw, ch);
                }
                field.tick();
                field.is_running()
            };
            if !running {
                return;
            }
            if let Some(cb) = f.borrow().as_ref() {
                h.set(request_frame(cb));
            }
        }) as Box<dyn FnMut(f64)>));
        if let Some(cb) = g.borrow().as_ref() {
            handle.set(request_frame(cb));
        }
        FrameLoop { callback: g, handle }
    }

    fn stop(&self) {
        if let Some(id) = self.handle.take() {
            if let Some(w) = window() {
                let _ = w.cancel_animation_frame(id);
            }
        }
        // Dropping the closure breaks its self-reference.
        self.callback.borrow_mut().take();
    }
}

fn request_frame(cb: &Closure<dyn FnMut(f64)>) -> Option<i32> {
    window().and_then(|w| w.request_animation_frame(cb.as_ref().unchecked_ref()).ok())
}

/// Window `resize` subscription that keeps the canvas at its client size.
struct ResizeListener {
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

impl ResizeListener {
    fn install(field: SharedField) -> Result<ResizeListener, JsValue> {
        let win = window().ok_or(crate::FieldError::NoWindow)?;
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            let mut field = field.borrow_mut();
            let (w, h) = field.surface().client_size();
            field.resize(w, h);
        }) as Box<dyn FnMut(_)>);
        win.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        Ok(ResizeListener { closure })
    }

    fn remove(self) {
        if let Some(win) = window() {
            let _ = win
                .remove_event_listener_with_callback("resize", self.closure.as_ref().unchecked_ref());
        }
    }
}

/// Embeddable mood visualizer bound to one canvas element.
#[wasm_bindgen]
pub struct MoodVisualizer {
    field: SharedField,
    frames: Option<FrameLoop>,
    resize: Option<ResizeListener>,
}

#[wasm_bindgen]
impl MoodVisualizer {
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas: HtmlCanvasElement,
        mood: Option<String>,
        theme: &MoodTheme,
    ) -> Result<MoodVisualizer, JsValue> {
        Self::mount(canvas, mood.as_deref(), theme, FieldConfig::default())
    }

    /// Like `new`, with a JSON `FieldConfig` (missing keys use defaults).
    #[cfg(feature = "serde_json")]
    pub fn with_config(
        canvas: HtmlCanvasElement,
        mood: Option<String>,
        theme: &MoodTheme,
        config_json: &str,
    ) -> Result<MoodVisualizer, JsValue> {
        let config = FieldConfig::from_json(config_json)?;
        Self::mount(canvas, mood.as_deref(), theme, config)
    }

    /// Feed the latest detected mood; reseeds when it resolves differently.
    pub fn set_mood(&self, mood: Option<String>) {
        self.field.borrow_mut().set_mood(mood.as_deref());
    }

    /// Resolved mood currently driving the field.
    pub fn mood(&self) -> String {
        self.field.borrow().mood().as_str().to_string()
    }

    pub fn particle_count(&self) -> usize {
        self.field.borrow().particles().len()
    }

    pub fn is_running(&self) -> bool {
        self.field.borrow().is_running()
    }

    /// Stop animating, unsubscribe from resize and clear the canvas.
    /// Safe to call more than once.
    pub fn destroy(&mut self) {
        if let Some(frames) = self.frames.take() {
            frames.stop();
        }
        if let Some(resize) = self.resize.take() {
            resize.remove();
        }
        self.field.borrow_mut().teardown();
    }
}

impl MoodVisualizer {
    fn mount(
        canvas: HtmlCanvasElement,
        mood: Option<&str>,
        theme: &MoodTheme,
        config: FieldConfig,
    ) -> Result<MoodVisualizer, JsValue> {
        let config = config.validated()?;
        let mut surface = CanvasSurface::new(canvas)?;
        let (w, h) = surface.client_size();
        crate::surface::Surface::resize(&mut surface, w, h);

        let mut field = ParticleField::new(surface, theme.palettes.clone(), config, host_rng());
        field.initialize(mood);
        let field: SharedField = Rc::new(RefCell::new(field));

        let resize = ResizeListener::install(field.clone())?;
        let frames = FrameLoop::start(field.clone());
        Ok(MoodVisualizer {
            field,
            frames: Some(frames),
            resize: Some(resize),
        })
    }
}

impl Drop for MoodVisualizer {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// CSS-animated dot layer filling a container element. Expects the page to
/// style `.particle` (absolute position, rounded, keyframe animation).
#[wasm_bindgen]
pub struct MoodBackground {
    container: HtmlElement,
    layer: BackgroundLayer,
}

#[wasm_bindgen]
impl MoodBackground {
    #[wasm_bindgen(constructor)]
    pub fn new(
        container: HtmlElement,
        mood: Option<String>,
        theme: &MoodTheme,
    ) -> Result<MoodBackground, JsValue> {
        let mut layer = BackgroundLayer::new(theme.palettes.clone(), host_rng());
        layer.initialize(mood.as_deref());
        let bg = MoodBackground { container, layer };
        bg.render()?;
        Ok(bg)
    }

    /// Reseeds the dots when the mood resolves differently.
    pub fn set_mood(&mut self, mood: Option<String>) -> Result<(), JsValue> {
        if self.layer.set_mood(mood.as_deref()) {
            self.render()?;
        }
        Ok(())
    }

    pub fn mood(&self) -> String {
        self.layer.mood().as_str().to_string()
    }

    pub fn dot_count(&self) -> usize {
        self.layer.dots().len()
    }

    /// Remove every dot from the container. Safe to call more than once.
    pub fn destroy(&mut self) {
        self.layer.clear();
        self.container.set_inner_html("");
    }
}

impl MoodBackground {
    fn render(&self) -> Result<(), JsValue> {
        self.container.set_inner_html("");
        self.container.set_class_name(&self.layer.container_class());
        self.container.set_attribute("aria-hidden", "true")?;
        let doc = self
            .container
            .owner_document()
            .ok_or_else(|| JsValue::from_str("container has no document"))?;
        for dot in self.layer.dots() {
            let div = doc.create_element("div")?;
            div.set_class_name("particle");
            div.set_attribute("style", &dot.style())?;
            self.container.append_child(&div)?;
        }
        Ok(())
    }
}

impl Drop for MoodBackground {
    fn drop(&mut self) {
        self.destroy();
    }
}
