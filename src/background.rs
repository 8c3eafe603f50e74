//! Ambient background layer: a scatter of soft dots placed in percent
//! coordinates and animated by CSS (the `particle` class). No frame loop;
//! the browser runs the animation, we only pick position, size, color and
//! timing per dot.

use crate::mood::Mood;
use crate::palette::{PaletteTable, Rgba};
use rand::Rng;
use rand::rngs::SmallRng;
use std::rc::Rc;

/// Dots per mood session.
pub const BACKGROUND_DOT_COUNT: usize = 50;

#[derive(Clone, Debug, PartialEq)]
pub struct BackgroundDot {
    /// Position as a percentage of the container, `[0, 100)`.
    pub left_pct: f64,
    pub top_pct: f64,
    /// Diameter in px, `[10, 40)`.
    pub size_px: f64,
    pub color: Rgba,
    /// CSS animation duration in seconds, `[3, 8)`.
    pub duration_s: f64,
    /// CSS animation delay in seconds, `[0, 5)`.
    pub delay_s: f64,
}

impl BackgroundDot {
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, colors: &[Rgba; 3]) -> Self {
        Self {
            left_pct: rng.r#gen::<f64>() * 100.0,
            top_pct: rng.r#gen::<f64>() * 100.0,
            size_px: rng.r#gen::<f64>() * 30.0 + 10.0,
            color: colors[rng.gen_range(0..colors.len())],
            duration_s: rng.r#gen::<f64>() * 5.0 + 3.0,
            delay_s: rng.r#gen::<f64>() * 5.0,
        }
    }

    /// Inline CSS for the dot's `div`.
    pub fn style(&self) -> String {
        format!(
            "left:{}%; top:{}%; width:{}px; height:{}px; background-color:{}; animation-duration:{}s; animation-delay:{}s;",
            self.left_pct,
            self.top_pct,
            self.size_px,
            self.size_px,
            self.color,
            self.duration_s,
            self.delay_s
        )
    }
}

/// Dot set for one container, reseeded wholesale when the mood changes.
pub struct BackgroundLayer {
    palettes: Rc<PaletteTable>,
    rng: SmallRng,
    mood: Mood,
    dots: Vec<BackgroundDot>,
    active: bool,
}

impl BackgroundLayer {
    pub fn new(palettes: Rc<PaletteTable>, rng: SmallRng) -> Self {
        Self {
            palettes,
            rng,
            mood: Mood::Neutral,
            dots: Vec::new(),
            active: false,
        }
    }

    pub fn initialize(&mut self, mood: Option<&str>) {
        self.mood = Mood::parse(mood);
        self.active = true;
        self.seed();
    }

    fn seed(&mut self) {
        let colors = &self.palettes.get(self.mood).colors;
        self.dots = (0..BACKGROUND_DOT_COUNT)
            .map(|_| BackgroundDot::spawn(&mut self.rng, colors))
            .collect();
        log::debug!("seeded {} {} background dots", self.dots.len(), self.mood);
    }

    /// Returns true when the dots were replaced and need re-rendering.
    pub fn set_mood(&mut self, mood: Option<&str>) -> bool {
        let next = Mood::parse(mood);
        if next == self.mood {
            return false;
        }
        self.mood = next;
        if !self.active {
            return false;
        }
        self.seed();
        true
    }

    /// Drop every dot. Idempotent.
    pub fn clear(&mut self) {
        self.active = false;
        self.dots.clear();
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }

    pub fn dots(&self) -> &[BackgroundDot] {
        &self.dots
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Container class, e.g. `canvas-container emotion-happy`.
    pub fn container_class(&self) -> String {
        format!("canvas-container emotion-{}", self.mood)
    }
}
