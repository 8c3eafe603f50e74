//! Particle field: owns one surface, one particle set and one RNG, and is
//! driven one frame at a time by an external clock.
//!
//! Lifecycle:
//! - `initialize(mood)` seeds the field (or defers seeding until the surface
//!   reports a non-zero size) and marks it running.
//! - `tick()` advances and redraws one frame while running.
//! - `set_mood(mood)` reseeds wholesale when the resolved mood changes.
//! - `resize(w, h)` resizes the surface, leaving particles where they are.
//! - `teardown()` stops the field and clears everything. Idempotent.

use crate::config::FieldConfig;
use crate::mood::Mood;
use crate::palette::{Palette, PaletteTable};
use crate::particle::Particle;
use crate::surface::Surface;
use rand::rngs::SmallRng;
use std::rc::Rc;

/// Opacity of a connector between two particles `distance` apart, or `None`
/// when they are too far apart to be connected (strict `<` threshold).
pub fn connector_alpha(distance: f64, threshold: f64) -> Option<f64> {
    if distance < threshold {
        Some(1.0 - distance / threshold)
    } else {
        None
    }
}

pub struct ParticleField<S: Surface> {
    surface: S,
    palettes: Rc<PaletteTable>,
    config: FieldConfig,
    rng: SmallRng,
    mood: Mood,
    particles: Vec<Particle>,
    running: bool,
    // Set when initialize() saw a zero-sized surface.
    seed_pending: bool,
    frames: u64,
}

impl<S: Surface> ParticleField<S> {
    pub fn new(surface: S, palettes: Rc<PaletteTable>, config: FieldConfig, rng: SmallRng) -> Self {
        Self {
            surface,
            palettes,
            config,
            rng,
            mood: Mood::Neutral,
            particles: Vec::new(),
            running: false,
            seed_pending: false,
            frames: 0,
        }
    }

    /// Clear any previous particle set and seed a new one for `mood`.
    /// Unknown or missing moods resolve to neutral.
    pub fn initialize(&mut self, mood: Option<&str>) {
        self.mood = Mood::parse(mood);
        self.running = true;
        self.reinitialize();
    }

    /// Reseed with the current mood. Does nothing once torn down; use
    /// `initialize` to restart.
    pub fn reinitialize(&mut self) {
        if !self.running {
            return;
        }
        self.particles.clear();
        if self.surface.has_valid_size() {
            self.seed();
        } else {
            log::debug!(
                "surface is {}x{}; deferring {} particle placement",
                self.surface.width(),
                self.surface.height(),
                self.mood
            );
            self.seed_pending = true;
        }
    }

    fn seed(&mut self) {
        let width = self.surface.width();
        let height = self.surface.height();
        let palette = self.palettes.get(self.mood);
        self.particles = (0..self.config.particle_count)
            .map(|_| Particle::spawn(&mut self.rng, width, height, palette, &self.config))
            .collect();
        self.seed_pending = false;
        log::debug!(
            "seeded {} {} particles on {}x{}",
            self.particles.len(),
            self.mood,
            width,
            height
        );
    }

    /// Feed a new mood. Reseeds only when the resolved mood differs; after
    /// teardown the mood is recorded for the next `initialize`.
    pub fn set_mood(&mut self, mood: Option<&str>) {
        let next = Mood::parse(mood);
        if next == self.mood {
            return;
        }
        log::debug!("mood changed {} -> {}", self.mood, next);
        self.mood = next;
        if self.running {
            self.reinitialize();
        }
    }

    /// Advance and redraw one frame. No-op when stopped or when the surface
    /// has been detached by the host.
    pub fn tick(&mut self) {
        if !self.running || !self.surface.is_attached() {
            return;
        }
        if self.seed_pending {
            if !self.surface.has_valid_size() {
                return;
            }
            self.seed();
        }

        let width = self.surface.width();
        let height = self.surface.height();
        for p in &mut self.particles {
            p.step(width, height);
        }

        self.draw();
        self.frames += 1;
    }

    fn draw(&mut self) {
        let width = self.surface.width();
        let height = self.surface.height();
        let line_rgb = self.palettes.get(self.mood).line_rgb;

        self.surface.clear();
        self.surface.radial_wash(
            width / 2.0,
            height / 2.0,
            width / 2.0,
            line_rgb.with_alpha(self.config.wash_alpha),
        );

        for p in &self.particles {
            self.surface.fill_circle(p.x, p.y, p.radius, p.color);
        }

        let threshold = self.config.connect_distance;
        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                if let Some(alpha) = connector_alpha(a.distance_to(b), threshold) {
                    self.surface.stroke_line(
                        (a.x, a.y),
                        (b.x, b.y),
                        line_rgb.with_alpha(alpha),
                        self.config.line_width,
                    );
                }
            }
        }
    }

    /// Resize the surface. Particles keep their positions and reflect back
    /// in on their next out-of-bounds check.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.surface.resize(width, height);
        if self.running && self.seed_pending && self.surface.has_valid_size() {
            self.seed();
        }
    }

    /// Stop the field and release its drawn content and particles.
    pub fn teardown(&mut self) {
        if !self.running && self.particles.is_empty() {
            return;
        }
        self.running = false;
        self.seed_pending = false;
        self.particles.clear();
        if self.surface.is_attached() {
            self.surface.clear();
        }
        log::debug!("field torn down after {} frames", self.frames);
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_seed_pending(&self) -> bool {
        self.seed_pending
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }

    pub fn palette(&self) -> &Palette {
        self.palettes.get(self.mood)
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Frames drawn since construction.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{Rgb, Rgba};
    use crate::rng::seeded_rng;

    #[derive(Default)]
    struct Recorder {
        width: f64,
        height: f64,
        detached: bool,
        clears: usize,
        washes: usize,
        circles: usize,
        lines: Vec<Rgba>,
    }

    impl Surface for Recorder {
        fn width(&self) -> f64 {
            self.width
        }
        fn height(&self) -> f64 {
            self.height
        }
        fn is_attached(&self) -> bool {
            !self.detached
        }
        fn resize(&mut self, width: f64, height: f64) {
            self.width = width;
            self.height = height;
        }
        fn clear(&mut self) {
            self.clears += 1;
            self.lines.clear();
        }
        fn radial_wash(&mut self, _cx: f64, _cy: f64, _radius: f64, _inner: Rgba) {
            self.washes += 1;
        }
        fn fill_circle(&mut self, _x: f64, _y: f64, _radius: f64, _color: Rgba) {
            self.circles += 1;
        }
        fn stroke_line(&mut self, _from: (f64, f64), _to: (f64, f64), color: Rgba, _width: f64) {
            self.lines.push(color);
        }
    }

    fn field(width: f64, height: f64, config: FieldConfig) -> ParticleField<Recorder> {
        let surface = Recorder {
            width,
            height,
            ..Default::default()
        };
        ParticleField::new(surface, Rc::new(PaletteTable::standard()), config, seeded_rng(3))
    }

    fn still(x: f64, y: f64) -> Particle {
        Particle {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            radius: 2.0,
            color: Rgb::new(128, 128, 128).with_alpha(0.6),
        }
    }

    #[test]
    fn connector_threshold_is_strict() {
        assert_eq!(connector_alpha(100.0, 100.0), None);
        assert_eq!(connector_alpha(0.0, 100.0), Some(1.0));
        assert_eq!(connector_alpha(25.0, 100.0), Some(0.75));
    }

    #[test]
    fn pair_exactly_at_threshold_draws_no_line() {
        let mut f = field(500.0, 300.0, FieldConfig::default());
        f.initialize(Some("neutral"));
        f.particles = vec![still(100.0, 100.0), still(200.0, 100.0)];
        f.tick();
        assert!(f.surface().lines.is_empty());
        assert_eq!(f.surface().circles, 2);
    }

    #[test]
    fn coincident_pair_draws_opaque_line_in_line_hue() {
        let mut f = field(500.0, 300.0, FieldConfig::default());
        f.initialize(Some("sad"));
        f.particles = vec![still(40.0, 40.0), still(40.0, 40.0)];
        f.tick();
        assert_eq!(f.surface().lines, vec![Rgb::new(0, 105, 255).with_alpha(1.0)]);
    }

    #[test]
    fn every_frame_washes_before_drawing() {
        let mut f = field(500.0, 300.0, FieldConfig::default());
        f.initialize(None);
        for _ in 0..3 {
            f.tick();
        }
        assert_eq!(f.surface().clears, 3);
        assert_eq!(f.surface().washes, 3);
        assert_eq!(f.surface().circles, 150);
        assert_eq!(f.frames(), 3);
    }

    #[test]
    fn zero_sized_surface_defers_placement() {
        let mut f = field(0.0, 0.0, FieldConfig::default());
        f.initialize(Some("happy"));
        assert!(f.particles().is_empty());
        assert!(f.is_seed_pending());

        f.tick();
        assert!(f.particles().is_empty());
        assert_eq!(f.surface().clears, 0);

        f.surface_mut().width = 400.0;
        f.surface_mut().height = 200.0;
        f.tick();
        assert_eq!(f.particles().len(), 50);
        assert!(!f.is_seed_pending());
    }

    #[test]
    fn detached_surface_makes_tick_a_noop() {
        let mut f = field(500.0, 300.0, FieldConfig::default());
        f.initialize(Some("fear"));
        let before = f.particles().to_vec();
        f.surface_mut().detached = true;
        f.tick();
        assert_eq!(f.particles(), &before[..]);
        assert_eq!(f.surface().clears, 0);
        // teardown must not touch a detached surface either
        f.teardown();
        assert_eq!(f.surface().clears, 0);
        assert!(f.particles().is_empty());
    }

    #[test]
    fn same_resolved_mood_does_not_reseed() {
        let mut f = field(500.0, 300.0, FieldConfig::default());
        f.initialize(Some("happy"));
        let before = f.particles().to_vec();
        f.set_mood(Some("HAPPY"));
        assert_eq!(f.particles(), &before[..]);
    }

    #[test]
    fn reinitialize_after_teardown_leaves_field_empty() {
        let mut f = field(500.0, 300.0, FieldConfig::default());
        f.reinitialize();
        assert!(f.particles().is_empty());

        f.initialize(Some("disgust"));
        f.teardown();
        f.reinitialize();
        assert!(f.particles().is_empty());
        assert!(!f.is_seed_pending());
        assert!(!f.is_running());

        let mut g = field(0.0, 0.0, FieldConfig::default());
        g.initialize(None);
        g.teardown();
        g.reinitialize();
        assert!(!g.is_seed_pending());
    }

    #[test]
    fn set_mood_after_teardown_only_records() {
        let mut f = field(500.0, 300.0, FieldConfig::default());
        f.initialize(Some("happy"));
        f.teardown();
        f.set_mood(Some("angry"));
        assert_eq!(f.mood(), Mood::Angry);
        assert!(f.particles().is_empty());
        assert!(!f.is_running());
    }
}
