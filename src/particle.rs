//! Single animated point.

use crate::config::FieldConfig;
use crate::palette::{Palette, Rgba};
use rand::Rng;

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub radius: f64,
    pub color: Rgba,
}

impl Particle {
    /// Random position inside `width × height`, random direction scaled by
    /// the palette speed, random palette color.
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        width: f64,
        height: f64,
        palette: &Palette,
        config: &FieldConfig,
    ) -> Self {
        let speed = palette.speed * config.speed_scale;
        let radius = if config.radius_max > config.radius_min {
            rng.gen_range(config.radius_min..config.radius_max)
        } else {
            config.radius_min
        };
        Self {
            x: rng.r#gen::<f64>() * width,
            y: rng.r#gen::<f64>() * height,
            vx: (rng.r#gen::<f64>() - 0.5) * speed,
            vy: (rng.r#gen::<f64>() - 0.5) * speed,
            radius,
            color: palette.colors[rng.gen_range(0..palette.colors.len())],
        }
    }

    /// Advance one frame and reflect off `[0, width] × [0, height]`.
    ///
    /// Reflection only flips the velocity sign; the position is left where it
    /// landed, so a particle can sit up to one step outside the bounds. An
    /// axis is flipped on every step that ends outside, whichever way it was
    /// heading.
    pub fn step(&mut self, width: f64, height: f64) {
        self.x += self.vx;
        self.y += self.vy;

        if self.x < 0.0 || self.x > width {
            self.vx = -self.vx;
        }
        if self.y < 0.0 || self.y > height {
            self.vy = -self.vy;
        }
    }

    pub fn distance_to(&self, other: &Particle) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}
