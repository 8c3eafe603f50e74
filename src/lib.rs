//! Mood Field core crate.
//!
//! A mood-driven particle field for the browser: fifty drifting particles
//! whose colors and speed follow the detected emotion, joined by faint lines
//! when they pass close to each other. The renderer is driven externally one
//! frame at a time (`ParticleField::tick`); the `web` module wires it to a
//! canvas and `requestAnimationFrame`.

use wasm_bindgen::prelude::*;

pub mod background;
pub mod config;
pub mod error;
pub mod field;
pub mod mood;
pub mod palette;
pub mod particle;
pub mod rng;
pub mod surface;
pub mod web;

pub use background::{BACKGROUND_DOT_COUNT, BackgroundDot, BackgroundLayer};
pub use config::{DEFAULT_CONNECT_DISTANCE, DEFAULT_PARTICLE_COUNT, FieldConfig, MAX_PARTICLE_COUNT};
pub use error::FieldError;
pub use field::{ParticleField, connector_alpha};
pub use mood::Mood;
pub use palette::{DescriptionTable, MoodTable, Palette, PaletteTable, Rgb, Rgba, resolve_palette};
pub use particle::Particle;
pub use surface::{CanvasSurface, Surface};
pub use web::{MoodBackground, MoodTheme, MoodVisualizer};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // A second module instance on the page will already have a logger.
    #[cfg(feature = "console_log")]
    let _ = console_log::init_with_level(log::Level::Info);
}
