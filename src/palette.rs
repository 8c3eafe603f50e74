//! Mood → visual parameter tables.
//!
//! `PaletteTable` is the single source of truth for colors, speed and
//! connector hue. It is built once (`PaletteTable::standard()`) and shared by
//! `Rc` between every field that needs it.

use crate::mood::Mood;
use std::fmt;
use std::ops::Index;

/// Opaque RGB triple (connector lines, background wash hue).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn with_alpha(self, a: f64) -> Rgba {
        Rgba {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }
}

/// RGB plus alpha in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba {
        r: 0,
        g: 0,
        b: 0,
        a: 0.0,
    };

    pub fn rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }
}

/// Formats as a CSS color, e.g. `rgba(255, 215, 0, 0.6)`.
impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Visual parameters for one mood.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Palette {
    pub colors: [Rgba; 3],
    /// Peak per-frame velocity magnitude per axis is `speed / 2`.
    pub speed: f64,
    pub line_rgb: Rgb,
}

impl Palette {
    fn hue_family(colors: [(u8, u8, u8); 3], speed: f64, line: (u8, u8, u8)) -> Self {
        let colors = colors.map(|(r, g, b)| Rgb::new(r, g, b).with_alpha(PARTICLE_ALPHA));
        Self {
            colors,
            speed,
            line_rgb: Rgb::new(line.0, line.1, line.2),
        }
    }

    pub fn contains(&self, color: &Rgba) -> bool {
        self.colors.iter().any(|c| c == color)
    }

    /// Largest absolute per-axis velocity a particle can be seeded with.
    pub fn max_velocity(&self) -> f64 {
        self.speed / 2.0
    }
}

const PARTICLE_ALPHA: f64 = 0.6;

/// Immutable mapping from every `Mood` to a `T`.
#[derive(Clone, Debug, PartialEq)]
pub struct MoodTable<T> {
    entries: [T; 7],
}

impl<T> MoodTable<T> {
    /// Build a table by evaluating `f` once per mood, in `Mood::ALL` order.
    pub fn from_fn(mut f: impl FnMut(Mood) -> T) -> Self {
        Self {
            entries: Mood::ALL.map(&mut f),
        }
    }

    pub fn get(&self, mood: Mood) -> &T {
        &self.entries[mood.index()]
    }

    /// Permissive lookup: unknown or missing names read the `Neutral` entry.
    pub fn resolve(&self, raw: Option<&str>) -> &T {
        self.get(Mood::parse(raw))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Mood, &T)> {
        Mood::ALL.into_iter().zip(self.entries.iter())
    }
}

impl<T> Index<Mood> for MoodTable<T> {
    type Output = T;

    fn index(&self, mood: Mood) -> &T {
        self.get(mood)
    }
}

pub type PaletteTable = MoodTable<Palette>;

impl PaletteTable {
    /// The product palette: three shades per hue family plus speed and line hue.
    pub fn standard() -> Self {
        MoodTable::from_fn(|mood| match mood {
            Mood::Happy => {
                Palette::hue_family([(255, 215, 0), (255, 165, 0), (255, 140, 0)], 3.0, (255, 215, 0))
            }
            Mood::Sad => {
                Palette::hue_family([(0, 105, 255), (0, 191, 255), (30, 144, 255)], 1.0, (0, 105, 255))
            }
            Mood::Angry => {
                Palette::hue_family([(255, 0, 0), (255, 69, 0), (255, 99, 71)], 4.0, (255, 0, 0))
            }
            Mood::Fear => {
                Palette::hue_family([(128, 0, 128), (153, 50, 204), (186, 85, 211)], 3.5, (128, 0, 128))
            }
            Mood::Surprise => {
                Palette::hue_family([(0, 255, 0), (127, 255, 0), (173, 255, 47)], 5.0, (0, 255, 0))
            }
            Mood::Disgust => {
                Palette::hue_family([(0, 128, 128), (32, 178, 170), (95, 158, 160)], 2.0, (0, 128, 128))
            }
            Mood::Neutral => Palette::hue_family(
                [(128, 128, 128), (169, 169, 169), (192, 192, 192)],
                2.0,
                (128, 128, 128),
            ),
        })
    }
}

/// Look up the palette for a free-form mood string.
pub fn resolve_palette<'a>(table: &'a PaletteTable, mood: Option<&str>) -> &'a Palette {
    table.resolve(mood)
}

/// Copy shown beneath the visualizer, one paragraph per mood.
pub type DescriptionTable = MoodTable<&'static str>;

impl DescriptionTable {
    pub fn standard() -> Self {
        MoodTable::from_fn(|mood| match mood {
            Mood::Happy => {
                "Your happiness creates bright, energetic patterns with golden particles that move playfully across the canvas. The connections between particles represent the social bonds that happiness often strengthens."
            }
            Mood::Sad => {
                "Your sadness manifests as slow-moving blue particles that drift gently across the canvas. The connections between them are more sparse, reflecting the feeling of isolation that can accompany sadness."
            }
            Mood::Angry => {
                "Your anger generates fast, erratic red particles that move intensely across the canvas. The connections between particles are strong but chaotic, representing the turbulent energy of anger."
            }
            Mood::Fear => {
                "Your fear creates purple particles that move unpredictably, sometimes clustering together for safety. The connections between particles appear and disappear rapidly, reflecting the uncertainty of fear."
            }
            Mood::Surprise => {
                "Your surprise manifests as bright green particles that move in unexpected bursts across the canvas. The connections between particles form and break quickly, representing the sudden shifts in attention that come with surprise."
            }
            Mood::Disgust => {
                "Your disgust creates teal particles that tend to maintain distance from each other. The connections between particles are minimal, reflecting the aversion and withdrawal associated with disgust."
            }
            Mood::Neutral => {
                "Your neutral state creates a balanced pattern of gray particles moving at a moderate pace. The connections between particles are steady and predictable, reflecting a calm and centered emotional state."
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_mood_has_a_complete_palette() {
        let table = PaletteTable::standard();
        for (mood, p) in table.iter() {
            assert_eq!(p.colors.len(), 3, "{mood}");
            assert!(p.speed > 0.0, "{mood} speed must be positive");
            assert!(p.colors.iter().all(|c| c.a > 0.0 && c.a <= 1.0));
        }
    }

    #[test]
    fn unknown_and_missing_resolve_to_neutral() {
        let table = PaletteTable::standard();
        let neutral = table.get(Mood::Neutral);
        assert_eq!(resolve_palette(&table, None), neutral);
        assert_eq!(resolve_palette(&table, Some("bored")), neutral);
        assert_eq!(neutral.speed, 2.0);
    }

    #[test]
    fn mixed_case_resolves_to_named_palette() {
        let table = PaletteTable::standard();
        assert_eq!(resolve_palette(&table, Some("Happy")), &table[Mood::Happy]);
        assert_eq!(table[Mood::Happy].line_rgb, Rgb::new(255, 215, 0));
    }

    #[test]
    fn rgba_formats_as_css() {
        let c = Rgb::new(0, 105, 255).with_alpha(0.6);
        assert_eq!(c.to_string(), "rgba(0, 105, 255, 0.6)");
        assert_eq!(Rgba::TRANSPARENT.to_string(), "rgba(0, 0, 0, 0)");
    }

    #[test]
    fn descriptions_mention_their_hue() {
        let d = DescriptionTable::standard();
        assert!(d[Mood::Sad].contains("blue"));
        assert!(d.resolve(Some("unknown")).contains("neutral"));
    }
}
