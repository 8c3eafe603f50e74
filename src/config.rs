//! Field tunables. Defaults reproduce the product visualizer exactly.

use crate::error::FieldError;

/// Particles per mood session.
pub const DEFAULT_PARTICLE_COUNT: usize = 50;
/// Upper bound accepted from configuration.
pub const MAX_PARTICLE_COUNT: usize = 2_000;
/// Connector threshold in pixels (strict `<`).
pub const DEFAULT_CONNECT_DISTANCE: f64 = 100.0;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FieldConfig {
    pub particle_count: usize,
    pub connect_distance: f64,
    /// Radius is drawn uniformly from `[radius_min, radius_max)`.
    pub radius_min: f64,
    pub radius_max: f64,
    /// Multiplier on the palette speed factor. 0 freezes the field.
    pub speed_scale: f64,
    /// Opacity of the radial background wash at its center.
    pub wash_alpha: f64,
    pub line_width: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            connect_distance: DEFAULT_CONNECT_DISTANCE,
            radius_min: 2.0,
            radius_max: 12.0,
            speed_scale: 1.0,
            wash_alpha: 0.1,
            line_width: 1.0,
        }
    }
}

impl FieldConfig {
    /// Check invariants; returns the config unchanged when valid.
    pub fn validated(self) -> Result<Self, FieldError> {
        if self.particle_count == 0 {
            return Err(FieldError::InvalidConfig("particle_count must be at least 1".into()));
        }
        if self.particle_count > MAX_PARTICLE_COUNT {
            return Err(FieldError::InvalidConfig(format!(
                "particle_count {} exceeds the maximum of {}",
                self.particle_count, MAX_PARTICLE_COUNT
            )));
        }
        if !(self.connect_distance > 0.0) {
            return Err(FieldError::InvalidConfig(format!(
                "connect_distance must be positive, got {}",
                self.connect_distance
            )));
        }
        if !(self.radius_min > 0.0) || !(self.radius_max >= self.radius_min) {
            return Err(FieldError::InvalidConfig(format!(
                "radius range [{}, {}) is invalid",
                self.radius_min, self.radius_max
            )));
        }
        if !(self.speed_scale >= 0.0) {
            return Err(FieldError::InvalidConfig(format!(
                "speed_scale must be non-negative, got {}",
                self.speed_scale
            )));
        }
        if !(0.0..=1.0).contains(&self.wash_alpha) {
            return Err(FieldError::InvalidConfig(format!(
                "wash_alpha must be within [0, 1], got {}",
                self.wash_alpha
            )));
        }
        if self.particle_count > DEFAULT_PARTICLE_COUNT {
            // The connector pass has no spatial partitioning.
            log::warn!(
                "particle_count {} exceeds {}; connector pass is O(n^2) ({} pair checks per frame)",
                self.particle_count,
                DEFAULT_PARTICLE_COUNT,
                self.particle_count.saturating_mul(self.particle_count - 1) / 2
            );
        }
        Ok(self)
    }

    /// Parse from JSON; missing keys keep their defaults.
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, FieldError> {
        let cfg: FieldConfig = serde_json::from_str(json)?;
        cfg.validated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let cfg = FieldConfig::default().validated().unwrap();
        assert_eq!(cfg.particle_count, 50);
        assert_eq!(cfg.connect_distance, 100.0);
    }

    #[test]
    fn rejects_bad_values() {
        let bad = [
            FieldConfig {
                particle_count: 0,
                ..Default::default()
            },
            FieldConfig {
                particle_count: MAX_PARTICLE_COUNT + 1,
                ..Default::default()
            },
            FieldConfig {
                particle_count: usize::MAX,
                ..Default::default()
            },
            FieldConfig {
                connect_distance: 0.0,
                ..Default::default()
            },
            FieldConfig {
                connect_distance: f64::NAN,
                ..Default::default()
            },
            FieldConfig {
                radius_min: 0.0,
                ..Default::default()
            },
            FieldConfig {
                radius_min: 5.0,
                radius_max: 4.0,
                ..Default::default()
            },
            FieldConfig {
                speed_scale: -1.0,
                ..Default::default()
            },
            FieldConfig {
                wash_alpha: 1.5,
                ..Default::default()
            },
        ];
        for cfg in bad {
            assert!(
                matches!(cfg.clone().validated(), Err(FieldError::InvalidConfig(_))),
                "{cfg:?} should be rejected"
            );
        }
    }

    #[test]
    fn zero_speed_scale_is_allowed() {
        let cfg = FieldConfig {
            speed_scale: 0.0,
            ..Default::default()
        };
        assert!(cfg.validated().is_ok());
    }

    #[test]
    fn largest_allowed_count_is_accepted() {
        let cfg = FieldConfig {
            particle_count: MAX_PARTICLE_COUNT,
            ..Default::default()
        };
        assert_eq!(cfg.validated().unwrap().particle_count, MAX_PARTICLE_COUNT);
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn json_fills_missing_keys_from_defaults() {
        let cfg = FieldConfig::from_json(r#"{ "connect_distance": 80.0 }"#).unwrap();
        assert_eq!(cfg.connect_distance, 80.0);
        assert_eq!(cfg.particle_count, DEFAULT_PARTICLE_COUNT);
        assert!(matches!(
            FieldConfig::from_json("{ not json"),
            Err(FieldError::Json(_))
        ));
        assert!(matches!(
            FieldConfig::from_json(r#"{ "particle_count": 18446744073709551615 }"#),
            Err(FieldError::InvalidConfig(_))
        ));
    }
}
