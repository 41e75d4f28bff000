use crate::error::{Error, Result};
use crate::render::Glyph;
use alloc::string::ToString;

/// Interaction radii, rule weights and limits for a flock.
///
/// `Default` is the [`Preset::Classic`] tuning. Cohesion has to stay roughly an
/// order of magnitude weaker than separation and alignment, otherwise the flock
/// collapses onto its centroid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlockConfig {
    /// Neighbors closer than this are ignored by cohesion (exclusive).
    pub cohesion_min_distance: f32,
    /// Neighbors farther than this are ignored by cohesion (exclusive).
    pub cohesion_distance: f32,
    /// Outer separation radius (inclusive).
    pub separation_distance: f32,
    /// Outer alignment radius (inclusive).
    pub alignment_distance: f32,
    /// Radius of the pointer obstacle (exclusive).
    pub pointer_radius: f32,
    pub cohesion_weight: f32,
    pub separation_weight: f32,
    pub alignment_weight: f32,
    pub pointer_weight: f32,
    /// Maximum velocity magnitude after every tick.
    pub speed_limit: f32,
    /// Per-axis uniform jitter added to velocity each tick; `0.0` disables it.
    pub jitter: f32,
}

impl Default for FlockConfig {
    fn default() -> Self {
        Preset::Classic.config()
    }
}

impl FlockConfig {
    /// Rejects configurations the update step cannot honor.
    pub fn validate(&self) -> Result<()> {
        let distances = [
            ("cohesion_min_distance", self.cohesion_min_distance),
            ("cohesion_distance", self.cohesion_distance),
            ("separation_distance", self.separation_distance),
            ("alignment_distance", self.alignment_distance),
        ];
        for (field, value) in distances {
            check_finite(field, value)?;
            if value < 0.0 {
                return Err(Error::InvalidConfig {
                    field,
                    reason: "must not be negative",
                });
            }
        }

        if self.cohesion_min_distance >= self.cohesion_distance {
            return Err(Error::InvalidConfig {
                field: "cohesion_min_distance",
                reason: "must be smaller than cohesion_distance",
            });
        }

        let weights = [
            ("cohesion_weight", self.cohesion_weight),
            ("separation_weight", self.separation_weight),
            ("alignment_weight", self.alignment_weight),
            ("pointer_weight", self.pointer_weight),
        ];
        for (field, value) in weights {
            check_finite(field, value)?;
        }

        check_positive("pointer_radius", self.pointer_radius)?;
        check_positive("speed_limit", self.speed_limit)?;

        check_finite("jitter", self.jitter)?;
        if self.jitter < 0.0 {
            return Err(Error::InvalidConfig {
                field: "jitter",
                reason: "must not be negative",
            });
        }

        Ok(())
    }
}

fn check_finite(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidConfig {
            field,
            reason: "must be finite",
        })
    }
}

fn check_positive(field: &'static str, value: f32) -> Result<()> {
    check_finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig {
            field,
            reason: "must be positive",
        })
    }
}

/// Named tunings of the one flock engine. They differ only in radii, weights,
/// population density and the glyph used to draw an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Preset {
    /// Sparse triangles with a light touch on cohesion.
    #[default]
    Classic,
    /// Dense, loosely coupled dots with a little jitter.
    Murmuration,
    /// Strongly aligned, slow triangles.
    School,
    /// Fast, jittery dots that barely align.
    Swarm,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::Classic,
        Preset::Murmuration,
        Preset::School,
        Preset::Swarm,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Preset::Classic => "classic",
            Preset::Murmuration => "murmuration",
            Preset::School => "school",
            Preset::Swarm => "swarm",
        }
    }

    pub fn config(&self) -> FlockConfig {
        match self {
            Preset::Classic => FlockConfig {
                cohesion_min_distance: 8.0,
                cohesion_distance: 40.0,
                separation_distance: 18.0,
                alignment_distance: 40.0,
                pointer_radius: 22.0,
                cohesion_weight: 0.002,
                separation_weight: 0.1,
                alignment_weight: 0.2,
                pointer_weight: 0.1,
                speed_limit: 2.0,
                jitter: 0.0,
            },
            Preset::Murmuration => FlockConfig {
                cohesion_min_distance: 6.0,
                cohesion_distance: 50.0,
                separation_distance: 14.0,
                alignment_distance: 50.0,
                pointer_radius: 30.0,
                cohesion_weight: 0.003,
                separation_weight: 0.12,
                alignment_weight: 0.25,
                pointer_weight: 0.1,
                speed_limit: 2.5,
                jitter: 0.05,
            },
            Preset::School => FlockConfig {
                cohesion_min_distance: 10.0,
                cohesion_distance: 60.0,
                separation_distance: 20.0,
                alignment_distance: 35.0,
                pointer_radius: 40.0,
                cohesion_weight: 0.004,
                separation_weight: 0.15,
                alignment_weight: 0.3,
                pointer_weight: 0.08,
                speed_limit: 1.6,
                jitter: 0.0,
            },
            Preset::Swarm => FlockConfig {
                cohesion_min_distance: 4.0,
                cohesion_distance: 30.0,
                separation_distance: 12.0,
                alignment_distance: 20.0,
                pointer_radius: 22.0,
                cohesion_weight: 0.001,
                separation_weight: 0.2,
                alignment_weight: 0.05,
                pointer_weight: 0.2,
                speed_limit: 3.0,
                jitter: 0.15,
            },
        }
    }

    pub fn glyph(&self) -> Glyph {
        match self {
            Preset::Classic => Glyph::Triangle {
                length: 8.0,
                half_angle: 25.0_f32.to_radians(),
            },
            Preset::Murmuration => Glyph::Circle { radius: 2.0 },
            Preset::School => Glyph::Triangle {
                length: 6.0,
                half_angle: 20.0_f32.to_radians(),
            },
            Preset::Swarm => Glyph::Circle { radius: 1.5 },
        }
    }

    /// Simulation-space area per agent used to size the population.
    pub fn density(&self) -> f32 {
        match self {
            Preset::Classic => 3000.0,
            Preset::Murmuration => 2000.0,
            Preset::School => 2500.0,
            Preset::Swarm => 1500.0,
        }
    }
}

impl core::fmt::Display for Preset {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl core::str::FromStr for Preset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Preset::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownPreset(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        for preset in Preset::ALL {
            assert_eq!(preset.config().validate(), Ok(()), "{preset}");
            assert!(preset.density() > 0.0);
        }
    }

    #[test]
    fn test_cohesion_is_weakest_rule() {
        for preset in Preset::ALL {
            let config = preset.config();
            assert!(config.cohesion_weight * 10.0 <= config.separation_weight);
            assert!(config.cohesion_weight * 10.0 <= config.alignment_weight);
        }
    }

    #[test]
    fn test_preset_from_str() {
        assert_eq!("classic".parse::<Preset>(), Ok(Preset::Classic));
        assert_eq!(" School ".parse::<Preset>(), Ok(Preset::School));
        assert_eq!(
            "heron".parse::<Preset>(),
            Err(Error::UnknownPreset("heron".into()))
        );
    }

    #[test]
    fn test_rejects_non_positive_speed_limit() {
        let config = FlockConfig {
            speed_limit: 0.0,
            ..FlockConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(Error::InvalidConfig {
                field: "speed_limit",
                reason: "must be positive",
            })
        );
    }

    #[test]
    fn test_rejects_inverted_cohesion_range() {
        let config = FlockConfig {
            cohesion_min_distance: 40.0,
            cohesion_distance: 8.0,
            ..FlockConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_nan_weight_and_negative_jitter() {
        let nan_weight = FlockConfig {
            alignment_weight: f32::NAN,
            ..FlockConfig::default()
        };
        assert!(nan_weight.validate().is_err());

        let negative_jitter = FlockConfig {
            jitter: -0.1,
            ..FlockConfig::default()
        };
        assert!(negative_jitter.validate().is_err());
    }
}
