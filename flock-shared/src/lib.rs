use flock_core::{FlockConfig, FlockStats, Glyph, Preset, Simulation, DEFAULT_FPS};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("malformed settings: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Flock(#[from] flock_core::Error),
}

/// Per-field overrides applied on top of a preset's flock tuning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlockOverrides {
    pub cohesion_min_distance: Option<f32>,
    pub cohesion_distance: Option<f32>,
    pub separation_distance: Option<f32>,
    pub alignment_distance: Option<f32>,
    pub pointer_radius: Option<f32>,
    pub cohesion_weight: Option<f32>,
    pub separation_weight: Option<f32>,
    pub alignment_weight: Option<f32>,
    pub pointer_weight: Option<f32>,
    pub speed_limit: Option<f32>,
    pub jitter: Option<f32>,
}

impl FlockOverrides {
    pub fn apply(&self, config: &mut FlockConfig) {
        let fields = [
            (self.cohesion_min_distance, &mut config.cohesion_min_distance),
            (self.cohesion_distance, &mut config.cohesion_distance),
            (self.separation_distance, &mut config.separation_distance),
            (self.alignment_distance, &mut config.alignment_distance),
            (self.pointer_radius, &mut config.pointer_radius),
            (self.cohesion_weight, &mut config.cohesion_weight),
            (self.separation_weight, &mut config.separation_weight),
            (self.alignment_weight, &mut config.alignment_weight),
            (self.pointer_weight, &mut config.pointer_weight),
            (self.speed_limit, &mut config.speed_limit),
            (self.jitter, &mut config.jitter),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

/// Simulation settings as read from a JSON file or handed over by a web page.
///
/// Every field is optional; anything left out falls back to the preset (or,
/// for the world size and seed, to whatever the host decides).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub preset: Option<String>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    /// Simulation-space area per agent.
    pub density: Option<f32>,
    pub seed: Option<u64>,
    pub fps: Option<u32>,
    pub flock: FlockOverrides,
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn preset(&self) -> Result<Preset, SettingsError> {
        match &self.preset {
            Some(name) => Ok(name.parse()?),
            None => Ok(Preset::default()),
        }
    }

    /// The preset's flock tuning with overrides applied, validated.
    pub fn flock_config(&self) -> Result<FlockConfig, SettingsError> {
        let mut config = self.preset()?.config();
        self.flock.apply(&mut config);
        config.validate()?;
        Ok(config)
    }

    pub fn glyph(&self) -> Result<Glyph, SettingsError> {
        Ok(self.preset()?.glyph())
    }

    pub fn density(&self) -> Result<f32, SettingsError> {
        Ok(self.density.unwrap_or(self.preset()?.density()))
    }

    pub fn fps(&self) -> u32 {
        self.fps.unwrap_or(DEFAULT_FPS)
    }
}

/// Snapshot of a running simulation, reported by hosts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusReport {
    pub ticks: u64,
    pub population: usize,
    pub width: f32,
    pub height: f32,
    pub mean_speed: f32,
    pub centroid: [f32; 2],
    pub polarization: f32,
    pub pointer_active: bool,
}

impl StatusReport {
    pub fn from_simulation(simulation: &Simulation) -> Self {
        let FlockStats {
            population,
            mean_speed,
            centroid,
            polarization,
        } = simulation.stats();
        let bounds = simulation.bounds();

        Self {
            ticks: simulation.ticks(),
            population,
            width: bounds.width(),
            height: bounds.height(),
            mean_speed,
            centroid: [centroid.x, centroid.y],
            polarization,
            pointer_active: simulation.pointer().is_some(),
        }
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flock_core::{Bounds, Vector2D};

    #[test]
    fn test_empty_settings_are_classic() {
        let settings = Settings::from_json("{}").unwrap();
        assert_eq!(settings.preset().unwrap(), Preset::Classic);
        assert_eq!(settings.flock_config().unwrap(), FlockConfig::default());
        assert_eq!(settings.density().unwrap(), 3000.0);
        assert_eq!(settings.fps(), 90);
    }

    #[test]
    fn test_overrides_apply_on_top_of_preset() {
        let settings = Settings::from_json(
            r#"{
                "preset": "school",
                "density": 1200,
                "flock": { "speed_limit": 4.0, "jitter": 0.1 }
            }"#,
        )
        .unwrap();

        let config = settings.flock_config().unwrap();
        assert_eq!(config.speed_limit, 4.0);
        assert_eq!(config.jitter, 0.1);
        assert_eq!(
            config.separation_weight,
            Preset::School.config().separation_weight
        );
        assert_eq!(settings.density().unwrap(), 1200.0);
    }

    #[test]
    fn test_rejects_unknown_fields_and_presets() {
        assert!(matches!(
            Settings::from_json(r#"{ "flock": { "sped_limit": 3 } }"#),
            Err(SettingsError::Json(_))
        ));

        let settings = Settings::from_json(r#"{ "preset": "starlings" }"#).unwrap();
        assert!(matches!(
            settings.flock_config(),
            Err(SettingsError::Flock(flock_core::Error::UnknownPreset(_)))
        ));
    }

    #[test]
    fn test_rejects_invalid_override() {
        let settings = Settings::from_json(r#"{ "flock": { "speed_limit": -1 } }"#).unwrap();
        assert!(matches!(
            settings.flock_config(),
            Err(SettingsError::Flock(flock_core::Error::InvalidConfig {
                field: "speed_limit",
                ..
            }))
        ));
    }

    #[test]
    fn test_status_report() {
        let bounds = Bounds::new(300.0, 100.0).unwrap();
        let mut simulation = Simulation::from_preset(Preset::Classic, bounds, 1).unwrap();
        simulation.set_pointer(Some(Vector2D::new(10.0, 10.0)));
        simulation.update();

        let report = StatusReport::from_simulation(&simulation);
        assert_eq!(report.ticks, 1);
        assert_eq!(report.population, 10);
        assert!(report.pointer_active);

        let json = report.to_json().unwrap();
        let back: StatusReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}
