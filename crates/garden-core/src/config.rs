//! Configuration types for the simulation.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Genetic operator rates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneticsConfig {
    /// Probability per bit position that the single crossover fires (0.0 to 1.0)
    pub crossover_rate: f32,
    /// Probability per bit position of a point mutation (0.0 to 1.0)
    pub mutation_rate: f32,
}

impl Default for GeneticsConfig {
    fn default() -> Self {
        Self {
            crossover_rate: 0.7,
            mutation_rate: 0.001,
        }
    }
}

impl GeneticsConfig {
    pub fn validate(&self) -> Result<()> {
        for (name, rate) in [
            ("crossover_rate", self.crossover_rate),
            ("mutation_rate", self.mutation_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(Error::Validation(format!(
                    "{name} must lie in [0, 1], got {rate}"
                )));
            }
        }
        Ok(())
    }
}

/// How seed offsets are derived from the sampled angle and distance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScatterMode {
    /// Offset along the sampled angle: uniform direction around the parent
    #[default]
    Disk,
    /// Both axes derived from the sampled distance alone. Seeds land on a
    /// spiral instead of a disk; only useful to reproduce historical runs.
    Legacy,
}

/// Seed dispersal parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReproductionConfig {
    /// Spread radius per unit of the flower's dispersal gene
    pub spread_per_dispersal: f32,
    /// Offset formula used when scattering seeds
    pub scatter: ScatterMode,
}

impl Default for ReproductionConfig {
    fn default() -> Self {
        Self {
            spread_per_dispersal: 56.0,
            scatter: ScatterMode::Disk,
        }
    }
}

/// Garden (population manager) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GardenConfig {
    /// Width of the arena
    pub width: f32,
    /// Height of the arena
    pub height: f32,
    /// Number of randomly generated plants at startup
    pub seed_count: usize,
    /// Random seed for reproducibility
    pub seed: u64,
    /// Emit population metrics every this many ticks (0 disables)
    pub metrics_interval: u64,
    pub genetics: GeneticsConfig,
    pub reproduction: ReproductionConfig,
}

impl Default for GardenConfig {
    fn default() -> Self {
        Self {
            width: 1900.0,
            height: 900.0,
            seed_count: 65,
            seed: 0,
            metrics_interval: 1000,
            genetics: GeneticsConfig::default(),
            reproduction: ReproductionConfig::default(),
        }
    }
}

impl GardenConfig {
    /// Arena of the given size seeded with `seed_count` plants, defaults elsewhere
    pub fn with_arena(width: f32, height: f32, seed_count: usize) -> Self {
        Self {
            width,
            height,
            seed_count,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(Error::Validation(format!(
                "width must be positive and finite, got {}",
                self.width
            )));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(Error::Validation(format!(
                "height must be positive and finite, got {}",
                self.height
            )));
        }
        let spread = self.reproduction.spread_per_dispersal;
        if !(spread.is_finite() && spread >= 0.0) {
            return Err(Error::Validation(format!(
                "spread_per_dispersal must be non-negative and finite, got {spread}"
            )));
        }
        self.genetics.validate()
    }
}

/// Configuration of a standalone simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub garden: GardenConfig,
    /// Simulated time advanced by every tick
    pub dt: f32,
    /// Stop after this many ticks; run until interrupted when absent
    pub max_ticks: Option<u64>,
    /// Delay between two rendered frames (milliseconds)
    pub frame_interval_ms: u64,
    /// Terminal canvas size in character cells
    pub canvas_columns: usize,
    pub canvas_rows: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            garden: GardenConfig::default(),
            dt: 0.001,
            max_ticks: None,
            frame_interval_ms: 250,
            canvas_columns: 95,
            canvas_rows: 30,
        }
    }
}

impl RunConfig {
    /// Load a run configuration from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config: RunConfig = serde_json::from_str(&text)?;
        debug!(path = %path.display(), "Loaded run configuration");
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.dt.is_finite() && self.dt >= 0.0) {
            return Err(Error::Validation(format!(
                "dt must be non-negative and finite, got {}",
                self.dt
            )));
        }
        if self.canvas_columns == 0 || self.canvas_rows == 0 {
            return Err(Error::Validation("canvas must have at least one cell".into()));
        }
        self.garden.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configs() {
        let garden = GardenConfig::default();
        assert_eq!(garden.width, 1900.0);
        assert_eq!(garden.height, 900.0);
        assert_eq!(garden.seed_count, 65);
        assert!(garden.validate().is_ok());

        let genetics = GeneticsConfig::default();
        assert_eq!(genetics.crossover_rate, 0.7);
        assert_eq!(genetics.mutation_rate, 0.001);

        let run = RunConfig::default();
        assert_eq!(run.dt, 0.001);
        assert!(run.max_ticks.is_none());
        assert!(run.validate().is_ok());
    }

    #[test]
    fn test_rejects_out_of_range_rates() {
        let genetics = GeneticsConfig {
            mutation_rate: 1.5,
            ..Default::default()
        };
        assert!(matches!(genetics.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_rejects_degenerate_arena() {
        let config = GardenConfig::with_arena(0.0, 100.0, 1);
        assert!(matches!(config.validate(), Err(Error::Validation(_))));

        let config = GardenConfig::with_arena(100.0, f32::NAN, 1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_negative_dt() {
        let run = RunConfig {
            dt: -0.5,
            ..Default::default()
        };
        assert!(run.validate().is_err());
    }

    #[test]
    fn test_run_config_serialization() {
        let run = RunConfig {
            max_ticks: Some(10),
            ..Default::default()
        };
        let json = run.to_json_pretty().unwrap();
        let deserialized: RunConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.max_ticks, Some(10));
        assert_eq!(deserialized.garden.reproduction.scatter, ScatterMode::Disk);
        assert!(json.contains("\"scatter\": \"disk\""));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = RunConfig::from_json_file("/definitely/not/here.json");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
