use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Optional settings file, looked up in the working directory.
pub const CONFIG_FILE: &str = "launch_dash.json";

/// Upper bound on the number of tick intervals under the payload slider.
pub const MAX_TICKS: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Dataset loaded at startup.
    pub dataset_path: PathBuf,
    pub window_width: f32,
    pub window_height: f32,
    /// Lower end of the payload slider's display domain (kg).
    pub slider_min: f64,
    /// Upper end of the payload slider's display domain (kg). Widened at
    /// runtime if the data go beyond it.
    pub slider_max: f64,
    /// Spacing of the labelled ticks under the slider (kg).
    pub tick_spacing: f64,
    /// Drag step of the slider handles (kg).
    pub slider_step: f64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("spacex_launch_dash.csv"),
            window_width: 1200.0,
            window_height: 900.0,
            slider_min: 0.0,
            slider_max: 10000.0,
            tick_spacing: 2000.0,
            slider_step: 1000.0,
        }
    }
}

impl DashboardConfig {
    /// Load [`CONFIG_FILE`] from the working directory.
    /// Returns defaults if the file doesn't exist or fails to parse.
    pub fn load() -> Self {
        let path = Path::new(CONFIG_FILE);
        match Self::try_load(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Failed to load config, using defaults: {e:#}");
                Self::default()
            }
        }
    }

    fn try_load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;

        Ok(config)
    }

    /// Tick positions over the display domain, starting at its lower end.
    /// The spacing is widened so that at most [`MAX_TICKS`] intervals are drawn.
    pub fn ticks(&self, domain_max: f64) -> Vec<f64> {
        let span = domain_max - self.slider_min;
        let usable = self.tick_spacing > 0.0 && span > 0.0;
        if !usable {
            return vec![self.slider_min, domain_max];
        }
        let spacing = self.tick_spacing.max(span / MAX_TICKS as f64);
        // Computed from the start, not accumulated.
        let count = (span / spacing + 1e-9).floor() as usize;
        (0..=count)
            .map(|i| self.slider_min + i as f64 * spacing)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn partial_file_fills_in_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "dataset_path": "launches.parquet", "tick_spacing": 2500 }}"#).unwrap();

        let config = DashboardConfig::try_load(file.path()).unwrap();
        assert_eq!(config.dataset_path, PathBuf::from("launches.parquet"));
        assert_eq!(config.tick_spacing, 2500.0);
        assert_eq!(config.slider_max, 10000.0);
    }

    #[test]
    fn missing_file_means_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = DashboardConfig::try_load(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(DashboardConfig::try_load(file.path()).is_err());
    }

    #[test]
    fn default_ticks_every_two_tonnes() {
        let config = DashboardConfig::default();
        assert_eq!(
            config.ticks(config.slider_max),
            [0.0, 2000.0, 4000.0, 6000.0, 8000.0, 10000.0]
        );
    }

    #[test]
    fn tiny_spacing_is_widened() {
        let config = DashboardConfig {
            tick_spacing: 0.001,
            ..DashboardConfig::default()
        };
        let ticks = config.ticks(10000.0);
        assert_eq!(ticks.len(), MAX_TICKS + 1);
        assert_eq!(ticks.first(), Some(&0.0));
        assert_eq!(ticks.last(), Some(&10000.0));
    }

    #[test]
    fn fractional_spacing_keeps_last_tick() {
        let config = DashboardConfig {
            slider_min: 0.0,
            tick_spacing: 0.1,
            ..DashboardConfig::default()
        };
        let ticks = config.ticks(1.0);
        assert_eq!(ticks.len(), 11);
        assert!((ticks[10] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_spacing_falls_back_to_ends() {
        let config = DashboardConfig {
            tick_spacing: 0.0,
            ..DashboardConfig::default()
        };
        assert_eq!(config.ticks(10000.0), [0.0, 10000.0]);

        let config = DashboardConfig {
            tick_spacing: f64::NAN,
            ..DashboardConfig::default()
        };
        assert_eq!(config.ticks(10000.0), [0.0, 10000.0]);
    }
}
