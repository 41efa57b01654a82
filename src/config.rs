//! Startup configuration for the dashboard.
//!
//! Built once in `main` and passed by reference to the presentation layer.
//! Read from the JSON file named by `TIPS_DASHBOARD_CONFIG`, else from
//! `tips_dashboard.json` in the working directory, else defaults. Missing
//! fields take their default value.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::filter::{Interval, DEFAULT_BILL_RANGE, DEFAULT_SIZE_RANGE};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "TIPS_DASHBOARD_CONFIG";

/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "tips_dashboard.json";

/// Slider limits for a range control.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderBounds<T> {
    pub min: T,
    pub max: T,
}

impl<T: Copy + PartialOrd> SliderBounds<T> {
    /// Widen the bounds, if needed, so `range` lies inside them.
    pub fn covering(self, range: Interval<T>) -> Self {
        let (lo, hi) = if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        };
        Self {
            min: if range.min < lo { range.min } else { lo },
            max: if range.max > hi { range.max } else { hi },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Window title.
    pub title: String,
    /// Dataset file (.csv, .json or .parquet).
    pub data_path: PathBuf,
    /// How often the dataset file is checked for changes.
    pub reload_interval_ms: u64,
    pub bill_slider: SliderBounds<f64>,
    pub size_slider: SliderBounds<u32>,
    /// Prefix for money amounts.
    pub currency_symbol: String,
    /// Scatter point radius in pixels.
    pub point_radius: f32,
    pub window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "Restaurant Tipping Analysis".to_string(),
            data_path: PathBuf::from("tips.csv"),
            reload_interval_ms: 1000,
            bill_slider: SliderBounds {
                min: 10.0,
                max: 50.0,
            },
            size_slider: SliderBounds { min: 1, max: 6 },
            currency_symbol: "$".to_string(),
            point_radius: 3.0,
            window_size: [1200.0, 800.0],
        }
    }
}

impl DashboardConfig {
    /// Parse a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config.normalized())
    }

    /// Slider bounds always contain the ranges that reset restores.
    fn normalized(mut self) -> Self {
        let bill = self.bill_slider.covering(DEFAULT_BILL_RANGE);
        if bill != self.bill_slider {
            log::warn!(
                "bill_slider {:?} widened to {bill:?} to fit the default range",
                self.bill_slider
            );
            self.bill_slider = bill;
        }
        let size = self.size_slider.covering(DEFAULT_SIZE_RANGE);
        if size != self.size_slider {
            log::warn!(
                "size_slider {:?} widened to {size:?} to fit the default range",
                self.size_slider
            );
            self.size_slider = size;
        }
        self
    }

    /// Resolve and load the config, falling back to defaults.
    pub fn load_or_default() -> Self {
        let explicit = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
        let path = match explicit {
            Some(p) => p,
            None => {
                let local = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !local.is_file() {
                    return Self::default();
                }
                local
            }
        };

        match Self::load(&path) {
            Ok(config) => {
                log::info!("Using config {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring config: {e:#}");
                Self::default()
            }
        }
    }

    pub fn reload_interval(&self) -> Duration {
        Duration::from_millis(self.reload_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: DashboardConfig =
            serde_json::from_str(r#"{ "data_path": "data/tips.parquet", "currency_symbol": "€" }"#)
                .unwrap();
        assert_eq!(config.data_path, PathBuf::from("data/tips.parquet"));
        assert_eq!(config.currency_symbol, "€");
        assert_eq!(config.reload_interval(), Duration::from_secs(1));
        assert_eq!(config.size_slider, SliderBounds { min: 1, max: 6 });
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "title": "Tips", "bill_slider": {{ "min": 0.0, "max": 60.0 }} }}"#)
            .unwrap();

        let config = DashboardConfig::load(file.path()).unwrap();
        assert_eq!(config.title, "Tips");
        assert_eq!(config.bill_slider.max, 60.0);
    }

    #[test]
    fn test_narrow_slider_bounds_are_widened_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "bill_slider": {{ "min": 20.0, "max": 40.0 }}, "size_slider": {{ "min": 2, "max": 8 }} }}"#
        )
        .unwrap();

        let config = DashboardConfig::load(file.path()).unwrap();
        assert_eq!(config.bill_slider, SliderBounds { min: 10.0, max: 50.0 });
        assert_eq!(config.size_slider, SliderBounds { min: 1, max: 8 });
    }

    #[test]
    fn test_covering_keeps_wider_bounds() {
        let wide = SliderBounds { min: 0.0, max: 60.0 };
        assert_eq!(wide.covering(DEFAULT_BILL_RANGE), wide);
    }

    #[test]
    fn test_load_malformed_file_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(DashboardConfig::load(file.path()).is_err());
    }
}
