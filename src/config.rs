//! Tunable parameters of the analytics pipeline.
//!
//! The configuration is plain serializable data so it can be loaded from
//! JSON, or TOML with the `toml` feature.

use serde::de::Error;
use serde::{Deserialize, Serialize};

/// Upper bound for [`Config::resample_frequency`].
pub const MAX_RESAMPLE_FREQUENCY: usize = 10_000;

/// Upper bound for [`Config::density_grid_size`].
pub const MAX_DENSITY_GRID_SIZE: usize = 4096;

/// Pipeline configuration
///
/// # Example
///
/// ```rust
/// use chronograph::Config;
///
/// // Create default config
/// let config = Config::default();
/// assert_eq!(config.resample_frequency, 10);
///
/// // Load from JSON
/// let json = r#"{
///     "resample_frequency": 4,
///     "auto_pin_count": 5
/// }"#;
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.resample_frequency, 4);
/// assert_eq!(config.density_grid_size, 64);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Evenly spaced subdivisions inserted per original interval pair
    #[serde(default = "Config::default_resample_frequency")]
    pub resample_frequency: usize,

    /// Number of highest-movement entities pinned on first load of a dataset
    #[serde(default = "Config::default_auto_pin_count")]
    pub auto_pin_count: usize,

    /// Gaussian kernel bandwidth for density estimation, in coordinate units
    #[serde(default = "Config::default_density_bandwidth")]
    pub density_bandwidth: f64,

    /// Number of cells per side of the density lattice (0 disables density)
    #[serde(default = "Config::default_density_grid_size")]
    pub density_grid_size: usize,

    /// Merge touching common-activity intervals into one
    #[serde(default)]
    pub merge_adjacent_intervals: bool,
}

impl Config {
    const fn default_resample_frequency() -> usize {
        10
    }

    const fn default_auto_pin_count() -> usize {
        3
    }

    const fn default_density_bandwidth() -> f64 {
        1.0
    }

    const fn default_density_grid_size() -> usize {
        64
    }

    pub fn with_resample_frequency(mut self, frequency: usize) -> Self {
        assert!(frequency > 0, "Resample frequency must be greater than zero");
        assert!(
            frequency <= MAX_RESAMPLE_FREQUENCY,
            "Resample frequency must not exceed {}",
            MAX_RESAMPLE_FREQUENCY
        );
        self.resample_frequency = frequency;
        self
    }

    pub fn with_auto_pin_count(mut self, count: usize) -> Self {
        self.auto_pin_count = count;
        self
    }

    pub fn with_density_bandwidth(mut self, bandwidth: f64) -> Self {
        assert!(
            bandwidth.is_finite() && bandwidth > 0.0,
            "Density bandwidth must be positive and finite"
        );
        self.density_bandwidth = bandwidth;
        self
    }

    pub fn with_density_grid_size(mut self, size: usize) -> Self {
        self.density_grid_size = size;
        self
    }

    pub fn with_merge_adjacent_intervals(mut self, merge: bool) -> Self {
        self.merge_adjacent_intervals = merge;
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.resample_frequency == 0 {
            return Err("Resample frequency must be greater than zero".to_string());
        }
        if self.resample_frequency > MAX_RESAMPLE_FREQUENCY {
            return Err(format!(
                "Resample frequency must not exceed {}",
                MAX_RESAMPLE_FREQUENCY
            ));
        }
        if self.density_grid_size > MAX_DENSITY_GRID_SIZE {
            return Err(format!(
                "Density grid size must not exceed {}",
                MAX_DENSITY_GRID_SIZE
            ));
        }

        if !self.density_bandwidth.is_finite() {
            return Err("Density bandwidth must be finite (not NaN or infinity)".to_string());
        }
        if self.density_bandwidth <= 0.0 {
            return Err("Density bandwidth must be positive".to_string());
        }

        Ok(())
    }

    /// Load configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(serde_json::Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load configuration from TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resample_frequency: Self::default_resample_frequency(),
            auto_pin_count: Self::default_auto_pin_count(),
            density_bandwidth: Self::default_density_bandwidth(),
            density_grid_size: Self::default_density_grid_size(),
            merge_adjacent_intervals: false,
        }
    }
}
