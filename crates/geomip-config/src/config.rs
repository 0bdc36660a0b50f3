//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level terrain configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Height field size and procedural generation settings.
    pub terrain: TerrainConfig,
    /// Level-of-detail error tolerance.
    pub lod: LodConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Height field layout and the fBm parameters used to fill it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainConfig {
    /// Samples per side of the whole height field (`k * (block_size - 1) + 1`).
    pub dimension: u32,
    /// Vertices per block side (`2^n + 1`).
    pub block_size: u32,
    /// Number of mip levels per block. `None` uses every level the block size allows.
    pub mip_levels: Option<u32>,
    /// World distance between neighbouring samples.
    pub spacing: f32,
    /// Repeat count of the detail texture across the whole field.
    pub detail_scale: f32,
    /// Noise seed.
    pub seed: u32,
    /// Number of fBm octaves.
    pub octaves: u32,
    /// Amplitude of the first octave, in world units.
    pub amplitude: f64,
    /// Frequency of the first octave, in cycles per sample.
    pub base_frequency: f64,
    /// Frequency multiplier between octaves.
    pub lacunarity: f64,
    /// Amplitude multiplier between octaves.
    pub persistence: f64,
}

/// Screen-space error settings used to derive the tolerance factor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LodConfig {
    /// Largest acceptable geometric error on screen, in pixels.
    pub pixel_error: f32,
    /// Vertical resolution of the viewport in pixels.
    pub vertical_resolution: u32,
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    /// Clamp neighbouring blocks to at most one level of difference.
    pub balance: bool,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Directory for JSON log files in debug builds.
    pub log_dir: Option<PathBuf>,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            dimension: 257,
            block_size: 17,
            mip_levels: None,
            spacing: 1.0,
            detail_scale: 16.0,
            seed: 0,
            octaves: 6,
            amplitude: 40.0,
            base_frequency: 0.01,
            lacunarity: 2.0,
            persistence: 0.5,
        }
    }
}

impl Default for LodConfig {
    fn default() -> Self {
        Self {
            pixel_error: 4.0,
            vertical_resolution: 720,
            fov_y_degrees: 60.0,
            balance: true,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: None,
        }
    }
}

impl LodConfig {
    /// Squared error scale `C²` fed to the per-block error metric.
    ///
    /// `C = A / T` where `A = 1 / tan(fov_y / 2)` and
    /// `T = 2 * pixel_error / vertical_resolution`.
    pub fn tolerance_factor(&self) -> f32 {
        let a = 1.0 / (self.fov_y_degrees.to_radians() * 0.5).tan();
        let t = 2.0 * self.pixel_error / self.vertical_resolution as f32;
        let c = a / t;
        c * c
    }
}

/// Default location of `config.ron`, falling back to the working directory.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("geomip"))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// File name of the persisted config inside the config directory.
pub const CONFIG_FILE: &str = "config.ron";

impl LodConfig {
    /// Reject settings that give a zero, negative or infinite tolerance.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("pixel_error", self.pixel_error),
            ("vertical_resolution", self.vertical_resolution as f32),
            ("fov_y_degrees", self.fov_y_degrees),
        ];
        for (name, value) in checks {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidLod { name, value });
            }
        }
        if self.fov_y_degrees >= 180.0 {
            return Err(ConfigError::InvalidLod {
                name: "fov_y_degrees",
                value: self.fov_y_degrees,
            });
        }
        Ok(())
    }
}

impl Config {
    /// Read `config.ron` from `config_dir`, writing the defaults there first
    /// if it does not exist yet.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = config_dir.join(CONFIG_FILE);
        if !path.exists() {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Wrote default terrain config to {}", path.display());
            return Ok(config);
        }

        let config = Self::read(&path)?;
        log::info!("Loaded terrain config from {}", path.display());
        Ok(config)
    }

    /// Write this config to `config_dir/config.ron`, creating the directory.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        let path = config_dir.join(CONFIG_FILE);
        let write_error = |source| ConfigError::Write {
            path: path.clone(),
            source,
        };
        std::fs::create_dir_all(config_dir).map_err(write_error)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let serialized = ron::ser::to_string_pretty(self, pretty)?;
        std::fs::write(&path, serialized).map_err(write_error)
    }

    /// Re-read the file; `Some` only when it differs from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let reloaded = Self::read(&config_dir.join(CONFIG_FILE))?;
        if &reloaded == self {
            return Ok(None);
        }
        log::info!("Terrain config changed on disk");
        Ok(Some(reloaded))
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = ron::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.lod.validate()?;
        Ok(config)
    }
}
