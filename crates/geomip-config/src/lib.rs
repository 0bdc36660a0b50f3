//! Configuration for the geomipmapped terrain.
//!
//! Settings persist to disk as RON, can be overridden from the command line,
//! and tolerate missing or unknown fields so old files keep loading.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{CONFIG_FILE, Config, DebugConfig, LodConfig, TerrainConfig, default_config_dir};
pub use error::ConfigError;
