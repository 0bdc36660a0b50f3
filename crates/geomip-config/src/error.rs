//! Errors raised while reading, writing or validating `config.ron`.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("cannot serialize config: {0}")]
    Serialize(#[from] ron::Error),

    /// A LOD setting that would make the error tolerance meaningless.
    #[error("lod.{name} must be positive and finite, got {value}")]
    InvalidLod { name: &'static str, value: f32 },
}
