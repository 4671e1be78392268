//! Configuration and model directory resolution.

use std::path::{Path, PathBuf};

/// Environment variable overriding the model directory.
pub const MODEL_DIR_ENV: &str = "PRECIS_MODEL_DIR";

/// Default model directory, relative to the working directory.
pub const DEFAULT_MODEL_DIR: &str = "models/bart-cnn";

/// Top-level precis configuration.
#[derive(Debug, Clone)]
pub struct PrecisConfig {
    /// Directory holding the ONNX summarization model and tokenizer.
    pub model_dir: PathBuf,
}

impl PrecisConfig {
    /// Create configuration from environment and defaults.
    ///
    /// Resolution order: the explicit override, then `PRECIS_MODEL_DIR`,
    /// then `models/bart-cnn` in the working directory.
    pub fn from_env(override_dir: Option<&Path>) -> Self {
        let model_dir = override_dir
            .map(Path::to_path_buf)
            .or_else(|| std::env::var(MODEL_DIR_ENV).ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_DIR));

        Self { model_dir }
    }
}
