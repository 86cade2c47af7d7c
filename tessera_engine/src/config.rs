//! Engine configuration

use std::path::PathBuf;
use crate::log::LogSeverity;

/// Engine configuration
///
/// Passed to `EngineContext::new`. Every field has a usable default.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Directory that scene texture paths are resolved against
    pub texture_dir: PathBuf,
    /// Instance buffer capacity used when the caller does not give one
    pub default_instance_capacity: usize,
    /// Character set enumerated by glyph atlases (e.g., "ISO-8859-1")
    pub charset: String,
    /// Minimum severity forwarded to the global logger
    pub log_severity: LogSeverity,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            texture_dir: PathBuf::from("textures"),
            default_instance_capacity: 64,
            charset: "ISO-8859-1".to_string(),
            log_severity: if cfg!(debug_assertions) {
                LogSeverity::Debug
            } else {
                LogSeverity::Info
            },
        }
    }
}

impl EngineConfig {
    /// Override the texture directory
    pub fn with_texture_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.texture_dir = dir.into();
        self
    }

    /// Override the default instance capacity
    pub fn with_instance_capacity(mut self, capacity: usize) -> Self {
        self.default_instance_capacity = capacity;
        self
    }

    /// Override the glyph atlas character set
    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = charset.into();
        self
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
