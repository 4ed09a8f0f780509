// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::http::mime;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub media: MediaConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Media serving configuration
#[derive(Debug, Deserialize, Clone)]
pub struct MediaConfig {
    /// Directory files are served from
    pub root: String,
    /// Extensions (without dot) answered by the media responder
    pub audio_extensions: Vec<String>,
    /// Content types for audio extensions that differ from the fallback
    #[serde(default)]
    pub content_types: HashMap<String, String>,
    /// Content type for audio extensions missing from `content_types`
    pub fallback_content_type: String,
    /// Files tried when a directory is requested
    pub index_files: Vec<String>,
}

impl MediaConfig {
    /// Whether `path` names a file the media responder handles
    ///
    /// Matching is case-sensitive: `clip.MP3` goes to the plain responder.
    pub fn is_audio(&self, path: &str) -> bool {
        Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.audio_extensions.iter().any(|a| a == ext))
    }

    /// Content type advertised for an audio file
    pub fn audio_content_type(&self, path: &Path) -> &str {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
        mime::audio_content_type(ext, &self.content_types, &self.fallback_content_type)
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    /// Seconds an idle connection may wait for its next request head; 0 disables keep-alive
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    /// Connections beyond this many are closed on accept
    pub max_connections: Option<u64>,
}
