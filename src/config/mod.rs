// Configuration module entry point
// Loads the layered configuration and owns the shared application state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{Config, LoggingConfig, MediaConfig, PerformanceConfig, ServerConfig};

/// Default config file name (extension resolved by the `config` crate)
pub const DEFAULT_CONFIG_PATH: &str = "config";

/// Environment prefix, e.g. `SOUND__SERVER__PORT=9000`
const ENV_PREFIX: &str = "SOUND";

type Builder = config::ConfigBuilder<config::builder::DefaultState>;

impl Config {
    /// Load configuration from specified file path (without extension)
    ///
    /// The file is optional; environment variables override it and every key
    /// has a default.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("media.audio_extensions")
                    .with_list_parse_key("media.index_files"),
            );

        with_defaults(builder)?.build()?.try_deserialize()
    }

    /// Load configuration from TOML text layered over the defaults
    pub fn from_toml_str(toml: &str) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml));

        with_defaults(builder)?.build()?.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

fn with_defaults(builder: Builder) -> Result<Builder, config::ConfigError> {
    builder
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 8000)?
        .set_default("media.root", ".")?
        .set_default("media.audio_extensions", vec!["mp3", "wav", "ogg"])?
        .set_default("media.content_types.mp3", "audio/mpeg")?
        .set_default("media.fallback_content_type", "audio/wav")?
        .set_default("media.index_files", vec!["index.html", "index.htm"])?
        .set_default("logging.level", "info")?
        .set_default("logging.access_log", true)?
        .set_default("logging.access_log_format", "combined")?
        .set_default("performance.keep_alive_timeout", 75)?
        .set_default("performance.read_timeout", 30)?
        .set_default("performance.write_timeout", 30)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_defaults() {
        let cfg = Config::from_toml_str("").unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 8000);
        assert_eq!(cfg.server.workers, None);
        assert_eq!(cfg.media.root, ".");
        assert_eq!(cfg.media.audio_extensions, vec!["mp3", "wav", "ogg"]);
        assert_eq!(cfg.media.fallback_content_type, "audio/wav");
        assert_eq!(cfg.logging.access_log_format, "combined");
        assert_eq!(cfg.performance.max_connections, None);
        assert_eq!(
            cfg.get_socket_addr().unwrap(),
            "127.0.0.1:8000".parse().unwrap()
        );
    }

    #[test]
    fn test_file_overrides_defaults() {
        let cfg = Config::from_toml_str(
            r#"
            [server]
            port = 9100
            workers = 2

            [media]
            root = "public"
            audio_extensions = ["mp3", "flac"]

            [media.content_types]
            flac = "audio/flac"

            [performance]
            max_connections = 64
            "#,
        )
        .unwrap();

        assert_eq!(cfg.server.port, 9100);
        assert_eq!(cfg.server.workers, Some(2));
        assert_eq!(cfg.media.root, "public");
        assert!(cfg.media.is_audio("/song.flac"));
        assert!(!cfg.media.is_audio("/song.ogg"));
        assert_eq!(cfg.media.audio_content_type(Path::new("a.flac")), "audio/flac");
        // Defaulted table entries survive alongside file entries
        assert_eq!(cfg.media.audio_content_type(Path::new("a.mp3")), "audio/mpeg");
        assert_eq!(cfg.performance.max_connections, Some(64));
    }

    #[test]
    fn test_audio_recognition() {
        let cfg = Config::from_toml_str("").unwrap();
        assert!(cfg.media.is_audio("/sounds/menu-music.mp3"));
        assert!(cfg.media.is_audio("/a.wav"));
        assert!(cfg.media.is_audio("/a.ogg"));
        assert!(!cfg.media.is_audio("/index.html"));
        assert!(!cfg.media.is_audio("/clip.MP3"));
        assert!(!cfg.media.is_audio("/mp3"));
    }

    #[test]
    fn test_audio_content_type_fallback() {
        let cfg = Config::from_toml_str("").unwrap();
        assert_eq!(cfg.media.audio_content_type(Path::new("x.mp3")), "audio/mpeg");
        assert_eq!(cfg.media.audio_content_type(Path::new("x.wav")), "audio/wav");
        assert_eq!(cfg.media.audio_content_type(Path::new("x.ogg")), "audio/wav");
    }

    #[test]
    fn test_invalid_host() {
        let mut cfg = Config::from_toml_str("").unwrap();
        cfg.server.host = "not a host".to_string();
        assert!(cfg.get_socket_addr().is_err());
    }
}
