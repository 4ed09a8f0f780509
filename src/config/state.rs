// Application state module
// Read-only per-process state shared by every connection

use std::io;
use std::path::PathBuf;

use super::types::Config;

/// Application state
///
/// Built once at startup and shared behind an `Arc`. Nothing in it is
/// mutated after construction, so requests never contend on it.
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    /// Canonical form of `config.media.root`
    pub root: PathBuf,
}

impl AppState {
    /// Create `AppState`, resolving the media root
    ///
    /// Fails if the root directory does not exist.
    pub fn new(config: Config) -> io::Result<Self> {
        let root = PathBuf::from(&config.media.root).canonicalize()?;
        if !root.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Media root is not a directory: {}", root.display()),
            ));
        }
        Ok(Self { config, root })
    }
}
