//! Request path resolution
//!
//! Maps a URL path onto a file under the media root.

use crate::error::MediaError;
use crate::logger;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Resolve `request_path` against the canonical `root`
///
/// The path is percent-decoded and stripped of leading `/` before joining.
/// Anything that does not exist, or that canonicalizes to a location outside
/// `root`, is `NotFound`.
pub async fn resolve(root: &Path, request_path: &str) -> Result<PathBuf, MediaError> {
    let Ok(decoded) = urlencoding::decode(request_path) else {
        return Err(MediaError::NotFound);
    };
    let relative = decoded.trim_start_matches('/');

    let canonical = fs::canonicalize(root.join(relative))
        .await
        .map_err(MediaError::from_io)?;

    if !canonical.starts_with(root) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {request_path} -> {}",
            canonical.display()
        ));
        return Err(MediaError::NotFound);
    }

    Ok(canonical)
}
