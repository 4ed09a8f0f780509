// Shared fixtures for handler tests

use crate::config::{AppState, Config};
use crate::handler::router::RequestContext;
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{Method, Response};
use tempfile::TempDir;

/// Temp root holding `clip.mp3` of `size` bytes with a position-dependent pattern
pub fn clip(size: usize) -> (TempDir, Vec<u8>) {
    let dir = tempfile::tempdir().unwrap();
    let data: Vec<u8> = (0..size).map(|i| (i % 251) as u8).collect();
    std::fs::write(dir.path().join("clip.mp3"), &data).unwrap();
    (dir, data)
}

pub fn state_for(dir: &TempDir) -> AppState {
    let mut config = Config::from_toml_str("").unwrap();
    config.media.root = dir.path().to_string_lossy().into_owned();
    config.logging.access_log = false;
    AppState::new(config).unwrap()
}

pub fn context<'a>(method: Method, path: &'a str, range: Option<&'a str>) -> RequestContext<'a> {
    RequestContext {
        is_head: method == Method::HEAD,
        method,
        path,
        query: None,
        range_header: range,
    }
}

pub async fn body_bytes(resp: Response<Full<Bytes>>) -> Bytes {
    resp.into_body().collect().await.unwrap().to_bytes()
}
