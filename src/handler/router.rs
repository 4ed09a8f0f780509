//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, dispatch to
//! the media or plain static responder, CORS injection and access logging.

use crate::config::AppState;
use crate::error::MediaError;
use crate::handler::{media, static_files};
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body as _, Bytes};
use hyper::header::{RANGE, REFERER, USER_AGENT};
use hyper::{Method, Request, Response, StatusCode, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Request context encapsulating information needed for request processing
#[derive(Debug, Clone)]
pub struct RequestContext<'a> {
    pub method: Method,
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub is_head: bool,
    pub range_header: Option<&'a str>,
}

impl<'a> RequestContext<'a> {
    /// Extract the fields the responders need from a request
    pub fn from_request<B>(req: &'a Request<B>) -> Self {
        let method = req.method().clone();
        Self {
            is_head: method == Method::HEAD,
            method,
            path: req.uri().path(),
            query: req.uri().query(),
            range_header: req.headers().get(RANGE).and_then(|v| v.to_str().ok()),
        }
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let ctx = RequestContext::from_request(&req);

    let response = respond(&ctx, &state).await;

    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::new(
            peer_addr.ip().to_string(),
            ctx.method.to_string(),
            ctx.path.to_string(),
        );
        entry.query = ctx.query.map(ToString::to_string);
        entry.http_version = version_label(req.version()).to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = response.body().size_hint().exact().unwrap_or_default();
        entry.referer = header_string(&req, REFERER);
        entry.user_agent = header_string(&req, USER_AGENT);
        entry.range = ctx.range_header.map(ToString::to_string);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Produce the response for a request, CORS headers included
pub async fn respond(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    let mut response = dispatch(ctx, state).await;
    http::apply_cors(&mut response);
    response
}

async fn dispatch(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    match ctx.method {
        Method::GET | Method::HEAD => {}
        Method::OPTIONS => return http::build_options_response(),
        _ => {
            logger::log_warning(&format!("Method not allowed: {}", ctx.method));
            return http::build_405_response();
        }
    }

    if state.config.media.is_audio(ctx.path) {
        media::serve_media(ctx, state).await
    } else {
        static_files::serve_static(ctx, state).await
    }
}

/// Surface a responder failure as its HTTP status
///
/// Only server-side failures are logged; a missing file is routine.
pub(crate) fn error_response(ctx: &RequestContext<'_>, err: &MediaError) -> Response<Full<Bytes>> {
    match err.status() {
        StatusCode::NOT_FOUND => http::build_404_response(),
        _ => {
            logger::log_error(&format!("{} {}: {err}", ctx.method, ctx.path));
            http::build_500_response(&err.to_string())
        }
    }
}

fn header_string<B>(req: &Request<B>, name: hyper::header::HeaderName) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

const fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::testing::{body_bytes, clip, context, state_for};

    fn assert_cors(resp: &Response<Full<Bytes>>) {
        assert_eq!(resp.headers()["Access-Control-Allow-Origin"], "*");
        assert_eq!(resp.headers()["Access-Control-Allow-Methods"], "GET, OPTIONS");
        assert_eq!(resp.headers()["Access-Control-Allow-Headers"], "*");
    }

    #[tokio::test]
    async fn test_audio_goes_to_media_responder() {
        let (dir, data) = clip(1000);
        let state = state_for(&dir);
        let resp = respond(&context(Method::GET, "/clip.mp3", Some("bytes=200-299")), &state).await;
        assert_eq!(resp.status(), StatusCode::PARTIAL_CONTENT);
        assert_cors(&resp);
        assert_eq!(&body_bytes(resp).await[..], &data[200..300]);
    }

    #[tokio::test]
    async fn test_other_files_ignore_range() {
        let (dir, _) = clip(10);
        std::fs::write(dir.path().join("notes.txt"), "hello world").unwrap();
        let state = state_for(&dir);
        let resp = respond(&context(Method::GET, "/notes.txt", Some("bytes=0-1")), &state).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_cors(&resp);
        assert_eq!(&body_bytes(resp).await[..], b"hello world");
    }

    #[tokio::test]
    async fn test_cors_on_every_outcome() {
        let (dir, _) = clip(1000);
        let state = state_for(&dir);
        let cases = [
            (Method::GET, "/clip.mp3", None, StatusCode::OK),
            (Method::GET, "/missing.mp3", None, StatusCode::NOT_FOUND),
            (Method::GET, "/missing.html", None, StatusCode::NOT_FOUND),
            (Method::GET, "/clip.mp3", Some("bytes=x-1"), StatusCode::INTERNAL_SERVER_ERROR),
            (Method::GET, "/clip.mp3", Some("bytes=5000-"), StatusCode::RANGE_NOT_SATISFIABLE),
            (Method::OPTIONS, "/clip.mp3", None, StatusCode::NO_CONTENT),
            (Method::POST, "/clip.mp3", None, StatusCode::METHOD_NOT_ALLOWED),
        ];
        for (method, path, range, expected) in cases {
            let resp = respond(&context(method, path, range), &state).await;
            assert_eq!(resp.status(), expected, "{path} {range:?}");
            assert_cors(&resp);
        }
    }

    #[test]
    fn test_context_from_request() {
        let req = Request::builder()
            .method(Method::HEAD)
            .uri("/sounds/a%20b.mp3?v=1")
            .header("Range", "bytes=0-")
            .body(())
            .unwrap();
        let ctx = RequestContext::from_request(&req);
        assert!(ctx.is_head);
        assert_eq!(ctx.path, "/sounds/a%20b.mp3");
        assert_eq!(ctx.query, Some("v=1"));
        assert_eq!(ctx.range_header, Some("bytes=0-"));
    }

    #[test]
    fn test_version_label() {
        assert_eq!(version_label(Version::HTTP_11), "1.1");
        assert_eq!(version_label(Version::HTTP_10), "1.0");
    }

    #[tokio::test]
    async fn test_error_response_follows_status() {
        let ctx = context(Method::GET, "/clip.mp3", None);

        let resp = error_response(&ctx, &MediaError::NotFound);
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let err = MediaError::Io(std::io::Error::other("disk on fire"));
        let resp = error_response(&ctx, &err);
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            &body_bytes(resp).await[..],
            b"500 Internal Server Error: disk on fire"
        );
    }
}
