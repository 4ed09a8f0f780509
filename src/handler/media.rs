//! Static media responder
//!
//! Answers requests for recognized audio files with either the whole file
//! (200) or the requested byte span (206).

use crate::config::AppState;
use crate::error::MediaError;
use crate::handler::path;
use crate::handler::router::{self, RequestContext};
use crate::http::{self, response, RangeParseResult};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::io::SeekFrom;
use std::path::Path;
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

/// Serve an audio file, mapping failures onto 404/500
pub async fn serve_media(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    match respond(ctx, state).await {
        Ok(resp) => resp,
        Err(e) => router::error_response(ctx, &e),
    }
}

async fn respond(
    ctx: &RequestContext<'_>,
    state: &AppState,
) -> Result<Response<Full<Bytes>>, MediaError> {
    let file_path = path::resolve(&state.root, ctx.path).await?;
    let metadata = fs::metadata(&file_path)
        .await
        .map_err(MediaError::from_io)?;
    if !metadata.is_file() {
        return Err(MediaError::NotFound);
    }

    let total_size = metadata.len();
    let content_type = state.config.media.audio_content_type(&file_path);

    match http::parse_range_header(ctx.range_header, total_size) {
        RangeParseResult::Full => {
            let body = if ctx.is_head {
                Bytes::new()
            } else {
                read_span(&file_path, 0, total_size).await?
            };
            Ok(response::build_full_response(
                body,
                content_type,
                total_size,
                true,
            ))
        }
        RangeParseResult::Range(range) => {
            let body = if ctx.is_head {
                Bytes::new()
            } else {
                read_span(&file_path, range.start, range.len()).await?
            };
            Ok(response::build_partial_response(
                body,
                content_type,
                range,
                total_size,
            ))
        }
        RangeParseResult::NotSatisfiable => Ok(http::build_416_response(total_size)),
        RangeParseResult::Invalid(reason) => Err(MediaError::MalformedRange(reason)),
    }
}

/// Read exactly `len` bytes starting at `start`
///
/// The file handle lives only for the duration of this call.
pub async fn read_span(file_path: &Path, start: u64, len: u64) -> Result<Bytes, MediaError> {
    let mut file = fs::File::open(file_path)
        .await
        .map_err(MediaError::from_io)?;
    if start > 0 {
        file.seek(SeekFrom::Start(start)).await?;
    }

    let mut buf = Vec::with_capacity(usize::try_from(len).unwrap_or_default());
    file.take(len).read_to_end(&mut buf).await?;

    if u64::try_from(buf.len()).ok() != Some(len) {
        return Err(MediaError::Io(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            format!(
                "expected {len} bytes at offset {start} of {}, read {}",
                file_path.display(),
                buf.len()
            ),
        )));
    }

    Ok(Bytes::from(buf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::testing::{body_bytes, clip, context, state_for};
    use hyper::{Method, StatusCode};

    #[tokio::test]
    async fn test_full_file() {
        let (dir, data) = clip(1000);
        let state = state_for(&dir);
        let ctx = context(Method::GET, "/clip.mp3", None);

        let resp = serve_media(&ctx, &state).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["Content-Type"], "audio/mpeg");
        assert_eq!(resp.headers()["Content-Length"], "1000");
        assert_eq!(resp.headers()["Accept-Ranges"], "bytes");
        assert!(resp.headers().get("Content-Range").is_none());
        assert_eq!(&body_bytes(resp).await[..], &data[..]);
    }

    #[tokio::test]
    async fn test_partial_clip() {
        let (dir, data) = clip(1000);
        let state = state_for(&dir);
        let ctx = context(Method::GET, "/clip.mp3", Some("bytes=200-299"));

        let resp = serve_media(&ctx, &state).await;
        assert_eq!(resp.status(), StatusCode::PARTIAL_CONTENT);
        assert_eq!(resp.headers()["Content-Length"], "100");
        assert_eq!(resp.headers()["Content-Range"], "bytes 200-299/1000");
        assert_eq!(resp.headers()["Accept-Ranges"], "bytes");
        assert_eq!(&body_bytes(resp).await[..], &data[200..=299]);
    }

    #[tokio::test]
    async fn test_empty_start_reads_from_zero() {
        let (dir, data) = clip(1000);
        let state = state_for(&dir);
        let ctx = context(Method::GET, "/clip.mp3", Some("bytes=-100"));

        let resp = serve_media(&ctx, &state).await;
        assert_eq!(resp.status(), StatusCode::PARTIAL_CONTENT);
        assert_eq!(resp.headers()["Content-Range"], "bytes 0-100/1000");
        assert_eq!(resp.headers()["Content-Length"], "101");
        assert_eq!(&body_bytes(resp).await[..], &data[..=100]);
    }

    #[tokio::test]
    async fn test_open_ended_range() {
        let (dir, data) = clip(1000);
        let state = state_for(&dir);
        let ctx = context(Method::GET, "/clip.mp3", Some("bytes=990-"));

        let resp = serve_media(&ctx, &state).await;
        assert_eq!(resp.headers()["Content-Range"], "bytes 990-999/1000");
        assert_eq!(&body_bytes(resp).await[..], &data[990..]);
    }

    #[tokio::test]
    async fn test_wav_content_type_fallback() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("shot.ogg"), [1u8, 2, 3]).unwrap();
        let state = state_for(&dir);

        let resp = serve_media(&context(Method::GET, "/shot.ogg", None), &state).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["Content-Type"], "audio/wav");
    }

    #[tokio::test]
    async fn test_missing_file_is_404() {
        let (dir, _) = clip(10);
        let state = state_for(&dir);
        let resp = serve_media(&context(Method::GET, "/missing.mp3", None), &state).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unresolvable_audio_paths_are_404() {
        let (dir, _) = clip(10);
        let state = state_for(&dir);

        for path in ["/clip.mp3/other.mp3", "/a%00.mp3"] {
            let resp = serve_media(&context(Method::GET, path, None), &state).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{path}");
        }
    }

    #[tokio::test]
    async fn test_directory_named_like_audio_is_404() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("album.mp3")).unwrap();
        let state = state_for(&dir);
        let resp = serve_media(&context(Method::GET, "/album.mp3", None), &state).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_range_is_500() {
        let (dir, _) = clip(1000);
        let state = state_for(&dir);
        let ctx = context(Method::GET, "/clip.mp3", Some("bytes=abc-def"));

        let resp = serve_media(&ctx, &state).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_bytes(resp).await;
        let text = String::from_utf8_lossy(&body);
        assert!(text.contains("invalid range start 'abc'"), "{text}");
    }

    #[tokio::test]
    async fn test_unsatisfiable_range_is_416() {
        let (dir, _) = clip(1000);
        let state = state_for(&dir);
        let ctx = context(Method::GET, "/clip.mp3", Some("bytes=2000-"));

        let resp = serve_media(&ctx, &state).await;
        assert_eq!(resp.status(), StatusCode::RANGE_NOT_SATISFIABLE);
        assert_eq!(resp.headers()["Content-Range"], "bytes */1000");
    }

    #[tokio::test]
    async fn test_head_has_headers_without_body() {
        let (dir, _) = clip(1000);
        let state = state_for(&dir);

        let resp = serve_media(&context(Method::HEAD, "/clip.mp3", None), &state).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["Content-Length"], "1000");
        assert!(body_bytes(resp).await.is_empty());

        let ctx = context(Method::HEAD, "/clip.mp3", Some("bytes=0-9"));
        let resp = serve_media(&ctx, &state).await;
        assert_eq!(resp.status(), StatusCode::PARTIAL_CONTENT);
        assert_eq!(resp.headers()["Content-Length"], "10");
        assert!(body_bytes(resp).await.is_empty());
    }

    #[tokio::test]
    async fn test_read_span_short_file() {
        let (dir, _) = clip(10);
        let err = read_span(&dir.path().join("clip.mp3"), 5, 10)
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::Io(_)));
    }
}
