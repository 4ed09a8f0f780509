//! Static file serving module
//!
//! Plain responder for everything that is not a recognized audio file:
//! whole files with a MIME type from the general table, index files and
//! generated listings for directories. No range support.

use crate::config::AppState;
use crate::error::MediaError;
use crate::handler::path;
use crate::handler::router::{self, RequestContext};
use crate::http::{self, mime, response};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::fmt::Write as _;
use std::path::Path;
use tokio::fs;

/// Serve a file or directory under the media root
pub async fn serve_static(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
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

    if !metadata.is_dir() {
        return serve_file(ctx, &file_path, metadata.len()).await;
    }

    // Directory links must end in '/' so relative hrefs resolve inside it
    if !ctx.path.ends_with('/') {
        let target = match ctx.query {
            Some(q) => format!("{}/?{q}", ctx.path),
            None => format!("{}/", ctx.path),
        };
        return Ok(http::build_redirect_response(&target));
    }

    for index_file in &state.config.media.index_files {
        let index_path = file_path.join(index_file);
        if let Ok(index_meta) = fs::metadata(&index_path).await {
            if index_meta.is_file() {
                return serve_file(ctx, &index_path, index_meta.len()).await;
            }
        }
    }

    list_directory(ctx, &file_path).await
}

/// Serve a single file in full
async fn serve_file(
    ctx: &RequestContext<'_>,
    file_path: &Path,
    size: u64,
) -> Result<Response<Full<Bytes>>, MediaError> {
    let content_type = mime::get_content_type(file_path.extension().and_then(|e| e.to_str()));

    if ctx.is_head {
        return Ok(response::build_full_response(
            Bytes::new(),
            content_type,
            size,
            false,
        ));
    }

    let content = fs::read(file_path).await.map_err(MediaError::from_io)?;
    let content_length = u64::try_from(content.len()).unwrap_or(size);
    Ok(response::build_full_response(
        Bytes::from(content),
        content_type,
        content_length,
        false,
    ))
}

/// Generate an HTML listing of a directory
async fn list_directory(
    ctx: &RequestContext<'_>,
    dir: &Path,
) -> Result<Response<Full<Bytes>>, MediaError> {
    let mut entries = fs::read_dir(dir).await.map_err(MediaError::from_io)?;
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let mut name = entry.file_name().to_string_lossy().into_owned();
        if entry.file_type().await.is_ok_and(|t| t.is_dir()) {
            name.push('/');
        }
        names.push(name);
    }
    names.sort_unstable_by_key(|n| n.to_lowercase());

    Ok(response::build_html_response(
        render_listing(ctx.path, &names),
        ctx.is_head,
    ))
}

fn render_listing(request_path: &str, names: &[String]) -> String {
    let display_path = urlencoding::decode(request_path)
        .map_or_else(|_| request_path.to_string(), |p| p.into_owned());
    let title = format!("Directory listing for {}", escape_html(&display_path));

    let mut html = format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n</head>\n<body>\n<h1>{title}</h1>\n<hr>\n<ul>\n"
    );
    for name in names {
        let _ = writeln!(
            html,
            "<li><a href=\"{}\">{}</a></li>",
            urlencoding::encode(name).replace("%2F", "/"),
            escape_html(name)
        );
    }
    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    html
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
