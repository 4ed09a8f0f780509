//! MIME type detection module
//!
//! Two classifications live here: the narrow one used for recognized audio
//! files, where anything but an explicit table entry falls back to a single
//! type, and the general table used by the plain static-file responder.

use std::collections::HashMap;

/// Content-Type for a recognized audio extension
///
/// Looks the extension up in `table` and falls back to `fallback` for
/// anything not listed, so `.ogg` is served as `audio/wav` unless the table
/// says otherwise.
///
/// # Examples
/// ```
/// use std::collections::HashMap;
/// use sound_server::http::mime::audio_content_type;
///
/// let table = HashMap::from([("mp3".to_string(), "audio/mpeg".to_string())]);
/// assert_eq!(audio_content_type("mp3", &table, "audio/wav"), "audio/mpeg");
/// assert_eq!(audio_content_type("ogg", &table, "audio/wav"), "audio/wav");
/// ```
pub fn audio_content_type<'a>(
    extension: &str,
    table: &'a HashMap<String, String>,
    fallback: &'a str,
) -> &'a str {
    table.get(extension).map_or(fallback, String::as_str)
}

/// Get MIME Content-Type based on file extension
///
/// # Examples
/// ```
/// use sound_server::http::mime::get_content_type;
/// assert_eq!(get_content_type(Some("html")), "text/html; charset=utf-8");
/// assert_eq!(get_content_type(Some("js")), "application/javascript");
/// assert_eq!(get_content_type(None), "application/octet-stream");
/// ```
pub fn get_content_type(extension: Option<&str>) -> &'static str {
    match extension {
        // Text
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("txt" | "md") => "text/plain; charset=utf-8",
        Some("xml") => "application/xml",

        // Scripts
        Some("js" | "mjs") => "application/javascript",
        Some("json") => "application/json",
        Some("wasm") => "application/wasm",

        // Images
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("webp") => "image/webp",

        // Video
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",
        Some("ogv") => "video/ogg",

        // Audio that is not routed through the media responder
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("ogg" | "oga" | "opus") => "audio/ogg",
        Some("flac") => "audio/flac",
        Some("m4a") => "audio/mp4",

        // Fonts
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",

        // Archives
        Some("pdf") => "application/pdf",
        Some("zip") => "application/zip",

        _ => "application/octet-stream",
    }
}
