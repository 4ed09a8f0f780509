//! HTTP Range request parsing module
//!
//! Single `bytes=<start>-<end>` ranges, either bound optional.
//!
//! An empty left bound means "start at byte 0", so `bytes=-100` selects
//! bytes `0..=100` rather than the last 100 bytes. Media players served by
//! this server rely on that reading.

/// Inclusive byte span inside a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    /// First byte position
    pub start: u64,
    /// Last byte position (inclusive)
    pub end: u64,
}

impl ByteRange {
    /// Number of bytes covered, the value of `Content-Length`
    #[inline]
    pub const fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// Value of the `Content-Range` header for a file of `total_size` bytes
    pub fn content_range(&self, total_size: u64) -> String {
        format!("bytes {}-{}/{total_size}", self.start, self.end)
    }
}

/// Range header parse result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeParseResult {
    /// No Range header, serve the whole file
    Full,
    /// Satisfiable range, bounds already clamped to the file
    Range(ByteRange),
    /// Bounds fall outside the file - should return 416
    NotSatisfiable,
    /// Header could not be parsed
    Invalid(String),
}

/// Parse HTTP Range header against a file of `file_size` bytes
///
/// - `bytes=start-end` - specific range
/// - `bytes=start-` - from start to end of file
/// - `bytes=-end` - from byte 0 to end
/// - `bytes=-` - whole file
///
/// An `end` past the file is clamped to the last byte.
///
/// # Examples
/// ```
/// use sound_server::http::range::{parse_range_header, ByteRange, RangeParseResult};
///
/// let result = parse_range_header(Some("bytes=200-299"), 1000);
/// assert_eq!(result, RangeParseResult::Range(ByteRange { start: 200, end: 299 }));
///
/// let result = parse_range_header(None, 1000);
/// assert_eq!(result, RangeParseResult::Full);
/// ```
pub fn parse_range_header(range_header: Option<&str>, file_size: u64) -> RangeParseResult {
    let Some(header) = range_header else {
        return RangeParseResult::Full;
    };

    // A header without the bytes unit still selects the whole file as a range
    let Some(spec) = header.trim().strip_prefix("bytes=") else {
        return bounded(0, None, file_size);
    };

    let mut parts = spec.split('-');
    let start_str = parts.next().unwrap_or_default().trim();
    let Some(end_str) = parts.next().map(str::trim) else {
        return RangeParseResult::Invalid(format!("missing '-' in range '{spec}'"));
    };

    let start = if start_str.is_empty() {
        0
    } else {
        match start_str.parse::<u64>() {
            Ok(s) => s,
            Err(e) => {
                return RangeParseResult::Invalid(format!("invalid range start '{start_str}': {e}"))
            }
        }
    };

    let end = if end_str.is_empty() {
        None
    } else {
        match end_str.parse::<u64>() {
            Ok(e) => Some(e),
            Err(e) => {
                return RangeParseResult::Invalid(format!("invalid range end '{end_str}': {e}"))
            }
        }
    };

    bounded(start, end, file_size)
}

/// Clamp parsed bounds to the file and reject spans that cannot be served
fn bounded(start: u64, end: Option<u64>, file_size: u64) -> RangeParseResult {
    let Some(last) = file_size.checked_sub(1) else {
        return RangeParseResult::NotSatisfiable;
    };

    let end = end.map_or(last, |e| e.min(last));
    if start > end {
        return RangeParseResult::NotSatisfiable;
    }

    RangeParseResult::Range(ByteRange { start, end })
}
