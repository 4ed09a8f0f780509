//! CORS header injection
//!
//! Attached to every response leaving the server, whatever the path or status.

use hyper::header::{
    HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN,
};
use hyper::Response;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET, OPTIONS";
pub const ALLOW_HEADERS: &str = "*";

/// Add the three CORS headers, replacing any previous values
pub fn apply_cors<B>(resp: &mut Response<B>) {
    let headers = resp.headers_mut();
    headers.insert(
        ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(ALLOW_ORIGIN),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::response;

    #[test]
    fn test_cors_on_success_and_error() {
        for mut resp in [
            response::build_404_response(),
            response::build_500_response("boom"),
            response::build_options_response(),
        ] {
            apply_cors(&mut resp);
            assert_eq!(resp.headers()["Access-Control-Allow-Origin"], "*");
            assert_eq!(resp.headers()["Access-Control-Allow-Methods"], "GET, OPTIONS");
            assert_eq!(resp.headers()["Access-Control-Allow-Headers"], "*");
        }
    }

    #[test]
    fn test_cors_is_idempotent() {
        let mut resp = response::build_404_response();
        apply_cors(&mut resp);
        apply_cors(&mut resp);
        assert_eq!(
            resp.headers()
                .get_all("Access-Control-Allow-Origin")
                .iter()
                .count(),
            1
        );
    }
}
