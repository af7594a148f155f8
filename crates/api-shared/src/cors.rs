//! CORS policy for browser clients.
//!
//! Any origin may call the API. Preflight `OPTIONS` requests are answered with an
//! empty 200 carrying the allowed headers.

use http::header::{HeaderName, HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS};
use http::Method;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

/// Request headers browser clients may send.
pub const ALLOWED_HEADERS: [&str; 4] = ["authorization", "x-client-info", "apikey", "content-type"];

/// CORS layer: all origins, the fixed header allow-list, `POST` and `OPTIONS`.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers(ALLOWED_HEADERS.map(HeaderName::from_static))
}

/// Adds the header allow-list to non-preflight responses as well, so every
/// response carries the same CORS headers.
pub fn allow_headers_layer() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::if_not_present(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("authorization, x-client-info, apikey, content-type"),
    )
}
