use actix_web::{
    http::header::{self, HeaderValue},
    middleware::DefaultHeaders,
    HttpResponse, Responder,
};

pub const ALLOWED_METHODS: &str = "GET, POST, OPTIONS";
pub const ALLOWED_HEADERS: &str = "Content-Type, Authorization";

/// Fixed CORS headers attached to every response, including errors and preflights.
///
/// `actix_cors::Cors` only answers requests that carry an `Origin` header, so the
/// headers are set unconditionally here instead.
pub fn cors_headers(origin: Option<&str>) -> DefaultHeaders {
    DefaultHeaders::new()
        .add((header::ACCESS_CONTROL_ALLOW_ORIGIN, allow_origin(origin)))
        .add((header::ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS))
        .add((header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS))
}

fn allow_origin(origin: Option<&str>) -> HeaderValue {
    match origin.map(HeaderValue::from_str) {
        Some(Ok(value)) => value,
        Some(Err(_)) => {
            log::warn!("CORS_ORIGIN is not a valid header value, allowing any origin");
            HeaderValue::from_static("*")
        }
        None => HeaderValue::from_static("*"),
    }
}

/*
    OPTIONS /api/trips/{code}/plan
*/
pub async fn preflight() -> impl Responder {
    HttpResponse::NoContent().finish()
}
