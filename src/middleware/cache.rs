use axum::{
    body::Body,
    http::{HeaderValue, Request, Response, header},
    middleware::Next,
};

const STATIC_PREFIXES: [&str; 2] = ["/static/", "/media/"];

/// Static assets and uploaded media are cached for a day, pages are never cached.
pub async fn cache_control_middleware(req: Request<Body>, next: Next) -> Response<Body> {
    let is_static = STATIC_PREFIXES
        .iter()
        .any(|prefix| req.uri().path().starts_with(prefix));

    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    if is_static {
        headers.insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static("public, max-age=86400"),
        );
    } else {
        headers.insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store, no-cache, must-revalidate, proxy-revalidate"),
        );
        headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
        headers.insert(header::EXPIRES, HeaderValue::from_static("0"));
    }

    response
}
