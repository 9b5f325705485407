use axum::{extract::Request, http::header, middleware::Next, response::IntoResponse};

/// Stamps permissive CORS headers on every response the relay produces,
/// success or failure, so browser callers are permitted. Preflight status
/// handling lives in the route table; this middleware only owns the headers.
pub async fn cors_middleware(req: Request, next: Next) -> impl IntoResponse {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        header::HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        header::HeaderValue::from_static("POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        header::HeaderValue::from_static("Content-Type"),
    );

    response
}
