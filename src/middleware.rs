use super::errors::ServerError;
use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Request},
    middleware::Next,
    response::Response,
};

/// Everything we serve is an HTML page or fragment, except plain-text
/// error bodies, which browsers render fine as HTML too.
pub async fn html_headers<B>(
    request: Request<B>,
    next: Next<B>,
) -> Result<Response, ServerError> {
    let mut response = next.run(request).await;
    response.headers_mut().insert(
        CONTENT_TYPE,
        HeaderValue::from_str("text/html; charset=utf-8")?,
    );

    Ok(response)
}
