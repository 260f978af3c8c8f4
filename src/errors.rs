use anyhow::Error;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

#[derive(Debug)]
pub struct ServerError(Error);

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::error!(error = ?self.0, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong")
            .into_response()
    }
}

// This enables using `?` on functions that return `Result<_, anyhow::Error>`
// to turn them into `Result<_, ServerError>`.
impl<E> From<E> for ServerError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

/// Rejections from the property scope. These are user mistakes (or stale
/// forms), not server faults, so they render as a 400 instead of going
/// through `ServerError`.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ScopeError {
    #[error("property {0} is not in the current property list")]
    NotListed(Uuid),
}

impl IntoResponse for ScopeError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "rejected property selection");
        (StatusCode::BAD_REQUEST, self.to_string()).into_response()
    }
}
