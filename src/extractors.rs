use super::{htmx, models::AppState, property::models::Property};
use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::LOCATION, request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

const PICKER: &str = "/properties";

/// The property every property-scoped handler works in. Extracting it is
/// the scope gate: with nothing selected, the request is bounced to the
/// property picker instead of reaching the handler.
pub struct SelectedProperty(pub Property);

fn redirect_to_picker(headers: &HeaderMap) -> Response {
    if htmx::is_htmx_request(headers) {
        htmx::redirect(PICKER).into_response()
    } else {
        (StatusCode::FOUND, [(LOCATION, PICKER)]).into_response()
    }
}

#[async_trait]
impl FromRequestParts<AppState> for SelectedProperty {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let scope = state.scope.read().await;
        match scope.selected() {
            Some(property) if !scope.is_gated() => {
                Ok(SelectedProperty(property.clone()))
            }
            _ => {
                tracing::debug!(path = %parts.uri.path(), "no property selected");
                Err(redirect_to_picker(&parts.headers))
            }
        }
    }
}
