use super::{
    components::{Component, Page, ScopeHeader, Stack},
    errors::ScopeError,
    extractors::SelectedProperty,
    htmx,
    models::AppState,
    notification::{
        components::{NewNotificationForm, NotificationPanel},
        models::{CategoryFilter, NewNotification},
        sync, NotificationCenter,
    },
    property::{self, components::PropertyPicker},
};
use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::{IntoResponse, Redirect},
    Form,
};
use serde::Deserialize;
use uuid::Uuid;

pub async fn root() -> impl IntoResponse {
    Redirect::to("/notifications")
}

pub async fn pong() -> impl IntoResponse {
    "pong"
}

pub async fn property_picker(
    State(AppState { scope, .. }): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let scope = scope.read().await;
    if htmx::is_htmx_request(&headers) {
        PropertyPicker { scope: &scope }.render()
    } else {
        Page {
            title: "Properties",
            children: Box::new(PropertyPicker { scope: &scope }),
        }
        .render()
    }
}

#[derive(Deserialize)]
pub struct SelectPropertyForm {
    id: Uuid,
}

pub async fn select_property(
    State(AppState { scope, .. }): State<AppState>,
    Form(SelectPropertyForm { id }): Form<SelectPropertyForm>,
) -> Result<impl IntoResponse, ScopeError> {
    scope.write().await.select_by_id(id)?;

    Ok(htmx::redirect("/notifications"))
}

pub async fn clear_property(
    State(AppState { scope, .. }): State<AppState>,
) -> impl IntoResponse {
    let mut scope = scope.write().await;
    scope.clear();
    PropertyPicker { scope: &scope }.render()
}

pub async fn reload_properties(
    State(state): State<AppState>,
) -> impl IntoResponse {
    property::load(
        &state.scope,
        state.property_lister.as_ref(),
        state.property_load_timeout,
    )
    .await;
    let scope = state.scope.read().await;
    PropertyPicker { scope: &scope }.render()
}

fn render_panel(center: &NotificationCenter) -> String {
    NotificationPanel { center }.render()
}

pub async fn notifications_page(
    SelectedProperty(property): SelectedProperty,
    State(AppState { notifications, .. }): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let center = notifications.read().await;
    if htmx::is_htmx_request(&headers) {
        return render_panel(&center);
    }
    let children: Vec<Box<dyn Component + '_>> = vec![
        Box::new(ScopeHeader {
            property: &property,
        }),
        Box::new(NotificationPanel { center: &center }),
        Box::new(NewNotificationForm {}),
    ];
    let html = Page {
        title: "Notifications",
        children: Box::new(Stack { children }),
    }
    .render();
    html
}

pub async fn notification_list(
    _: SelectedProperty,
    State(AppState { notifications, .. }): State<AppState>,
) -> impl IntoResponse {
    let center = notifications.read().await;
    render_panel(&center)
}

pub async fn refresh_notifications(
    _: SelectedProperty,
    State(state): State<AppState>,
) -> impl IntoResponse {
    sync::refresh(&state.notifications, state.notification_store.as_ref())
        .await;
    let center = state.notifications.read().await;
    render_panel(&center)
}

pub async fn set_category_filter(
    _: SelectedProperty,
    State(AppState { notifications, .. }): State<AppState>,
    Path(category): Path<String>,
) -> impl IntoResponse {
    let mut center = notifications.write().await;
    center.set_category_filter(CategoryFilter::parse_or_all(&category));
    render_panel(&center)
}

#[derive(Deserialize)]
pub struct UnreadOnlyForm {
    /// Checkbox; only present when checked.
    unread_only: Option<String>,
}

pub async fn set_unread_only(
    _: SelectedProperty,
    State(AppState { notifications, .. }): State<AppState>,
    Form(UnreadOnlyForm { unread_only }): Form<UnreadOnlyForm>,
) -> impl IntoResponse {
    let mut center = notifications.write().await;
    center.set_unread_only(unread_only.is_some());
    render_panel(&center)
}

pub async fn mark_read(
    _: SelectedProperty,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    sync::persist_mark_read(
        &state.notifications,
        state.notification_store.as_ref(),
        id,
    )
    .await;
    let center = state.notifications.read().await;
    render_panel(&center)
}

pub async fn mark_all_read(
    _: SelectedProperty,
    State(state): State<AppState>,
) -> impl IntoResponse {
    sync::persist_mark_all_read(
        &state.notifications,
        state.notification_store.as_ref(),
    )
    .await;
    let center = state.notifications.read().await;
    render_panel(&center)
}

pub async fn request_delete(
    _: SelectedProperty,
    State(AppState { notifications, .. }): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let mut center = notifications.write().await;
    center.request_delete(id);
    render_panel(&center)
}

pub async fn confirm_delete(
    _: SelectedProperty,
    State(state): State<AppState>,
) -> impl IntoResponse {
    sync::persist_delete(&state.notifications, state.notification_store.as_ref())
        .await;
    let center = state.notifications.read().await;
    render_panel(&center)
}

pub async fn cancel_delete(
    _: SelectedProperty,
    State(AppState { notifications, .. }): State<AppState>,
) -> impl IntoResponse {
    let mut center = notifications.write().await;
    center.cancel_delete();
    render_panel(&center)
}

pub async fn create_notification(
    _: SelectedProperty,
    State(state): State<AppState>,
    Form(new): Form<NewNotification>,
) -> impl IntoResponse {
    sync::persist_create(
        &state.notifications,
        state.notification_store.as_ref(),
        new,
    )
    .await;
    let center = state.notifications.read().await;
    render_panel(&center)
}
