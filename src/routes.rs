use super::{controllers, middleware, models};
use axum::{
    middleware::from_fn,
    routing::{get, post, Router},
};
use tower_http::trace::TraceLayer;

#[rustfmt::skip]
pub fn get_routes() -> Router<models::AppState> {
    Router::new()
        .route("/", get(controllers::root))
        .route("/ping", get(controllers::pong))
        .route("/properties", get(controllers::property_picker))
        .route("/properties/select", post(controllers::select_property))
        .route("/properties/clear", post(controllers::clear_property))
        .route("/properties/reload", post(controllers::reload_properties))
        .route("/notifications", get(controllers::notifications_page))
        .route("/notifications", post(controllers::create_notification))
        .route("/notifications/list", get(controllers::notification_list))
        .route("/notifications/refresh", post(controllers::refresh_notifications))
        .route("/notifications/read-all", post(controllers::mark_all_read))
        .route("/notifications/filter/category/:category", post(controllers::set_category_filter))
        .route("/notifications/filter/unread-only", post(controllers::set_unread_only))
        .route("/notifications/item/:id/read", post(controllers::mark_read))
        .route("/notifications/item/:id/delete", post(controllers::request_delete))
        .route("/notifications/delete/confirm", post(controllers::confirm_delete))
        .route("/notifications/delete/cancel", post(controllers::cancel_delete))
}

pub fn app(state: models::AppState) -> Router {
    get_routes()
        .layer(from_fn(middleware::html_headers))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        notification::{models::fixtures::inbox, sync, sync::fakes::FakeStore},
        property::{self, fakes::StaticLister, models::fixtures::property},
    };
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use std::{sync::Arc, time::Duration};
    use tower::ServiceExt;
    use uuid::Uuid;

    const FORM: &str = "application/x-www-form-urlencoded";

    async fn state(properties: Vec<property::models::Property>) -> models::AppState {
        let state = models::AppState::new(
            Arc::new(StaticLister(properties)),
            Arc::new(FakeStore::with_rows(inbox())),
            Duration::from_secs(1),
        );
        property::load(
            &state.scope,
            state.property_lister.as_ref(),
            state.property_load_timeout,
        )
        .await;
        sync::refresh(&state.notifications, state.notification_store.as_ref())
            .await;
        state
    }

    async fn send(
        state: &models::AppState,
        method: &str,
        uri: &str,
        body: &str,
        htmx: bool,
    ) -> Response {
        let mut request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", FORM);
        if htmx {
            request = request.header("Hx-Request", "true");
        }
        app(state.clone())
            .oneshot(request.body(Body::from(body.to_string())).unwrap())
            .await
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_gate_redirects_plain_requests() {
        let state = state(vec![]).await;

        let response = send(&state, "GET", "/notifications", "", false).await;

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()["location"], "/properties");
    }

    #[tokio::test]
    async fn test_gate_redirects_htmx_requests() {
        let state = state(vec![]).await;

        let response =
            send(&state, "POST", "/notifications/read-all", "", true).await;

        assert_eq!(response.headers()["hx-redirect"], "/properties");
        assert_eq!(state.notifications.read().await.unread_count(), 2);
    }

    #[tokio::test]
    async fn test_picker_is_never_gated() {
        let state = state(vec![]).await;

        let response = send(&state, "GET", "/properties", "", false).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("No properties found"));
    }

    #[tokio::test]
    async fn test_select_then_view_notifications() {
        let p2 = property(2, "Kost Mawar");
        let state = state(vec![property(1, "Kost Melati"), p2.clone()]).await;

        let response = send(
            &state,
            "POST",
            "/properties/select",
            &format!("id={}", p2.id),
            true,
        )
        .await;
        assert_eq!(response.headers()["hx-redirect"], "/notifications");

        let response = send(&state, "GET", "/notifications", "", false).await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Kost Mawar"));
        assert!(html.contains("2 new"));
    }

    #[tokio::test]
    async fn test_selecting_unlisted_property_is_rejected() {
        let state = state(vec![property(1, "Kost Melati")]).await;

        let response = send(
            &state,
            "POST",
            "/properties/select",
            &format!("id={}", Uuid::from_u128(77)),
            true,
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            state.scope.read().await.selected().map(|p| p.id),
            Some(Uuid::from_u128(1))
        );
    }

    #[tokio::test]
    async fn test_clearing_selection_closes_gate() {
        let state = state(vec![property(1, "Kost Melati")]).await;

        send(&state, "POST", "/properties/clear", "", true).await;
        let response = send(&state, "GET", "/notifications", "", false).await;

        assert_eq!(response.status(), StatusCode::FOUND);
    }

    #[tokio::test]
    async fn test_delete_flow_over_http() {
        let state = state(vec![property(1, "Kost Melati")]).await;
        let target = Uuid::from_u128(3);
        let before = state.notifications.read().await.notifications().to_vec();

        let html = body_text(
            send(
                &state,
                "POST",
                &format!("/notifications/item/{target}/delete"),
                "",
                true,
            )
            .await,
        )
        .await;
        assert!(html.contains("delete-confirm"));

        let html = body_text(
            send(&state, "POST", "/notifications/delete/cancel", "", true).await,
        )
        .await;
        assert!(!html.contains("delete-confirm"));
        assert_eq!(
            state.notifications.read().await.notifications(),
            before.as_slice()
        );

        send(
            &state,
            "POST",
            &format!("/notifications/item/{target}/delete"),
            "",
            true,
        )
        .await;
        send(&state, "POST", "/notifications/delete/confirm", "", true).await;

        let center = state.notifications.read().await;
        assert_eq!(center.notifications().len(), 3);
        assert!(center.notifications().iter().all(|n| n.id != target));
    }

    #[tokio::test]
    async fn test_mark_read_and_filters_over_http() {
        let state = state(vec![property(1, "Kost Melati")]).await;

        let html = body_text(
            send(
                &state,
                "POST",
                &format!("/notifications/item/{}/read", Uuid::from_u128(1)),
                "",
                true,
            )
            .await,
        )
        .await;
        assert!(html.contains("1 new"));

        send(&state, "POST", "/notifications/filter/unread-only", "unread_only=on", true)
            .await;
        let html = body_text(
            send(&state, "POST", "/notifications/filter/category/payment", "", true)
                .await,
        )
        .await;
        assert!(html.contains("No notifications found"));

        let html = body_text(
            send(&state, "POST", "/notifications/filter/unread-only", "", true)
                .await,
        )
        .await;
        assert!(html.contains("Notification 1"));
        assert!(!html.contains("Notification 2"));

        send(&state, "POST", "/notifications/read-all", "", true).await;
        assert_eq!(state.notifications.read().await.unread_count(), 0);
    }

    #[tokio::test]
    async fn test_create_notification_over_http() {
        let state = state(vec![property(1, "Kost Melati")]).await;

        let html = body_text(
            send(
                &state,
                "POST",
                "/notifications",
                "title=Rent+due&message=Room+201&type=payment&priority=high",
                true,
            )
            .await,
        )
        .await;

        assert!(html.contains("Rent due"));
        assert!(html.contains("3 new"));
    }
}
