use anyhow::Result;
use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod components;
mod config;
mod controllers;
mod db_ops;
mod errors;
mod extractors;
mod htmx;
mod middleware;
mod models;
mod notification;
mod property;
mod routes;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kostmanager=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config::Config::from_env()?;
    let db = create_pg_pool(&config).await?;
    sqlx::migrate!().run(&db).await?;

    let state = models::AppState::new(
        Arc::new(property::db_ops::PgProperties {
            db: db.clone(),
            owner_id: config.owner_id,
        }),
        Arc::new(notification::db_ops::PgNotifications { db }),
        config.property_load_timeout,
    );

    // Property loading runs alongside the server; until it finishes the
    // picker shows a loading state and scoped pages redirect to it.
    {
        let state = state.clone();
        tokio::spawn(async move {
            property::load(
                &state.scope,
                state.property_lister.as_ref(),
                state.property_load_timeout,
            )
            .await;
        });
    }
    notification::sync::refresh(
        &state.notifications,
        state.notification_store.as_ref(),
    )
    .await;

    let app = routes::app(state);
    tracing::info!(addr = %config.listen_addr, "listening");
    axum::Server::bind(&config.listen_addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}

async fn create_pg_pool(
    config: &config::Config,
) -> Result<sqlx::Pool<sqlx::Postgres>> {
    Ok(PgPoolOptions::new()
        .max_connections(config::MAX_DB_CONNECTIONS)
        .connect(&config.database_url())
        .await?)
}
