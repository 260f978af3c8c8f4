//! A little hard-coded config, plus whatever the environment (or `.env`)
//! tells us about where the database lives.

use anyhow::{Context, Result};
use std::{env, net::SocketAddr, time::Duration};
use uuid::Uuid;

/// The notification list is held in memory in full, and every mutation
/// clones it if a snapshot is outstanding. We cap the listing at this many
/// rows (newest first) and defer paging until somebody hits the limit.
pub const NOTIFICATION_LIST_LIMIT: i64 = 200;

/// Postgres default max connections is 100; one dashboard does not need
/// anywhere near that.
pub const MAX_DB_CONNECTIONS: u32 = 10;

const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8000";
const DEFAULT_PROPERTY_LOAD_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug)]
pub struct Config {
    pub pg_user: String,
    pub pg_password: String,
    pub pg_db: String,
    pub pg_host: String,
    pub listen_addr: SocketAddr,
    /// Upper bound on the property listing call. Without it, a hung
    /// backend would leave the property scope loading forever.
    pub property_load_timeout: Duration,
    /// Restrict the property list to one owner. Unset lists everything.
    pub owner_id: Option<Uuid>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("LISTEN_ADDR must be a socket address")?;
        let timeout_secs = match env::var("PROPERTY_LOAD_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse::<u64>()
                .context("PROPERTY_LOAD_TIMEOUT_SECS must be an integer")?,
            Err(_) => DEFAULT_PROPERTY_LOAD_TIMEOUT_SECS,
        };
        let owner_id = match env::var("PROPERTY_OWNER_ID") {
            Ok(raw) => Some(
                raw.parse::<Uuid>()
                    .context("PROPERTY_OWNER_ID must be a UUID")?,
            ),
            Err(_) => None,
        };

        Ok(Config {
            pg_user: required("POSTGRES_USER")?,
            pg_password: required("POSTGRES_PASSWORD")?,
            pg_db: required("POSTGRES_DB")?,
            pg_host: env::var("POSTGRES_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            listen_addr,
            property_load_timeout: Duration::from_secs(timeout_secs),
            owner_id,
        })
    }

    pub fn database_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:5432/{}",
            self.pg_user, self.pg_password, self.pg_host, self.pg_db
        )
    }
}

fn required(key: &str) -> Result<String> {
    env::var(key).with_context(|| format!("{key} to be defined in environment"))
}
