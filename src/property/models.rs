use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A managed building or site. Tenants, rooms and everything else in the
/// dashboard is scoped to one of these.
#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct Property {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub city: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
