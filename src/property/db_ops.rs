use super::{models::Property, PropertyLister};
use anyhow::Result;
use async_trait::async_trait;
use sqlx::{query_as, PgPool};
use uuid::Uuid;

/// `owner_id = None` lists every property the connection can see.
///
/// Listing order is what picks the default property, so keep it stable:
/// oldest first, ties broken by id.
pub async fn list_properties(
    db: &PgPool,
    owner_id: Option<Uuid>,
) -> Result<Vec<Property>> {
    Ok(query_as::<_, Property>(
        "select id, name, address, city, phone, email, owner_id,
            created_at, updated_at
        from properties
        where $1::uuid is null or owner_id = $1
        order by created_at, id",
    )
    .bind(owner_id)
    .fetch_all(db)
    .await?)
}

/// The `properties` table as seen by the property scope.
#[derive(Clone)]
pub struct PgProperties {
    pub db: PgPool,
    pub owner_id: Option<Uuid>,
}

#[async_trait]
impl PropertyLister for PgProperties {
    async fn list_properties(&self) -> Result<Vec<Property>> {
        list_properties(&self.db, self.owner_id).await
    }
}
