use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;

/// Table-scoped CRUD for one model. `GetQuery` and `ListQuery` are
/// per-model structs, so each implementor decides which keys or filters it
/// accepts.
#[async_trait]
pub trait DbModel<GetQuery: Sync, ListQuery: Sync>: Sized + Send + Sync {
    /// Fetch exactly one row; a missing row is an error.
    async fn get(db: &PgPool, query: &GetQuery) -> Result<Self>;
    async fn list(db: &PgPool, query: &ListQuery) -> Result<Vec<Self>>;
    /// Insert or update, depending on whether the row already exists.
    async fn save(&self, db: &PgPool) -> Result<()>;
    async fn delete(self, db: &PgPool) -> Result<()>;
}
