use super::{
    models::{NewNotification, Notification, NotificationType, Priority},
    NotificationStore,
};
use crate::db_ops::DbModel;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use sqlx::{query, query_as, PgPool};
use uuid::Uuid;

pub struct GetNotificationQuery {
    pub id: Uuid,
}

pub struct ListNotificationQuery {
    pub limit: i64,
}

/// `type` and `priority` are stored as text; they get parsed on the way
/// out so a bad row fails the whole query instead of rendering garbage.
#[derive(sqlx::FromRow)]
struct QRes {
    id: Uuid,
    title: String,
    message: String,
    kind: String,
    priority: String,
    date: DateTime<Utc>,
    read: bool,
}

impl TryFrom<QRes> for Notification {
    type Error = anyhow::Error;
    fn try_from(row: QRes) -> Result<Self> {
        Ok(Notification {
            r#type: row
                .kind
                .parse::<NotificationType>()
                .with_context(|| format!("notification {}", row.id))?,
            priority: row
                .priority
                .parse::<Priority>()
                .with_context(|| format!("notification {}", row.id))?,
            id: row.id,
            title: row.title,
            message: row.message,
            date: row.date,
            read: row.read,
        })
    }
}

#[async_trait]
impl DbModel<GetNotificationQuery, ListNotificationQuery> for Notification {
    async fn get(db: &PgPool, query: &GetNotificationQuery) -> Result<Self> {
        query_as::<_, QRes>(
            "select id, title, message, type as kind, priority, date, read
            from notifications
            where id = $1",
        )
        .bind(query.id)
        .fetch_one(db)
        .await?
        .try_into()
    }
    async fn list(
        db: &PgPool,
        query: &ListNotificationQuery,
    ) -> Result<Vec<Self>> {
        query_as::<_, QRes>(
            "select id, title, message, type as kind, priority, date, read
            from notifications
            order by date desc, id
            limit $1",
        )
        .bind(query.limit)
        .fetch_all(db)
        .await?
        .into_iter()
        .map(Notification::try_from)
        .collect()
    }
    async fn save(&self, db: &PgPool) -> Result<()> {
        query(
            "insert into notifications
                (id, title, message, type, priority, date, read)
            values ($1, $2, $3, $4, $5, $6, $7)
            on conflict (id) do update set
                title = excluded.title,
                message = excluded.message,
                type = excluded.type,
                priority = excluded.priority,
                read = excluded.read",
        )
        .bind(self.id)
        .bind(&self.title)
        .bind(&self.message)
        .bind(self.r#type.as_str())
        .bind(self.priority.as_str())
        .bind(self.date)
        .bind(self.read)
        .execute(db)
        .await?;

        Ok(())
    }
    async fn delete(self, db: &PgPool) -> Result<()> {
        query("delete from notifications where id = $1")
            .bind(self.id)
            .execute(db)
            .await?;

        Ok(())
    }
}

/// Flip every unread row in one statement rather than a save per row.
pub async fn mark_all_read(db: &PgPool) -> Result<()> {
    query("update notifications set read = true where not read")
        .execute(db)
        .await?;

    Ok(())
}

/// A single `update` so a row deleted concurrently stays deleted; a missing
/// id matches nothing.
pub async fn mark_read(db: &PgPool, id: Uuid) -> Result<()> {
    query("update notifications set read = true where id = $1 and not read")
        .bind(id)
        .execute(db)
        .await?;

    Ok(())
}

/// The `notifications` table as seen by the notification center.
#[derive(Clone)]
pub struct PgNotifications {
    pub db: PgPool,
}

#[async_trait]
impl NotificationStore for PgNotifications {
    async fn list(&self, limit: i64) -> Result<Vec<Notification>> {
        Notification::list(&self.db, &ListNotificationQuery { limit }).await
    }
    async fn mark_read(&self, id: Uuid) -> Result<()> {
        mark_read(&self.db, id).await
    }
    async fn mark_all_read(&self) -> Result<()> {
        mark_all_read(&self.db).await
    }
    async fn delete(&self, notification: Notification) -> Result<()> {
        notification.delete(&self.db).await
    }
    async fn create(&self, new: NewNotification) -> Result<Notification> {
        // Postgres keeps microseconds; trim now so the in-memory copy
        // matches what a later listing returns.
        let notification = Notification {
            id: Uuid::new_v4(),
            title: new.title,
            message: new.message,
            r#type: new.r#type,
            priority: new.priority,
            date: Utc::now().trunc_subsecs(6),
            read: false,
        };
        notification.save(&self.db).await?;

        Ok(notification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use sqlx::postgres::PgPoolOptions;

    /// Uses the same `POSTGRES_*` environment as the server.
    async fn pool() -> PgPool {
        dotenvy::dotenv().ok();
        let config = Config::from_env().unwrap();
        let db = PgPoolOptions::new()
            .max_connections(1)
            .connect(&config.database_url())
            .await
            .unwrap();
        sqlx::migrate!().run(&db).await.unwrap();
        db
    }

    fn new_notification() -> NewNotification {
        NewNotification {
            title: "Rent due".to_string(),
            message: "Room 201".to_string(),
            r#type: NotificationType::Payment,
            priority: Priority::High,
        }
    }

    #[tokio::test]
    #[ignore = "needs a Postgres database"]
    async fn test_mark_read_after_delete_does_not_recreate_row() {
        let db = pool().await;
        let store = PgNotifications { db: db.clone() };
        let created = store.create(new_notification()).await.unwrap();

        store.delete(created.clone()).await.unwrap();
        store.mark_read(created.id).await.unwrap();

        let lookup =
            Notification::get(&db, &GetNotificationQuery { id: created.id })
                .await;
        assert!(lookup.is_err());
    }

    #[tokio::test]
    #[ignore = "needs a Postgres database"]
    async fn test_mark_read_flips_existing_row() {
        let db = pool().await;
        let store = PgNotifications { db: db.clone() };
        let created = store.create(new_notification()).await.unwrap();

        store.mark_read(created.id).await.unwrap();

        let stored =
            Notification::get(&db, &GetNotificationQuery { id: created.id })
                .await
                .unwrap();
        assert!(stored.read);
        stored.delete(&db).await.unwrap();
    }
}
