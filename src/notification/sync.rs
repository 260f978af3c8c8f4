//! Persist-then-apply wrappers around the notification center. The store is
//! called without holding the center's lock; the center only changes once
//! the store has accepted the change. Store failures are logged and
//! swallowed, leaving the center as it was, and the helper returns `false`.

use super::{
    models::{NewNotification, Notification},
    NotificationCenter, NotificationStore,
};
use crate::config::NOTIFICATION_LIST_LIMIT;
use tokio::sync::RwLock;
use uuid::Uuid;

pub async fn refresh(
    center: &RwLock<NotificationCenter>,
    store: &dyn NotificationStore,
) -> bool {
    match store.list(NOTIFICATION_LIST_LIMIT).await {
        Ok(list) => {
            tracing::debug!(count = list.len(), "loaded notifications");
            center.write().await.replace_all(list);
            true
        }
        Err(e) => {
            tracing::warn!(error = ?e, "could not list notifications");
            false
        }
    }
}

pub async fn persist_mark_read(
    center: &RwLock<NotificationCenter>,
    store: &dyn NotificationStore,
    id: Uuid,
) -> bool {
    let needs_write = center
        .read()
        .await
        .notifications()
        .iter()
        .any(|n| n.id == id && !n.read);
    if !needs_write {
        return true;
    }
    match store.mark_read(id).await {
        Ok(()) => {
            center.write().await.mark_read(id);
            true
        }
        Err(e) => {
            tracing::warn!(error = ?e, notification_id = %id, "could not mark notification read");
            false
        }
    }
}

pub async fn persist_mark_all_read(
    center: &RwLock<NotificationCenter>,
    store: &dyn NotificationStore,
) -> bool {
    if center.read().await.unread_count() == 0 {
        return true;
    }
    match store.mark_all_read().await {
        Ok(()) => {
            center.write().await.mark_all_read();
            true
        }
        Err(e) => {
            tracing::warn!(error = ?e, "could not mark all notifications read");
            false
        }
    }
}

/// Second half of the delete flow: delete whatever `request_delete`
/// captured. Without a pending candidate nothing happens.
pub async fn persist_delete(
    center: &RwLock<NotificationCenter>,
    store: &dyn NotificationStore,
) -> bool {
    let Some(candidate) = center.read().await.pending_delete().cloned() else {
        return false;
    };
    let id = candidate.id;
    let outcome = store.delete(candidate).await;

    let mut center = center.write().await;
    let still_pending = center.pending_delete().map(|n| n.id) == Some(id);
    match outcome {
        Ok(()) => {
            if still_pending {
                center.confirm_delete();
            } else {
                center.delete(id);
            }
            tracing::info!(notification_id = %id, "notification deleted");
            true
        }
        Err(e) => {
            tracing::warn!(error = ?e, notification_id = %id, "could not delete notification");
            if still_pending {
                center.cancel_delete();
            }
            false
        }
    }
}

pub async fn persist_create(
    center: &RwLock<NotificationCenter>,
    store: &dyn NotificationStore,
    new: NewNotification,
) -> Option<Notification> {
    match store.create(new).await {
        Ok(created) => {
            center.write().await.insert(created.clone());
            Some(created)
        }
        Err(e) => {
            tracing::warn!(error = ?e, "could not create notification");
            None
        }
    }
}

#[cfg(test)]
pub mod fakes {
    use super::*;
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// In-memory store. With `fail` set, every call errors.
    #[derive(Default)]
    pub struct FakeStore {
        pub rows: Mutex<Vec<Notification>>,
        pub calls: Mutex<Vec<&'static str>>,
        pub fail: bool,
    }

    impl FakeStore {
        pub fn with_rows(rows: Vec<Notification>) -> Self {
            FakeStore {
                rows: Mutex::new(rows),
                ..Default::default()
            }
        }
        pub fn failing(rows: Vec<Notification>) -> Self {
            FakeStore {
                fail: true,
                ..Self::with_rows(rows)
            }
        }
        pub fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }
        fn record(&self, call: &'static str) -> Result<()> {
            self.calls.lock().unwrap().push(call);
            if self.fail {
                Err(anyhow!("backend unavailable"))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl NotificationStore for FakeStore {
        async fn list(&self, limit: i64) -> Result<Vec<Notification>> {
            self.record("list")?;
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().take(limit as usize).cloned().collect())
        }
        async fn mark_read(&self, id: Uuid) -> Result<()> {
            self.record("mark_read")?;
            for n in self.rows.lock().unwrap().iter_mut() {
                if n.id == id {
                    n.read = true;
                }
            }
            Ok(())
        }
        async fn mark_all_read(&self) -> Result<()> {
            self.record("mark_all_read")?;
            for n in self.rows.lock().unwrap().iter_mut() {
                n.read = true;
            }
            Ok(())
        }
        async fn delete(&self, notification: Notification) -> Result<()> {
            self.record("delete")?;
            self.rows.lock().unwrap().retain(|n| n.id != notification.id);
            Ok(())
        }
        async fn create(&self, new: NewNotification) -> Result<Notification> {
            self.record("create")?;
            let created = Notification {
                id: Uuid::new_v4(),
                title: new.title,
                message: new.message,
                r#type: new.r#type,
                priority: new.priority,
                date: chrono::Utc::now(),
                read: false,
            };
            self.rows.lock().unwrap().insert(0, created.clone());
            Ok(created)
        }
    }
}
