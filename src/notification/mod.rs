//! The notification center: the list of notifications shown on the
//! notifications page, its read state, the category / unread-only filters,
//! and the two-step (request, then confirm) delete flow.
//!
//! The list lives behind an `Arc` and is copied on write, so a snapshot
//! handed to a renderer never changes underneath it.

pub mod components;
pub mod db_ops;
pub mod models;
pub mod sync;

use anyhow::Result;
use async_trait::async_trait;
use models::{CategoryFilter, NewNotification, Notification};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Backend for notifications. Not-found ids are not errors: `mark_read`
/// and `delete` on a missing row succeed without doing anything.
#[async_trait]
pub trait NotificationStore: Send + Sync {
    /// Newest first, at most `limit` rows.
    async fn list(&self, limit: i64) -> Result<Vec<Notification>>;
    async fn mark_read(&self, id: Uuid) -> Result<()>;
    async fn mark_all_read(&self) -> Result<()>;
    async fn delete(&self, notification: Notification) -> Result<()>;
    async fn create(&self, new: NewNotification) -> Result<Notification>;
}

pub type SharedCenter = Arc<RwLock<NotificationCenter>>;

#[derive(Debug, Default)]
pub struct NotificationCenter {
    notifications: Arc<Vec<Notification>>,
    category_filter: CategoryFilter,
    unread_only: bool,
    /// Candidate captured by `request_delete`, waiting on the user.
    pending_delete: Option<Notification>,
}

impl NotificationCenter {
    pub fn new(notifications: Vec<Notification>) -> Self {
        NotificationCenter {
            notifications: Arc::new(notifications),
            ..Default::default()
        }
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn snapshot(&self) -> Arc<Vec<Notification>> {
        Arc::clone(&self.notifications)
    }

    pub fn category_filter(&self) -> CategoryFilter {
        self.category_filter
    }

    pub fn set_category_filter(&mut self, filter: CategoryFilter) {
        self.category_filter = filter;
    }

    pub fn unread_only(&self) -> bool {
        self.unread_only
    }

    pub fn set_unread_only(&mut self, unread_only: bool) {
        self.unread_only = unread_only;
    }

    /// The notifications the list view should show right now, in source
    /// order. Recomputed on every call.
    pub fn derive_visible(&self) -> Vec<&Notification> {
        self.notifications
            .iter()
            .filter(|n| !(self.unread_only && n.read))
            .filter(|n| self.category_filter.admits(n.r#type))
            .collect()
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    pub fn mark_read(&mut self, id: Uuid) {
        if let Some(pos) = self.position(id) {
            if !self.notifications[pos].read {
                Arc::make_mut(&mut self.notifications)[pos].read = true;
            }
        }
    }

    pub fn mark_all_read(&mut self) {
        if self.unread_count() == 0 {
            return;
        }
        for n in Arc::make_mut(&mut self.notifications) {
            n.read = true;
        }
    }

    /// Remove a notification outright. The view never calls this directly;
    /// it goes through `request_delete` / `confirm_delete`.
    pub fn delete(&mut self, id: Uuid) -> Option<Notification> {
        let pos = self.position(id)?;
        Some(Arc::make_mut(&mut self.notifications).remove(pos))
    }

    /// Install a fresh listing, newest first. A pending delete whose
    /// candidate is gone from the new listing is dropped.
    pub fn replace_all(&mut self, notifications: Vec<Notification>) {
        self.notifications = Arc::new(notifications);
        if let Some(candidate) = &self.pending_delete {
            if self.position(candidate.id).is_none() {
                self.pending_delete = None;
            }
        }
    }

    /// Newly created notifications go on top.
    pub fn insert(&mut self, notification: Notification) {
        Arc::make_mut(&mut self.notifications).insert(0, notification);
    }

    /// Capture `id` as the delete candidate and hand it back for the
    /// confirmation prompt. Unknown ids capture nothing.
    pub fn request_delete(&mut self, id: Uuid) -> Option<&Notification> {
        let pos = self.position(id)?;
        let candidate: &Notification =
            self.pending_delete.insert(self.notifications[pos].clone());
        Some(candidate)
    }

    pub fn pending_delete(&self) -> Option<&Notification> {
        self.pending_delete.as_ref()
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Delete the captured candidate, if there is one.
    pub fn confirm_delete(&mut self) -> Option<Notification> {
        let candidate = self.pending_delete.take()?;
        self.delete(candidate.id)
    }

    fn position(&self, id: Uuid) -> Option<usize> {
        self.notifications.iter().position(|n| n.id == id)
    }
}
