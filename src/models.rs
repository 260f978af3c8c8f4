use super::{
    notification::{NotificationCenter, NotificationStore, SharedCenter},
    property::{PropertyLister, PropertyScope, SharedScope},
};
use std::{sync::Arc, time::Duration};
use tokio::sync::RwLock;

/// Everything handlers need. The two containers are independent: nothing
/// that holds one lock ever takes the other.
#[derive(Clone)]
pub struct AppState {
    pub scope: SharedScope,
    pub notifications: SharedCenter,
    pub property_lister: Arc<dyn PropertyLister>,
    pub notification_store: Arc<dyn NotificationStore>,
    pub property_load_timeout: Duration,
}

impl AppState {
    pub fn new(
        property_lister: Arc<dyn PropertyLister>,
        notification_store: Arc<dyn NotificationStore>,
        property_load_timeout: Duration,
    ) -> Self {
        AppState {
            scope: Arc::new(RwLock::new(PropertyScope::new())),
            notifications: Arc::new(RwLock::new(NotificationCenter::default())),
            property_lister,
            notification_store,
            property_load_timeout,
        }
    }
}
