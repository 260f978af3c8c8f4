//! The property scope holds the properties the user can manage and the one
//! they are currently working in. Every property-scoped page is gated on a
//! selection existing; see `extractors::SelectedProperty`.

pub mod components;
pub mod db_ops;
pub mod models;

use crate::errors::ScopeError;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use futures::FutureExt;
use models::Property;
use std::{panic::AssertUnwindSafe, sync::Arc, time::Duration};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Where the list of properties comes from.
#[async_trait]
pub trait PropertyLister: Send + Sync {
    async fn list_properties(&self) -> Result<Vec<Property>>;
}

pub type SharedScope = Arc<RwLock<PropertyScope>>;

#[derive(Debug)]
pub struct PropertyScope {
    properties: Vec<Property>,
    selected: Option<Property>,
    is_loading: bool,
    /// Bumped by every load cycle; only the latest cycle may apply its
    /// result.
    generation: u64,
}

impl Default for PropertyScope {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyScope {
    /// A fresh scope is loading until its first load cycle finishes.
    pub fn new() -> Self {
        PropertyScope {
            properties: Vec::new(),
            selected: None,
            is_loading: true,
            generation: 0,
        }
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn selected(&self) -> Option<&Property> {
        self.selected.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// True while nothing is selected; property-scoped views must send the
    /// user to the picker instead.
    pub fn is_gated(&self) -> bool {
        self.selected.is_none()
    }

    /// Replace the selection. Clearing always works; selecting requires the
    /// property to be in the current list, and the listed record (not the
    /// caller's copy) is what gets stored.
    pub fn select(
        &mut self,
        property: Option<Property>,
    ) -> Result<(), ScopeError> {
        match property {
            None => {
                self.clear();
                Ok(())
            }
            Some(p) => self.select_by_id(p.id).map(|_| ()),
        }
    }

    pub fn clear(&mut self) {
        if let Some(prev) = self.selected.take() {
            tracing::info!(property_id = %prev.id, "property selection cleared");
        }
    }

    pub fn select_by_id(&mut self, id: Uuid) -> Result<&Property, ScopeError> {
        let listed = self
            .properties
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(ScopeError::NotListed(id))?;
        tracing::info!(property_id = %id, name = %listed.name, "property selected");

        let selected: &Property = self.selected.insert(listed);
        Ok(selected)
    }

    fn finish_load(&mut self, outcome: Result<Vec<Property>>) {
        match outcome {
            Ok(properties) => {
                tracing::info!(count = properties.len(), "loaded properties");
                // A previous selection survives a reload only if it is
                // still listed; it is refreshed to the listed record.
                self.selected = self.selected.take().and_then(|prev| {
                    properties.iter().find(|p| p.id == prev.id).cloned()
                });
                if self.selected.is_none() {
                    self.selected = properties.first().cloned();
                }
                self.properties = properties;
            }
            Err(e) => {
                tracing::warn!(error = ?e, "could not load properties");
                self.properties.clear();
                self.selected = None;
            }
        }
        self.is_loading = false;
    }
}

/// One load cycle. The scope is shared with request handlers, so the lock
/// is only taken to start the cycle and to apply the result, never across
/// the listing call itself.
///
/// Cycles may overlap (start-up load plus a reload, or two reloads). The
/// most recently started one wins; an older cycle finishing afterwards is
/// discarded, and `is_loading` stays set until the latest one lands.
pub async fn load(
    scope: &RwLock<PropertyScope>,
    lister: &dyn PropertyLister,
    timeout: Duration,
) {
    let generation = {
        let mut scope = scope.write().await;
        scope.generation += 1;
        scope.is_loading = true;
        scope.generation
    };
    let outcome = fetch_listing(lister, timeout).await;

    let mut scope = scope.write().await;
    if scope.generation != generation {
        tracing::debug!(generation, "discarding superseded property listing");
        return;
    }
    scope.finish_load(outcome);
}

/// Every way the listing call can go wrong (error, timeout, panic) comes
/// back as `Err`, so callers always get to finish the load cycle.
async fn fetch_listing(
    lister: &dyn PropertyLister,
    timeout: Duration,
) -> Result<Vec<Property>> {
    let call = AssertUnwindSafe(lister.list_properties()).catch_unwind();
    match tokio::time::timeout(timeout, call).await {
        Err(_) => Err(anyhow!("property listing timed out after {timeout:?}")),
        Ok(Err(_)) => Err(anyhow!("property listing panicked")),
        Ok(Ok(result)) => result,
    }
}

#[cfg(test)]
pub mod fakes {
    use super::*;

    pub struct StaticLister(pub Vec<Property>);

    #[async_trait]
    impl PropertyLister for StaticLister {
        async fn list_properties(&self) -> Result<Vec<Property>> {
            Ok(self.0.clone())
        }
    }
}
