//! Resource Handler interface: the storage-agnostic seam the dispatcher calls into.
//!
//! A `ResourceHandler` owns one resource type's storage however it likes — the
//! dispatcher only ever hands it and receives back a `Document`. This replaces the
//! teacher's `Backend`/`UserBackend`/`GroupBackend` split (which is tied to a SQL
//! storage layer) with a single type-erased trait per resource type, since storage is
//! out of scope here: any `ResourceHandler` impl is free to be in-memory, a thin client
//! over a remote directory, or backed by a real database.

use crate::config::DispatchConfig;
use crate::document::Document;
use crate::error::ScimResult;
use crate::filter::Filter;
use crate::patch::PatchOperation;
use crate::query::SortSpec;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// The result of a `search`: the page of matching resources plus the total count
/// across all pages (used to populate `ListResponse.totalResults`).
pub struct SearchResult {
    pub resources: Vec<Document>,
    pub total: usize,
}

#[async_trait]
pub trait ResourceHandler: Send + Sync {
    async fn create(&self, resource: Document) -> ScimResult<Document>;
    async fn get(&self, id: &str) -> ScimResult<Document>;
    async fn replace(&self, id: &str, resource: Document) -> ScimResult<Document>;
    async fn delete(&self, id: &str) -> ScimResult<()>;
    async fn search(
        &self,
        filter: &Filter,
        sort: Option<&SortSpec>,
        start_index: usize,
        count: usize,
    ) -> ScimResult<SearchResult>;

    /// Applies PATCH operations via read-modify-write. Handlers with native partial-update
    /// support (e.g. a document database's `$set`) may override this default.
    async fn patch(
        &self,
        id: &str,
        operations: &[PatchOperation],
        config: &DispatchConfig,
    ) -> ScimResult<Document> {
        let mut doc = self.get(id).await?;
        for op in operations {
            crate::patch::apply(&mut doc, op, config)?;
        }
        self.replace(id, doc).await
    }
}

/// A registry of handlers keyed by resource-type endpoint name (`"Users"`, `"Groups"`).
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: RwLock<HashMap<String, Arc<dyn ResourceHandler>>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
        }
    }

    pub async fn register(&self, endpoint: impl Into<String>, handler: Arc<dyn ResourceHandler>) {
        self.handlers.write().await.insert(endpoint.into(), handler);
    }

    pub async fn get(&self, endpoint: &str) -> Option<Arc<dyn ResourceHandler>> {
        self.handlers.read().await.get(endpoint).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryHandler;

    #[tokio::test]
    async fn registry_round_trips_a_registered_handler() {
        let registry = HandlerRegistry::new();
        registry.register("Users", Arc::new(InMemoryHandler::new("User"))).await;
        assert!(registry.get("Users").await.is_some());
        assert!(registry.get("Groups").await.is_none());
    }
}
