//! In-memory `ResourceHandler` reference implementation, used by this crate's own
//! integration tests and the bundled HTTP demo. Storage is out of scope for the
//! protocol engine itself (the teacher always talks to sqlite/postgres); this fixture
//! exists only so the dispatcher has something concrete to dispatch to.

use crate::document::Document;
use crate::error::ScimError;
use crate::filter::{evaluate, Filter};
use crate::handler::{ResourceHandler, SearchResult};
use crate::query::SortOrder;
use crate::resource::{stamp_created, stamp_modified, ResourceType};
use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::HashMap;
use tokio::sync::RwLock;

pub struct InMemoryHandler {
    resource_type: ResourceType,
    store: RwLock<HashMap<String, Document>>,
}

impl InMemoryHandler {
    pub fn new(resource_type_name: &str) -> Self {
        let resource_type = match resource_type_name {
            "Group" => ResourceType::Group,
            _ => ResourceType::User,
        };
        Self {
            resource_type,
            store: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl ResourceHandler for InMemoryHandler {
    async fn create(&self, mut resource: Document) -> Result<Document, ScimError> {
        let id = uuid::Uuid::new_v4().to_string();
        let location = format!("/{}/{}", self.resource_type.endpoint(), id);
        stamp_created(&mut resource, self.resource_type, &id, &location);

        let mut store = self.store.write().await;
        store.insert(id, resource.clone());
        Ok(resource)
    }

    async fn get(&self, id: &str) -> Result<Document, ScimError> {
        self.store
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| ScimError::NotFound(format!("no resource with id '{}'", id)))
    }

    async fn replace(&self, id: &str, mut resource: Document) -> Result<Document, ScimError> {
        let mut store = self.store.write().await;
        if !store.contains_key(id) {
            return Err(ScimError::NotFound(format!("no resource with id '{}'", id)));
        }
        resource
            .as_object_mut()
            .ok_or_else(|| ScimError::InvalidValue("resource body must be an object".to_string()))?
            .insert("id".to_string(), serde_json::json!(id));
        stamp_modified(&mut resource);
        store.insert(id.to_string(), resource.clone());
        Ok(resource)
    }

    async fn delete(&self, id: &str) -> Result<(), ScimError> {
        let mut store = self.store.write().await;
        store
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| ScimError::NotFound(format!("no resource with id '{}'", id)))
    }

    async fn search(
        &self,
        filter: &Filter,
        sort: Option<&crate::query::SortSpec>,
        start_index: usize,
        count: usize,
    ) -> Result<SearchResult, ScimError> {
        let store = self.store.read().await;
        let mut matched: Vec<Document> = store
            .values()
            .filter(|doc| evaluate(filter, doc))
            .cloned()
            .collect();

        if let Some(spec) = sort {
            matched.sort_by(|a, b| {
                let ordering = compare_by_path(a, b, &spec.attribute);
                match spec.order {
                    SortOrder::Ascending => ordering,
                    SortOrder::Descending => ordering.reverse(),
                }
            });
        }

        let total = matched.len();
        let page: Vec<Document> = matched
            .into_iter()
            .skip(start_index.saturating_sub(1))
            .take(count)
            .collect();

        Ok(SearchResult { resources: page, total })
    }
}

fn compare_by_path(a: &Document, b: &Document, path: &str) -> Ordering {
    match (a.get_path(path), b.get_path(path)) {
        (Some(av), Some(bv)) => compare_values(av, bv),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

fn compare_values(a: &serde_json::Value, b: &serde_json::Value) -> Ordering {
    match (a.as_str(), b.as_str()) {
        (Some(a), Some(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
        _ => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
            _ => Ordering::Equal,
        },
    }
}
