//! In-process adapter. Same contract as the PostgreSQL store; used for local runs
//! (`STORE_BACKEND=memory`) and the test suite.

use super::ResourceStore;
use crate::error::AppError;
use crate::model::{NewResource, Resource, ResourceChanges, ResourceFilter};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Inner {
    rows: BTreeMap<i64, Resource>,
    last_id: i64,
}

#[derive(Default)]
pub struct MemoryResourceStore {
    inner: RwLock<Inner>,
}

impl MemoryResourceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Strictly after `previous`, even if the clock has not advanced.
fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

#[async_trait]
impl ResourceStore for MemoryResourceStore {
    async fn create(&self, new: NewResource) -> Result<Resource, AppError> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let now = Utc::now();
        let resource = Resource {
            id: inner.last_id,
            name: new.name,
            description: new.description,
            category: new.category,
            status: new.status,
            created_at: now,
            updated_at: now,
        };
        inner.rows.insert(resource.id, resource.clone());
        Ok(resource)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Resource>, AppError> {
        Ok(self.inner.read().await.rows.get(&id).cloned())
    }

    async fn find_all(&self, filter: &ResourceFilter) -> Result<Vec<Resource>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .rows
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect())
    }

    async fn update(&self, id: i64, changes: ResourceChanges) -> Result<Option<Resource>, AppError> {
        let mut inner = self.inner.write().await;
        let Some(row) = inner.rows.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = changes.name {
            row.name = name;
        }
        if let Some(description) = changes.description {
            row.description = description;
        }
        if let Some(category) = changes.category {
            row.category = category;
        }
        if let Some(status) = changes.status {
            row.status = status;
        }
        row.updated_at = next_timestamp(row.updated_at);
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: i64) -> Result<Option<Resource>, AppError> {
        Ok(self.inner.write().await.rows.remove(&id))
    }

    async fn count(&self, filter: &ResourceFilter) -> Result<i64, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.rows.values().filter(|r| filter.matches(r)).count() as i64)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
