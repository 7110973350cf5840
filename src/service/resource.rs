//! Resource operations: validation, then a single store call.

use crate::error::AppError;
use crate::model::{CreateResource, Resource, ResourceFilter, UpdateResource};
use crate::service::RequestValidator;
use crate::store::ResourceStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct ResourceService {
    store: Arc<dyn ResourceStore>,
}

impl ResourceService {
    pub fn new(store: Arc<dyn ResourceStore>) -> Self {
        ResourceService { store }
    }

    pub fn store(&self) -> &Arc<dyn ResourceStore> {
        &self.store
    }

    /// Validates before touching the store.
    pub async fn create(&self, body: CreateResource) -> Result<Resource, AppError> {
        let new = RequestValidator::validate(body)?;
        let created = self.store.create(new).await?;
        tracing::info!(id = created.id, "resource created");
        Ok(created)
    }

    pub async fn find_all(&self, filter: &ResourceFilter) -> Result<Vec<Resource>, AppError> {
        self.store.find_all(filter).await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Resource, AppError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::resource_not_found(id))
    }

    /// Conditional update: a missing row is reported by the store, not checked beforehand.
    pub async fn update(&self, id: i64, body: UpdateResource) -> Result<Resource, AppError> {
        let changes = RequestValidator::validate_partial(body)?;
        let updated = self
            .store
            .update(id, changes)
            .await?
            .ok_or_else(|| AppError::resource_not_found(id))?;
        tracing::info!(id, "resource updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<Resource, AppError> {
        let deleted = self
            .store
            .delete(id)
            .await?
            .ok_or_else(|| AppError::resource_not_found(id))?;
        tracing::info!(id, "resource deleted");
        Ok(deleted)
    }

    pub async fn count(&self, filter: &ResourceFilter) -> Result<i64, AppError> {
        self.store.count(filter).await
    }

    pub async fn search_by_name(&self, term: &str) -> Result<Vec<Resource>, AppError> {
        let term = RequestValidator::search_term(term)?;
        self.store.find_all(&ResourceFilter::by_name(term)).await
    }
}
