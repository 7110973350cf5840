//! Shared application state for all routes.

use crate::service::ResourceService;
use crate::store::ResourceStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub resources: ResourceService,
}

impl AppState {
    pub fn new(store: Arc<dyn ResourceStore>) -> Self {
        AppState {
            resources: ResourceService::new(store),
        }
    }
}
