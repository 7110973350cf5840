//! ResourceService: validated CRUD over a ResourceStore.

mod resource;
mod validation;
pub use resource::ResourceService;
pub use validation::{RequestValidator, MAX_NAME_LENGTH, MIN_NAME_LENGTH};
