//! Request validation for resource payloads.

use crate::error::AppError;
use crate::model::{CreateResource, NewResource, ResourceChanges, UpdateResource, DEFAULT_STATUS};

pub const MIN_NAME_LENGTH: usize = 3;
pub const MAX_NAME_LENGTH: usize = 100;

pub struct RequestValidator;

impl RequestValidator {
    /// Validate a create body. `name` is required; status falls back to the default.
    pub fn validate(body: CreateResource) -> Result<NewResource, AppError> {
        let name = match body.name {
            Some(name) if !name.trim().is_empty() => validate_name(&name)?,
            _ => return Err(AppError::Validation("Name is required".into())),
        };
        Ok(NewResource {
            name,
            description: body.description,
            category: body.category,
            status: body.status.unwrap_or_else(|| DEFAULT_STATUS.to_string()),
        })
    }

    /// Validate only the fields present in body (for PUT). Missing `name` is fine.
    pub fn validate_partial(body: UpdateResource) -> Result<ResourceChanges, AppError> {
        let name = match body.name {
            Some(name) if name.trim().is_empty() => {
                return Err(AppError::Validation("Name cannot be empty".into()))
            }
            Some(name) => Some(validate_name(&name)?),
            None => None,
        };
        Ok(ResourceChanges {
            name,
            description: body.description,
            category: body.category,
            status: body.status,
        })
    }

    /// Non-blank search term, trimmed.
    pub fn search_term(term: &str) -> Result<String, AppError> {
        let term = term.trim();
        if term.is_empty() {
            return Err(AppError::Validation("Search term is required".into()));
        }
        Ok(term.to_string())
    }
}

/// Returns the trimmed name when its length is within bounds. The lower bound applies to
/// the trimmed value, the upper bound to the value as submitted.
fn validate_name(raw: &str) -> Result<String, AppError> {
    let name = raw.trim();
    if name.chars().count() < MIN_NAME_LENGTH {
        return Err(AppError::Validation(format!(
            "Name must be at least {} characters long",
            MIN_NAME_LENGTH
        )));
    }
    if raw.chars().count() > MAX_NAME_LENGTH {
        return Err(AppError::Validation(format!(
            "Name must not exceed {} characters",
            MAX_NAME_LENGTH
        )));
    }
    Ok(name.to_string())
}
