//! Resource entity and the typed inputs accepted at the HTTP boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Status assigned when a create request does not provide one.
pub const DEFAULT_STATUS: &str = "active";

/// A persisted resource row. Serialized with camelCase keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// POST body. `name` is optional here so a missing name surfaces as a validation error
/// rather than a JSON rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateResource {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
}

/// PUT body. Absent fields are left untouched; `description` and `category` may be set to
/// `null` explicitly to clear them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateResource {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub category: Option<Option<String>>,
    pub status: Option<String>,
}

/// Distinguishes an explicit `null` (`Some(None)`) from an absent field (`None`).
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Validated insert, ready for the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewResource {
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub status: String,
}

/// Validated partial update, ready for the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceChanges {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub category: Option<Option<String>>,
    pub status: Option<String>,
}

/// List/count filter. `category` and `status` match exactly; `search` is a
/// case-insensitive substring of `name`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceFilter {
    pub category: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
}

impl ResourceFilter {
    /// Build from raw query parameters. Values are trimmed; unknown keys and empty values
    /// are dropped.
    pub fn from_query(params: &HashMap<String, String>) -> Self {
        let pick = |key: &str| {
            params
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };
        ResourceFilter {
            category: pick("category"),
            status: pick("status"),
            search: pick("search"),
        }
    }

    pub fn by_name(term: impl Into<String>) -> Self {
        ResourceFilter {
            search: Some(term.into()),
            ..Default::default()
        }
    }

    /// In-process evaluation, shared by the memory store.
    pub fn matches(&self, resource: &Resource) -> bool {
        if let Some(category) = &self.category {
            if resource.category.as_deref() != Some(category.as_str()) {
                return false;
            }
        }
        if let Some(status) = &self.status {
            if resource.status != *status {
                return false;
            }
        }
        if let Some(search) = &self.search {
            if !resource
                .name
                .to_lowercase()
                .contains(&search.to_lowercase())
            {
                return false;
            }
        }
        true
    }
}
