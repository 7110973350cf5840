//! Builds parameterized INSERT, SELECT, UPDATE, DELETE and COUNT for the resource table.

use super::params::PgBindValue;
use crate::model::{NewResource, ResourceChanges, ResourceFilter};

/// Columns returned by every statement, in `Resource` field order.
const COLUMNS: &str = r#""id", "name", "description", "category", "status", "created_at", "updated_at""#;

/// Quote identifier for PostgreSQL (safe: only from config).
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Escape `%`, `_` and `\` so a search term matches literally inside LIKE.
pub fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len() + 2);
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<PgBindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: impl Into<PgBindValue>) -> usize {
        self.params.push(v.into());
        self.params.len()
    }

    /// WHERE clause from filter; params bound in category, status, search order.
    fn where_clause(&mut self, filter: &ResourceFilter) -> String {
        let mut parts = Vec::new();
        if let Some(category) = &filter.category {
            let n = self.push_param(category.as_str());
            parts.push(format!("\"category\" = ${}", n));
        }
        if let Some(status) = &filter.status {
            let n = self.push_param(status.as_str());
            parts.push(format!("\"status\" = ${}", n));
        }
        if let Some(search) = &filter.search {
            let n = self.push_param(format!("%{}%", escape_like(search)));
            parts.push(format!("\"name\" ILIKE ${}", n));
        }
        if parts.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", parts.join(" AND "))
        }
    }
}

/// SELECT by primary key.
pub fn select_by_id(table: &str, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(id);
    q.sql = format!("SELECT {} FROM {} WHERE \"id\" = ${}", COLUMNS, quoted(table), n);
    q
}

/// SELECT list with optional filters, ORDER BY id.
pub fn select_list(table: &str, filter: &ResourceFilter) -> QueryBuf {
    let mut q = QueryBuf::new();
    let where_clause = q.where_clause(filter);
    q.sql = format!(
        "SELECT {} FROM {}{} ORDER BY \"id\"",
        COLUMNS,
        quoted(table),
        where_clause
    );
    q
}

/// COUNT(*) with the same filter semantics as `select_list`.
pub fn count(table: &str, filter: &ResourceFilter) -> QueryBuf {
    let mut q = QueryBuf::new();
    let where_clause = q.where_clause(filter);
    q.sql = format!("SELECT COUNT(*) FROM {}{}", quoted(table), where_clause);
    q
}

/// INSERT one row; id and timestamps come from column defaults.
pub fn insert(table: &str, new: &NewResource) -> QueryBuf {
    let mut q = QueryBuf::new();
    let name = q.push_param(new.name.as_str());
    let description = q.push_param(new.description.clone());
    let category = q.push_param(new.category.clone());
    let status = q.push_param(new.status.as_str());
    q.sql = format!(
        "INSERT INTO {} (\"name\", \"description\", \"category\", \"status\") VALUES (${}, ${}, ${}, ${}) RETURNING {}",
        quoted(table),
        name,
        description,
        category,
        status,
        COLUMNS
    );
    q
}

/// UPDATE by id: SET only provided fields. `updated_at` always moves forward, even when two
/// updates land within the same clock tick.
pub fn update(table: &str, id: i64, changes: &ResourceChanges) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    if let Some(name) = &changes.name {
        let n = q.push_param(name.as_str());
        sets.push(format!("\"name\" = ${}", n));
    }
    if let Some(description) = &changes.description {
        let n = q.push_param(description.clone());
        sets.push(format!("\"description\" = ${}", n));
    }
    if let Some(category) = &changes.category {
        let n = q.push_param(category.clone());
        sets.push(format!("\"category\" = ${}", n));
    }
    if let Some(status) = &changes.status {
        let n = q.push_param(status.as_str());
        sets.push(format!("\"status\" = ${}", n));
    }
    sets.push(
        "\"updated_at\" = GREATEST(NOW(), \"updated_at\" + INTERVAL '1 microsecond')".to_string(),
    );
    let id_param = q.push_param(id);
    q.sql = format!(
        "UPDATE {} SET {} WHERE \"id\" = ${} RETURNING {}",
        quoted(table),
        sets.join(", "),
        id_param,
        COLUMNS
    );
    q
}

/// DELETE by id, returning the removed row.
pub fn delete(table: &str, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(id);
    q.sql = format!(
        "DELETE FROM {} WHERE \"id\" = ${} RETURNING {}",
        quoted(table),
        n,
        COLUMNS
    );
    q
}
