//! Builds parameterized INSERT, SELECT, UPDATE, DELETE for the resources table.

use crate::model::{ListFilter, NewResource, UpdateResource};

/// Table holding resources.
pub const RESOURCE_TABLE: &str = "resources";

/// Columns in the order `PgResourceStore` reads them back.
const COLUMNS: &[&str] = &[
    "id",
    "name",
    "description",
    "category",
    "status",
    "created_at",
    "updated_at",
];

/// Quote identifier for PostgreSQL (identifiers are compile-time constants).
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

fn select_column_list() -> String {
    COLUMNS.iter().map(|c| quoted(c)).collect::<Vec<_>>().join(", ")
}

/// Escape LIKE wildcards so the search term matches literally.
pub fn like_pattern(term: &str) -> String {
    let mut out = String::with_capacity(term.len() + 2);
    out.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('%');
    out
}

/// SQL text plus positional parameters. Every column is TEXT, so every
/// parameter binds as `Option<String>`.
#[derive(Debug, Default)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<Option<String>>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf::default()
    }

    fn push_param(&mut self, v: Option<String>) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

/// SELECT by primary key.
pub fn select_by_id(id: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(Some(id.to_string()));
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = ${}",
        select_column_list(),
        quoted(RESOURCE_TABLE),
        quoted("id"),
        n
    );
    q
}

/// SELECT list: supplied filters AND-ed, newest first.
pub fn select_list(filter: &ListFilter) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut where_parts = Vec::new();
    if let Some(category) = &filter.category {
        let n = q.push_param(Some(category.clone()));
        where_parts.push(format!("{} = ${}", quoted("category"), n));
    }
    if let Some(status) = &filter.status {
        let n = q.push_param(Some(status.clone()));
        where_parts.push(format!("{} = ${}", quoted("status"), n));
    }
    if let Some(term) = &filter.search {
        let n = q.push_param(Some(like_pattern(term)));
        where_parts.push(format!(
            "({} LIKE ${n} OR {} LIKE ${n})",
            quoted("name"),
            quoted("description"),
            n = n
        ));
    }
    let where_clause = if where_parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", where_parts.join(" AND "))
    };
    q.sql = format!(
        "SELECT {} FROM {}{} ORDER BY {} DESC, {} DESC",
        select_column_list(),
        quoted(RESOURCE_TABLE),
        where_clause,
        quoted("created_at"),
        quoted("id")
    );
    q
}

/// INSERT; id and timestamps come from column defaults.
pub fn insert(data: &NewResource) -> QueryBuf {
    let mut q = QueryBuf::new();
    let values = [
        ("name", Some(data.name.clone())),
        ("description", data.description.clone()),
        ("category", data.category.clone()),
        ("status", Some(data.status.as_str().to_string())),
    ];
    let mut cols = Vec::new();
    let mut placeholders = Vec::new();
    for (col, val) in values {
        let n = q.push_param(val);
        cols.push(quoted(col));
        placeholders.push(format!("${}", n));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        quoted(RESOURCE_TABLE),
        cols.join(", "),
        placeholders.join(", "),
        select_column_list()
    );
    q
}

/// UPDATE by id: SET only supplied fields, always refresh updated_at.
pub fn update(id: &str, changes: &UpdateResource) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    if let Some(name) = &changes.name {
        let n = q.push_param(Some(name.clone()));
        sets.push(format!("{} = ${}", quoted("name"), n));
    }
    if let Some(description) = &changes.description {
        let n = q.push_param(description.clone());
        sets.push(format!("{} = ${}", quoted("description"), n));
    }
    if let Some(category) = &changes.category {
        let n = q.push_param(category.clone());
        sets.push(format!("{} = ${}", quoted("category"), n));
    }
    if let Some(status) = changes.status {
        let n = q.push_param(Some(status.as_str().to_string()));
        sets.push(format!("{} = ${}", quoted("status"), n));
    }
    sets.push(format!("{} = NOW()", quoted("updated_at")));
    let id_param = q.push_param(Some(id.to_string()));
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ${} RETURNING {}",
        quoted(RESOURCE_TABLE),
        sets.join(", "),
        quoted("id"),
        id_param,
        select_column_list()
    );
    q
}

/// DELETE by id, returning the removed row.
pub fn delete(id: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(Some(id.to_string()));
    q.sql = format!(
        "DELETE FROM {} WHERE {} = ${} RETURNING {}",
        quoted(RESOURCE_TABLE),
        quoted("id"),
        n,
        select_column_list()
    );
    q
}
