//! Per-domain record access.
//!
//! Every admin page reads and writes one backing table through a
//! [`Store<T>`]. Writes are never reflected in a list the caller already
//! holds: the caller sees a change only after its next [`Store::list`] call,
//! and every write path in the application re-lists afterwards.

pub mod memory;
pub mod postgres;

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    /// The backing store could not be reached.
    Unreachable(String),
    /// The query or payload was refused (unknown field, bad value, ...).
    Rejected(String),
    /// A uniqueness or other integrity constraint was violated.
    Constraint(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unreachable(e) => write!(f, "Store unreachable: {e}"),
            StoreError::Rejected(e) => write!(f, "Query rejected: {e}"),
            StoreError::Constraint(e) => write!(f, "Constraint violated: {e}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            // SQLSTATE class 23: integrity constraint violation
            sqlx::Error::Database(db) if db.code().is_some_and(|c| c.starts_with("23")) => {
                StoreError::Constraint(db.message().to_string())
            }
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed => StoreError::Unreachable(e.to_string()),
            _ => StoreError::Rejected(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Rejected(format!("Malformed record: {e}"))
    }
}

/// A row of one domain table.
///
/// The record is an envelope (`id` plus creation timestamp, both assigned by
/// the store) around the editable `Fields`. Create and update take `Fields`
/// only, so neither the id nor the timestamp can be written by callers.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + Unpin + 'static {
    type Fields: Serialize + DeserializeOwned + Clone + Send + Sync + 'static;

    /// Backing table name.
    const TABLE: &'static str;
    /// Name of the creation timestamp column (`submitted_at` or `created_at`).
    const CREATED_AT: &'static str;
    /// Every column of the table. Order and filter fields must come from here.
    const FIELDS: &'static [&'static str];

    fn id(&self) -> Uuid;
    fn created_at(&self) -> DateTime<Utc>;
    fn fields(&self) -> &Self::Fields;
    fn assemble(id: Uuid, created_at: DateTime<Utc>, fields: Self::Fields) -> Self;

    fn has_field(name: &str) -> bool {
        Self::FIELDS.contains(&name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Int(i64),
    Bool(bool),
    Timestamp(DateTime<Utc>),
    Id(Uuid),
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        FilterValue::Text(v.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        FilterValue::Text(v)
    }
}

impl From<i64> for FilterValue {
    fn from(v: i64) -> Self {
        FilterValue::Int(v)
    }
}

impl From<bool> for FilterValue {
    fn from(v: bool) -> Self {
        FilterValue::Bool(v)
    }
}

impl From<DateTime<Utc>> for FilterValue {
    fn from(v: DateTime<Utc>) -> Self {
        FilterValue::Timestamp(v)
    }
}

impl From<Uuid> for FilterValue {
    fn from(v: Uuid) -> Self {
        FilterValue::Id(v)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Gte,
    Lt,
    Lte,
}

impl FilterOp {
    pub fn sql(&self) -> &'static str {
        match self {
            FilterOp::Eq => " = ",
            FilterOp::Gte => " >= ",
            FilterOp::Lt => " < ",
            FilterOp::Lte => " <= ",
        }
    }

    /// Whether `ordering` (row value compared to the filter value) passes.
    pub fn accepts(&self, ordering: std::cmp::Ordering) -> bool {
        use std::cmp::Ordering::*;
        match self {
            FilterOp::Eq => ordering == Equal,
            FilterOp::Gte => ordering != Less,
            FilterOp::Lt => ordering == Less,
            FilterOp::Lte => ordering != Greater,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: String,
    pub op: FilterOp,
    pub value: FilterValue,
}

impl Filter {
    fn new(field: &str, op: FilterOp, value: impl Into<FilterValue>) -> Self {
        Filter { field: field.to_string(), op, value: value.into() }
    }

    pub fn eq(field: &str, value: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterOp::Eq, value)
    }

    pub fn gte(field: &str, value: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterOp::Gte, value)
    }

    pub fn lt(field: &str, value: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterOp::Lt, value)
    }

    pub fn lte(field: &str, value: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterOp::Lte, value)
    }
}

/// Ordering, filters and optional row limit for [`Store::list`].
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub order_field: String,
    pub ascending: bool,
    pub filters: Vec<Filter>,
    pub limit: Option<usize>,
}

impl ListQuery {
    pub fn ordered_by(field: &str, ascending: bool) -> Self {
        ListQuery {
            order_field: field.to_string(),
            ascending,
            filters: Vec::new(),
            limit: None,
        }
    }

    /// Newest submissions first, the default ordering of every admin page.
    pub fn newest_first<T: Record>() -> Self {
        Self::ordered_by(T::CREATED_AT, false)
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Reject order or filter fields the record does not have.
    pub fn check<T: Record>(&self) -> Result<(), StoreError> {
        if !T::has_field(&self.order_field) {
            return Err(StoreError::Rejected(format!(
                "Unknown order field '{}' for {}",
                self.order_field,
                T::TABLE
            )));
        }
        check_filters::<T>(&self.filters)
    }
}

pub fn check_filters<T: Record>(filters: &[Filter]) -> Result<(), StoreError> {
    match filters.iter().find(|f| !T::has_field(&f.field)) {
        Some(f) => Err(StoreError::Rejected(format!(
            "Unknown filter field '{}' for {}",
            f.field,
            T::TABLE
        ))),
        None => Ok(()),
    }
}

/// Data access for one domain table.
#[async_trait]
pub trait Store<T: Record>: Send + Sync {
    /// All records matching the query's filters, in the query's order.
    async fn list(&self, query: &ListQuery) -> Result<Vec<T>, StoreError>;

    /// Insert one record. The store assigns `id` and the creation timestamp.
    async fn create(&self, fields: &T::Fields) -> Result<T, StoreError>;

    /// Replace the editable fields of the record with `id`.
    /// Updating a missing id is not an error.
    async fn update(&self, id: Uuid, fields: &T::Fields) -> Result<(), StoreError>;

    /// Remove the record with `id`. Removing a missing id is not an error.
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;

    async fn count(&self, filters: &[Filter]) -> Result<u64, StoreError>;
}

/// Columns a create or update writes: the payload keys minus the envelope.
/// On create, null values are left out so column defaults apply.
pub(crate) fn writable_columns<T: Record>(
    payload: &serde_json::Value,
    skip_null: bool,
) -> Result<Vec<String>, StoreError> {
    let object = payload
        .as_object()
        .ok_or_else(|| StoreError::Rejected("Record fields must be an object".to_string()))?;

    let mut columns = Vec::with_capacity(object.len());
    for (key, value) in object {
        if key == "id" || key == T::CREATED_AT || (skip_null && value.is_null()) {
            continue;
        }
        if !T::has_field(key) {
            return Err(StoreError::Rejected(format!("Unknown field '{key}' for {}", T::TABLE)));
        }
        columns.push(key.clone());
    }
    Ok(columns)
}
