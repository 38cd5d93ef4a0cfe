//! In-process store used by tests and local demos.

use std::cmp::Ordering;
use std::marker::PhantomData;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Filter, FilterValue, ListQuery, Record, Store, StoreError, check_filters};

struct Inner<T> {
    records: Vec<T>,
    failure: Option<StoreError>,
    last_created: Option<DateTime<Utc>>,
}

/// A [`Store`] backed by a vector behind a lock.
///
/// Sorting and filtering follow PostgreSQL semantics closely enough for the
/// handlers: nulls sort after every value, timestamps compare as instants.
/// `fail_with` makes every subsequent call return the given error until
/// `clear_failure` is called.
pub struct MemoryStore<T: Record> {
    inner: RwLock<Inner<T>>,
    _record: PhantomData<T>,
}

impl<T: Record> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> MemoryStore<T> {
    pub fn new() -> Self {
        MemoryStore {
            inner: RwLock::new(Inner {
                records: Vec::new(),
                failure: None,
                last_created: None,
            }),
            _record: PhantomData,
        }
    }

    /// Seed a fully formed record, keeping its id and timestamp.
    pub async fn insert(&self, record: T) {
        self.inner.write().await.records.push(record);
    }

    pub async fn fail_with(&self, error: StoreError) {
        self.inner.write().await.failure = Some(error);
    }

    pub async fn clear_failure(&self) {
        self.inner.write().await.failure = None;
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn check_failure<T>(inner: &Inner<T>) -> Result<(), StoreError> {
    match &inner.failure {
        Some(e) => Err(e.clone()),
        None => Ok(()),
    }
}

fn field_of<'a>(row: &'a Value, field: &str) -> &'a Value {
    row.get(field).unwrap_or(&Value::Null)
}

fn as_instant(v: &Value) -> Option<DateTime<Utc>> {
    v.as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.with_timezone(&Utc))
}

/// Compare two JSON cells. `None` when the kinds are not comparable.
fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        (Value::Null, _) => Some(Ordering::Greater),
        (_, Value::Null) => Some(Ordering::Less),
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        (Value::String(x), Value::String(y)) => match (as_instant(a), as_instant(b)) {
            (Some(ta), Some(tb)) => Some(ta.cmp(&tb)),
            _ => Some(x.cmp(y)),
        },
        _ => None,
    }
}

fn filter_json(value: &FilterValue) -> Value {
    match value {
        FilterValue::Text(s) => Value::String(s.clone()),
        FilterValue::Int(n) => Value::from(*n),
        FilterValue::Bool(b) => Value::Bool(*b),
        FilterValue::Timestamp(t) => Value::String(t.to_rfc3339()),
        FilterValue::Id(id) => Value::String(id.to_string()),
    }
}

fn matches(row: &Value, filters: &[Filter]) -> bool {
    filters.iter().all(|f| {
        let cell = field_of(row, &f.field);
        // SQL comparisons against NULL are never true
        if cell.is_null() {
            return false;
        }
        compare_values(cell, &filter_json(&f.value)).is_some_and(|o| f.op.accepts(o))
    })
}

fn rows_of<T: Record>(records: &[T]) -> Result<Vec<(Value, &T)>, StoreError> {
    records
        .iter()
        .map(|r| Ok((serde_json::to_value(r)?, r)))
        .collect()
}

#[async_trait]
impl<T: Record> Store<T> for MemoryStore<T> {
    async fn list(&self, query: &ListQuery) -> Result<Vec<T>, StoreError> {
        query.check::<T>()?;
        let inner = self.inner.read().await;
        check_failure(&inner)?;

        let mut rows: Vec<(Value, &T)> = rows_of(&inner.records)?
            .into_iter()
            .filter(|(row, _)| matches(row, &query.filters))
            .collect();

        let field = query.order_field.as_str();
        rows.sort_by(|(a, _), (b, _)| {
            let ord = compare_values(field_of(a, field), field_of(b, field))
                .unwrap_or(Ordering::Equal);
            if query.ascending { ord } else { ord.reverse() }
        });

        let limit = query.limit.unwrap_or(usize::MAX);
        Ok(rows.into_iter().take(limit).map(|(_, r)| r.clone()).collect())
    }

    async fn create(&self, fields: &T::Fields) -> Result<T, StoreError> {
        let mut inner = self.inner.write().await;
        check_failure(&inner)?;

        // Strictly increasing timestamps keep "newest first" deterministic.
        let mut now = Utc::now();
        if let Some(last) = inner.last_created {
            if now <= last {
                now = last + Duration::microseconds(1);
            }
        }
        inner.last_created = Some(now);

        let record = T::assemble(Uuid::new_v4(), now, fields.clone());
        inner.records.push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: Uuid, fields: &T::Fields) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        check_failure(&inner)?;

        if let Some(slot) = inner.records.iter_mut().find(|r| r.id() == id) {
            *slot = T::assemble(slot.id(), slot.created_at(), fields.clone());
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        check_failure(&inner)?;
        inner.records.retain(|r| r.id() != id);
        Ok(())
    }

    async fn count(&self, filters: &[Filter]) -> Result<u64, StoreError> {
        check_filters::<T>(filters)?;
        let inner = self.inner.read().await;
        check_failure(&inner)?;

        let n = rows_of(&inner.records)?
            .iter()
            .filter(|(row, _)| matches(row, filters))
            .count();
        Ok(n as u64)
    }
}
