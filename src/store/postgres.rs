use std::marker::PhantomData;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::{
    Filter, FilterValue, ListQuery, Record, Store, StoreError, check_filters, writable_columns,
};

/// PostgreSQL-backed [`Store`], one generic implementation for every table.
///
/// Rows travel as `jsonb` (`to_jsonb` on the way out, `jsonb_populate_record`
/// on the way in) so the column list never has to be spelled out per type.
/// Column names in generated SQL always come from [`Record::FIELDS`].
pub struct PgStore<T: Record> {
    pool: PgPool,
    _record: PhantomData<T>,
}

impl<T: Record> PgStore<T> {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool, _record: PhantomData }
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filters: &[Filter]) {
    for (i, f) in filters.iter().enumerate() {
        qb.push(if i == 0 { " WHERE " } else { " AND " });
        qb.push(&f.field);
        qb.push(f.op.sql());
        match &f.value {
            FilterValue::Text(s) => qb.push_bind(s.clone()),
            FilterValue::Int(n) => qb.push_bind(*n),
            FilterValue::Bool(b) => qb.push_bind(*b),
            FilterValue::Timestamp(t) => qb.push_bind(*t),
            FilterValue::Id(id) => qb.push_bind(*id),
        };
    }
}

#[async_trait]
impl<T: Record> Store<T> for PgStore<T> {
    async fn list(&self, query: &ListQuery) -> Result<Vec<T>, StoreError> {
        query.check::<T>()?;

        let mut qb = QueryBuilder::<Postgres>::new("SELECT to_jsonb(t) FROM ");
        qb.push(T::TABLE).push(" t");
        push_filters(&mut qb, &query.filters);
        qb.push(" ORDER BY ")
            .push(&query.order_field)
            .push(if query.ascending { " ASC" } else { " DESC" });
        if let Some(limit) = query.limit {
            qb.push(" LIMIT ").push_bind(limit as i64);
        }

        let rows: Vec<Json<T>> = qb.build_query_scalar().fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(|Json(r)| r).collect())
    }

    async fn create(&self, fields: &T::Fields) -> Result<T, StoreError> {
        let payload = serde_json::to_value(fields)?;
        let columns = writable_columns::<T>(&payload, true)?;

        let mut qb = QueryBuilder::<Postgres>::new("INSERT INTO ");
        qb.push(T::TABLE);
        if columns.is_empty() {
            qb.push(" DEFAULT VALUES");
        } else {
            let list = columns.join(", ");
            qb.push(" (").push(&list).push(") SELECT ").push(&list);
            qb.push(" FROM jsonb_populate_record(NULL::").push(T::TABLE).push(", ");
            qb.push_bind(Json(payload)).push(")");
        }
        qb.push(" RETURNING to_jsonb(").push(T::TABLE).push(".*)");

        let Json(record): Json<T> = qb.build_query_scalar().fetch_one(&self.pool).await?;
        log::info!("Created {} record {}", T::TABLE, record.id());
        Ok(record)
    }

    async fn update(&self, id: Uuid, fields: &T::Fields) -> Result<(), StoreError> {
        let payload = serde_json::to_value(fields)?;
        let columns = writable_columns::<T>(&payload, false)?;
        if columns.is_empty() {
            return Ok(());
        }

        let mut qb = QueryBuilder::<Postgres>::new("UPDATE ");
        qb.push(T::TABLE).push(" SET ");
        for (i, col) in columns.iter().enumerate() {
            if i > 0 {
                qb.push(", ");
            }
            qb.push(col).push(" = p.").push(col);
        }
        qb.push(" FROM jsonb_populate_record(NULL::").push(T::TABLE).push(", ");
        qb.push_bind(Json::<Value>(payload)).push(") p WHERE ");
        qb.push(T::TABLE).push(".id = ").push_bind(id);

        qb.build().execute(&self.pool).await?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut qb = QueryBuilder::<Postgres>::new("DELETE FROM ");
        qb.push(T::TABLE).push(" WHERE id = ").push_bind(id);
        qb.build().execute(&self.pool).await?;
        Ok(())
    }

    async fn count(&self, filters: &[Filter]) -> Result<u64, StoreError> {
        check_filters::<T>(filters)?;

        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM ");
        qb.push(T::TABLE);
        push_filters(&mut qb, filters);

        let n: i64 = qb.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(n.max(0) as u64)
    }
}
