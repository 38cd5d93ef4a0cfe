//! CRUD handlers shared by every domain table.
//!
//! Each handler is generic over the record type and receives its store as
//! `web::Data<dyn Store<T>>`, so one set of functions serves all domains.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use super::responses::{ListParams, StatusCount, TablePage};
use crate::errors::AppError;
use crate::models::AdminRecord;
use crate::page::RecordPage;
use crate::store::{Filter, ListQuery, Record, Store};
use crate::table::ActionSet;

fn list_query<T: AdminRecord>(params: &ListParams) -> Result<ListQuery, AppError> {
    let mut query = match &params.order {
        Some(field) => ListQuery::ordered_by(field, params.asc.unwrap_or(false)),
        None => ListQuery::ordered_by(T::CREATED_AT, params.asc.unwrap_or(false)),
    };
    if let Some(status) = params.status.as_deref().filter(|s| !s.is_empty()) {
        query = query.filter(Filter::eq("status", status));
    }
    query.check::<T>()?;
    Ok(query)
}

/// Counts per known status over the whole table. Failures count as 0.
async fn status_overview<T: AdminRecord>(store: &dyn Store<T>) -> Vec<StatusCount> {
    let mut counts = Vec::with_capacity(T::STATUSES.len());
    for &status in T::STATUSES {
        let count = match store.count(&[Filter::eq("status", status)]).await {
            Ok(n) => n,
            Err(e) => {
                log::warn!("Counting {} '{status}' failed: {e}", T::TABLE);
                0
            }
        };
        counts.push(StatusCount { status, count });
    }
    counts
}

/// Non-status overview cards, counted over the records just listed.
fn extra_tallies<T: AdminRecord>(records: &[T]) -> Vec<StatusCount> {
    T::tallies()
        .iter()
        .map(|t| StatusCount {
            status: t.label,
            count: t.count(records.iter().map(|r| r.fields())),
        })
        .collect()
}

/// GET /api/v1/{domain}
/// Query params: q, page (default 1), order, asc, status
pub async fn list<T: AdminRecord>(
    store: web::Data<dyn Store<T>>,
    params: web::Query<ListParams>,
) -> Result<HttpResponse, AppError> {
    let query = list_query::<T>(&params)?;

    let mut page = RecordPage::with_query(store.clone().into_inner(), query);
    page.refresh().await;
    if let Some(term) = params.q.as_deref() {
        page.table.set_search(term);
    }
    page.table.go_to(params.page.unwrap_or(1));

    let view = page.view();
    let mut response =
        TablePage::from_view(&view, T::columns(), page.table.search_term(), ActionSet::ALL);
    response.statuses = status_overview(store.get_ref()).await;
    response.statuses.extend(extra_tallies(page.records()));
    response.notice = page.notice().map(str::to_string);

    Ok(HttpResponse::Ok().json(response))
}

/// GET /api/v1/{domain}/{id}
pub async fn read<T: AdminRecord>(
    store: web::Data<dyn Store<T>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let query = ListQuery::newest_first::<T>().filter(Filter::eq("id", id)).limit(1);
    let record = store
        .list(&query)
        .await?
        .into_iter()
        .next()
        .ok_or(AppError::NotFound)?;

    Ok(HttpResponse::Ok().json(record))
}

/// POST /api/v1/{domain}
pub async fn create<T: AdminRecord>(
    store: web::Data<dyn Store<T>>,
    body: web::Json<T::Fields>,
) -> Result<HttpResponse, AppError> {
    let errors = T::validate(&body);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let record = store.create(&body).await?;
    log::info!("{} {} created", T::LABEL, record.id());
    Ok(HttpResponse::Created().json(record))
}

/// PUT /api/v1/{domain}/{id}
pub async fn update<T: AdminRecord>(
    store: web::Data<dyn Store<T>>,
    path: web::Path<Uuid>,
    body: web::Json<T::Fields>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let errors = T::validate(&body);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    store.update(id, &body).await?;
    log::info!("{} {id} updated", T::LABEL);
    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /api/v1/{domain}/{id}
pub async fn delete<T: AdminRecord>(
    store: web::Data<dyn Store<T>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    store.delete(id).await?;
    log::info!("{} {id} deleted", T::LABEL);
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Grievance, Volunteer};

    #[test]
    fn default_order_is_newest_first() {
        let q = list_query::<Grievance>(&ListParams::default()).expect("query");
        assert_eq!(q.order_field, "submitted_at");
        assert!(!q.ascending);
        assert!(q.filters.is_empty());
    }

    #[test]
    fn status_param_becomes_filter() {
        let params = ListParams { status: Some("Open".into()), ..Default::default() };
        let q = list_query::<Grievance>(&params).expect("query");
        assert_eq!(q.filters, vec![Filter::eq("status", "Open")]);
    }

    #[test]
    fn status_on_table_without_status_is_rejected() {
        let params = ListParams { status: Some("Open".into()), ..Default::default() };
        assert!(matches!(list_query::<Volunteer>(&params), Err(AppError::Store(_))));
    }

    #[test]
    fn unknown_order_is_rejected() {
        let params = ListParams { order: Some("password_hash".into()), ..Default::default() };
        assert!(list_query::<Volunteer>(&params).is_err());
    }
}
