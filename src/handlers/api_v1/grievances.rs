use actix_web::{HttpResponse, web};

use crate::disputes::DisputeAlert;
use crate::errors::AppError;
use crate::models::Grievance;
use crate::store::{ListQuery, Store};

/// GET /api/v1/grievances/general/disputes
///
/// Scans the full grievance list, newest first, for filers who name each
/// other as opponents.
pub async fn disputes(store: web::Data<dyn Store<Grievance>>) -> Result<HttpResponse, AppError> {
    let grievances = store.list(&ListQuery::newest_first::<Grievance>()).await?;
    let alert = DisputeAlert::from_grievances(&grievances);
    if alert.count > 0 {
        log::info!("{}", alert.message);
    }
    Ok(HttpResponse::Ok().json(alert))
}
