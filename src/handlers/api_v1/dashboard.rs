use actix_web::{HttpResponse, web};
use chrono::Utc;

use super::responses::{DashboardResponse, TablePage};
use crate::errors::AppError;
use crate::models::dashboard::{self, DashboardSources};
use crate::models::{
    Complaint, MahilaShaktiGrievance, Profile, SocialMediaGrievance, Volunteer, YuvaShakthiMember,
};
use crate::store::Store;
use crate::table::{ActionSet, DataTable};

/// GET /api/v1/dashboard - Aggregate statistics and recent activity
pub async fn index(
    profiles: web::Data<dyn Store<Profile>>,
    members: web::Data<dyn Store<YuvaShakthiMember>>,
    complaints: web::Data<dyn Store<Complaint>>,
    mahila: web::Data<dyn Store<MahilaShaktiGrievance>>,
    social: web::Data<dyn Store<SocialMediaGrievance>>,
    volunteers: web::Data<dyn Store<Volunteer>>,
) -> Result<HttpResponse, AppError> {
    let sources = DashboardSources {
        profiles: profiles.get_ref(),
        members: members.get_ref(),
        complaints: complaints.get_ref(),
        mahila: mahila.get_ref(),
        social: social.get_ref(),
        volunteers: volunteers.get_ref(),
    };

    let stats = dashboard::collect_stats(&sources, Utc::now()).await;
    let activity = dashboard::recent_activity(&sources).await;

    let table = DataTable::new(ActionSet::READ_ONLY);
    let recent = TablePage::from_view(
        &table.view(&activity),
        dashboard::activity_columns(),
        table.search_term(),
        table.actions(),
    );

    Ok(HttpResponse::Ok().json(DashboardResponse { stats, recent }))
}
