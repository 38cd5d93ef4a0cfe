//! Application wiring: the injected collaborators and the route table.

use std::sync::Arc;

use actix_web::{HttpResponse, middleware::from_fn, web};

use crate::auth::identity::{AccountProvisioner, IdentityLookup, PgIdentity};
use crate::auth::middleware::require_staff;
use crate::config::AuthSettings;
use crate::db::DbPool;
use crate::errors::ApiErrorResponse;
use crate::handlers::{api_v1, auth_handlers};
use crate::models::{
    Complaint, Grievance, MahilaShaktiGrievance, Profile, SchemeEligibility, SocialMediaGrievance,
    Volunteer, YuvaShakthiMember,
};
use crate::store::{MemoryStore, PgStore, Record, Store};

/// Every collaborator the handlers need, constructed once and shared by all workers.
#[derive(Clone)]
pub struct AppState {
    pub profiles: Arc<dyn Store<Profile>>,
    pub members: Arc<dyn Store<YuvaShakthiMember>>,
    pub complaints: Arc<dyn Store<Complaint>>,
    pub grievances: Arc<dyn Store<Grievance>>,
    pub mahila: Arc<dyn Store<MahilaShaktiGrievance>>,
    pub social: Arc<dyn Store<SocialMediaGrievance>>,
    pub schemes: Arc<dyn Store<SchemeEligibility>>,
    pub volunteers: Arc<dyn Store<Volunteer>>,
    pub identity: Arc<dyn IdentityLookup>,
    pub provisioner: Arc<dyn AccountProvisioner>,
    pub auth: AuthSettings,
}

fn pg<T: Record>(pool: &DbPool) -> Arc<dyn Store<T>> {
    Arc::new(PgStore::<T>::new(pool.clone()))
}

fn memory<T: Record>() -> Arc<dyn Store<T>> {
    Arc::new(MemoryStore::<T>::new())
}

impl AppState {
    pub fn postgres(pool: &DbPool, auth: AuthSettings) -> Self {
        let identity = Arc::new(PgIdentity::new(pool.clone()));
        AppState {
            profiles: pg(pool),
            members: pg(pool),
            complaints: pg(pool),
            grievances: pg(pool),
            mahila: pg(pool),
            social: pg(pool),
            schemes: pg(pool),
            volunteers: pg(pool),
            identity: identity.clone(),
            provisioner: identity,
            auth,
        }
    }

    /// Empty in-memory stores around the given identity collaborators.
    pub fn in_memory(
        identity: Arc<dyn IdentityLookup>,
        provisioner: Arc<dyn AccountProvisioner>,
    ) -> Self {
        AppState {
            profiles: memory(),
            members: memory(),
            complaints: memory(),
            grievances: memory(),
            mahila: memory(),
            social: memory(),
            schemes: memory(),
            volunteers: memory(),
            identity,
            provisioner,
            auth: AuthSettings::default(),
        }
    }
}

/// JSON 404 for unmatched paths (registered last, as the default service).
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound()
        .json(ApiErrorResponse { error: "Not found".to_string(), details: None })
}

/// Register app data and routes. Used by `main` and by the HTTP tests.
pub fn configure(cfg: &mut web::ServiceConfig, state: &AppState) {
    cfg.app_data(web::Data::from(state.profiles.clone()))
        .app_data(web::Data::from(state.members.clone()))
        .app_data(web::Data::from(state.complaints.clone()))
        .app_data(web::Data::from(state.grievances.clone()))
        .app_data(web::Data::from(state.mahila.clone()))
        .app_data(web::Data::from(state.social.clone()))
        .app_data(web::Data::from(state.schemes.clone()))
        .app_data(web::Data::from(state.volunteers.clone()))
        .app_data(web::Data::from(state.identity.clone()))
        .app_data(web::Data::from(state.provisioner.clone()))
        .app_data(web::Data::new(state.auth.clone()));

    // Public
    cfg.route("/api/check-role", web::get().to(auth_handlers::check_role));
    // Protected
    cfg.service(
        web::scope("/api/v1")
            .wrap(from_fn(require_staff))
            .configure(api_v1::configure),
    );
}
