pub mod dashboard;
pub mod grievances;
pub mod records;
pub mod responses;
pub mod users;

use actix_web::{
    Error, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::{Next, from_fn},
    web,
};

use crate::errors::ApiErrorResponse;
use crate::models::{
    AdminRecord, Complaint, Grievance, MahilaShaktiGrievance, Profile, SchemeEligibility,
    SocialMediaGrievance, Volunteer, YuvaShakthiMember,
};

/// Rejects POST/PUT/DELETE requests that don't have Content-Type: application/json.
///
/// Browsers cannot send cross-origin JSON with cookies from a plain form,
/// so the check doubles as CSRF protection for the cookie-authenticated API.
async fn require_json_content_type(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let method = req.method().clone();

    if method == actix_web::http::Method::POST
        || method == actix_web::http::Method::PUT
        || method == actix_web::http::Method::DELETE
    {
        let content_type = req
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if !content_type.starts_with("application/json") {
            let response = HttpResponse::BadRequest().json(ApiErrorResponse {
                error: "Content-Type must be application/json for mutation requests".to_string(),
                details: None,
            });
            return Ok(req.into_response(response).map_into_right_body());
        }
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}

/// The five CRUD routes of one domain table.
fn record_routes<T: AdminRecord>(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(records::list::<T>))
        .route("", web::post().to(records::create::<T>))
        .route("/{id}", web::get().to(records::read::<T>))
        .route("/{id}", web::put().to(records::update::<T>))
        .route("/{id}", web::delete().to(records::delete::<T>));
}

/// Configure API v1 routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/dashboard", web::get().to(dashboard::index));
    // Creating a user provisions an identity account, so it has its own handler
    cfg.service(
        web::scope("/users")
            .wrap(from_fn(require_json_content_type))
            .route("", web::get().to(records::list::<Profile>))
            .route("", web::post().to(users::create))
            .route("/{id}", web::get().to(records::read::<Profile>))
            .route("/{id}", web::put().to(records::update::<Profile>))
            .route("/{id}", web::delete().to(records::delete::<Profile>)),
    );
    cfg.service(
        web::scope("/yuva-shakthi")
            .wrap(from_fn(require_json_content_type))
            .configure(record_routes::<YuvaShakthiMember>),
    );
    cfg.service(
        web::scope("/complaints")
            .wrap(from_fn(require_json_content_type))
            .configure(record_routes::<Complaint>),
    );
    // /disputes BEFORE /{id} to avoid routing conflict
    cfg.service(
        web::scope("/grievances/general")
            .wrap(from_fn(require_json_content_type))
            .route("/disputes", web::get().to(grievances::disputes))
            .configure(record_routes::<Grievance>),
    );
    cfg.service(
        web::scope("/grievances/mahila-shakti")
            .wrap(from_fn(require_json_content_type))
            .configure(record_routes::<MahilaShaktiGrievance>),
    );
    cfg.service(
        web::scope("/grievances/social-media")
            .wrap(from_fn(require_json_content_type))
            .configure(record_routes::<SocialMediaGrievance>),
    );
    cfg.service(
        web::scope("/scheme-eligibility")
            .wrap(from_fn(require_json_content_type))
            .configure(record_routes::<SchemeEligibility>),
    );
    cfg.service(
        web::scope("/volunteers")
            .wrap(from_fn(require_json_content_type))
            .configure(record_routes::<Volunteer>),
    );
}
