use actix_web::{HttpRequest, HttpResponse, web};

use crate::auth::identity::{IdentityLookup, RoleLookup};
use crate::config::AuthSettings;
use crate::handlers::api_v1::responses::RoleResponse;

/// GET /api/check-role
///
/// 401 without a valid access token, 403 when the account has no profile,
/// otherwise 200 with the profile's role.
pub async fn check_role(
    req: HttpRequest,
    identity: web::Data<dyn IdentityLookup>,
    settings: web::Data<AuthSettings>,
) -> HttpResponse {
    let Some(cookie) = req.cookie(&settings.access_cookie) else {
        return HttpResponse::Unauthorized().json(RoleResponse { role: None });
    };

    match identity.lookup_role(cookie.value()).await {
        Ok(RoleLookup::Profile(role)) => HttpResponse::Ok().json(RoleResponse { role }),
        Ok(RoleLookup::NoProfile) => HttpResponse::Forbidden().json(RoleResponse { role: None }),
        Err(e) => {
            log::warn!("Role check failed: {e}");
            HttpResponse::Unauthorized().json(RoleResponse { role: None })
        }
    }
}
