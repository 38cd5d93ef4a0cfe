use actix_web::{
    Error, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
    web,
};

use crate::auth::identity::{AuthError, IdentityLookup};
use crate::config::AuthSettings;
use crate::errors::AppError;
use crate::models::profile::is_staff_role;

/// Resolve `token` to a staff role, or say why access is refused.
pub async fn staff_role(
    identity: &dyn IdentityLookup,
    token: Option<&str>,
) -> Result<String, AppError> {
    let token = token.filter(|t| !t.is_empty()).ok_or(AuthError::MissingToken)?;
    let lookup = identity.lookup_role(token).await?;
    match lookup.role() {
        Some(role) if is_staff_role(role) => Ok(role.to_string()),
        other => Err(AppError::Role(other.map(str::to_string))),
    }
}

/// Middleware function that admits only admin and staff accounts.
/// Anything else is sent to the sign-in page. Checked on every request.
pub async fn require_staff(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let settings = req
        .app_data::<web::Data<AuthSettings>>()
        .map(|s| s.get_ref().clone())
        .unwrap_or_default();
    let token = req.cookie(&settings.access_cookie).map(|c| c.value().to_string());

    let verdict = match req.app_data::<web::Data<dyn IdentityLookup>>() {
        Some(identity) => staff_role(identity.get_ref(), token.as_deref()).await,
        None => {
            log::error!("No identity lookup configured; refusing {}", req.path());
            Err(AppError::Auth(AuthError::Unavailable("not configured".to_string())))
        }
    };

    if let Err(e) = verdict {
        log::warn!("Access to {} refused: {e}", req.path());
        let response = HttpResponse::SeeOther()
            .insert_header(("Location", settings.signin_path.as_str()))
            .finish();
        return Ok(req.into_response(response).map_into_right_body());
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}
