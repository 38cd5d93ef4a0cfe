use actix_web::{HttpResponse, web};

use super::responses::CreateUserRequest;
use crate::auth::identity::{AccountProvisioner, NewAccount};
use crate::auth::{password, validate};
use crate::errors::AppError;
use crate::models::{AdminRecord, Profile};

/// POST /api/v1/users - Provision an identity account and its profile
pub async fn create(
    provisioner: web::Data<dyn AccountProvisioner>,
    body: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();

    let mut errors = Vec::new();
    errors.extend(validate::validate_email(&body.email));
    errors.extend(validate::validate_password(&body.password));
    errors.extend(Profile::validate(&body.profile));
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let password_hash = password::hash_password(&body.password)
        .map_err(|_| AppError::Hash("Password hash failed".to_string()))?;

    let account = NewAccount {
        email: body.email.trim().to_string(),
        password_hash,
        profile: body.profile,
    };
    let profile = provisioner.provision(&account).await?;

    log::info!(
        "User {} provisioned with role {}",
        profile.id,
        profile.fields.role.as_deref().unwrap_or("-")
    );
    Ok(HttpResponse::Created().json(profile))
}
