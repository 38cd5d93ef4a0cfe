//! The identity service as this application sees it: a token-to-role lookup
//! plus account provisioning. Sign-in and token issuance live elsewhere.

use std::fmt;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::types::Json;

use crate::models::{Profile, ProfileFields};
use crate::store::StoreError;

#[derive(Debug, Clone, PartialEq)]
pub enum AuthError {
    /// No access token on the request.
    MissingToken,
    /// The token is unknown or expired.
    InvalidToken,
    /// The identity backend could not answer.
    Unavailable(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::MissingToken => write!(f, "No access token"),
            AuthError::InvalidToken => write!(f, "Invalid or expired access token"),
            AuthError::Unavailable(e) => write!(f, "Identity lookup failed: {e}"),
        }
    }
}

impl std::error::Error for AuthError {}

/// Outcome of resolving a valid token to its profile.
#[derive(Debug, Clone, PartialEq)]
pub enum RoleLookup {
    /// The account exists but has no profile row.
    NoProfile,
    /// The profile's role, which may be unset.
    Profile(Option<String>),
}

impl RoleLookup {
    pub fn role(&self) -> Option<&str> {
        match self {
            RoleLookup::Profile(role) => role.as_deref(),
            RoleLookup::NoProfile => None,
        }
    }
}

#[async_trait]
pub trait IdentityLookup: Send + Sync {
    async fn lookup_role(&self, access_token: &str) -> Result<RoleLookup, AuthError>;
}

/// Account plus profile to create in one step.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub password_hash: String,
    pub profile: ProfileFields,
}

#[async_trait]
pub trait AccountProvisioner: Send + Sync {
    /// Create the account and its profile; the profile shares the account id.
    async fn provision(&self, account: &NewAccount) -> Result<Profile, StoreError>;
}

/// Identity backed by the `auth_accounts` and `auth_sessions` tables.
pub struct PgIdentity {
    pool: PgPool,
}

impl PgIdentity {
    pub fn new(pool: PgPool) -> Self {
        PgIdentity { pool }
    }
}

#[async_trait]
impl IdentityLookup for PgIdentity {
    async fn lookup_role(&self, access_token: &str) -> Result<RoleLookup, AuthError> {
        // Outer join so a session without a profile is told apart from a bad token.
        let row: Option<(bool, Option<String>)> = sqlx::query_as(
            "SELECT p.id IS NOT NULL, p.role FROM auth_sessions s \
             JOIN auth_accounts a ON a.id = s.account_id \
             LEFT JOIN profiles p ON p.id = a.id \
             WHERE s.access_token = $1 AND s.expires_at > now()",
        )
        .bind(access_token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::Unavailable(e.to_string()))?;

        match row {
            None => Err(AuthError::InvalidToken),
            Some((false, _)) => Ok(RoleLookup::NoProfile),
            Some((true, role)) => Ok(RoleLookup::Profile(role)),
        }
    }
}

#[async_trait]
impl AccountProvisioner for PgIdentity {
    async fn provision(&self, account: &NewAccount) -> Result<Profile, StoreError> {
        let mut tx = self.pool.begin().await?;

        let (account_id,): (uuid::Uuid,) = sqlx::query_as(
            "INSERT INTO auth_accounts (email, password_hash) VALUES ($1, $2) RETURNING id",
        )
        .bind(account.email.trim())
        .bind(&account.password_hash)
        .fetch_one(&mut *tx)
        .await?;

        let (Json(profile),): (Json<Profile>,) = sqlx::query_as(
            "INSERT INTO profiles (id, name, mobile, gender, role) VALUES ($1, $2, $3, $4, $5) \
             RETURNING to_jsonb(profiles.*)",
        )
        .bind(account_id)
        .bind(&account.profile.name)
        .bind(&account.profile.mobile)
        .bind(&account.profile.gender)
        .bind(&account.profile.role)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        log::info!("Provisioned account {account_id}");
        Ok(profile)
    }
}
