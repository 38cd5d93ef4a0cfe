//! Shared test infrastructure for the HTTP and store tests.
//!
//! - `test_state()` - in-memory stores plus a fake identity service
//! - `test_db()` - PostgreSQL pool from `TEST_DATABASE_URL`, or `None`

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use seva_desk::auth::identity::{
    AccountProvisioner, AuthError, IdentityLookup, NewAccount, RoleLookup,
};
use seva_desk::models::Profile;
use seva_desk::routes::AppState;
use seva_desk::store::{Record, StoreError};

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const ADMIN_TOKEN: &str = "admin-token";
pub const STAFF_TOKEN: &str = "staff-token";
pub const VOLUNTEER_TOKEN: &str = "volunteer-token";
pub const NO_PROFILE_TOKEN: &str = "orphan-token";
pub const ACCESS_COOKIE: &str = "sb-access-token";

// ============================================================================
// FAKE IDENTITY SERVICE
// ============================================================================

/// Token table standing in for the identity service.
pub struct FakeIdentity {
    tokens: HashMap<&'static str, RoleLookup>,
}

impl Default for FakeIdentity {
    fn default() -> Self {
        let tokens = HashMap::from([
            (ADMIN_TOKEN, RoleLookup::Profile(Some("admin".to_string()))),
            (STAFF_TOKEN, RoleLookup::Profile(Some("staff".to_string()))),
            (VOLUNTEER_TOKEN, RoleLookup::Profile(Some("volunteer".to_string()))),
            (NO_PROFILE_TOKEN, RoleLookup::NoProfile),
        ]);
        FakeIdentity { tokens }
    }
}

#[async_trait]
impl IdentityLookup for FakeIdentity {
    async fn lookup_role(&self, access_token: &str) -> Result<RoleLookup, AuthError> {
        self.tokens.get(access_token).cloned().ok_or(AuthError::InvalidToken)
    }
}

/// Records provisioned accounts; rejects a second account with the same email.
#[derive(Default)]
pub struct FakeProvisioner {
    pub accounts: Mutex<Vec<NewAccount>>,
}

#[async_trait]
impl AccountProvisioner for FakeProvisioner {
    async fn provision(&self, account: &NewAccount) -> Result<Profile, StoreError> {
        let mut accounts = self.accounts.lock().expect("provisioner lock");
        if accounts.iter().any(|a| a.email == account.email) {
            return Err(StoreError::Constraint(format!(
                "duplicate key value violates unique constraint on email {}",
                account.email
            )));
        }
        accounts.push(account.clone());
        Ok(Profile::assemble(Uuid::new_v4(), Utc::now(), account.profile.clone()))
    }
}

// ============================================================================
// APP STATE
// ============================================================================

pub struct TestState {
    pub state: AppState,
    pub provisioner: Arc<FakeProvisioner>,
}

pub fn test_state() -> TestState {
    let provisioner = Arc::new(FakeProvisioner::default());
    let state = AppState::in_memory(Arc::new(FakeIdentity::default()), provisioner.clone());
    TestState { state, provisioner }
}

// ============================================================================
// DATABASE SETUP
// ============================================================================

/// Connect to `TEST_DATABASE_URL` and migrate, or `None` when it is unset.
pub async fn test_db() -> Option<sqlx::PgPool> {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(4)
        .connect(&url)
        .await
        .expect("Failed to connect to TEST_DATABASE_URL");
    seva_desk::db::run_migrations(&pool).await.expect("Failed to run migrations");
    Some(pool)
}
