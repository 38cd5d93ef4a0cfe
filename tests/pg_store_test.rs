//! PostgreSQL store and identity tests. Each test returns early when
//! `TEST_DATABASE_URL` is unset. Rows are tagged with a fresh marker so
//! runs against a shared database do not see each other.

use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordVerifier};
use uuid::Uuid;

use seva_desk::auth::identity::{
    AccountProvisioner, IdentityLookup, NewAccount, PgIdentity, RoleLookup,
};
use seva_desk::auth::password;
use seva_desk::models::{
    Complaint, ComplaintFields, MahilaShaktiGrievance, MahilaShaktiGrievanceFields, ProfileFields,
};
use seva_desk::store::{Filter, ListQuery, PgStore, Store, StoreError};

mod common;

fn marker() -> String {
    format!("test-{}", Uuid::new_v4())
}

fn complaint(name: &str, status: Option<&str>) -> ComplaintFields {
    ComplaintFields {
        full_name: Some(name.to_string()),
        phone: Some("9876543210".to_string()),
        status: status.map(str::to_string),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_complaint_crud_round_trip() {
    let Some(pool) = common::test_db().await else { return };
    let store = PgStore::<Complaint>::new(pool);
    let name = marker();

    // Omitted status falls back to the column default
    let created = store.create(&complaint(&name, None)).await.expect("create");
    assert_eq!(created.fields.status.as_deref(), Some("Pending"));
    assert_eq!(created.fields.full_name.as_deref(), Some(name.as_str()));

    let mut edited = created.fields.clone();
    edited.status = Some("Resolved".to_string());
    edited.address = Some("Ward 4, Guntur".to_string());
    store.update(created.id, &edited).await.expect("update");

    let query = ListQuery::newest_first::<Complaint>().filter(Filter::eq("id", created.id));
    let rows = store.list(&query).await.expect("list");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].fields.status.as_deref(), Some("Resolved"));
    assert_eq!(rows[0].fields.address.as_deref(), Some("Ward 4, Guntur"));
    assert_eq!(rows[0].submitted_at, created.submitted_at);

    store.delete(created.id).await.expect("delete");
    store.delete(created.id).await.expect("second delete");
    assert!(store.list(&query).await.expect("list").is_empty());
}

#[tokio::test]
async fn test_update_of_missing_id_is_silent() {
    let Some(pool) = common::test_db().await else { return };
    let store = PgStore::<Complaint>::new(pool);

    store
        .update(Uuid::new_v4(), &complaint(&marker(), Some("Pending")))
        .await
        .expect("update of missing id");
}

#[tokio::test]
async fn test_count_and_order_with_filters() {
    let Some(pool) = common::test_db().await else { return };
    let store = PgStore::<Complaint>::new(pool);
    let name = marker();

    let mut ids = Vec::new();
    for status in ["Pending", "Resolved", "Resolved"] {
        ids.push(store.create(&complaint(&name, Some(status))).await.expect("create").id);
    }

    let mine = Filter::eq("full_name", name.as_str());
    assert_eq!(store.count(&[mine.clone()]).await.expect("count"), 3);
    assert_eq!(
        store
            .count(&[mine.clone(), Filter::eq("status", "Resolved")])
            .await
            .expect("count"),
        2
    );

    let newest = store
        .list(&ListQuery::newest_first::<Complaint>().filter(mine.clone()))
        .await
        .expect("list");
    let listed: Vec<Uuid> = newest.iter().map(|c| c.id).collect();
    assert_eq!(listed, ids.iter().rev().copied().collect::<Vec<_>>());

    let limited = store
        .list(&ListQuery::ordered_by("submitted_at", true).filter(mine.clone()).limit(1))
        .await
        .expect("list");
    assert_eq!(limited.len(), 1);
    assert_eq!(limited[0].id, ids[0]);

    for id in ids {
        store.delete(id).await.expect("cleanup");
    }
}

#[tokio::test]
async fn test_arrays_and_booleans_survive_storage() {
    let Some(pool) = common::test_db().await else { return };
    let store = PgStore::<MahilaShaktiGrievance>::new(pool);

    let fields = MahilaShaktiGrievanceFields {
        fullname: Some(marker()),
        grievance_types: Some(vec!["Harassment".into(), "Dowry".into()]),
        declaration: Some(true),
        ..Default::default()
    };
    let created = store.create(&fields).await.expect("create");
    assert_eq!(created.fields.grievance_types, fields.grievance_types);
    assert_eq!(created.fields.declaration, Some(true));
    assert_eq!(created.fields.status.as_deref(), Some("Under Review"));

    store.delete(created.id).await.expect("cleanup");
}

#[tokio::test]
async fn test_unknown_order_field_is_rejected_before_sql() {
    let Some(pool) = common::test_db().await else { return };
    let store = PgStore::<Complaint>::new(pool);

    let err = store
        .list(&ListQuery::ordered_by("submitted_at; DROP TABLE complaints", false))
        .await
        .expect_err("should reject");
    assert!(matches!(err, StoreError::Rejected(_)));
}

#[tokio::test]
async fn test_provision_and_lookup_role() {
    let Some(pool) = common::test_db().await else { return };
    let identity = PgIdentity::new(pool.clone());
    let email = format!("{}@example.in", marker());

    let account = NewAccount {
        email: email.clone(),
        password_hash: password::hash_password("s3cure-pass").expect("hash"),
        profile: ProfileFields {
            name: Some("Anita".to_string()),
            role: Some("staff".to_string()),
            ..Default::default()
        },
    };
    let profile = identity.provision(&account).await.expect("provision");
    assert_eq!(profile.fields.name.as_deref(), Some("Anita"));

    let (stored_hash,): (String,) =
        sqlx::query_as("SELECT password_hash FROM auth_accounts WHERE id = $1")
            .bind(profile.id)
            .fetch_one(&pool)
            .await
            .expect("account row");
    let parsed = PasswordHash::new(&stored_hash).expect("phc string");
    assert!(Argon2::default().verify_password(b"s3cure-pass", &parsed).is_ok());

    let token = format!("token-{}", Uuid::new_v4());
    sqlx::query(
        "INSERT INTO auth_sessions (access_token, account_id, expires_at) \
         VALUES ($1, $2, now() + interval '1 hour')",
    )
    .bind(&token)
    .bind(profile.id)
    .execute(&pool)
    .await
    .expect("session");

    let lookup = identity.lookup_role(&token).await.expect("lookup");
    assert_eq!(lookup, RoleLookup::Profile(Some("staff".to_string())));

    sqlx::query("DELETE FROM profiles WHERE id = $1")
        .bind(profile.id)
        .execute(&pool)
        .await
        .expect("drop profile");
    assert_eq!(identity.lookup_role(&token).await.expect("lookup"), RoleLookup::NoProfile);

    // Same email again violates the unique constraint and leaves nothing behind
    let err = identity.provision(&account).await.expect_err("duplicate");
    assert!(matches!(err, StoreError::Constraint(_)));

    sqlx::query("DELETE FROM auth_accounts WHERE id = $1")
        .bind(profile.id)
        .execute(&pool)
        .await
        .expect("cleanup");
    assert!(identity.lookup_role(&token).await.is_err());
}
