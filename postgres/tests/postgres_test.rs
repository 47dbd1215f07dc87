//! Integration tests against a live Postgres instance.
//!
//! Ignored by default; point `DATABASE_URL` at a scratch database and run
//! with `cargo test -p wayfare-postgres -- --ignored`. Tests use fresh
//! UUIDs throughout, so a shared database stays usable across runs.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code

use chrono::Utc;
use uuid::Uuid;
use wayfare_core::{
    Error, GeoPoint, ProviderFilter, ProviderId, RequestId, RequestState, RequestStore,
    RequesterId, Schedule, ServiceDetails, ServiceRequest, ServiceType, UpdateOutcome,
};
use wayfare_directory::DirectoryAdapter;
use wayfare_postgres::{PostgresConfig, PostgresDirectoryAdapter, PostgresRequestStore};
use wayfare_testing::provider;

async fn connect() -> PostgresRequestStore {
    let config = PostgresConfig::from_env().expect("DATABASE_URL must point at a scratch database");
    let store = PostgresRequestStore::connect(&config)
        .await
        .expect("database must be reachable");
    store.migrate().await.expect("migration must apply");
    store
}

fn pending_request() -> ServiceRequest {
    ServiceRequest {
        id: RequestId::new(),
        service_type: ServiceType::Carpool,
        requester_id: RequesterId::new("rider-pg"),
        origin: Some(GeoPoint::new(25.20, 55.27)),
        destination: Some(GeoPoint::new(24.47, 54.37)),
        schedule: Schedule::asap(),
        details: ServiceDetails::Carpool {
            seats: 2,
            luggage_pieces: 1,
        },
        state: RequestState::Pending,
        provider_id: None,
        price_breakdown: None,
        settlement: None,
        cancellation_reason: None,
        created_at: Utc::now(),
        assigned_at: None,
        confirmed_at: None,
        started_at: None,
        completed_at: None,
        cancelled_at: None,
    }
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance; set DATABASE_URL"]
async fn insert_then_fetch_roundtrips_the_record() {
    let store = connect().await;
    let request = pending_request();

    store.insert(&request).await.unwrap();
    let fetched = store.fetch(request.id).await.unwrap();
    assert_eq!(fetched.as_ref(), Some(&request));

    let absent = store.fetch(RequestId::new()).await.unwrap();
    assert!(absent.is_none());
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance; set DATABASE_URL"]
async fn conditional_update_lands_once() {
    let store = connect().await;
    let mut request = pending_request();
    store.insert(&request).await.unwrap();

    request.state = RequestState::Assigned;
    request.provider_id = Some(ProviderId::new("drv-pg"));
    request.assigned_at = Some(Utc::now());

    let first = store
        .update_if_state(RequestState::Pending, &request)
        .await
        .unwrap();
    assert_eq!(first, UpdateOutcome::Applied);

    // The same pending-conditioned write must not land twice.
    let stale = store
        .update_if_state(RequestState::Pending, &request)
        .await
        .unwrap();
    assert_eq!(stale, UpdateOutcome::StateMismatch);

    let stored = store.fetch(request.id).await.unwrap().unwrap();
    assert_eq!(stored.state, RequestState::Assigned);
    assert_eq!(stored.provider_id, Some(ProviderId::new("drv-pg")));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance; set DATABASE_URL"]
async fn conditional_update_on_absent_id_is_mismatch() {
    let store = connect().await;
    let request = pending_request();

    let outcome = store
        .update_if_state(RequestState::Pending, &request)
        .await
        .unwrap();
    assert_eq!(outcome, UpdateOutcome::StateMismatch);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance; set DATABASE_URL"]
async fn corrupt_payload_surfaces_as_typed_store_error() {
    let store = connect().await;
    let id = Uuid::new_v4();

    // A row whose payload does not decode back into a request.
    sqlx::query(
        r"
        INSERT INTO service_requests (id, service_type, state, provider_id, payload, created_at)
        VALUES ($1, 'carpool', 'pending', NULL, $2, NOW())
        ",
    )
    .bind(id)
    .bind(serde_json::json!({ "bogus": true }))
    .execute(store.pool())
    .await
    .unwrap();

    let err = store.fetch(RequestId::from_uuid(id)).await.unwrap_err();
    assert!(matches!(err, Error::StoreUnavailable { .. }));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance; set DATABASE_URL"]
async fn directory_adapter_filters_rating_in_sql_and_radius_in_process() {
    let store = connect().await;
    let pool = store.pool().clone();

    let near_id = format!("drv-near-{}", Uuid::new_v4());
    let far_id = format!("drv-far-{}", Uuid::new_v4());
    let near = provider(&near_id, ServiceType::Carpool, GeoPoint::new(25.20, 55.27));
    let mut far = provider(&far_id, ServiceType::Carpool, GeoPoint::new(24.47, 54.37));
    far.rating = 3.0;
    for p in [&near, &far] {
        sqlx::query(
            r"
            INSERT INTO providers (id, service_type, available, rating, payload)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(p.id.as_str())
        .bind(p.service_type.as_str())
        .bind(p.available)
        .bind(p.rating)
        .bind(serde_json::to_value(p).unwrap())
        .execute(&pool)
        .await
        .unwrap();
    }

    let adapter = PostgresDirectoryAdapter::new(pool, ServiceType::Carpool);

    // Rating floor excludes the far, lower-rated provider in SQL.
    let rated = adapter
        .search(&ProviderFilter::any_available().with_min_rating(4.0))
        .await
        .unwrap();
    assert!(rated.iter().any(|p| p.id.as_str() == near_id));
    assert!(rated.iter().all(|p| p.id.as_str() != far_id));

    // Radius is applied in process on top of the SQL result.
    let nearby = adapter
        .search(&ProviderFilter::near(GeoPoint::new(25.20, 55.27), 10.0))
        .await
        .unwrap();
    assert!(nearby.iter().any(|p| p.id.as_str() == near_id));
    assert!(nearby.iter().all(|p| p.id.as_str() != far_id));
}
