//! Integration-style tests for the cycles module.
//!
//! Same setup as the users module tests: fresh in-memory SQLite with real
//! migrations, the real router, and a static token verifier.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Extension, Router,
};
use chrono::NaiveDate;
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use serde_json::{json, Value};
use tower::ServiceExt;

use cycles::{
    domain::service::Service,
    infra::storage::{migrations::Migrator, sea_orm_repo::SeaOrmCycleEventsRepository},
};
use firebase_auth::{AuthError, SubjectIdentity, TokenVerifier};

struct StaticVerifier(HashMap<String, SubjectIdentity>);

#[async_trait::async_trait]
impl TokenVerifier for StaticVerifier {
    async fn verify(&self, token: &str) -> Result<SubjectIdentity, AuthError> {
        self.0
            .get(token)
            .cloned()
            .ok_or(AuthError::Unauthenticated)
    }
}

fn two_user_verifier() -> Arc<dyn TokenVerifier> {
    let mut map = HashMap::new();
    for (token, uid) in [("token-a", "subject-a"), ("token-b", "subject-b")] {
        map.insert(
            token.to_string(),
            SubjectIdentity {
                uid: uid.to_string(),
                email: None,
            },
        );
    }
    Arc::new(StaticVerifier(map))
}

async fn create_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to test database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

async fn create_test_service() -> Arc<Service> {
    let db = create_test_db().await;
    let repo = SeaOrmCycleEventsRepository::new(db);
    Arc::new(Service::new(Arc::new(repo)))
}

fn create_test_router(service: Arc<Service>) -> Router {
    cycles::api::rest::routes::router(service).layer(Extension(two_user_verifier()))
}

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("body is JSON")
}

fn post_json(uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(t) = token {
        builder = builder.header("authorization", format!("Bearer {t}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(t) = token {
        builder = builder.header("authorization", format!("Bearer {t}"));
    }
    builder.body(Body::empty()).unwrap()
}

fn day(s: &str) -> NaiveDate {
    s.parse().expect("valid date")
}

// --- domain service ---

#[tokio::test]
async fn test_history_orders_by_date_descending() -> Result<()> {
    let service = create_test_service().await;

    // Appended oldest-first on purpose; retrieval must reverse it.
    for date in ["2025-01-10", "2025-02-20", "2025-03-30"] {
        service
            .append("subject-a", "period_start".to_string(), day(date), None)
            .await?;
    }

    let history = service.history("subject-a").await?;
    let dates: Vec<_> = history.iter().map(|e| e.date).collect();
    assert_eq!(
        dates,
        vec![day("2025-03-30"), day("2025-02-20"), day("2025-01-10")]
    );
    Ok(())
}

#[tokio::test]
async fn test_same_date_events_keep_insertion_order() -> Result<()> {
    let service = create_test_service().await;

    let first = service
        .append("subject-a", "period_start".to_string(), day("2025-05-01"), None)
        .await?;
    let second = service
        .append("subject-a", "symptom".to_string(), day("2025-05-01"), None)
        .await?;

    let history = service.history("subject-a").await?;
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].id, first.id);
    assert_eq!(history[1].id, second.id);
    Ok(())
}

#[tokio::test]
async fn test_histories_are_isolated_per_subject() -> Result<()> {
    let service = create_test_service().await;

    service
        .append("subject-a", "period_start".to_string(), day("2025-04-01"), None)
        .await?;
    service
        .append("subject-b", "period_start".to_string(), day("2025-04-02"), None)
        .await?;

    let a = service.history("subject-a").await?;
    let b = service.history("subject-b").await?;

    assert_eq!(a.len(), 1);
    assert_eq!(b.len(), 1);
    assert!(a.iter().all(|e| e.user_id == "subject-a"));
    assert!(b.iter().all(|e| e.user_id == "subject-b"));
    Ok(())
}

#[tokio::test]
async fn test_meta_is_stored_opaquely() -> Result<()> {
    let service = create_test_service().await;

    let meta = json!({ "flow": "heavy", "notes": ["cramps", 3] });
    service
        .append(
            "subject-a",
            "period_start".to_string(),
            day("2025-06-15"),
            Some(meta.clone()),
        )
        .await?;

    let history = service.history("subject-a").await?;
    assert_eq!(history[0].meta.as_ref(), Some(&meta));
    Ok(())
}

#[tokio::test]
async fn test_append_rejects_empty_type() {
    let service = create_test_service().await;

    let result = service
        .append("subject-a", "  ".to_string(), day("2025-06-15"), None)
        .await;
    assert!(result.is_err());
}

// --- REST surface ---

#[tokio::test]
async fn test_append_then_read_back_over_rest() -> Result<()> {
    let service = create_test_service().await;
    let router = create_test_router(service);

    let resp = router
        .clone()
        .oneshot(post_json(
            "/cycle/events",
            json!({ "type": "period_start", "date": "2025-11-01" }),
            Some("token-a"),
        ))
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert!(body["event_id"].as_i64().unwrap() > 0);

    let resp = router
        .oneshot(get_request("/cycle/history", Some("token-a")))
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let events = body.as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["type"], "period_start");
    assert_eq!(events[0]["date"], "2025-11-01");
    assert_eq!(events[0]["user_id"], "subject-a");
    Ok(())
}

#[tokio::test]
async fn test_history_never_leaks_other_subjects() -> Result<()> {
    let service = create_test_service().await;
    let router = create_test_router(service);

    for (token, date) in [("token-a", "2025-07-01"), ("token-b", "2025-07-02")] {
        let resp = router
            .clone()
            .oneshot(post_json(
                "/cycle/events",
                json!({ "type": "period_start", "date": date }),
                Some(token),
            ))
            .await?;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let resp = router
        .oneshot(get_request("/cycle/history", Some("token-b")))
        .await?;
    let body = body_json(resp).await;
    let events = body.as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["user_id"], "subject-b");
    Ok(())
}

#[tokio::test]
async fn test_unauthenticated_requests_are_401_with_no_side_effect() -> Result<()> {
    let service = create_test_service().await;
    let router = create_test_router(service.clone());

    for req in [
        post_json(
            "/cycle/events",
            json!({ "type": "period_start", "date": "2025-11-01" }),
            Some("forged"),
        ),
        post_json(
            "/cycle/events",
            json!({ "type": "period_start", "date": "2025-11-01" }),
            None,
        ),
        get_request("/cycle/history", None),
        post_json("/predict/", json!({ "model": "default" }), None),
    ] {
        let resp = router.clone().oneshot(req).await?;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    // The rejected appends wrote nothing.
    assert!(service.history("subject-a").await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_predict_returns_static_placeholder() -> Result<()> {
    let service = create_test_service().await;
    let router = create_test_router(service);

    let resp = router
        .oneshot(post_json(
            "/predict/",
            json!({ "model": "default" }),
            Some("token-a"),
        ))
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(
        body,
        json!({
            "next_period_start": "2025-11-18",
            "confidence_days": 3,
            "fertile_window": ["2025-11-03", "2025-11-04"]
        })
    );
    Ok(())
}

#[tokio::test]
async fn test_malformed_event_body_is_422_problem() -> Result<()> {
    let service = create_test_service().await;
    let router = create_test_router(service);

    // Date is not a calendar day.
    let resp = router
        .oneshot(post_json(
            "/cycle/events",
            json!({ "type": "period_start", "date": "yesterday" }),
            Some("token-a"),
        ))
        .await?;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(resp).await;
    assert_eq!(body["status"], 422);
    Ok(())
}
