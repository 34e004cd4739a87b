use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use edu_pathfinder::api::{router, AppState};
use edu_pathfinder::catalog::Catalog;
use edu_pathfinder::config::NotificationConfig;
use edu_pathfinder::registration::{
    InMemoryNotifier, InMemoryStudentRepository, NotifyError, RegistrationNotice,
    RegistrationNotifier, RegistrationService, RepositoryError, StudentId, StudentRecord,
    StudentRepository,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

struct OfflineRepository;

impl StudentRepository for OfflineRepository {
    fn insert(&self, _record: StudentRecord) -> Result<StudentRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &StudentId) -> Result<Option<StudentRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn count(&self) -> Result<usize, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

struct OfflineNotifier;

impl RegistrationNotifier for OfflineNotifier {
    fn notify(&self, _notice: &RegistrationNotice) -> Result<(), NotifyError> {
        Err(NotifyError::Transport("smtp relay down".to_string()))
    }
}

fn app_with(
    repository: Arc<dyn StudentRepository>,
    notifier: Arc<dyn RegistrationNotifier>,
) -> Router {
    let catalog = Arc::new(Catalog::builtin().expect("embedded catalog parses"));
    let registrations = Arc::new(RegistrationService::new(
        repository,
        notifier,
        &NotificationConfig::default(),
    ));
    router(AppState::new(catalog, registrations))
}

fn app() -> Router {
    app_with(
        Arc::new(InMemoryStudentRepository::default()),
        Arc::new(InMemoryNotifier::default()),
    )
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri)
        .body(Body::empty())
        .expect("request builds")
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");
    serde_json::from_slice(&bytes).expect("valid json")
}

fn ids(values: &Value) -> Vec<u64> {
    values
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|value| value["id"].as_u64())
        .collect()
}

fn registration_form() -> Value {
    json!({
        "name": "Ananya Rao",
        "email": "ananya@example.com",
        "password": "secret12",
        "confirmPassword": "secret12",
        "agree_to_terms": true,
        "pucStream": "science",
        "pucPercentage": 81.5,
        "preferredLocation": "Bangalore"
    })
}

#[tokio::test]
async fn browse_then_check_eligibility() {
    let app = app();

    let response = app
        .clone()
        .oneshot(get("/api/v1/degrees?category=Engineering%20%26%20Technology"))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(ids(&body["data"]), vec![1, 7]);

    let response = app
        .clone()
        .oneshot(get("/api/v1/colleges/degree/3"))
        .await
        .expect("router responds");
    assert_eq!(ids(&json_body(response).await["data"]), vec![9]);

    let response = app
        .oneshot(post_json(
            "/api/v1/eligibility",
            json!({ "stream": "science", "percentage": 65, "preferredLocation": "" }),
        ))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "success");
    assert_eq!(ids(&body["data"]["eligible_degrees"]), vec![1, 2, 4, 5, 6, 7, 8]);
    assert_eq!(
        body["data"]["eligible_colleges"]
            .as_array()
            .expect("array")
            .len(),
        24
    );
}

#[tokio::test]
async fn unknown_college_is_not_found() {
    let response = app()
        .oneshot(get("/api/v1/colleges/404"))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert!(body["error"].as_str().is_some());
}

#[tokio::test]
async fn kcet_search_against_builtin_catalog_is_empty() {
    let response = app()
        .oneshot(post_json(
            "/api/v1/kcet/colleges",
            json!({ "rank": 5000, "category": "obc" }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert!(body["data"].as_array().expect("array").is_empty());
    assert_eq!(
        body["message"],
        "No colleges found for the given rank. Please try a different rank or category."
    );
}

#[tokio::test]
async fn kcet_search_rejects_unknown_category() {
    let response = app()
        .oneshot(post_json(
            "/api/v1/kcet/colleges",
            json!({ "rank": 5000, "category": "NRI" }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn registration_is_created_then_duplicate_email_still_acknowledged() {
    let notifier = Arc::new(InMemoryNotifier::default());
    let app = app_with(
        Arc::new(InMemoryStudentRepository::default()),
        notifier.clone(),
    );

    let response = app
        .clone()
        .oneshot(post_json("/api/v1/students/register", registration_form()))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["data"]["outcome"], "registered");
    assert_eq!(body["data"]["stored"], true);
    assert_eq!(
        body["message"],
        "Thank you for registering. We will contact you with more information about your educational options."
    );

    let response = app
        .oneshot(post_json("/api/v1/students/register", registration_form()))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["data"]["stored"], false);
    assert_eq!(body["data"]["notified"], true);

    assert_eq!(notifier.notices().len(), 2);
}

#[tokio::test]
async fn registration_without_any_backend_is_received() {
    let app = app_with(Arc::new(OfflineRepository), Arc::new(OfflineNotifier));

    let response = app
        .oneshot(post_json("/api/v1/students/register", registration_form()))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let body = json_body(response).await;
    assert_eq!(body["data"]["outcome"], "received");
    assert_eq!(
        body["message"],
        "Your information has been received. We'll contact you soon."
    );
}

#[tokio::test]
async fn registration_reports_every_invalid_field() {
    let response = app()
        .oneshot(post_json(
            "/api/v1/students/register",
            json!({
                "name": "",
                "email": "not-an-email",
                "password": "123",
                "confirmPassword": "1234",
                "agree_to_terms": false,
                "pucPercentage": 140
            }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    let fields: Vec<&str> = body["fields"]
        .as_array()
        .expect("fields array")
        .iter()
        .filter_map(|field| field["field"].as_str())
        .collect();
    for expected in [
        "name",
        "email",
        "password",
        "confirm_password",
        "agree_to_terms",
        "percentage",
    ] {
        assert!(fields.contains(&expected), "missing {expected} in {fields:?}");
    }
}

#[tokio::test]
async fn chat_answers_and_rejects_blank_messages() {
    let app = app();

    let response = app
        .clone()
        .oneshot(post_json("/api/v1/chat", json!({ "message": "hi" })))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"]["reply"], "Hello! How can we help you today?");

    let response = app
        .oneshot(post_json("/api/v1/chat", json!({ "message": "   " })))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn health_and_metrics_respond_without_exporter() {
    let app = app();

    let response = app
        .clone()
        .oneshot(get("/health"))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["catalog_source"], "builtin");

    let response = app
        .oneshot(get("/metrics"))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
