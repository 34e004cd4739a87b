//! HTTP surface: catalog listings, eligibility, KCET, registration and chat.

mod forms;
mod listings;
mod probes;

use crate::catalog::Catalog;
use crate::chat::FaqResponder;
use crate::eligibility::EligibilityEvaluator;
use crate::registration::RegistrationService;
use axum::routing::{get, post};
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub evaluator: EligibilityEvaluator,
    pub registrations: Arc<RegistrationService>,
    pub chat: Arc<FaqResponder>,
    pub readiness: Arc<AtomicBool>,
    pub metrics: Option<Arc<PrometheusHandle>>,
}

impl AppState {
    pub fn new(catalog: Arc<Catalog>, registrations: Arc<RegistrationService>) -> Self {
        let chat = Arc::new(FaqResponder::from_catalog(&catalog));
        Self {
            catalog,
            evaluator: EligibilityEvaluator::new(),
            registrations,
            chat,
            readiness: Arc::new(AtomicBool::new(false)),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(Arc::new(handle));
        self
    }
}

/// Envelope shared by every `/api/v1` success response.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
    pub message: String,
    pub status: &'static str,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
            status: "success",
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(probes::healthcheck))
        .route("/ready", get(probes::readiness_endpoint))
        .route("/metrics", get(probes::metrics_endpoint))
        .route("/api/v1/degrees", get(listings::list_degrees))
        .route("/api/v1/degrees/:id", get(listings::degree_by_id))
        .route(
            "/api/v1/degrees/category/:category",
            get(listings::degrees_in_category),
        )
        .route("/api/v1/colleges", get(listings::list_colleges))
        .route("/api/v1/colleges/featured", get(listings::featured_colleges))
        .route("/api/v1/colleges/top", get(listings::top_colleges))
        .route("/api/v1/colleges/filters", get(listings::college_filters))
        .route("/api/v1/colleges/:id", get(listings::college_by_id))
        .route(
            "/api/v1/colleges/degree/:degree_id",
            get(listings::colleges_for_degree),
        )
        .route("/api/v1/eligibility", post(forms::check_eligibility))
        .route("/api/v1/kcet/colleges", post(forms::kcet_colleges))
        .route("/api/v1/students/register", post(forms::register_student))
        .route("/api/v1/chat", post(forms::chat_reply))
        .with_state(state)
}
