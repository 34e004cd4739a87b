use super::{ApiResponse, AppState};
use crate::catalog::{CollegeRecord, DegreeRecord};
use crate::chat::{ChatMessage, ChatReply};
use crate::eligibility::kcet::{colleges_for_rank, KcetProgram};
use crate::eligibility::{KcetQuery, StudentProfile};
use crate::error::AppError;
use crate::registration::{RegistrationOutcome, RegistrationReceipt, RegistrationRequest};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Serialize)]
pub(crate) struct EligibilityResponse {
    pub(crate) eligible_degrees: Vec<DegreeRecord>,
    pub(crate) eligible_colleges: Vec<CollegeRecord>,
}

#[derive(Debug, Serialize)]
pub(crate) struct KcetCollegeView {
    pub(crate) college: CollegeRecord,
    pub(crate) programs: Vec<KcetProgram>,
}

pub(crate) async fn check_eligibility(
    State(state): State<AppState>,
    Json(profile): Json<StudentProfile>,
) -> Result<Json<ApiResponse<EligibilityResponse>>, AppError> {
    if !(0.0..=100.0).contains(&profile.percentage) {
        return Err(AppError::InvalidInput(
            "Please enter a valid percentage between 0 and 100".to_string(),
        ));
    }

    let report = state.evaluator.evaluate(&state.catalog, &profile);
    debug!(
        stream = %profile.stream,
        percentage = profile.percentage,
        degrees = report.eligible_degrees.len(),
        colleges = report.eligible_colleges.len(),
        "eligibility evaluated"
    );

    let message = if report.eligible_degrees.is_empty() {
        "No eligible degrees found for this profile".to_string()
    } else {
        format!(
            "Found {} eligible degrees offered by {} colleges",
            report.eligible_degrees.len(),
            report.eligible_colleges.len()
        )
    };

    let data = EligibilityResponse {
        eligible_degrees: report.eligible_degrees.into_iter().cloned().collect(),
        eligible_colleges: report.eligible_colleges.into_iter().cloned().collect(),
    };
    Ok(Json(ApiResponse::success(data, message)))
}

pub(crate) async fn kcet_colleges(
    State(state): State<AppState>,
    Json(query): Json<KcetQuery>,
) -> Result<Json<ApiResponse<Vec<KcetCollegeView>>>, AppError> {
    let matches = colleges_for_rank(&state.catalog, &query)?;
    let message = if matches.is_empty() {
        "No colleges found for the given rank. Please try a different rank or category."
            .to_string()
    } else {
        format!("Found {} colleges matching your KCET rank.", matches.len())
    };

    let data = matches
        .into_iter()
        .map(|found| KcetCollegeView {
            college: found.college.clone(),
            programs: found.programs,
        })
        .collect();
    Ok(Json(ApiResponse::success(data, message)))
}

pub(crate) async fn register_student(
    State(state): State<AppState>,
    Json(request): Json<RegistrationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RegistrationReceipt>>), AppError> {
    let receipt = state.registrations.register(request)?;
    let status = match receipt.outcome {
        RegistrationOutcome::Registered => StatusCode::CREATED,
        RegistrationOutcome::Received => StatusCode::ACCEPTED,
    };
    let message = receipt.message;
    Ok((status, Json(ApiResponse::success(receipt, message))))
}

pub(crate) async fn chat_reply(
    State(state): State<AppState>,
    Json(payload): Json<ChatMessage>,
) -> Result<Json<ApiResponse<ChatReply>>, AppError> {
    let reply = state.chat.reply(&payload.message)?;
    Ok(Json(ApiResponse::success(reply, "Reply generated")))
}
