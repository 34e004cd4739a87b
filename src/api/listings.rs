use super::{ApiResponse, AppState};
use crate::catalog::search::{CollegeFilters, CollegeQuery, DegreeQuery};
use crate::catalog::{CollegeId, CollegeRecord, DegreeId, DegreeRecord};
use crate::error::AppError;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

const DEFAULT_TOP_LIMIT: usize = 10;

#[derive(Debug, Deserialize)]
pub(crate) struct TopQuery {
    #[serde(default)]
    limit: Option<usize>,
}

fn found(count: usize, noun: &str) -> String {
    format!("Found {count} {noun}")
}

pub(crate) async fn list_degrees(
    State(state): State<AppState>,
    Query(query): Query<DegreeQuery>,
) -> Json<ApiResponse<Vec<DegreeRecord>>> {
    let degrees: Vec<DegreeRecord> = state
        .catalog
        .search_degrees(&query)
        .into_iter()
        .cloned()
        .collect();
    let message = found(degrees.len(), "degrees");
    Json(ApiResponse::success(degrees, message))
}

pub(crate) async fn degree_by_id(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<ApiResponse<DegreeRecord>>, AppError> {
    let degree = state
        .catalog
        .degree(DegreeId(id))
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("degree {id}")))?;
    Ok(Json(ApiResponse::success(degree, "Degree found")))
}

pub(crate) async fn degrees_in_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Json<ApiResponse<Vec<DegreeRecord>>> {
    let degrees: Vec<DegreeRecord> = state
        .catalog
        .degrees_in_category(&category)
        .into_iter()
        .cloned()
        .collect();
    let message = found(degrees.len(), "degrees");
    Json(ApiResponse::success(degrees, message))
}

pub(crate) async fn list_colleges(
    State(state): State<AppState>,
    Query(query): Query<CollegeQuery>,
) -> Json<ApiResponse<Vec<CollegeRecord>>> {
    let colleges = owned(state.catalog.search_colleges(&query));
    let message = found(colleges.len(), "colleges");
    Json(ApiResponse::success(colleges, message))
}

pub(crate) async fn featured_colleges(
    State(state): State<AppState>,
) -> Json<ApiResponse<Vec<CollegeRecord>>> {
    let colleges = owned(state.catalog.featured_colleges());
    let message = found(colleges.len(), "featured colleges");
    Json(ApiResponse::success(colleges, message))
}

pub(crate) async fn top_colleges(
    State(state): State<AppState>,
    Query(query): Query<TopQuery>,
) -> Json<ApiResponse<Vec<CollegeRecord>>> {
    let limit = query.limit.unwrap_or(DEFAULT_TOP_LIMIT);
    let colleges = owned(state.catalog.top_ranked_colleges(limit));
    let message = found(colleges.len(), "ranked colleges");
    Json(ApiResponse::success(colleges, message))
}

pub(crate) async fn college_filters(
    State(state): State<AppState>,
) -> Json<ApiResponse<CollegeFilters>> {
    Json(ApiResponse::success(
        state.catalog.college_filters(),
        "Available college filters",
    ))
}

pub(crate) async fn college_by_id(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<ApiResponse<CollegeRecord>>, AppError> {
    let college = state
        .catalog
        .college(CollegeId(id))
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("college {id}")))?;
    Ok(Json(ApiResponse::success(college, "College found")))
}

pub(crate) async fn colleges_for_degree(
    State(state): State<AppState>,
    Path(degree_id): Path<u32>,
) -> Result<Json<ApiResponse<Vec<CollegeRecord>>>, AppError> {
    let degree = DegreeId(degree_id);
    if state.catalog.degree(degree).is_none() {
        return Err(AppError::NotFound(format!("degree {degree_id}")));
    }
    let colleges = owned(state.catalog.colleges_offering(degree));
    let message = found(colleges.len(), "colleges");
    Ok(Json(ApiResponse::success(colleges, message)))
}

fn owned(colleges: Vec<&CollegeRecord>) -> Vec<CollegeRecord> {
    colleges.into_iter().cloned().collect()
}
