use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use scriba_core::models::SummaryResponse;
use scriba_core::AppError;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/summary/{filename}",
    tag = "uploads",
    params(
        ("filename" = String, Path, description = "Stored filename returned by the upload endpoint")
    ),
    responses(
        (status = 200, description = "Record found", body = SummaryResponse),
        (status = 404, description = "No record for that filename", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "get_summary"))]
pub async fn get_summary(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let record = state.db.uploads.get_by_filename(&filename).await?;

    match record {
        Some(record) => Ok(Json(SummaryResponse::from(record))),
        None => Err(AppError::NotFound(format!(
            "No record found for filename {}",
            filename
        ))
        .into()),
    }
}
