//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use scriba_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Scriba API",
        version = "0.1.0",
        description = "Upload an audio or video file, get back a transcription and a summary. Records are retrievable by stored filename."
    ),
    paths(
        handlers::upload::upload_media,
        handlers::summary::get_summary,
    ),
    components(schemas(
        models::UploadResponse,
        models::SummaryResponse,
        error::ErrorResponse,
    )),
    tags(
        (name = "uploads", description = "Upload ingestion and summary retrieval")
    )
)]
pub struct ApiDoc;
