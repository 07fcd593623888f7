use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A fully processed upload: one immutable row per ingestion event.
///
/// Created transiently while the pipeline runs and made durable exactly once
/// at the end; `transcription` and `summary` are never updated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct UploadRecord {
    pub id: Uuid,
    pub filename: String,
    pub content_type: String,
    pub transcription: String,
    pub summary: String,
    pub uploaded_at: DateTime<Utc>,
}

/// Insert payload for a new upload record. The store assigns `id` and
/// `uploaded_at`.
#[derive(Debug, Clone)]
pub struct NewUpload {
    pub filename: String,
    pub content_type: String,
    pub transcription: String,
    pub summary: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    pub message: String,
    pub transcription: String,
    pub summary: String,
    pub filename: String,
}

impl From<UploadRecord> for UploadResponse {
    fn from(record: UploadRecord) -> Self {
        UploadResponse {
            message: "File uploaded successfully".to_string(),
            transcription: record.transcription,
            summary: record.summary,
            filename: record.filename,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SummaryResponse {
    pub transcription: String,
    pub summary: String,
}

impl From<UploadRecord> for SummaryResponse {
    fn from(record: UploadRecord) -> Self {
        SummaryResponse {
            transcription: record.transcription,
            summary: record.summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_response_echoes_stored_filename() {
        let record = UploadRecord {
            id: Uuid::new_v4(),
            filename: "1712000000000-a1b2.mp3".to_string(),
            content_type: "audio/mpeg".to_string(),
            transcription: "hello".to_string(),
            summary: "- hello".to_string(),
            uploaded_at: Utc::now(),
        };

        let response = UploadResponse::from(record.clone());
        assert_eq!(response.filename, record.filename);
        assert_eq!(response.transcription, "hello");
        assert_eq!(response.message, "File uploaded successfully");
    }
}
