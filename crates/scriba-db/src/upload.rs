use scriba_core::models::{NewUpload, UploadRecord};
use scriba_core::AppError;
use sqlx::PgPool;
use uuid::Uuid;

/// Upload record repository
///
/// Insert-only by design: a record is written exactly once, after the whole
/// pipeline has resolved, and is never updated. Reads are keyed by id or by
/// the stored filename (the client-visible retrieval key).
#[derive(Clone)]
pub struct UploadRepository {
    pool: PgPool,
}

impl UploadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a fully processed upload and return the stored row.
    pub async fn insert(&self, upload: NewUpload) -> Result<UploadRecord, AppError> {
        let record = sqlx::query_as::<_, UploadRecord>(
            r#"
            INSERT INTO uploads (filename, content_type, transcription, summary)
            VALUES ($1, $2, $3, $4)
            RETURNING id, filename, content_type, transcription, summary, uploaded_at
            "#,
        )
        .bind(&upload.filename)
        .bind(&upload.content_type)
        .bind(&upload.transcription)
        .bind(&upload.summary)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(
            upload_id = %record.id,
            filename = %record.filename,
            "Upload record persisted"
        );

        Ok(record)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<UploadRecord>, AppError> {
        let record = sqlx::query_as::<_, UploadRecord>(
            r#"
            SELECT id, filename, content_type, transcription, summary, uploaded_at
            FROM uploads
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    pub async fn get_by_filename(&self, filename: &str) -> Result<Option<UploadRecord>, AppError> {
        let record = sqlx::query_as::<_, UploadRecord>(
            r#"
            SELECT id, filename, content_type, transcription, summary, uploaded_at
            FROM uploads
            WHERE filename = $1
            "#,
        )
        .bind(filename)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }
}
