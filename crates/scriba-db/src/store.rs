//! Store trait abstraction for pipeline testing
//!
//! This trait defines the minimal persistence interface the pipeline needs,
//! allowing for easy mocking and testing without a database dependency.

use async_trait::async_trait;
use scriba_core::models::{NewUpload, UploadRecord};
use scriba_core::AppError;
use uuid::Uuid;

/// Trait for the upload record store used by the pipeline
#[async_trait]
pub trait UploadStore: Send + Sync {
    /// Insert a fully processed upload record
    async fn insert(&self, upload: NewUpload) -> Result<UploadRecord, AppError>;

    /// Fetch a record by store-assigned id
    async fn get_by_id(&self, id: Uuid) -> Result<Option<UploadRecord>, AppError>;

    /// Fetch a record by stored filename
    async fn get_by_filename(&self, filename: &str) -> Result<Option<UploadRecord>, AppError>;
}

#[async_trait]
impl UploadStore for super::UploadRepository {
    async fn insert(&self, upload: NewUpload) -> Result<UploadRecord, AppError> {
        self.insert(upload).await
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<UploadRecord>, AppError> {
        self.get_by_id(id).await
    }

    async fn get_by_filename(&self, filename: &str) -> Result<Option<UploadRecord>, AppError> {
        self.get_by_filename(filename).await
    }
}
