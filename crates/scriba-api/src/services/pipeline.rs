//! Upload pipeline orchestration: transcribe → summarize → persist.
//!
//! The three stages run strictly in sequence for one request; concurrent
//! requests only share the insert-only record store, so pipelines never race
//! on the same record. Summarization cannot fail the pipeline (it degrades to
//! a sentinel); transcription and persistence failures abort it, and nothing
//! is ever partially persisted.

use scriba_core::models::{NewUpload, UploadRecord};
use scriba_core::AppError;
use scriba_db::UploadStore;
use scriba_processing::{TranscribeError, WhisperRunner};
use scriba_services::SummarizerService;
use std::path::PathBuf;
use std::sync::Arc;

/// A raw upload already written to disk, ready for processing.
#[derive(Debug, Clone)]
pub struct StoredUpload {
    pub stored_name: String,
    pub media_path: PathBuf,
    pub content_type: String,
}

/// Final pipeline result returned to the ingress handler.
#[derive(Debug)]
pub struct PipelineOutcome {
    pub record: UploadRecord,
    /// True when the persisted summary is the degraded sentinel.
    pub summary_degraded: bool,
}

/// Orchestrates one upload through transcription, summarization, and
/// persistence. All collaborators are injected at construction.
#[derive(Clone)]
pub struct UploadPipeline {
    runner: WhisperRunner,
    summarizer: SummarizerService,
    store: Arc<dyn UploadStore>,
}

impl UploadPipeline {
    pub fn new(
        runner: WhisperRunner,
        summarizer: SummarizerService,
        store: Arc<dyn UploadStore>,
    ) -> Self {
        Self {
            runner,
            summarizer,
            store,
        }
    }

    /// Run the full pipeline for one stored upload.
    #[tracing::instrument(skip(self, stored), fields(filename = %stored.stored_name))]
    pub async fn run(&self, stored: &StoredUpload) -> Result<PipelineOutcome, AppError> {
        let transcription = match self.runner.transcribe(&stored.media_path).await {
            Ok(text) => text,
            Err(e) => {
                // The raw upload stays on disk with no record of the attempt;
                // the path in this log line is the only trace of it.
                tracing::warn!(
                    media_path = %stored.media_path.display(),
                    "Transcription failed, uploaded file left on disk without a record"
                );
                return Err(map_transcribe_error(e));
            }
        };

        let summary = self.summarizer.summarize_or_fallback(&transcription).await;
        let summary_degraded = summary.is_degraded();

        let record = self
            .store
            .insert(NewUpload {
                filename: stored.stored_name.clone(),
                content_type: stored.content_type.clone(),
                transcription,
                summary: summary.into_text(),
            })
            .await?;

        tracing::info!(
            upload_id = %record.id,
            summary_degraded,
            "Upload pipeline completed"
        );

        Ok(PipelineOutcome {
            record,
            summary_degraded,
        })
    }
}

/// Map runner failures onto the application taxonomy. Tool-exit and
/// artifact-read failures keep distinct codes for diagnostics.
fn map_transcribe_error(e: TranscribeError) -> AppError {
    match e {
        TranscribeError::Artifact { .. } => AppError::TranscriptionArtifact(e.to_string()),
        TranscribeError::Spawn { .. }
        | TranscribeError::ToolFailed { .. }
        | TranscribeError::TimedOut(_) => AppError::TranscriptionTool(e.to_string()),
        TranscribeError::Io(_) => AppError::Internal(e.to_string()),
    }
}
