//! Service and repository initialization.
//!
//! Every collaborator is constructed once here and handed to `AppState`;
//! the pipeline receives the repository through the `UploadStore` trait.

use crate::services::pipeline::UploadPipeline;
use crate::state::{AppState, DbState};
use crate::storage::UploadVault;
use anyhow::{anyhow, Result};
use scriba_core::Config;
use scriba_db::UploadRepository;
use scriba_processing::{WhisperRunner, WhisperRunnerConfig};
use scriba_services::{SummarizerConfig, SummarizerService};
use sqlx::PgPool;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

pub fn initialize_services(config: &Config, pool: PgPool) -> Result<Arc<AppState>> {
    let uploads = UploadRepository::new(pool.clone());

    let vault = UploadVault::new(&config.upload_dir);

    let runner = WhisperRunner::new(WhisperRunnerConfig {
        tool_path: config.whisper_path.clone(),
        model: config.whisper_model.clone(),
        output_dir: PathBuf::from(&config.transcripts_dir),
        timeout: Duration::from_secs(config.transcribe_timeout_secs),
    });

    if config.summary_api_key.is_none() {
        tracing::warn!(
            "SUMMARY_API_KEY is not set; summaries will degrade to the sentinel value"
        );
    }
    let summarizer = SummarizerService::new(SummarizerConfig {
        api_url: config.summary_api_url.clone(),
        model: config.summary_model.clone(),
        api_key: config.summary_api_key.clone(),
        timeout: Duration::from_secs(config.summary_timeout_secs),
    })
    .map_err(|e| anyhow!("Failed to create summarizer client: {}", e))?;

    let pipeline = UploadPipeline::new(runner, summarizer, Arc::new(uploads.clone()));

    tracing::info!(
        upload_dir = %config.upload_dir,
        transcripts_dir = %config.transcripts_dir,
        whisper_path = %config.whisper_path,
        whisper_model = %config.whisper_model,
        summary_model = %config.summary_model,
        "Services initialized"
    );

    Ok(Arc::new(AppState {
        db: DbState { pool, uploads },
        vault,
        pipeline,
        config: config.clone(),
    }))
}
