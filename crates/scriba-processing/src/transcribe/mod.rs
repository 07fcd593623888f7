//! Transcription runner: external tool orchestration and artifact retrieval.

mod error;
mod whisper;

pub use error::TranscribeError;
pub use whisper::{WhisperRunner, WhisperRunnerConfig};
