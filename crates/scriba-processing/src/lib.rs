//! Scriba Processing Layer
//!
//! Runs the external speech-to-text tool against stored media files and
//! retrieves the transcript artifact it produces.

pub mod transcribe;

pub use transcribe::{TranscribeError, WhisperRunner, WhisperRunnerConfig};
