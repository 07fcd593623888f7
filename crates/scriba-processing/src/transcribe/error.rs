use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;

/// Failure modes of a transcription run.
///
/// `ToolFailed` and `Artifact` are deliberately separate variants: a non-zero
/// exit points at the tool or its input, while a clean exit with no readable
/// artifact points at the filesystem contract between us and the tool.
#[derive(Debug, thiserror::Error)]
pub enum TranscribeError {
    #[error("failed to launch transcription tool '{tool}': {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("transcription tool failed with {status}")]
    ToolFailed { status: ExitStatus },

    #[error("transcription tool timed out after {0:?}")]
    TimedOut(Duration),

    #[error("transcript artifact {} could not be read: {source}", path.display())]
    Artifact {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("io error while running transcription: {0}")]
    Io(#[from] std::io::Error),
}
