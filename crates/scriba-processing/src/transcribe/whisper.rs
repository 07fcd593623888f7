//! WhisperRunner - speech-to-text subprocess orchestration.
//!
//! The external tool owns the transcript artifact format: for an input
//! `<stem>.<ext>` it writes `<stem>.txt` into the configured output
//! directory. Only the exit code and the presence of that artifact decide
//! the outcome; everything the tool prints is forwarded to the log as a
//! side channel and never parsed.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

use super::TranscribeError;

/// Config for the transcription runner (tool binary, model size, artifact dir, wall-clock cap).
#[derive(Clone, Debug)]
pub struct WhisperRunnerConfig {
    pub tool_path: String,
    pub model: String,
    pub output_dir: PathBuf,
    pub timeout: Duration,
}

/// Runs the external speech-recognition tool against a stored media file
/// and reads back the transcript artifact it leaves on disk.
#[derive(Clone)]
pub struct WhisperRunner {
    config: WhisperRunnerConfig,
}

impl WhisperRunner {
    pub fn new(config: WhisperRunnerConfig) -> Self {
        Self { config }
    }

    /// Transcribe one media file to text.
    ///
    /// Spawns the tool, suspends until it exits (bounded by the configured
    /// timeout, after which the child is killed), then reads the `<stem>.txt`
    /// artifact from the output directory. The artifact is a tool by-product
    /// and is left in place.
    #[tracing::instrument(skip(self), fields(media_path = %media_path.display()))]
    pub async fn transcribe(&self, media_path: &Path) -> Result<String, TranscribeError> {
        tokio::fs::create_dir_all(&self.config.output_dir).await?;

        let start = std::time::Instant::now();
        tracing::info!(
            tool = %self.config.tool_path,
            model = %self.config.model,
            "Transcription started"
        );

        let mut child = Command::new(&self.config.tool_path)
            .arg(media_path)
            .arg("--model")
            .arg(&self.config.model)
            .arg("--output_dir")
            .arg(&self.config.output_dir)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| TranscribeError::Spawn {
                tool: self.config.tool_path.clone(),
                source: e,
            })?;

        if let Some(stdout) = child.stdout.take() {
            forward_lines(stdout, false);
        }
        if let Some(stderr) = child.stderr.take() {
            forward_lines(stderr, true);
        }

        let status = match tokio::time::timeout(self.config.timeout, child.wait()).await {
            Ok(result) => result?,
            Err(_) => {
                child.kill().await.ok();
                tracing::error!(
                    timeout_secs = self.config.timeout.as_secs(),
                    "Transcription tool timed out, child killed"
                );
                return Err(TranscribeError::TimedOut(self.config.timeout));
            }
        };

        if !status.success() {
            tracing::error!(%status, "Transcription tool exited with failure");
            return Err(TranscribeError::ToolFailed { status });
        }

        let artifact = self.artifact_path(media_path)?;
        let transcription =
            tokio::fs::read_to_string(&artifact)
                .await
                .map_err(|e| TranscribeError::Artifact {
                    path: artifact.clone(),
                    source: e,
                })?;

        tracing::info!(
            artifact = %artifact.display(),
            transcript_chars = transcription.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Transcription completed"
        );

        Ok(transcription)
    }

    /// Deterministic artifact location: `{output_dir}/{stem}.txt`.
    fn artifact_path(&self, media_path: &Path) -> Result<PathBuf, TranscribeError> {
        let stem = media_path
            .file_stem()
            .ok_or_else(|| TranscribeError::Artifact {
                path: media_path.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "media path has no file stem",
                ),
            })?;

        let mut artifact = self.config.output_dir.join(stem);
        artifact.set_extension("txt");
        Ok(artifact)
    }
}

/// Forward a child pipe to the log, line by line. Diagnostic output only;
/// never inspected for control decisions.
fn forward_lines(pipe: impl AsyncRead + Unpin + Send + 'static, is_stderr: bool) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(pipe).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if is_stderr {
                tracing::warn!(line = %line, "whisper stderr");
            } else {
                tracing::debug!(line = %line, "whisper stdout");
            }
        }
    });
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    /// Write an executable shell script standing in for the whisper binary.
    fn fake_tool(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("fake-whisper");
        let script = format!("#!/bin/sh\n{}\n", body);
        std::fs::write(&path, script).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn runner(tool: &Path, output_dir: &Path, timeout: Duration) -> WhisperRunner {
        WhisperRunner::new(WhisperRunnerConfig {
            tool_path: tool.to_string_lossy().into_owned(),
            model: "base".to_string(),
            output_dir: output_dir.to_path_buf(),
            timeout,
        })
    }

    // Fake tool that honors the real invocation contract:
    // <media> --model <m> --output_dir <dir>, artifact = <dir>/<stem>.txt
    const WRITES_ARTIFACT: &str = r#"
media="$1"; shift
outdir="."
while [ "$#" -gt 0 ]; do
  case "$1" in
    --output_dir) outdir="$2"; shift 2 ;;
    *) shift ;;
  esac
done
stem=$(basename "$media"); stem="${stem%.*}"
printf '%s' "the quick brown fox" > "$outdir/$stem.txt"
"#;

    #[tokio::test]
    async fn test_transcribe_reads_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let tool = fake_tool(dir.path(), WRITES_ARTIFACT);
        let media = dir.path().join("clip.wav");
        std::fs::write(&media, b"not real audio").unwrap();

        let out_dir = dir.path().join("transcripts");
        let runner = runner(&tool, &out_dir, Duration::from_secs(5));

        let text = runner.transcribe(&media).await.unwrap();
        assert_eq!(text, "the quick brown fox");
        // Artifact is a tool by-product and must be left in place.
        assert!(out_dir.join("clip.txt").exists());
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_tool_failure() {
        let dir = tempfile::tempdir().unwrap();
        let tool = fake_tool(dir.path(), "echo 'boom' >&2\nexit 3");
        let media = dir.path().join("clip.wav");
        std::fs::write(&media, b"x").unwrap();

        let runner = runner(&tool, dir.path(), Duration::from_secs(5));
        let err = runner.transcribe(&media).await.unwrap_err();
        match err {
            TranscribeError::ToolFailed { status } => assert_eq!(status.code(), Some(3)),
            other => panic!("expected ToolFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_artifact_is_distinct_from_tool_failure() {
        let dir = tempfile::tempdir().unwrap();
        // Tool claims success but writes nothing.
        let tool = fake_tool(dir.path(), "exit 0");
        let media = dir.path().join("clip.wav");
        std::fs::write(&media, b"x").unwrap();

        let runner = runner(&tool, dir.path(), Duration::from_secs(5));
        let err = runner.transcribe(&media).await.unwrap_err();
        match err {
            TranscribeError::Artifact { path, .. } => {
                assert_eq!(path, dir.path().join("clip.txt"));
            }
            other => panic!("expected Artifact, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_hung_tool_times_out() {
        let dir = tempfile::tempdir().unwrap();
        let tool = fake_tool(dir.path(), "sleep 30");
        let media = dir.path().join("clip.wav");
        std::fs::write(&media, b"x").unwrap();

        let runner = runner(&tool, dir.path(), Duration::from_millis(200));
        let err = runner.transcribe(&media).await.unwrap_err();
        assert!(matches!(err, TranscribeError::TimedOut(_)));
    }

    #[tokio::test]
    async fn test_missing_tool_is_spawn_failure() {
        let dir = tempfile::tempdir().unwrap();
        let media = dir.path().join("clip.wav");
        std::fs::write(&media, b"x").unwrap();

        let missing = dir.path().join("no-such-tool");
        let runner = runner(&missing, dir.path(), Duration::from_secs(5));
        let err = runner.transcribe(&media).await.unwrap_err();
        assert!(matches!(err, TranscribeError::Spawn { .. }));
    }
}
