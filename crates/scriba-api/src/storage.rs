//! On-disk intake for uploaded media.
//!
//! Stored names are minted per request from a millisecond timestamp plus a
//! short random nonce, keeping the original extension. The timestamp keeps
//! names sortable by arrival; the nonce makes concurrent same-millisecond
//! uploads collision-free without any locking.

use chrono::Utc;
use scriba_core::AppError;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// Derive the collision-avoided stored name for an uploaded file.
pub fn stored_name_for(original_filename: &str) -> String {
    let stamp = Utc::now().timestamp_millis();
    let nonce = Uuid::new_v4().simple().to_string();
    let nonce = &nonce[..8];

    let ext = Path::new(original_filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext {
        Some(ext) if !ext.is_empty() => format!("{}-{}.{}", stamp, nonce, ext),
        _ => format!("{}-{}", stamp, nonce),
    }
}

/// Writes uploaded bytes under the configured upload directory.
#[derive(Clone)]
pub struct UploadVault {
    root: PathBuf,
}

impl UploadVault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Persist the raw upload to `{root}/{stored_name}` and return its path.
    pub async fn store(&self, stored_name: &str, data: &[u8]) -> Result<PathBuf, AppError> {
        fs::create_dir_all(&self.root).await.map_err(|e| {
            AppError::Internal(format!(
                "Failed to create upload directory {}: {}",
                self.root.display(),
                e
            ))
        })?;

        let path = self.root.join(stored_name);
        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            AppError::Internal(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(data).await.map_err(|e| {
            AppError::Internal(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            AppError::Internal(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Upload stored to disk"
        );

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_name_keeps_extension_lowercased() {
        let name = stored_name_for("Meeting Recording.MP3");
        assert!(name.ends_with(".mp3"));
    }

    #[test]
    fn test_stored_name_without_extension() {
        let name = stored_name_for("recording");
        assert!(!name.contains('.'));
        assert!(!name.is_empty());
    }

    #[test]
    fn test_stored_names_are_distinct() {
        let a = stored_name_for("clip.wav");
        let b = stored_name_for("clip.wav");
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_vault_stores_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let vault = UploadVault::new(dir.path().join("uploads"));

        let path = vault.store("1712-abc.mp3", b"audio bytes").await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"audio bytes");
        assert_eq!(path, dir.path().join("uploads").join("1712-abc.mp3"));
    }
}
