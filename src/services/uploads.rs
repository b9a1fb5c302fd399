use std::path::{Component, Path, PathBuf};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use infer::MatcherType;
use uuid::Uuid;

use crate::config::Config;
use crate::database::models::{StoredFile, UploadPayload};
use crate::error::AppError;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "mov", "mkv"];

const EDITOR_DIR: &str = "editor";
const VIDEO_DIR: &str = "video";

/// Writes uploaded files under the configured upload directory and serves them back.
#[derive(Clone)]
pub struct UploadStore {
    root: PathBuf,
    config: Config,
}

impl UploadStore {
    pub fn new(config: Config) -> Self {
        Self {
            root: PathBuf::from(&config.upload_dir),
            config,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn store_image(&self, payload: &UploadPayload) -> Result<StoredFile, AppError> {
        let ext = extension_of(&payload.filename)
            .filter(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
            .ok_or_else(|| AppError::bad_request("Invalid image file type"))?;
        let bytes = decode_payload(payload)?;
        let kind = detect_image(&bytes)
            .ok_or_else(|| AppError::bad_request("Invalid image file"))?;
        self.write(Some(EDITOR_DIR), &ext, &payload.filename, kind, bytes)
            .await
    }

    pub async fn store_video(&self, payload: &UploadPayload) -> Result<StoredFile, AppError> {
        let ext = extension_of(&payload.filename)
            .filter(|ext| VIDEO_EXTENSIONS.contains(&ext.as_str()))
            .ok_or_else(|| AppError::bad_request("Invalid video file type"))?;
        let bytes = decode_payload(payload)?;
        let kind = detect_video(&bytes)
            .ok_or_else(|| AppError::bad_request("Invalid video file"))?;
        self.write(Some(VIDEO_DIR), &ext, &payload.filename, kind, bytes)
            .await
    }

    /// Announcement images live directly under the upload root.
    pub async fn store_announcement_image(
        &self,
        payload: &UploadPayload,
    ) -> Result<StoredFile, AppError> {
        let ext = extension_of(&payload.filename)
            .filter(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
            .ok_or_else(|| AppError::bad_request("Invalid file type"))?;
        let bytes = decode_payload(payload)?;
        let kind = detect_image(&bytes)
            .ok_or_else(|| AppError::bad_request("Invalid file type"))?;
        self.write(None, &ext, &payload.filename, kind, bytes).await
    }

    /// Deletes a previously stored file. Missing files are ignored.
    pub async fn remove(&self, stored_path: &str) {
        let Some(path) = self.resolve(stored_path) else {
            log::warn!("Refusing to remove file outside upload dir: {}", stored_path);
            return;
        };
        match tokio::fs::remove_file(&path).await {
            Ok(()) => log::debug!("Removed upload {}", path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => log::warn!("Failed to remove upload {}: {}", path.display(), e),
        }
    }

    /// Maps a stored path (with or without the upload dir prefix) to a file on
    /// disk. Returns None for anything that escapes the upload root.
    pub fn resolve(&self, stored_path: &str) -> Option<PathBuf> {
        let trimmed = Path::new(stored_path.trim_start_matches('/'));
        let relative = Path::new(stored_path)
            .strip_prefix(&self.root)
            .or_else(|_| trimmed.strip_prefix(&self.root))
            .unwrap_or(trimmed);

        let mut resolved = self.root.clone();
        for component in relative.components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                _ => return None,
            }
        }

        if resolved == self.root {
            return None;
        }
        Some(resolved)
    }

    pub async fn read(&self, stored_path: &str) -> Result<(Vec<u8>, String), AppError> {
        let path = self
            .resolve(stored_path)
            .ok_or_else(|| AppError::not_found("File not found"))?;
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|_| AppError::not_found("File not found"))?;
        Ok((bytes, content_type_for(&path)))
    }

    async fn write(
        &self,
        subdir: Option<&str>,
        ext: &str,
        original_name: &str,
        kind: infer::Type,
        bytes: Vec<u8>,
    ) -> Result<StoredFile, AppError> {
        let mut dir = self.root.clone();
        let mut stored_path = self.root.to_string_lossy().trim_end_matches('/').to_string();
        if let Some(subdir) = subdir {
            dir.push(subdir);
            stored_path.push('/');
            stored_path.push_str(subdir);
        }
        tokio::fs::create_dir_all(&dir).await.map_err(|e| {
            AppError::internal_server_error_message(format!("Failed to create upload dir: {}", e))
        })?;

        let file_name = format!("{}.{}", Uuid::new_v4(), ext);
        let path = dir.join(&file_name);
        let size = bytes.len() as u64;
        tokio::fs::write(&path, bytes).await.map_err(|e| {
            log::error!("Failed to write upload {}: {}", path.display(), e);
            AppError::internal_server_error_message("Failed to save file")
        })?;

        stored_path.push('/');
        stored_path.push_str(&file_name);
        log::info!("Stored upload {} ({} bytes)", stored_path, size);

        Ok(StoredFile {
            url: self.config.public_url(&stored_path),
            path: stored_path,
            name: original_name.to_string(),
            size,
            content_type: kind.mime_type().to_string(),
        })
    }
}

fn extension_of(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

fn decode_payload(payload: &UploadPayload) -> Result<Vec<u8>, AppError> {
    let bytes = STANDARD
        .decode(payload.content_base64.trim())
        .map_err(|_| AppError::bad_request("File content is not valid base64"))?;
    if bytes.is_empty() {
        return Err(AppError::bad_request("File is empty"));
    }
    Ok(bytes)
}

/// Sniffs `bytes` and returns the detected type when it is an allowed image format.
pub fn detect_image(bytes: &[u8]) -> Option<infer::Type> {
    infer::get(bytes).filter(|kind| {
        matches!(kind.matcher_type(), MatcherType::Image)
            && IMAGE_EXTENSIONS.contains(&kind.extension())
    })
}

/// Sniffs `bytes` and returns the detected type when it is an allowed video container.
pub fn detect_video(bytes: &[u8]) -> Option<infer::Type> {
    infer::get(bytes).filter(|kind| {
        matches!(kind.matcher_type(), MatcherType::Video)
            && VIDEO_EXTENSIONS.contains(&kind.extension())
    })
}

pub fn content_type_for(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}
