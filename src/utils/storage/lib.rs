use crate::types::StorageContext;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Please upload a file")]
    MissingFile,
    #[error("Please upload an image file")]
    NotAnImage,
    #[error("Please upload an image less than {0} bytes")]
    TooLarge(u64),
    #[error("Problem with file upload")]
    WriteFailed,
}

pub fn validate_image(content_type: Option<&str>, size: u64, max_size: u64) -> Result<(), Error> {
    match content_type {
        Some(content_type) if content_type.starts_with("image") => (),
        _ => return Err(Error::NotAnImage),
    }

    if size > max_size {
        return Err(Error::TooLarge(max_size));
    }

    Ok(())
}

/// `photo_<owner id><.ext>`, extension taken from the client's file name.
pub fn photo_file_name(owner_id: &str, original_name: Option<&str>) -> String {
    let extension = original_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|extension| extension.to_str())
        .map(|extension| format!(".{}", extension))
        .unwrap_or_default();

    format!("photo_{}{}", owner_id, extension)
}

pub async fn file_size(file: &NamedTempFile) -> Result<u64, Error> {
    tokio::fs::metadata(file.path())
        .await
        .map(|metadata| metadata.len())
        .map_err(|err| {
            tracing::error!("Failed to read the uploaded file {:?}", err);
            Error::WriteFailed
        })
}

/// Copies the upload into the configured directory. The temp file is removed
/// when `file` is dropped, whatever the outcome.
pub async fn persist_file(
    cfg: &StorageContext,
    file: NamedTempFile,
    file_name: &str,
) -> Result<PathBuf, Error> {
    let destination = Path::new(&cfg.upload_path).join(file_name);

    tokio::fs::create_dir_all(&cfg.upload_path)
        .await
        .map_err(|err| {
            tracing::error!("Failed to create upload directory {}: {:?}", cfg.upload_path, err);
            Error::WriteFailed
        })?;

    tokio::fs::copy(file.path(), &destination)
        .await
        .map_err(|err| {
            tracing::error!("Failed to save uploaded file {:?}: {:?}", destination, err);
            Error::WriteFailed
        })?;

    tracing::debug!("Saved uploaded file to {:?}", destination);

    Ok(destination)
}
