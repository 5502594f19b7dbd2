use std::fs;
use std::io;
use std::path::Path;

use docmeta_core::SelectedFile;
use thiserror::Error;

/// Declared type for files whose extension has no known MIME type.
pub const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

#[derive(Debug, Error)]
pub enum AcquireError {
    #[error("cannot read {path}: {source}")]
    Io { path: String, source: io::Error },
    #[error("{0} is not a regular file")]
    NotAFile(String),
}

/// Describes a local file the way a file picker would: name, declared type and size.
///
/// The declared type is guessed from the extension; contents are not inspected.
pub fn select_local_file(path: &Path) -> Result<SelectedFile, AcquireError> {
    let meta = fs::metadata(path).map_err(|source| AcquireError::Io {
        path: path.display().to_string(),
        source,
    })?;
    if !meta.is_file() {
        return Err(AcquireError::NotAFile(path.display().to_string()));
    }

    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let mime_type = mime_guess::from_path(path)
        .first_raw()
        .unwrap_or(FALLBACK_MIME_TYPE)
        .to_string();

    Ok(SelectedFile {
        name,
        mime_type,
        byte_size: meta.len(),
        location: path.to_path_buf(),
    })
}
