use thiserror::Error;

use crate::SelectedFile;

/// Declared MIME types accepted for upload.
pub const ALLOWED_MIME_TYPES: [&str; 6] = [
    "application/pdf",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/msword",
    "text/plain",
    "image/png",
    "image/jpeg",
];

/// Request size accepted by the analysis service.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 16 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid file type. Please upload PDF, DOCX, DOC, TXT, PNG, or JPG files.")]
    UnsupportedType { mime_type: String },
    #[error("File is too large ({actual} bytes). The maximum upload size is {max_bytes} bytes.")]
    TooLarge { max_bytes: u64, actual: u64 },
}

/// Checks a selected file against the allow-list and optional size ceiling.
///
/// The declared type is compared exactly; parameters such as `; charset=` are
/// not stripped.
pub fn validate_file(file: &SelectedFile, max_bytes: Option<u64>) -> Result<(), ValidationError> {
    if !ALLOWED_MIME_TYPES.contains(&file.mime_type.as_str()) {
        return Err(ValidationError::UnsupportedType {
            mime_type: file.mime_type.clone(),
        });
    }
    if let Some(max_bytes) = max_bytes {
        if file.byte_size > max_bytes {
            return Err(ValidationError::TooLarge {
                max_bytes,
                actual: file.byte_size,
            });
        }
    }
    Ok(())
}
