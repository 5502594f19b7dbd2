use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use docmeta_core::ExportFile;
use docmeta_logging::docmeta_info;
use tempfile::Builder;
use thiserror::Error;

use crate::safe_file_name;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("export directory {path:?} is unusable: {reason}")]
    ExportDir { path: PathBuf, reason: String },
    #[error("writing export: {0}")]
    Io(#[from] io::Error),
}

/// Directory that downloads are saved into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDir {
    path: PathBuf,
}

impl ExportDir {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the directory when missing; fails if something else sits at the path.
    pub fn prepare(&self) -> Result<(), PersistError> {
        match fs::metadata(&self.path) {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(self.unusable("not a directory")),
            Err(err) if err.kind() == io::ErrorKind::NotFound => fs::create_dir_all(&self.path)
                .map_err(|err| self.unusable(err.to_string())),
            Err(err) => Err(self.unusable(err.to_string())),
        }
    }

    /// Writes `contents` to `name` inside the directory through a temp file and a rename,
    /// replacing any earlier file of that name.
    pub fn write_atomic(&self, name: &str, contents: &[u8]) -> Result<PathBuf, PersistError> {
        self.prepare()?;
        let target = self.path.join(name);
        let mut staged = Builder::new()
            .prefix(".docmeta-")
            .suffix(".part")
            .tempfile_in(&self.path)?;
        staged.write_all(contents)?;
        staged.as_file().sync_all()?;
        staged.persist(&target).map_err(|err| PersistError::Io(err.error))?;
        Ok(target)
    }

    fn unusable(&self, reason: impl Into<String>) -> PersistError {
        PersistError::ExportDir {
            path: self.path.clone(),
            reason: reason.into(),
        }
    }
}

/// Saves an export into `dir` under its sanitized download name.
pub fn save_export(dir: &Path, export: &ExportFile) -> Result<PathBuf, PersistError> {
    let name = safe_file_name(&export.filename);
    let path = ExportDir::new(dir).write_atomic(&name, export.contents.as_bytes())?;
    docmeta_info!(
        "Saved {} export ({} bytes) to {:?}",
        export.mime_type,
        export.contents.len(),
        path
    );
    Ok(path)
}
