//! Docmeta engine: file acquisition, upload transport and export persistence.
mod acquire;
mod engine;
mod filename;
mod persist;
mod types;
mod upload;

pub use acquire::{select_local_file, AcquireError, FALLBACK_MIME_TYPE};
pub use engine::EngineHandle;
pub use filename::safe_file_name;
pub use persist::{save_export, ExportDir, PersistError};
pub use types::{EngineEvent, FailureKind, UploadError};
pub use upload::{
    decode_reply, ChannelProgressSink, ProgressSink, ReqwestUploader, UploadSettings, Uploader,
    UPLOAD_FIELD,
};
