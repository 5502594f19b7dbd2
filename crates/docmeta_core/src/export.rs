use crate::DocumentMetadata;

pub const EXPORT_MIME_TYPE: &str = "application/json";

/// A client-side download built from already fetched data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: String,
    pub mime_type: &'static str,
    pub contents: String,
}

pub fn export_filename(metadata: &DocumentMetadata) -> String {
    format!("metadata_{}.json", metadata.filename)
}

/// Serializes the held metadata as 2-space indented JSON.
pub fn build_export(metadata: &DocumentMetadata) -> Result<ExportFile, serde_json::Error> {
    let contents = serde_json::to_string_pretty(metadata)?;
    Ok(ExportFile {
        filename: export_filename(metadata),
        mime_type: EXPORT_MIME_TYPE,
        contents,
    })
}
