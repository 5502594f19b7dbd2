use serde::{Deserialize, Serialize};

use crate::OrderedMap;

/// Analysis result for one document, as produced by the analysis service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
    #[serde(default)]
    pub word_count: u64,
    #[serde(default)]
    pub processing_date: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub keywords: Vec<Keyword>,
    #[serde(default)]
    pub entities: OrderedMap<Vec<String>>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub readability_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    pub text: String,
    pub score: f64,
}

/// Application-level outcome of a completed (2xx) upload.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadReply {
    Success {
        metadata: DocumentMetadata,
        original_filename: String,
    },
    Failure {
        error: String,
    },
}
