//! Docmeta core: pure upload pipeline state machine, view-model projection
//! and analytics chart binding.
mod charts;
mod effect;
mod export;
mod metadata;
mod msg;
mod ordered_map;
mod progress;
mod state;
mod update;
mod validate;
mod view_model;

pub use charts::{
    bind_aggregate_charts, document_types_chart, keywords_chart, readability_chart,
    AggregateSeries, Axis, ChartConfig, ChartData, ChartId, ChartKind, ChartOptions, ChartSurface,
    Dataset, Legend, LegendPosition, Plugins, Rgba, Scales, Title, DOCUMENT_TYPE_PALETTE,
    KEYWORD_COLOR, READABILITY_PALETTE,
};
pub use effect::{Effect, Notification, Severity, TransportFailure};
pub use export::{build_export, export_filename, ExportFile, EXPORT_MIME_TYPE};
pub use metadata::{DocumentMetadata, Keyword, UploadReply};
pub use msg::Msg;
pub use ordered_map::OrderedMap;
pub use progress::ProgressEstimator;
pub use state::{
    AppState, HeldResult, Phase, PipelineSettings, SelectedFile, SessionId, UploadSession,
};
pub use update::{update, UPLOAD_IN_PROGRESS_MESSAGE};
pub use validate::{validate_file, ValidationError, ALLOWED_MIME_TYPES, DEFAULT_MAX_UPLOAD_BYTES};
pub use view_model::{
    keyword_opacity, render_metadata, AppViewModel, EntityGroupView, KeywordTag, MetadataView,
    NumberFormat, ProgressView, ReadabilityCategory, ReadabilityView, MIN_KEYWORD_OPACITY,
};
