use crate::{DocumentMetadata, Phase};

/// Opacity floor applied to keyword tags.
pub const MIN_KEYWORD_OPACITY: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub phase: Phase,
    pub selected_file: Option<String>,
    pub progress: ProgressView,
    /// Present only while the results region is revealed.
    pub results: Option<MetadataView>,
    pub can_download: bool,
    pub dirty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressView {
    pub visible: bool,
    pub percent: u8,
    pub failed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetadataView {
    pub title: String,
    pub filename: String,
    pub word_count: String,
    pub processing_date: String,
    pub language: String,
    pub readability: ReadabilityView,
    pub summary: String,
    pub keywords: Vec<KeywordTag>,
    pub entity_groups: Vec<EntityGroupView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadabilityView {
    /// Score rounded to the nearest integer.
    pub label: String,
    /// Raw score used as the bar fill percentage; not clamped.
    pub bar_width_percent: f64,
    pub category: ReadabilityCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadabilityCategory {
    /// Below 30: easy reading.
    Low,
    /// 30 up to (not including) 70.
    Medium,
    /// 70 and above: hard reading.
    High,
}

impl ReadabilityCategory {
    pub fn from_score(score: f64) -> Self {
        if score < 30.0 {
            ReadabilityCategory::Low
        } else if score < 70.0 {
            ReadabilityCategory::Medium
        } else {
            ReadabilityCategory::High
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReadabilityCategory::Low => "low",
            ReadabilityCategory::Medium => "medium",
            ReadabilityCategory::High => "high",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeywordTag {
    pub text: String,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityGroupView {
    pub entity_type: String,
    pub items: Vec<String>,
}

/// Digit grouping used for counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    pub grouping_separator: Option<char>,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            grouping_separator: Some(','),
        }
    }
}

impl NumberFormat {
    pub fn format_count(&self, value: u64) -> String {
        let digits = value.to_string();
        let Some(separator) = self.grouping_separator else {
            return digits;
        };
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().rev().enumerate() {
            if i != 0 && i % 3 == 0 {
                out.push(separator);
            }
            out.push(ch);
        }
        out.chars().rev().collect()
    }
}

/// Rounds to the nearest integer, ties toward positive infinity.
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

pub fn keyword_opacity(score: f64) -> f64 {
    score.max(MIN_KEYWORD_OPACITY)
}

/// Pure projection of a metadata record onto the results region.
///
/// Keyword tags and entity groups are rebuilt from scratch on every call.
pub fn render_metadata(
    metadata: &DocumentMetadata,
    original_filename: &str,
    number_format: &NumberFormat,
) -> MetadataView {
    let title = metadata
        .title
        .clone()
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| original_filename.to_string());

    let keywords = metadata
        .keywords
        .iter()
        .map(|keyword| KeywordTag {
            text: keyword.text.clone(),
            opacity: keyword_opacity(keyword.score),
        })
        .collect();

    let entity_groups = metadata
        .entities
        .iter()
        .filter(|(_, items)| !items.is_empty())
        .map(|(entity_type, items)| EntityGroupView {
            entity_type: entity_type.to_string(),
            items: items.clone(),
        })
        .collect();

    let score = metadata.readability_score;
    MetadataView {
        title,
        filename: metadata.filename.clone(),
        word_count: number_format.format_count(metadata.word_count),
        processing_date: metadata.processing_date.clone(),
        language: metadata.language.clone(),
        readability: ReadabilityView {
            label: format!("{}", round_half_up(score) as i64),
            bar_width_percent: score,
            category: ReadabilityCategory::from_score(score),
        },
        summary: metadata.summary.clone(),
        keywords,
        entity_groups,
    }
}
