//! Binds the view model to plain terminal text.

use docmeta_core::{AppViewModel, MetadataView, Phase, ProgressView};

const PROGRESS_WIDTH: usize = 30;
const READABILITY_WIDTH: usize = 20;

pub fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "Idle",
        Phase::Validating => "Validating",
        Phase::Transferring => "Uploading",
        Phase::Succeeded => "Done",
        Phase::Failed => "Failed",
    }
}

/// One status line for the progress region, `None` while it is hidden.
pub fn progress_line(view: &AppViewModel) -> Option<String> {
    let progress = &view.progress;
    if !progress.visible {
        return None;
    }
    let name = view.selected_file.as_deref().unwrap_or("-");
    Some(format!(
        "{} {} {:>3}% {}",
        phase_label(view.phase),
        progress_bar(progress),
        progress.percent,
        name
    ))
}

fn progress_bar(progress: &ProgressView) -> String {
    let filled = usize::from(progress.percent.min(100)) * PROGRESS_WIDTH / 100;
    let fill = if progress.failed { 'x' } else { '#' };
    format!(
        "[{}{}]",
        fill.to_string().repeat(filled),
        ".".repeat(PROGRESS_WIDTH - filled)
    )
}

/// The revealed results region, `None` while hidden.
pub fn render_results(view: &AppViewModel) -> Option<Vec<String>> {
    view.results.as_ref().map(render_metadata_lines)
}

pub fn render_metadata_lines(meta: &MetadataView) -> Vec<String> {
    let mut lines = vec![
        meta.title.clone(),
        "=".repeat(meta.title.chars().count().max(1)),
        format!("File:        {}", meta.filename),
        format!("Words:       {}", meta.word_count),
        format!("Processed:   {}", meta.processing_date),
        format!("Language:    {}", meta.language),
        format!(
            "Readability: {} {} ({})",
            meta.readability.label,
            readability_bar(meta.readability.bar_width_percent),
            meta.readability.category.label()
        ),
        String::new(),
        "Summary".to_string(),
        format!("  {}", meta.summary),
    ];

    if !meta.keywords.is_empty() {
        lines.push(String::new());
        lines.push("Keywords".to_string());
        let tags: Vec<String> = meta
            .keywords
            .iter()
            .map(|tag| format!("{} ({:.2})", tag.text, tag.opacity))
            .collect();
        lines.push(format!("  {}", tags.join(", ")));
    }

    if !meta.entity_groups.is_empty() {
        lines.push(String::new());
        lines.push("Entities".to_string());
        for group in &meta.entity_groups {
            lines.push(format!("  {}: {}", group.entity_type, group.items.join(", ")));
        }
    }
    lines
}

/// The score is drawn clamped to the bar; the label stays unclamped.
fn readability_bar(percent: f64) -> String {
    let clamped = if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, 100.0)
    };
    let filled = (clamped / 100.0 * READABILITY_WIDTH as f64).round() as usize;
    format!(
        "[{}{}]",
        "#".repeat(filled),
        ".".repeat(READABILITY_WIDTH - filled)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use docmeta_core::{EntityGroupView, KeywordTag, ReadabilityCategory, ReadabilityView};
    use pretty_assertions::assert_eq;

    fn view_with(meta: Option<MetadataView>, progress: ProgressView) -> AppViewModel {
        AppViewModel {
            phase: Phase::Succeeded,
            selected_file: Some("notes.txt".to_string()),
            progress,
            can_download: meta.is_some(),
            results: meta,
            dirty: false,
        }
    }

    fn meta(score: f64) -> MetadataView {
        MetadataView {
            title: "Notes".to_string(),
            filename: "notes.txt".to_string(),
            word_count: "1,200".to_string(),
            processing_date: "2024-05-01 10:00:00".to_string(),
            language: "English".to_string(),
            readability: ReadabilityView {
                label: format!("{}", score.round() as i64),
                bar_width_percent: score,
                category: ReadabilityCategory::from_score(score),
            },
            summary: "Short.".to_string(),
            keywords: vec![KeywordTag {
                text: "data".to_string(),
                opacity: 0.9,
            }],
            entity_groups: vec![EntityGroupView {
                entity_type: "Org".to_string(),
                items: vec!["Acme".to_string()],
            }],
        }
    }

    #[test]
    fn hidden_progress_renders_nothing() {
        let view = view_with(None, ProgressView::default());
        assert_eq!(progress_line(&view), None);
    }

    #[test]
    fn failed_progress_uses_failure_fill() {
        let view = view_with(
            None,
            ProgressView {
                visible: true,
                percent: 50,
                failed: true,
            },
        );
        let line = progress_line(&view).unwrap();
        assert!(line.contains(&format!("[{}{}]", "x".repeat(15), ".".repeat(15))));
        assert!(line.contains(" 50% notes.txt"));
    }

    #[test]
    fn results_lines_show_every_field() {
        let view = view_with(Some(meta(72.0)), ProgressView::default());
        let lines = render_results(&view).unwrap();
        assert_eq!(lines[0], "Notes");
        assert!(lines.contains(&"Words:       1,200".to_string()));
        assert!(lines.iter().any(|l| l.starts_with("Readability: 72 [") && l.ends_with("(high)")));
        assert!(lines.contains(&"  data (0.90)".to_string()));
        assert!(lines.contains(&"  Org: Acme".to_string()));
    }

    #[test]
    fn readability_bar_is_clamped_when_drawn() {
        assert_eq!(readability_bar(150.0), format!("[{}]", "#".repeat(20)));
        assert_eq!(readability_bar(-10.0), format!("[{}]", ".".repeat(20)));
        assert_eq!(readability_bar(50.0), format!("[{}{}]", "#".repeat(10), ".".repeat(10)));
    }
}
