//! Aggregate analytics charts.
//!
//! Three category→value series are mapped onto three chart configurations
//! and drawn once. The configurations serialize to the Chart.js JSON shape
//! (`type`, `data.labels`, `data.datasets`, `options`).

use serde::{Deserialize, Serialize};

use crate::OrderedMap;

/// Precomputed analytics snapshot, one mapping per chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateSeries {
    pub document_type_counts: OrderedMap<f64>,
    pub readability_buckets: OrderedMap<f64>,
    pub keyword_frequencies: OrderedMap<f64>,
}

impl Default for AggregateSeries {
    /// The built-in sample snapshot shown when no analytics data is supplied.
    fn default() -> Self {
        Self {
            document_type_counts: [("PDF", 45.0), ("DOCX", 30.0), ("TXT", 15.0), ("Image", 10.0)]
                .into_iter()
                .collect(),
            readability_buckets: [
                ("Simple (0-30)", 20.0),
                ("Standard (31-70)", 50.0),
                ("Complex (71-100)", 30.0),
            ]
            .into_iter()
            .collect(),
            keyword_frequencies: [
                ("technology", 24.0),
                ("report", 18.0),
                ("analysis", 16.0),
                ("data", 14.0),
                ("research", 12.0),
                ("project", 10.0),
                ("results", 9.0),
                ("development", 8.0),
                ("system", 7.0),
                ("implementation", 6.0),
            ]
            .into_iter()
            .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartId {
    DocumentTypes,
    Readability,
    Keywords,
}

impl ChartId {
    pub fn canvas_id(self) -> &'static str {
        match self {
            ChartId::DocumentTypes => "documentTypesChart",
            ChartId::Readability => "readabilityChart",
            ChartId::Keywords => "keywordsChart",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Pie,
    Doughnut,
    Bar,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba(pub u8, pub u8, pub u8, pub f32);

impl Rgba {
    pub fn with_alpha(self, alpha: f32) -> Self {
        Rgba(self.0, self.1, self.2, alpha)
    }

    pub fn css(self) -> String {
        format!("rgba({}, {}, {}, {})", self.0, self.1, self.2, self.3)
    }
}

const RED: Rgba = Rgba(255, 99, 132, 1.0);
const BLUE: Rgba = Rgba(54, 162, 235, 1.0);
const YELLOW: Rgba = Rgba(255, 206, 86, 1.0);
const TEAL: Rgba = Rgba(75, 192, 192, 1.0);

const FILL_ALPHA: f32 = 0.7;

/// Palette slots for document types, in category order.
pub const DOCUMENT_TYPE_PALETTE: [Rgba; 4] = [RED, BLUE, YELLOW, TEAL];
/// Palette slots for Simple, Standard and Complex.
pub const READABILITY_PALETTE: [Rgba; 3] = [TEAL, YELLOW, RED];
pub const KEYWORD_COLOR: Rgba = BLUE;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: Vec<f64>,
    #[serde(serialize_with = "serialize_colors")]
    pub background_color: Vec<Rgba>,
    #[serde(serialize_with = "serialize_colors")]
    pub border_color: Vec<Rgba>,
    pub border_width: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOptions {
    pub responsive: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scales: Option<Scales>,
    pub plugins: Plugins,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scales {
    pub x: Axis,
    pub y: Axis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub begin_at_zero: bool,
    pub title: Title,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plugins {
    pub legend: Legend,
    pub title: Title,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub display: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<LegendPosition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub display: bool,
    pub text: String,
}

impl Title {
    fn shown(text: &str) -> Self {
        Self {
            display: true,
            text: text.to_string(),
        }
    }
}

/// A single color applies to every element; several colors are one per slot.
fn serialize_colors<S: serde::Serializer>(colors: &[Rgba], serializer: S) -> Result<S::Ok, S::Error> {
    match colors {
        [single] => serializer.serialize_str(&single.css()),
        _ => serializer.collect_seq(colors.iter().map(|color| color.css())),
    }
}

/// The chart painting primitive. It owns pixel output, legend and tooltips.
pub trait ChartSurface {
    type Error;

    fn draw(&mut self, chart: ChartId, config: &ChartConfig) -> Result<(), Self::Error>;
}

/// Draws the three analytics charts once, in page order.
pub fn bind_aggregate_charts<S: ChartSurface>(
    series: &AggregateSeries,
    surface: &mut S,
) -> Result<(), S::Error> {
    surface.draw(ChartId::DocumentTypes, &document_types_chart(series))?;
    surface.draw(ChartId::Readability, &readability_chart(series))?;
    surface.draw(ChartId::Keywords, &keywords_chart(series))?;
    Ok(())
}

pub fn document_types_chart(series: &AggregateSeries) -> ChartConfig {
    proportion_chart(
        ChartKind::Pie,
        "Document Type Distribution",
        &series.document_type_counts,
        &DOCUMENT_TYPE_PALETTE,
    )
}

pub fn readability_chart(series: &AggregateSeries) -> ChartConfig {
    proportion_chart(
        ChartKind::Doughnut,
        "Document Readability Distribution",
        &series.readability_buckets,
        &READABILITY_PALETTE,
    )
}

pub fn keywords_chart(series: &AggregateSeries) -> ChartConfig {
    let (labels, data) = split_series(&series.keyword_frequencies);
    ChartConfig {
        kind: ChartKind::Bar,
        data: ChartData {
            labels,
            datasets: vec![Dataset {
                label: Some("Frequency".to_string()),
                data,
                background_color: vec![KEYWORD_COLOR.with_alpha(FILL_ALPHA)],
                border_color: vec![KEYWORD_COLOR],
                border_width: 1,
            }],
        },
        options: ChartOptions {
            responsive: true,
            scales: Some(Scales {
                x: Axis {
                    begin_at_zero: false,
                    title: Title::shown("Keyword"),
                },
                y: Axis {
                    begin_at_zero: true,
                    title: Title::shown("Frequency"),
                },
            }),
            plugins: Plugins {
                legend: Legend {
                    display: false,
                    position: None,
                },
                title: Title::shown("Most Common Keywords Across Documents"),
            },
        },
    }
}

fn proportion_chart(
    kind: ChartKind,
    title: &str,
    values: &OrderedMap<f64>,
    palette: &[Rgba],
) -> ChartConfig {
    let (labels, data) = split_series(values);
    let slots: Vec<Rgba> = (0..labels.len())
        .map(|i| palette[i % palette.len()])
        .collect();
    ChartConfig {
        kind,
        data: ChartData {
            labels,
            datasets: vec![Dataset {
                label: None,
                data,
                background_color: slots.iter().map(|c| c.with_alpha(FILL_ALPHA)).collect(),
                border_color: slots,
                border_width: 1,
            }],
        },
        options: ChartOptions {
            responsive: true,
            scales: None,
            plugins: Plugins {
                legend: Legend {
                    display: true,
                    position: Some(LegendPosition::Bottom),
                },
                title: Title::shown(title),
            },
        },
    }
}

fn split_series(values: &OrderedMap<f64>) -> (Vec<String>, Vec<f64>) {
    values
        .iter()
        .map(|(label, value)| (label.to_string(), *value))
        .unzip()
}
