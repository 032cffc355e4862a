//! Report exporter: state-free per invocation.
//!
//! Filters the loaded table by a half-open date range on the `start`
//! timestamp column, groups by a chosen column, computes per-group counts
//! and value sums, renders a timeline chart, and serializes the filtered
//! table into the requested formats. Each serializer is independent — one
//! failing never blocks the others.

pub mod chart;
pub mod csv;
pub mod json;
pub mod pdf;
pub mod xlsx;

use ::csv as csv_crate;
use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::dataset::DataTable;

/// Grouping columns tried, in order, when the requested one is absent.
const GROUP_FALLBACKS: [&str; 5] = ["patient_id", "id", "provider", "department", "doctor"];

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV serialization failed: {0}")]
    Csv(String),

    #[error("Spreadsheet serialization failed: {0}")]
    Xlsx(String),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("Timeline chart rendering failed: {0}")]
    Chart(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<csv_crate::Error> for ExportError {
    fn from(err: csv_crate::Error) -> Self {
        ExportError::Csv(err.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Metric {
    Count,
    ValueSum,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExportFormat {
    Csv,
    Xlsx,
    Json,
    Pdf,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Json => "json",
            ExportFormat::Pdf => "pdf",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// First day included.
    pub start: NaiveDate,
    /// First day excluded — the range is half-open `[start, end)`.
    pub end: NaiveDate,
    pub group_by: String,
    pub metric: Metric,
}

/// One bar of the timeline chart.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineRow {
    pub group: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub group: String,
    pub count: usize,
    /// Sum of the `value` (or `treatment_cost`) column; `None` when the
    /// table carries neither.
    pub value_sum: Option<f64>,
}

/// A built report: the filtered table plus the derived timeline and
/// per-group summary. Everything downstream (chart, serializers) reads
/// from this.
#[derive(Debug, Clone)]
pub struct Report {
    pub filtered: DataTable,
    pub group_column: String,
    pub metric: Metric,
    pub timeline: Vec<TimelineRow>,
    pub summary: Vec<GroupSummary>,
}

/// Builds a report, synthesizing timeline columns from the current time
/// when the table has none.
pub fn build_report(table: &DataTable, opts: &ReportOptions) -> Report {
    build_report_from(table, opts, Local::now().naive_local())
}

/// Deterministic variant: `base` anchors synthesized `start`/`end`
/// columns (hourly sequence, one-hour spans).
pub fn build_report_from(table: &DataTable, opts: &ReportOptions, base: NaiveDateTime) -> Report {
    let mut table = table.clone();
    ensure_timeline_columns(&mut table, base);

    let range_start = opts.start.and_hms_opt(0, 0, 0).expect("midnight is valid");
    let range_end = opts.end.and_hms_opt(0, 0, 0).expect("midnight is valid");

    // Half-open filter on the start timestamp; unparseable cells drop the row.
    let kept: Vec<usize> = (0..table.len())
        .filter(|&r| {
            table
                .text(r, "start")
                .and_then(|s| parse_datetime(&s))
                .is_some_and(|ts| ts >= range_start && ts < range_end)
        })
        .collect();

    let mut filtered = DataTable::new(table.columns().to_vec());
    for &r in &kept {
        if let Some(row) = table.row(r) {
            filtered.push_row(row.to_vec());
        }
    }

    let group_column = resolve_group_column(&filtered, &opts.group_by);
    let timeline = build_timeline(&filtered, &group_column);
    let summary = summarize_groups(&filtered, &group_column);

    Report {
        filtered,
        group_column,
        metric: opts.metric,
        timeline,
        summary,
    }
}

/// Runs every requested serializer, catching each failure individually.
pub fn export_all(
    report: &Report,
    formats: &[ExportFormat],
) -> Vec<(ExportFormat, Result<Vec<u8>, ExportError>)> {
    formats
        .iter()
        .map(|&format| {
            let result = match format {
                ExportFormat::Csv => csv::to_csv_bytes(&report.filtered),
                ExportFormat::Xlsx => xlsx::to_xlsx_bytes(&report.filtered),
                ExportFormat::Json => json::to_json_bytes(&report.filtered),
                ExportFormat::Pdf => pdf::to_pdf_bytes(report),
            };
            if let Err(e) = &result {
                tracing::warn!(format = ?format, "export format failed: {e}");
            }
            (format, result)
        })
        .collect()
}

/// Writes successful exports as `<stem>.<ext>` under `dir`, returning the
/// written paths. Failed formats are skipped — they were already reported
/// by `export_all`.
pub fn write_exports(
    dir: &std::path::Path,
    stem: &str,
    results: &[(ExportFormat, Result<Vec<u8>, ExportError>)],
) -> Result<Vec<std::path::PathBuf>, ExportError> {
    std::fs::create_dir_all(dir)?;
    let mut written = Vec::new();
    for (format, result) in results {
        if let Ok(bytes) = result {
            let path = dir.join(format!("{stem}.{}", format.extension()));
            std::fs::write(&path, bytes)?;
            written.push(path);
        }
    }
    Ok(written)
}

/// Adds `start`/`end` columns when the table has none: an hourly sequence
/// from `base`, each row spanning one hour.
fn ensure_timeline_columns(table: &mut DataTable, base: NaiveDateTime) {
    if table.has_column("start") && table.has_column("end") {
        return;
    }
    let fmt = "%Y-%m-%d %H:%M:%S";
    let rows = table.len();
    if !table.has_column("start") {
        let values: Vec<Value> = (0..rows)
            .map(|i| Value::from((base + Duration::hours(i as i64)).format(fmt).to_string()))
            .collect();
        push_column(table, "start", values);
    }
    if !table.has_column("end") {
        let start_idx = table
            .column_index("start")
            .expect("start column just ensured");
        let values: Vec<Value> = (0..rows)
            .map(|i| {
                let start = table
                    .row(i)
                    .and_then(|row| row.get(start_idx))
                    .and_then(|v| v.as_str())
                    .and_then(parse_datetime);
                let end = match start {
                    Some(ts) => ts + Duration::hours(1),
                    None => base + Duration::hours(i as i64 + 1),
                };
                Value::from(end.format(fmt).to_string())
            })
            .collect();
        push_column(table, "end", values);
    }
}

fn push_column(table: &mut DataTable, name: &str, values: Vec<Value>) {
    let mut rebuilt = DataTable::new(
        table
            .columns()
            .iter()
            .cloned()
            .chain(std::iter::once(name.to_string()))
            .collect(),
    );
    for (i, value) in values.into_iter().enumerate() {
        let mut row = table.row(i).map(|r| r.to_vec()).unwrap_or_default();
        row.push(value);
        rebuilt.push_row(row);
    }
    *table = rebuilt;
}

/// Falls back through the usual identity/grouping candidates when the
/// requested column is missing; last resort is the first column.
fn resolve_group_column(table: &DataTable, requested: &str) -> String {
    if table.has_column(requested) {
        return requested.to_string();
    }
    for candidate in GROUP_FALLBACKS {
        if table.has_column(candidate) {
            return candidate.to_string();
        }
    }
    table
        .columns()
        .first()
        .cloned()
        .unwrap_or_else(|| "start".to_string())
}

fn build_timeline(table: &DataTable, group_column: &str) -> Vec<TimelineRow> {
    let mut rows: Vec<TimelineRow> = (0..table.len())
        .filter_map(|r| {
            let start = table.text(r, "start").and_then(|s| parse_datetime(&s))?;
            let end = table
                .text(r, "end")
                .and_then(|s| parse_datetime(&s))
                .unwrap_or(start + Duration::hours(1));
            let group = table
                .text(r, group_column)
                .unwrap_or_else(|| "(none)".to_string());
            Some(TimelineRow { group, start, end })
        })
        .collect();
    rows.sort_by_key(|r| r.start);
    rows
}

fn summarize_groups(table: &DataTable, group_column: &str) -> Vec<GroupSummary> {
    let value_column = ["value", "treatment_cost"]
        .into_iter()
        .find(|c| table.has_column(c));

    crate::analytics::group_rows(table, group_column)
        .into_iter()
        .map(|(group, rows)| GroupSummary {
            group,
            count: rows.len(),
            value_sum: value_column
                .map(|col| rows.iter().filter_map(|&r| table.number(r, col)).sum()),
        })
        .collect()
}

/// Lenient timestamp parsing: common datetime layouts, then a bare date
/// (interpreted as midnight). `None` mirrors coerce-to-missing behavior.
pub(crate) fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(ts);
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
