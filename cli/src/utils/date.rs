use crate::models::{Dataset, QuarterKey};
use chrono::{DateTime, NaiveDate, Utc};

/// Format a quarter start date the way chart axes expect it (YYYY-MM-DD)
pub fn format_chart_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Format a UTC timestamp for logs and report footers
pub fn format_utc(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// First and last quarter covered by the dataset
pub fn quarter_span(dataset: &Dataset) -> Option<(QuarterKey, QuarterKey)> {
    let first = dataset.records().iter().map(|r| r.quarter).min()?;
    let last = dataset.records().iter().map(|r| r.quarter).max()?;
    Some((first, last))
}

/// "2020-2024" style label for titles; a single year collapses to "2020"
pub fn year_span_label(dataset: &Dataset) -> Option<String> {
    let (first, last) = quarter_span(dataset)?;
    if first.year == last.year {
        Some(first.year.to_string())
    } else {
        Some(format!("{}-{}", first.year, last.year))
    }
}

/// Format duration for logging
pub fn format_duration(duration_ms: f64) -> String {
    if duration_ms < 1000.0 {
        format!("{:.1}ms", duration_ms)
    } else if duration_ms < 60000.0 {
        format!("{:.1}s", duration_ms / 1000.0)
    } else {
        let minutes = (duration_ms / 60000.0).floor();
        let seconds = (duration_ms % 60000.0) / 1000.0;
        format!("{}m{:.1}s", minutes, seconds)
    }
}
