//! Dashboard assembly: statistics, chart specs and captions for one dataset

pub mod charts;
pub mod page;

pub use page::{render_page, PageMeta};

use crate::models::Dataset;
use crate::utils::{pearson, region_means, year_span_label, Correlation, RegionMeans};
use serde_json::Value;

/// Shown instead of charts when the pipeline produced no data
pub const ERROR_MESSAGE: &str = "Failed to load data from the IBGE API. Check your connection.";

#[derive(Debug, Clone)]
pub struct ChartSection {
    pub id: &'static str,
    pub figure: Value,
    pub caption: String,
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub title: String,
    pub region_means: Vec<RegionMeans>,
    pub correlation: Option<Correlation>,
    pub sections: Vec<ChartSection>,
}

#[derive(Debug, Clone)]
pub enum Report {
    Unavailable,
    Ready(Dashboard),
}

impl Report {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        if dataset.is_empty() {
            return Report::Unavailable;
        }

        let span = year_span_label(dataset).unwrap_or_default();
        let means = region_means(dataset);
        let correlation = pearson(&dataset.inflation_values(), &dataset.unemployment_values());

        let sections = vec![
            ChartSection {
                id: "chart-map",
                figure: charts::map_figure(&means),
                caption: "Placing each macro-region's mean unemployment rate on the map shows marked \
                          spatial asymmetries in how unemployment is distributed across the country."
                    .to_string(),
            },
            ChartSection {
                id: "chart-bar",
                figure: charts::bar_figure(&means, &span),
                caption: "Comparing the regions shows that the structural level of unemployment varies \
                          widely (e.g. Nordeste versus Sul), while mean quarterly inflation is far more \
                          homogeneous over the medium term."
                    .to_string(),
            },
            ChartSection {
                id: "chart-line",
                figure: charts::line_figure(dataset),
                caption: "Over time, the pandemic shock produced systemic unemployment peaks, followed \
                          by recoveries whose pace differs between the macro-regions."
                    .to_string(),
            },
            ChartSection {
                id: "chart-pie",
                figure: charts::pie_figure(&means),
                caption: "Each slice is a region's share of the sum of mean unemployment rates, showing \
                          how unevenly the weight of unemployment is spread across the national picture."
                    .to_string(),
            },
            ChartSection {
                id: "chart-scatter",
                figure: charts::scatter_figure(dataset),
                caption: correlation_caption(correlation.as_ref()),
            },
        ];

        Report::Ready(Dashboard {
            title: format!(
                "Impact of Inflation on Unemployment across Brazil's Macro-Regions ({})",
                span
            ),
            region_means: means,
            correlation,
            sections,
        })
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Report::Ready(_))
    }
}

fn correlation_caption(correlation: Option<&Correlation>) -> String {
    match correlation {
        Some(c) => format!(
            "Global Pearson correlation between quarterly inflation and unemployment over all \
             {} region-quarters: r = {:.3} (p-value: {:.3}). Its sign and magnitude give the \
             direction and strength of the relationship between inflationary pressure and the \
             regional labour market.",
            c.n, c.r, c.p_value
        ),
        None => "The Pearson correlation could not be computed for this dataset (fewer than two \
                 observations or a constant series)."
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{JoinedRecord, MacroRegion, QuarterKey};

    fn perfectly_correlated() -> Dataset {
        let rows = (1..=4)
            .flat_map(|quarter| {
                [MacroRegion::Sudeste, MacroRegion::Sul].into_iter().map(move |region| {
                    let q = QuarterKey::new(2023, quarter).unwrap();
                    let x = f64::from(quarter) + if region == MacroRegion::Sul { 0.5 } else { 0.0 };
                    JoinedRecord {
                        region,
                        quarter: q,
                        inflation: x,
                        unemployment: 4.0 + 2.0 * x,
                        date: q.start_date().unwrap(),
                    }
                })
            })
            .collect();
        Dataset::new(rows)
    }

    #[test]
    fn test_empty_dataset_is_unavailable() {
        assert!(!Report::from_dataset(&Dataset::empty()).is_ready());
    }

    #[test]
    fn test_ready_report_has_five_sections() {
        let report = Report::from_dataset(&perfectly_correlated());
        let Report::Ready(dashboard) = report else {
            panic!("expected a ready report");
        };
        let ids: Vec<&str> = dashboard.sections.iter().map(|s| s.id).collect();
        assert_eq!(ids, ["chart-map", "chart-bar", "chart-line", "chart-pie", "chart-scatter"]);
        assert!(dashboard.title.ends_with("(2023)"));

        let correlation = dashboard.correlation.unwrap();
        assert_eq!(correlation.n, 8);
        assert!(dashboard.sections[4].caption.contains("r = 1.000"));
        assert!(correlation.p_value < 0.05);
    }

    #[test]
    fn test_single_row_reports_missing_correlation() {
        let q = QuarterKey::new(2020, 1).unwrap();
        let dataset = Dataset::new(vec![JoinedRecord {
            region: MacroRegion::Norte,
            quarter: q,
            unemployment: 12.0,
            inflation: 1.0,
            date: q.start_date().unwrap(),
        }]);
        let Report::Ready(dashboard) = Report::from_dataset(&dataset) else {
            panic!("expected a ready report");
        };
        assert!(dashboard.correlation.is_none());
        assert!(dashboard.sections[4].caption.contains("could not be computed"));
    }
}
