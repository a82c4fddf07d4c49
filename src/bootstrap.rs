use crate::config::AppConfig;
use crate::data_structures::RenderedPage;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use ibge_phillips::prelude::*;
use tracing::{error, info, instrument};

/// Run the pipeline once and render its result into the served page.
///
/// Every failure ends up as the error page; nothing here is fatal.
#[instrument(skip(config), fields(environment = %config.environment))]
pub async fn build_page(config: &AppConfig) -> RenderedPage {
    info!(
        inflation_url = %config.endpoints.inflation,
        unemployment_url = %config.endpoints.unemployment,
        timeout_secs = config.fetch_timeout.as_secs(),
        "Running IBGE pipeline"
    );

    let dataset = match PipelineBuilder::new()
        .with_timeout(config.fetch_timeout)
        .with_endpoints(config.endpoints.clone())
        .build()
    {
        Ok(pipeline) => pipeline.run_or_empty().await,
        Err(e) => {
            error!(?e, "Failed to initialize IBGE client");
            Dataset::empty()
        }
    };

    render_dataset(&dataset, config.report_timezone, Utc::now())
}

pub fn render_dataset(dataset: &Dataset, timezone: Tz, now: DateTime<Utc>) -> RenderedPage {
    let report = Report::from_dataset(dataset);
    let meta = PageMeta {
        generated_at: Some(now.with_timezone(&timezone).format("%Y-%m-%d %H:%M %Z").to_string()),
    };
    let html = render_page(&report, &meta);

    if report.is_ready() {
        info!(rows = dataset.len(), bytes = html.len(), "Rendered dashboard page");
    } else {
        error!("No data available, serving error page");
    }

    RenderedPage {
        html,
        has_data: report.is_ready(),
        rows: dataset.len(),
        generated_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use ibge_phillips::report::ERROR_MESSAGE;

    fn sample_dataset() -> Dataset {
        let rows = [(1, 14.9, 0.8), (2, 14.6, 1.1), (3, 14.0, 2.6)]
            .into_iter()
            .map(|(quarter, unemployment, inflation)| {
                let q = QuarterKey::new(2021, quarter).unwrap();
                JoinedRecord {
                    region: MacroRegion::Sudeste,
                    quarter: q,
                    unemployment,
                    inflation,
                    date: q.start_date().unwrap(),
                }
            })
            .collect();
        Dataset::new(rows)
    }

    #[test]
    fn test_render_empty_dataset_serves_error() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 15, 0, 0).unwrap();
        let page = render_dataset(&Dataset::empty(), chrono_tz::UTC, now);
        assert!(!page.has_data);
        assert_eq!(page.rows, 0);
        assert!(page.html.contains(ERROR_MESSAGE));
        assert!(!page.html.contains("Generated at"));
    }

    #[test]
    fn test_render_uses_report_timezone() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 15, 0, 0).unwrap();
        let page = render_dataset(&sample_dataset(), chrono_tz::America::Sao_Paulo, now);
        assert!(page.has_data);
        assert_eq!(page.rows, 3);
        assert!(page.html.contains("Generated at 2024-03-01 12:00 -03"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoints_produce_error_page() {
        let mut config = AppConfig::from_lookup(|_| None).unwrap();
        config.endpoints = Endpoints {
            inflation: "http://127.0.0.1:9/ipca".to_string(),
            unemployment: "http://127.0.0.1:9/pnad".to_string(),
        };
        config.fetch_timeout = std::time::Duration::from_millis(500);

        let page = build_page(&config).await;
        assert!(!page.has_data);
        assert!(page.html.contains(ERROR_MESSAGE));
    }
}
