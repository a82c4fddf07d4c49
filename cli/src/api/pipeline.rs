//! Fetch → parse → aggregate → map → merge, run once per invocation

use crate::error::{PipelineError, SeriesKind};
use crate::models::Dataset;
use crate::parser::parse_series;
use crate::services::{Endpoints, SeriesSource};
use crate::utils::{aggregate_quarterly, inner_join, log_pipeline_stage, map_monthly_inflation, map_unemployment};
use tracing::{instrument, warn};

/// Builds the aligned inflation/unemployment dataset from a series source.
///
/// The pipeline holds nothing after `run` returns; the caller owns the
/// resulting [`Dataset`].
pub struct DashboardPipeline<S> {
    source: S,
    endpoints: Endpoints,
}

impl<S: SeriesSource> DashboardPipeline<S> {
    pub fn new(source: S, endpoints: Endpoints) -> Self {
        Self { source, endpoints }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Run every stage, stopping at the first failure.
    #[instrument(skip(self))]
    pub async fn run(&self) -> Result<Dataset, PipelineError> {
        let inflation_doc = self
            .source
            .fetch_json(&self.endpoints.inflation)
            .await
            .map_err(|source| PipelineError::Fetch { kind: SeriesKind::Inflation, source })?;
        let unemployment_doc = self
            .source
            .fetch_json(&self.endpoints.unemployment)
            .await
            .map_err(|source| PipelineError::Fetch { kind: SeriesKind::Unemployment, source })?;
        log_pipeline_stage("fetch", "both series received");

        let inflation = parse_series(&inflation_doc)
            .map_err(|source| PipelineError::Parse { kind: SeriesKind::Inflation, source })?;
        if inflation.is_empty() {
            return Err(PipelineError::EmptySeries(SeriesKind::Inflation));
        }
        let unemployment = parse_series(&unemployment_doc)
            .map_err(|source| PipelineError::Parse { kind: SeriesKind::Unemployment, source })?;
        if unemployment.is_empty() {
            return Err(PipelineError::EmptySeries(SeriesKind::Unemployment));
        }
        log_pipeline_stage(
            "parse",
            &format!("{} inflation / {} unemployment observations", inflation.len(), unemployment.len()),
        );

        let monthly = map_monthly_inflation(&inflation);
        let quarterly = aggregate_quarterly(&monthly);
        if quarterly.is_empty() {
            return Err(PipelineError::EmptySeries(SeriesKind::Inflation));
        }
        let unemployment = map_unemployment(&unemployment);
        if unemployment.is_empty() {
            return Err(PipelineError::EmptySeries(SeriesKind::Unemployment));
        }
        log_pipeline_stage("aggregate", &format!("{} quarterly inflation groups", quarterly.len()));

        let joined = inner_join(&unemployment, &quarterly);
        if joined.is_empty() {
            return Err(PipelineError::EmptyJoin);
        }
        log_pipeline_stage("merge", &format!("{} joined rows", joined.len()));

        Ok(Dataset::new(joined))
    }

    /// Run the pipeline, collapsing every failure into the empty dataset.
    pub async fn run_or_empty(&self) -> Dataset {
        match self.run().await {
            Ok(dataset) => dataset,
            Err(e) => {
                warn!(error = %e, "Pipeline produced no data");
                Dataset::empty()
            }
        }
    }
}
