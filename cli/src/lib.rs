//! # ibge-phillips - Regional inflation vs unemployment analysis
//!
//! Fetches two IBGE series (monthly IPCA by metropolitan area and quarterly
//! PNAD unemployment by macro-region), aligns them on (macro-region, quarter),
//! and renders a five-chart Plotly report:
//! - Monthly → quarterly inflation aggregation (mean × 3)
//! - Metropolitan area → macro-region mapping by leading code digit
//! - Inner join, region means, Pearson correlation with p-value, OLS trends
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ibge_phillips::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pipeline = PipelineBuilder::new().build()?;
//!     let dataset = pipeline.run_or_empty().await;
//!     let report = Report::from_dataset(&dataset);
//!     println!("{}", render_page(&report, &PageMeta::default()).len());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod error;
pub mod models;
pub mod parser;
pub mod report;
pub mod services;
pub mod utils;

// Prelude for convenient imports
pub mod prelude {
    //! Import this module to get the most commonly used types and functions:
    //! ```rust
    //! use ibge_phillips::prelude::*;
    //! ```

    pub use crate::api::{DashboardPipeline, PipelineBuilder};
    pub use crate::error::{FetchError, PipelineError, SeriesKind};
    pub use crate::models::{Dataset, JoinedRecord, MacroRegion, QuarterKey};
    pub use crate::report::{render_page, PageMeta, Report};
    pub use crate::services::{Endpoints, SeriesSource};
    pub use crate::utils::{pearson, region_means, Correlation, RegionMeans};
}

pub use utils::{init_logger, Logger, Timer};
