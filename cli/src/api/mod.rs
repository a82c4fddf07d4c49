//! High-level API for running the pipeline
//!
//! `PipelineBuilder` wires the live IBGE client; `DashboardPipeline` accepts
//! any `SeriesSource`.

pub mod builder;
pub mod pipeline;

pub use builder::PipelineBuilder;
pub use pipeline::DashboardPipeline;
