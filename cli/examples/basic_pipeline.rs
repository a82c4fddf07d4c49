//! Basic Pipeline Example
//!
//! Fetches both IBGE series, prints the aligned rows per region and writes
//! the dashboard page next to the current directory.

use ibge_phillips::prelude::*;
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    ibge_phillips::init_logger()?;

    let pipeline = PipelineBuilder::new().build()?;

    let dataset = match pipeline.run().await {
        Ok(dataset) => dataset,
        Err(e) => {
            println!("Pipeline failed: {}", e);
            Dataset::empty()
        }
    };

    for region in dataset.regions() {
        println!("\n{}", region.name());
        for record in dataset.for_region(region) {
            println!(
                "  {}  unemployment {:>6.2}%  quarterly IPCA {:>6.2}%",
                record.quarter, record.unemployment, record.inflation
            );
        }
    }

    let html = render_page(&Report::from_dataset(&dataset), &PageMeta::default());
    std::fs::write("dashboard.html", html)?;
    println!("\nWrote dashboard.html");

    Ok(())
}
