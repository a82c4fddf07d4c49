use crate::models::Dataset;
use std::io::Write;
use std::path::Path;

/// Write the joined dataset as CSV, one row per (region, quarter)
pub fn write_csv<W: Write>(dataset: &Dataset, writer: W) -> anyhow::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in dataset.rows() {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn export_csv(dataset: &Dataset, path: &Path) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)?;
    write_csv(dataset, file)?;
    tracing::info!(rows = dataset.len(), path = %path.display(), "Exported joined dataset");
    Ok(())
}
