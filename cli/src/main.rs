use clap::{Args, Parser, Subcommand};
use ibge_phillips::{
    prelude::*,
    services::{export_csv, DEFAULT_TIMEOUT},
    utils::{format_utc, init_logger},
};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "ibge-phillips")]
#[command(about = "Align IBGE inflation and unemployment series by macro-region and quarter")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args)]
pub struct SourceArgs {
    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    timeout_secs: u64,
    /// Override the IPCA endpoint
    #[arg(long)]
    inflation_url: Option<String>,
    /// Override the PNAD endpoint
    #[arg(long)]
    unemployment_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print region means and the global Pearson correlation
    Summary {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Write the dashboard page to an HTML file
    Render {
        #[command(flatten)]
        source: SourceArgs,
        /// Output file
        #[arg(short, long, default_value = "dashboard.html")]
        output: PathBuf,
    },
    /// Write the joined dataset to a CSV file
    Export {
        #[command(flatten)]
        source: SourceArgs,
        /// Output file
        #[arg(short, long, default_value = "joined.csv")]
        output: PathBuf,
    },
}

async fn load_dataset(args: &SourceArgs) -> anyhow::Result<Dataset> {
    let mut builder = PipelineBuilder::new().with_timeout(Duration::from_secs(args.timeout_secs));
    if let Some(url) = &args.inflation_url {
        builder = builder.with_inflation_url(url.clone());
    }
    if let Some(url) = &args.unemployment_url {
        builder = builder.with_unemployment_url(url.clone());
    }
    Ok(builder.build()?.run_or_empty().await)
}

fn print_summary(dataset: &Dataset) {
    println!("{:<14} {:>8} {:>16} {:>18}", "Region", "Quarters", "Unemployment %", "Quarterly IPCA %");
    for means in region_means(dataset) {
        println!(
            "{:<14} {:>8} {:>16.2} {:>18.2}",
            means.region.name(),
            means.quarters,
            means.unemployment,
            means.inflation
        );
    }
    match pearson(&dataset.inflation_values(), &dataset.unemployment_values()) {
        Some(c) => println!("\nPearson r = {:.3} (p-value: {:.3}, n = {})", c.r, c.p_value, c.n),
        None => println!("\nPearson correlation not computable"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger()?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Summary { source } => {
            let dataset = load_dataset(&source).await?;
            if dataset.is_empty() {
                println!("{}", ibge_phillips::report::ERROR_MESSAGE);
                return Ok(());
            }
            print_summary(&dataset);
        }
        Commands::Render { source, output } => {
            let dataset = load_dataset(&source).await?;
            let report = Report::from_dataset(&dataset);
            let meta = PageMeta {
                generated_at: Some(format_utc(chrono::Utc::now())),
            };
            std::fs::write(&output, render_page(&report, &meta))?;
            println!("[{}] Wrote {} ({} rows)", format_utc(chrono::Utc::now()), output.display(), dataset.len());
        }
        Commands::Export { source, output } => {
            let dataset = load_dataset(&source).await?;
            if dataset.is_empty() {
                anyhow::bail!(ibge_phillips::report::ERROR_MESSAGE);
            }
            export_csv(&dataset, &output)?;
            println!("[{}] Wrote {} ({} rows)", format_utc(chrono::Utc::now()), output.display(), dataset.len());
        }
    }

    Ok(())
}
