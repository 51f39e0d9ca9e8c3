use clap::Parser;
use miette::{IntoDiagnostic, Result};
use shopcart::application::engine::CartEngine;
use shopcart::domain::cart::CartPolicy;
use shopcart::domain::ports::CartStoreBox;
use shopcart::infrastructure::in_memory::InMemoryCartStore;
use shopcart::interfaces::csv::cart_writer::CartWriter;
use shopcart::interfaces::csv::operation_reader::OperationReader;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input operations CSV file
    input: PathBuf,

    /// Log and skip faulty adds instead of reporting them, and accept negative amounts.
    #[arg(long)]
    legacy: bool,

    /// Print one row per line item instead of one row per cart.
    #[arg(long, conflicts_with = "json")]
    detail: bool,

    /// Print carts as JSON.
    #[arg(long)]
    json: bool,

    /// Decimal places for printed totals.
    #[arg(long, default_value_t = 2)]
    scale: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let policy = if cli.legacy {
        CartPolicy::legacy()
    } else {
        CartPolicy::default()
    };
    let store: CartStoreBox = Box::new(InMemoryCartStore::new());
    let engine = CartEngine::with_policy(store, policy);

    let file = File::open(&cli.input).into_diagnostic()?;
    let reader = OperationReader::new(file);
    for (row, op_result) in reader.operations().enumerate() {
        match op_result {
            Ok(op) => {
                if let Err(e) = engine.process_operation(op).await {
                    tracing::warn!(row = row + 1, error = %e, "Error processing operation");
                }
            }
            Err(e) => {
                tracing::warn!(row = row + 1, error = %e, "Error reading operation");
            }
        }
    }

    let carts = engine.into_results().await.into_diagnostic()?;

    let stdout = io::stdout();
    let mut writer = CartWriter::new(stdout.lock()).with_scale(cli.scale);
    if cli.json {
        writer.write_json(&carts).into_diagnostic()?;
    } else if cli.detail {
        writer.write_details(&carts).into_diagnostic()?;
    } else {
        writer.write_summaries(&carts).into_diagnostic()?;
    }

    Ok(())
}
