use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use kyva_analytics::dashboard::{self, AppState, DEFAULT_ADDR};
use kyva_analytics::ingestion::{IngestionOptions, TracingObserver};
use kyva_analytics::layout::{DataLayout, DEFAULT_DATA_DIR};
use kyva_analytics::logging::init_logging;

/// Serve a browser preview of curated snapshots and source CSV files.
#[derive(Parser, Debug)]
#[command(name = "kyva-preview", version, about)]
struct Args {
    /// Directory holding source CSV files and the `curated` subdirectory.
    #[arg(long, env = "KYVA_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Listen address.
    #[arg(long, env = "KYVA_PREVIEW_ADDR", default_value = DEFAULT_ADDR)]
    addr: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_logging();
    let args = Args::parse();

    let options = IngestionOptions {
        observer: Some(Arc::new(TracingObserver)),
        ..Default::default()
    };
    let state = AppState::new(DataLayout::new(args.data_dir), options);

    println!("Preview dashboard on http://{}", args.addr);
    dashboard::serve(args.addr, state)
        .await
        .with_context(|| format!("serving preview dashboard on {}", args.addr))
}
