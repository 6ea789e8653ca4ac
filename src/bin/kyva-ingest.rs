use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use kyva_analytics::curate::{self, CurationOptions};
use kyva_analytics::ingestion::{
    CompositeObserver, FileObserver, IngestionObserver, IngestionOptions, TracingObserver,
};
use kyva_analytics::layout::{DataLayout, DEFAULT_DATA_DIR};
use kyva_analytics::logging::init_logging;

/// Curate the first CSV in the data directory into a Parquet snapshot.
#[derive(Parser, Debug)]
#[command(name = "kyva-ingest", version, about)]
struct Args {
    /// Directory holding source CSV files; snapshots go to `<data-dir>/curated`.
    #[arg(long, env = "KYVA_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Also append JSON-line ingestion events to this file.
    #[arg(long, env = "KYVA_EVENT_LOG")]
    event_log: Option<PathBuf>,
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_logging();
    let args = Args::parse();

    let mut observers: Vec<Arc<dyn IngestionObserver>> = vec![Arc::new(TracingObserver)];
    if let Some(path) = &args.event_log {
        observers.push(Arc::new(FileObserver::new(path)));
    }
    let options = CurationOptions {
        ingestion: IngestionOptions {
            observer: Some(Arc::new(CompositeObserver::new(observers))),
            ..Default::default()
        },
        ..Default::default()
    };

    let layout = DataLayout::new(args.data_dir);
    let outcome = curate::run_ingestion(&layout, &options)?;
    for line in outcome.message_lines(&layout) {
        println!("{line}");
    }
    Ok(())
}
