use std::sync::Arc;

use crate::ingestion::IngestionOptions;
use crate::layout::DataLayout;

/// Shared, read-only handler state.
#[derive(Clone)]
pub struct AppState {
    pub layout: Arc<DataLayout>,
    pub options: Arc<IngestionOptions>,
}

impl AppState {
    pub fn new(layout: DataLayout, options: IngestionOptions) -> Self {
        Self {
            layout: Arc::new(layout),
            options: Arc::new(options),
        }
    }
}
