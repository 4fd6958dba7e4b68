use std::sync::Arc;
use hl_core::NewsSource;

pub struct AppState {
    pub source: Arc<dyn NewsSource>,
}

impl AppState {
    pub fn new(source: Arc<dyn NewsSource>) -> Self {
        Self { source }
    }
}
