use std::sync::Arc;

use wayfare_core::SearchService;

#[derive(Clone)]
pub struct AppState {
    pub search: Arc<SearchService>,
}
