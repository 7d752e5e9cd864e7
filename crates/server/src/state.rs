use std::sync::Arc;

use service::{ProductRepository, ProductService};

/// Shared handler state. The repository is injected here once at startup.
#[derive(Clone)]
pub struct AppState {
    pub products: ProductService,
}

impl AppState {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self { products: ProductService::new(repo) }
    }
}
