use resolver_cli::Resolver;
use std::sync::Arc;

/// Shared by every request; holds no per-request data.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<Resolver>,
}

impl AppState {
    pub fn new(resolver: Resolver) -> Self {
        AppState {
            resolver: Arc::new(resolver),
        }
    }
}
