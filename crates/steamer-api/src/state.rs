use std::sync::Arc;

use steamer_resolver::{ProfileResolver, ProfileStore};

/// Shared application state passed to all route handlers
#[derive(Clone)]
pub struct AppState {
    pub resolver: ProfileResolver,
    /// Required on `/api/*`
    pub bearer_token: Arc<str>,
}

impl AppState {
    pub fn new(resolver: ProfileResolver, bearer_token: String) -> Self {
        Self {
            resolver,
            bearer_token: Arc::from(bearer_token),
        }
    }

    pub fn store(&self) -> &Arc<dyn ProfileStore> {
        self.resolver.store()
    }
}
