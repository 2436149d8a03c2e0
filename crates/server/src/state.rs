use std::sync::Arc;

use service::clients::ClientRepository;

/// Shared handler state. The repository re-reads storage on every call, so
/// nothing here caches records.
#[derive(Clone)]
pub struct AppState {
    pub clients: Arc<dyn ClientRepository>,
}

impl AppState {
    pub fn new(clients: Arc<dyn ClientRepository>) -> Self {
        Self { clients }
    }
}
