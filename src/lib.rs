pub mod backend;
pub mod config;
pub mod error;
pub mod pages;
pub mod render;
pub mod routes;
pub mod session;

use std::sync::Arc;

use backend::Backend;
use config::WebConfig;

/// Shared application state passed to every handler.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<WebConfig>,
    /// HTTP client for the backend REST API. Holds no cookies; every request
    /// carries the browser's Cookie header explicitly.
    pub backend: Backend,
    pub started_at: std::time::Instant,
}

impl AppContext {
    pub fn new(config: WebConfig) -> anyhow::Result<Self> {
        let backend = Backend::new(&config)?;
        Ok(Self {
            config: Arc::new(config),
            backend,
            started_at: std::time::Instant::now(),
        })
    }
}
