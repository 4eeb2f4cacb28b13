use std::sync::Arc;

use crate::analytics::EventSink;
use crate::email::rate_limit::RateLimiter;
use crate::resume::relay::TextChunkSource;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Streaming completion source. `None` when no API key is configured.
    pub chunk_source: Option<Arc<dyn TextChunkSource>>,
    pub rate_limiter: Arc<dyn RateLimiter>,
    pub events: Arc<dyn EventSink>,
}
