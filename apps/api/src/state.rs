use std::sync::Arc;

use crate::cache::ResultCache;
use crate::config::Config;
use crate::decode::DocumentDecoder;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable byte-to-text decoder. Default: OfficeDecoder (pdf-extract + zip/quick-xml).
    pub decoder: Arc<dyn DocumentDecoder>,
    /// Analysis result cache keyed by content hash. Default: DiskResultCache under CACHE_DIR.
    pub cache: Arc<dyn ResultCache>,
}
