use std::sync::Arc;

use crate::config::Config;
use crate::documents::DocumentExtractor;
use crate::matching::MatchEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Built once at startup from the validated matcher configuration.
    pub engine: Arc<MatchEngine>,
    /// Pluggable document backend. Default: PdfExtractor.
    pub extractor: Arc<dyn DocumentExtractor>,
}
