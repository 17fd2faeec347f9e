use std::sync::Arc;

use crate::config::Config;
use crate::ingestion::rasterize::PageRasterizer;
use crate::ingestion::store::ResumeStore;
use crate::llm_client::ModelGateway;
use crate::search::client::SearchBackend;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Default: GeminiClient. Tests swap in a scripted gateway.
    pub gateway: Arc<dyn ModelGateway>,
    pub rasterizer: Arc<dyn PageRasterizer>,
    /// Default: TavilyClient, possibly without a key.
    pub search: Arc<dyn SearchBackend>,
    /// One uploaded resume per session, in memory only.
    pub resumes: ResumeStore,
}
