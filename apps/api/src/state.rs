use std::sync::Arc;

use resume_scorer::ResumeEngine;

use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Built once at startup; read-only afterwards.
    pub engine: Arc<ResumeEngine>,
    pub config: Config,
}
