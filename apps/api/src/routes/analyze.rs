use std::time::Duration;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use resume_scorer::AnalysisResult;
use serde::Deserialize;
use tracing::debug;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub resume_text: String,
    #[serde(default)]
    pub job_description: Option<String>,
}

/// POST /api/v1/analyze
/// Scores already-extracted resume text. Empty text is answered with a gated result, not an error.
pub async fn analyze_handler(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;

    let limit = state.config.max_resume_bytes;
    if request.resume_text.len() > limit {
        return Err(AppError::PayloadTooLarge {
            actual: request.resume_text.len(),
            limit,
        });
    }
    let job_description = request
        .job_description
        .filter(|jd| !jd.trim().is_empty());
    debug!(
        resume_bytes = request.resume_text.len(),
        with_job_description = job_description.is_some(),
        "Analyze request received"
    );

    // CPU-bound: keep it off the async workers.
    let engine = state.engine.clone();
    let task = tokio::task::spawn_blocking(move || {
        engine.analyze(&request.resume_text, job_description.as_deref())
    });

    let timeout_ms = state.config.analysis_timeout_ms;
    let result = tokio::time::timeout(Duration::from_millis(timeout_ms), task)
        .await
        .map_err(|_| AppError::Timeout(timeout_ms))?
        .map_err(|e| AppError::Internal(anyhow::anyhow!("analysis task failed: {e}")))?;

    Ok(Json(result))
}
