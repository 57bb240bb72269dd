//! Axum route handlers for the Matching API.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use tracing::{info, warn};

use crate::documents::is_pdf_file_name;
use crate::errors::AppError;
use crate::matching::scorer::ExtractionResult;
use crate::matching::{MatchEngine, MatchOutcome, MatcherConfig, ResumeInput};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub jd_text: String,
    pub resumes: Vec<ResumeInput>,
}

const JD_FIELD: &str = "jd_text";

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/vocabulary
///
/// Returns the vocabularies and fuzzy settings the engine was built with.
pub async fn handle_get_vocabulary(State(state): State<AppState>) -> Json<MatcherConfig> {
    Json(state.engine.config().clone())
}

/// POST /api/v1/extract
///
/// Extracts skills, experience phrases and degrees from a single text.
pub async fn handle_extract(
    State(state): State<AppState>,
    Json(request): Json<ExtractRequest>,
) -> Result<Json<ExtractionResult>, AppError> {
    let engine = Arc::clone(&state.engine);
    let extraction = tokio::task::spawn_blocking(move || engine.extract(&request.text))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in extract: {e}")))?;

    Ok(Json(extraction))
}

/// POST /api/v1/match
///
/// Scores already-extracted resume texts against a job description and returns
/// them ranked. 422 NO_REQUIREMENTS_DETECTED when the JD names no known skill.
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchOutcome>, AppError> {
    validate_match_input(&request.jd_text, request.resumes.len())?;

    let outcome = run_match(Arc::clone(&state.engine), request.jd_text, request.resumes).await?;
    Ok(Json(outcome))
}

/// POST /api/v1/match/upload
///
/// Multipart variant: one `jd_text` field plus PDF file parts. Non-PDF files are skipped.
/// Requirements are checked before any PDF is parsed.
pub async fn handle_match_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<MatchOutcome>, AppError> {
    let mut jd_text: Option<String> = None;
    let mut uploads: Vec<(String, Bytes)> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let field_name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);

        match file_name {
            Some(file_name) => {
                if !is_pdf_file_name(&file_name) {
                    warn!(file = %file_name, "Skipping non-PDF upload");
                    continue;
                }
                let bytes = field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read upload '{file_name}': {e}"))
                })?;
                uploads.push((file_name, bytes));
            }
            None if field_name == JD_FIELD => {
                let text = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read '{JD_FIELD}': {e}"))
                })?;
                jd_text = Some(text);
            }
            None => warn!(field = %field_name, "Ignoring unknown multipart field"),
        }
    }

    let jd_text = jd_text.unwrap_or_default();
    validate_match_input(&jd_text, uploads.len())?;

    // Fail fast before paying for PDF parsing.
    state.engine.required_skills(&jd_text)?;

    let mut resumes = Vec::with_capacity(uploads.len());
    for (file_name, bytes) in uploads {
        let text = state.extractor.extract_text(&file_name, bytes).await?;
        resumes.push(ResumeInput {
            name: file_name,
            text,
        });
    }
    info!(resumes = resumes.len(), "Extracted uploaded resumes");

    let outcome = run_match(Arc::clone(&state.engine), jd_text, resumes).await?;
    Ok(Json(outcome))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn validate_match_input(jd_text: &str, resume_count: usize) -> Result<(), AppError> {
    if jd_text.trim().is_empty() {
        return Err(AppError::Validation("jd_text cannot be empty".to_string()));
    }
    if resume_count == 0 {
        return Err(AppError::Validation(
            "at least one resume is required".to_string(),
        ));
    }
    Ok(())
}

/// Runs the CPU-bound engine off the async executor.
async fn run_match(
    engine: Arc<MatchEngine>,
    jd_text: String,
    resumes: Vec<ResumeInput>,
) -> Result<MatchOutcome, AppError> {
    let outcome = tokio::task::spawn_blocking(move || engine.run(&jd_text, &resumes))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in match: {e}")))??;
    Ok(outcome)
}
