//! Axum route handler for the Analyze API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::analysis::report::AnalysisReport;
use crate::analysis::upload::{allowed_extension, sanitize_filename};
use crate::errors::AppError;
use crate::extraction::{extract_text, Document};
use crate::history::SaveParams;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    /// History id, absent when the caller opted out of saving.
    pub id: Option<i64>,
    pub report: AnalysisReport,
}

/// Fields collected from the multipart form.
#[derive(Default)]
struct AnalyzeForm {
    resume: Option<(String, Bytes)>,
    job_description: Option<String>,
    save: Option<String>,
}

/// POST /api/v1/analyze
///
/// Multipart form: `resume` (pdf or docx file), `job_description` (text),
/// optional `save` (defaults to true). Extracts the résumé text, runs the
/// full analysis, and stores the report in history unless `save=false`.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let form = read_form(multipart).await?;

    let (raw_filename, bytes) = form
        .resume
        .ok_or_else(|| AppError::Validation("No file part".to_string()))?;
    if raw_filename.trim().is_empty() {
        return Err(AppError::Validation("No selected file".to_string()));
    }

    let jd_text = form.job_description.unwrap_or_default();
    if jd_text.trim().chars().count() < state.config.min_jd_chars {
        return Err(AppError::Validation(
            "Please provide a valid job description.".to_string(),
        ));
    }

    let filename = sanitize_filename(&raw_filename);
    let extension = allowed_extension(&filename)
        .ok_or_else(|| AppError::Validation("Allowed file types are PDF and DOCX".to_string()))?;
    let save = parse_save_flag(form.save.as_deref())?;

    let analyzer = state.analyzer.clone();
    let document = Document::new(bytes, &extension);
    let report_filename = filename.clone();
    let report = tokio::task::spawn_blocking(move || {
        let resume_text = extract_text(&document);
        if resume_text.trim().is_empty() {
            return None;
        }
        Some(analyzer.analyze(&resume_text, &jd_text, &report_filename))
    })
    .await
    .map_err(|e| AppError::Internal(e.into()))?
    .ok_or_else(|| {
        AppError::UnprocessableEntity("Could not extract text from the resume.".to_string())
    })?;

    info!(
        filename = %filename,
        score = report.similarity_score,
        ats_score = report.ats_score,
        "Analyzed resume"
    );

    let id = if save {
        Some(state.history.save(SaveParams::from(&report)).await?)
    } else {
        None
    };

    Ok(Json(AnalyzeResponse { id, report }))
}

async fn read_form(mut multipart: Multipart) -> Result<AnalyzeForm, AppError> {
    let mut form = AnalyzeForm::default();
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                form.resume = Some((filename, bytes));
            }
            "job_description" => form.job_description = Some(field.text().await?),
            "save" => form.save = Some(field.text().await?),
            _ => {}
        }
    }
    Ok(form)
}

fn parse_save_flag(raw: Option<&str>) -> Result<bool, AppError> {
    match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
        None | Some("") | Some("true") | Some("1") | Some("on") | Some("yes") => Ok(true),
        Some("false") | Some("0") | Some("off") | Some("no") => Ok(false),
        Some(other) => Err(AppError::Validation(format!(
            "Invalid value for 'save': '{other}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_flag_defaults_to_true() {
        assert!(parse_save_flag(None).unwrap());
        assert!(parse_save_flag(Some("")).unwrap());
        assert!(parse_save_flag(Some(" ON ")).unwrap());
    }

    #[test]
    fn test_save_flag_false_values() {
        assert!(!parse_save_flag(Some("false")).unwrap());
        assert!(!parse_save_flag(Some("0")).unwrap());
    }

    #[test]
    fn test_save_flag_rejects_garbage() {
        assert!(matches!(
            parse_save_flag(Some("maybe")),
            Err(AppError::Validation(_))
        ));
    }
}
