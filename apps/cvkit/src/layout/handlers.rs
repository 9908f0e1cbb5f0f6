use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::export::{export_pages, PlainTextRasterizer};
use crate::layout::{paginate_resume, ResumePage};
use crate::models::resume::{EducationEntry, ExperienceEntry, ResumeDocument};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ResumeRequest {
    pub resume: ResumeDocument,
}

/// Owned view of a page, returned to the UI for thumbnails and the export renderer.
#[derive(Debug, Serialize)]
pub struct PageView {
    pub index: usize,
    pub includes_header: bool,
    pub is_last_page: bool,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    /// Present on the last page only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct PaginateResponse {
    pub page_count: usize,
    pub pages: Vec<PageView>,
}

#[derive(Debug, Serialize)]
pub struct PreviewPage {
    pub index: usize,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub pages: Vec<PreviewPage>,
}

fn validated(resume: &ResumeDocument) -> Result<(), AppError> {
    resume
        .validate_entry_ids()
        .map_err(|problems| AppError::UnprocessableEntity(problems.join("; ")))
}

fn page_view(resume: &ResumeDocument, page: &ResumePage<'_>) -> PageView {
    PageView {
        index: page.index,
        includes_header: page.includes_header,
        is_last_page: page.is_last_page,
        experience: page.experience_entries.to_vec(),
        education: page.education_entries.to_vec(),
        skills: page.renders_skills().then(|| resume.dedup_skills()),
    }
}

/// POST /api/v1/resumes/paginate
pub async fn handle_paginate(
    State(state): State<AppState>,
    Json(req): Json<ResumeRequest>,
) -> Result<Json<PaginateResponse>, AppError> {
    validated(&req.resume)?;
    let pages = paginate_resume(&req.resume, &state.pagination);
    let views: Vec<PageView> = pages.iter().map(|p| page_view(&req.resume, p)).collect();
    Ok(Json(PaginateResponse {
        page_count: views.len(),
        pages: views,
    }))
}

/// POST /api/v1/resumes/preview
pub async fn handle_preview(
    State(state): State<AppState>,
    Json(req): Json<ResumeRequest>,
) -> Result<Json<PreviewResponse>, AppError> {
    validated(&req.resume)?;
    let pages = paginate_resume(&req.resume, &state.pagination);
    let exported = export_pages(&req.resume, &pages, &PlainTextRasterizer::default()).await?;
    Ok(Json(PreviewResponse {
        pages: exported
            .pages
            .into_iter()
            .map(|sheet| PreviewPage {
                index: sheet.index,
                text: String::from_utf8_lossy(&sheet.content).into_owned(),
            })
            .collect(),
    }))
}
