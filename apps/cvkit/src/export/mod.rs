//! Export pipeline — turns paginated résumé pages into sheets, one page at a time.
//!
//! Rasterizers render against a single shared surface that is repositioned per page,
//! so pages are rasterized strictly in order: each call is awaited before the next
//! starts. The first failure aborts the export; there is no partial result.
//!
//! `AppState` does not hold a rasterizer; handlers pick one per request. The built-in
//! `PlainTextRasterizer` backs the preview endpoint.

pub mod plain_text;

use async_trait::async_trait;
use bytes::Bytes;
use serde::Serialize;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::layout::ResumePage;
use crate::models::resume::ResumeDocument;

pub use plain_text::PlainTextRasterizer;

/// A single rendered sheet.
#[derive(Debug, Clone, Serialize)]
pub struct RasterizedPage {
    pub index: usize,
    pub media_type: &'static str,
    pub content: Bytes,
}

/// All sheets of an export, in page order.
#[derive(Debug, Clone, Serialize)]
pub struct ExportedDocument {
    pub pages: Vec<RasterizedPage>,
}

/// Renders one page to a sheet. Implement this to plug in an image/PDF backend
/// without touching the pipeline or handlers.
#[async_trait]
pub trait PageRasterizer: Send + Sync {
    async fn rasterize(
        &self,
        resume: &ResumeDocument,
        page: &ResumePage<'_>,
        page_count: usize,
    ) -> Result<RasterizedPage, AppError>;
}

/// Rasterizes `pages` sequentially and assembles them into one document.
pub async fn export_pages(
    resume: &ResumeDocument,
    pages: &[ResumePage<'_>],
    rasterizer: &dyn PageRasterizer,
) -> Result<ExportedDocument, AppError> {
    let mut sheets = Vec::with_capacity(pages.len());

    for page in pages {
        let sheet = rasterizer.rasterize(resume, page, pages.len()).await?;
        debug!(
            page = page.index,
            bytes = sheet.content.len(),
            "Rasterized page"
        );
        sheets.push(sheet);
    }

    info!("Exported {} page(s) for {}", sheets.len(), resume.full_name);
    Ok(ExportedDocument { pages: sheets })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{paginate_resume, PaginationConfig};
    use crate::models::resume::ExperienceEntry;
    use std::sync::Mutex;
    use uuid::Uuid;

    /// Records call order and optionally fails on one page.
    struct RecordingRasterizer {
        calls: Mutex<Vec<usize>>,
        fail_on: Option<usize>,
    }

    impl RecordingRasterizer {
        fn new(fail_on: Option<usize>) -> Self {
            RecordingRasterizer {
                calls: Mutex::new(vec![]),
                fail_on,
            }
        }
    }

    #[async_trait]
    impl PageRasterizer for RecordingRasterizer {
        async fn rasterize(
            &self,
            _resume: &ResumeDocument,
            page: &ResumePage<'_>,
            _page_count: usize,
        ) -> Result<RasterizedPage, AppError> {
            self.calls.lock().unwrap().push(page.index);
            tokio::task::yield_now().await;
            if self.fail_on == Some(page.index) {
                return Err(AppError::Export(format!("surface lost on page {}", page.index)));
            }
            Ok(RasterizedPage {
                index: page.index,
                media_type: "application/octet-stream",
                content: Bytes::from(vec![page.index as u8]),
            })
        }
    }

    fn resume_with_experience(n: usize) -> ResumeDocument {
        ResumeDocument {
            full_name: "Grace Hopper".to_string(),
            experience: (0..n)
                .map(|i| ExperienceEntry {
                    id: Uuid::new_v4(),
                    role: format!("Role {i}"),
                    company: "Navy".to_string(),
                    start_date: None,
                    end_date: None,
                    description: String::new(),
                })
                .collect(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_pages_rasterized_in_order() {
        let resume = resume_with_experience(9); // 3 + 5 + 1
        let pages = paginate_resume(&resume, &PaginationConfig::default());
        let rasterizer = RecordingRasterizer::new(None);

        let doc = export_pages(&resume, &pages, &rasterizer).await.unwrap();

        assert_eq!(*rasterizer.calls.lock().unwrap(), vec![0, 1, 2]);
        let indices: Vec<usize> = doc.pages.iter().map(|p| p.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn test_first_failure_aborts_export() {
        let resume = resume_with_experience(9);
        let pages = paginate_resume(&resume, &PaginationConfig::default());
        let rasterizer = RecordingRasterizer::new(Some(1));

        let result = export_pages(&resume, &pages, &rasterizer).await;

        assert!(matches!(result, Err(AppError::Export(_))));
        assert_eq!(
            *rasterizer.calls.lock().unwrap(),
            vec![0, 1],
            "no page after the failing one may be attempted"
        );
    }
}
