//! Fixed-width text sheets, used for previews and thumbnails.

use async_trait::async_trait;
use bytes::Bytes;

use crate::errors::AppError;
use crate::export::{PageRasterizer, RasterizedPage};
use crate::layout::ResumePage;
use crate::models::resume::{format_date_range, ResumeDocument};
use crate::richtext::{BlockKind, RichTextDocument};

/// Sheet width in columns.
pub const SHEET_WIDTH: usize = 80;

#[derive(Debug, Clone, Copy)]
pub struct PlainTextRasterizer {
    width: usize,
}

impl Default for PlainTextRasterizer {
    fn default() -> Self {
        PlainTextRasterizer { width: SHEET_WIDTH }
    }
}

impl PlainTextRasterizer {
    /// Renders a page synchronously; the trait impl wraps this.
    pub fn render(
        &self,
        resume: &ResumeDocument,
        page: &ResumePage<'_>,
        page_count: usize,
    ) -> String {
        let mut lines: Vec<String> = Vec::new();

        if page.includes_header {
            lines.push(resume.full_name.to_uppercase());
            if let Some(headline) = resume.headline.as_deref().filter(|h| !h.is_empty()) {
                lines.push(headline.to_string());
            }
            let summary = resume.summary.to_document();
            if !summary.is_blank() {
                lines.push(String::new());
                lines.extend(self.summary_lines(&summary));
            }
        }

        if !page.experience_entries.is_empty() {
            self.section(&mut lines, "EXPERIENCE");
            for entry in page.experience_entries {
                lines.push(entry_title(
                    &format!("{}, {}", entry.role, entry.company),
                    &format_date_range(entry.start_date, entry.end_date),
                    self.width,
                ));
                lines.extend(wrap_indented(&entry.description, "  ", self.width));
            }
        }

        if !page.education_entries.is_empty() {
            self.section(&mut lines, "EDUCATION");
            for entry in page.education_entries {
                lines.push(entry_title(
                    &format!("{}, {}", entry.degree, entry.school),
                    &format_date_range(entry.start_date, entry.end_date),
                    self.width,
                ));
                lines.extend(wrap_indented(&entry.description, "  ", self.width));
            }
        }

        if page.renders_skills() {
            let skills = resume.dedup_skills();
            if !skills.is_empty() {
                self.section(&mut lines, "SKILLS");
                lines.extend(wrap_indented(&skills.join(" · "), "", self.width));
            }
        }

        lines.push(String::new());
        let footer = format!("{} / {}", page.index + 1, page_count);
        lines.push(format!("{footer:>width$}", width = self.width));
        lines.join("\n")
    }

    fn section(&self, lines: &mut Vec<String>, title: &str) {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(title.to_string());
        lines.push("─".repeat(self.width));
    }

    fn summary_lines(&self, summary: &RichTextDocument) -> Vec<String> {
        let mut out = Vec::new();
        let mut ordinal = 0usize;
        for block in &summary.blocks {
            let prefix = match block.kind {
                BlockKind::Paragraph => {
                    ordinal = 0;
                    String::new()
                }
                BlockKind::UnorderedListItem => {
                    ordinal = 0;
                    "• ".to_string()
                }
                BlockKind::OrderedListItem => {
                    ordinal += 1;
                    format!("{ordinal}. ")
                }
            };
            let wrapped = wrap_indented(&block.text(), "", self.width - prefix.chars().count());
            let indent = " ".repeat(prefix.chars().count());
            for (i, line) in wrapped.into_iter().enumerate() {
                let lead = if i == 0 { prefix.as_str() } else { indent.as_str() };
                out.push(format!("{lead}{line}"));
            }
        }
        out
    }
}

#[async_trait]
impl PageRasterizer for PlainTextRasterizer {
    async fn rasterize(
        &self,
        resume: &ResumeDocument,
        page: &ResumePage<'_>,
        page_count: usize,
    ) -> Result<RasterizedPage, AppError> {
        Ok(RasterizedPage {
            index: page.index,
            media_type: "text/plain; charset=utf-8",
            content: Bytes::from(self.render(resume, page, page_count)),
        })
    }
}

/// Title on the left, dates flush right when they fit on the same line.
fn entry_title(title: &str, dates: &str, width: usize) -> String {
    let used = title.chars().count() + dates.chars().count();
    if dates.is_empty() {
        title.to_string()
    } else if used < width {
        format!("{title}{}{dates}", " ".repeat(width - used))
    } else {
        format!("{title} ({dates})")
    }
}

/// Greedy word wrap. Words longer than the line are left unbroken.
fn wrap_indented(text: &str, indent: &str, width: usize) -> Vec<String> {
    let avail = width.saturating_sub(indent.chars().count()).max(1);
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let needed =
                current.chars().count() + word.chars().count() + usize::from(!current.is_empty());
            if !current.is_empty() && needed > avail {
                lines.push(format!("{indent}{current}"));
                current.clear();
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        if !current.is_empty() {
            lines.push(format!("{indent}{current}"));
        }
    }
    lines
}
