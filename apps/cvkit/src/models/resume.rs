use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use serde_json::Value;

use crate::richtext::{decode, RichTextDocument};

/// Summary as found on stored records: a structured document, a string (raw content
/// written by the editor, or legacy plain text), or raw content embedded as an object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Summary {
    Document(RichTextDocument),
    Stored(String),
    Raw(Value),
}

impl Default for Summary {
    fn default() -> Self {
        Summary::Stored(String::new())
    }
}

impl Summary {
    pub fn to_document(&self) -> RichTextDocument {
        match self {
            Summary::Document(doc) => doc.clone().normalized(),
            Summary::Stored(raw) => decode(Some(raw.as_str())),
            Summary::Raw(value) => decode(Some(value.to_string().as_str())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub id: Uuid,
    pub role: String,
    pub company: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// `None` means the position is current.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub id: Uuid,
    pub school: String,
    pub degree: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub description: String,
}

/// The parts of a résumé record that take part in layout and export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeDocument {
    pub full_name: String,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub summary: Summary,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl ResumeDocument {
    /// Skills in display order with blanks removed and repeats collapsed to the
    /// first occurrence (case-insensitive).
    pub fn dedup_skills(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.skills
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty() && seen.insert(s.to_lowercase()))
            .map(str::to_string)
            .collect()
    }

    /// Checks that entry ids are unique within each list, collecting every duplicate.
    pub fn validate_entry_ids(&self) -> Result<(), Vec<String>> {
        let mut problems = Vec::new();
        collect_duplicates("experience", self.experience.iter().map(|e| e.id), &mut problems);
        collect_duplicates("education", self.education.iter().map(|e| e.id), &mut problems);
        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems)
        }
    }
}

fn collect_duplicates(section: &str, ids: impl Iterator<Item = Uuid>, problems: &mut Vec<String>) {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for id in ids {
        if !seen.insert(id) && reported.insert(id) {
            problems.push(format!("Duplicate {section} entry id {id}"));
        }
    }
}

/// "Jan 2020 – Present"-style range for display.
pub fn format_date_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> String {
    let fmt = |d: NaiveDate| d.format("%b %Y").to_string();
    match (start, end) {
        (Some(s), Some(e)) => format!("{} – {}", fmt(s), fmt(e)),
        (Some(s), None) => format!("{} – Present", fmt(s)),
        (None, Some(e)) => fmt(e),
        (None, None) => String::new(),
    }
}
