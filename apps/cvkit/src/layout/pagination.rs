//! Pagination Engine — splits experience and education entries into fixed-capacity pages.
//!
//! # Algorithm (greedy, single pass, order-preserving)
//! - Page 0 starts with `items_per_page - header_reservation` capacity; later pages with
//!   the full `items_per_page`.
//! - Each page takes experience entries first, then fills what is left with education.
//! - Pages are emitted while either list still has entries. Empty input → one page.
//! - The final page alone renders the skills block.
//!
//! Every entry costs one capacity unit regardless of description length. Long entries
//! can still overflow a physical page; per-entry weights are a known refinement point.
#![allow(dead_code)]

use serde::Serialize;

use crate::models::resume::{EducationEntry, ExperienceEntry, ResumeDocument};

pub const DEFAULT_ITEMS_PER_PAGE: usize = 5;
pub const DEFAULT_HEADER_RESERVATION: usize = 2;

// ────────────────────────────────────────────────────────────────────────────
// Configuration
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationConfig {
    items_per_page: usize,
    header_reservation: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        PaginationConfig::new(DEFAULT_ITEMS_PER_PAGE, DEFAULT_HEADER_RESERVATION)
    }
}

impl PaginationConfig {
    /// # Panics
    /// If `items_per_page` is zero. A zero budget can only come from a coding or
    /// configuration mistake and would never make progress.
    pub fn new(items_per_page: usize, header_reservation: usize) -> Self {
        assert!(items_per_page > 0, "items_per_page must be positive");
        PaginationConfig {
            items_per_page,
            header_reservation,
        }
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn header_reservation(&self) -> usize {
        self.header_reservation
    }

    /// Entry capacity of page `index`. A reservation larger than the budget leaves
    /// page 0 with room for the header only.
    pub fn page_capacity(&self, index: usize, reserve_header: bool) -> usize {
        if index == 0 && reserve_header {
            self.items_per_page.saturating_sub(self.header_reservation)
        } else {
            self.items_per_page
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Output
// ────────────────────────────────────────────────────────────────────────────

/// One sheet of output. Entry lists borrow contiguous slices of the input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<'a, E, D> {
    pub index: usize,
    pub includes_header: bool,
    pub experience_entries: &'a [E],
    pub education_entries: &'a [D],
    pub is_last_page: bool,
}

impl<E, D> Page<'_, E, D> {
    pub fn entry_count(&self) -> usize {
        self.experience_entries.len() + self.education_entries.len()
    }

    /// Only the last page carries the skills block.
    pub fn renders_skills(&self) -> bool {
        self.is_last_page
    }
}

pub type ResumePage<'a> = Page<'a, ExperienceEntry, EducationEntry>;

// ────────────────────────────────────────────────────────────────────────────
// Core functions
// ────────────────────────────────────────────────────────────────────────────

/// Partitions `experience` then `education` into pages.
///
/// Deterministic: the same input always yields the same split, so previews match
/// the exported document.
pub fn paginate<'a, E, D>(
    experience: &'a [E],
    education: &'a [D],
    config: &PaginationConfig,
    reserve_header: bool,
) -> Vec<Page<'a, E, D>> {
    let mut pages = Vec::new();
    let (mut exp_cursor, mut edu_cursor) = (0usize, 0usize);

    loop {
        let index = pages.len();
        let mut remaining = config.page_capacity(index, reserve_header);

        let exp_take = remaining.min(experience.len() - exp_cursor);
        let exp_slice = &experience[exp_cursor..exp_cursor + exp_take];
        exp_cursor += exp_take;
        remaining -= exp_take;

        let edu_take = remaining.min(education.len() - edu_cursor);
        let edu_slice = &education[edu_cursor..edu_cursor + edu_take];
        edu_cursor += edu_take;

        pages.push(Page {
            index,
            includes_header: index == 0,
            experience_entries: exp_slice,
            education_entries: edu_slice,
            is_last_page: false,
        });

        if exp_cursor == experience.len() && edu_cursor == education.len() {
            break;
        }
    }

    if let Some(last) = pages.last_mut() {
        last.is_last_page = true;
    }
    pages
}

/// Paginates a résumé, reserving header-and-summary space on the first page.
pub fn paginate_resume<'a>(
    resume: &'a ResumeDocument,
    config: &PaginationConfig,
) -> Vec<ResumePage<'a>> {
    paginate(&resume.experience, &resume.education, config, true)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn concat_experience(pages: &[Page<'_, u32, char>]) -> Vec<u32> {
        pages
            .iter()
            .flat_map(|p| p.experience_entries.iter().copied())
            .collect()
    }

    fn concat_education(pages: &[Page<'_, u32, char>]) -> Vec<char> {
        pages
            .iter()
            .flat_map(|p| p.education_entries.iter().copied())
            .collect()
    }

    #[test]
    fn test_four_experience_three_education() {
        let exp = [1u32, 2, 3, 4];
        let edu = ['a', 'b', 'c'];
        let pages = paginate(&exp, &edu, &PaginationConfig::default(), true);

        assert_eq!(pages.len(), 2);
        assert!(pages[0].includes_header);
        assert_eq!(pages[0].experience_entries, &[1u32, 2, 3]);
        assert!(pages[0].education_entries.is_empty());
        assert!(!pages[0].renders_skills());

        assert!(!pages[1].includes_header);
        assert_eq!(pages[1].experience_entries, &[4u32]);
        assert_eq!(pages[1].education_entries, &['a', 'b', 'c']);
        assert!(pages[1].is_last_page);
        assert!(pages[1].renders_skills());
    }

    #[test]
    fn test_empty_input_yields_single_page() {
        let pages = paginate::<u32, char>(&[], &[], &PaginationConfig::default(), true);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].index, 0);
        assert!(pages[0].includes_header);
        assert!(pages[0].is_last_page);
        assert_eq!(pages[0].entry_count(), 0);
    }

    #[test]
    fn test_order_and_capacity_hold_for_many_shapes() {
        let config = PaginationConfig::default();
        for n_exp in 0..12u32 {
            for n_edu in 0..9u8 {
                let exp: Vec<u32> = (0..n_exp).collect();
                let edu: Vec<char> = (0..n_edu).map(|i| (b'a' + i) as char).collect();
                let pages = paginate(&exp, &edu, &config, true);

                assert_eq!(concat_experience(&pages), exp);
                assert_eq!(concat_education(&pages), edu);
                for page in &pages {
                    assert!(page.entry_count() <= config.page_capacity(page.index, true));
                    if page.index > 0 {
                        assert!(page.entry_count() >= 1, "page {} is empty", page.index);
                    }
                    assert_eq!(page.is_last_page, page.index == pages.len() - 1);
                }
            }
        }
    }

    #[test]
    fn test_without_header_reservation_first_page_is_full() {
        let exp = [1u32, 2, 3, 4, 5, 6];
        let pages = paginate::<u32, char>(&exp, &[], &PaginationConfig::default(), false);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].experience_entries.len(), 5);
        assert_eq!(pages[1].experience_entries, &[6u32]);
    }

    #[test]
    fn test_reservation_exceeding_budget_leaves_header_only_page() {
        let config = PaginationConfig::new(2, 3);
        let pages = paginate::<u32, char>(&[1, 2, 3], &[], &config, true);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].entry_count(), 0);
        assert_eq!(pages[1].experience_entries, &[1u32, 2]);
        assert_eq!(pages[2].experience_entries, &[3u32]);
    }

    #[test]
    fn test_pagination_is_deterministic() {
        let exp: Vec<u32> = (0..9).collect();
        let edu = ['x', 'y'];
        let config = PaginationConfig::new(4, 1);
        assert_eq!(
            paginate(&exp, &edu, &config, true),
            paginate(&exp, &edu, &config, true)
        );
    }

    #[test]
    #[should_panic(expected = "items_per_page must be positive")]
    fn test_zero_capacity_panics() {
        PaginationConfig::new(0, 0);
    }

    #[test]
    fn test_paginate_resume_reserves_header() {
        let resume = ResumeDocument {
            full_name: "Ada Lovelace".to_string(),
            experience: (0..3)
                .map(|i| ExperienceEntry {
                    id: Uuid::new_v4(),
                    role: format!("Role {i}"),
                    company: "Analytical Engines".to_string(),
                    start_date: None,
                    end_date: None,
                    description: String::new(),
                })
                .collect(),
            skills: vec!["A".into(), "B".into()],
            ..Default::default()
        };
        let pages = paginate_resume(&resume, &PaginationConfig::default());
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].experience_entries.len(), 3);
        assert!(pages[0].renders_skills());
    }
}
