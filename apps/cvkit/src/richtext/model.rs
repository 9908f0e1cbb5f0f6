//! Rich-text document model — styled runs grouped into paragraph and list blocks.
//!
//! Every document handed out by the codec or the edit operations is *normalized*:
//! - no run has empty text
//! - adjacent runs in a block never carry identical style sets
//! - a block with no text has no runs
#![allow(dead_code)]

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Inline style applied to a run. Application is commutative and idempotent,
/// so runs hold a set rather than a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InlineStyle {
    Bold,
    Italic,
    Underline,
}

impl InlineStyle {
    pub const ALL: [InlineStyle; 3] = [
        InlineStyle::Bold,
        InlineStyle::Italic,
        InlineStyle::Underline,
    ];

    /// Name used in the stored encoding's `inlineStyleRanges`.
    pub fn as_str(&self) -> &'static str {
        match self {
            InlineStyle::Bold => "BOLD",
            InlineStyle::Italic => "ITALIC",
            InlineStyle::Underline => "UNDERLINE",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "BOLD" => Some(InlineStyle::Bold),
            "ITALIC" => Some(InlineStyle::Italic),
            "UNDERLINE" => Some(InlineStyle::Underline),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockKind {
    #[default]
    Paragraph,
    UnorderedListItem,
    OrderedListItem,
}

impl BlockKind {
    /// Block `type` in the stored encoding. Paragraphs are stored as `unstyled`.
    pub fn stored_type(&self) -> &'static str {
        match self {
            BlockKind::Paragraph => "unstyled",
            BlockKind::UnorderedListItem => "unordered-list-item",
            BlockKind::OrderedListItem => "ordered-list-item",
        }
    }

    /// Unknown stored types (headers, blockquotes, code) degrade to paragraphs.
    pub fn from_stored_type(name: &str) -> Self {
        match name {
            "unordered-list-item" => BlockKind::UnorderedListItem,
            "ordered-list-item" => BlockKind::OrderedListItem,
            _ => BlockKind::Paragraph,
        }
    }
}

/// A contiguous span of text sharing one style set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub text: String,
    #[serde(default)]
    pub styles: BTreeSet<InlineStyle>,
}

impl Run {
    pub fn plain(text: impl Into<String>) -> Self {
        Run {
            text: text.into(),
            styles: BTreeSet::new(),
        }
    }

    pub fn styled(text: impl Into<String>, styles: impl IntoIterator<Item = InlineStyle>) -> Self {
        Run {
            text: text.into(),
            styles: styles.into_iter().collect(),
        }
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Block {
    /// Identifier carried over from the stored encoding, if it had one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default)]
    pub kind: BlockKind,
    #[serde(default)]
    pub runs: Vec<Run>,
}

impl Block {
    pub fn new(kind: BlockKind, runs: Vec<Run>) -> Self {
        Block {
            key: None,
            kind,
            runs,
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        let text = text.into();
        let runs = if text.is_empty() {
            vec![]
        } else {
            vec![Run::plain(text)]
        };
        Block::new(BlockKind::Paragraph, runs)
    }

    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    pub fn char_len(&self) -> usize {
        self.runs.iter().map(Run::char_len).sum()
    }

    /// Merges adjacent runs with equal style sets and drops empty runs.
    pub fn normalize(&mut self) {
        let mut merged: Vec<Run> = Vec::with_capacity(self.runs.len());
        for run in self.runs.drain(..) {
            if run.text.is_empty() {
                continue;
            }
            match merged.last_mut() {
                Some(last) if last.styles == run.styles => last.text.push_str(&run.text),
                _ => merged.push(run),
            }
        }
        self.runs = merged;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RichTextDocument {
    pub blocks: Vec<Block>,
}

impl Default for RichTextDocument {
    fn default() -> Self {
        Self::empty()
    }
}

impl RichTextDocument {
    /// A document holding a single empty paragraph.
    pub fn empty() -> Self {
        RichTextDocument {
            blocks: vec![Block::paragraph("")],
        }
    }

    /// Wraps `text` verbatim as one unstyled paragraph.
    pub fn from_plain_text(text: &str) -> Self {
        RichTextDocument {
            blocks: vec![Block::paragraph(text)],
        }
    }

    /// Block texts joined by newlines, styles discarded.
    pub fn to_plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(Block::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn is_blank(&self) -> bool {
        self.blocks
            .iter()
            .all(|b| b.runs.iter().all(|r| r.text.trim().is_empty()))
    }

    pub fn normalize(&mut self) {
        if self.blocks.is_empty() {
            self.blocks.push(Block::paragraph(""));
        }
        for block in &mut self.blocks {
            block.normalize();
        }
    }

    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }
}
