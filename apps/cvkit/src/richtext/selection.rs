//! Selection ranges over a rich-text document, tracked by the owning editor.
#![allow(dead_code)]

use serde::{Deserialize, Serialize};

use crate::richtext::model::RichTextDocument;

/// A caret position: block index plus character offset within that block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Position {
    pub block: usize,
    pub offset: usize,
}

impl Position {
    pub fn new(block: usize, offset: usize) -> Self {
        Position { block, offset }
    }
}

/// `anchor` is where the selection started, `focus` where it ended; the
/// selection may run backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Selection {
    pub anchor: Position,
    pub focus: Position,
}

impl Selection {
    pub fn new(anchor: Position, focus: Position) -> Self {
        Selection { anchor, focus }
    }

    pub fn collapsed(at: Position) -> Self {
        Selection::new(at, at)
    }

    /// Selection covering `start..end` characters of a single block.
    pub fn within_block(block: usize, start: usize, end: usize) -> Self {
        Selection::new(Position::new(block, start), Position::new(block, end))
    }

    /// Selection covering every character of `doc`.
    pub fn all(doc: &RichTextDocument) -> Self {
        let last = doc.blocks.len().saturating_sub(1);
        let end = doc.blocks.last().map(|b| b.char_len()).unwrap_or(0);
        Selection::new(Position::new(0, 0), Position::new(last, end))
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    /// Fails when either end points past the last block.
    pub fn validate(&self, doc: &RichTextDocument) -> Result<(), String> {
        for pos in [self.anchor, self.focus] {
            if pos.block >= doc.blocks.len() {
                return Err(format!(
                    "Selection block {} is out of range (document has {} blocks)",
                    pos.block,
                    doc.blocks.len()
                ));
            }
        }
        Ok(())
    }

    /// Start and end in document order with offsets clamped to their block's length.
    /// Returns `None` for an empty document or out-of-range blocks.
    pub fn ordered(&self, doc: &RichTextDocument) -> Option<(Position, Position)> {
        self.validate(doc).ok()?;
        let clamp = |p: Position| Position {
            block: p.block,
            offset: p.offset.min(doc.blocks[p.block].char_len()),
        };
        let (a, f) = (clamp(self.anchor), clamp(self.focus));
        Some(if a <= f { (a, f) } else { (f, a) })
    }

    /// Character range selected within `block`, if the selection touches it.
    pub fn range_in_block(
        start: Position,
        end: Position,
        block: usize,
        block_len: usize,
    ) -> Option<(usize, usize)> {
        if block < start.block || block > end.block {
            return None;
        }
        let from = if block == start.block { start.offset } else { 0 };
        let to = if block == end.block {
            end.offset
        } else {
            block_len
        };
        Some((from, to))
    }
}
