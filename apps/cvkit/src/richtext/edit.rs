//! Pure editing transforms over a document and a selection.
//!
//! Inputs are never mutated; every transform returns a new normalized document.

use std::borrow::Cow;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::richtext::model::{Block, BlockKind, InlineStyle, RichTextDocument, Run};
use crate::richtext::selection::{Position, Selection};

/// Named editing commands bound to keyboard shortcuts and toolbar buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EditCommand {
    Bold,
    Italic,
    Underline,
    UnorderedListItem,
    OrderedListItem,
}

impl EditCommand {
    pub fn parse(command: &str) -> Option<Self> {
        match command {
            "bold" => Some(EditCommand::Bold),
            "italic" => Some(EditCommand::Italic),
            "underline" => Some(EditCommand::Underline),
            "unordered-list-item" => Some(EditCommand::UnorderedListItem),
            "ordered-list-item" => Some(EditCommand::OrderedListItem),
            _ => None,
        }
    }

    pub fn apply(&self, doc: &RichTextDocument, selection: &Selection) -> RichTextDocument {
        match self {
            EditCommand::Bold => toggle_inline_style(doc, selection, InlineStyle::Bold),
            EditCommand::Italic => toggle_inline_style(doc, selection, InlineStyle::Italic),
            EditCommand::Underline => toggle_inline_style(doc, selection, InlineStyle::Underline),
            EditCommand::UnorderedListItem => {
                toggle_block_type(doc, selection, BlockKind::UnorderedListItem)
            }
            EditCommand::OrderedListItem => {
                toggle_block_type(doc, selection, BlockKind::OrderedListItem)
            }
        }
    }
}

/// Toggles `style` over the selected characters.
///
/// If every selected character already carries `style` it is removed from all of
/// them; otherwise it is added to all of them. A selection covering no characters
/// leaves the document unchanged.
pub fn toggle_inline_style(
    doc: &RichTextDocument,
    selection: &Selection,
    style: InlineStyle,
) -> RichTextDocument {
    let Some((start, end)) = selection.ordered(doc) else {
        return doc.clone();
    };

    let mut any_selected = false;
    let mut uniformly_styled = true;
    for_each_selected_run(doc, start, end, |run| {
        any_selected = true;
        uniformly_styled &= run.styles.contains(&style);
    });
    if !any_selected {
        return doc.clone();
    }

    let mut out = doc.clone();
    for (idx, block) in out.blocks.iter_mut().enumerate() {
        if let Some((from, to)) = Selection::range_in_block(start, end, idx, block.char_len()) {
            restyle_range(block, from, to, |styles| {
                if uniformly_styled {
                    styles.remove(&style);
                } else {
                    styles.insert(style);
                }
            });
        }
    }
    out
}

/// Sets the kind of every block touched by the selection. If the block where the
/// selection starts already has `kind`, the blocks revert to paragraphs instead.
pub fn toggle_block_type(
    doc: &RichTextDocument,
    selection: &Selection,
    kind: BlockKind,
) -> RichTextDocument {
    let Some((start, end)) = selection.ordered(doc) else {
        return doc.clone();
    };

    let target = if doc.blocks[start.block].kind == kind {
        BlockKind::Paragraph
    } else {
        kind
    };

    let mut out = doc.clone();
    for block in &mut out.blocks[start.block..=end.block] {
        block.kind = target;
    }
    out
}

/// Applies a named command. Unrecognized commands hand the input back unchanged.
pub fn handle_key_command<'a>(
    doc: &'a RichTextDocument,
    selection: &Selection,
    command: &str,
) -> Cow<'a, RichTextDocument> {
    match EditCommand::parse(command) {
        Some(cmd) => Cow::Owned(cmd.apply(doc, selection)),
        None => Cow::Borrowed(doc),
    }
}

/// Calls `f` for every run that has at least one selected character.
fn for_each_selected_run(
    doc: &RichTextDocument,
    start: Position,
    end: Position,
    mut f: impl FnMut(&Run),
) {
    for (idx, block) in doc.blocks.iter().enumerate() {
        let Some((from, to)) = Selection::range_in_block(start, end, idx, block.char_len()) else {
            continue;
        };
        let mut pos = 0;
        for run in &block.runs {
            let (run_start, run_end) = (pos, pos + run.char_len());
            pos = run_end;
            if from.max(run_start) < to.min(run_end) {
                f(run);
            }
        }
    }
}

/// Splits runs at `from` and `to` (char offsets) and rewrites the style set of
/// everything in between.
fn restyle_range(
    block: &mut Block,
    from: usize,
    to: usize,
    f: impl Fn(&mut BTreeSet<InlineStyle>),
) {
    let mut out = Vec::with_capacity(block.runs.len() + 2);
    let mut pos = 0;
    for run in block.runs.drain(..) {
        let len = run.char_len();
        let (run_start, run_end) = (pos, pos + len);
        pos = run_end;

        let lo = from.clamp(run_start, run_end) - run_start;
        let hi = to.clamp(run_start, run_end) - run_start;
        if lo >= hi {
            out.push(run);
            continue;
        }

        let (a, b) = (byte_index(&run.text, lo), byte_index(&run.text, hi));
        let mut inside = run.styles.clone();
        f(&mut inside);
        out.push(Run {
            text: run.text[..a].to_string(),
            styles: run.styles.clone(),
        });
        out.push(Run {
            text: run.text[a..b].to_string(),
            styles: inside,
        });
        out.push(Run {
            text: run.text[b..].to_string(),
            styles: run.styles,
        });
    }
    block.runs = out;
    block.normalize();
}

fn byte_index(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}
