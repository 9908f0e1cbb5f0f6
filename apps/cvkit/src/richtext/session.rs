//! Editor session — the stateful side of a rich-text field.
//!
//! Holds the current document, the caret/selection and an undo stack. All document
//! changes go through the pure transforms in `edit`; the session only records them.
#![allow(dead_code)]

use std::borrow::Cow;
use std::collections::VecDeque;

use crate::richtext::codec::{decode, encode};
use crate::richtext::edit::handle_key_command;
use crate::richtext::model::RichTextDocument;
use crate::richtext::selection::Selection;

const MAX_UNDO_DEPTH: usize = 100;

#[derive(Debug, Clone, Default)]
pub struct EditorSession {
    document: RichTextDocument,
    selection: Selection,
    history: VecDeque<RichTextDocument>,
}

impl EditorSession {
    /// Opens a session on a stored value (raw content, legacy plain text, or nothing).
    pub fn open(serialized: Option<&str>) -> Self {
        EditorSession {
            document: decode(serialized),
            selection: Selection::default(),
            history: VecDeque::new(),
        }
    }

    pub fn document(&self) -> &RichTextDocument {
        &self.document
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
    }

    /// Applies a named command at the current selection.
    ///
    /// Returns `true` when the command was recognized. Recognized commands that leave
    /// the document unchanged are not recorded in the undo history.
    pub fn apply_command(&mut self, command: &str) -> bool {
        let next = match handle_key_command(&self.document, &self.selection, command) {
            Cow::Borrowed(_) => return false,
            Cow::Owned(next) => next,
        };
        if next != self.document {
            let previous = std::mem::replace(&mut self.document, next);
            self.history.push_back(previous);
            if self.history.len() > MAX_UNDO_DEPTH {
                self.history.pop_front();
            }
        }
        true
    }

    /// Restores the document as it was before the last change.
    pub fn undo(&mut self) -> bool {
        match self.history.pop_back() {
            Some(previous) => {
                self.document = previous;
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Stored form of the current document.
    pub fn encode(&self) -> String {
        encode(&self.document)
    }
}
