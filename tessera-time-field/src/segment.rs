//! Editable hour and minute segments.
//!
//! A segment is a two-character text buffer with a caret and an optional
//! selection. Validation lives in [`crate::validation`]; this module only
//! stores text and applies edits that were already accepted.

use std::{fmt, ops::Range};

/// Display width of every segment, in characters.
pub const SEGMENT_WIDTH: usize = 2;

/// The numeric segments of a time field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// The hour segment.
    Hour,
    /// The minute segment.
    Minute,
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentKind::Hour => f.write_str("hour"),
            SegmentKind::Minute => f.write_str("minute"),
        }
    }
}

/// Text, caret and selection of one segment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SegmentBuffer {
    text: String,
    caret: usize,
    anchor: Option<usize>,
}

impl SegmentBuffer {
    /// Creates a buffer holding `text` with the caret at its end.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let caret = text.chars().count();
        Self {
            text,
            caret,
            anchor: None,
        }
    }

    /// Current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of characters held.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Whether the segment holds no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Caret offset, in characters.
    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Selected character range, if any.
    pub fn selection(&self) -> Option<Range<usize>> {
        let anchor = self.anchor?;
        let range = anchor.min(self.caret)..anchor.max(self.caret);
        (!range.is_empty()).then_some(range)
    }

    /// Replaces the text, putting the caret at the end and dropping the selection.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.caret = self.len();
        self.anchor = None;
    }

    /// Moves the caret, clamped to the text, dropping the selection.
    pub fn set_caret(&mut self, caret: usize) {
        self.caret = caret.min(self.len());
        self.anchor = None;
    }

    /// Selects the whole text with the caret at the start.
    pub fn select_all(&mut self) {
        self.anchor = Some(self.len());
        self.caret = 0;
    }

    /// Offset and length that typing would replace: the selection, or an
    /// empty span at the caret.
    pub(crate) fn edit_span(&self) -> (usize, usize) {
        match self.selection() {
            Some(range) => (range.start, range.len()),
            None => (self.caret, 0),
        }
    }

    /// Applies an accepted splice, leaving the caret after the inserted text.
    pub(crate) fn apply_splice(&mut self, offset: usize, removed: usize, inserted: &str) {
        self.text = splice(&self.text, offset, removed, inserted);
        self.caret = (offset + inserted.chars().count()).min(self.len());
        self.anchor = None;
    }

    /// Removes `len` characters at `offset`. Out-of-range spans are clamped.
    pub(crate) fn remove(&mut self, offset: usize, len: usize) {
        let offset = offset.min(self.len());
        let len = len.min(self.len() - offset);
        self.apply_splice(offset, len, "");
    }

    /// Backspace: removes the selection, or the character before the caret.
    pub(crate) fn delete_backward(&mut self) {
        match self.selection() {
            Some(range) => self.remove(range.start, range.len()),
            None if self.caret > 0 => self.remove(self.caret - 1, 1),
            None => {}
        }
    }

    /// Delete: removes the selection, or the character after the caret.
    pub(crate) fn delete_forward(&mut self) {
        match self.selection() {
            Some(range) => self.remove(range.start, range.len()),
            None => self.remove(self.caret, 1),
        }
    }
}

/// Text that results from replacing `removed` characters at `offset` of
/// `text` with `inserted`.
pub(crate) fn splice(text: &str, offset: usize, removed: usize, inserted: &str) -> String {
    let head = text.chars().take(offset);
    let tail = text.chars().skip(offset + removed);
    head.chain(inserted.chars()).chain(tail).collect()
}

/// Left-pads `text` with zeros up to `width` characters.
///
/// ```
/// use tessera_time_field::segment::pad_leading;
///
/// assert_eq!(pad_leading("7", 2), "07");
/// assert_eq!(pad_leading("123", 2), "123");
/// ```
pub fn pad_leading(text: &str, width: usize) -> String {
    format!("{text:0>width$}")
}

/// Pads `text` for display after focus leaves the segment.
///
/// Hours get a leading zero, minutes a trailing one: a lone minute digit
/// was typed as the tens digit.
pub fn normalize_on_blur(kind: SegmentKind, text: &str) -> String {
    if text.chars().count() >= SEGMENT_WIDTH {
        return text.to_string();
    }
    match kind {
        SegmentKind::Hour => pad_leading(text, SEGMENT_WIDTH),
        SegmentKind::Minute => format!("{text}0"),
    }
}
