//! Focus movement between the parts of a time field.
//!
//! Parts are ordered hour, minute, meridiem. The rules here only answer
//! whether a key press should move focus; the field itself owns which part
//! is focused and whether the meridiem selector can take focus.

use std::fmt;

use crate::{keys::KeyStroke, segment::SEGMENT_WIDTH};

/// A focusable part of a time field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldPart {
    /// The hour segment.
    Hour,
    /// The minute segment.
    Minute,
    /// The AM/PM selector.
    Meridiem,
}

impl FieldPart {
    /// The part after this one, if any.
    pub fn next(self) -> Option<FieldPart> {
        match self {
            FieldPart::Hour => Some(FieldPart::Minute),
            FieldPart::Minute => Some(FieldPart::Meridiem),
            FieldPart::Meridiem => None,
        }
    }

    /// The part before this one, if any.
    pub fn previous(self) -> Option<FieldPart> {
        match self {
            FieldPart::Hour => None,
            FieldPart::Minute => Some(FieldPart::Hour),
            FieldPart::Meridiem => Some(FieldPart::Minute),
        }
    }

    /// Step from this part in `direction`.
    pub fn step(self, direction: Direction) -> Option<FieldPart> {
        match direction {
            Direction::Forward => self.next(),
            Direction::Backward => self.previous(),
        }
    }
}

impl fmt::Display for FieldPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPart::Hour => f.write_str("hour"),
            FieldPart::Minute => f.write_str("minute"),
            FieldPart::Meridiem => f.write_str("meridiem"),
        }
    }
}

/// Direction of a focus move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the meridiem selector.
    Forward,
    /// Towards the hour segment.
    Backward,
}

/// Decides whether `stroke`, pressed in `part`, should move focus.
///
/// `caret` and `text_len` describe the focused segment before the key takes
/// effect; they are ignored for the meridiem selector.
///
/// - hour: `:` moves forward from anywhere; a right move does when the caret
///   is at the trailing edge, or after the only digit.
/// - minute: a left move at offset 0 moves backward.
/// - meridiem: a left move always moves backward.
pub fn navigation_for(
    part: FieldPart,
    stroke: &KeyStroke,
    caret: usize,
    text_len: usize,
    num_lock: bool,
) -> Option<Direction> {
    match part {
        FieldPart::Hour => {
            if stroke.is_separator() {
                return Some(Direction::Forward);
            }
            let at_end = caret >= SEGMENT_WIDTH || (text_len == 1 && caret == 1);
            (stroke.is_move_right(num_lock) && at_end).then_some(Direction::Forward)
        }
        FieldPart::Minute => {
            (stroke.is_move_left(num_lock) && caret == 0).then_some(Direction::Backward)
        }
        FieldPart::Meridiem => stroke.is_move_left(num_lock).then_some(Direction::Backward),
    }
}
