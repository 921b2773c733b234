//! Per-keystroke validation of segment edits.
//!
//! Every replacement a host wants to make in a segment is first offered to
//! [`try_edit`]. Accepted edits carry the text the segment must display
//! afterwards; rejected edits must not reach the display at all.
//!
//! ## Rules
//!
//! Single characters are checked against the digit position they land on:
//!
//! | segment | offset | 12-hour            | 24-hour            |
//! |---------|--------|--------------------|--------------------|
//! | hour    | 0      | `0..=1`            | `0..=2`            |
//! | hour    | 1      | `0..=2` after `1`  | `0..=3` after `2`  |
//! | minute  | 0      | `0..=5`            | `0..=5`            |
//! | minute  | 1      | `0..=9`            | `0..=9`            |
//!
//! Longer insertions (pastes) are cut to the span `offset..2 - offset`,
//! parsed as a whole value, range checked and then replace the entire
//! segment, zero padded to two digits.

use tracing::debug;

use crate::{
    segment::{SEGMENT_WIDTH, SegmentKind, pad_leading, splice},
    time_field::ClockMode,
};

/// Why an edit was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The inserted text is not an integer.
    NotNumeric,
    /// The value is outside the range allowed at this position.
    OutOfRange,
    /// The second hour digit was typed without a leading digit to check it against.
    MissingLeadingDigit,
    /// Single characters can only be typed at offsets 0 and 1.
    BeyondSegment,
    /// The edit would leave more characters than the segment can display.
    Overflow,
}

/// Result of offering an edit to the validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// The edit is legal.
    Accepted {
        /// Text the segment displays after the edit.
        text: String,
        /// Whether focus should move on to the next part of the field.
        advance_focus: bool,
    },
    /// The edit is refused and must leave the segment untouched.
    Rejected(RejectReason),
}

impl EditOutcome {
    /// Whether the edit was accepted.
    pub fn is_accepted(&self) -> bool {
        matches!(self, EditOutcome::Accepted { .. })
    }

    fn accepted(text: String, advance_focus: bool) -> Self {
        EditOutcome::Accepted {
            text,
            advance_focus,
        }
    }
}

/// Decides whether replacing `removed` characters at `offset` of `current`
/// with `inserted` is legal for a `kind` segment under `mode`.
///
/// ```
/// use tessera_time_field::{
///     ClockMode,
///     segment::SegmentKind,
///     validation::{EditOutcome, RejectReason, try_edit},
/// };
///
/// let outcome = try_edit(SegmentKind::Hour, "2", 1, 0, "5", ClockMode::TwentyFourHour);
/// assert_eq!(outcome, EditOutcome::Rejected(RejectReason::OutOfRange));
/// ```
pub fn try_edit(
    kind: SegmentKind,
    current: &str,
    offset: usize,
    removed: usize,
    inserted: &str,
    mode: ClockMode,
) -> EditOutcome {
    let outcome = evaluate(kind, current, offset, removed, inserted, mode);
    if let EditOutcome::Rejected(reason) = outcome {
        debug!("Rejected {kind} edit {inserted:?} at offset {offset}: {reason:?}");
    }
    outcome
}

fn evaluate(
    kind: SegmentKind,
    current: &str,
    offset: usize,
    removed: usize,
    inserted: &str,
    mode: ClockMode,
) -> EditOutcome {
    let Ok(value) = inserted.parse::<i32>() else {
        return EditOutcome::Rejected(RejectReason::NotNumeric);
    };

    if inserted.chars().count() != 1 {
        return replace_whole(kind, offset, inserted, mode);
    }

    let verdict = match (kind, offset) {
        (SegmentKind::Hour, 0) => {
            let ceiling = match mode {
                ClockMode::TwelveHour => 1,
                ClockMode::TwentyFourHour => 2,
            };
            within(value, ceiling).map(|()| false)
        }
        (SegmentKind::Hour, 1) => {
            let Some(first) = current.chars().next().and_then(|c| c.to_digit(10)) else {
                return EditOutcome::Rejected(RejectReason::MissingLeadingDigit);
            };
            let ceiling = match (mode, first) {
                (ClockMode::TwentyFourHour, 2) => 3,
                (ClockMode::TwelveHour, 1) => 2,
                _ => 9,
            };
            within(value, ceiling).map(|()| true)
        }
        (SegmentKind::Minute, 0) => within(value, 5).map(|()| false),
        (SegmentKind::Minute, 1) => within(value, 9).map(|()| mode == ClockMode::TwelveHour),
        _ => Err(RejectReason::BeyondSegment),
    };

    match verdict {
        Ok(advance_focus) => {
            let text = splice(current, offset, removed, inserted);
            if text.chars().count() > SEGMENT_WIDTH {
                EditOutcome::Rejected(RejectReason::Overflow)
            } else {
                EditOutcome::accepted(text, advance_focus)
            }
        }
        Err(reason) => EditOutcome::Rejected(reason),
    }
}

fn within(value: i32, ceiling: i32) -> Result<(), RejectReason> {
    if (0..=ceiling).contains(&value) {
        Ok(())
    } else {
        Err(RejectReason::OutOfRange)
    }
}

/// Multi-character path: the usable span of the paste replaces the segment.
fn replace_whole(kind: SegmentKind, offset: usize, inserted: &str, mode: ClockMode) -> EditOutcome {
    let end = SEGMENT_WIDTH.saturating_sub(offset);
    if end < offset || end > inserted.chars().count() {
        return EditOutcome::Rejected(RejectReason::BeyondSegment);
    }
    let span: String = inserted.chars().skip(offset).take(end - offset).collect();
    let Ok(mut value) = span.parse::<i32>() else {
        return EditOutcome::Rejected(RejectReason::NotNumeric);
    };

    match kind {
        SegmentKind::Hour => {
            if !(0..=23).contains(&value) {
                return EditOutcome::Rejected(RejectReason::OutOfRange);
            }
            // 24-hour pastes of 13..=23 land on 1..=11.
            while value > 12 && mode == ClockMode::TwentyFourHour {
                value -= 12;
            }
        }
        SegmentKind::Minute => {
            if !(0..=59).contains(&value) {
                return EditOutcome::Rejected(RejectReason::OutOfRange);
            }
        }
    }

    EditOutcome::accepted(pad_leading(&value.to_string(), SEGMENT_WIDTH), false)
}
