//! Segmented time field: hour, minute and an AM/PM selector.
//!
//! ## Usage
//!
//! Own a [`TimeField`] next to the widget that draws it. Forward key presses,
//! pastes and focus changes into it, then render [`TimeField::hour_text`],
//! [`TimeField::minute_text`] and [`TimeField::time_of_day`].
//!
//! ```
//! use chrono::NaiveTime;
//! use tessera_time_field::{
//!     FieldPart, Key, KeyStroke, Meridiem, TimeField, TimeFieldArgs,
//! };
//!
//! let start = NaiveTime::from_hms_opt(9, 15, 0).unwrap();
//! let mut field = TimeField::new(&TimeFieldArgs::default().initial_time(start));
//! assert_eq!(field.hour_text(), "09");
//!
//! field.focus_gained();
//! field.handle_key(KeyStroke::new(Key::Character('1')));
//! field.handle_key(KeyStroke::new(Key::Character('1')));
//! assert_eq!(field.hour_text(), "11");
//! assert_eq!(field.focused_part(), Some(FieldPart::Minute));
//! assert_eq!(field.time_of_day(), Some(Meridiem::Am));
//! ```

use std::{fmt, mem};

use chrono::{Local, NaiveTime, Timelike};
use derive_setters::Setters;
use tracing::debug;
use winit::keyboard::ModifiersState;

use crate::{
    correction::{correct_hour, correct_minute},
    error::TimeFieldError,
    keys::{Key, KeyStroke, LockKeyState, UnknownLockState, num_lock_or_off},
    listeners::{ActionEvent, ClockModeChanged, ListenerId, ListenerList},
    navigation::{Direction, FieldPart, navigation_for},
    segment::{SEGMENT_WIDTH, SegmentBuffer, SegmentKind, normalize_on_blur, pad_leading},
    validation::{EditOutcome, RejectReason, try_edit},
};

/// Whether hours are shown on a 12-hour or a 24-hour basis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClockMode {
    /// Hours 1-12 with an AM/PM selector.
    #[default]
    TwelveHour,
    /// Hours 0-23, selector hidden.
    TwentyFourHour,
}

impl ClockMode {
    /// Mode for a "use 24-hour clock" flag.
    pub fn from_24_hour(is_24_hour: bool) -> Self {
        if is_24_hour {
            ClockMode::TwentyFourHour
        } else {
            ClockMode::TwelveHour
        }
    }

    /// Whether this is the 24-hour mode.
    pub fn is_24_hour(self) -> bool {
        self == ClockMode::TwentyFourHour
    }
}

/// Half of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridiem {
    /// Ante meridiem (before noon).
    Am,
    /// Post meridiem (after noon).
    Pm,
}

impl Meridiem {
    /// Half of the day a 24-hour `hour` falls in.
    pub fn of_hour(hour: u8) -> Self {
        if hour >= 12 { Meridiem::Pm } else { Meridiem::Am }
    }

    /// The other half of the day.
    pub fn toggled(self) -> Self {
        match self {
            Meridiem::Am => Meridiem::Pm,
            Meridiem::Pm => Meridiem::Am,
        }
    }
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Meridiem::Am => f.write_str("am"),
            Meridiem::Pm => f.write_str("pm"),
        }
    }
}

/// Canonical time of day, independent of the display mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeValue {
    /// Hour, 0-23.
    pub hour: u8,
    /// Minute, 0-59.
    pub minute: u8,
}

impl TimeValue {
    /// Creates a value, folding both inputs into range first.
    pub fn new(hour: i32, minute: i32) -> Self {
        Self {
            hour: correct_hour(hour),
            minute: correct_minute(minute),
        }
    }

    /// Half of the day this value falls in.
    pub fn meridiem(&self) -> Meridiem {
        Meridiem::of_hour(self.hour)
    }

    /// Converts to a chrono time at second zero.
    pub fn to_naive_time(&self) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(u32::from(self.hour), u32::from(self.minute), 0)
    }
}

/// Configuration options for [`TimeField`].
#[derive(Debug, Default, PartialEq, Clone, Setters)]
pub struct TimeFieldArgs {
    /// Whether the field starts in 24-hour mode.
    pub use_24_hour_clock: bool,
    /// Time shown initially. `None` uses the local wall clock.
    #[setters(strip_option)]
    pub initial_time: Option<NaiveTime>,
}

/// What the field did with an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResponse {
    /// Nothing happened.
    Ignored,
    /// The caret or selection moved inside the focused segment.
    CaretMoved,
    /// Segment text changed. Carries the part focus moved to, if the edit
    /// completed the segment.
    Edited(Option<FieldPart>),
    /// The edit was refused; the segment is unchanged.
    Rejected(RejectReason),
    /// Focus moved to another part.
    FocusMoved(FieldPart),
    /// The commit key was pressed and action listeners were notified.
    Committed,
    /// The meridiem selection changed.
    MeridiemChanged(Meridiem),
}

/// Composite hour/minute/meridiem time entry.
///
/// The field owns the text of both segments, the meridiem selection, the
/// clock mode and which part is focused. Every mutation runs synchronously
/// on the caller's thread.
pub struct TimeField {
    hour: SegmentBuffer,
    minute: SegmentBuffer,
    meridiem: Option<Meridiem>,
    clock_mode: ClockMode,
    focused: Option<FieldPart>,
    lock_state: Box<dyn LockKeyState>,
    action_listeners: ListenerList<ActionEvent>,
    clock_mode_listeners: ListenerList<ClockModeChanged>,
}

impl Default for TimeField {
    fn default() -> Self {
        Self::new(&TimeFieldArgs::default())
    }
}

impl fmt::Debug for TimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeField")
            .field("hour", &self.hour)
            .field("minute", &self.minute)
            .field("meridiem", &self.meridiem)
            .field("clock_mode", &self.clock_mode)
            .field("focused", &self.focused)
            .finish_non_exhaustive()
    }
}

impl TimeField {
    /// Creates a field from `args`.
    pub fn new(args: &TimeFieldArgs) -> Self {
        let mut field = Self {
            hour: SegmentBuffer::default(),
            minute: SegmentBuffer::default(),
            meridiem: None,
            clock_mode: ClockMode::from_24_hour(args.use_24_hour_clock),
            focused: None,
            lock_state: Box::new(UnknownLockState),
            action_listeners: ListenerList::default(),
            clock_mode_listeners: ListenerList::default(),
        };
        match args.initial_time {
            Some(time) => field.set_time_from(&time),
            None => field.set_time_from(&Local::now()),
        }
        field
    }

    /// Replaces the numeric-lock probe used to interpret keypad arrows.
    pub fn with_lock_state(mut self, probe: impl LockKeyState + 'static) -> Self {
        self.lock_state = Box::new(probe);
        self
    }

    /// Sets the time from anything carrying a time of day.
    pub fn set_time_from<T: Timelike>(&mut self, time: &T) {
        let hour = time.hour();
        let meridiem = if hour >= 12 { Meridiem::Pm } else { Meridiem::Am };
        self.set_time_with_meridiem((hour % 12) as i32, time.minute() as i32, meridiem);
    }

    /// Sets the time from a 24-hour `hour` and a `minute`, whatever the
    /// current clock mode. Out-of-range values are folded into range.
    pub fn set_time(&mut self, hour: i32, minute: i32) {
        let hour = correct_hour(hour);
        let minute = correct_minute(minute);
        self.set_time_with_meridiem(i32::from(hour), i32::from(minute), Meridiem::of_hour(hour));
    }

    /// Sets hour, minute and meridiem, converting the hour for display.
    ///
    /// In 12-hour mode hours above 12 drop by 12; in 24-hour mode morning
    /// hours marked PM gain 12. Hour 0 is shown as `00` in both modes.
    pub fn set_time_with_meridiem(&mut self, hour: i32, minute: i32, meridiem: Meridiem) {
        let mut hour = correct_hour(hour);
        let minute = correct_minute(minute);
        self.meridiem = Some(meridiem);

        match self.clock_mode {
            ClockMode::TwelveHour if hour > 12 => hour -= 12,
            ClockMode::TwentyFourHour if hour < 12 && meridiem == Meridiem::Pm => hour += 12,
            _ => {}
        }

        self.hour.set_text(pad_leading(&hour.to_string(), SEGMENT_WIDTH));
        self.minute.set_text(pad_leading(&minute.to_string(), SEGMENT_WIDTH));
    }

    /// Displayed hour.
    ///
    /// # Errors
    ///
    /// Fails if the hour segment does not hold a number, which can only
    /// happen while it is being edited.
    pub fn hour(&self) -> Result<u8, TimeFieldError> {
        parse_segment(SegmentKind::Hour, &self.hour)
    }

    /// Displayed minute.
    ///
    /// # Errors
    ///
    /// Fails if the minute segment does not hold a number, which can only
    /// happen while it is being edited.
    pub fn minute(&self) -> Result<u8, TimeFieldError> {
        parse_segment(SegmentKind::Minute, &self.minute)
    }

    /// Current meridiem selection. `None` only before any time was set.
    pub fn time_of_day(&self) -> Option<Meridiem> {
        self.meridiem
    }

    /// Canonical 24-hour value of what is displayed.
    ///
    /// # Errors
    ///
    /// Fails under the same conditions as [`TimeField::hour`] and
    /// [`TimeField::minute`].
    pub fn time_value(&self) -> Result<TimeValue, TimeFieldError> {
        let hour = i32::from(self.hour()?);
        let minute = i32::from(self.minute()?);
        let hour = match (self.clock_mode, self.meridiem) {
            (ClockMode::TwelveHour, Some(Meridiem::Pm)) => hour % 12 + 12,
            (ClockMode::TwelveHour, _) => hour % 12,
            (ClockMode::TwentyFourHour, _) => hour,
        };
        Ok(TimeValue::new(hour, minute))
    }

    /// Current clock mode.
    pub fn clock_mode(&self) -> ClockMode {
        self.clock_mode
    }

    /// Whether the field uses a 24-hour clock.
    pub fn is_24_hour_clock(&self) -> bool {
        self.clock_mode.is_24_hour()
    }

    /// Switches between 12-hour and 24-hour display.
    ///
    /// Does nothing if the mode is unchanged. Otherwise hides or shows the
    /// meridiem selector, redraws the hour when PM is selected, and notifies
    /// clock-mode listeners.
    ///
    /// # Errors
    ///
    /// With PM selected the displayed time is read back first; that read
    /// fails if a segment is mid-edit, in which case nothing changes.
    pub fn set_24_hour_clock(&mut self, value: bool) -> Result<(), TimeFieldError> {
        let new = ClockMode::from_24_hour(value);
        if new == self.clock_mode {
            return Ok(());
        }

        self.sync_meridiem();
        let redraw = match self.meridiem {
            Some(Meridiem::Pm) => Some((self.hour()?, self.minute()?)),
            _ => None,
        };

        let old = mem::replace(&mut self.clock_mode, new);
        if let Some((hour, minute)) = redraw {
            self.set_time_with_meridiem(i32::from(hour) + 12, i32::from(minute), Meridiem::Pm);
        }
        if new.is_24_hour() && self.focused == Some(FieldPart::Meridiem) {
            self.focused = Some(FieldPart::Minute);
        }

        debug!("Clock mode changed from {old:?} to {new:?}");
        self.clock_mode_listeners.notify(&ClockModeChanged { old, new });
        Ok(())
    }

    /// Whether the meridiem selector is shown.
    pub fn is_meridiem_visible(&self) -> bool {
        !self.clock_mode.is_24_hour()
    }

    /// Text of the hour segment.
    pub fn hour_text(&self) -> &str {
        self.hour.text()
    }

    /// Text of the minute segment.
    pub fn minute_text(&self) -> &str {
        self.minute.text()
    }

    /// Buffer of one segment, for rendering caret and selection.
    pub fn segment(&self, kind: SegmentKind) -> &SegmentBuffer {
        match kind {
            SegmentKind::Hour => &self.hour,
            SegmentKind::Minute => &self.minute,
        }
    }

    fn segment_mut(&mut self, kind: SegmentKind) -> &mut SegmentBuffer {
        match kind {
            SegmentKind::Hour => &mut self.hour,
            SegmentKind::Minute => &mut self.minute,
        }
    }

    /// Moves the caret of a segment, e.g. after a pointer click.
    pub fn set_caret(&mut self, kind: SegmentKind, caret: usize) {
        self.segment_mut(kind).set_caret(caret);
    }

    /// Registers a commit listener. The newest listener is notified first.
    pub fn add_action_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: Fn(&ActionEvent) + Send + Sync + 'static,
    {
        self.action_listeners.add(listener)
    }

    /// Unregisters a commit listener. Unknown ids are ignored.
    pub fn remove_action_listener(&mut self, id: ListenerId) -> bool {
        self.action_listeners.remove(id)
    }

    /// Registers a clock-mode listener.
    pub fn add_clock_mode_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: Fn(&ClockModeChanged) + Send + Sync + 'static,
    {
        self.clock_mode_listeners.add(listener)
    }

    /// Unregisters a clock-mode listener. Unknown ids are ignored.
    pub fn remove_clock_mode_listener(&mut self, id: ListenerId) -> bool {
        self.clock_mode_listeners.remove(id)
    }

    /// Part that currently holds focus.
    pub fn focused_part(&self) -> Option<FieldPart> {
        self.focused
    }

    /// The field as a whole gained focus; the hour segment takes it.
    pub fn focus_gained(&mut self) {
        self.focus(FieldPart::Hour);
    }

    /// The field as a whole lost focus.
    pub fn focus_lost(&mut self) {
        if let Some(part) = self.focused.take() {
            self.blur(part);
        }
    }

    /// Moves focus to `part`, normalizing the segment that loses it.
    ///
    /// Returns `false` if `part` cannot take focus: the meridiem selector is
    /// hidden in 24-hour mode.
    pub fn focus(&mut self, part: FieldPart) -> bool {
        if part == FieldPart::Meridiem && !self.is_meridiem_visible() {
            return false;
        }
        if self.focused == Some(part) {
            return true;
        }
        if let Some(previous) = self.focused.replace(part) {
            self.blur(previous);
        }
        if let Some(kind) = segment_kind(part) {
            self.segment_mut(kind).select_all();
        }
        debug!("Focus moved to {part}");
        true
    }

    /// Moves focus to the next part. Returns the part that took focus.
    pub fn move_focus_forward(&mut self) -> Option<FieldPart> {
        self.move_focus(Direction::Forward)
    }

    /// Moves focus to the previous part. Returns the part that took focus.
    pub fn move_focus_backward(&mut self) -> Option<FieldPart> {
        self.move_focus(Direction::Backward)
    }

    fn move_focus(&mut self, direction: Direction) -> Option<FieldPart> {
        let target = self.focused?.step(direction)?;
        self.focus(target).then_some(target)
    }

    fn blur(&mut self, part: FieldPart) {
        if let Some(kind) = segment_kind(part) {
            let buffer = self.segment_mut(kind);
            let text = normalize_on_blur(kind, buffer.text());
            if text != buffer.text() {
                buffer.set_text(text);
            } else {
                buffer.set_caret(buffer.caret());
            }
            if kind == SegmentKind::Hour {
                self.sync_meridiem();
            }
        }
    }

    /// In 24-hour mode the meridiem follows the hour segment whenever it
    /// holds a number.
    fn sync_meridiem(&mut self) {
        if !self.clock_mode.is_24_hour() {
            return;
        }
        if let Ok(hour) = self.hour() {
            self.meridiem = Some(Meridiem::of_hour(hour));
        }
    }

    /// Changes the meridiem selection, notifying action listeners if it
    /// actually changed.
    pub fn select_meridiem(&mut self, meridiem: Meridiem) -> bool {
        if self.meridiem == Some(meridiem) {
            return false;
        }
        self.meridiem = Some(meridiem);
        self.fire_action(FieldPart::Meridiem, ModifiersState::empty());
        true
    }

    /// Offers a replacement of `removed` characters at `offset` with `text`
    /// to a segment. Accepted edits are applied; a completed segment may pass
    /// focus on.
    pub fn replace(
        &mut self,
        kind: SegmentKind,
        offset: usize,
        removed: usize,
        text: &str,
    ) -> InputResponse {
        let current = self.segment(kind).text();
        match try_edit(kind, current, offset, removed, text, self.clock_mode) {
            EditOutcome::Accepted {
                text: replacement,
                advance_focus,
            } => {
                let buffer = self.segment_mut(kind);
                if text.chars().count() == 1 {
                    buffer.apply_splice(offset, removed, text);
                } else {
                    buffer.set_text(replacement);
                }
                if kind == SegmentKind::Hour {
                    self.sync_meridiem();
                }
                let moved = if advance_focus && self.focused == Some(segment_part(kind)) {
                    self.move_focus(Direction::Forward)
                } else {
                    None
                };
                InputResponse::Edited(moved)
            }
            EditOutcome::Rejected(reason) => InputResponse::Rejected(reason),
        }
    }

    /// Pastes `text` over the selection, or at the caret, of the focused segment.
    pub fn paste(&mut self, text: &str) -> InputResponse {
        let Some(kind) = self.focused.and_then(segment_kind) else {
            return InputResponse::Ignored;
        };
        let (offset, removed) = self.segment(kind).edit_span();
        self.replace(kind, offset, removed, text)
    }

    /// Removes `len` characters at `offset` of a segment. Deletions are not
    /// validated.
    pub fn remove(&mut self, kind: SegmentKind, offset: usize, len: usize) {
        self.segment_mut(kind).remove(offset, len);
        if kind == SegmentKind::Hour {
            self.sync_meridiem();
        }
    }

    /// Handles a key press in the focused part.
    pub fn handle_key(&mut self, stroke: KeyStroke) -> InputResponse {
        let Some(part) = self.focused else {
            return InputResponse::Ignored;
        };
        let num_lock = num_lock_or_off(self.lock_state.as_ref());

        let (caret, len) = match segment_kind(part) {
            Some(kind) => (self.segment(kind).caret(), self.segment(kind).len()),
            None => (0, 0),
        };
        if let Some(direction) = navigation_for(part, &stroke, caret, len, num_lock) {
            return match self.move_focus(direction) {
                Some(target) => InputResponse::FocusMoved(target),
                None => InputResponse::Ignored,
            };
        }

        match segment_kind(part) {
            Some(kind) => self.segment_key(kind, stroke, num_lock),
            None => self.meridiem_key(stroke),
        }
    }

    fn segment_key(
        &mut self,
        kind: SegmentKind,
        stroke: KeyStroke,
        num_lock: bool,
    ) -> InputResponse {
        if stroke.key == Key::Enter {
            self.fire_action(segment_part(kind), stroke.modifiers);
            return InputResponse::Committed;
        }
        if let Some(c) = stroke.inserted_char(num_lock) {
            let (offset, removed) = self.segment(kind).edit_span();
            let mut encoded = [0; 4];
            return self.replace(kind, offset, removed, c.encode_utf8(&mut encoded));
        }
        if matches!(stroke.key, Key::Backspace | Key::Delete) {
            let buffer = self.segment_mut(kind);
            if stroke.key == Key::Backspace {
                buffer.delete_backward();
            } else {
                buffer.delete_forward();
            }
            if kind == SegmentKind::Hour {
                self.sync_meridiem();
            }
            return InputResponse::Edited(None);
        }

        let buffer = self.segment_mut(kind);
        let caret = buffer.caret();
        let selection = buffer.selection();
        if stroke.is_move_left(num_lock) {
            let target = selection.map_or(caret.saturating_sub(1), |range| range.start);
            buffer.set_caret(target);
        } else if stroke.is_move_right(num_lock) {
            buffer.set_caret(selection.map_or(caret + 1, |range| range.end));
        } else {
            match stroke.key {
                Key::Home => buffer.set_caret(0),
                Key::End => buffer.set_caret(SEGMENT_WIDTH),
                _ => return InputResponse::Ignored,
            }
        }
        InputResponse::CaretMoved
    }

    fn meridiem_key(&mut self, stroke: KeyStroke) -> InputResponse {
        let current = self.meridiem.unwrap_or(Meridiem::Am);
        let target = match stroke.key {
            Key::ArrowUp | Key::ArrowDown => current.toggled(),
            Key::Character('a' | 'A') => Meridiem::Am,
            Key::Character('p' | 'P') => Meridiem::Pm,
            _ => return InputResponse::Ignored,
        };
        if self.select_meridiem(target) {
            InputResponse::MeridiemChanged(target)
        } else {
            InputResponse::Ignored
        }
    }

    fn fire_action(&self, source: FieldPart, modifiers: ModifiersState) {
        debug!("Time field action from {source}");
        self.action_listeners.notify(&ActionEvent { source, modifiers });
    }
}

fn parse_segment(kind: SegmentKind, buffer: &SegmentBuffer) -> Result<u8, TimeFieldError> {
    buffer
        .text()
        .parse()
        .map_err(|source| TimeFieldError::UncommittedSegment {
            segment: kind,
            text: buffer.text().to_string(),
            source,
        })
}

fn segment_kind(part: FieldPart) -> Option<SegmentKind> {
    match part {
        FieldPart::Hour => Some(SegmentKind::Hour),
        FieldPart::Minute => Some(SegmentKind::Minute),
        FieldPart::Meridiem => None,
    }
}

fn segment_part(kind: SegmentKind) -> FieldPart {
    match kind {
        SegmentKind::Hour => FieldPart::Hour,
        SegmentKind::Minute => FieldPart::Minute,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;
    use crate::keys::FixedLockState;

    fn field_at(hour: u32, minute: u32, use_24_hour_clock: bool) -> TimeField {
        let time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default();
        TimeField::new(
            &TimeFieldArgs::default()
                .initial_time(time)
                .use_24_hour_clock(use_24_hour_clock),
        )
    }

    fn type_chars(field: &mut TimeField, text: &str) -> Vec<InputResponse> {
        text.chars()
            .map(|c| field.handle_key(KeyStroke::new(Key::Character(c))))
            .collect()
    }

    fn press(field: &mut TimeField, key: Key) -> InputResponse {
        field.handle_key(KeyStroke::new(key))
    }

    #[test]
    fn set_time_folds_out_of_range_values() {
        let mut field = field_at(8, 0, false);
        field.set_time(25, 61);
        assert_eq!(field.hour_text(), "01");
        assert_eq!(field.minute_text(), "01");
        assert_eq!(field.time_of_day(), Some(Meridiem::Am));
    }

    #[test]
    fn set_time_in_12_hour_mode_shows_afternoon_hours_reduced() {
        let mut field = field_at(8, 0, false);
        field.set_time(14, 5);
        assert_eq!(field.hour_text(), "02");
        assert_eq!(field.minute_text(), "05");
        assert_eq!(field.time_of_day(), Some(Meridiem::Pm));

        field.set_time(12, 0);
        assert_eq!(field.hour_text(), "12");
        assert_eq!(field.time_of_day(), Some(Meridiem::Pm));

        field.set_time(0, 0);
        assert_eq!(field.hour_text(), "00");
        assert_eq!(field.time_of_day(), Some(Meridiem::Am));
    }

    #[test]
    fn set_time_with_meridiem_in_24_hour_mode_adds_afternoon() {
        let mut field = field_at(8, 0, true);
        field.set_time_with_meridiem(3, 30, Meridiem::Pm);
        assert_eq!(field.hour_text(), "15");
        assert_eq!(field.minute_text(), "30");
        assert_eq!(field.hour().ok(), Some(15));
    }

    #[test]
    fn set_time_from_uses_half_day_hour() {
        let mut field = field_at(8, 0, false);
        let time = NaiveTime::from_hms_opt(18, 45, 10).unwrap_or_default();
        field.set_time_from(&time);
        assert_eq!(field.hour_text(), "06");
        assert_eq!(field.minute_text(), "45");
        assert_eq!(field.time_of_day(), Some(Meridiem::Pm));

        field.set_24_hour_clock(true).ok();
        field.set_time_from(&time);
        assert_eq!(field.hour_text(), "18");
    }

    #[test]
    fn default_args_read_the_wall_clock() {
        let field = TimeField::default();
        assert!(!field.is_24_hour_clock());
        assert!(field.time_of_day().is_some());
        assert_eq!(field.hour_text().len(), 2);
        assert_eq!(field.minute_text().len(), 2);
    }

    #[test]
    fn typing_hour_in_24_hour_mode_bounds_second_digit() {
        let mut field = field_at(8, 0, true);
        field.focus_gained();

        let responses = type_chars(&mut field, "25");
        assert_eq!(responses[0], InputResponse::Edited(None));
        assert_eq!(
            responses[1],
            InputResponse::Rejected(RejectReason::OutOfRange)
        );
        assert_eq!(field.hour_text(), "2");
        assert_eq!(field.segment(SegmentKind::Hour).caret(), 1);
        assert_eq!(field.focused_part(), Some(FieldPart::Hour));

        assert_eq!(
            type_chars(&mut field, "3"),
            vec![InputResponse::Edited(Some(FieldPart::Minute))]
        );
        assert_eq!(field.hour_text(), "23");
        assert_eq!(field.focused_part(), Some(FieldPart::Minute));
    }

    #[test]
    fn typing_hour_in_12_hour_mode_bounds_second_digit() {
        let mut field = field_at(8, 0, false);
        field.focus_gained();

        let responses = type_chars(&mut field, "13");
        assert_eq!(
            responses[1],
            InputResponse::Rejected(RejectReason::OutOfRange)
        );
        assert_eq!(field.hour_text(), "1");

        type_chars(&mut field, "2");
        assert_eq!(field.hour_text(), "12");
        assert_eq!(field.focused_part(), Some(FieldPart::Minute));
    }

    #[test]
    fn minute_second_digit_advances_only_in_12_hour_mode() {
        let mut field = field_at(8, 0, false);
        field.focus(FieldPart::Minute);
        let responses = type_chars(&mut field, "55");
        assert_eq!(responses[0], InputResponse::Edited(None));
        assert_eq!(
            responses[1],
            InputResponse::Edited(Some(FieldPart::Meridiem))
        );
        assert_eq!(field.minute_text(), "55");
        assert_eq!(field.focused_part(), Some(FieldPart::Meridiem));

        let mut field = field_at(8, 0, true);
        field.focus(FieldPart::Minute);
        let responses = type_chars(&mut field, "55");
        assert_eq!(responses[1], InputResponse::Edited(None));
        assert_eq!(field.focused_part(), Some(FieldPart::Minute));
    }

    #[test]
    fn full_entry_flows_through_every_part() {
        let mut field = field_at(8, 0, false);
        field.focus_gained();
        type_chars(&mut field, "0930");
        assert_eq!(field.focused_part(), Some(FieldPart::Meridiem));
        assert_eq!(
            press(&mut field, Key::Character('p')),
            InputResponse::MeridiemChanged(Meridiem::Pm)
        );
        field.focus_lost();

        let value = field.time_value().ok();
        assert_eq!(value, Some(TimeValue::new(21, 30)));
        assert_eq!(
            value.and_then(|value| value.to_naive_time()),
            NaiveTime::from_hms_opt(21, 30, 0)
        );
    }

    #[test]
    fn blur_pads_partial_segments() {
        let mut field = field_at(8, 0, false);
        field.focus_gained();
        type_chars(&mut field, "1");
        field.focus(FieldPart::Minute);
        assert_eq!(field.hour_text(), "01");

        type_chars(&mut field, "3");
        field.focus_lost();
        assert_eq!(field.minute_text(), "30");
        assert_eq!(field.focused_part(), None);
    }

    #[test]
    fn single_minute_digit_pads_to_tens() {
        let mut field = field_at(8, 0, true);
        field.focus(FieldPart::Minute);
        field.remove(SegmentKind::Minute, 0, 2);
        field.replace(SegmentKind::Minute, 0, 0, "5");
        field.focus_lost();
        assert_eq!(field.minute_text(), "50");
    }

    #[test]
    fn reading_a_segment_mid_edit_fails() {
        let mut field = field_at(8, 0, false);
        field.focus_gained();
        press(&mut field, Key::Backspace);
        assert_eq!(field.hour_text(), "");
        assert!(matches!(
            field.hour(),
            Err(TimeFieldError::UncommittedSegment {
                segment: SegmentKind::Hour,
                ..
            })
        ));
        assert!(field.time_value().is_err());
        assert_eq!(field.minute().ok(), Some(0));
    }

    #[test]
    fn toggling_clock_mode_redraws_afternoon_hours() {
        let mut field = field_at(14, 20, true);
        assert_eq!(field.hour_text(), "14");
        assert_eq!(field.time_of_day(), Some(Meridiem::Pm));

        field.set_24_hour_clock(false).ok();
        assert_eq!(field.hour_text(), "02");
        assert_eq!(field.minute_text(), "20");
        assert_eq!(field.time_of_day(), Some(Meridiem::Pm));
        assert!(field.is_meridiem_visible());

        field.set_24_hour_clock(true).ok();
        assert_eq!(field.hour_text(), "14");
        assert!(!field.is_meridiem_visible());
    }

    #[test]
    fn typed_24_hour_afternoon_survives_switch_to_12_hour() {
        let mut field = field_at(9, 0, true);
        field.focus_gained();
        type_chars(&mut field, "15");
        field.focus_lost();
        assert_eq!(field.hour_text(), "15");
        assert_eq!(field.time_of_day(), Some(Meridiem::Pm));

        field.set_24_hour_clock(false).ok();
        assert_eq!(field.hour_text(), "03");
        assert_eq!(field.time_of_day(), Some(Meridiem::Pm));
        assert_eq!(field.time_value().ok(), Some(TimeValue::new(15, 0)));
    }

    #[test]
    fn typed_24_hour_morning_clears_afternoon() {
        let mut field = field_at(15, 0, true);
        assert_eq!(field.time_of_day(), Some(Meridiem::Pm));
        field.focus_gained();
        type_chars(&mut field, "08");
        assert_eq!(field.time_of_day(), Some(Meridiem::Am));

        field.replace(SegmentKind::Hour, 0, 2, "12");
        assert_eq!(field.hour_text(), "12");
        assert_eq!(field.time_of_day(), Some(Meridiem::Pm));

        field.set_24_hour_clock(false).ok();
        field.set_24_hour_clock(true).ok();
        assert_eq!(field.hour_text(), "12");
        assert_eq!(field.time_of_day(), Some(Meridiem::Pm));
    }

    #[test]
    fn toggling_clock_mode_leaves_morning_alone() {
        let mut field = field_at(9, 5, false);
        field.set_24_hour_clock(true).ok();
        assert_eq!(field.hour_text(), "09");
        assert_eq!(field.time_of_day(), Some(Meridiem::Am));
    }

    #[test]
    fn clock_mode_listeners_see_changes_only() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut field = field_at(9, 0, false);
        let sink = seen.clone();
        field.add_clock_mode_listener(move |change| {
            if let Ok(mut seen) = sink.lock() {
                seen.push(*change);
            }
        });

        field.set_24_hour_clock(false).ok();
        field.set_24_hour_clock(true).ok();
        field.set_24_hour_clock(true).ok();

        let seen = seen.lock().map(|seen| seen.clone()).unwrap_or_default();
        assert_eq!(
            seen,
            vec![ClockModeChanged {
                old: ClockMode::TwelveHour,
                new: ClockMode::TwentyFourHour,
            }]
        );
    }

    #[test]
    fn clock_mode_switch_fails_cleanly_mid_edit() {
        let mut field = field_at(15, 0, false);
        field.focus_gained();
        press(&mut field, Key::Delete);
        assert!(field.set_24_hour_clock(true).is_err());
        assert!(!field.is_24_hour_clock());
    }

    #[test]
    fn enter_commits_to_listeners_newest_first() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let mut field = field_at(9, 0, false);
        for tag in ["old", "new"] {
            let order = order.clone();
            field.add_action_listener(move |event| {
                if let Ok(mut order) = order.lock() {
                    order.push((tag, event.source));
                }
            });
        }

        field.focus(FieldPart::Minute);
        assert_eq!(press(&mut field, Key::Enter), InputResponse::Committed);

        let order = order.lock().map(|order| order.clone()).unwrap_or_default();
        assert_eq!(
            order,
            vec![("new", FieldPart::Minute), ("old", FieldPart::Minute)]
        );
    }

    #[test]
    fn meridiem_change_fires_action_once() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut field = field_at(9, 0, false);
        let counter = count.clone();
        let id = field.add_action_listener(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(field.select_meridiem(Meridiem::Pm));
        assert!(!field.select_meridiem(Meridiem::Pm));
        assert_eq!(count.load(Ordering::SeqCst), 1);

        assert!(field.remove_action_listener(id));
        assert!(!field.remove_action_listener(id));
        field.select_meridiem(Meridiem::Am);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn meridiem_selector_keys() {
        let mut field = field_at(9, 0, false);
        assert!(field.focus(FieldPart::Meridiem));
        assert_eq!(
            press(&mut field, Key::ArrowDown),
            InputResponse::MeridiemChanged(Meridiem::Pm)
        );
        assert_eq!(
            press(&mut field, Key::ArrowUp),
            InputResponse::MeridiemChanged(Meridiem::Am)
        );
        assert_eq!(
            press(&mut field, Key::Character('a')),
            InputResponse::Ignored
        );
        assert_eq!(
            press(&mut field, Key::ArrowLeft),
            InputResponse::FocusMoved(FieldPart::Minute)
        );
    }

    #[test]
    fn colon_and_arrows_navigate_between_segments() {
        let mut field = field_at(9, 0, false);
        field.focus_gained();
        let colon = KeyStroke::with_modifiers(Key::Character(';'), ModifiersState::SHIFT);
        assert_eq!(
            field.handle_key(colon),
            InputResponse::FocusMoved(FieldPart::Minute)
        );

        // Focus entry selects the segment with the caret at the start.
        assert_eq!(
            press(&mut field, Key::ArrowLeft),
            InputResponse::FocusMoved(FieldPart::Hour)
        );
        assert_eq!(
            press(&mut field, Key::ArrowRight),
            InputResponse::CaretMoved
        );
        assert_eq!(field.segment(SegmentKind::Hour).caret(), 2);
        assert_eq!(
            press(&mut field, Key::ArrowRight),
            InputResponse::FocusMoved(FieldPart::Minute)
        );
        assert_eq!(
            press(&mut field, Key::ArrowRight),
            InputResponse::CaretMoved
        );
        assert_eq!(press(&mut field, Key::ArrowLeft), InputResponse::CaretMoved);
        assert_eq!(field.segment(SegmentKind::Minute).caret(), 1);
    }

    #[test]
    fn right_arrow_after_single_hour_digit_moves_on() {
        let mut field = field_at(9, 0, false);
        field.focus_gained();
        type_chars(&mut field, "1");
        assert_eq!(
            press(&mut field, Key::ArrowRight),
            InputResponse::FocusMoved(FieldPart::Minute)
        );
        assert_eq!(field.hour_text(), "01");
    }

    #[test]
    fn keypad_arrows_follow_num_lock() {
        let mut field = field_at(9, 0, false).with_lock_state(FixedLockState(true));
        field.focus(FieldPart::Minute);
        assert_eq!(
            press(&mut field, Key::Numpad(4)),
            InputResponse::Edited(None)
        );
        assert_eq!(field.minute_text(), "4");

        let mut field = field_at(9, 0, false);
        field.focus(FieldPart::Minute);
        assert_eq!(
            press(&mut field, Key::Numpad(4)),
            InputResponse::FocusMoved(FieldPart::Hour)
        );
    }

    #[test]
    fn meridiem_is_unreachable_in_24_hour_mode() {
        let mut field = field_at(9, 0, true);
        assert!(!field.focus(FieldPart::Meridiem));
        field.focus(FieldPart::Minute);
        assert_eq!(field.move_focus_forward(), None);
        assert_eq!(field.focused_part(), Some(FieldPart::Minute));
    }

    #[test]
    fn switching_to_24_hour_mode_moves_focus_off_meridiem() {
        let mut field = field_at(9, 0, false);
        field.focus(FieldPart::Meridiem);
        field.set_24_hour_clock(true).ok();
        assert_eq!(field.focused_part(), Some(FieldPart::Minute));
    }

    #[test]
    fn paste_replaces_focused_segment() {
        let mut field = field_at(9, 0, false);
        field.focus(FieldPart::Minute);
        assert_eq!(field.paste("45"), InputResponse::Edited(None));
        assert_eq!(field.minute_text(), "45");
        field.set_caret(SegmentKind::Minute, 0);
        assert_eq!(
            field.paste("75"),
            InputResponse::Rejected(RejectReason::OutOfRange)
        );
        assert_eq!(field.minute_text(), "45");
        assert_eq!(
            field.paste("ab"),
            InputResponse::Rejected(RejectReason::NotNumeric)
        );

        field.focus(FieldPart::Meridiem);
        assert_eq!(field.paste("45"), InputResponse::Ignored);
    }

    #[test]
    fn rejected_keystroke_keeps_text_and_caret() {
        let mut field = field_at(9, 0, false);
        field.focus(FieldPart::Minute);
        type_chars(&mut field, "3");
        let before = field.segment(SegmentKind::Minute).clone();
        assert_eq!(
            press(&mut field, Key::Character('x')),
            InputResponse::Rejected(RejectReason::NotNumeric)
        );
        assert_eq!(field.segment(SegmentKind::Minute), &before);
    }

    #[test]
    fn keys_without_focus_are_ignored() {
        let mut field = field_at(9, 0, false);
        assert_eq!(
            press(&mut field, Key::Character('1')),
            InputResponse::Ignored
        );
        assert_eq!(field.hour_text(), "09");
    }

    #[test]
    fn programmatic_edit_does_not_steal_focus() {
        let mut field = field_at(9, 0, false);
        field.focus(FieldPart::Minute);
        field.remove(SegmentKind::Hour, 0, 2);
        field.replace(SegmentKind::Hour, 0, 0, "1");
        assert_eq!(
            field.replace(SegmentKind::Hour, 1, 0, "1"),
            InputResponse::Edited(None)
        );
        assert_eq!(field.hour_text(), "11");
        assert_eq!(field.focused_part(), Some(FieldPart::Minute));
    }
}
