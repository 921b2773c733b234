//! # Key Strokes
//!
//! The keyboard input a time field reacts to. Modifiers use winit's
//! `ModifiersState`; keys are reduced to the few a time field understands.
//!
//! Hosts translate whatever their windowing layer delivers into a
//! [`KeyStroke`] (see [`crate::winit_input`] for winit) and forward it to
//! [`crate::TimeField::handle_key`].

use thiserror::Error;
use tracing::trace;
use winit::keyboard::ModifiersState;

/// Identity of a pressed key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A key producing a printable character, after layout mapping.
    Character(char),
    /// A key on the numeric keypad, identified by its digit.
    ///
    /// With numeric lock on these behave as [`Key::Character`] digits; with
    /// numeric lock off, 4 and 6 act as the left and right arrows.
    Numpad(u8),
    /// Arrow left.
    ArrowLeft,
    /// Arrow right.
    ArrowRight,
    /// Arrow up.
    ArrowUp,
    /// Arrow down.
    ArrowDown,
    /// Home.
    Home,
    /// End.
    End,
    /// Backspace.
    Backspace,
    /// Delete.
    Delete,
    /// Enter / Return, the commit key.
    Enter,
}

/// A single key press delivered to the focused part of a time field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyStroke {
    /// The key that was pressed.
    pub key: Key,
    /// Modifiers held at the time of the press.
    pub modifiers: ModifiersState,
}

impl KeyStroke {
    /// Creates a key stroke without modifiers.
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: ModifiersState::empty(),
        }
    }

    /// Creates a key stroke with the given modifiers.
    pub fn with_modifiers(key: Key, modifiers: ModifiersState) -> Self {
        Self { key, modifiers }
    }

    /// Whether this is the hour/minute separator gesture, `:`.
    ///
    /// Accepts both the shifted semicolon key and an already mapped `:`.
    pub(crate) fn is_separator(&self) -> bool {
        match self.key {
            Key::Character(':') => true,
            Key::Character(';') => self.modifiers.shift_key(),
            _ => false,
        }
    }

    /// Whether this stroke moves the caret right.
    pub(crate) fn is_move_right(&self, num_lock: bool) -> bool {
        matches!(self.key, Key::ArrowRight) || (self.key == Key::Numpad(6) && !num_lock)
    }

    /// Whether this stroke moves the caret left.
    pub(crate) fn is_move_left(&self, num_lock: bool) -> bool {
        matches!(self.key, Key::ArrowLeft) || (self.key == Key::Numpad(4) && !num_lock)
    }

    /// The character this stroke inserts into a segment, if any.
    pub(crate) fn inserted_char(&self, num_lock: bool) -> Option<char> {
        let shortcut = ModifiersState::CONTROL | ModifiersState::SUPER | ModifiersState::ALT;
        if self.modifiers.intersects(shortcut) {
            return None;
        }
        match self.key {
            Key::Character(c) if !c.is_control() => Some(c),
            Key::Numpad(digit) if num_lock => char::from_digit(u32::from(digit), 10),
            _ => None,
        }
    }
}

/// Failure to read the state of a locking key.
#[derive(Debug, Error)]
pub enum LockStateError {
    /// The platform does not expose locking key state.
    #[error("locking key state is not available on this platform")]
    Unsupported,
    /// The platform reported an error while querying.
    #[error("failed to query locking key state: {0}")]
    Query(String),
}

/// Source of the numeric-lock state.
///
/// Windowing layers rarely report lock state, so the default probe,
/// [`UnknownLockState`], always fails; a failed probe counts as "off".
pub trait LockKeyState: Send + Sync {
    /// Reports whether numeric lock is on.
    fn num_lock(&self) -> Result<bool, LockStateError>;
}

/// Probe for hosts that cannot report locking key state.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnknownLockState;

impl LockKeyState for UnknownLockState {
    fn num_lock(&self) -> Result<bool, LockStateError> {
        Err(LockStateError::Unsupported)
    }
}

/// Probe returning a fixed state, for hosts tracking the lock themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedLockState(pub bool);

impl LockKeyState for FixedLockState {
    fn num_lock(&self) -> Result<bool, LockStateError> {
        Ok(self.0)
    }
}

/// Reads numeric lock, treating any probe failure as "off".
pub(crate) fn num_lock_or_off(probe: &dyn LockKeyState) -> bool {
    match probe.num_lock() {
        Ok(on) => on,
        Err(err) => {
            trace!("Numeric lock unavailable, assuming off: {err}");
            false
        }
    }
}
