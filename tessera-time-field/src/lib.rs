//! Segmented clock-time entry: the input engine behind a time field component.
//!
//! A time field is split into an hour segment, a minute segment and an AM/PM
//! selector. Every keystroke or paste is validated before it reaches the
//! displayed text, completed segments pass focus on automatically, and
//! out-of-range values handed in by code are folded back into range.
//!
//! # Components
//!
//! - [`correction`] folds arbitrary hours and minutes into range.
//! - [`validation`] accepts or rejects each edit of a segment.
//! - [`navigation`] decides when a key moves focus between parts.
//! - [`segment`] holds segment text and pads it when focus leaves.
//! - [`TimeField`] ties them together and exposes the value.
//!
//! The crate draws nothing. A host widget forwards input to the field:
//!
//! ```
//! use tessera_time_field::{ClockMode, Key, KeyStroke, TimeField, TimeFieldArgs};
//!
//! let mut field = TimeField::new(&TimeFieldArgs::default().use_24_hour_clock(true));
//! field.set_time(25, 61);
//! assert_eq!((field.hour_text(), field.minute_text()), ("01", "01"));
//!
//! field.focus_gained();
//! field.handle_key(KeyStroke::new(Key::Character('2')));
//! field.handle_key(KeyStroke::new(Key::Character('5')));
//! assert_eq!(field.hour_text(), "2");
//! assert_eq!(field.clock_mode(), ClockMode::TwentyFourHour);
//! ```
//!
//! # Logging
//!
//! Rejected edits, focus moves and clock-mode changes are reported through
//! `tracing` at debug level. Installing a subscriber is left to the host.
#![deny(missing_docs, clippy::unwrap_used)]

pub mod correction;
mod error;
pub mod keys;
mod listeners;
pub mod navigation;
pub mod segment;
mod time_field;
pub mod validation;
pub mod winit_input;

pub use error::TimeFieldError;
pub use keys::{FixedLockState, Key, KeyStroke, LockKeyState, LockStateError, UnknownLockState};
pub use listeners::{ActionEvent, ClockModeChanged, ListenerId};
pub use navigation::{Direction, FieldPart};
pub use segment::{SegmentBuffer, SegmentKind};
pub use time_field::{ClockMode, InputResponse, Meridiem, TimeField, TimeFieldArgs, TimeValue};
pub use validation::{EditOutcome, RejectReason};
