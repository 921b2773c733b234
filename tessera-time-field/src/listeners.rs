//! # Listener Registry
//!
//! Action and clock-mode listeners of a [`crate::TimeField`].
//!
//! Listeners are shared closures, the same shape as tessera's `Callback`.
//! Each registration returns a [`ListenerId`]; removing an id twice, or one
//! that was never issued, does nothing. Notification walks the listeners
//! from the most recently added to the oldest and hands every one the same
//! event.

use std::sync::Arc;

use smallvec::SmallVec;
use winit::keyboard::ModifiersState;

use crate::{navigation::FieldPart, time_field::ClockMode};

/// Handle identifying one registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Commit notification, fired when Enter is pressed in a segment or the
/// meridiem selection changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionEvent {
    /// The part of the field the action came from.
    pub source: FieldPart,
    /// Modifiers held when the action was triggered.
    pub modifiers: ModifiersState,
}

/// Notification that the clock mode changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockModeChanged {
    /// Mode before the change.
    pub old: ClockMode,
    /// Mode after the change.
    pub new: ClockMode,
}

type Listener<E> = Arc<dyn Fn(&E) + Send + Sync>;

/// Ordered set of listeners for events of type `E`.
pub(crate) struct ListenerList<E> {
    next_id: u64,
    entries: SmallVec<[(ListenerId, Listener<E>); 2]>,
}

impl<E> Default for ListenerList<E> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: SmallVec::new(),
        }
    }
}

impl<E> ListenerList<E> {
    pub(crate) fn add<F>(&mut self, listener: F) -> ListenerId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Arc::new(listener)));
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Delivers `event` to every listener, newest first.
    pub(crate) fn notify(&self, event: &E) {
        for (_, listener) in self.entries.iter().rev() {
            listener(event);
        }
    }
}
