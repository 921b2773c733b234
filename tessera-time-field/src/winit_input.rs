//! Translation of winit keyboard input into [`KeyStroke`]s.
//!
//! Keypad 4 and 6 are recognised by their physical key, since their logical
//! key already depends on numeric lock and the field decides that itself.
//! Modifier state is carried over as winit reports it.

use winit::keyboard::{Key as WinitKey, KeyCode, ModifiersState, NamedKey, PhysicalKey};

use crate::keys::{Key, KeyStroke};

/// Builds a key stroke from a pressed winit key.
///
/// Returns `None` for keys a time field never reacts to.
///
/// ```
/// use tessera_time_field::{Key, winit_input::key_stroke};
/// use winit::keyboard::{Key as WinitKey, KeyCode, ModifiersState, NamedKey, PhysicalKey};
///
/// let stroke = key_stroke(
///     &WinitKey::Named(NamedKey::ArrowRight),
///     PhysicalKey::Code(KeyCode::Numpad6),
///     ModifiersState::empty(),
/// );
/// assert_eq!(stroke.map(|stroke| stroke.key), Some(Key::Numpad(6)));
/// ```
pub fn key_stroke(
    logical: &WinitKey,
    physical: PhysicalKey,
    modifiers: ModifiersState,
) -> Option<KeyStroke> {
    if let PhysicalKey::Code(code) = physical {
        if let Some(digit) = numpad_digit(code) {
            return Some(KeyStroke::with_modifiers(Key::Numpad(digit), modifiers));
        }
    }

    let key = match logical {
        WinitKey::Named(named) => match named {
            NamedKey::ArrowLeft => Key::ArrowLeft,
            NamedKey::ArrowRight => Key::ArrowRight,
            NamedKey::ArrowUp => Key::ArrowUp,
            NamedKey::ArrowDown => Key::ArrowDown,
            NamedKey::Home => Key::Home,
            NamedKey::End => Key::End,
            NamedKey::Backspace => Key::Backspace,
            NamedKey::Delete => Key::Delete,
            NamedKey::Enter => Key::Enter,
            _ => return None,
        },
        WinitKey::Character(text) => {
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Key::Character(c),
                _ => return None,
            }
        }
        _ => return None,
    };
    Some(KeyStroke::with_modifiers(key, modifiers))
}

fn numpad_digit(code: KeyCode) -> Option<u8> {
    let digit = match code {
        KeyCode::Numpad0 => 0,
        KeyCode::Numpad1 => 1,
        KeyCode::Numpad2 => 2,
        KeyCode::Numpad3 => 3,
        KeyCode::Numpad4 => 4,
        KeyCode::Numpad5 => 5,
        KeyCode::Numpad6 => 6,
        KeyCode::Numpad7 => 7,
        KeyCode::Numpad8 => 8,
        KeyCode::Numpad9 => 9,
        _ => return None,
    };
    Some(digit)
}
