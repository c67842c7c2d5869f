//! Input field and key events.

use std::sync::Mutex;

/// The text the user is composing.
#[derive(Debug, Default)]
pub struct InputField {
    value: Mutex<String>,
}

impl InputField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current text.
    pub fn set(&self, value: impl Into<String>) {
        *self.value.lock().expect("input field lock poisoned") = value.into();
    }

    /// Current text, untrimmed.
    pub fn value(&self) -> String {
        self.value.lock().expect("input field lock poisoned").clone()
    }

    /// Take the trimmed text and empty the field in one step.
    ///
    /// Whitespace-only text is left in place and yields `None`.
    pub fn take_trimmed(&self) -> Option<String> {
        let mut value = self.value.lock().expect("input field lock poisoned");
        let message = value.trim().to_string();
        if message.is_empty() {
            return None;
        }
        value.clear();
        Some(message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Char(char),
    Other,
}

/// A key press in the input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub shift: bool,
}

impl KeyPress {
    pub fn enter() -> Self {
        Self {
            key: Key::Enter,
            shift: false,
        }
    }

    pub fn shift_enter() -> Self {
        Self {
            key: Key::Enter,
            shift: true,
        }
    }

    /// Plain Enter submits; Shift+Enter is left to the default behavior.
    pub fn submits(&self) -> bool {
        self.key == Key::Enter && !self.shift
    }
}
