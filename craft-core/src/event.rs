//! Input events the editor consumes, and keyboard shortcut mapping.

use serde::{Deserialize, Serialize};

use crate::element::{ElementId, ElementKind};
use crate::geometry::{Handle, Point};

/// Keyboard modifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct KeyModifiers {
    /// Shift key pressed.
    #[serde(default)]
    pub shift: bool,
    /// Control key pressed.
    #[serde(default)]
    pub ctrl: bool,
    /// Alt/Option key pressed.
    #[serde(default)]
    pub alt: bool,
    /// Meta/Command key pressed.
    #[serde(default)]
    pub meta: bool,
}

impl KeyModifiers {
    /// No modifiers.
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Command modifier: Ctrl, or Cmd on macOS.
    pub const COMMAND: Self = Self {
        shift: false,
        ctrl: true,
        alt: false,
        meta: false,
    };

    /// Whether Ctrl or Meta is held.
    #[must_use]
    pub fn is_command(&self) -> bool {
        self.ctrl || self.meta
    }

    /// Add shift.
    #[must_use]
    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }
}

/// What a pointer-down landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "target", rename_all = "lowercase")]
pub enum PointerTarget {
    /// Empty canvas.
    Background,
    /// An element body.
    Element(ElementId),
    /// A resize handle of the selected element.
    Handle(Handle),
}

/// Editing command bound to a key chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Shortcut {
    /// Copy the selection to the clipboard.
    Copy,
    /// Paste clipboard contents.
    Paste,
    /// Clone the selection in place.
    Duplicate,
    /// Remove the selection.
    Delete,
    /// Select every element.
    SelectAll,
    /// Step back in history.
    Undo,
    /// Step forward in history.
    Redo,
}

impl Shortcut {
    /// Map a key name plus modifiers to a shortcut.
    ///
    /// Key names follow `KeyboardEvent.key`; letters match case-insensitively.
    #[must_use]
    pub fn from_key(key: &str, modifiers: KeyModifiers) -> Option<Self> {
        if matches!(key, "Delete" | "Backspace") {
            return Some(Self::Delete);
        }
        if !modifiers.is_command() {
            return None;
        }
        match key.to_lowercase().as_str() {
            "c" => Some(Self::Copy),
            "v" => Some(Self::Paste),
            "d" => Some(Self::Duplicate),
            "a" => Some(Self::SelectAll),
            "z" if modifiers.shift => Some(Self::Redo),
            "z" => Some(Self::Undo),
            "y" => Some(Self::Redo),
            _ => None,
        }
    }
}

/// All input events the editor can receive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum InputEvent {
    /// Pointer pressed on the canvas.
    PointerDown {
        /// Canvas position.
        point: Point,
        /// Modifiers held.
        #[serde(default)]
        modifiers: KeyModifiers,
        /// What was hit, when the shell hit-tests itself.
        #[serde(default)]
        target: Option<PointerTarget>,
    },

    /// Pointer moved, anywhere on the page.
    PointerMove {
        /// Canvas position.
        point: Point,
    },

    /// Pointer released, anywhere on the page.
    PointerUp {
        /// Canvas position.
        point: Point,
    },

    /// Key pressed.
    Key {
        /// Key name (`KeyboardEvent.key`).
        key: String,
        /// Active modifier keys.
        #[serde(default)]
        modifiers: KeyModifiers,
        /// Whether focus is inside a text input or select control.
        #[serde(default)]
        in_text_input: bool,
    },

    /// New element dropped from the palette.
    Drop {
        /// Kind to create.
        kind: ElementKind,
        /// Canvas position of the drop.
        point: Point,
    },
}
