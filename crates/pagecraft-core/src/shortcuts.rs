//! Keyboard shortcut registry.

use crate::input::{Key, Modifiers};

/// What a shortcut does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    DeleteSelection,
    ClearSelection,
    Undo,
    Redo,
    Copy,
    Paste,
    SelectAll,
    ToggleGrid,
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub shift: bool,
    pub command: Command,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        shift: bool,
        command: Command,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            command,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+Z").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }

    fn matches(&self, key: &Key, modifiers: Modifiers) -> bool {
        if self.ctrl != modifiers.command() || self.shift != modifiers.shift {
            return false;
        }
        match key {
            Key::Delete => self.key == "Delete",
            Key::Backspace => self.key == "Backspace",
            Key::Escape => self.key == "Escape",
            Key::Character(c) => self.key.eq_ignore_ascii_case(c),
            Key::Other(_) => false,
        }
    }
}

const SHORTCUTS: &[Shortcut] = &[
    Shortcut::new("A", true, false, Command::SelectAll, "Select all elements"),
    Shortcut::new("Z", true, false, Command::Undo, "Undo"),
    Shortcut::new("Z", true, true, Command::Redo, "Redo"),
    Shortcut::new("Y", true, false, Command::Redo, "Redo"),
    Shortcut::new("C", true, false, Command::Copy, "Copy elements"),
    Shortcut::new("V", true, false, Command::Paste, "Paste elements"),
    Shortcut::new("G", true, false, Command::ToggleGrid, "Toggle grid"),
    Shortcut::new("Delete", false, false, Command::DeleteSelection, "Delete selected elements"),
    Shortcut::new("Backspace", false, false, Command::DeleteSelection, "Delete selected elements"),
    Shortcut::new("Escape", false, false, Command::ClearSelection, "Clear selection"),
];

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> &'static [Shortcut] {
        SHORTCUTS
    }

    /// Find the command bound to a key press.
    pub fn resolve(key: &Key, modifiers: Modifiers) -> Option<Command> {
        SHORTCUTS
            .iter()
            .find(|s| s.matches(key, modifiers))
            .map(|s| s.command)
    }
}
