//! Key handling.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks the application to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Exit the application.
    Quit,
    /// Start a new fetch cycle.
    Refresh,
    /// Select the previous card.
    SelectPrevious,
    /// Select the next card.
    SelectNext,
    /// Select the first card.
    SelectFirst,
    /// Select the last card.
    SelectLast,
    /// Drop the selected card's cached image verdict and resolve again.
    RecheckImage,
    /// Key has no binding.
    Ignored,
}

/// Maps terminal key events to [`KeyAction`]s.
pub struct EventHandler;

impl EventHandler {
    /// Checks if key is a quit event.
    #[must_use]
    pub fn is_quit_event(key: &KeyEvent) -> bool {
        matches!(
            key,
            KeyEvent {
                code: KeyCode::Char('q'),
                modifiers: KeyModifiers::NONE,
                ..
            } | KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } | KeyEvent {
                code: KeyCode::Esc,
                modifiers: KeyModifiers::NONE,
                ..
            }
        )
    }

    /// Returns the action bound to `key`.
    ///
    /// Release and repeat events are ignored.
    #[must_use]
    pub fn map_key(key: &KeyEvent) -> KeyAction {
        if key.kind != KeyEventKind::Press {
            return KeyAction::Ignored;
        }
        if Self::is_quit_event(key) {
            return KeyAction::Quit;
        }

        match key.code {
            KeyCode::Char('r') => KeyAction::Refresh,
            KeyCode::Char('i') => KeyAction::RecheckImage,
            KeyCode::Up | KeyCode::Char('k') => KeyAction::SelectPrevious,
            KeyCode::Down | KeyCode::Char('j') => KeyAction::SelectNext,
            KeyCode::Home | KeyCode::Char('g') => KeyAction::SelectFirst,
            KeyCode::End | KeyCode::Char('G') => KeyAction::SelectLast,
            _ => KeyAction::Ignored,
        }
    }
}
