//! Terminal-independent input events. Handlers only ever see these types,
//! so tests drive the app without a terminal.

use crossterm::event::{
    KeyCode, KeyEvent as CrosstermKeyEvent, KeyModifiers, MouseButton,
    MouseEvent as CrosstermMouseEvent, MouseEventKind,
};

/// Keys the dashboard binds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Esc,
    Tab,
    BackTab,
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Home,
    End,
}

impl Key {
    /// `None` for keys nothing is bound to (function keys, media keys...)
    pub fn from_code(code: KeyCode) -> Option<Self> {
        let key = match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Esc,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            _ => return None,
        };
        Some(key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
        }
    }

    pub fn with_ctrl(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers {
                ctrl: true,
                ..Default::default()
            },
        }
    }

    pub fn from_crossterm(event: CrosstermKeyEvent) -> Option<Self> {
        let key = Key::from_code(event.code)?;
        Some(Self {
            key,
            modifiers: Modifiers {
                ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
                alt: event.modifiers.contains(KeyModifiers::ALT),
                shift: event.modifiers.contains(KeyModifiers::SHIFT),
            },
        })
    }
}

/// Left click at a terminal position. Other mouse activity is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseClick {
    pub column: u16,
    pub row: u16,
}

impl MouseClick {
    pub fn new(column: u16, row: u16) -> Self {
        Self { column, row }
    }

    pub fn from_crossterm(event: CrosstermMouseEvent) -> Option<Self> {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(Self::new(event.column, event.row)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ctrl_modifier_carried_over() {
        let event = CrosstermKeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(
            KeyEvent::from_crossterm(event),
            Some(KeyEvent::with_ctrl(Key::Char('c')))
        );
    }

    #[test]
    fn test_unbound_keys_are_dropped() {
        let event = CrosstermKeyEvent::new(KeyCode::F(5), KeyModifiers::NONE);
        assert_eq!(KeyEvent::from_crossterm(event), None);
        assert_eq!(Key::from_code(KeyCode::Backspace), None);
    }

    #[test]
    fn test_only_left_press_is_a_click() {
        let mouse = |kind| CrosstermMouseEvent {
            kind,
            column: 7,
            row: 3,
            modifiers: KeyModifiers::NONE,
        };

        assert_eq!(
            MouseClick::from_crossterm(mouse(MouseEventKind::Down(MouseButton::Left))),
            Some(MouseClick::new(7, 3))
        );
        assert_eq!(
            MouseClick::from_crossterm(mouse(MouseEventKind::Down(MouseButton::Right))),
            None
        );
        assert_eq!(MouseClick::from_crossterm(mouse(MouseEventKind::Moved)), None);
    }
}
