/// Decoded input events, in screen coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Key press
    Key { key: Key, modifiers: Modifiers },
    /// Mouse button pressed
    Press { x: i32, y: i32, button: MouseButton },
    /// Mouse moved with a button held
    Drag { x: i32, y: i32, button: MouseButton },
    /// Mouse button released
    Release { x: i32, y: i32, button: MouseButton },
    /// Mouse wheel
    Scroll {
        x: i32,
        y: i32,
        delta_x: i32,
        delta_y: i32,
    },
    /// The widget gained focus
    Focus,
    /// The widget lost focus
    Blur,
}

impl Event {
    pub fn key(key: Key) -> Self {
        Event::Key {
            key,
            modifiers: Modifiers::default(),
        }
    }

    pub fn press(x: i32, y: i32) -> Self {
        Event::Press {
            x,
            y,
            button: MouseButton::Left,
        }
    }

    pub fn drag(x: i32, y: i32) -> Self {
        Event::Drag {
            x,
            y,
            button: MouseButton::Left,
        }
    }

    pub fn release(x: i32, y: i32) -> Self {
        Event::Release {
            x,
            y,
            button: MouseButton::Left,
        }
    }

    /// Convert a crossterm mouse event. Plain motion is not reported.
    pub fn from_mouse(event: crossterm::event::MouseEvent) -> Option<Self> {
        use crossterm::event::MouseEventKind;

        let x = event.column as i32;
        let y = event.row as i32;
        match event.kind {
            MouseEventKind::Down(button) => Some(Event::Press {
                x,
                y,
                button: button.into(),
            }),
            MouseEventKind::Drag(button) => Some(Event::Drag {
                x,
                y,
                button: button.into(),
            }),
            MouseEventKind::Up(button) => Some(Event::Release {
                x,
                y,
                button: button.into(),
            }),
            MouseEventKind::ScrollUp => Some(Event::Scroll {
                x,
                y,
                delta_x: 0,
                delta_y: -1,
            }),
            MouseEventKind::ScrollDown => Some(Event::Scroll {
                x,
                y,
                delta_x: 0,
                delta_y: 1,
            }),
            MouseEventKind::ScrollLeft => Some(Event::Scroll {
                x,
                y,
                delta_x: -1,
                delta_y: 0,
            }),
            MouseEventKind::ScrollRight => Some(Event::Scroll {
                x,
                y,
                delta_x: 1,
                delta_y: 0,
            }),
            MouseEventKind::Moved => None,
        }
    }
}

/// Result of handling an event or a resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Not handled, keep propagating.
    Ignored,
    /// Handled, stop propagation.
    Consumed,
}

impl EventResult {
    pub fn is_handled(&self) -> bool {
        matches!(self, EventResult::Consumed)
    }
}

impl From<bool> for EventResult {
    fn from(handled: bool) -> Self {
        if handled {
            EventResult::Consumed
        } else {
            EventResult::Ignored
        }
    }
}

/// Simplified key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    F(u8),
}

/// Key modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn none(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt
    }
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

// Conversion from crossterm types
impl From<crossterm::event::KeyCode> for Key {
    fn from(code: crossterm::event::KeyCode) -> Self {
        use crossterm::event::KeyCode;
        match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Esc => Key::Escape,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::Insert => Key::Insert,
            KeyCode::F(n) => Key::F(n),
            _ => Key::Char('\0'),
        }
    }
}

impl From<crossterm::event::KeyModifiers> for Modifiers {
    fn from(mods: crossterm::event::KeyModifiers) -> Self {
        use crossterm::event::KeyModifiers;
        Self {
            shift: mods.contains(KeyModifiers::SHIFT),
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
        }
    }
}

impl From<crossterm::event::MouseButton> for MouseButton {
    fn from(btn: crossterm::event::MouseButton) -> Self {
        use crossterm::event::MouseButton as CtBtn;
        match btn {
            CtBtn::Left => MouseButton::Left,
            CtBtn::Right => MouseButton::Right,
            CtBtn::Middle => MouseButton::Middle,
        }
    }
}
