use enigo::{Button, Coordinate, Direction, Enigo, Key, Keyboard, Mouse, Settings};
use tracing::debug;

use crate::error::DeviceError;

/// Input-device synthesis primitives. Calls are blocking and not interruptible.
pub trait InputDevice {
    fn move_cursor(&mut self, x: i32, y: i32) -> Result<(), DeviceError>;
    fn click_primary(&mut self) -> Result<(), DeviceError>;
    fn type_text(&mut self, text: &str) -> Result<(), DeviceError>;
    /// Press `keys` in order as one chord, then release them in reverse.
    fn key_chord(&mut self, keys: &[String]) -> Result<(), DeviceError>;
}

/// Platform-independent key names accepted in `keyboard_shortcut` actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyName {
    Control,
    Meta,
    Alt,
    Shift,
    Enter,
    Tab,
    Escape,
    Space,
    Backspace,
    Delete,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
    Char(char),
}

impl KeyName {
    pub fn parse(name: &str) -> Option<Self> {
        let lower = name.trim().to_ascii_lowercase();
        let key = match lower.as_str() {
            "ctrl" | "control" => KeyName::Control,
            "cmd" | "command" | "meta" | "super" | "win" => KeyName::Meta,
            "alt" | "option" => KeyName::Alt,
            "shift" => KeyName::Shift,
            "enter" | "return" => KeyName::Enter,
            "tab" => KeyName::Tab,
            "esc" | "escape" => KeyName::Escape,
            "space" => KeyName::Space,
            "backspace" => KeyName::Backspace,
            "delete" | "del" => KeyName::Delete,
            "up" => KeyName::Up,
            "down" => KeyName::Down,
            "left" => KeyName::Left,
            "right" => KeyName::Right,
            "home" => KeyName::Home,
            "end" => KeyName::End,
            "pageup" => KeyName::PageUp,
            "pagedown" => KeyName::PageDown,
            other => {
                if let Some(n) = other.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                    if (1..=12).contains(&n) {
                        return Some(KeyName::F(n));
                    }
                }
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyName::Char(c),
                    _ => return None,
                }
            }
        };
        Some(key)
    }

    fn to_enigo(self) -> Key {
        match self {
            KeyName::Control => Key::Control,
            KeyName::Meta => Key::Meta,
            KeyName::Alt => Key::Alt,
            KeyName::Shift => Key::Shift,
            KeyName::Enter => Key::Return,
            KeyName::Tab => Key::Tab,
            KeyName::Escape => Key::Escape,
            KeyName::Space => Key::Space,
            KeyName::Backspace => Key::Backspace,
            KeyName::Delete => Key::Delete,
            KeyName::Up => Key::UpArrow,
            KeyName::Down => Key::DownArrow,
            KeyName::Left => Key::LeftArrow,
            KeyName::Right => Key::RightArrow,
            KeyName::Home => Key::Home,
            KeyName::End => Key::End,
            KeyName::PageUp => Key::PageUp,
            KeyName::PageDown => Key::PageDown,
            KeyName::F(n) => match n {
                1 => Key::F1,
                2 => Key::F2,
                3 => Key::F3,
                4 => Key::F4,
                5 => Key::F5,
                6 => Key::F6,
                7 => Key::F7,
                8 => Key::F8,
                9 => Key::F9,
                10 => Key::F10,
                11 => Key::F11,
                _ => Key::F12,
            },
            KeyName::Char(c) => Key::Unicode(c),
        }
    }
}

/// Real desktop input via `enigo`.
pub struct EnigoDevice {
    enigo: Enigo,
}

impl EnigoDevice {
    pub fn new() -> Result<Self, DeviceError> {
        let enigo = Enigo::new(&Settings::default())
            .map_err(|e| DeviceError::Unavailable(e.to_string()))?;
        Ok(Self { enigo })
    }
}

fn synth<E: std::fmt::Display>(err: E) -> DeviceError {
    DeviceError::Synthesis(err.to_string())
}

impl InputDevice for EnigoDevice {
    fn move_cursor(&mut self, x: i32, y: i32) -> Result<(), DeviceError> {
        self.enigo.move_mouse(x, y, Coordinate::Abs).map_err(synth)
    }

    fn click_primary(&mut self) -> Result<(), DeviceError> {
        self.enigo.button(Button::Left, Direction::Click).map_err(synth)
    }

    fn type_text(&mut self, text: &str) -> Result<(), DeviceError> {
        self.enigo.text(text).map_err(synth)
    }

    fn key_chord(&mut self, keys: &[String]) -> Result<(), DeviceError> {
        // Resolve every name first so an unknown key presses nothing.
        let resolved = keys
            .iter()
            .map(|k| KeyName::parse(k).ok_or_else(|| DeviceError::UnsupportedKey(k.clone())))
            .collect::<Result<Vec<_>, _>>()?;

        let mut pressed = Vec::with_capacity(resolved.len());
        let mut result = Ok(());
        for key in &resolved {
            debug!("Pressing {:?}", key);
            if let Err(e) = self.enigo.key(key.to_enigo(), Direction::Press) {
                result = Err(synth(e));
                break;
            }
            pressed.push(*key);
        }
        // Always release what went down, even after a failed press.
        for key in pressed.iter().rev() {
            if let Err(e) = self.enigo.key(key.to_enigo(), Direction::Release) {
                if result.is_ok() {
                    result = Err(synth(e));
                }
            }
        }
        result
    }
}
