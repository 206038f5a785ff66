//! Input event types for an annotation session
//!
//! This module contains:
//! - Pointer buttons
//! - Keyboard input as delivered by the host window
//! - `InputEvent`, the serializable form of every session input

use serde::{Deserialize, Serialize};

use crate::config::ShapeColor;
use crate::domain::{Point, ToolKind};

// ============================================================================
// Pointer Types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    /// Left button; the only one that starts or ends gestures
    #[default]
    Primary,
    Secondary,
    Middle,
}

// ============================================================================
// Keyboard Types
// ============================================================================

/// Non-character keys the session reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedKey {
    Escape,
    Backspace,
    Enter,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Character(String),
    Named(NamedKey),
}

/// Key press with modifier state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyInput {
    pub key: Key,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub shift: bool,
}

impl KeyInput {
    pub fn character(c: &str) -> Self {
        Self {
            key: Key::Character(c.to_string()),
            ctrl: false,
            shift: false,
        }
    }

    pub fn named(key: NamedKey) -> Self {
        Self {
            key: Key::Named(key),
            ctrl: false,
            shift: false,
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }
}

// ============================================================================
// Session Input
// ============================================================================

/// Every input a session accepts
///
/// Pointer-down carries its time as milliseconds since the session started
/// so recorded scripts replay with the same double-click timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    PointerDown {
        point: Point,
        #[serde(default)]
        button: PointerButton,
        #[serde(default)]
        at_ms: u64,
    },
    PointerMove {
        point: Point,
        /// Primary button held during the motion
        #[serde(default = "default_held")]
        held: bool,
    },
    PointerUp {
        point: Point,
        #[serde(default)]
        button: PointerButton,
    },
    /// Wheel notches; positive grows the size
    Wheel { delta: f32 },
    SelectTool { tool: Option<ToolKind> },
    SetColor { color: ShapeColor },
    SetSize { size: f32 },
    Undo,
    /// Typed text for an open text entry
    Text { text: String },
    Backspace,
    Key(KeyInput),
    /// Drop the region and every annotation
    Reset,
}

fn default_held() -> bool {
    true
}

impl InputEvent {
    pub fn down(x: f64, y: f64, at_ms: u64) -> Self {
        InputEvent::PointerDown {
            point: Point::new(x, y),
            button: PointerButton::Primary,
            at_ms,
        }
    }

    pub fn drag(x: f64, y: f64) -> Self {
        InputEvent::PointerMove {
            point: Point::new(x, y),
            held: true,
        }
    }

    pub fn hover(x: f64, y: f64) -> Self {
        InputEvent::PointerMove {
            point: Point::new(x, y),
            held: false,
        }
    }

    pub fn up(x: f64, y: f64) -> Self {
        InputEvent::PointerUp {
            point: Point::new(x, y),
            button: PointerButton::Primary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_event_defaults() {
        let events: Vec<InputEvent> = serde_json::from_str(
            r#"[
                {"type": "pointer_down", "point": {"x": 1.0, "y": 2.0}},
                {"type": "pointer_move", "point": {"x": 3.0, "y": 4.0}},
                {"type": "select_tool", "tool": "Arrow"},
                {"type": "undo"},
                {"type": "key", "key": {"named": "escape"}}
            ]"#,
        )
        .unwrap();
        assert_eq!(events[0], InputEvent::down(1.0, 2.0, 0));
        assert_eq!(events[1], InputEvent::drag(3.0, 4.0));
        assert_eq!(
            events[2],
            InputEvent::SelectTool {
                tool: Some(ToolKind::Arrow)
            }
        );
        assert_eq!(events[3], InputEvent::Undo);
        assert_eq!(events[4], InputEvent::Key(KeyInput::named(NamedKey::Escape)));
    }
}
