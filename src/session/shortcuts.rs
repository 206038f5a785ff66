use crate::domain::ToolKind;
use crate::session::messages::{InputEvent, Key, KeyInput, NamedKey};
use crate::session::state::Session;

/// Translate a key press into a session input
///
/// While a text entry is open, plain keys type into it. Otherwise single
/// letters pick tools, Ctrl+Z undoes and Escape first drops the tool, then
/// the whole selection.
pub fn handle_key_event(session: &Session, input: &KeyInput) -> Option<InputEvent> {
    let typing = session.tools().active_text().is_some();

    match &input.key {
        // Undo works everywhere
        Key::Character(c) if c.eq_ignore_ascii_case("z") && input.ctrl => Some(InputEvent::Undo),
        Key::Named(NamedKey::Escape) if session.tools().kind().is_some() => {
            Some(InputEvent::SelectTool { tool: None })
        }
        Key::Named(NamedKey::Escape) => Some(InputEvent::Reset),
        // Text entry editing
        Key::Named(NamedKey::Backspace) if typing => Some(InputEvent::Backspace),
        Key::Named(NamedKey::Enter) if typing => Some(InputEvent::Text {
            text: "\n".to_string(),
        }),
        Key::Character(c) if typing && !input.ctrl => Some(InputEvent::Text { text: c.clone() }),
        // Tool selection (requires a region)
        Key::Character(c) if !input.ctrl && session.region_model().region().is_some() => {
            tool_for_key(c, input.shift).map(|tool| InputEvent::SelectTool { tool: Some(tool) })
        }
        _ => None,
    }
}

fn tool_for_key(c: &str, shift: bool) -> Option<ToolKind> {
    match c.to_ascii_lowercase().as_str() {
        "p" => Some(ToolKind::Pen),
        "m" => Some(ToolKind::Marker),
        "l" => Some(ToolKind::Line),
        "a" => Some(ToolKind::Arrow),
        // Shift+R: filled rectangle
        "r" if shift => Some(ToolKind::RectangleFilled),
        "r" => Some(ToolKind::RectangleOutline),
        "b" => Some(ToolKind::RectangleBlurred),
        "t" => Some(ToolKind::Text),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SnapInkConfig;
    use crate::domain::Point;
    use crate::session::messages::PointerButton;
    use image::RgbaImage;
    use std::time::Instant;

    fn session_with_region() -> Session {
        let mut session = Session::new(RgbaImage::new(200, 200), SnapInkConfig::default());
        session.pointer_down(Point::new(10.0, 10.0), PointerButton::Primary, Instant::now());
        session.pointer_move(Point::new(100.0, 100.0), true);
        session.pointer_up(Point::new(100.0, 100.0), PointerButton::Primary);
        session
    }

    #[test]
    fn test_tool_keys_need_region() {
        let empty = Session::new(RgbaImage::new(10, 10), SnapInkConfig::default());
        assert_eq!(handle_key_event(&empty, &KeyInput::character("a")), None);

        let session = session_with_region();
        assert_eq!(
            handle_key_event(&session, &KeyInput::character("a")),
            Some(InputEvent::SelectTool {
                tool: Some(ToolKind::Arrow)
            })
        );
    }

    #[test]
    fn test_ctrl_z_is_undo() {
        let session = session_with_region();
        assert_eq!(
            handle_key_event(&session, &KeyInput::character("z").with_ctrl()),
            Some(InputEvent::Undo)
        );
    }

    #[test]
    fn test_escape_drops_tool_then_selection() {
        let mut session = session_with_region();
        session.select_tool(Some(ToolKind::Pen));
        let esc = KeyInput::named(NamedKey::Escape);
        assert_eq!(
            handle_key_event(&session, &esc),
            Some(InputEvent::SelectTool { tool: None })
        );
        session.select_tool(None);
        assert_eq!(handle_key_event(&session, &esc), Some(InputEvent::Reset));
    }

    #[test]
    fn test_letters_type_into_open_text_entry() {
        let mut session = session_with_region();
        session.select_tool(Some(ToolKind::Text));
        session.handle(InputEvent::down(20.0, 20.0, 1000));
        session.handle(InputEvent::up(20.0, 20.0));
        assert_eq!(
            handle_key_event(&session, &KeyInput::character("a")),
            Some(InputEvent::Text {
                text: "a".to_string()
            })
        );
        assert_eq!(
            handle_key_event(&session, &KeyInput::named(NamedKey::Backspace)),
            Some(InputEvent::Backspace)
        );
    }
}
