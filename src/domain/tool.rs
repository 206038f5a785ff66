//! Drawing tool identifiers

use serde::{Deserialize, Serialize};

/// Drawing tool selected from the toolbar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolKind {
    Pen,
    Marker,
    Line,
    Arrow,
    RectangleOutline,
    RectangleFilled,
    RectangleBlurred,
    Text,
}

/// Fill mode shared by the rectangle tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RectangleMode {
    #[default]
    Outline,
    Filled,
    Blurred,
}

impl ToolKind {
    /// Rectangle mode for the rectangle family
    pub fn rectangle_mode(self) -> Option<RectangleMode> {
        match self {
            ToolKind::RectangleOutline => Some(RectangleMode::Outline),
            ToolKind::RectangleFilled => Some(RectangleMode::Filled),
            ToolKind::RectangleBlurred => Some(RectangleMode::Blurred),
            _ => None,
        }
    }
}
