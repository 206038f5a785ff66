//! Pointer dispatch for the selected drawing tool
//!
//! Routes begin/update/commit to the in-progress object of the selected
//! tool. Text is click/click: the first press opens an entry and the next
//! press commits it.

use super::tools::{BoxDraw, CommitContext, Freehand, FreehandKind, LineDraw, TextEntry, ToolContext};
use crate::domain::{Annotation, Point, ToolKind};

/// Object being drawn by the selected tool
#[derive(Debug, Clone, PartialEq)]
pub enum ActiveTool {
    Freehand(Freehand),
    Line(LineDraw),
    Box(BoxDraw),
    Text(TextEntry),
}

impl ActiveTool {
    /// Start the object `kind` draws at `p`
    pub fn begin(kind: ToolKind, p: Point, ctx: &ToolContext) -> Self {
        match kind {
            ToolKind::Pen => ActiveTool::Freehand(Freehand::begin(FreehandKind::Pen, p, ctx)),
            ToolKind::Marker => ActiveTool::Freehand(Freehand::begin(FreehandKind::Marker, p, ctx)),
            ToolKind::Line => ActiveTool::Line(LineDraw::line(p, ctx)),
            ToolKind::Arrow => ActiveTool::Line(LineDraw::arrow(p, ctx)),
            ToolKind::RectangleOutline | ToolKind::RectangleFilled | ToolKind::RectangleBlurred => {
                let mode = kind.rectangle_mode().unwrap_or_default();
                ActiveTool::Box(BoxDraw::begin(mode, p, ctx))
            }
            ToolKind::Text => ActiveTool::Text(TextEntry::begin(p, ctx)),
        }
    }

    pub fn update(&mut self, p: Point) {
        match self {
            ActiveTool::Freehand(f) => f.update(p),
            ActiveTool::Line(l) => l.update(p),
            ActiveTool::Box(b) => b.update(p),
            ActiveTool::Text(_) => {}
        }
    }

    pub fn commit(self, cx: &CommitContext<'_>) -> Vec<Annotation> {
        match self {
            ActiveTool::Freehand(f) => f.commit(),
            ActiveTool::Line(l) => l.commit(),
            ActiveTool::Box(b) => b.commit(cx),
            ActiveTool::Text(t) => t.commit(),
        }
    }

    /// Annotations showing the object as it currently stands
    pub fn preview(&self) -> Vec<Annotation> {
        match self {
            ActiveTool::Freehand(f) => vec![Annotation::Stroke(f.preview())],
            ActiveTool::Line(l) => l.preview(),
            ActiveTool::Box(b) => vec![Annotation::Box(b.preview())],
            ActiveTool::Text(t) => vec![Annotation::Text(t.preview())],
        }
    }
}

/// Selected tool plus whatever it is drawing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolHandler {
    kind: Option<ToolKind>,
    active: Option<ActiveTool>,
}

impl ToolHandler {
    pub fn kind(&self) -> Option<ToolKind> {
        self.kind
    }

    pub fn active(&self) -> Option<&ActiveTool> {
        self.active.as_ref()
    }

    /// True while a pointer gesture is drawing something
    ///
    /// An open text entry is not a gesture; it waits for the next press.
    pub fn is_drawing(&self) -> bool {
        matches!(
            self.active,
            Some(ActiveTool::Freehand(_) | ActiveTool::Line(_) | ActiveTool::Box(_))
        )
    }

    pub fn active_text(&self) -> Option<&TextEntry> {
        match self.active.as_ref() {
            Some(ActiveTool::Text(entry)) => Some(entry),
            _ => None,
        }
    }

    pub fn text_entry_mut(&mut self) -> Option<&mut TextEntry> {
        match self.active.as_mut() {
            Some(ActiveTool::Text(entry)) => Some(entry),
            _ => None,
        }
    }

    /// Switch tools, abandoning anything in progress
    ///
    /// The one exception is the rectangle family: outline, filled and
    /// blurred share a single drawing state, so moving between them keeps
    /// the rectangle under the pointer and only changes its mode.
    pub fn select(&mut self, kind: Option<ToolKind>) {
        if let (Some(ActiveTool::Box(draw)), Some(mode)) =
            (self.active.as_mut(), kind.and_then(ToolKind::rectangle_mode))
        {
            draw.set_mode(mode);
            self.kind = kind;
            return;
        }
        if self.kind != kind
            && let Some(active) = self.active.take()
        {
            log::debug!("abandoning in-progress {}", active_name(&active));
        }
        self.kind = kind;
    }

    /// Primary press; may commit an open text entry
    pub fn pointer_down(&mut self, p: Point, ctx: &ToolContext) -> Vec<Annotation> {
        let Some(kind) = self.kind else {
            return Vec::new();
        };
        if self.is_drawing() {
            log::debug!("ignoring press during an active {:?} gesture", kind);
            return Vec::new();
        }
        if let Some(ActiveTool::Text(entry)) = self.active.take() {
            return entry.commit();
        }
        self.active = Some(ActiveTool::begin(kind, p, ctx));
        if let Some(tool) = &self.active {
            log::trace!("began {}", active_name(tool));
        }
        Vec::new()
    }

    /// Pointer motion with the primary button held
    pub fn pointer_move(&mut self, p: Point) {
        if let Some(active) = self.active.as_mut() {
            active.update(p);
        }
    }

    /// Primary release; commits everything but text
    pub fn pointer_up(&mut self, cx: &CommitContext<'_>) -> Vec<Annotation> {
        if !self.is_drawing() {
            return Vec::new();
        }
        self.active
            .take()
            .map(|active| active.commit(cx))
            .unwrap_or_default()
    }

    /// Drop the in-progress object and the tool selection
    pub fn clear(&mut self) {
        self.kind = None;
        self.active = None;
    }
}

fn active_name(active: &ActiveTool) -> &'static str {
    match active {
        ActiveTool::Freehand(_) => "freehand stroke",
        ActiveTool::Line(l) if l.is_arrow() => "arrow",
        ActiveTool::Line(_) => "line",
        ActiveTool::Box(_) => "rectangle",
        ActiveTool::Text(_) => "text entry",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations::list::AnnotationList;
    use crate::config::{ShapeColor, SnapInkConfig};
    use crate::domain::RectangleMode;
    use image::RgbaImage;

    fn ctx() -> ToolContext {
        ToolContext::new(&SnapInkConfig::default(), ShapeColor::BLACK, 0.0)
    }

    #[test]
    fn test_line_gesture_commits_on_release() {
        let backdrop = RgbaImage::new(50, 50);
        let list = AnnotationList::new();
        let cx = CommitContext {
            backdrop: &backdrop,
            annotations: &list,
        };
        let mut handler = ToolHandler::default();
        handler.select(Some(ToolKind::Line));
        assert!(handler.pointer_down(Point::new(1.0, 1.0), &ctx()).is_empty());
        assert!(handler.is_drawing());
        handler.pointer_move(Point::new(20.0, 20.0));
        let committed = handler.pointer_up(&cx);
        assert_eq!(committed.len(), 1);
        assert!(!handler.is_drawing());
    }

    #[test]
    fn test_switching_tool_abandons_object() {
        let mut handler = ToolHandler::default();
        handler.select(Some(ToolKind::Pen));
        let backdrop = RgbaImage::new(10, 10);
        let list = AnnotationList::new();
        let cx = CommitContext {
            backdrop: &backdrop,
            annotations: &list,
        };
        handler.pointer_down(Point::new(1.0, 1.0), &ctx());
        handler.select(Some(ToolKind::Line));
        assert!(handler.active().is_none());
        assert!(handler.pointer_up(&cx).is_empty());
    }

    #[test]
    fn test_rectangle_mode_switch_keeps_object() {
        let mut handler = ToolHandler::default();
        handler.select(Some(ToolKind::RectangleOutline));
        handler.pointer_down(Point::new(1.0, 1.0), &ctx());
        handler.select(Some(ToolKind::RectangleFilled));
        let Some(ActiveTool::Box(draw)) = handler.active() else {
            panic!("rectangle should survive a mode switch");
        };
        assert_eq!(draw.mode(), RectangleMode::Filled);
    }

    #[test]
    fn test_text_is_click_click() {
        let mut handler = ToolHandler::default();
        handler.select(Some(ToolKind::Text));
        let backdrop = RgbaImage::new(10, 10);
        let list = AnnotationList::new();
        let cx = CommitContext {
            backdrop: &backdrop,
            annotations: &list,
        };
        assert!(handler.pointer_down(Point::new(3.0, 4.0), &ctx()).is_empty());
        assert!(handler.pointer_up(&cx).is_empty());
        handler.text_entry_mut().unwrap().push_str("note");

        let committed = handler.pointer_down(Point::new(90.0, 90.0), &ctx());
        let [Annotation::Text(text)] = committed.as_slice() else {
            panic!("expected a text block, got {committed:?}");
        };
        assert_eq!(text.anchor, Point::new(3.0, 4.0));
        assert_eq!(text.content, "note");
        assert!(handler.active().is_none());
    }
}
