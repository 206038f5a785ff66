//! Drawable primitives for one frame of the canvas surface
//!
//! The surface draws the backdrop itself, then these primitives in order.

use crate::annotations::ActiveTool;
use crate::domain::{Annotation, Rect, RectangleMode, ResizeHandle};
use crate::region::label::SizeLabel;
use crate::render::geometry::chrome::{DIM_OPACITY, OUTLINE_DASH};
use crate::session::Session;

/// One item the canvas surface has to draw
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Black strip at `opacity` over part of the backdrop
    Dim { rect: Rect, opacity: f32 },
    /// Committed annotation
    Annotation(Annotation),
    /// Object still being drawn; dashed previews are drawn with `OUTLINE_DASH`
    Preview { annotation: Annotation, dashed: bool },
    /// Dashed border around the region
    Outline { rect: Rect, dash: [f32; 2] },
    /// Resize handle square
    Handle { handle: ResizeHandle, rect: Rect },
    /// Live size label while picking
    Label(SizeLabel),
}

/// Strips covering `outer` except `selection`
///
/// Top and bottom span the full width, left and right fill the gap between
/// them.
pub fn dim_strips(outer: Rect, selection: Rect, opacity: f32) -> Vec<Primitive> {
    let mut strips = Vec::with_capacity(4);
    let mut push = |rect: Rect| {
        if !rect.is_empty() {
            strips.push(Primitive::Dim { rect, opacity });
        }
    };

    // Top strip
    push(Rect::new(outer.left, outer.top, outer.width, selection.top - outer.top));
    // Bottom strip
    push(Rect::new(
        outer.left,
        selection.bottom(),
        outer.width,
        outer.bottom() - selection.bottom(),
    ));
    // Left strip (between top and bottom)
    push(Rect::new(
        outer.left,
        selection.top,
        selection.left - outer.left,
        selection.height,
    ));
    // Right strip (between top and bottom)
    push(Rect::new(
        selection.right(),
        selection.top,
        outer.right() - selection.right(),
        selection.height,
    ));

    strips
}

/// Everything the surface draws on top of the backdrop, back to front
pub fn frame_primitives(session: &Session) -> Vec<Primitive> {
    let region = session.region_model();
    let bounds = session.canvas().bounds();
    let mut out = Vec::new();

    match region.clip() {
        Some(clip) => out.extend(dim_strips(bounds, clip, DIM_OPACITY)),
        None => out.push(Primitive::Dim {
            rect: bounds,
            opacity: DIM_OPACITY,
        }),
    }

    out.extend(session.annotations().iter().cloned().map(Primitive::Annotation));

    if let Some(active) = session.tools().active() {
        let dashed = match active {
            ActiveTool::Box(draw) => draw.mode() == RectangleMode::Blurred,
            ActiveTool::Text(_) => true,
            _ => false,
        };
        out.extend(
            active
                .preview()
                .into_iter()
                .map(|annotation| Primitive::Preview { annotation, dashed }),
        );
    }

    if let Some(rect) = region.region().filter(|r| !r.is_empty()) {
        out.push(Primitive::Outline {
            rect,
            dash: OUTLINE_DASH,
        });
        if region.overlay().is_visible() {
            out.extend(
                region
                    .overlay()
                    .squares()
                    .into_iter()
                    .map(|(handle, rect)| Primitive::Handle { handle, rect }),
            );
        }
    }

    if let Some(label) = region.label() {
        out.push(Primitive::Label(label.clone()));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SnapInkConfig;
    use crate::domain::{Point, ToolKind};
    use crate::session::PointerButton;
    use image::RgbaImage;
    use std::time::Instant;

    fn session() -> Session {
        Session::new(RgbaImage::new(800, 600), SnapInkConfig::default())
    }

    fn press(s: &mut Session, x: f64, y: f64) {
        s.pointer_down(Point::new(x, y), PointerButton::Primary, Instant::now());
    }

    fn release(s: &mut Session, x: f64, y: f64) {
        s.pointer_up(Point::new(x, y), PointerButton::Primary);
    }

    fn tags(primitives: &[Primitive]) -> Vec<&'static str> {
        primitives
            .iter()
            .map(|p| match p {
                Primitive::Dim { .. } => "dim",
                Primitive::Annotation(_) => "annotation",
                Primitive::Preview { .. } => "preview",
                Primitive::Outline { .. } => "outline",
                Primitive::Handle { .. } => "handle",
                Primitive::Label(_) => "label",
            })
            .collect()
    }

    #[test]
    fn test_empty_session_is_fully_dimmed() {
        let s = session();
        assert_eq!(
            frame_primitives(&s),
            vec![Primitive::Dim {
                rect: Rect::new(0.0, 0.0, 800.0, 600.0),
                opacity: DIM_OPACITY,
            }]
        );
    }

    #[test]
    fn test_primitives_are_back_to_front() {
        let mut s = session();
        press(&mut s, 100.0, 100.0);
        s.pointer_move(Point::new(300.0, 250.0), true);
        release(&mut s, 300.0, 250.0);

        s.select_tool(Some(ToolKind::Line));
        press(&mut s, 110.0, 110.0);
        s.pointer_move(Point::new(200.0, 110.0), true);
        release(&mut s, 200.0, 110.0);

        s.select_tool(Some(ToolKind::RectangleBlurred));
        press(&mut s, 150.0, 150.0);
        s.pointer_move(Point::new(200.0, 200.0), true);

        let frame = frame_primitives(&s);
        let mut expected = vec!["dim"; 4];
        expected.extend(["annotation", "preview", "outline"]);
        expected.extend(["handle"; 8]);
        assert_eq!(tags(&frame), expected);

        assert!(matches!(
            &frame[4],
            Primitive::Annotation(Annotation::Segment(_))
        ));
        assert!(matches!(&frame[5], Primitive::Preview { dashed: true, .. }));
        assert_eq!(
            frame[6],
            Primitive::Outline {
                rect: Rect::new(100.0, 100.0, 200.0, 150.0),
                dash: OUTLINE_DASH,
            }
        );
    }

    #[test]
    fn test_pen_preview_is_solid() {
        let mut s = session();
        press(&mut s, 10.0, 10.0);
        s.pointer_move(Point::new(300.0, 300.0), true);
        release(&mut s, 300.0, 300.0);

        s.select_tool(Some(ToolKind::Pen));
        press(&mut s, 50.0, 50.0);
        s.pointer_move(Point::new(80.0, 60.0), true);

        let previews: Vec<_> = frame_primitives(&s)
            .into_iter()
            .filter(|p| matches!(p, Primitive::Preview { .. }))
            .collect();
        assert_eq!(previews.len(), 1);
        assert!(matches!(previews[0], Primitive::Preview { dashed: false, .. }));
    }

    #[test]
    fn test_label_only_while_picking_and_handles_hidden() {
        let mut s = session();
        press(&mut s, 100.0, 100.0);
        s.pointer_move(Point::new(200.0, 180.0), true);

        let frame = frame_primitives(&s);
        let tags = tags(&frame);
        assert!(!tags.contains(&"handle"));
        assert!(tags.contains(&"outline"));
        let Some(Primitive::Label(label)) = frame.last() else {
            panic!("label should be drawn last while picking");
        };
        assert_eq!(label.text, "100x80");

        release(&mut s, 200.0, 180.0);
        let frame = frame_primitives(&s);
        assert!(!frame.iter().any(|p| matches!(p, Primitive::Label(_))));
        assert_eq!(
            frame
                .iter()
                .filter(|p| matches!(p, Primitive::Handle { .. }))
                .count(),
            8
        );
    }

    #[test]
    fn test_dim_strips_tile_outside_selection() {
        let outer = Rect::new(0.0, 0.0, 100.0, 80.0);
        let selection = Rect::new(10.0, 20.0, 30.0, 40.0);
        let strips = dim_strips(outer, selection, 0.5);
        assert_eq!(strips.len(), 4);

        let area: f64 = strips
            .iter()
            .map(|p| match p {
                Primitive::Dim { rect, .. } => rect.width * rect.height,
                _ => 0.0,
            })
            .sum();
        assert_eq!(area, 100.0 * 80.0 - 30.0 * 40.0);
    }

    #[test]
    fn test_full_selection_has_no_strips() {
        let outer = Rect::new(0.0, 0.0, 100.0, 80.0);
        assert!(dim_strips(outer, outer, 0.5).is_empty());
    }
}
