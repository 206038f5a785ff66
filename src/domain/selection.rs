//! Resize handles around the selection region

use super::geometry::{Point, Rect};

/// Handle being dragged on the selection region
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeHandle {
    #[default]
    None,
    TopLeft,
    TopMid,
    TopRight,
    MidLeft,
    MidRight,
    BottomLeft,
    BottomMid,
    BottomRight,
}

/// Which edge of an axis a handle drags
///
/// `Start` is the left (x) or top (y) edge, `End` the right or bottom edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisSide {
    Start,
    End,
}

impl ResizeHandle {
    /// Hit-test order: corners first, then edge midpoints
    pub const ORDERED: [ResizeHandle; 8] = [
        ResizeHandle::TopLeft,
        ResizeHandle::TopRight,
        ResizeHandle::BottomRight,
        ResizeHandle::BottomLeft,
        ResizeHandle::TopMid,
        ResizeHandle::MidRight,
        ResizeHandle::BottomMid,
        ResizeHandle::MidLeft,
    ];

    /// Horizontal edge this handle drags, if any
    pub fn x_side(self) -> Option<AxisSide> {
        match self {
            ResizeHandle::TopLeft | ResizeHandle::MidLeft | ResizeHandle::BottomLeft => {
                Some(AxisSide::Start)
            }
            ResizeHandle::TopRight | ResizeHandle::MidRight | ResizeHandle::BottomRight => {
                Some(AxisSide::End)
            }
            _ => None,
        }
    }

    /// Vertical edge this handle drags, if any
    pub fn y_side(self) -> Option<AxisSide> {
        match self {
            ResizeHandle::TopLeft | ResizeHandle::TopMid | ResizeHandle::TopRight => {
                Some(AxisSide::Start)
            }
            ResizeHandle::BottomLeft | ResizeHandle::BottomMid | ResizeHandle::BottomRight => {
                Some(AxisSide::End)
            }
            _ => None,
        }
    }

    /// Rebuild a handle from its per-axis sides
    pub fn from_sides(x: Option<AxisSide>, y: Option<AxisSide>) -> Self {
        use AxisSide::{End, Start};
        match (x, y) {
            (Some(Start), Some(Start)) => ResizeHandle::TopLeft,
            (None, Some(Start)) => ResizeHandle::TopMid,
            (Some(End), Some(Start)) => ResizeHandle::TopRight,
            (Some(Start), None) => ResizeHandle::MidLeft,
            (Some(End), None) => ResizeHandle::MidRight,
            (Some(Start), Some(End)) => ResizeHandle::BottomLeft,
            (None, Some(End)) => ResizeHandle::BottomMid,
            (Some(End), Some(End)) => ResizeHandle::BottomRight,
            (None, None) => ResizeHandle::None,
        }
    }
}

/// The 8 handle anchor points of a region, in hit-test order
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HandleSet {
    pub anchors: [(ResizeHandle, Point); 8],
}

impl HandleSet {
    /// Derive the anchors from a region's bounds
    pub fn from_rect(rect: &Rect) -> Self {
        let (l, t, r, b) = (rect.left, rect.top, rect.right(), rect.bottom());
        let (cx, cy) = (l + rect.width / 2.0, t + rect.height / 2.0);
        let point_for = |handle: ResizeHandle| match handle {
            ResizeHandle::TopLeft => Point::new(l, t),
            ResizeHandle::TopRight => Point::new(r, t),
            ResizeHandle::BottomRight => Point::new(r, b),
            ResizeHandle::BottomLeft => Point::new(l, b),
            ResizeHandle::TopMid => Point::new(cx, t),
            ResizeHandle::MidRight => Point::new(r, cy),
            ResizeHandle::BottomMid => Point::new(cx, b),
            ResizeHandle::MidLeft => Point::new(l, cy),
            ResizeHandle::None => Point::new(cx, cy),
        };
        Self {
            anchors: ResizeHandle::ORDERED.map(|h| (h, point_for(h))),
        }
    }

    /// Anchor of a specific handle
    pub fn anchor(&self, handle: ResizeHandle) -> Option<Point> {
        self.anchors
            .iter()
            .find(|(h, _)| *h == handle)
            .map(|(_, p)| *p)
    }

    /// First handle within `tolerance` of `p`, or `ResizeHandle::None`
    pub fn hit(&self, p: Point, tolerance: f64) -> ResizeHandle {
        self.anchors
            .iter()
            .find(|(_, anchor)| anchor.distance(p) <= tolerance)
            .map(|(h, _)| *h)
            .unwrap_or(ResizeHandle::None)
    }
}
