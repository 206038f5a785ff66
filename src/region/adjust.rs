//! Move and resize math for the selection region
//!
//! Resizing tracks each dragged axis separately as a fixed edge and a
//! moving edge. When the moving edge passes the fixed one the axis flips
//! side, which is what turns a `MidLeft` drag into a `MidRight` drag once
//! the pointer crosses the region.

use std::time::{Duration, Instant};

use crate::domain::{AxisSide, CanvasSize, Point, Rect, ResizeHandle, clamp_axis};

/// One axis of a resize drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisDrag {
    fixed: f64,
    moving: f64,
    side: AxisSide,
}

impl AxisDrag {
    /// Start dragging the `side` edge of the span `[start, end]`
    pub fn new(side: AxisSide, start: f64, end: f64) -> Self {
        match side {
            AxisSide::Start => Self {
                fixed: end,
                moving: start,
                side,
            },
            AxisSide::End => Self {
                fixed: start,
                moving: end,
                side,
            },
        }
    }

    pub fn side(&self) -> AxisSide {
        self.side
    }

    /// Move the dragged edge by `delta`, keeping it inside `[0, extent]`
    ///
    /// Returns true when the edge crossed the fixed edge and the side
    /// flipped. Landing exactly on the fixed edge keeps the current side.
    pub fn shift(&mut self, delta: f64, extent: f64) -> bool {
        self.moving = clamp_axis(self.moving + delta, 0.0, extent);
        let side = if self.moving < self.fixed {
            AxisSide::Start
        } else if self.moving > self.fixed {
            AxisSide::End
        } else {
            self.side
        };
        let flipped = side != self.side;
        self.side = side;
        flipped
    }

    /// Normalized `(origin, size)` of the span
    pub fn span(&self) -> (f64, f64) {
        (self.fixed.min(self.moving), (self.moving - self.fixed).abs())
    }
}

/// State of a handle drag on the region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeDrag {
    x: Option<AxisDrag>,
    y: Option<AxisDrag>,
    base: Rect,
    last: Point,
}

impl ResizeDrag {
    pub fn new(handle: ResizeHandle, rect: Rect, press: Point) -> Self {
        Self {
            x: handle
                .x_side()
                .map(|side| AxisDrag::new(side, rect.left, rect.right())),
            y: handle
                .y_side()
                .map(|side| AxisDrag::new(side, rect.top, rect.bottom())),
            base: rect,
            last: press,
        }
    }

    /// Handle currently being dragged, after any flips
    pub fn handle(&self) -> ResizeHandle {
        ResizeHandle::from_sides(self.x.map(|a| a.side()), self.y.map(|a| a.side()))
    }

    /// Feed a pointer sample and return the candidate region
    ///
    /// The candidate is always normalized; whether it is large enough to be
    /// committed is the caller's decision.
    pub fn update(&mut self, p: Point, canvas: CanvasSize) -> Rect {
        let (dx, dy) = (p.x - self.last.x, p.y - self.last.y);
        self.last = p;

        if let Some(axis) = self.x.as_mut()
            && axis.shift(dx, canvas.width)
        {
            log::debug!("resize flipped horizontally to {:?}", axis.side());
        }
        if let Some(axis) = self.y.as_mut()
            && axis.shift(dy, canvas.height)
        {
            log::debug!("resize flipped vertically to {:?}", axis.side());
        }

        let (left, width) = self
            .x
            .map(|a| a.span())
            .unwrap_or((self.base.left, self.base.width));
        let (top, height) = self
            .y
            .map(|a| a.span())
            .unwrap_or((self.base.top, self.base.height));
        Rect::new(left, top, width, height)
    }
}

/// Translate `rect`, pinning edges at the canvas bounds
///
/// An edge that would leave the canvas stays on the boundary and the size
/// on that axis absorbs the rest of the delta.
pub fn translate_clamped(rect: Rect, dx: f64, dy: f64, canvas: CanvasSize) -> Rect {
    let (left, width) = translate_axis(rect.left, rect.width, dx, canvas.width);
    let (top, height) = translate_axis(rect.top, rect.height, dy, canvas.height);
    Rect::new(left, top, width, height)
}

fn translate_axis(start: f64, size: f64, delta: f64, extent: f64) -> (f64, f64) {
    let mut start = start + delta;
    let mut size = size;
    if start < 0.0 {
        size += start;
        start = 0.0;
    }
    if start + size > extent {
        size = extent - start;
    }
    (start, size)
}

/// Detects two presses within a time window
#[derive(Debug, Clone, Copy)]
pub struct DoubleClick {
    window: Duration,
    last_press: Option<Instant>,
}

impl DoubleClick {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_press: None,
        }
    }

    /// Register a press; true if it completes a double-click
    ///
    /// A completed double-click resets the detector, so a third quick press
    /// starts a new pair.
    pub fn press(&mut self, at: Instant) -> bool {
        let is_double = self
            .last_press
            .and_then(|prev| at.checked_duration_since(prev))
            .is_some_and(|gap| gap <= self.window);
        self.last_press = if is_double { None } else { Some(at) };
        is_double
    }

    pub fn reset(&mut self) {
        self.last_press = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANVAS: CanvasSize = CanvasSize::new(1000.0, 800.0);

    #[test]
    fn test_axis_drag_flips_when_crossing() {
        let mut axis = AxisDrag::new(AxisSide::Start, 100.0, 200.0);
        assert!(!axis.shift(50.0, 1000.0));
        assert_eq!(axis.span(), (150.0, 50.0));
        assert!(axis.shift(100.0, 1000.0));
        assert_eq!(axis.side(), AxisSide::End);
        assert_eq!(axis.span(), (200.0, 50.0));
    }

    #[test]
    fn test_axis_drag_exact_boundary_keeps_side() {
        let mut axis = AxisDrag::new(AxisSide::Start, 100.0, 200.0);
        assert!(!axis.shift(100.0, 1000.0));
        assert_eq!(axis.side(), AxisSide::Start);
        assert_eq!(axis.span(), (200.0, 0.0));
        // A zero delta at the boundary changes nothing either
        assert!(!axis.shift(0.0, 1000.0));
        assert_eq!(axis.side(), AxisSide::Start);
        // Any further step decides the side
        assert!(axis.shift(0.5, 1000.0));
        assert_eq!(axis.side(), AxisSide::End);
    }

    #[test]
    fn test_axis_drag_clamps_to_extent() {
        let mut axis = AxisDrag::new(AxisSide::End, 100.0, 200.0);
        axis.shift(5000.0, 1000.0);
        assert_eq!(axis.span(), (100.0, 900.0));
        axis.shift(-5000.0, 1000.0);
        assert_eq!(axis.span(), (0.0, 100.0));
        assert_eq!(axis.side(), AxisSide::Start);
    }

    #[test]
    fn test_corner_drag_never_produces_negative_size() {
        let rect = Rect::new(300.0, 300.0, 100.0, 100.0);
        let mut drag = ResizeDrag::new(ResizeHandle::BottomRight, rect, Point::new(400.0, 400.0));
        let mut p = Point::new(400.0, 400.0);
        let deltas = [
            (-30.0, -10.0),
            (-90.0, -5.0),
            (-1.0, -200.0),
            (250.0, 3.0),
            (-0.5, 400.0),
            (-700.0, -700.0),
            (0.0, 0.0),
        ];
        for (dx, dy) in deltas {
            p = p.offset(dx, dy);
            let r = drag.update(p, CANVAS);
            assert!(r.width >= 0.0 && r.height >= 0.0, "{r:?}");
            assert!(r.left >= 0.0 && r.top >= 0.0, "{r:?}");
            assert!(r.right() <= CANVAS.width && r.bottom() <= CANVAS.height, "{r:?}");
        }
    }

    #[test]
    fn test_corner_flips_both_axes_independently() {
        let rect = Rect::new(300.0, 300.0, 100.0, 100.0);
        let mut drag = ResizeDrag::new(ResizeHandle::TopLeft, rect, Point::new(300.0, 300.0));

        // Past the right edge only
        let r = drag.update(Point::new(450.0, 320.0), CANVAS);
        assert_eq!(drag.handle(), ResizeHandle::TopRight);
        assert_eq!(r, Rect::new(400.0, 320.0, 50.0, 80.0));

        // Then past the bottom edge as well
        let r = drag.update(Point::new(450.0, 430.0), CANVAS);
        assert_eq!(drag.handle(), ResizeHandle::BottomRight);
        assert_eq!(r, Rect::new(400.0, 400.0, 50.0, 30.0));
    }

    #[test]
    fn test_edge_handle_only_moves_its_axis() {
        let rect = Rect::new(100.0, 100.0, 200.0, 100.0);
        let mut drag = ResizeDrag::new(ResizeHandle::MidLeft, rect, Point::new(100.0, 150.0));
        let r = drag.update(Point::new(350.0, 400.0), CANVAS);
        assert_eq!(drag.handle(), ResizeHandle::MidRight);
        assert_eq!(r, Rect::new(300.0, 100.0, 50.0, 100.0));
    }

    #[test]
    fn test_translate_pins_edges() {
        let canvas = CanvasSize::new(200.0, 150.0);
        let r = Rect::new(10.0, 10.0, 50.0, 50.0);
        assert_eq!(translate_clamped(r, 20.0, 5.0, canvas), Rect::new(30.0, 15.0, 50.0, 50.0));
        // Pushing past the left edge shrinks the width
        assert_eq!(translate_clamped(r, -30.0, 0.0, canvas), Rect::new(0.0, 10.0, 30.0, 50.0));
        // Pushing past the bottom edge shrinks the height
        assert_eq!(translate_clamped(r, 0.0, 120.0, canvas), Rect::new(10.0, 130.0, 50.0, 20.0));
    }

    #[test]
    fn test_double_click_window() {
        let t0 = Instant::now();
        let mut dc = DoubleClick::new(Duration::from_millis(500));
        assert!(!dc.press(t0));
        assert!(dc.press(t0 + Duration::from_millis(100)));
        // Third press starts over
        assert!(!dc.press(t0 + Duration::from_millis(200)));
        assert!(!dc.press(t0 + Duration::from_millis(800)));
    }
}
