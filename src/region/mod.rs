//! Selection region model
//!
//! This module contains:
//! - Picking a new region by dragging from an anchor
//! - Moving and resizing an existing region, with handle flips
//! - Double-click snapping to the full canvas
//! - The size label and handle overlay that follow the region

pub mod adjust;
pub mod label;
pub mod overlay;

use std::time::{Duration, Instant};

use crate::config::SnapInkConfig;
use crate::domain::{CanvasSize, Point, Rect, ResizeHandle};
use adjust::{DoubleClick, ResizeDrag, translate_clamped};
use label::SizeLabel;
use overlay::HandleOverlay;

/// Thresholds used while manipulating the region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionLimits {
    pub handle_tolerance: f64,
    pub double_click: Duration,
    pub min_move_size: f64,
    pub min_resize_size: f64,
}

impl Default for RegionLimits {
    fn default() -> Self {
        Self::from(&SnapInkConfig::default())
    }
}

impl From<&SnapInkConfig> for RegionLimits {
    fn from(config: &SnapInkConfig) -> Self {
        Self {
            handle_tolerance: config.handle_tolerance,
            double_click: Duration::from_millis(config.double_click_ms),
            min_move_size: config.min_move_size,
            min_resize_size: config.min_resize_size,
        }
    }
}

/// Something that follows every accepted region change
pub trait RegionObserver {
    fn region_changed(&mut self, region: &Rect);
}

/// Part of the canvas shown at full brightness
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipRegion {
    canvas: CanvasSize,
    rect: Option<Rect>,
}

impl ClipRegion {
    pub fn new(canvas: CanvasSize) -> Self {
        Self { canvas, rect: None }
    }

    pub fn rect(&self) -> Option<Rect> {
        self.rect
    }
}

impl RegionObserver for ClipRegion {
    fn region_changed(&mut self, region: &Rect) {
        self.rect = region.intersect(self.canvas.bounds());
    }
}

impl RegionObserver for HandleOverlay {
    fn region_changed(&mut self, region: &Rect) {
        self.track(region);
    }
}

/// Gesture currently applied to the region
#[derive(Debug, Clone, Copy, PartialEq)]
enum Gesture {
    Idle,
    Picking { anchor: Point },
    Moving { last: Point },
    Resizing(ResizeDrag),
    /// Double-click snapped the region; the rest of the gesture is ignored
    Snapped,
}

/// The picked rectangle and everything that tracks it
#[derive(Debug, Clone)]
pub struct RegionModel {
    canvas: CanvasSize,
    limits: RegionLimits,
    region: Option<Rect>,
    clip: ClipRegion,
    overlay: HandleOverlay,
    label: Option<SizeLabel>,
    gesture: Gesture,
    double_click: DoubleClick,
}

impl RegionModel {
    pub fn new(canvas: CanvasSize, limits: RegionLimits) -> Self {
        Self {
            canvas,
            limits,
            region: None,
            clip: ClipRegion::new(canvas),
            overlay: HandleOverlay::default(),
            label: None,
            gesture: Gesture::Idle,
            double_click: DoubleClick::new(limits.double_click),
        }
    }

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    pub fn limits(&self) -> RegionLimits {
        self.limits
    }

    /// Current region, if one has been picked
    pub fn region(&self) -> Option<Rect> {
        self.region
    }

    /// Part of the canvas shown at full brightness
    pub fn clip(&self) -> Option<Rect> {
        self.clip.rect()
    }

    pub fn overlay(&self) -> &HandleOverlay {
        &self.overlay
    }

    /// Size label, only present while picking
    pub fn label(&self) -> Option<&SizeLabel> {
        self.label.as_ref()
    }

    /// True between a pointer-down and pointer-up on the region
    pub fn is_dragging(&self) -> bool {
        !matches!(self.gesture, Gesture::Idle)
    }

    pub fn is_picking(&self) -> bool {
        matches!(self.gesture, Gesture::Picking { .. })
    }

    /// Handle being dragged, `None` for moves and when idle
    pub fn active_handle(&self) -> ResizeHandle {
        match &self.gesture {
            Gesture::Resizing(drag) => drag.handle(),
            _ => ResizeHandle::None,
        }
    }

    /// Handle under the pointer, for cursor feedback
    pub fn handle_at(&self, p: Point) -> ResizeHandle {
        if self.region.is_none() {
            return ResizeHandle::None;
        }
        self.overlay.handles().hit(p, self.limits.handle_tolerance)
    }

    /// Hover test used by the interaction state machine
    ///
    /// Includes the handle tolerance around the border so handles that
    /// stick out of the region can still be grabbed.
    pub fn hover_contains(&self, p: Point) -> bool {
        self.region
            .is_some_and(|r| !r.is_empty() && r.inflate(self.limits.handle_tolerance).contains_point(p))
    }

    /// Drop the region and any gesture on it
    pub fn clear(&mut self) {
        self.region = None;
        self.clip = ClipRegion::new(self.canvas);
        self.label = None;
        self.overlay = HandleOverlay::default();
        self.gesture = Gesture::Idle;
        self.double_click.reset();
    }

    // ------------------------------------------------------------------
    // Picking
    // ------------------------------------------------------------------

    /// Start picking a new region at `p`, discarding the old one
    pub fn begin_pick(&mut self, p: Point) {
        if !p.is_finite() {
            return;
        }
        let anchor = self.canvas.clamp(p);
        self.clear();
        self.gesture = Gesture::Picking { anchor };
        self.accept(Rect::at(anchor));
        self.overlay.hide();
        self.label = Some(SizeLabel::for_region(&Rect::at(anchor), self.canvas));
        log::debug!("picking region from {:?}", anchor);
    }

    /// Stretch the region being picked to the pointer
    pub fn update_pick(&mut self, p: Point) {
        let Gesture::Picking { anchor } = self.gesture else {
            return;
        };
        if !p.is_finite() {
            log::trace!("dropping non-finite pick sample");
            return;
        }
        let rect = Rect::from_corners(anchor, self.canvas.clamp(p));
        self.accept(rect);
        self.label = Some(SizeLabel::for_region(&rect, self.canvas));
    }

    /// Finish picking
    pub fn end_pick(&mut self) {
        if !self.is_picking() {
            return;
        }
        self.gesture = Gesture::Idle;
        self.label = None;
        if let Some(region) = self.region {
            self.overlay.show();
            log::debug!("picked region {:?}", region);
        }
    }

    // ------------------------------------------------------------------
    // Moving and resizing
    // ------------------------------------------------------------------

    /// Start moving or resizing the existing region
    ///
    /// A second press within the double-click window snaps the region to
    /// the full canvas and swallows the rest of the gesture.
    pub fn begin_adjust(&mut self, p: Point, at: Instant) {
        let Some(region) = self.region else {
            return;
        };
        if !p.is_finite() {
            return;
        }

        if self.double_click.press(at) {
            log::debug!("double-click: snapping region to full canvas");
            self.accept(self.canvas.bounds());
            self.gesture = Gesture::Snapped;
            return;
        }

        let handle = self.handle_at(p);
        self.gesture = match handle {
            ResizeHandle::None => Gesture::Moving { last: p },
            handle => Gesture::Resizing(ResizeDrag::new(handle, region, p)),
        };
        log::debug!("adjusting region with handle {:?}", handle);
    }

    /// Apply a pointer sample to the move/resize in progress
    pub fn update_adjust(&mut self, p: Point) {
        if !p.is_finite() {
            log::trace!("dropping non-finite adjust sample");
            return;
        }
        let Some(region) = self.region else {
            return;
        };

        match &mut self.gesture {
            Gesture::Moving { last } => {
                let (dx, dy) = (p.x - last.x, p.y - last.y);
                *last = p;
                let candidate = translate_clamped(region, dx, dy, self.canvas);
                let min = self.limits.min_move_size;
                if candidate.width > min && candidate.height > min {
                    self.accept(candidate);
                } else {
                    log::trace!("move result {:?} below minimum, keeping region", candidate);
                }
            }
            Gesture::Resizing(drag) => {
                let candidate = drag.update(p, self.canvas);
                let min = self.limits.min_resize_size;
                if candidate.width > min && candidate.height > min {
                    self.accept(candidate);
                } else {
                    log::trace!("resize result {:?} below minimum, keeping region", candidate);
                }
            }
            _ => {}
        }
    }

    /// Finish the move/resize
    pub fn end_adjust(&mut self) {
        if matches!(
            self.gesture,
            Gesture::Moving { .. } | Gesture::Resizing(_) | Gesture::Snapped
        ) {
            self.gesture = Gesture::Idle;
        }
    }

    /// Commit new geometry and notify what tracks it
    fn accept(&mut self, rect: Rect) {
        if !rect.is_valid() {
            log::trace!("rejecting invalid region {:?}", rect);
            return;
        }
        self.region = Some(rect);
        let observers: [&mut dyn RegionObserver; 2] = [&mut self.clip, &mut self.overlay];
        for observer in observers {
            observer.region_changed(&rect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> RegionModel {
        RegionModel::new(CanvasSize::new(1000.0, 800.0), RegionLimits::default())
    }

    fn picked(rect: Rect) -> RegionModel {
        let mut m = model();
        m.begin_pick(Point::new(rect.left, rect.top));
        m.update_pick(Point::new(rect.right(), rect.bottom()));
        m.end_pick();
        m
    }

    #[test]
    fn test_pick_is_direction_independent() {
        let mut a = model();
        a.begin_pick(Point::new(10.0, 10.0));
        a.update_pick(Point::new(50.0, 80.0));
        a.end_pick();

        let mut b = model();
        b.begin_pick(Point::new(50.0, 80.0));
        b.update_pick(Point::new(10.0, 10.0));
        b.end_pick();

        assert_eq!(a.region(), b.region());
        assert_eq!(a.region(), Some(Rect::new(10.0, 10.0, 40.0, 70.0)));
    }

    #[test]
    fn test_pick_label_only_while_picking() {
        let mut m = model();
        m.begin_pick(Point::new(100.0, 100.0));
        m.update_pick(Point::new(140.0, 170.0));
        assert_eq!(m.label().map(|l| l.text.as_str()), Some("40x70"));
        assert!(!m.overlay().is_visible());
        m.end_pick();
        assert!(m.label().is_none());
        assert!(m.overlay().is_visible());
    }

    #[test]
    fn test_new_pick_discards_old_region() {
        let mut m = picked(Rect::new(10.0, 10.0, 100.0, 100.0));
        m.begin_pick(Point::new(500.0, 500.0));
        assert_eq!(m.region(), Some(Rect::new(500.0, 500.0, 0.0, 0.0)));
    }

    #[test]
    fn test_move_translates_and_notifies_overlay() {
        let mut m = picked(Rect::new(100.0, 100.0, 200.0, 100.0));
        let t0 = Instant::now();
        m.begin_adjust(Point::new(200.0, 150.0), t0);
        assert_eq!(m.active_handle(), ResizeHandle::None);
        m.update_adjust(Point::new(230.0, 140.0));
        m.end_adjust();

        let expected = Rect::new(130.0, 90.0, 200.0, 100.0);
        assert_eq!(m.region(), Some(expected));
        assert_eq!(m.clip(), Some(expected));
        assert_eq!(m.overlay().bounds(), expected);
    }

    #[test]
    fn test_move_below_minimum_is_discarded() {
        let mut m = picked(Rect::new(0.0, 0.0, 20.0, 20.0));
        m.begin_adjust(Point::new(10.0, 10.0), Instant::now());
        // Pinned at the left edge, width would shrink to 4
        m.update_adjust(Point::new(-6.0, 10.0));
        assert_eq!(m.region(), Some(Rect::new(0.0, 0.0, 20.0, 20.0)));
    }

    #[test]
    fn test_resize_right_edge_adds_width() {
        let mut m = picked(Rect::new(100.0, 100.0, 200.0, 100.0));
        m.begin_adjust(Point::new(300.0, 150.0), Instant::now());
        assert_eq!(m.active_handle(), ResizeHandle::MidRight);
        m.update_adjust(Point::new(340.0, 190.0));
        assert_eq!(m.region(), Some(Rect::new(100.0, 100.0, 240.0, 100.0)));
    }

    #[test]
    fn test_resize_through_region_flips_handle() {
        let mut m = picked(Rect::new(100.0, 100.0, 200.0, 100.0));
        m.begin_adjust(Point::new(100.0, 150.0), Instant::now());
        assert_eq!(m.active_handle(), ResizeHandle::MidLeft);

        // Inside the minimum band the old geometry persists
        m.update_adjust(Point::new(290.0, 150.0));
        assert_eq!(m.region(), Some(Rect::new(100.0, 100.0, 200.0, 100.0)));

        m.update_adjust(Point::new(400.0, 150.0));
        assert_eq!(m.active_handle(), ResizeHandle::MidRight);
        assert_eq!(m.region(), Some(Rect::new(300.0, 100.0, 100.0, 100.0)));
    }

    #[test]
    fn test_resize_inside_minimum_band_keeps_previous() {
        let mut m = picked(Rect::new(100.0, 100.0, 200.0, 100.0));
        m.begin_adjust(Point::new(100.0, 150.0), Instant::now());
        m.update_adjust(Point::new(250.0, 150.0));
        assert_eq!(m.region(), Some(Rect::new(250.0, 100.0, 50.0, 100.0)));
        m.update_adjust(Point::new(290.0, 150.0));
        assert_eq!(m.region(), Some(Rect::new(250.0, 100.0, 50.0, 100.0)));
    }

    #[test]
    fn test_double_click_snaps_to_canvas() {
        let mut m = picked(Rect::new(100.0, 100.0, 200.0, 100.0));
        let t0 = Instant::now();
        m.begin_adjust(Point::new(200.0, 150.0), t0);
        m.end_adjust();
        m.begin_adjust(Point::new(200.0, 150.0), t0 + Duration::from_millis(100));
        assert_eq!(m.region(), Some(Rect::new(0.0, 0.0, 1000.0, 800.0)));

        // The rest of the gesture does nothing
        m.update_adjust(Point::new(400.0, 400.0));
        m.end_adjust();
        assert_eq!(m.region(), Some(Rect::new(0.0, 0.0, 1000.0, 800.0)));
    }

    #[test]
    fn test_slow_second_click_is_a_normal_gesture() {
        let mut m = picked(Rect::new(100.0, 100.0, 200.0, 100.0));
        let t0 = Instant::now();
        m.begin_adjust(Point::new(200.0, 150.0), t0);
        m.end_adjust();
        m.begin_adjust(Point::new(200.0, 150.0), t0 + Duration::from_millis(600));
        m.update_adjust(Point::new(210.0, 150.0));
        m.end_adjust();
        assert_eq!(m.region(), Some(Rect::new(110.0, 100.0, 200.0, 100.0)));
    }

    #[test]
    fn test_hover_includes_handle_tolerance() {
        let m = picked(Rect::new(100.0, 100.0, 200.0, 100.0));
        assert!(m.hover_contains(Point::new(95.0, 95.0)));
        assert!(!m.hover_contains(Point::new(50.0, 50.0)));
        assert!(!model().hover_contains(Point::new(0.0, 0.0)));
    }

    #[test]
    fn test_clip_is_cut_to_canvas() {
        let mut clip = ClipRegion::new(CanvasSize::new(100.0, 100.0));
        clip.region_changed(&Rect::new(50.0, 50.0, 100.0, 100.0));
        assert_eq!(clip.rect(), Some(Rect::new(50.0, 50.0, 50.0, 50.0)));
        clip.region_changed(&Rect::new(10.0, 10.0, 0.0, 0.0));
        assert_eq!(clip.rect(), None);
    }

    #[test]
    fn test_non_finite_samples_are_dropped() {
        let mut m = picked(Rect::new(100.0, 100.0, 200.0, 100.0));
        m.begin_adjust(Point::new(200.0, 150.0), Instant::now());
        m.update_adjust(Point::new(f64::NAN, 10.0));
        assert_eq!(m.region(), Some(Rect::new(100.0, 100.0, 200.0, 100.0)));
    }
}
