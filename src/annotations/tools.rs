//! In-progress drawing objects for each tool
//!
//! Each tool captures its style when it begins, follows the pointer while
//! the primary button is held, and turns into zero or more annotations on
//! commit.

use image::RgbaImage;

use super::list::AnnotationList;
use crate::config::{ShapeColor, SnapInkConfig};
use crate::domain::{
    Annotation, ArrowHeadAnnotation, BlurredAnnotation, BoxAnnotation, Point, RectangleMode,
    Rect, SegmentAnnotation, StrokeAnnotation, TextAnnotation,
};
use crate::render::geometry::{arrow, smooth_polyline, stroke, text};
use crate::render::image::{blur_region, compose_canvas};

/// Style and tuning read when a tool begins
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolContext {
    pub color: ShapeColor,
    /// Global size scalar in [0, 1]
    pub size: f32,
    pub pen_smoothing_radius: usize,
    pub marker_smoothing_radius: usize,
    pub blur_radius: f32,
}

impl ToolContext {
    pub fn new(config: &SnapInkConfig, color: ShapeColor, size: f32) -> Self {
        Self {
            color,
            size,
            pen_smoothing_radius: config.pen_smoothing_radius,
            marker_smoothing_radius: config.marker_smoothing_radius,
            blur_radius: config.blur_radius,
        }
    }
}

/// What a commit may read: the backdrop and everything already drawn
#[derive(Debug, Clone, Copy)]
pub struct CommitContext<'a> {
    pub backdrop: &'a RgbaImage,
    pub annotations: &'a AnnotationList,
}

// ============================================================================
// Freehand
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreehandKind {
    Pen,
    Marker,
}

/// Pen or marker stroke
#[derive(Debug, Clone, PartialEq)]
pub struct Freehand {
    points: Vec<Point>,
    width: f64,
    color: ShapeColor,
    opacity: f32,
    smoothing: usize,
}

impl Freehand {
    pub fn begin(kind: FreehandKind, p: Point, ctx: &ToolContext) -> Self {
        let (width, opacity, smoothing) = match kind {
            FreehandKind::Pen => (stroke::pen_width(ctx.size), 1.0, ctx.pen_smoothing_radius),
            FreehandKind::Marker => (
                stroke::marker_width(ctx.size),
                stroke::MARKER_OPACITY,
                ctx.marker_smoothing_radius,
            ),
        };
        Self {
            points: vec![p],
            width,
            color: ctx.color,
            opacity,
            smoothing,
        }
    }

    pub fn update(&mut self, p: Point) {
        self.points.push(p);
    }

    /// Raw, unsmoothed stroke for live display
    pub fn preview(&self) -> StrokeAnnotation {
        StrokeAnnotation {
            points: self.points.clone(),
            width: self.width,
            color: self.color,
            opacity: self.opacity,
        }
    }

    pub fn commit(self) -> Vec<Annotation> {
        let points = smooth_polyline(&self.points, self.smoothing);
        vec![Annotation::Stroke(StrokeAnnotation {
            points,
            width: self.width,
            color: self.color,
            opacity: self.opacity,
        })]
    }
}

// ============================================================================
// Line and arrow
// ============================================================================

/// Straight line, with an arrowhead when drawn by the arrow tool
#[derive(Debug, Clone, PartialEq)]
pub struct LineDraw {
    start: Point,
    end: Point,
    width: f64,
    color: ShapeColor,
    /// Arrowhead length, `None` for a plain line
    head: Option<f64>,
}

impl LineDraw {
    pub fn line(p: Point, ctx: &ToolContext) -> Self {
        Self {
            start: p,
            end: p,
            width: stroke::pen_width(ctx.size),
            color: ctx.color,
            head: None,
        }
    }

    pub fn arrow(p: Point, ctx: &ToolContext) -> Self {
        Self {
            head: Some(arrow::head_length(ctx.size)),
            ..Self::line(p, ctx)
        }
    }

    pub fn is_arrow(&self) -> bool {
        self.head.is_some()
    }

    pub fn update(&mut self, p: Point) {
        self.end = p;
    }

    fn segment(&self) -> SegmentAnnotation {
        SegmentAnnotation {
            start: self.start,
            end: self.end,
            width: self.width,
            color: self.color,
        }
    }

    fn head(&self) -> Option<ArrowHeadAnnotation> {
        let len = self.head?;
        arrow::head_triangle(self.start, self.end, len).map(|points| ArrowHeadAnnotation {
            points,
            color: self.color,
        })
    }

    /// Shaft plus head as they would be committed right now
    pub fn preview(&self) -> Vec<Annotation> {
        let mut out = vec![Annotation::Segment(self.segment())];
        out.extend(self.head().map(Annotation::ArrowHead));
        out
    }

    /// Shaft first, then head; nothing for a zero-length line
    pub fn commit(self) -> Vec<Annotation> {
        if self.start == self.end {
            log::debug!("discarding zero-length line");
            return Vec::new();
        }
        self.preview()
    }
}

// ============================================================================
// Rectangle family
// ============================================================================

/// Outline, filled or blurred rectangle
#[derive(Debug, Clone, PartialEq)]
pub struct BoxDraw {
    mode: RectangleMode,
    start: Point,
    rect: Rect,
    stroke_width: f64,
    color: ShapeColor,
    blur_radius: f32,
}

impl BoxDraw {
    pub fn begin(mode: RectangleMode, p: Point, ctx: &ToolContext) -> Self {
        Self {
            mode,
            start: p,
            rect: Rect::at(p),
            stroke_width: stroke::pen_width(ctx.size),
            color: ctx.color,
            blur_radius: ctx.blur_radius,
        }
    }

    pub fn mode(&self) -> RectangleMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: RectangleMode) {
        self.mode = mode;
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn update(&mut self, p: Point) {
        self.rect = Rect::from_corners(self.start, p);
    }

    /// Live shape; the blurred mode shows a thin red marquee instead
    pub fn preview(&self) -> BoxAnnotation {
        match self.mode {
            RectangleMode::Outline => self.outline(None),
            RectangleMode::Filled => self.outline(Some(self.color)),
            RectangleMode::Blurred => BoxAnnotation {
                rect: self.rect,
                stroke_width: 1.0,
                color: ShapeColor::RED,
                fill: None,
            },
        }
    }

    fn outline(&self, fill: Option<ShapeColor>) -> BoxAnnotation {
        BoxAnnotation {
            rect: self.rect,
            stroke_width: self.stroke_width,
            color: self.color,
            fill,
        }
    }

    /// Finished rectangle
    ///
    /// Rectangles with no area or whose origin is not strictly inside the
    /// canvas are dropped. The blurred mode snapshots the composed canvas
    /// under the rectangle.
    pub fn commit(self, cx: &CommitContext<'_>) -> Vec<Annotation> {
        let rect = self.rect;
        if rect.is_empty() || rect.left <= 0.0 || rect.top <= 0.0 {
            log::debug!("discarding degenerate rectangle {:?}", rect);
            return Vec::new();
        }

        match self.mode {
            RectangleMode::Outline => vec![Annotation::Box(self.outline(None))],
            RectangleMode::Filled => vec![Annotation::Box(self.outline(Some(self.color)))],
            RectangleMode::Blurred => {
                let canvas = compose_canvas(cx.backdrop, cx.annotations);
                match blur_region(&canvas, rect, self.blur_radius) {
                    Some((rect, pixels)) => vec![Annotation::Blurred(BlurredAnnotation {
                        rect,
                        radius: self.blur_radius,
                        pixels,
                    })],
                    None => {
                        log::debug!("blur rectangle {:?} is outside the canvas", rect);
                        Vec::new()
                    }
                }
            }
        }
    }
}

// ============================================================================
// Text
// ============================================================================

/// Text block being typed
#[derive(Debug, Clone, PartialEq)]
pub struct TextEntry {
    anchor: Point,
    content: String,
    font_size: f64,
    color: ShapeColor,
}

impl TextEntry {
    pub fn begin(p: Point, ctx: &ToolContext) -> Self {
        Self {
            anchor: p,
            content: String::new(),
            font_size: text::font_size(ctx.size),
            color: ctx.color,
        }
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Append typed text; carriage returns become newlines
    pub fn push_str(&mut self, input: &str) {
        for c in input.chars() {
            match c {
                '\r' | '\n' => self.content.push('\n'),
                c if c.is_control() => {}
                c => self.content.push(c),
            }
        }
    }

    pub fn backspace(&mut self) {
        self.content.pop();
    }

    pub fn preview(&self) -> TextAnnotation {
        TextAnnotation {
            anchor: self.anchor,
            content: self.content.clone(),
            font_size: self.font_size,
            color: self.color,
        }
    }

    pub fn commit(self) -> Vec<Annotation> {
        if self.content.is_empty() {
            log::debug!("discarding empty text block");
            return Vec::new();
        }
        vec![Annotation::Text(self.preview())]
    }
}
