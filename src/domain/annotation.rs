//! Annotation types for drawing on screenshots
//!
//! All annotation types store coordinates in canvas coordinates. Once an
//! annotation is pushed to the list its geometry never changes.

use image::RgbaImage;

use super::geometry::{Point, Rect};
use crate::config::ShapeColor;

/// Freehand ink (pen or marker)
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeAnnotation {
    /// Smoothed points in drawing order
    pub points: Vec<Point>,
    pub width: f64,
    pub color: ShapeColor,
    /// 1.0 for pen, translucent for marker
    pub opacity: f32,
}

/// Straight line (also the shaft of an arrow)
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentAnnotation {
    pub start: Point,
    pub end: Point,
    pub width: f64,
    pub color: ShapeColor,
}

/// Filled triangular arrowhead: apex followed by the two base points
#[derive(Clone, Debug, PartialEq)]
pub struct ArrowHeadAnnotation {
    pub points: [Point; 3],
    pub color: ShapeColor,
}

impl ArrowHeadAnnotation {
    pub fn apex(&self) -> Point {
        self.points[0]
    }
}

/// Rectangle outline, optionally filled
#[derive(Clone, Debug, PartialEq)]
pub struct BoxAnnotation {
    pub rect: Rect,
    pub stroke_width: f64,
    pub color: ShapeColor,
    /// Fill color for filled rectangles
    pub fill: Option<ShapeColor>,
}

/// Blurred snapshot of the canvas under a rectangle
#[derive(Clone, Debug, PartialEq)]
pub struct BlurredAnnotation {
    pub rect: Rect,
    pub radius: f32,
    /// Already-blurred pixels, sized to `rect`
    pub pixels: RgbaImage,
}

/// Text block anchored at its top-left corner
#[derive(Clone, Debug, PartialEq)]
pub struct TextAnnotation {
    pub anchor: Point,
    pub content: String,
    pub font_size: f64,
    pub color: ShapeColor,
}

/// Unified annotation type for ordered drawing and undo
#[derive(Clone, Debug, PartialEq)]
pub enum Annotation {
    Stroke(StrokeAnnotation),
    Segment(SegmentAnnotation),
    ArrowHead(ArrowHeadAnnotation),
    Box(BoxAnnotation),
    Blurred(BlurredAnnotation),
    Text(TextAnnotation),
}

impl Annotation {
    /// Short name used in logs
    pub fn kind_name(&self) -> &'static str {
        match self {
            Annotation::Stroke(_) => "stroke",
            Annotation::Segment(_) => "segment",
            Annotation::ArrowHead(_) => "arrowhead",
            Annotation::Box(_) => "box",
            Annotation::Blurred(_) => "blurred",
            Annotation::Text(_) => "text",
        }
    }
}
