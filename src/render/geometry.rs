//! Shared geometry calculations for annotations
//!
//! This module contains constants and math shared between the tools that
//! build annotations, the frame primitives shown on screen and the
//! tiny-skia export renderer.

use crate::domain::Point;

/// Stroke width formulas, all driven by the global size scalar in [0, 1]
pub mod stroke {
    /// Pen/line/shape width at size 0
    pub const PEN_BASE: f64 = 1.0;
    /// Extra pen width at size 1
    pub const PEN_SCALE: f64 = 9.0;
    /// Marker width at size 0
    pub const MARKER_BASE: f64 = 5.0;
    /// Extra marker width at size 1
    pub const MARKER_SCALE: f64 = 15.0;
    /// Marker ink opacity
    pub const MARKER_OPACITY: f32 = 0.5;

    pub fn pen_width(size: f32) -> f64 {
        PEN_BASE + f64::from(size) * PEN_SCALE
    }

    pub fn marker_width(size: f32) -> f64 {
        MARKER_BASE + f64::from(size) * MARKER_SCALE
    }
}

/// Arrowhead geometry
pub mod arrow {
    use crate::domain::Point;

    /// Head length at size 0
    pub const HEAD_BASE: f64 = 5.0;
    /// Extra head length at size 1
    pub const HEAD_SCALE: f64 = 9.0;
    /// Base half-width is the head length divided by this
    pub const SIDE_RATIO: f64 = 1.5;

    pub fn head_length(size: f32) -> f64 {
        HEAD_BASE + f64::from(size) * HEAD_SCALE
    }

    /// Triangle for an arrow pointing from `start` to `end`
    ///
    /// Returns `[apex, base_left, base_right]`. The base centre sits `len`
    /// behind `end` on the shaft, the base points are `len / SIDE_RATIO`
    /// either side of it, and the apex lies on the shaft line `len` past
    /// `end`. `None` for a zero-length shaft, which has no direction.
    pub fn head_triangle(start: Point, end: Point, len: f64) -> Option<[Point; 3]> {
        let length = start.distance(end);
        if !(length.is_finite() && length > f64::EPSILON) {
            return None;
        }

        // Unit direction and its left-hand perpendicular
        let (ny, nx) = start.angle_to(end).sin_cos();
        let (px, py) = (-ny, nx);
        let side = len / SIDE_RATIO;

        let base = end.offset(-nx * len, -ny * len);
        let apex = end.offset(nx * len, ny * len);
        Some([
            apex,
            base.offset(px * side, py * side),
            base.offset(-px * side, -py * side),
        ])
    }
}

/// Text geometry
pub mod text {
    pub const FONT_BASE: f64 = 8.0;
    pub const FONT_SCALE: f64 = 24.0;

    pub fn font_size(size: f32) -> f64 {
        FONT_BASE + f64::from(size) * FONT_SCALE
    }
}

/// Selection chrome drawn around the region
pub mod chrome {
    /// Side of each square resize handle
    pub const HANDLE_SIZE: f64 = 8.0;
    /// Opacity of the dimmed backdrop outside the region
    pub const DIM_OPACITY: f32 = 0.5;
    /// Dash pattern of the region outline (on, off)
    pub const OUTLINE_DASH: [f32; 2] = [4.0, 2.0];
}

/// Moving-average smoothing of a polyline
///
/// Each output point is the mean of the input points within `radius`
/// indices on either side, with the window truncated at the ends. The output
/// has exactly as many points as the input.
pub fn smooth_polyline(points: &[Point], radius: usize) -> Vec<Point> {
    if radius == 0 || points.len() < 2 {
        return points.to_vec();
    }

    // Prefix sums keep this linear in the number of points
    let mut prefix = Vec::with_capacity(points.len() + 1);
    prefix.push((0.0, 0.0));
    for p in points {
        let (sx, sy) = prefix[prefix.len() - 1];
        prefix.push((sx + p.x, sy + p.y));
    }

    let last = points.len() - 1;
    (0..points.len())
        .map(|i| {
            let lo = i.saturating_sub(radius);
            let hi = (i + radius).min(last);
            let count = (hi - lo + 1) as f64;
            let (sx_hi, sy_hi) = prefix[hi + 1];
            let (sx_lo, sy_lo) = prefix[lo];
            Point::new((sx_hi - sx_lo) / count, (sy_hi - sy_lo) / count)
        })
        .collect()
}
