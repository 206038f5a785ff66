//! Image rendering for annotations using tiny-skia
//!
//! These functions draw annotations onto an `RgbaImage`, both for the blur
//! snapshot taken while drawing and for the exported region.

use std::sync::OnceLock;

use ab_glyph::{Font, FontRef, ScaleFont, point};
use image::{Rgba, RgbaImage, imageops};
use tiny_skia::{
    FillRule, LineCap, LineJoin, Paint, Path, PathBuilder, Pixmap, Stroke, Transform,
};

use crate::annotations::AnnotationList;
use crate::config::ShapeColor;
use crate::domain::{
    Annotation, ArrowHeadAnnotation, BlurredAnnotation, BoxAnnotation, Point, Rect,
    SegmentAnnotation, StrokeAnnotation, TextAnnotation,
};

/// Convert RgbaImage to Pixmap, apply drawing function, and copy back
fn with_pixmap(img: &mut RgbaImage, f: impl FnOnce(&mut Pixmap)) {
    let Some(size) = tiny_skia::IntSize::from_wh(img.width(), img.height()) else {
        return;
    };
    let Some(mut pixmap) = Pixmap::from_vec(img.as_raw().clone(), size) else {
        return;
    };

    f(&mut pixmap);

    // Copy back
    img.copy_from_slice(pixmap.data());
}

fn paint_for(color: ShapeColor) -> Paint<'static> {
    let [r, g, b, a] = color.to_rgba_u8();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

fn round_stroke(width: f64) -> Stroke {
    Stroke {
        width: width as f32,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Default::default()
    }
}

/// Open polyline through `points`
fn build_polyline_path(points: &[Point]) -> Option<Path> {
    let (first, rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(first.x as f32, first.y as f32);
    for p in rest {
        pb.line_to(p.x as f32, p.y as f32);
    }
    pb.finish()
}

fn build_triangle_path(points: &[Point; 3]) -> Option<Path> {
    let mut pb = PathBuilder::new();
    pb.move_to(points[0].x as f32, points[0].y as f32);
    pb.line_to(points[1].x as f32, points[1].y as f32);
    pb.line_to(points[2].x as f32, points[2].y as f32);
    pb.close();
    pb.finish()
}

fn build_rect_path(rect: &Rect) -> Option<Path> {
    let rect = tiny_skia::Rect::from_xywh(
        rect.left as f32,
        rect.top as f32,
        rect.width as f32,
        rect.height as f32,
    )?;
    Some(PathBuilder::from_rect(rect))
}

fn draw_stroke(pixmap: &mut Pixmap, stroke: &StrokeAnnotation, transform: Transform) {
    let paint = paint_for(stroke.color.with_alpha(stroke.color.a * stroke.opacity));

    // A click without motion leaves a single dot
    if let [p] = stroke.points.as_slice() {
        if let Some(dot) =
            PathBuilder::from_circle(p.x as f32, p.y as f32, (stroke.width / 2.0) as f32)
        {
            pixmap.fill_path(&dot, &paint, FillRule::Winding, transform, None);
        }
        return;
    }

    if let Some(path) = build_polyline_path(&stroke.points) {
        pixmap.stroke_path(&path, &paint, &round_stroke(stroke.width), transform, None);
    }
}

fn draw_segment(pixmap: &mut Pixmap, segment: &SegmentAnnotation, transform: Transform) {
    if let Some(path) = build_polyline_path(&[segment.start, segment.end]) {
        let paint = paint_for(segment.color);
        pixmap.stroke_path(&path, &paint, &round_stroke(segment.width), transform, None);
    }
}

fn draw_arrow_head(pixmap: &mut Pixmap, head: &ArrowHeadAnnotation, transform: Transform) {
    let Some(path) = build_triangle_path(&head.points) else {
        return;
    };
    let paint = paint_for(head.color);
    pixmap.fill_path(&path, &paint, FillRule::Winding, transform, None);
    pixmap.stroke_path(&path, &paint, &round_stroke(1.0), transform, None);
}

fn draw_box(pixmap: &mut Pixmap, shape: &BoxAnnotation, transform: Transform) {
    let Some(path) = build_rect_path(&shape.rect) else {
        return;
    };
    if let Some(fill) = shape.fill {
        pixmap.fill_path(&path, &paint_for(fill), FillRule::Winding, transform, None);
    }
    let paint = paint_for(shape.color);
    pixmap.stroke_path(&path, &paint, &round_stroke(shape.stroke_width), transform, None);
}

fn draw_blurred(img: &mut RgbaImage, blurred: &BlurredAnnotation, origin: Point) {
    let x = (blurred.rect.left - origin.x).round() as i64;
    let y = (blurred.rect.top - origin.y).round() as i64;
    imageops::overlay(img, &blurred.pixels, x, y);
}

/// Bundled sans-serif face used for text blocks
fn text_font() -> Option<&'static FontRef<'static>> {
    static FONT: OnceLock<Option<FontRef<'static>>> = OnceLock::new();
    FONT.get_or_init(|| match FontRef::try_from_slice(epaint_default_fonts::UBUNTU_LIGHT) {
        Ok(font) => Some(font),
        Err(err) => {
            log::warn!("bundled font unusable, text will not be drawn: {err}");
            None
        }
    })
    .as_ref()
}

/// Source-over blend of `color` scaled by glyph `coverage`
fn blend_pixel(img: &mut RgbaImage, x: u32, y: u32, color: [u8; 4], coverage: f32) {
    let alpha = f32::from(color[3]) / 255.0 * coverage.clamp(0.0, 1.0);
    if alpha <= 0.0 {
        return;
    }
    let dst = img.get_pixel(x, y).0;
    let dst_a = f32::from(dst[3]) / 255.0;
    let out_a = alpha + dst_a * (1.0 - alpha);
    let mut out = [0u8; 4];
    for i in 0..3 {
        let c = (f32::from(color[i]) * alpha + f32::from(dst[i]) * dst_a * (1.0 - alpha)) / out_a;
        out[i] = c.round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    img.put_pixel(x, y, Rgba(out));
}

/// Rasterize a text block, one line per `\n`, top-left at its anchor
fn draw_text(img: &mut RgbaImage, text: &TextAnnotation, origin: Point) {
    let Some(font) = text_font() else {
        return;
    };
    let scaled = font.as_scaled(text.font_size as f32);
    let color = text.color.to_rgba_u8();
    let (width, height) = (img.width() as i32, img.height() as i32);
    let line_height = scaled.height() + scaled.line_gap();

    let left = (text.anchor.x - origin.x) as f32;
    let mut baseline = (text.anchor.y - origin.y) as f32 + scaled.ascent();
    for line in text.content.split('\n') {
        let mut caret = point(left, baseline);
        let mut previous = None;
        for ch in line.chars() {
            let mut glyph = scaled.scaled_glyph(ch);
            if let Some(prev) = previous {
                caret.x += scaled.kern(prev, glyph.id);
            }
            glyph.position = caret;
            previous = Some(glyph.id);
            caret.x += scaled.h_advance(glyph.id);

            let Some(outlined) = scaled.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let px = bounds.min.x as i32 + gx as i32;
                let py = bounds.min.y as i32 + gy as i32;
                if px >= 0 && py >= 0 && px < width && py < height {
                    blend_pixel(img, px as u32, py as u32, color, coverage);
                }
            });
        }
        baseline += line_height;
    }
}

/// Draw annotations in list order onto `img`
///
/// `origin` is the canvas position of the image's top-left pixel, so the
/// same annotations can be drawn onto the full canvas or a cropped region.
pub fn draw_annotations_on_image(img: &mut RgbaImage, annotations: &[Annotation], origin: Point) {
    let transform = Transform::from_translate(-origin.x as f32, -origin.y as f32);

    for annotation in annotations {
        match annotation {
            Annotation::Stroke(s) => with_pixmap(img, |pixmap| draw_stroke(pixmap, s, transform)),
            Annotation::Segment(s) => with_pixmap(img, |pixmap| draw_segment(pixmap, s, transform)),
            Annotation::ArrowHead(h) => {
                with_pixmap(img, |pixmap| draw_arrow_head(pixmap, h, transform))
            }
            Annotation::Box(b) => with_pixmap(img, |pixmap| draw_box(pixmap, b, transform)),
            Annotation::Blurred(b) => draw_blurred(img, b, origin),
            Annotation::Text(t) => draw_text(img, t, origin),
        }
    }
}

/// Backdrop with every committed annotation drawn on top
pub fn compose_canvas(backdrop: &RgbaImage, annotations: &AnnotationList) -> RgbaImage {
    let mut canvas = backdrop.clone();
    draw_annotations_on_image(&mut canvas, annotations.as_slice(), Point::new(0.0, 0.0));
    canvas
}

/// Pixel bounds `(x, y, width, height)` of `rect` inside an image
///
/// Fractional edges grow outward to whole pixels. `None` when nothing of
/// the rectangle lies inside the image.
pub fn pixel_bounds(rect: Rect, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
    if !rect.is_valid() {
        return None;
    }
    let x0 = rect.left.floor().clamp(0.0, f64::from(width)) as u32;
    let y0 = rect.top.floor().clamp(0.0, f64::from(height)) as u32;
    let x1 = rect.right().ceil().clamp(0.0, f64::from(width)) as u32;
    let y1 = rect.bottom().ceil().clamp(0.0, f64::from(height)) as u32;
    (x1 > x0 && y1 > y0).then(|| (x0, y0, x1 - x0, y1 - y0))
}

/// Blurred copy of the part of `canvas` under `rect`
///
/// Returns the pixel-aligned rectangle actually sampled with its pixels.
pub fn blur_region(canvas: &RgbaImage, rect: Rect, radius: f32) -> Option<(Rect, RgbaImage)> {
    let (x, y, w, h) = pixel_bounds(rect, canvas.width(), canvas.height())?;
    let sub = imageops::crop_imm(canvas, x, y, w, h).to_image();
    let pixels = imageops::blur(&sub, radius);
    let sampled = Rect::new(f64::from(x), f64::from(y), f64::from(w), f64::from(h));
    Some((sampled, pixels))
}
