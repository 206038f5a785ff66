//! Live `"{width}x{height}"` label shown while picking a region

use crate::domain::{CanvasSize, Point, Rect};

/// Approximate advance of one label glyph at the label font size
pub const CHAR_WIDTH: f64 = 7.5;
/// Label box height including padding
pub const LABEL_HEIGHT: f64 = 18.0;
/// Label font size
pub const FONT_SIZE: f64 = 12.0;
/// Inset from the region's top-left corner
const INSET: f64 = 5.0;
/// Gap kept when the label flips to the outside
const FLIP_GAP: f64 = 10.0;

/// Size label with its placement
#[derive(Debug, Clone, PartialEq)]
pub struct SizeLabel {
    pub text: String,
    /// Top-left of the label box
    pub position: Point,
    pub width: f64,
    pub height: f64,
}

impl SizeLabel {
    /// Build and place the label for `region`
    ///
    /// The label sits above the region's top-left corner; when that would
    /// run off the top of the canvas it drops inside the region instead,
    /// and when it would overflow the right edge it moves to the left.
    pub fn for_region(region: &Rect, canvas: CanvasSize) -> Self {
        let text = format!("{:.0}x{:.0}", region.width, region.height);
        let width = text.chars().count() as f64 * CHAR_WIDTH;
        let height = LABEL_HEIGHT;

        let anchor_top = region.top + INSET;
        let anchor_left = region.left + INSET;

        let top = if anchor_top - height < 0.0 {
            anchor_top
        } else {
            anchor_top - height - FLIP_GAP
        };
        let left = if anchor_left + width < canvas.width {
            anchor_left
        } else {
            anchor_left - width - FLIP_GAP
        };

        Self {
            text,
            position: Point::new(left, top),
            width,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANVAS: CanvasSize = CanvasSize::new(800.0, 600.0);

    #[test]
    fn test_text_is_rounded_size() {
        let label = SizeLabel::for_region(&Rect::new(100.0, 100.0, 40.4, 69.6), CANVAS);
        assert_eq!(label.text, "40x70");
    }

    #[test]
    fn test_label_sits_above_when_there_is_room() {
        let label = SizeLabel::for_region(&Rect::new(100.0, 100.0, 40.0, 70.0), CANVAS);
        assert_eq!(label.position, Point::new(105.0, 105.0 - LABEL_HEIGHT - 10.0));
    }

    #[test]
    fn test_label_flips_inside_at_top_and_left_at_right_edge() {
        let label = SizeLabel::for_region(&Rect::new(795.0, 2.0, 5.0, 5.0), CANVAS);
        assert_eq!(label.position.y, 7.0);
        assert!(label.position.x + label.width <= 800.0);
    }
}
