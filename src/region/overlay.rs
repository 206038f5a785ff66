//! Handle overlay that follows the selection region

use crate::domain::{HandleSet, Rect, ResizeHandle};
use crate::render::geometry::chrome::HANDLE_SIZE;

/// Border plus 8 handle squares drawn around the region
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HandleOverlay {
    bounds: Rect,
    handles: HandleSet,
    visible: bool,
}

impl HandleOverlay {
    /// Recompute all anchors from new region bounds
    pub fn track(&mut self, region: &Rect) {
        self.bounds = *region;
        self.handles = HandleSet::from_rect(region);
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn handles(&self) -> &HandleSet {
        &self.handles
    }

    /// Square drawn for each handle, centred on its anchor
    pub fn squares(&self) -> [(ResizeHandle, Rect); 8] {
        self.handles.anchors.map(|(handle, p)| {
            (
                handle,
                Rect::new(
                    p.x - HANDLE_SIZE / 2.0,
                    p.y - HANDLE_SIZE / 2.0,
                    HANDLE_SIZE,
                    HANDLE_SIZE,
                ),
            )
        })
    }
}
