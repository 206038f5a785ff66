//! Annotation session and its interaction state machine
//!
//! A session owns the backdrop, the region model, the annotation list and
//! the tool handler. Pointer input is routed by `InteractionState`:
//! picking a new region, moving/resizing the existing one, or drawing with
//! the selected tool.

use std::time::{Duration, Instant};

use anyhow::Context;
use image::RgbaImage;

use crate::annotations::{AnnotationList, CommitContext, ToolContext, ToolHandler};
use crate::config::{ShapeColor, SnapInkConfig};
use crate::domain::{CanvasSize, Point, ToolKind};
use crate::region::{RegionLimits, RegionModel};
use crate::render::export::Compositor;
use crate::session::messages::{InputEvent, PointerButton};
use crate::session::shortcuts;

/// Size change per wheel notch
pub const WHEEL_STEP: f32 = 0.1;

/// Where pointer input goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    /// Pressing starts a new region
    #[default]
    PickingRegion,
    /// Pressing moves or resizes the current region
    MovingOrResizingRegion,
    /// Pressing draws with the selected tool
    DrawingWithTool(ToolKind),
}

#[derive(Debug, Clone)]
pub struct Session {
    config: SnapInkConfig,
    backdrop: RgbaImage,
    canvas: CanvasSize,
    state: InteractionState,
    region: RegionModel,
    annotations: AnnotationList,
    tools: ToolHandler,
    color: ShapeColor,
    size: f32,
    /// Pointer containment seen by the last hover check
    hover_inside: bool,
    /// Last finite pointer position
    pointer: Option<Point>,
    /// Reference point for scripted pointer-down times
    epoch: Instant,
}

impl Session {
    pub fn new(backdrop: RgbaImage, config: SnapInkConfig) -> Self {
        let canvas = CanvasSize::new(f64::from(backdrop.width()), f64::from(backdrop.height()));
        let region = RegionModel::new(canvas, RegionLimits::from(&config));
        Self {
            color: config.shape_color,
            size: config.size.clamp(0.0, 1.0),
            config,
            backdrop,
            canvas,
            state: InteractionState::PickingRegion,
            region,
            annotations: AnnotationList::new(),
            tools: ToolHandler::default(),
            hover_inside: false,
            pointer: None,
            epoch: Instant::now(),
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    pub fn backdrop(&self) -> &RgbaImage {
        &self.backdrop
    }

    pub fn config(&self) -> &SnapInkConfig {
        &self.config
    }

    pub fn region_model(&self) -> &RegionModel {
        &self.region
    }

    pub fn annotations(&self) -> &AnnotationList {
        &self.annotations
    }

    pub fn tools(&self) -> &ToolHandler {
        &self.tools
    }

    pub fn color(&self) -> ShapeColor {
        self.color
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    fn tool_context(&self) -> ToolContext {
        ToolContext::new(&self.config, self.color, self.size)
    }

    /// Whether a press-drag-release is in progress
    fn gesture_active(&self) -> bool {
        self.region.is_dragging() || self.tools.is_drawing()
    }

    // ------------------------------------------------------------------
    // Pointer input
    // ------------------------------------------------------------------

    pub fn pointer_down(&mut self, p: Point, button: PointerButton, at: Instant) {
        if button != PointerButton::Primary {
            log::trace!("ignoring {:?} press", button);
            return;
        }
        if !p.is_finite() {
            log::trace!("dropping non-finite press");
            return;
        }
        if self.gesture_active() {
            log::debug!("ignoring press during an active gesture");
            return;
        }
        self.pointer = Some(p);
        // The press itself decides between picking and adjusting
        if self.tools.kind().is_none() {
            self.set_hover(self.region.hover_contains(p));
        }

        match self.state {
            InteractionState::PickingRegion => self.region.begin_pick(p),
            InteractionState::MovingOrResizingRegion => self.region.begin_adjust(p, at),
            InteractionState::DrawingWithTool(_) => {
                let ctx = self.tool_context();
                let committed = self.tools.pointer_down(p, &ctx);
                self.annotations.extend(committed);
            }
        }
    }

    pub fn pointer_move(&mut self, p: Point, held: bool) {
        if !p.is_finite() {
            log::trace!("dropping non-finite pointer sample");
            return;
        }
        self.pointer = Some(p);

        match self.state {
            InteractionState::DrawingWithTool(_) => {
                if held {
                    self.tools.pointer_move(p);
                }
            }
            InteractionState::PickingRegion if held && self.region.is_picking() => {
                self.region.update_pick(p);
            }
            InteractionState::MovingOrResizingRegion if held && self.region.is_dragging() => {
                self.region.update_adjust(p);
            }
            _ => self.update_hover(p),
        }
    }

    pub fn pointer_up(&mut self, p: Point, button: PointerButton) {
        if button != PointerButton::Primary {
            return;
        }

        match self.state {
            InteractionState::PickingRegion => self.region.end_pick(),
            InteractionState::MovingOrResizingRegion => self.region.end_adjust(),
            InteractionState::DrawingWithTool(_) => {
                let cx = CommitContext {
                    backdrop: &self.backdrop,
                    annotations: &self.annotations,
                };
                let committed = self.tools.pointer_up(&cx);
                self.annotations.extend(committed);
            }
        }

        if p.is_finite() {
            self.pointer = Some(p);
            self.update_hover(p);
        }
    }

    /// Edge-triggered switch between picking and adjusting
    fn update_hover(&mut self, p: Point) {
        if self.tools.kind().is_some() || self.gesture_active() {
            return;
        }
        let inside = self.region.hover_contains(p);
        if inside != self.hover_inside {
            self.set_hover(inside);
        }
    }

    fn set_hover(&mut self, inside: bool) {
        self.hover_inside = inside;
        let state = if inside {
            InteractionState::MovingOrResizingRegion
        } else {
            InteractionState::PickingRegion
        };
        if state != self.state {
            self.state = state;
            log::debug!("hover changed state to {:?}", self.state);
        }
    }

    /// Grow or shrink the global size by whole wheel notches
    pub fn wheel(&mut self, delta: f32) {
        if !delta.is_finite() {
            return;
        }
        self.set_size(self.size + delta * WHEEL_STEP);
    }

    // ------------------------------------------------------------------
    // Tools and style
    // ------------------------------------------------------------------

    /// Select a drawing tool, or `None` to go back to adjusting the region
    pub fn select_tool(&mut self, tool: Option<ToolKind>) {
        self.tools.select(tool);

        // A region gesture cannot outlive the switch
        if self.region.is_picking() {
            self.region.end_pick();
        } else if self.region.is_dragging() {
            self.region.end_adjust();
        }

        match tool {
            Some(kind) => self.state = InteractionState::DrawingWithTool(kind),
            None => {
                let inside = self
                    .pointer
                    .is_some_and(|p| self.region.hover_contains(p));
                self.set_hover(inside);
            }
        }
        log::debug!("tool selection changed state to {:?}", self.state);
    }

    pub fn set_color(&mut self, color: ShapeColor) {
        self.color = color;
    }

    pub fn set_size(&mut self, size: f32) {
        if size.is_finite() {
            self.size = size.clamp(0.0, 1.0);
        }
    }

    /// Type into the open text entry
    pub fn text_input(&mut self, text: &str) {
        match self.tools.text_entry_mut() {
            Some(entry) => entry.push_str(text),
            None => log::trace!("no open text entry for input"),
        }
    }

    pub fn backspace(&mut self) {
        if let Some(entry) = self.tools.text_entry_mut() {
            entry.backspace();
        }
    }

    /// Remove the most recent annotation
    pub fn undo(&mut self) {
        self.annotations.undo();
    }

    /// Back to an empty session on the same backdrop
    pub fn reset(&mut self) {
        self.state = InteractionState::PickingRegion;
        self.region.clear();
        self.annotations.clear_all();
        self.tools.clear();
        self.hover_inside = false;
        self.pointer = None;
        log::debug!("session reset");
    }

    // ------------------------------------------------------------------
    // Events and export
    // ------------------------------------------------------------------

    /// Route one input event
    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown {
                point,
                button,
                at_ms,
            } => {
                let at = self.epoch + Duration::from_millis(at_ms);
                self.pointer_down(point, button, at);
            }
            InputEvent::PointerMove { point, held } => self.pointer_move(point, held),
            InputEvent::PointerUp { point, button } => self.pointer_up(point, button),
            InputEvent::Wheel { delta } => self.wheel(delta),
            InputEvent::SelectTool { tool } => self.select_tool(tool),
            InputEvent::SetColor { color } => self.set_color(color),
            InputEvent::SetSize { size } => self.set_size(size),
            InputEvent::Undo => self.undo(),
            InputEvent::Text { text } => self.text_input(&text),
            InputEvent::Backspace => self.backspace(),
            InputEvent::Key(key) => {
                if let Some(event) = shortcuts::handle_key_event(self, &key) {
                    self.handle(event);
                }
            }
            InputEvent::Reset => self.reset(),
        }
    }

    /// Encoded image of the current region with all annotations
    pub fn export(&self, compositor: &dyn Compositor) -> anyhow::Result<Vec<u8>> {
        let region = self
            .region
            .region()
            .filter(|r| !r.is_empty())
            .context("no region selected")?;
        compositor.export_region(region, &self.annotations)
    }
}
