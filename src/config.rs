//! Configuration persistence for snapink settings

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Serializable color representation for config storage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(default = "default_alpha")]
    pub a: f32,
}

fn default_alpha() -> f32 {
    1.0
}

impl Default for ShapeColor {
    fn default() -> Self {
        Self::RED
    }
}

impl ShapeColor {
    pub const RED: ShapeColor = ShapeColor::rgb(1.0, 0.0, 0.0);
    pub const WHITE: ShapeColor = ShapeColor::rgb(1.0, 1.0, 1.0);
    pub const BLACK: ShapeColor = ShapeColor::rgb(0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Same color with a different alpha
    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Convert to image crate RGBA format (0-255)
    pub fn to_rgba_u8(self) -> [u8; 4] {
        [
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.a.clamp(0.0, 1.0) * 255.0).round() as u8,
        ]
    }
}

/// Where exported screenshots are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SaveLocation {
    #[default]
    Pictures,
    Documents,
}

/// Application configuration persisted between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapInkConfig {
    /// Stroke color selected when a session starts
    #[serde(default)]
    pub shape_color: ShapeColor,
    /// Global size scalar in [0, 1] applied to strokes, arrowheads and text
    #[serde(default = "default_size")]
    pub size: f32,
    /// Moving-average window radius applied to pen strokes
    #[serde(default = "default_smoothing_radius")]
    pub pen_smoothing_radius: usize,
    /// Moving-average window radius applied to marker strokes
    #[serde(default = "default_smoothing_radius")]
    pub marker_smoothing_radius: usize,
    /// Blur radius used by the blurred rectangle tool
    #[serde(default = "default_blur_radius")]
    pub blur_radius: f32,
    /// Distance in pixels around a handle that still grabs it
    #[serde(default = "default_handle_tolerance")]
    pub handle_tolerance: f64,
    /// Maximum gap between two presses counted as a double-click
    #[serde(default = "default_double_click_ms")]
    pub double_click_ms: u64,
    /// Region sizes at or below this are rejected while moving
    #[serde(default = "default_min_move_size")]
    pub min_move_size: f64,
    /// Region sizes at or below this are rejected while resizing
    #[serde(default = "default_min_resize_size")]
    pub min_resize_size: f64,
    /// Where to save exported images
    #[serde(default)]
    pub save_location: SaveLocation,
}

fn default_size() -> f32 {
    0.0
}

fn default_smoothing_radius() -> usize {
    10
}

fn default_blur_radius() -> f32 {
    10.0
}

fn default_handle_tolerance() -> f64 {
    8.0
}

fn default_double_click_ms() -> u64 {
    500
}

fn default_min_move_size() -> f64 {
    5.0
}

fn default_min_resize_size() -> f64 {
    15.0
}

impl SnapInkConfig {
    /// Directory name under the platform config dir
    pub const ID: &'static str = "snapink";

    /// Default location of the config file
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::ID).join("config.json"))
    }

    /// Load configuration from disk, or return defaults if unavailable
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            log::warn!("No config directory available, using defaults");
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Error loading config, using defaults: {:?}", err);
                Self::default()
            }
        }
    }

    /// Read configuration from a specific file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(config.sanitized())
    }

    /// Save configuration to disk
    pub fn save(&self) {
        let Some(path) = Self::path() else {
            log::error!("Could not determine config path for saving");
            return;
        };
        if let Err(err) = self.save_to(&path) {
            log::error!("Failed to save config: {:?}", err);
        }
    }

    /// Write configuration to a specific file, creating parent directories
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let raw = serde_json::to_string_pretty(self)?;
        std::fs::write(path, raw).with_context(|| format!("writing {}", path.display()))
    }

    /// Clamp out-of-range values from hand-edited files
    fn sanitized(mut self) -> Self {
        if !self.size.is_finite() {
            self.size = default_size();
        }
        self.size = self.size.clamp(0.0, 1.0);
        if !(self.blur_radius.is_finite() && self.blur_radius >= 0.0) {
            self.blur_radius = default_blur_radius();
        }
        if !(self.handle_tolerance.is_finite() && self.handle_tolerance > 0.0) {
            self.handle_tolerance = default_handle_tolerance();
        }
        self
    }
}

impl Default for SnapInkConfig {
    fn default() -> Self {
        Self {
            shape_color: ShapeColor::default(),
            size: default_size(),
            pen_smoothing_radius: default_smoothing_radius(),
            marker_smoothing_radius: default_smoothing_radius(),
            blur_radius: default_blur_radius(),
            handle_tolerance: default_handle_tolerance(),
            double_click_ms: default_double_click_ms(),
            min_move_size: default_min_move_size(),
            min_resize_size: default_min_resize_size(),
            save_location: SaveLocation::Pictures,
        }
    }
}
