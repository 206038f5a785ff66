//! Composition of the selected region and PNG output

use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use image::{RgbaImage, imageops};

use super::image::{draw_annotations_on_image, pixel_bounds};
use crate::annotations::AnnotationList;
use crate::config::SaveLocation;
use crate::domain::{Point, Rect};

/// Produces the final image for a region
pub trait Compositor {
    /// Encoded PNG of the backdrop under `region` with `annotations` on top
    fn export_region(&self, region: Rect, annotations: &AnnotationList) -> anyhow::Result<Vec<u8>>;
}

/// Compositor drawing onto the captured backdrop with tiny-skia
#[derive(Debug, Clone)]
pub struct SkiaCompositor {
    backdrop: RgbaImage,
}

impl SkiaCompositor {
    pub fn new(backdrop: RgbaImage) -> Self {
        Self { backdrop }
    }

    pub fn backdrop(&self) -> &RgbaImage {
        &self.backdrop
    }

    /// Cropped, annotated region before encoding
    pub fn render_region(
        &self,
        region: Rect,
        annotations: &AnnotationList,
    ) -> anyhow::Result<RgbaImage> {
        let (x, y, w, h) = pixel_bounds(region, self.backdrop.width(), self.backdrop.height())
            .with_context(|| format!("region {region:?} does not overlap the backdrop"))?;

        let mut img = imageops::crop_imm(&self.backdrop, x, y, w, h).to_image();
        draw_annotations_on_image(
            &mut img,
            annotations.as_slice(),
            Point::new(f64::from(x), f64::from(y)),
        );
        Ok(img)
    }
}

impl Compositor for SkiaCompositor {
    fn export_region(&self, region: Rect, annotations: &AnnotationList) -> anyhow::Result<Vec<u8>> {
        let img = self.render_region(region, annotations)?;
        let mut buffer = Vec::new();
        write_png(&mut buffer, &img).context("failed to encode PNG")?;
        log::info!(
            "exported {}x{} region with {} annotation(s)",
            img.width(),
            img.height(),
            annotations.len()
        );
        Ok(buffer)
    }
}

pub fn write_png<W: io::Write>(w: W, image: &RgbaImage) -> Result<(), png::EncodingError> {
    let mut encoder = png::Encoder::new(w, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())
}

/// Timestamped file name in the folder for `location`
pub fn default_save_path(location: SaveLocation) -> Option<PathBuf> {
    let mut path = match location {
        SaveLocation::Pictures => {
            dirs::picture_dir().or_else(|| dirs::home_dir().map(|h| h.join("Pictures")))
        }
        SaveLocation::Documents => {
            dirs::document_dir().or_else(|| dirs::home_dir().map(|h| h.join("Documents")))
        }
    }?;
    let name = chrono::Local::now()
        .format("Screenshot_%Y-%m-%d_%H-%M-%S.png")
        .to_string();
    path.push(name);

    Some(path)
}

/// Write encoded PNG bytes, creating the parent folder if needed
pub fn save_png(png: &[u8], path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, png).with_context(|| format!("failed to write {}", path.display()))?;
    log::info!("saved screenshot to {}", path.display());
    Ok(())
}
