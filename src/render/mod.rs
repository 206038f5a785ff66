//! Annotation rendering module
//!
//! This module contains:
//! - Geometry calculations shared by tools, frames and export
//! - Image rendering using tiny-skia
//! - Per-frame primitives for the canvas surface
//! - Region export and PNG output

pub mod export;
pub mod frame;
pub mod geometry;
pub mod image;
