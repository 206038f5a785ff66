//! Pure domain types with minimal dependencies
//!
//! This module contains core types used throughout the crate.
//! Types here know nothing about sessions, tools in progress or rendering.

pub mod annotation;
pub mod geometry;
pub mod selection;
pub mod tool;

pub use annotation::*;
pub use geometry::*;
pub use selection::*;
pub use tool::*;
