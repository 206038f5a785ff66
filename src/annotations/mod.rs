//! Annotation list, tool behaviors, and pointer dispatch
//!
//! This module provides:
//! - `AnnotationList`, the committed annotations with LIFO undo
//! - In-progress objects for every drawing tool
//! - `ToolHandler`, which routes pointer gestures to the selected tool

pub mod handlers;
pub mod list;
pub mod tools;

pub use handlers::{ActiveTool, ToolHandler};
pub use list::AnnotationList;
pub use tools::{CommitContext, ToolContext};
