//! Annotation session
//!
//! This module contains:
//! - Input event types
//! - The session object and its interaction state machine
//! - Keyboard shortcut mapping

pub mod messages;
pub mod shortcuts;
pub mod state;

pub use messages::{InputEvent, KeyInput, PointerButton};
pub use state::{InteractionState, Session};
