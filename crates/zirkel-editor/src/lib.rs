//! Zirkel Editor
//!
//! The interactive layer of the construction engine:
//! - Editor: the owned controller routing every mutation and persisting
//!   the scene after each one
//! - Construction: the pending multi-click state with its derived preview
//! - InputEvent: semantic actions from the input-device collaborator
//! - persistence: the key-value scene store and its file/memory backends

pub mod colors;
pub mod config;
pub mod construct;
pub mod editor;
pub mod input;
pub mod persist;

pub use colors::*;
pub use config::*;
pub use construct::*;
pub use editor::*;
pub use input::*;
pub use persist::*;
