//! Gopad Core - incremental Go syntax highlighting engine.
//!
//! This crate contains the highlighting data model and algorithms without
//! any dependencies on windowing or rendering systems: the UI layer feeds
//! in full text and edit deltas and reads colored span layers back out.

pub mod highlighter;
pub mod layer;
mod reposition;
pub mod span;
pub mod theme;

pub use highlighter::{Highlighter, ParseError};
pub use layer::LayerStore;
pub use span::{Edit, Span};
pub use theme::{Color, Theme, TokenStyle};
