//! Gopad Outline - structural outline builder for Go packages.
//!
//! Parses a directory of Go source files into a navigable tree: packages,
//! then constants / global vars / types / funcs, with methods nested under
//! their receiver types. Rebuilds are wholesale; a single-slot gate
//! coalesces bursts of reload requests.

pub mod builder;
pub mod node;
pub mod reload;

pub use builder::{build_outline, Outline, OutlineError};
pub use node::{Location, OutlineNode, GROUP_COLOR, NAME_COLOR, PACKAGE_COLOR};
pub use reload::{ReloadGate, ReloadPermit};
