//! Outline tree nodes.
//!
//! An [`OutlineNode`] is one entry in the navigation tree: a package, one of
//! the four fixed declaration groups, a type, or a single declaration. The
//! stored tree is what path lookup runs over; rendering goes through the
//! display view, which skips single-child chains.

use gopad_core::Color;
use std::path::PathBuf;

/// Color for package nodes.
pub const PACKAGE_COLOR: Color = [0.9, 0.6, 0.8, 1.0];
/// Color for the fixed declaration group nodes.
pub const GROUP_COLOR: Color = [0.6, 0.8, 1.0, 1.0];
/// Color for named declarations.
pub const NAME_COLOR: Color = [0.6, 1.0, 0.5, 1.0];

/// Source position of a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// File the declaration appears in.
    pub file: PathBuf,
    /// Byte offset of the declaration.
    pub offset: usize,
}

/// One entry in an outline tree.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineNode {
    /// Display name.
    pub name: String,
    /// Dotted hierarchical path, unique within one outline tree and
    /// encoding the parent chain (e.g. `pkg.types.Foo.Bar`).
    pub path: String,
    /// Display color.
    pub color: Color,
    /// Where the declaration lives; `None` for packages and groups.
    pub location: Option<Location>,
    /// Child entries, in declaration-encounter order.
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    /// Creates a childless node without a source location.
    pub fn new(name: impl Into<String>, path: impl Into<String>, color: Color) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            color,
            location: None,
            children: Vec::new(),
        }
    }

    /// Creates a leaf pointing at a declaration.
    pub fn leaf(
        name: impl Into<String>,
        path: impl Into<String>,
        color: Color,
        location: Location,
    ) -> Self {
        Self {
            location: Some(location),
            ..Self::new(name, path, color)
        }
    }

    /// Looks up a node by its dotted path in the stored tree.
    pub fn find(&self, path: &str) -> Option<&OutlineNode> {
        if self.path == path {
            return Some(self);
        }
        for child in &self.children {
            if path == child.path || path.starts_with(&format!("{}.", child.path)) {
                return child.find(path);
            }
        }
        None
    }

    /// Returns the node this one renders as.
    ///
    /// A node with exactly one child displays as that child, recursively,
    /// so a group holding a single declaration decorates as the declaration
    /// itself. The stored tree is untouched; [`OutlineNode::find`] still
    /// operates on the full data.
    pub fn display(&self) -> &OutlineNode {
        if self.children.len() == 1 {
            self.children[0].display()
        } else {
            self
        }
    }

    /// Children of the rendered node.
    pub fn display_children(&self) -> &[OutlineNode] {
        &self.display().children
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group_with_one_const() -> OutlineNode {
        let mut group = OutlineNode::new("constants", "pkg.constants", GROUP_COLOR);
        group.children.push(OutlineNode::leaf(
            "MaxSize",
            "pkg.constants.MaxSize",
            NAME_COLOR,
            Location {
                file: PathBuf::from("lib.go"),
                offset: 24,
            },
        ));
        group
    }

    #[test]
    fn test_single_child_collapses_for_display() {
        let group = group_with_one_const();
        let shown = group.display();
        assert_eq!(shown.name, "MaxSize");
        assert_eq!(shown.path, "pkg.constants.MaxSize");
        assert!(shown.children.is_empty());
    }

    #[test]
    fn test_collapse_does_not_touch_stored_tree() {
        let group = group_with_one_const();
        let _ = group.display();
        assert_eq!(group.name, "constants");
        assert_eq!(group.children.len(), 1);
        assert!(group.find("pkg.constants.MaxSize").is_some());
    }

    #[test]
    fn test_multi_child_node_displays_as_itself() {
        let mut group = group_with_one_const();
        group
            .children
            .push(OutlineNode::new("MinSize", "pkg.constants.MinSize", NAME_COLOR));
        assert_eq!(group.display().name, "constants");
        assert_eq!(group.display_children().len(), 2);
    }

    #[test]
    fn test_collapse_is_recursive() {
        let mut outer = OutlineNode::new("types", "pkg.types", GROUP_COLOR);
        let mut ty = OutlineNode::new("Foo", "pkg.types.Foo", NAME_COLOR);
        ty.children
            .push(OutlineNode::new("Bar", "pkg.types.Foo.Bar", NAME_COLOR));
        outer.children.push(ty);
        // types -> Foo -> Bar, each link single-child.
        assert_eq!(outer.display().name, "Bar");
    }

    #[test]
    fn test_find_descends_by_path_prefix() {
        let mut pkg = OutlineNode::new("pkg", "pkg", PACKAGE_COLOR);
        pkg.children.push(group_with_one_const());
        pkg.children
            .push(OutlineNode::new("funcs", "pkg.funcs", GROUP_COLOR));

        assert_eq!(pkg.find("pkg.constants.MaxSize").unwrap().name, "MaxSize");
        assert_eq!(pkg.find("pkg.funcs").unwrap().name, "funcs");
        assert!(pkg.find("pkg.types.Foo").is_none());
    }
}
