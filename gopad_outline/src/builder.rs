//! Directory outline construction.
//!
//! Parses every Go file directly inside one directory (no recursion into
//! subdirectories) and buckets top-level declarations into one tree per
//! package: constants, global vars, types, funcs, in that fixed order.
//! There is no incremental update; a reload rebuilds the whole tree.

use crate::node::{Location, OutlineNode, GROUP_COLOR, NAME_COLOR, PACKAGE_COLOR};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tree_sitter::{Node, Parser};

/// Errors that abort an outline build entirely.
///
/// Per-file problems never surface here; they are logged and the file is
/// skipped, so other packages in the same scan still produce results.
#[derive(Debug, Error)]
pub enum OutlineError {
    /// The Go grammar could not be loaded into the tree-sitter runtime.
    #[error("failed to load Go grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),
    /// The directory itself could not be read.
    #[error("failed to read directory {}: {}", dir.display(), source)]
    ReadDir {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A navigable outline of every Go package found in one directory.
#[derive(Debug, Clone, PartialEq)]
pub struct Outline {
    dir: PathBuf,
    packages: Vec<OutlineNode>,
}

impl Outline {
    /// Returns the directory this outline was built from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns one tree per package, sorted by package name.
    pub fn packages(&self) -> &[OutlineNode] {
        &self.packages
    }

    /// Re-runs the directory scan, replacing the stored packages wholesale.
    pub fn reload(&mut self) -> Result<(), OutlineError> {
        let fresh = build_outline(&self.dir)?;
        self.packages = fresh.packages;
        Ok(())
    }
}

/// Builds an outline of every Go package in `dir`.
pub fn build_outline(dir: impl AsRef<Path>) -> Result<Outline, OutlineError> {
    let dir = dir.as_ref();

    let mut parser = Parser::new();
    let language: tree_sitter::Language = tree_sitter_go::LANGUAGE.into();
    parser.set_language(&language)?;

    let mut packages: HashMap<String, PackageBuilder> = HashMap::new();
    for path in go_files(dir)? {
        let source = match fs::read_to_string(&path) {
            Ok(source) => source,
            Err(err) => {
                log::error!("failed to read {}: {}", path.display(), err);
                continue;
            }
        };
        let tree = match parser.parse(&source, None) {
            Some(tree) => tree,
            None => {
                log::error!("failed to parse {}", path.display());
                continue;
            }
        };
        scan_file(&path, &source, tree.root_node(), &mut packages);
    }

    let mut builders: Vec<PackageBuilder> = packages.into_values().collect();
    builders.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(Outline {
        dir: dir.to_path_buf(),
        packages: builders.into_iter().map(PackageBuilder::finish).collect(),
    })
}

/// Lists the Go files directly inside `dir`, sorted for deterministic
/// output. Dot-files and subdirectories are skipped.
fn go_files(dir: &Path) -> Result<Vec<PathBuf>, OutlineError> {
    let entries = fs::read_dir(dir).map_err(|source| OutlineError::ReadDir {
        dir: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log::error!("failed to read entry in {}: {}", dir.display(), err);
                continue;
            }
        };
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|ext| ext.to_str()) != Some("go") {
            continue;
        }
        match path.file_name().and_then(|name| name.to_str()) {
            Some(name) if !name.starts_with('.') => files.push(path),
            _ => {}
        }
    }
    files.sort();
    Ok(files)
}

/// Buckets one file's top-level declarations into its package builder.
fn scan_file(
    path: &Path,
    source: &str,
    root: Node,
    packages: &mut HashMap<String, PackageBuilder>,
) {
    let pkg_name = match package_name(source, root) {
        Some(name) => name,
        None => {
            log::warn!("no package clause in {}", path.display());
            return;
        }
    };
    let pkg = packages
        .entry(pkg_name.clone())
        .or_insert_with(|| PackageBuilder::new(&pkg_name));

    let mut cursor = root.walk();
    for decl in root.named_children(&mut cursor) {
        match decl.kind() {
            "const_declaration" => pkg.add_values(path, source, decl, ValueGroup::Constants),
            "var_declaration" => pkg.add_values(path, source, decl, ValueGroup::GlobalVars),
            "type_declaration" => pkg.add_types(path, source, decl),
            "function_declaration" => pkg.add_function(path, source, decl),
            "method_declaration" => pkg.add_method(path, source, decl),
            _ => {}
        }
    }
}

fn package_name(source: &str, root: Node) -> Option<String> {
    let mut cursor = root.walk();
    let clause = root
        .named_children(&mut cursor)
        .find(|node| node.kind() == "package_clause")?;
    let mut idents = clause.walk();
    let ident = clause
        .named_children(&mut idents)
        .find(|node| node.kind() == "package_identifier")?;
    Some(node_text(source, ident).to_string())
}

fn node_text<'a>(source: &'a str, node: Node) -> &'a str {
    &source[node.start_byte()..node.end_byte()]
}

/// Which of the two value groups a declaration lands in.
#[derive(Debug, Clone, Copy)]
enum ValueGroup {
    Constants,
    GlobalVars,
}

impl ValueGroup {
    fn label(self) -> &'static str {
        match self {
            ValueGroup::Constants => "constants",
            ValueGroup::GlobalVars => "global vars",
        }
    }
}

/// Declarations accumulated for one package before its tree is assembled.
struct PackageBuilder {
    name: String,
    consts: Vec<OutlineNode>,
    vars: Vec<OutlineNode>,
    funcs: Vec<OutlineNode>,
    types: TypeArena,
}

impl PackageBuilder {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            consts: Vec::new(),
            vars: Vec::new(),
            funcs: Vec::new(),
            types: TypeArena::new(),
        }
    }

    /// Adds one leaf per declared name in a `const` or `var` declaration.
    fn add_values(&mut self, file: &Path, source: &str, decl: Node, group: ValueGroup) {
        let parent = format!("{}.{}", self.name, group.label());
        let mut cursor = decl.walk();
        for spec in decl.named_children(&mut cursor) {
            if !matches!(spec.kind(), "const_spec" | "var_spec") {
                continue;
            }
            let mut names = spec.walk();
            for ident in spec.children_by_field_name("name", &mut names) {
                let name = node_text(source, ident);
                let leaf = OutlineNode::leaf(
                    name,
                    format!("{}.{}", parent, name),
                    NAME_COLOR,
                    Location {
                        file: file.to_path_buf(),
                        offset: ident.start_byte(),
                    },
                );
                match group {
                    ValueGroup::Constants => self.consts.push(leaf),
                    ValueGroup::GlobalVars => self.vars.push(leaf),
                }
            }
        }
    }

    /// Declares the named types in a `type` declaration.
    ///
    /// A method on the type may already have been visited, since
    /// declaration order across files is not guaranteed; the existing
    /// arena entry is filled in rather than duplicated.
    fn add_types(&mut self, file: &Path, source: &str, decl: Node) {
        let mut cursor = decl.walk();
        for spec in decl.named_children(&mut cursor) {
            if spec.kind() != "type_spec" {
                continue;
            }
            let ident = match spec.child_by_field_name("name") {
                Some(ident) => ident,
                None => continue,
            };
            let type_name = node_text(source, ident).to_string();
            let pkg = self.name.clone();
            let entry = self.types.declare(&type_name, &pkg);
            entry.location = Some(Location {
                file: file.to_path_buf(),
                offset: spec.start_byte(),
            });
        }
    }

    fn add_function(&mut self, file: &Path, source: &str, decl: Node) {
        let ident = match decl.child_by_field_name("name") {
            Some(ident) => ident,
            None => return,
        };
        let name = node_text(source, ident);
        self.funcs.push(OutlineNode::leaf(
            name,
            format!("{}.funcs.{}", self.name, name),
            NAME_COLOR,
            Location {
                file: file.to_path_buf(),
                offset: decl.start_byte(),
            },
        ));
    }

    /// Attaches a method to its receiver type's node, creating a
    /// placeholder entry when the type declaration has not been seen yet.
    fn add_method(&mut self, file: &Path, source: &str, decl: Node) {
        let ident = match decl.child_by_field_name("name") {
            Some(ident) => ident,
            None => return,
        };
        let name = node_text(source, ident);
        let recv = match receiver_type_name(source, decl) {
            Some(recv) => recv,
            None => {
                log::warn!(
                    "could not resolve receiver type for method {} in {}",
                    name,
                    file.display()
                );
                return;
            }
        };
        let method = OutlineNode::leaf(
            name,
            format!("{}.types.{}.{}", self.name, recv, name),
            NAME_COLOR,
            Location {
                file: file.to_path_buf(),
                offset: decl.start_byte(),
            },
        );
        let pkg = self.name.clone();
        self.types.entry_mut(&recv, &pkg).children.push(method);
    }

    fn finish(self) -> OutlineNode {
        let types = self.types.into_declared();
        OutlineNode {
            name: self.name.clone(),
            path: self.name.clone(),
            color: PACKAGE_COLOR,
            location: None,
            children: vec![
                group(&self.name, "constants", self.consts),
                group(&self.name, "global vars", self.vars),
                group(&self.name, "types", types),
                group(&self.name, "funcs", self.funcs),
            ],
        }
    }
}

fn group(pkg: &str, label: &str, children: Vec<OutlineNode>) -> OutlineNode {
    OutlineNode {
        name: label.to_string(),
        path: format!("{}.{}", pkg, label),
        color: GROUP_COLOR,
        location: None,
        children,
    }
}

/// Resolves a method receiver's base type name, dereferencing pointer
/// receivers and stripping type parameters from generic receivers.
fn receiver_type_name(source: &str, decl: Node) -> Option<String> {
    let receiver = decl.child_by_field_name("receiver")?;
    let mut cursor = receiver.walk();
    let param = receiver
        .named_children(&mut cursor)
        .find(|node| node.kind() == "parameter_declaration")?;
    let mut ty = param.child_by_field_name("type")?;
    loop {
        match ty.kind() {
            "pointer_type" => ty = ty.named_child(0)?,
            "generic_type" => ty = ty.child_by_field_name("type")?,
            _ => break,
        }
    }
    if ty.kind() == "type_identifier" {
        Some(node_text(source, ty).to_string())
    } else {
        None
    }
}

/// Type nodes keyed by name, so methods and their receiver's type
/// declaration can arrive in any order across a package's files.
struct TypeArena {
    entries: Vec<OutlineNode>,
    by_name: HashMap<String, usize>,
    /// Indices in declaration-encounter order; only declared types display.
    declared: Vec<usize>,
}

impl TypeArena {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
            by_name: HashMap::new(),
            declared: Vec::new(),
        }
    }

    fn index_of(&mut self, name: &str, pkg: &str) -> usize {
        if let Some(&idx) = self.by_name.get(name) {
            return idx;
        }
        self.entries.push(OutlineNode::new(
            name,
            format!("{}.types.{}", pkg, name),
            NAME_COLOR,
        ));
        let idx = self.entries.len() - 1;
        self.by_name.insert(name.to_string(), idx);
        idx
    }

    /// Inserts or returns the entry for `name`.
    fn entry_mut(&mut self, name: &str, pkg: &str) -> &mut OutlineNode {
        let idx = self.index_of(name, pkg);
        &mut self.entries[idx]
    }

    /// Marks `name` as declared and returns its entry.
    fn declare(&mut self, name: &str, pkg: &str) -> &mut OutlineNode {
        let idx = self.index_of(name, pkg);
        if !self.declared.contains(&idx) {
            self.declared.push(idx);
        }
        &mut self.entries[idx]
    }

    /// Consumes the arena, yielding declared types in declaration order.
    fn into_declared(self) -> Vec<OutlineNode> {
        let mut slots: Vec<Option<OutlineNode>> = self.entries.into_iter().map(Some).collect();
        let nodes = self
            .declared
            .iter()
            .filter_map(|&idx| slots[idx].take())
            .collect();
        for leftover in slots.into_iter().flatten() {
            log::debug!("dropping methods of undeclared type {}", leftover.path);
        }
        nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
    }

    fn types_group(outline: &Outline) -> &OutlineNode {
        &outline.packages()[0].children[2]
    }

    #[test]
    fn test_groups_in_fixed_order() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "lib.go",
            "package demo\n\nconst A = 1\n\nvar G = 2\n\ntype T struct{}\n\nfunc F() {}\n",
        );

        let outline = build_outline(dir.path()).unwrap();

        assert_eq!(outline.packages().len(), 1);
        let pkg = &outline.packages()[0];
        assert_eq!(pkg.name, "demo");
        let labels: Vec<&str> = pkg.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(labels, vec!["constants", "global vars", "types", "funcs"]);

        assert_eq!(pkg.find("demo.constants.A").unwrap().name, "A");
        assert_eq!(pkg.find("demo.global vars.G").unwrap().name, "G");
        assert_eq!(pkg.find("demo.types.T").unwrap().name, "T");
        assert_eq!(pkg.find("demo.funcs.F").unwrap().name, "F");
    }

    #[test]
    fn test_method_seen_before_type_declaration() {
        // Files scan in sorted order, so the method in a.go is visited
        // before the type declaration in z.go.
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.go", "package demo\n\nfunc (f *Foo) Bar() {}\n");
        write(dir.path(), "z.go", "package demo\n\ntype Foo struct{}\n");

        let outline = build_outline(dir.path()).unwrap();

        let types = types_group(&outline);
        assert_eq!(types.children.len(), 1);
        let foo = &types.children[0];
        assert_eq!(foo.name, "Foo");
        assert_eq!(foo.children.len(), 1);
        assert_eq!(foo.children[0].path, "demo.types.Foo.Bar");
        assert!(foo.location.is_some());
    }

    #[test]
    fn test_type_seen_before_method() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.go", "package demo\n\ntype Foo struct{}\n");
        write(dir.path(), "z.go", "package demo\n\nfunc (f *Foo) Bar() {}\n");

        let outline = build_outline(dir.path()).unwrap();

        let types = types_group(&outline);
        assert_eq!(types.children.len(), 1);
        assert_eq!(types.children[0].children.len(), 1);
        assert_eq!(types.children[0].children[0].name, "Bar");
    }

    #[test]
    fn test_value_receiver_method() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "lib.go",
            "package demo\n\ntype Foo struct{}\n\nfunc (f Foo) Baz() {}\n",
        );

        let outline = build_outline(dir.path()).unwrap();

        let foo = &types_group(&outline).children[0];
        assert_eq!(foo.children[0].name, "Baz");
    }

    #[test]
    fn test_grouped_and_multi_name_specs() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "lib.go",
            "package demo\n\nconst (\n\tA = 1\n\tB = 2\n)\n\nconst C, D = 3, 4\n",
        );

        let outline = build_outline(dir.path()).unwrap();

        let consts = &outline.packages()[0].children[0];
        let names: Vec<&str> = consts.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_multiple_packages_sorted() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "z.go", "package zeta\n\nfunc Z() {}\n");
        write(dir.path(), "a.go", "package alpha\n\nfunc A() {}\n");

        let outline = build_outline(dir.path()).unwrap();

        let names: Vec<&str> = outline.packages().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_unreadable_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "lib.go", "package demo\n\nfunc F() {}\n");
        fs::write(dir.path().join("bad.go"), [0xffu8, 0xfe]).unwrap();

        let outline = build_outline(dir.path()).unwrap();

        assert_eq!(outline.packages().len(), 1);
        assert_eq!(outline.packages()[0].name, "demo");
    }

    #[test]
    fn test_non_go_entries_ignored() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "lib.go", "package demo\n\nfunc F() {}\n");
        write(dir.path(), "notes.txt", "package impostor\n");
        write(dir.path(), ".hidden.go", "package impostor\n");
        fs::create_dir(dir.path().join("nested")).unwrap();
        write(&dir.path().join("nested"), "deep.go", "package impostor\n");

        let outline = build_outline(dir.path()).unwrap();

        assert_eq!(outline.packages().len(), 1);
        assert_eq!(outline.packages()[0].name, "demo");
    }

    #[test]
    fn test_empty_directory_yields_empty_outline() {
        let dir = tempfile::tempdir().unwrap();
        let outline = build_outline(dir.path()).unwrap();
        assert!(outline.packages().is_empty());
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("missing");
        assert!(build_outline(&gone).is_err());
    }

    #[test]
    fn test_reload_picks_up_new_files() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "lib.go", "package demo\n\nfunc F() {}\n");

        let mut outline = build_outline(dir.path()).unwrap();
        assert_eq!(outline.packages()[0].children[3].children.len(), 1);

        write(dir.path(), "more.go", "package demo\n\nfunc G() {}\n");
        outline.reload().unwrap();

        let funcs = &outline.packages()[0].children[3];
        assert_eq!(funcs.children.len(), 2);
    }
}
