//! Go syntax walker built on tree-sitter.
//!
//! Walks the concrete syntax tree of a Go source file and classifies token
//! ranges into [`TokenStyle`] layers: keywords, literals, type and function
//! names, comment groups, rainbow brace scopes, and malformed regions. A
//! parse is always a full rebuild; between parses the caller keeps the
//! returned [`LayerStore`] roughly current with
//! [`LayerStore::apply_edits`].

use crate::layer::LayerStore;
use crate::span::Span;
use crate::theme::TokenStyle;
use std::cell::Cell;
use std::rc::Rc;
use thiserror::Error;
use tree_sitter::{Node, Parser};

/// Errors from building the parser or parsing a document.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The Go grammar could not be loaded into the tree-sitter runtime.
    #[error("failed to load Go grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),
    /// No syntax tree could be produced for the document.
    #[error("parser produced no syntax tree")]
    Unparseable,
}

/// Full-document Go syntax highlighter.
///
/// Owns a tree-sitter parser configured for Go. [`Highlighter::parse`]
/// produces a fresh snapshot; it never mutates a previous one.
pub struct Highlighter {
    parser: Parser,
}

impl Highlighter {
    /// Creates a highlighter with a Go-configured parser.
    pub fn new() -> Result<Self, ParseError> {
        let mut parser = Parser::new();
        let language: tree_sitter::Language = tree_sitter_go::LANGUAGE.into();
        parser.set_language(&language)?;
        Ok(Self { parser })
    }

    /// Parses the full source text into a fresh layer store.
    ///
    /// Fails only when no tree can be produced at all; the caller then keeps
    /// whatever stale store it had. Malformed regions inside an otherwise
    /// parseable document become [`TokenStyle::Bad`] spans and do not abort
    /// the walk.
    pub fn parse(&mut self, source: &str) -> Result<LayerStore, ParseError> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or(ParseError::Unparseable)?;

        let mut walker = Walker::new(source);
        walker.walk(tree.root_node());
        walker.merge_comments(tree.root_node());
        Ok(walker.finish())
    }
}

/// Closed set of grammar node kinds the walker reacts to.
///
/// The Go grammar is fixed, so classification is total: anything outside
/// this set recurses transparently as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeKind {
    Keyword,
    Str,
    Number,
    TypeName,
    Identifier,
    Comment,
    Block,
    Error,
    Other,
}

impl NodeKind {
    fn classify(kind: &str) -> Self {
        match kind {
            "package" | "import" | "func" | "var" | "const" | "type" | "struct"
            | "interface" | "map" | "chan" | "if" | "else" | "for" | "range" | "switch"
            | "case" | "default" | "select" | "go" | "defer" | "return" | "break"
            | "continue" | "goto" | "fallthrough" => Self::Keyword,
            "interpreted_string_literal" | "raw_string_literal" | "rune_literal" => Self::Str,
            "int_literal" | "float_literal" | "imaginary_literal" => Self::Number,
            "type_identifier" => Self::TypeName,
            "identifier" | "field_identifier" => Self::Identifier,
            "comment" => Self::Comment,
            // Switch and select bodies carry their brace pair directly
            // instead of wrapping it in a block node.
            "block" | "expression_switch_statement" | "type_switch_statement"
            | "select_statement" => Self::Block,
            "ERROR" => Self::Error,
            _ => Self::Other,
        }
    }
}

/// Tracks brace-scope nesting depth for rainbow coloring.
///
/// `enter` hands out an RAII guard, so the depth is decremented on every
/// exit path from a block's traversal.
struct RainbowScope {
    depth: Rc<Cell<usize>>,
}

impl RainbowScope {
    fn new() -> Self {
        Self {
            depth: Rc::new(Cell::new(0)),
        }
    }

    fn enter(&self) -> ScopeGuard {
        let level = self.depth.get();
        self.depth.set(level + 1);
        ScopeGuard {
            depth: Rc::clone(&self.depth),
            level,
        }
    }
}

struct ScopeGuard {
    depth: Rc<Cell<usize>>,
    level: usize,
}

impl ScopeGuard {
    /// 0-based depth of the scope this guard opened.
    fn level(&self) -> usize {
        self.level
    }
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        self.depth.set(self.depth.get() - 1);
    }
}

/// One walk over one parse tree, accumulating spans into a store.
struct Walker<'a> {
    source: &'a str,
    store: LayerStore,
    scope: RainbowScope,
}

impl<'a> Walker<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            store: LayerStore::new(),
            scope: RainbowScope::new(),
        }
    }

    fn finish(self) -> LayerStore {
        self.store
    }

    fn walk(&mut self, node: Node) {
        if node.is_missing() {
            self.add_bad(node);
            return;
        }
        match NodeKind::classify(node.kind()) {
            NodeKind::Keyword => self.add_keyword(node),
            NodeKind::Str => self.add(TokenStyle::String, node),
            NodeKind::Number => self.add(TokenStyle::Number, node),
            NodeKind::TypeName => self.add(TokenStyle::Type, node),
            NodeKind::Identifier => {
                if let Some(style) = func_style(&node) {
                    self.add(style, node);
                }
            }
            // Comments are extras, merged into groups by a separate pass.
            NodeKind::Comment => {}
            NodeKind::Block => self.walk_block(node),
            NodeKind::Error => self.add_bad(node),
            NodeKind::Other => self.walk_children(node),
        }
    }

    fn walk_children(&mut self, node: Node) {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.walk(child);
        }
    }

    /// Walks a brace-delimited statement inside a rainbow scope, coloring
    /// its brace pair by nesting depth.
    fn walk_block(&mut self, node: Node) {
        let scope = self.scope.enter();
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "{" | "}" => self.add(TokenStyle::Rainbow(scope.level()), child),
                _ => self.walk(child),
            }
        }
    }

    /// Records a keyword span anchored at the token's start offset.
    ///
    /// The length comes from the keyword text itself; Go keywords are plain
    /// ASCII, so the literal length equals the token's byte length.
    fn add_keyword(&mut self, node: Node) {
        let start = node.start_byte();
        self.store
            .add(TokenStyle::Keyword, Span::new(start, start + node.kind().len()));
    }

    fn add(&mut self, style: TokenStyle, node: Node) {
        self.store
            .add(style, Span::new(node.start_byte(), node.end_byte()));
    }

    fn add_bad(&mut self, node: Node) {
        log::warn!(
            "unrecognized syntax at bytes {}..{}",
            node.start_byte(),
            node.end_byte()
        );
        self.add(TokenStyle::Bad, node);
    }

    /// Collects comment tokens and merges each contiguous group into a
    /// single span.
    ///
    /// Comments never take part in statement traversal, so they are
    /// discovered in a second pass over the whole tree.
    fn merge_comments(&mut self, root: Node) {
        let mut comments = Vec::new();
        collect_comments(root, &mut comments);

        let mut group: Option<Span> = None;
        for comment in comments {
            group = Some(match group {
                Some(open) if self.joins_group(open, comment) => {
                    Span::new(open.start, comment.end)
                }
                Some(open) => {
                    self.store.add(TokenStyle::Comment, open);
                    comment
                }
                None => comment,
            });
        }
        if let Some(open) = group {
            self.store.add(TokenStyle::Comment, open);
        }
    }

    /// Two comments belong to one group when only blank space separates
    /// them, spanning at most one line break.
    fn joins_group(&self, group: Span, next: Span) -> bool {
        let gap = &self.source[group.end..next.start];
        gap.chars().all(char::is_whitespace) && gap.matches('\n').count() <= 1
    }
}

/// Classifies an identifier by parent context: the name of a function or
/// method declaration, or the callee of a call expression.
fn func_style(node: &Node) -> Option<TokenStyle> {
    let parent = node.parent()?;
    let field = match parent.kind() {
        "function_declaration" | "method_declaration" => "name",
        "call_expression" => "function",
        _ => return None,
    };
    if parent.child_by_field_name(field) == Some(*node) {
        Some(TokenStyle::Func)
    } else {
        None
    }
}

fn collect_comments(node: Node, out: &mut Vec<Span>) {
    if node.kind() == "comment" {
        out.push(Span::new(node.start_byte(), node.end_byte()));
        return;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_comments(child, out);
    }
}
