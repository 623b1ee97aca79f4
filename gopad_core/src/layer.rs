//! Span layers keyed by token style.
//!
//! A [`LayerStore`] is the complete highlighting snapshot for one document:
//! for every style, the ordered spans where that style applies. Stores are
//! produced by a full parse and then kept roughly in sync with the text via
//! [`LayerStore::apply_edits`] until the next parse replaces them.

use crate::reposition;
use crate::span::{Edit, Span};
use crate::theme::TokenStyle;
use std::collections::BTreeMap;

/// All highlight spans for one document snapshot, grouped by style.
///
/// Spans within one layer never overlap and appear in source order.
/// Iteration order over layers is deterministic (ordered by style).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerStore {
    layers: BTreeMap<TokenStyle, Vec<Span>>,
}

impl LayerStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a span to the layer for `style`.
    pub fn add(&mut self, style: TokenStyle, span: Span) {
        self.layers.entry(style).or_default().push(span);
    }

    /// Returns the spans recorded for `style`, empty if none.
    pub fn layer(&self, style: TokenStyle) -> &[Span] {
        self.layers.get(&style).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterates over all layers in style order.
    pub fn layers(&self) -> impl Iterator<Item = (TokenStyle, &[Span])> {
        self.layers.iter().map(|(style, spans)| (*style, spans.as_slice()))
    }

    /// Returns the number of distinct styles with at least one span.
    pub fn style_count(&self) -> usize {
        self.layers.len()
    }

    /// Returns the total number of spans across all layers.
    pub fn span_count(&self) -> usize {
        self.layers.values().map(Vec::len).sum()
    }

    /// Returns whether the store holds no spans at all.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Repositions every span in the store across an ordered edit batch.
    ///
    /// This is the cheap incremental path: boundaries move, categories do
    /// not. It cannot fail; all arithmetic is clamped to valid extents.
    pub fn apply_edits(&mut self, edits: &[Edit]) {
        if edits.is_empty() {
            return;
        }
        for spans in self.layers.values_mut() {
            for span in spans.iter_mut() {
                *span = reposition::move_span(*span, edits);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> LayerStore {
        let mut store = LayerStore::new();
        store.add(TokenStyle::Keyword, Span::new(0, 7));
        store.add(TokenStyle::Keyword, Span::new(12, 16));
        store.add(TokenStyle::String, Span::new(20, 26));
        store
    }

    #[test]
    fn test_add_and_lookup() {
        let store = sample_store();
        assert_eq!(store.layer(TokenStyle::Keyword).len(), 2);
        assert_eq!(store.layer(TokenStyle::String), &[Span::new(20, 26)]);
        assert!(store.layer(TokenStyle::Comment).is_empty());
        assert_eq!(store.style_count(), 2);
        assert_eq!(store.span_count(), 3);
    }

    #[test]
    fn test_layers_iteration_is_ordered() {
        let store = sample_store();
        let styles: Vec<TokenStyle> = store.layers().map(|(style, _)| style).collect();
        assert_eq!(styles, vec![TokenStyle::Keyword, TokenStyle::String]);
    }

    #[test]
    fn test_apply_empty_batch_is_noop() {
        let mut store = sample_store();
        let before = store.clone();
        store.apply_edits(&[]);
        assert_eq!(store, before);
    }

    #[test]
    fn test_apply_edit_after_all_spans_is_noop() {
        let mut store = sample_store();
        let before = store.clone();
        store.apply_edits(&[Edit::insertion(100, 8)]);
        assert_eq!(store, before);
    }

    #[test]
    fn test_apply_edit_shifts_all_layers() {
        let mut store = sample_store();
        store.apply_edits(&[Edit::insertion(0, 3)]);
        assert_eq!(store.layer(TokenStyle::Keyword)[0], Span::new(3, 10));
        assert_eq!(store.layer(TokenStyle::Keyword)[1], Span::new(15, 19));
        assert_eq!(store.layer(TokenStyle::String)[0], Span::new(23, 29));
    }
}
