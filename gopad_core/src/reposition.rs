//! Incremental span repositioning.
//!
//! Adjusts previously computed span boundaries after text edits without
//! reclassifying any text. Spans may become approximately, not exactly,
//! correct until the next full parse; the arithmetic here only guarantees
//! that no span ever ends up with impossible bounds.

use crate::span::{Edit, Span};

/// Moves one span across an ordered batch of edits.
///
/// An edit beyond the span's end leaves it alone. Any other edit shifts the
/// span's end by the edit's length delta, and also shifts the start when the
/// edit begins at or before it. Both boundaries are clamped so they never
/// fall before the edit position; edits landing exactly on a boundary are
/// clamped into the span rather than excluded.
pub(crate) fn move_span(mut span: Span, edits: &[Edit]) -> Span {
    for edit in edits {
        if edit.at > span.end {
            continue;
        }
        let delta = edit.delta();
        if delta == 0 {
            continue;
        }
        span.end = shift(span.end, delta, edit.at);
        if edit.at > span.start {
            continue;
        }
        span.start = shift(span.start, delta, edit.at);
    }
    span
}

/// Applies `delta` to `offset`, clamped so the result never falls below
/// `floor` (the edit position).
fn shift(offset: usize, delta: isize, floor: usize) -> usize {
    offset.saturating_add_signed(delta).max(floor)
}
