//! Display width of grapheme clusters.
//!
//! `egc_width` is the single authority for terminal cell widths used by the
//! wrapper and by vertical cursor movement. `unicode_width` gives the baseline
//! for single code points; multi code point clusters are classified first so
//! emoji sequences (ZWJ families, flags, keycaps, skin tones) count as one wide
//! cell pair instead of the sum of their parts.
//!
//! Invariants:
//! - Every display width decision in the workspace flows through `egc_width`.
//! - Classification errs toward over-estimating emoji widths.

use unicode_width::UnicodeWidthChar;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClusterKind {
    Narrow,
    Wide,
    Emoji,
    /// Base + combining marks; `true` when the base itself is wide.
    Combining(bool),
    /// Zero-width on its own (lone combining mark, control).
    Zero,
}

const ZWJ: char = '\u{200D}';
const KEYCAP: char = '\u{20E3}';

fn is_regional_indicator(c: char) -> bool {
    ('\u{1F1E6}'..='\u{1F1FF}').contains(&c)
}

fn is_skin_tone(c: char) -> bool {
    ('\u{1F3FB}'..='\u{1F3FF}').contains(&c)
}

fn is_pictographic(c: char) -> bool {
    ('\u{1F300}'..='\u{1FAFF}').contains(&c) || ('\u{2600}'..='\u{27BF}').contains(&c)
}

fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
        || ('\u{1AB0}'..='\u{1AFF}').contains(&c)
        || ('\u{1DC0}'..='\u{1DFF}').contains(&c)
        || ('\u{20D0}'..='\u{20FF}').contains(&c)
        || ('\u{FE20}'..='\u{FE2F}').contains(&c)
}

fn char_cells(c: char) -> usize {
    // Tabs and other controls report `None`; render them as one cell so the
    // wrapper always makes progress.
    c.width().unwrap_or(1)
}

fn classify(egc: &str) -> ClusterKind {
    let mut chars = egc.chars();
    let Some(first) = chars.next() else {
        return ClusterKind::Zero;
    };
    if chars.next().is_none() {
        if first.is_ascii() {
            return ClusterKind::Narrow;
        }
        if is_pictographic(first) {
            return ClusterKind::Emoji;
        }
        return match first.width() {
            Some(0) => ClusterKind::Zero,
            Some(2) => ClusterKind::Wide,
            _ => ClusterKind::Narrow,
        };
    }

    let mut pictographic = 0usize;
    let mut regional = 0usize;
    let mut has_zwj = false;
    let mut has_skin = false;
    let mut has_keycap = false;
    let mut has_combining = false;
    let mut any_wide = false;
    for c in egc.chars() {
        if is_pictographic(c) {
            pictographic += 1;
        }
        if is_regional_indicator(c) {
            regional += 1;
        }
        has_zwj |= c == ZWJ;
        has_skin |= is_skin_tone(c);
        has_keycap |= c == KEYCAP;
        has_combining |= is_combining_mark(c);
        any_wide |= c.width() == Some(2);
    }

    if has_keycap || regional == 2 || (has_zwj && pictographic >= 2) {
        return ClusterKind::Emoji;
    }
    if pictographic >= 1 && (has_skin || !has_zwj) {
        return ClusterKind::Emoji;
    }
    if has_combining {
        let base_wide = is_pictographic(first) || first.width() == Some(2);
        return ClusterKind::Combining(base_wide);
    }
    if any_wide {
        return ClusterKind::Wide;
    }
    if pictographic > 0 || regional > 0 {
        return ClusterKind::Emoji;
    }
    ClusterKind::Narrow
}

/// Terminal cell width of a single grapheme cluster.
///
/// Precondition: `egc` is exactly one grapheme cluster (callers segment first).
/// An empty slice has width 0.
#[inline]
pub fn egc_width(egc: &str) -> usize {
    match classify(egc) {
        ClusterKind::Zero => {
            // A lone control still needs a cell; a lone combining mark does not.
            match egc.chars().next() {
                Some(c) if c.is_control() => char_cells(c),
                _ => 0,
            }
        }
        ClusterKind::Narrow | ClusterKind::Combining(false) => 1,
        ClusterKind::Wide | ClusterKind::Emoji | ClusterKind::Combining(true) => 2,
    }
}

/// Display width of an arbitrary string (sum over its grapheme clusters).
pub fn str_width(s: &str) -> usize {
    crate::grapheme::iter(s).map(egc_width).sum()
}
