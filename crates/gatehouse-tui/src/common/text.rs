//! Text utilities for single-line input fields.
//!
//! Everything here is grapheme- and width-aware so that editing and cursor
//! placement stay correct for wide characters.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Character used to mask password input.
pub const MASK_CHAR: char = '•';

/// Removes the last grapheme cluster. Returns false if `text` was empty.
pub fn pop_grapheme(text: &mut String) -> bool {
    let Some((idx, _)) = text.grapheme_indices(true).next_back() else {
        return false;
    };
    text.truncate(idx);
    true
}

/// Masks every grapheme with [`MASK_CHAR`].
pub fn mask(text: &str) -> String {
    text.graphemes(true).map(|_| MASK_CHAR).collect()
}

/// Strips control characters (newlines, tabs, escapes) from typed or pasted
/// input. Fields are single-line.
pub fn sanitize_input(text: &str) -> String {
    text.chars().filter(|c| !c.is_control()).collect()
}

/// Display width in terminal columns.
pub fn display_width(text: &str) -> usize {
    text.width()
}

/// Returns the longest suffix of `text` that fits in `max_width` columns.
///
/// Used to keep the end of a long input (where the cursor is) visible.
pub fn tail_fit(text: &str, max_width: usize) -> &str {
    if text.width() <= max_width {
        return text;
    }
    let mut width = 0;
    let mut start = text.len();
    for (idx, ch) in text.char_indices().rev() {
        let w = ch.width().unwrap_or(0);
        if width + w > max_width {
            break;
        }
        width += w;
        start = idx;
    }
    &text[start..]
}
