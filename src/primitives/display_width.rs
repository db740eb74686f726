//! Display width helpers
//!
//! Labels are measured in terminal columns, not chars or bytes, so that
//! wide (CJK) characters and zero-width combining marks line up in popups.

use unicode_width::UnicodeWidthStr;

/// Width of a string in terminal columns.
pub fn str_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Left-justify `s` to `width` columns, padding with spaces.
///
/// Strings already wider than `width` are returned unchanged.
pub fn pad_to_width(s: &str, width: usize) -> String {
    let current = str_width(s);
    let mut padded = String::with_capacity(s.len() + width.saturating_sub(current));
    padded.push_str(s);
    for _ in current..width {
        padded.push(' ');
    }
    padded
}
