//! Styled character sequences and the edit-preserving text diff.
//!
//! The explorer keeps the ciphertext as an ordered sequence of
//! [`StyledChar`]s. Position in the sequence is the logical text index —
//! the join key into the position map — so entries are never reordered;
//! they are created by the diff when text changes and mutated in place
//! when a color is applied to a selected range.
//!
//! The diff is a minimal single pass: longest common prefix, longest
//! common suffix bounded to not overlap the prefix, everything in between
//! replaced by fresh unstyled entries. An edit touching the interior
//! loses styling for that whole span; this is an accepted simplification.

use std::collections::HashSet;

use crate::text::graphemes;

/// A single character of the explorer text with optional styling.
///
/// `ch` is one grapheme cluster, not a `char`: cipher glyph fonts map
/// multi-scalar clusters to single symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledChar {
    /// The character (one grapheme cluster).
    pub ch: String,
    /// Text color, if a style was applied.
    pub color: Option<String>,
    /// Background color, if a style was applied.
    pub background_color: Option<String>,
}

impl StyledChar {
    /// Create an unstyled character.
    pub fn new(ch: impl Into<String>) -> Self {
        Self {
            ch: ch.into(),
            color: None,
            background_color: None,
        }
    }
}

/// Which style slot a color application targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleTarget {
    /// The character (foreground) color.
    Text,
    /// The cell background color.
    Background,
}

/// Diff `old` against `new_text`, preserving styles where characters
/// survived the edit.
///
/// Computes the longest common prefix `p` and the longest common suffix
/// `s` with `p + s <= min(old_len, new_len)`, then builds the result as
/// the first `p` old entries, `new_len - p - s` fresh unstyled entries,
/// and the last `s` old entries.
pub fn diff_styled(old: &[StyledChar], new_text: &str) -> Vec<StyledChar> {
    let new_chars = graphemes(new_text);
    let old_len = old.len();
    let new_len = new_chars.len();
    let max_common = old_len.min(new_len);

    let mut prefix = 0;
    while prefix < max_common && old[prefix].ch == new_chars[prefix] {
        prefix += 1;
    }

    let mut suffix = 0;
    while suffix < max_common - prefix
        && old[old_len - 1 - suffix].ch == new_chars[new_len - 1 - suffix]
    {
        suffix += 1;
    }

    let mut result = Vec::with_capacity(new_len);
    result.extend_from_slice(&old[..prefix]);
    result.extend(
        new_chars[prefix..new_len - suffix]
            .iter()
            .map(|&ch| StyledChar::new(ch)),
    );
    result.extend_from_slice(&old[old_len - suffix..]);
    result
}

/// Apply `color` to the targeted style slot of every selected index.
///
/// `None` clears the slot (style reset). Out-of-range indices are
/// ignored. Returns `true` if any entry changed.
pub fn apply_color(
    chars: &mut [StyledChar],
    indices: &HashSet<usize>,
    color: Option<&str>,
    target: StyleTarget,
) -> bool {
    let mut changed = false;
    for &index in indices {
        let Some(entry) = chars.get_mut(index) else {
            continue;
        };
        let slot = match target {
            StyleTarget::Text => &mut entry.color,
            StyleTarget::Background => &mut entry.background_color,
        };
        let next = color.map(str::to_owned);
        if *slot != next {
            *slot = next;
            changed = true;
        }
    }
    changed
}

/// Build an unstyled sequence directly from text (initial load).
pub fn styled_from_text(text: &str) -> Vec<StyledChar> {
    graphemes(text).into_iter().map(StyledChar::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colored(ch: &str, color: &str) -> StyledChar {
        StyledChar {
            ch: ch.to_string(),
            color: Some(color.to_string()),
            background_color: None,
        }
    }

    fn text_of(chars: &[StyledChar]) -> String {
        chars.iter().map(|c| c.ch.as_str()).collect()
    }

    #[test]
    fn test_append_preserves_all_old_styles() {
        let old: Vec<StyledChar> = "HELLO".chars().map(|c| colored(&c.to_string(), "#cc0000")).collect();
        let result = diff_styled(&old, "HELLO WORLD");

        assert_eq!(text_of(&result), "HELLO WORLD");
        for entry in &result[..5] {
            assert_eq!(entry.color.as_deref(), Some("#cc0000"));
        }
        for entry in &result[5..] {
            assert_eq!(entry.color, None);
        }
    }

    #[test]
    fn test_interior_replacement_loses_only_the_replaced_span() {
        let old: Vec<StyledChar> = "HELLO".chars().map(|c| colored(&c.to_string(), "#008000")).collect();
        // prefix = 1 ("H"), suffix = 3 ("LLO"): only index 1 is rebuilt.
        let result = diff_styled(&old, "HXLLO");

        assert_eq!(text_of(&result), "HXLLO");
        assert_eq!(result[0].color.as_deref(), Some("#008000"));
        assert_eq!(result[1].color, None);
        for entry in &result[2..] {
            assert_eq!(entry.color.as_deref(), Some("#008000"));
        }
    }

    #[test]
    fn test_deletion_keeps_surviving_styles() {
        let old: Vec<StyledChar> = "ABCD".chars().map(|c| colored(&c.to_string(), "#000080")).collect();
        let result = diff_styled(&old, "AD");

        assert_eq!(text_of(&result), "AD");
        assert_eq!(result[0].color.as_deref(), Some("#000080"));
        assert_eq!(result[1].color.as_deref(), Some("#000080"));
    }

    #[test]
    fn test_suffix_bounded_by_prefix() {
        // "AA" -> "AAA": prefix consumes both old chars; the suffix scan
        // must not overlap them.
        let old = styled_from_text("AA");
        let result = diff_styled(&old, "AAA");
        assert_eq!(text_of(&result), "AAA");
    }

    #[test]
    fn test_empty_transitions() {
        assert_eq!(diff_styled(&[], "AB").len(), 2);
        assert!(diff_styled(&styled_from_text("AB"), "").is_empty());
    }

    #[test]
    fn test_apply_color_sets_and_clears() {
        let mut chars = styled_from_text("ABC");
        let selected: HashSet<usize> = [0, 2].into_iter().collect();

        assert!(apply_color(&mut chars, &selected, Some("#ff0000"), StyleTarget::Text));
        assert_eq!(chars[0].color.as_deref(), Some("#ff0000"));
        assert_eq!(chars[1].color, None);
        assert_eq!(chars[2].color.as_deref(), Some("#ff0000"));

        assert!(apply_color(&mut chars, &selected, None, StyleTarget::Text));
        assert_eq!(chars[0].color, None);
        assert_eq!(chars[2].color, None);
    }

    #[test]
    fn test_apply_color_noop_cases() {
        let mut chars = styled_from_text("ABC");
        let empty = HashSet::new();
        assert!(!apply_color(&mut chars, &empty, Some("#ff0000"), StyleTarget::Background));

        let out_of_range: HashSet<usize> = [10].into_iter().collect();
        assert!(!apply_color(&mut chars, &out_of_range, Some("#ff0000"), StyleTarget::Background));
    }
}
