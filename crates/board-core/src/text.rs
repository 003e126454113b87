//! Input text sanitizing.
//!
//! Raw canvas text reaches the core with line breaks the layouts must not
//! see: both the tile generator and the diff engine operate on a single
//! linear run of characters. The caller policy is "strip `\n`/`\r`
//! sequences before diffing"; spaces are kept or removed per
//! [`SpacesPolicy`].

use std::sync::OnceLock;

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

/// What to do with ASCII spaces in the input text.
///
/// Even when kept, spaces never become tiles; they leave holes in the
/// generated grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpacesPolicy {
    /// Keep spaces in the linear text.
    #[default]
    Keep,
    /// Strip spaces before laying out.
    Remove,
}

fn line_break_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\n\r]+").expect("valid pattern"))
}

/// Strip line-break runs (and, per policy, spaces) from raw input text.
///
/// Idempotent: sanitizing already-sanitized text returns it unchanged.
pub fn sanitize(input: &str, spaces: SpacesPolicy) -> String {
    let flat = line_break_runs().replace_all(input, "");
    match spaces {
        SpacesPolicy::Keep => flat.into_owned(),
        SpacesPolicy::Remove => flat.replace(' ', ""),
    }
}

/// Split sanitized text into its grapheme clusters.
///
/// Cluster position in the returned sequence is the logical text index
/// used throughout the board (styled characters, position maps, tile
/// generation).
pub fn graphemes(text: &str) -> Vec<&str> {
    text.graphemes(true).collect()
}
