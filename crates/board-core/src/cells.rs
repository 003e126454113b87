//! Grid cell projection.
//!
//! Combines the position map with the styled-character sequence into the
//! renderable cell descriptors the UI consumes. Cells are derived, never
//! persisted: the projection is recomputed on every change to text,
//! dimensions, or mode.

use crate::styled::StyledChar;
use crate::transpose::{ExploreMode, GridSpec, PositionMap};

/// Colors used for the derived base shading of explorer cells.
///
/// The actual color values belong to the theme; the core only decides
/// which of the two a cell gets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZonePalette {
    /// Base cell color.
    pub base: String,
    /// Shading color for the homophone-frequency zone.
    pub shaded: String,
}

impl Default for ZonePalette {
    fn default() -> Self {
        Self {
            base: "#ffffff".to_string(),
            shaded: "#d9d9d9".to_string(),
        }
    }
}

/// A renderable cell descriptor.
///
/// `original_index` is the back-reference into the styled-character
/// sequence: a weak reference for lookup, carrying no ownership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCell {
    /// The grid index (stable render key).
    pub id: usize,
    /// 1-based visual row, spacers included.
    pub row: usize,
    /// 1-based visual column.
    pub col: usize,
    /// The character (one grapheme cluster).
    pub ch: String,
    /// Derived base color (zoning applied).
    pub base_color: String,
    /// User-applied text color, if any.
    pub style_color: Option<String>,
    /// User-applied background color, if any.
    pub style_bg: Option<String>,
    /// Logical text index this cell displays.
    pub original_index: Option<usize>,
}

/// Project the styled text onto renderable cells.
///
/// No mode chosen, zero-length text, or unusable dimensions all produce
/// an empty cell set, by contract.
pub fn project_cells(
    chars: &[StyledChar],
    spec: GridSpec,
    mode: Option<ExploreMode>,
    palette: &ZonePalette,
) -> Vec<GridCell> {
    let Some(mode) = mode else {
        return Vec::new();
    };
    let map = PositionMap::build(spec, mode, chars.len());
    project_with_map(chars, &map, palette)
}

/// Project against an already-built position map.
pub fn project_with_map(
    chars: &[StyledChar],
    map: &PositionMap,
    palette: &ZonePalette,
) -> Vec<GridCell> {
    let mut cells = Vec::with_capacity(map.text_len());
    for (text_index, styled) in chars.iter().take(map.text_len()).enumerate() {
        let Some(grid_index) = map.grid_index(text_index) else {
            continue;
        };
        let Some(position) = map.visual_position(text_index) else {
            continue;
        };
        let base_color = if map.is_shaded(text_index) {
            palette.shaded.clone()
        } else {
            palette.base.clone()
        };
        cells.push(GridCell {
            id: grid_index,
            row: position.row,
            col: position.col,
            ch: styled.ch.clone(),
            base_color,
            style_color: styled.color.clone(),
            style_bg: styled.background_color.clone(),
            original_index: Some(text_index),
        });
    }
    cells
}
