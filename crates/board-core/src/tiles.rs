//! The spatial tile model.
//!
//! Board mode owns free-floating tiles on an unbounded 1-based grid.
//! This module validates and applies the geometric operations: collision
//! lookup, multi-tile drag previews, move/copy commits, palette
//! placement, and deletion. Operations either apply fully or not at all;
//! an invalid drop never mutates the collection.

use crate::selection::SelectionSet;
use crate::styled::StyleTarget;

/// A single-character tile on the board grid.
///
/// Ids are unique and stable for the lifetime of the collection.
/// Coordinates are 1-based; candidate drag targets can be transiently
/// non-positive and are rejected before commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    /// Unique stable id.
    pub id: u64,
    /// The character (one grapheme cluster).
    pub ch: String,
    /// 1-based column.
    pub col: i32,
    /// 1-based row.
    pub row: i32,
    /// Text color, if styled.
    pub color: Option<String>,
    /// Background color, if styled.
    pub background_color: Option<String>,
}

impl Tile {
    /// Create an unstyled tile.
    pub fn new(id: u64, ch: impl Into<String>, col: i32, row: i32) -> Self {
        Self {
            id,
            ch: ch.into(),
            col,
            row,
            color: None,
            background_color: None,
        }
    }
}

/// A moving tile's column/row offset relative to the drag pivot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragOffset {
    /// The moving tile.
    pub id: u64,
    /// Column offset from the pivot.
    pub offset_col: i32,
    /// Row offset from the pivot.
    pub offset_row: i32,
}

/// Live drop validity plus the candidate target cells, recomputed on
/// every pointer sample during a drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropPreview {
    /// Whether committing the drop at this anchor would succeed.
    pub is_valid: bool,
    /// Candidate `(col, row)` target cells, one per moving tile.
    pub cells: Vec<(i32, i32)>,
}

/// The tile collection with its monotonic id counter.
///
/// The counter only ever increases, so ids are never reused after
/// deletions — or after an undo, since history snapshots restore tiles
/// but not the counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileBoard {
    tiles: Vec<Tile>,
    next_id: u64,
}

impl Default for TileBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl TileBoard {
    /// Create an empty board.
    pub fn new() -> Self {
        Self {
            tiles: Vec::new(),
            next_id: 0,
        }
    }

    /// Adopt an existing tile array (document load, board regeneration).
    pub fn from_tiles(tiles: Vec<Tile>) -> Self {
        let next_id = tiles.iter().map(|t| t.id + 1).max().unwrap_or(0);
        Self { tiles, next_id }
    }

    /// The tiles, in insertion order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Snapshot the tile array (history push).
    pub fn to_tiles(&self) -> Vec<Tile> {
        self.tiles.clone()
    }

    /// Replace the tile array (history restore). The id counter never
    /// rewinds.
    pub fn restore(&mut self, tiles: Vec<Tile>) {
        let restored_max = tiles.iter().map(|t| t.id + 1).max().unwrap_or(0);
        self.next_id = self.next_id.max(restored_max);
        self.tiles = tiles;
    }

    /// Number of tiles.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the board holds no tiles.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Look up a tile by id.
    pub fn tile(&self, id: u64) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.id == id)
    }

    /// The tile occupying `(col, row)`, if any.
    pub fn occupant(&self, col: i32, row: i32) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.col == col && t.row == row)
    }

    /// Largest occupied column and row (0 for an empty board).
    pub fn extent(&self) -> (i32, i32) {
        let max_col = self.tiles.iter().map(|t| t.col).max().unwrap_or(0);
        let max_row = self.tiles.iter().map(|t| t.row).max().unwrap_or(0);
        (max_col, max_row)
    }

    /// The moving set for a drag starting on `pivot`: the pivot tile
    /// plus, when it is part of the selection, every other selected
    /// tile. Offsets are relative to the pivot's cell.
    pub fn drag_set(&self, pivot: u64, selection: &SelectionSet<u64>) -> Vec<DragOffset> {
        let Some(pivot_tile) = self.tile(pivot) else {
            return Vec::new();
        };
        let moving: Vec<&Tile> = if selection.contains(pivot) {
            self.tiles.iter().filter(|t| selection.contains(t.id)).collect()
        } else {
            vec![pivot_tile]
        };
        moving
            .into_iter()
            .map(|t| DragOffset {
                id: t.id,
                offset_col: t.col - pivot_tile.col,
                offset_row: t.row - pivot_tile.row,
            })
            .collect()
    }

    /// Validate a drop of the moving set at `anchor` (the pivot's
    /// candidate cell).
    ///
    /// Valid iff every candidate cell is on-grid and no candidate is
    /// occupied by a tile outside the moving set; a moving tile dropping
    /// onto its own current cell is fine.
    pub fn preview_drop(&self, offsets: &[DragOffset], anchor: (i32, i32)) -> DropPreview {
        let mut cells = Vec::with_capacity(offsets.len());
        let mut is_valid = !offsets.is_empty();
        for offset in offsets {
            let target = (anchor.0 + offset.offset_col, anchor.1 + offset.offset_row);
            if target.0 < 1 || target.1 < 1 {
                is_valid = false;
            } else if let Some(occupying) = self.occupant(target.0, target.1) {
                if !offsets.iter().any(|o| o.id == occupying.id) {
                    is_valid = false;
                }
            }
            cells.push(target);
        }
        DropPreview { is_valid, cells }
    }

    /// Commit a move: overwrite the moving tiles' coordinates in place,
    /// preserving ids. Returns `false` (no mutation) if the drop is
    /// invalid.
    pub fn apply_move(&mut self, offsets: &[DragOffset], anchor: (i32, i32)) -> bool {
        let preview = self.preview_drop(offsets, anchor);
        if !preview.is_valid {
            return false;
        }
        for (offset, &(col, row)) in offsets.iter().zip(&preview.cells) {
            if let Some(tile) = self.tiles.iter_mut().find(|t| t.id == offset.id) {
                tile.col = col;
                tile.row = row;
            }
        }
        true
    }

    /// Commit a copy: duplicate every moving tile at its candidate cell
    /// with a freshly minted id, leaving the originals untouched.
    ///
    /// Returns the new ids (the caller makes them the selection, which
    /// enables chained copies), or `None` if the drop is invalid.
    pub fn apply_copy(&mut self, offsets: &[DragOffset], anchor: (i32, i32)) -> Option<Vec<u64>> {
        let preview = self.preview_drop(offsets, anchor);
        if !preview.is_valid {
            return None;
        }
        let mut new_ids = Vec::with_capacity(offsets.len());
        for (offset, &(col, row)) in offsets.iter().zip(&preview.cells) {
            let Some(source) = self.tile(offset.id).cloned() else {
                continue;
            };
            let id = self.mint_id();
            self.tiles.push(Tile {
                id,
                col,
                row,
                ..source
            });
            new_ids.push(id);
        }
        Some(new_ids)
    }

    /// Place a single new tile dragged in from an external palette.
    ///
    /// Only an unoccupied on-grid cell accepts it; otherwise the drop is
    /// silently ignored. Returns the new tile's id on success.
    pub fn place_new(&mut self, ch: impl Into<String>, col: i32, row: i32) -> Option<u64> {
        if col < 1 || row < 1 || self.occupant(col, row).is_some() {
            return None;
        }
        let id = self.mint_id();
        self.tiles.push(Tile::new(id, ch, col, row));
        Some(id)
    }

    /// Delete every selected tile. Empty selection is a no-op. Returns
    /// the number of tiles removed.
    pub fn remove_selected(&mut self, selection: &SelectionSet<u64>) -> usize {
        if selection.is_empty() {
            return 0;
        }
        let before = self.tiles.len();
        self.tiles.retain(|t| !selection.contains(t.id));
        before - self.tiles.len()
    }

    /// Apply `color` to the targeted style slot of every selected tile.
    /// `None` clears the slot. Returns `true` if any tile changed.
    pub fn apply_color(
        &mut self,
        selection: &SelectionSet<u64>,
        color: Option<&str>,
        target: StyleTarget,
    ) -> bool {
        let mut changed = false;
        for tile in self.tiles.iter_mut().filter(|t| selection.contains(t.id)) {
            let slot = match target {
                StyleTarget::Text => &mut tile.color,
                StyleTarget::Background => &mut tile.background_color,
            };
            let next = color.map(str::to_owned);
            if *slot != next {
                *slot = next;
                changed = true;
            }
        }
        changed
    }

    fn mint_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Lay out sanitized text as a fresh tile grid, `num_cols` wide, offset
/// by `margin` cells on both axes.
///
/// Spaces never become tiles but still advance the index, leaving holes
/// in the grid; ids are the character indices.
pub fn generate_tiles(chars: &[&str], num_cols: usize, margin: i32) -> Vec<Tile> {
    if num_cols == 0 {
        return Vec::new();
    }
    chars
        .iter()
        .enumerate()
        .filter(|&(_, &ch)| ch != " ")
        .map(|(index, &ch)| {
            Tile::new(
                index as u64,
                ch,
                (index % num_cols) as i32 + 1 + margin,
                (index / num_cols) as i32 + 1 + margin,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(cells: &[(u64, i32, i32)]) -> TileBoard {
        TileBoard::from_tiles(
            cells
                .iter()
                .map(|&(id, col, row)| Tile::new(id, "X", col, row))
                .collect(),
        )
    }

    #[test]
    fn test_occupied_target_rejected() {
        let board = board_with(&[(0, 3, 3), (1, 5, 5)]);
        let offsets = [DragOffset {
            id: 1,
            offset_col: 0,
            offset_row: 0,
        }];
        let preview = board.preview_drop(&offsets, (3, 3));
        assert!(!preview.is_valid);
        assert_eq!(preview.cells, vec![(3, 3)]);
    }

    #[test]
    fn test_self_cell_drop_accepted() {
        let board = board_with(&[(0, 3, 3)]);
        let offsets = [DragOffset {
            id: 0,
            offset_col: 0,
            offset_row: 0,
        }];
        assert!(board.preview_drop(&offsets, (3, 3)).is_valid);
    }

    #[test]
    fn test_group_drop_collides_only_with_outsiders() {
        // Tiles 0 and 1 swap within the moving set; tile 2 blocks.
        let board = board_with(&[(0, 1, 1), (1, 2, 1), (2, 5, 1)]);
        let offsets = [
            DragOffset { id: 0, offset_col: 0, offset_row: 0 },
            DragOffset { id: 1, offset_col: 1, offset_row: 0 },
        ];
        // Anchor (2,1): 0 -> (2,1) [freed by 1], 1 -> (3,1). Valid.
        assert!(board.preview_drop(&offsets, (2, 1)).is_valid);
        // Anchor (4,1): 1 -> (5,1) which tile 2 occupies. Invalid.
        assert!(!board.preview_drop(&offsets, (4, 1)).is_valid);
    }

    #[test]
    fn test_off_grid_rejected_without_mutation() {
        let mut board = board_with(&[(0, 1, 1)]);
        let offsets = [DragOffset {
            id: 0,
            offset_col: 0,
            offset_row: 0,
        }];
        assert!(!board.preview_drop(&offsets, (0, 1)).is_valid);
        assert!(!board.apply_move(&offsets, (1, 0)));
        assert_eq!(board.tile(0).unwrap().col, 1);
    }

    #[test]
    fn test_move_preserves_ids() {
        let mut board = board_with(&[(0, 1, 1), (1, 2, 2)]);
        let offsets = [
            DragOffset { id: 0, offset_col: 0, offset_row: 0 },
            DragOffset { id: 1, offset_col: 1, offset_row: 1 },
        ];
        assert!(board.apply_move(&offsets, (4, 4)));
        assert_eq!(board.tile(0).map(|t| (t.col, t.row)), Some((4, 4)));
        assert_eq!(board.tile(1).map(|t| (t.col, t.row)), Some((5, 5)));
        assert_eq!(board.len(), 2);
    }

    #[test]
    fn test_copy_mints_monotonic_ids() {
        let mut board = board_with(&[(0, 1, 1), (7, 2, 1)]);
        let offsets = [
            DragOffset { id: 0, offset_col: 0, offset_row: 0 },
            DragOffset { id: 7, offset_col: 1, offset_row: 0 },
        ];
        let new_ids = board.apply_copy(&offsets, (1, 5)).unwrap();
        assert_eq!(new_ids, vec![8, 9]);
        assert_eq!(board.len(), 4);
        // Originals untouched.
        assert_eq!(board.tile(0).map(|t| (t.col, t.row)), Some((1, 1)));
        assert_eq!(board.tile(8).map(|t| (t.col, t.row)), Some((1, 5)));
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let mut board = board_with(&[(0, 1, 1), (1, 2, 1)]);
        let selection: SelectionSet<u64> = [1u64].into_iter().collect();
        assert_eq!(board.remove_selected(&selection), 1);

        let id = board.place_new("A", 9, 9).unwrap();
        assert_eq!(id, 2);
    }

    #[test]
    fn test_place_new_requires_free_cell() {
        let mut board = board_with(&[(0, 3, 3)]);
        assert_eq!(board.place_new("A", 3, 3), None);
        assert_eq!(board.place_new("A", 0, 3), None);
        assert!(board.place_new("A", 4, 3).is_some());
    }

    #[test]
    fn test_empty_selection_ops_are_noops() {
        let mut board = board_with(&[(0, 1, 1)]);
        let empty = SelectionSet::new();
        assert_eq!(board.remove_selected(&empty), 0);
        assert!(!board.apply_color(&empty, Some("#ff0000"), StyleTarget::Text));
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn test_restore_never_rewinds_id_counter() {
        let mut board = board_with(&[(0, 1, 1)]);
        let snapshot = board.to_tiles();
        board.place_new("A", 2, 2).unwrap(); // id 1
        board.restore(snapshot);
        assert_eq!(board.place_new("B", 3, 3), Some(2));
    }

    #[test]
    fn test_generate_tiles_skips_spaces_and_applies_margin() {
        let chars = vec!["A", "B", " ", "C"];
        let tiles = generate_tiles(&chars, 2, 40);

        assert_eq!(tiles.len(), 3);
        assert_eq!(tiles[0].id, 0);
        assert_eq!((tiles[0].col, tiles[0].row), (41, 41));
        assert_eq!((tiles[1].col, tiles[1].row), (42, 41));
        // The space held index 2; "C" keeps index 3's cell and id.
        assert_eq!(tiles[2].id, 3);
        assert_eq!((tiles[2].col, tiles[2].row), (42, 42));
    }

    #[test]
    fn test_drag_set_uses_selection_only_when_pivot_selected() {
        let board = board_with(&[(0, 1, 1), (1, 3, 1), (2, 5, 5)]);
        let selection: SelectionSet<u64> = [0u64, 1].into_iter().collect();

        let group = board.drag_set(0, &selection);
        assert_eq!(group.len(), 2);
        assert!(group.contains(&DragOffset { id: 1, offset_col: 2, offset_row: 0 }));

        // Pivot outside the selection drags alone.
        let solo = board.drag_set(2, &selection);
        assert_eq!(solo, vec![DragOffset { id: 2, offset_col: 0, offset_row: 0 }]);
    }
}
