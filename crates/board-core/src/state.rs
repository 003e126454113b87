//! Board and explorer state owners.
//!
//! Each mode of the tool has exactly one logical state owner mutating its
//! collections: [`BoardState`] for the free-dragging board,
//! [`ExplorerState`] for the transposition explorer. Both are synchronous
//! mutators over history-backed collections — every operation either
//! completes or is a no-op — with a version counter and change callbacks
//! for the rendering collaborator.
//!
//! # Example
//!
//! ```rust
//! use board_core::{BoardState, SpacesPolicy};
//!
//! let mut board = BoardState::new();
//! board.create_tiles("HELLO", 5, SpacesPolicy::Keep);
//! assert_eq!(board.tiles().len(), 5);
//! assert!(!board.can_undo()); // regeneration is not undoable past itself
//! ```

use crate::cells::{GridCell, ZonePalette, project_cells};
use crate::geometry::{CellGeometry, PixelRect, ZOOM_STEP, centering_offset, clamp_zoom, marquee_hits};
use crate::history::History;
use crate::selection::SelectionSet;
use crate::styled::{StyleTarget, StyledChar, apply_color, diff_styled};
use crate::text::{SpacesPolicy, graphemes, sanitize};
use crate::tiles::{DropPreview, Tile, TileBoard, generate_tiles};
use crate::transpose::{ExploreMode, GridSpec, PositionMap};

/// Snapshot capacity of the board-mode tile history.
pub const BOARD_HISTORY_LIMIT: usize = 15;
/// Snapshot capacity of the explorer-mode styled-text history.
pub const EXPLORER_HISTORY_LIMIT: usize = 50;
/// Empty-cell margin around a freshly generated tile grid.
pub const BOARD_MARGIN: i32 = 40;
/// Board font used when a loaded document does not carry one.
pub const DEFAULT_BOARD_FONT: &str = "Arial";

/// What part of the state a change touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateChangeKind {
    /// The tile collection changed.
    Tiles,
    /// The styled-character sequence changed.
    StyledText,
    /// The selection changed.
    Selection,
    /// The explorer layout mode changed.
    Mode,
    /// The grid dimensions changed.
    Dimensions,
    /// The zoom factor changed.
    Zoom,
    /// A document was loaded or the board regenerated.
    Document,
}

/// State change record delivered to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateChange {
    /// Change type.
    pub kind: StateChangeKind,
    /// Version before the change.
    pub old_version: u64,
    /// Version after the change.
    pub new_version: u64,
}

/// State change callback function type.
pub type StateChangeCallback = Box<dyn FnMut(&StateChange) + Send>;

/// Selection change callback: receives the new index set.
pub type SelectionCallback<T> = Box<dyn FnMut(&SelectionSet<T>) + Send>;

/// Board-mode state owner: tiles under a bounded history, selection,
/// copy/add modes, zoom.
pub struct BoardState {
    board: TileBoard,
    history: History<Vec<Tile>>,
    selection: SelectionSet<u64>,
    copy_mode: bool,
    add_mode: bool,
    zoom: f64,
    board_font: String,
    version: u64,
    callbacks: Vec<StateChangeCallback>,
    selection_callbacks: Vec<SelectionCallback<u64>>,
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardState {
    /// Create an empty board.
    pub fn new() -> Self {
        Self {
            board: TileBoard::new(),
            history: History::new(Vec::new(), BOARD_HISTORY_LIMIT),
            selection: SelectionSet::new(),
            copy_mode: false,
            add_mode: false,
            zoom: 1.0,
            board_font: DEFAULT_BOARD_FONT.to_string(),
            version: 0,
            callbacks: Vec::new(),
            selection_callbacks: Vec::new(),
        }
    }

    /// Subscribe to state changes.
    pub fn subscribe(&mut self, callback: impl FnMut(&StateChange) + Send + 'static) {
        self.callbacks.push(Box::new(callback));
    }

    /// Subscribe to selection changes; the callback receives the new
    /// index set.
    pub fn on_selection_change(
        &mut self,
        callback: impl FnMut(&SelectionSet<u64>) + Send + 'static,
    ) {
        self.selection_callbacks.push(Box::new(callback));
    }

    /// The tiles, in insertion order.
    pub fn tiles(&self) -> &[Tile] {
        self.board.tiles()
    }

    /// The current selection (tile ids).
    pub fn selection(&self) -> &SelectionSet<u64> {
        &self.selection
    }

    /// The font name traveling with this board.
    pub fn board_font(&self) -> &str {
        &self.board_font
    }

    /// Current zoom factor.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Whether copy mode is active (drops duplicate instead of moving).
    pub fn copy_mode(&self) -> bool {
        self.copy_mode
    }

    /// Toggle copy mode. Activating it requires a non-empty selection.
    pub fn set_copy_mode(&mut self, active: bool) {
        self.copy_mode = active && !self.selection.is_empty();
    }

    /// Whether add mode (palette placement) is active.
    pub fn add_mode(&self) -> bool {
        self.add_mode
    }

    /// Toggle add mode.
    pub fn set_add_mode(&mut self, active: bool) {
        self.add_mode = active;
    }

    /// Whether an undo step is available.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether a redo step is available.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Regenerate the board from input text: sanitize, lay the characters
    /// out `num_cols` wide with the standard margin, and reset history so
    /// the regeneration is not undoable past this point. Zoom returns to
    /// 1.0 and the font travels with the board.
    pub fn create_tiles_with_font(
        &mut self,
        input: &str,
        num_cols: usize,
        spaces: SpacesPolicy,
        font: &str,
    ) {
        let clean = sanitize(input, spaces);
        let tiles = generate_tiles(&graphemes(&clean), num_cols, BOARD_MARGIN);
        self.board = TileBoard::from_tiles(tiles);
        self.history.reset(self.board.to_tiles());
        self.selection.clear();
        self.copy_mode = false;
        self.zoom = 1.0;
        self.board_font = font.to_string();
        self.notify(StateChangeKind::Document);
    }

    /// [`BoardState::create_tiles_with_font`] keeping the current font.
    pub fn create_tiles(&mut self, input: &str, num_cols: usize, spaces: SpacesPolicy) {
        let font = self.board_font.clone();
        self.create_tiles_with_font(input, num_cols, spaces, &font);
    }

    /// Adopt tiles parsed from a persisted document. All-or-nothing: the
    /// caller only gets here with a fully parsed tile array.
    pub fn load_document(&mut self, tiles: Vec<Tile>, font: String) {
        self.board = TileBoard::from_tiles(tiles);
        self.history.reset(self.board.to_tiles());
        self.selection.clear();
        self.copy_mode = false;
        self.board_font = font;
        self.notify(StateChangeKind::Document);
    }

    /// Total board extents: at least the generated grid plus margins,
    /// growing with whatever the user dragged furthest.
    pub fn extents(&self, num_cols: usize) -> (i32, i32) {
        if num_cols == 0 {
            return self.board.extent();
        }
        let (max_col, max_row) = self.board.extent();
        let tile_rows = self.board.len().div_ceil(num_cols) as i32;
        let min_cols = num_cols as i32 + 2 * BOARD_MARGIN;
        let min_rows = tile_rows + 2 * BOARD_MARGIN;
        (
            min_cols.max(max_col + BOARD_MARGIN),
            min_rows.max(max_row + BOARD_MARGIN),
        )
    }

    /// Live drop preview for a drag of `pivot` with the current
    /// selection, anchored at the pivot's candidate cell.
    pub fn preview_drop(&self, pivot: u64, anchor: (i32, i32)) -> DropPreview {
        let offsets = self.board.drag_set(pivot, &self.selection);
        self.board.preview_drop(&offsets, anchor)
    }

    /// Commit a drop. In copy mode the moving tiles are duplicated and
    /// the duplicates become the selection (enabling chained copies);
    /// otherwise the tiles move and the selection clears. Invalid drops
    /// leave everything untouched.
    pub fn commit_drop(&mut self, pivot: u64, anchor: (i32, i32)) -> bool {
        let offsets = self.board.drag_set(pivot, &self.selection);
        if self.copy_mode {
            let Some(new_ids) = self.board.apply_copy(&offsets, anchor) else {
                return false;
            };
            self.selection.set_many(new_ids, false);
        } else {
            if !self.board.apply_move(&offsets, anchor) {
                return false;
            }
            self.selection.clear();
        }
        self.history.push(self.board.to_tiles());
        self.notify(StateChangeKind::Tiles);
        self.selection_changed();
        true
    }

    /// Place a new tile dragged in from the palette. Occupied or
    /// off-grid cells silently ignore the drop.
    pub fn place_new_tile(&mut self, ch: &str, col: i32, row: i32) -> Option<u64> {
        let id = self.board.place_new(ch, col, row)?;
        self.history.push(self.board.to_tiles());
        self.notify(StateChangeKind::Tiles);
        Some(id)
    }

    /// Delete the selected tiles. Empty selection is a no-op.
    pub fn delete_selected(&mut self) {
        if self.board.remove_selected(&self.selection) == 0 {
            return;
        }
        self.selection.clear();
        self.copy_mode = false;
        self.history.push(self.board.to_tiles());
        self.notify(StateChangeKind::Tiles);
        self.selection_changed();
    }

    /// Apply a color (or `None` to reset) to the selected tiles.
    pub fn apply_color(&mut self, color: Option<&str>, target: StyleTarget) {
        if !self.board.apply_color(&self.selection, color, target) {
            return;
        }
        self.history.push(self.board.to_tiles());
        self.notify(StateChangeKind::Tiles);
    }

    /// Undo one step.
    pub fn undo(&mut self) {
        if !self.history.undo() {
            return;
        }
        self.board.restore(self.history.current().clone());
        self.prune_selection();
        self.notify(StateChangeKind::Tiles);
    }

    /// Redo one step.
    pub fn redo(&mut self) {
        if !self.history.redo() {
            return;
        }
        self.board.restore(self.history.current().clone());
        self.prune_selection();
        self.notify(StateChangeKind::Tiles);
    }

    /// Replace the selection with exactly one tile.
    pub fn select_only(&mut self, id: u64) {
        self.selection.select_only(id);
        self.selection_changed();
    }

    /// Flip one tile's membership (ctrl-click).
    pub fn toggle_select(&mut self, id: u64) {
        self.selection.toggle(id);
        self.selection_changed();
    }

    /// Select every tile showing `symbol`, replacing or extending the
    /// selection.
    pub fn select_symbol(&mut self, symbol: &str, additive: bool) {
        let ids: Vec<u64> = self
            .board
            .tiles()
            .iter()
            .filter(|t| t.ch == symbol)
            .map(|t| t.id)
            .collect();
        self.selection.set_many(ids, additive);
        self.selection_changed();
    }

    /// Marquee selection over the tiles: every tile whose cell box
    /// intersects `rect` (open-interval overlap). Recomputed per pointer
    /// sample by the caller.
    pub fn marquee_select(
        &mut self,
        rect: &PixelRect,
        geometry: &CellGeometry,
        viewport_width: f64,
        total_cols: usize,
        additive: bool,
    ) {
        let centering = centering_offset(total_cols, viewport_width, geometry);
        let hits = marquee_hits(
            self.board
                .tiles()
                .iter()
                .filter(|t| t.col >= 1 && t.row >= 1)
                .map(|t| (t.id, t.col as usize, t.row as usize)),
            rect,
            geometry,
            centering,
        );
        self.selection.set_many(hits, additive);
        self.selection_changed();
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        self.selection.clear();
        self.selection_changed();
    }

    /// Zoom in one step.
    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom + ZOOM_STEP);
    }

    /// Zoom out one step.
    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom - ZOOM_STEP);
    }

    /// Reset zoom to 100%.
    pub fn zoom_reset(&mut self) {
        self.set_zoom(1.0);
    }

    fn set_zoom(&mut self, zoom: f64) {
        let clamped = clamp_zoom(zoom);
        if clamped != self.zoom {
            self.zoom = clamped;
            self.notify(StateChangeKind::Zoom);
        }
    }

    fn prune_selection(&mut self) {
        let board = &self.board;
        let before = self.selection.len();
        self.selection.retain(|&id| board.tile(id).is_some());
        if self.selection.len() != before {
            for callback in &mut self.selection_callbacks {
                callback(&self.selection);
            }
        }
    }

    fn notify(&mut self, kind: StateChangeKind) {
        let change = StateChange {
            kind,
            old_version: self.version,
            new_version: self.version + 1,
        };
        self.version += 1;
        for callback in &mut self.callbacks {
            callback(&change);
        }
    }

    fn selection_changed(&mut self) {
        self.notify(StateChangeKind::Selection);
        for callback in &mut self.selection_callbacks {
            callback(&self.selection);
        }
    }
}

/// Explorer-mode state owner: styled ciphertext under a bounded history,
/// grid dimensions, layout mode, selection of text indices.
pub struct ExplorerState {
    chars: History<Vec<StyledChar>>,
    spec: GridSpec,
    mode: Option<ExploreMode>,
    selection: SelectionSet<usize>,
    palette: ZonePalette,
    zoom: f64,
    version: u64,
    callbacks: Vec<StateChangeCallback>,
    selection_callbacks: Vec<SelectionCallback<usize>>,
}

impl Default for ExplorerState {
    fn default() -> Self {
        Self::new()
    }
}

impl ExplorerState {
    /// Create an explorer with the cipher's own default dimensions
    /// (17 columns, 9 rows) and no mode chosen.
    pub fn new() -> Self {
        Self {
            chars: History::new(Vec::new(), EXPLORER_HISTORY_LIMIT),
            spec: GridSpec::new(17, 9),
            mode: None,
            selection: SelectionSet::new(),
            palette: ZonePalette::default(),
            zoom: 1.0,
            version: 0,
            callbacks: Vec::new(),
            selection_callbacks: Vec::new(),
        }
    }

    /// Subscribe to state changes.
    pub fn subscribe(&mut self, callback: impl FnMut(&StateChange) + Send + 'static) {
        self.callbacks.push(Box::new(callback));
    }

    /// Subscribe to selection changes; the callback receives the new
    /// index set.
    pub fn on_selection_change(
        &mut self,
        callback: impl FnMut(&SelectionSet<usize>) + Send + 'static,
    ) {
        self.selection_callbacks.push(Box::new(callback));
    }

    /// The styled-character sequence.
    pub fn chars(&self) -> &[StyledChar] {
        self.chars.current()
    }

    /// The linear text currently held.
    pub fn text(&self) -> String {
        self.chars().iter().map(|c| c.ch.as_str()).collect()
    }

    /// The current selection (text indices).
    pub fn selection(&self) -> &SelectionSet<usize> {
        &self.selection
    }

    /// The grid dimension selection.
    pub fn spec(&self) -> GridSpec {
        self.spec
    }

    /// The layout mode, if one was chosen.
    pub fn mode(&self) -> Option<ExploreMode> {
        self.mode
    }

    /// Current zoom factor.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// The zone palette used for derived base colors.
    pub fn palette(&self) -> &ZonePalette {
        &self.palette
    }

    /// Replace the zone palette (theme change).
    pub fn set_palette(&mut self, palette: ZonePalette) {
        self.palette = palette;
    }

    /// Whether an undo step is available.
    pub fn can_undo(&self) -> bool {
        self.chars.can_undo()
    }

    /// Whether a redo step is available.
    pub fn can_redo(&self) -> bool {
        self.chars.can_redo()
    }

    /// Ingest edited canvas text: strip line breaks, diff against the
    /// current sequence preserving styles, and push one history step.
    /// Unchanged text is a no-op.
    pub fn set_text(&mut self, input: &str) {
        let clean = sanitize(input, SpacesPolicy::Keep);
        if !self.chars.push_with(|old| diff_styled(old, &clean)) {
            return;
        }
        self.prune_selection();
        self.notify(StateChangeKind::StyledText);
    }

    /// Change the grid dimensions. Cells are derived, so this only
    /// invalidates the projection.
    pub fn set_dimensions(&mut self, num_cols: usize, num_rows: usize) {
        let next = GridSpec::new(num_cols, num_rows);
        if next != self.spec {
            self.spec = next;
            self.notify(StateChangeKind::Dimensions);
        }
    }

    /// Choose (or clear) the layout mode.
    pub fn set_mode(&mut self, mode: Option<ExploreMode>) {
        if mode != self.mode {
            self.mode = mode;
            self.notify(StateChangeKind::Mode);
        }
    }

    /// The renderable cell projection for the current text, dimensions,
    /// and mode. No mode chosen projects no cells.
    pub fn cells(&self) -> Vec<GridCell> {
        project_cells(self.chars(), self.spec, self.mode, &self.palette)
    }

    /// The position map for the current configuration, if a mode is
    /// chosen.
    pub fn position_map(&self) -> Option<PositionMap> {
        let mode = self.mode?;
        Some(PositionMap::build(self.spec, mode, self.chars().len()))
    }

    /// Apply a color (or `None` to reset) to the selected characters as
    /// one history step. Empty selection is a no-op.
    pub fn apply_color(&mut self, color: Option<&str>, target: StyleTarget) {
        let selection = self.selection.as_set().clone();
        let pushed = self.chars.push_with(|old| {
            let mut next = old.clone();
            apply_color(&mut next, &selection, color, target);
            next
        });
        if pushed {
            self.notify(StateChangeKind::StyledText);
        }
    }

    /// Undo one step.
    pub fn undo(&mut self) {
        if self.chars.undo() {
            self.prune_selection();
            self.notify(StateChangeKind::StyledText);
        }
    }

    /// Redo one step.
    pub fn redo(&mut self) {
        if self.chars.redo() {
            self.prune_selection();
            self.notify(StateChangeKind::StyledText);
        }
    }

    /// Flip one text index's membership (ctrl-click on a cell).
    pub fn toggle_select(&mut self, index: usize) {
        self.selection.toggle(index);
        self.selection_changed();
    }

    /// Replace the selection with exactly one text index.
    pub fn select_only(&mut self, index: usize) {
        self.selection.select_only(index);
        self.selection_changed();
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        self.selection.clear();
        self.selection_changed();
    }

    /// Select every index showing `symbol`, replacing or extending the
    /// selection (key-sidebar glyph click).
    pub fn select_symbol(&mut self, symbol: &str, additive: bool) {
        let indices: Vec<usize> = self
            .chars()
            .iter()
            .enumerate()
            .filter(|(_, c)| c.ch == symbol)
            .map(|(i, _)| i)
            .collect();
        self.selection.set_many(indices, additive);
        self.selection_changed();
    }

    /// Marquee selection over the projected cells (open-interval
    /// overlap), recomputed per pointer sample by the caller.
    pub fn marquee_select(
        &mut self,
        rect: &PixelRect,
        geometry: &CellGeometry,
        viewport_width: f64,
        additive: bool,
    ) {
        let cells = self.cells();
        let total_cols = self
            .position_map()
            .map(|map| map.visual_cols())
            .unwrap_or(0);
        let centering = centering_offset(total_cols, viewport_width, geometry);
        let hits = marquee_hits(
            cells
                .iter()
                .filter_map(|c| c.original_index.map(|i| (i, c.col, c.row))),
            rect,
            geometry,
            centering,
        );
        self.selection.set_many(hits, additive);
        self.selection_changed();
    }

    /// Zoom in one step.
    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom + ZOOM_STEP);
    }

    /// Zoom out one step.
    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom - ZOOM_STEP);
    }

    /// Reset zoom to 100%.
    pub fn zoom_reset(&mut self) {
        self.set_zoom(1.0);
    }

    fn set_zoom(&mut self, zoom: f64) {
        let clamped = clamp_zoom(zoom);
        if clamped != self.zoom {
            self.zoom = clamped;
            self.notify(StateChangeKind::Zoom);
        }
    }

    fn prune_selection(&mut self) {
        let len = self.chars.current().len();
        let before = self.selection.len();
        self.selection.retain(|&index| index < len);
        if self.selection.len() != before {
            for callback in &mut self.selection_callbacks {
                callback(&self.selection);
            }
        }
    }

    fn notify(&mut self, kind: StateChangeKind) {
        let change = StateChange {
            kind,
            old_version: self.version,
            new_version: self.version + 1,
        };
        self.version += 1;
        for callback in &mut self.callbacks {
            callback(&change);
        }
    }

    fn selection_changed(&mut self) {
        self.notify(StateChangeKind::Selection);
        for callback in &mut self.selection_callbacks {
            callback(&self.selection);
        }
    }
}
