#![warn(missing_docs)]
//! Board Core - Headless Cipher-Puzzle Board Kernel
//!
//! # Overview
//!
//! `board-core` is a headless kernel for an interactive cipher-puzzle
//! board: single-character tiles arranged, edited, and colored on a 2-D
//! grid, plus an explorer that lays a fixed ciphertext (the Zodiac Z340
//! homophonic cipher) out under transposition layouts. It does not render
//! anything, assuming the upper layer provides a grid-based view; every
//! interface is plain data.
//!
//! # Core Features
//!
//! - **Transposition Mapping**: grid index <-> text index under the
//!   cyclic two-block walk or the straight layout
//! - **Bounded History**: snapshot stack with cursor, shared by tile
//!   arrays and styled text
//! - **Spatial Tile Model**: collision-aware placement, multi-tile drag
//!   transforms, marquee hit testing from injected pixel geometry
//! - **Style-Preserving Diff**: prefix/suffix text diff keeping
//!   per-character colors across free-form edits
//! - **State Tracking**: version counter and change notifications
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  State Owners (BoardState / ExplorerState)  │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Cell Projection (GridCell descriptors)     │  ← Rendering Data
//! ├─────────────────────────────────────────────┤
//! │  Tiles & Geometry (collision, marquee)      │  ← Spatial Model
//! ├─────────────────────────────────────────────┤
//! │  Transposition Map (grid <-> text)          │  ← Layout Mapping
//! ├─────────────────────────────────────────────┤
//! │  Styled Text & Diff                         │  ← Text Model
//! ├─────────────────────────────────────────────┤
//! │  Bounded History                            │  ← Snapshots
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ## Board mode
//!
//! ```rust
//! use board_core::{BoardState, SpacesPolicy};
//!
//! let mut board = BoardState::new();
//! board.create_tiles("HELLO WORLD", 17, SpacesPolicy::Remove);
//! assert_eq!(board.tiles().len(), 10);
//!
//! // Drag the first tile somewhere free, then take it back.
//! let id = board.tiles()[0].id;
//! board.commit_drop(id, (1, 1));
//! board.undo();
//! ```
//!
//! ## Explorer mode
//!
//! ```rust
//! use board_core::{ExploreMode, ExplorerState};
//!
//! let mut explorer = ExplorerState::new();
//! explorer.set_text("HERONSTARNIGHT");
//! explorer.set_mode(Some(ExploreMode::Transpose));
//!
//! let cells = explorer.cells();
//! assert_eq!(cells.len(), 14);
//! assert_eq!(cells[0].original_index, Some(0));
//! ```
//!
//! # Module Description
//!
//! - [`history`] - bounded undo/redo snapshot stack
//! - [`text`] - input sanitizing and grapheme segmentation
//! - [`styled`] - styled characters and the style-preserving diff
//! - [`transpose`] - grid position mapping under both layouts
//! - [`cells`] - renderable cell projection
//! - [`tiles`] - the spatial tile model
//! - [`geometry`] - pixel geometry, zoom, marquee hit testing
//! - [`selection`] - selection index sets
//! - [`state`] - the board and explorer state owners
//!
//! # Concurrency Model
//!
//! Single-threaded, synchronous, run-to-completion: every operation
//! either completes or is a no-op. The core holds no global state; the
//! hosting UI owns each state value and serializes mutations through it.

pub mod cells;
pub mod geometry;
pub mod history;
pub mod selection;
pub mod state;
pub mod styled;
pub mod text;
pub mod tiles;
pub mod transpose;

pub use cells::{GridCell, ZonePalette, project_cells, project_with_map};
pub use geometry::{
    CellGeometry, PixelRect, ZOOM_MAX, ZOOM_MIN, ZOOM_STEP, cell_origin, centering_offset,
    clamp_zoom, marquee_hits, rect_hits_cell,
};
pub use history::History;
pub use selection::SelectionSet;
pub use state::{
    BOARD_HISTORY_LIMIT, BOARD_MARGIN, BoardState, DEFAULT_BOARD_FONT, EXPLORER_HISTORY_LIMIT,
    ExplorerState, SelectionCallback, StateChange, StateChangeCallback, StateChangeKind,
};
pub use styled::{StyleTarget, StyledChar, apply_color, diff_styled, styled_from_text};
pub use text::{SpacesPolicy, graphemes, sanitize};
pub use tiles::{DragOffset, DropPreview, Tile, TileBoard, generate_tiles};
pub use transpose::{ExploreMode, GridSpec, PositionMap, VisualPosition};
