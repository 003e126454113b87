#![warn(missing_docs)]
//! JSON board-document persistence.
//!
//! Owns the on-disk layout of a saved board session:
//!
//! ```json
//! {
//!   "version": "1.0",
//!   "timestamp": 1734220800000,
//!   "boardFont": "Arial",
//!   "tiles": [
//!     { "id": 0, "char": "H", "col": 41, "row": 41 },
//!     { "id": 1, "char": "E", "col": 42, "row": 41, "color": "#cc0000" }
//!   ]
//! }
//! ```
//!
//! Loading is all-or-nothing: the caller's in-memory state must stay
//! untouched until a fully parsed, valid tile array is available, so
//! every failure is surfaced before any [`board_core::Tile`] is built.
//! Timestamps are caller-supplied milliseconds; this crate never reads
//! clocks.

use board_core::{DEFAULT_BOARD_FONT, Tile};
use serde::{Deserialize, Serialize};

/// Format version written into saved documents.
pub const FORMAT_VERSION: &str = "1.0";

/// Errors surfaced by document load/save.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// The document is not valid JSON or a field has the wrong shape.
    #[error("invalid board document: {0}")]
    Malformed(#[from] serde_json::Error),
    /// The document parses as JSON but has no `tiles` array.
    #[error("invalid board document: missing tiles array")]
    MissingTiles,
    /// Saving an empty board is rejected.
    #[error("nothing to save: the board is empty")]
    EmptyBoard,
}

/// One tile as persisted. Unstyled color slots are omitted from the
/// JSON, matching documents written by earlier versions of the tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct TileRecord {
    id: u64,
    #[serde(rename = "char")]
    ch: String,
    col: i32,
    row: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    color: Option<String>,
    #[serde(
        rename = "backgroundColor",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    background_color: Option<String>,
}

impl From<&Tile> for TileRecord {
    fn from(tile: &Tile) -> Self {
        Self {
            id: tile.id,
            ch: tile.ch.clone(),
            col: tile.col,
            row: tile.row,
            color: tile.color.clone(),
            background_color: tile.background_color.clone(),
        }
    }
}

impl From<TileRecord> for Tile {
    fn from(record: TileRecord) -> Self {
        Self {
            id: record.id,
            ch: record.ch,
            col: record.col,
            row: record.row,
            color: record.color,
            background_color: record.background_color,
        }
    }
}

/// A parsed board document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardDocument {
    /// Format version (see [`FORMAT_VERSION`]). Documents that omit it
    /// are treated as the current format, like the original tool did.
    #[serde(default = "default_version")]
    pub version: String,
    /// Save time in milliseconds, supplied by the caller.
    #[serde(default)]
    pub timestamp: u64,
    /// Font name traveling with the board. Documents from older versions
    /// may omit it.
    #[serde(rename = "boardFont", default = "default_font")]
    pub board_font: String,
    tiles: Vec<TileRecord>,
}

fn default_font() -> String {
    DEFAULT_BOARD_FONT.to_string()
}

fn default_version() -> String {
    FORMAT_VERSION.to_string()
}

impl BoardDocument {
    /// Assemble a document from live board state.
    pub fn from_tiles(tiles: &[Tile], board_font: &str, timestamp_ms: u64) -> Self {
        Self {
            version: FORMAT_VERSION.to_string(),
            timestamp: timestamp_ms,
            board_font: board_font.to_string(),
            tiles: tiles.iter().map(TileRecord::from).collect(),
        }
    }

    /// Convert the persisted tiles back into the native representation.
    pub fn into_tiles(self) -> Vec<Tile> {
        self.tiles.into_iter().map(Tile::from).collect()
    }

    /// Number of persisted tiles.
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }
}

/// Parse a saved document. Unknown fields are ignored; a missing or
/// non-array `tiles` field is reported without building any tile.
pub fn load_document(json: &str) -> Result<BoardDocument, PersistError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    if !value.get("tiles").is_some_and(serde_json::Value::is_array) {
        return Err(PersistError::MissingTiles);
    }
    Ok(serde_json::from_value(value)?)
}

/// Serialize the board for download. An empty board is rejected.
pub fn save_document(
    tiles: &[Tile],
    board_font: &str,
    timestamp_ms: u64,
) -> Result<String, PersistError> {
    if tiles.is_empty() {
        return Err(PersistError::EmptyBoard);
    }
    let document = BoardDocument::from_tiles(tiles, board_font, timestamp_ms);
    Ok(serde_json::to_string_pretty(&document)?)
}
