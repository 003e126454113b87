//! Transposition layout mapping.
//!
//! Maps a linear ciphertext index onto a 2-D grid position (and back)
//! under the two explorer layouts:
//!
//! - **untranspose** — the identity map: grid index equals text index.
//!   The visual block is the cipher's natural shape rotated, `numRows`
//!   cells wide and `numCols` cells tall.
//! - **transpose** — the text is cut into fixed-capacity blocks of
//!   `numRows * numCols` characters. The first two blocks follow a
//!   cyclic diagonal walk (one row down, two columns across, wrapping by
//!   subtraction since coordinates are 1-indexed); everything past them
//!   (the residue) maps linearly. This two-blocks-cyclic /
//!   remainder-linear rule is fixed policy of the source cipher layout.
//!
//! Blocks are rendered with a one-row spacer between block 0, block 1,
//! and the residue. The untranspose layout additionally shades a
//! triangular per-block zone (the homophone frequency zone); the formula
//! is reproduced as observed, not derived.

use std::collections::BTreeMap;

/// Which transposition layout the explorer shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExploreMode {
    /// Straight layout: grid index equals text index.
    Untranspose,
    /// Cyclic diagonal walk over the first two blocks, linear residue.
    Transpose,
}

/// Grid dimension selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
    /// Number of cipher columns.
    pub num_cols: usize,
    /// Number of cipher rows.
    pub num_rows: usize,
}

impl GridSpec {
    /// Create a dimension selection.
    pub fn new(num_cols: usize, num_rows: usize) -> Self {
        Self { num_cols, num_rows }
    }

    /// Characters per transposition block.
    pub fn block_capacity(&self) -> usize {
        self.num_cols * self.num_rows
    }

    /// Whether both dimensions are usable.
    pub fn is_valid(&self) -> bool {
        self.num_cols >= 1 && self.num_rows >= 1
    }
}

/// A 1-based visual grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualPosition {
    /// 1-based visual row, spacers included.
    pub row: usize,
    /// 1-based visual column.
    pub col: usize,
}

/// Number of visual regions: block 0, block 1, the residue.
const REGION_COUNT: usize = 3;

/// Precomputed `gridIndex <-> textIndex` map for one `(spec, mode, N)`.
///
/// Within each bounded block the map is a bijection for the cipher's own
/// dimensions (the doubled column step must generate the block, as it
/// does at 17 columns); the walk itself is reproduced verbatim for any
/// dimensions.
#[derive(Debug, Clone)]
pub struct PositionMap {
    spec: GridSpec,
    mode: ExploreMode,
    text_len: usize,
    grid_for_text: Vec<usize>,
    text_for_grid: BTreeMap<usize, usize>,
    /// Occupied row count per region (0 when the region has no cells).
    region_rows: [usize; REGION_COUNT],
}

impl PositionMap {
    /// Build the map for `text_len` characters.
    ///
    /// Zero-length text or unusable dimensions produce an empty map: no
    /// grid index corresponds to any character.
    pub fn build(spec: GridSpec, mode: ExploreMode, text_len: usize) -> Self {
        if !spec.is_valid() || text_len == 0 {
            return Self {
                spec,
                mode,
                text_len: 0,
                grid_for_text: Vec::new(),
                text_for_grid: BTreeMap::new(),
                region_rows: [0; REGION_COUNT],
            };
        }

        let cap = spec.block_capacity();
        let offsets = match mode {
            ExploreMode::Untranspose => Vec::new(),
            ExploreMode::Transpose => cyclic_offsets(spec),
        };

        let mut grid_for_text = Vec::with_capacity(text_len);
        let mut text_for_grid = BTreeMap::new();
        for text_index in 0..text_len {
            let grid_index = match mode {
                ExploreMode::Untranspose => text_index,
                ExploreMode::Transpose => {
                    let block = text_index / cap;
                    if block < 2 {
                        block * cap + offsets[text_index % cap]
                    } else {
                        text_index
                    }
                }
            };
            grid_for_text.push(grid_index);
            text_for_grid.insert(grid_index, text_index);
        }

        let width = visual_block_width(spec, mode);
        let mut region_rows = [0usize; REGION_COUNT];
        for &grid_index in &grid_for_text {
            let (region, rel) = region_of(grid_index, cap);
            let rows = rel / width + 1;
            region_rows[region] = region_rows[region].max(rows);
        }

        Self {
            spec,
            mode,
            text_len,
            grid_for_text,
            text_for_grid,
            region_rows,
        }
    }

    /// The dimension selection this map was built for.
    pub fn spec(&self) -> GridSpec {
        self.spec
    }

    /// The layout mode this map was built for.
    pub fn mode(&self) -> ExploreMode {
        self.mode
    }

    /// Number of mapped characters.
    pub fn text_len(&self) -> usize {
        self.text_len
    }

    /// Grid index for a text index, if the character exists.
    pub fn grid_index(&self, text_index: usize) -> Option<usize> {
        self.grid_for_text.get(text_index).copied()
    }

    /// Text index for a grid index. Grid slots beyond the mapped domain
    /// have no corresponding character.
    pub fn text_index(&self, grid_index: usize) -> Option<usize> {
        self.text_for_grid.get(&grid_index).copied()
    }

    /// Visual width of the block layout, in cells.
    pub fn visual_cols(&self) -> usize {
        visual_block_width(self.spec, self.mode)
    }

    /// Total visual height, spacer rows included.
    pub fn visual_rows(&self) -> usize {
        let mut total = 0;
        for rows in self.region_rows.into_iter().filter(|&r| r > 0) {
            if total > 0 {
                total += 1; // spacer between regions
            }
            total += rows;
        }
        total
    }

    /// Absolute visual position of a character, spacers included.
    pub fn visual_position(&self, text_index: usize) -> Option<VisualPosition> {
        let grid_index = self.grid_index(text_index)?;
        let cap = self.spec.block_capacity();
        let width = self.visual_cols();
        let (region, rel) = region_of(grid_index, cap);

        let mut row_offset = 0;
        for rows in self.region_rows[..region].iter().filter(|&&r| r > 0) {
            row_offset += rows + 1;
        }

        Some(VisualPosition {
            row: row_offset + rel / width + 1,
            col: rel % width + 1,
        })
    }

    /// Whether a character falls in the shaded homophone-frequency zone.
    ///
    /// Untranspose mode only, and only within the first two blocks: a
    /// cell is shaded when its relative column is 1, or when it lies in
    /// the last `2 * (relCol - 1)` rows of its column. Computed per
    /// block against the block's nominal height.
    pub fn is_shaded(&self, text_index: usize) -> bool {
        if self.mode != ExploreMode::Untranspose {
            return false;
        }
        let Some(grid_index) = self.grid_index(text_index) else {
            return false;
        };
        let cap = self.spec.block_capacity();
        let (region, rel) = region_of(grid_index, cap);
        if region >= 2 {
            return false;
        }

        let width = self.visual_cols();
        let nominal_rows = self.spec.num_cols;
        let rel_row = rel / width + 1;
        let rel_col = rel % width + 1;
        rel_col == 1 || rel_row + 2 * (rel_col - 1) > nominal_rows
    }
}

/// Visual block width: the transpose layout shows the cipher block as-is
/// (`numCols` wide); the untranspose layout shows it rotated (`numRows`
/// wide).
fn visual_block_width(spec: GridSpec, mode: ExploreMode) -> usize {
    match mode {
        ExploreMode::Untranspose => spec.num_rows,
        ExploreMode::Transpose => spec.num_cols,
    }
}

/// Region index (block 0, block 1, residue) and the grid offset within
/// that region.
fn region_of(grid_index: usize, cap: usize) -> (usize, usize) {
    if grid_index < cap {
        (0, grid_index)
    } else if grid_index < 2 * cap {
        (1, grid_index - cap)
    } else {
        (2, grid_index - 2 * cap)
    }
}

/// In-block linear offsets of the cyclic diagonal walk.
///
/// Starts at `(row=1, col=1)`; each step advances one row and two
/// columns, wrapping by subtraction (`if coord > limit { coord -= limit }`,
/// not modulo — the base is 1-indexed).
fn cyclic_offsets(spec: GridSpec) -> Vec<usize> {
    let cap = spec.block_capacity();
    let mut offsets = Vec::with_capacity(cap);
    let mut row = 1usize;
    let mut col = 1usize;
    for _ in 0..cap {
        offsets.push((row - 1) * spec.num_cols + (col - 1));
        row += 1;
        if row > spec.num_rows {
            row -= spec.num_rows;
        }
        col += 2;
        if col > spec.num_cols {
            col -= spec.num_cols;
        }
    }
    offsets
}
