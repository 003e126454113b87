use board_core::{
    BoardState, CellGeometry, ExploreMode, ExplorerState, PixelRect, SpacesPolicy, cell_origin,
    centering_offset,
};

const GEOMETRY: CellGeometry = CellGeometry {
    cell_width: 56.0,
    cell_height: 56.0,
    gap: 3.2,
    padding: 19.2,
};

/// Wide enough that no centering offset applies.
const NARROW_VIEWPORT: f64 = 100.0;

#[test]
fn test_marquee_touching_edge_does_not_select() {
    let mut board = BoardState::new();
    board.create_tiles("A", 1, SpacesPolicy::Keep); // tile 0 at (41,41)

    let (left, top) = cell_origin(41, 41, &GEOMETRY, 0.0);
    // Rectangle whose right edge exactly touches the tile's left edge.
    let touching = PixelRect {
        x: left - 30.0,
        y: top,
        width: 30.0,
        height: 10.0,
    };
    board.marquee_select(&touching, &GEOMETRY, NARROW_VIEWPORT, 82, false);
    assert!(board.selection().is_empty());

    // One pixel further and the tile is caught.
    let overlapping = PixelRect {
        x: left - 30.0,
        y: top,
        width: 31.0,
        height: 10.0,
    };
    board.marquee_select(&overlapping, &GEOMETRY, NARROW_VIEWPORT, 82, false);
    assert!(board.selection().contains(0));
}

#[test]
fn test_marquee_sweeps_live_as_rect_grows() {
    let mut board = BoardState::new();
    board.create_tiles("ABCD", 4, SpacesPolicy::Keep); // row 41, cols 41..=44

    let (left, top) = cell_origin(41, 41, &GEOMETRY, 0.0);
    // First sample: covers the first two tiles.
    let small = PixelRect::from_drag((left, top), (left + 70.0, top + 10.0));
    board.marquee_select(&small, &GEOMETRY, NARROW_VIEWPORT, 82, false);
    assert_eq!(board.selection().len(), 2);

    // Later sample of the same drag: grown over all four.
    let grown = PixelRect::from_drag((left, top), (left + 230.0, top + 10.0));
    board.marquee_select(&grown, &GEOMETRY, NARROW_VIEWPORT, 82, false);
    assert_eq!(board.selection().len(), 4);

    // Shrinking the rectangle deselects live as well.
    board.marquee_select(&small, &GEOMETRY, NARROW_VIEWPORT, 82, false);
    assert_eq!(board.selection().len(), 2);
}

#[test]
fn test_zoom_scales_hit_boxes() {
    let mut board = BoardState::new();
    board.create_tiles("A", 1, SpacesPolicy::Keep);

    let zoomed = GEOMETRY.zoomed(2.0);
    let (left, top) = cell_origin(41, 41, &zoomed, 0.0);
    // A point just past the unzoomed width but inside the zoomed cell.
    let rect = PixelRect {
        x: left + 70.0,
        y: top + 5.0,
        width: 5.0,
        height: 5.0,
    };
    board.marquee_select(&rect, &zoomed, NARROW_VIEWPORT, 82, false);
    assert!(board.selection().contains(0));

    board.marquee_select(&rect, &GEOMETRY, NARROW_VIEWPORT, 82, false);
    assert!(board.selection().is_empty());
}

#[test]
fn test_explorer_marquee_accounts_for_centering() {
    let mut explorer = ExplorerState::new();
    explorer.set_text(&"X".repeat(9));
    explorer.set_mode(Some(ExploreMode::Untranspose));

    // 9 cells wide rotated block; a wide viewport centers it.
    let viewport = 2000.0;
    let centering = centering_offset(9, viewport, &GEOMETRY);
    assert!(centering > 0.0);

    let (left, top) = cell_origin(1, 1, &GEOMETRY, centering);
    let rect = PixelRect {
        x: left + 1.0,
        y: top + 1.0,
        width: 10.0,
        height: 10.0,
    };
    explorer.marquee_select(&rect, &GEOMETRY, viewport, false);
    assert!(explorer.selection().contains(0));

    // The same rectangle without accounting for centering misses.
    let uncentered = PixelRect {
        x: GEOMETRY.padding + 1.0,
        y: top + 1.0,
        width: 10.0,
        height: 10.0,
    };
    explorer.marquee_select(&uncentered, &GEOMETRY, viewport, false);
    assert!(explorer.selection().is_empty());
}

#[test]
fn test_additive_marquee_extends_selection() {
    let mut board = BoardState::new();
    board.create_tiles("AB", 2, SpacesPolicy::Keep);

    let (left0, top) = cell_origin(41, 41, &GEOMETRY, 0.0);
    let over_first = PixelRect {
        x: left0 + 1.0,
        y: top + 1.0,
        width: 5.0,
        height: 5.0,
    };
    board.marquee_select(&over_first, &GEOMETRY, NARROW_VIEWPORT, 82, false);
    assert_eq!(board.selection().len(), 1);

    let (left1, _) = cell_origin(42, 41, &GEOMETRY, 0.0);
    let over_second = PixelRect {
        x: left1 + 1.0,
        y: top + 1.0,
        width: 5.0,
        height: 5.0,
    };
    board.marquee_select(&over_second, &GEOMETRY, NARROW_VIEWPORT, 82, true);
    assert_eq!(board.selection().len(), 2);
}
