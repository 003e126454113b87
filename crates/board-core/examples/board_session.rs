//! Board-mode walkthrough: generate tiles, drag, copy, undo.

use board_core::{BoardState, SpacesPolicy, StyleTarget};

fn main() {
    let mut board = BoardState::new();
    board.create_tiles("HERONSTARNIGHT", 7, SpacesPolicy::Keep);
    println!("generated {} tiles", board.tiles().len());

    // Drag the first tile next to the block.
    let id = board.tiles()[0].id;
    let preview = board.preview_drop(id, (1, 1));
    println!("drop at (1,1) valid: {}", preview.is_valid);
    board.commit_drop(id, (1, 1));

    // Color every N.
    board.select_symbol("N", false);
    board.apply_color(Some("#006400"), StyleTarget::Background);
    println!(
        "selected and shaded {} matching tiles",
        board.tiles().iter().filter(|t| t.background_color.is_some()).count()
    );

    // Duplicate the shaded tiles one cell down.
    board.set_copy_mode(true);
    let pivot = board
        .tiles()
        .iter()
        .find(|t| t.background_color.is_some())
        .map(|t| t.id)
        .expect("shaded tile");
    let anchor = {
        let tile = board.tiles().iter().find(|t| t.id == pivot).unwrap();
        (tile.col, tile.row + 20)
    };
    if board.commit_drop(pivot, anchor) {
        println!("copied; board now holds {} tiles", board.tiles().len());
    }

    while board.can_undo() {
        board.undo();
    }
    println!("after full undo: {} tiles", board.tiles().len());
}
