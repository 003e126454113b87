//! Save/load round trips through live board state.

use board_core::{BoardState, SpacesPolicy, StyleTarget};
use board_persist::{PersistError, load_document, save_document};

#[test]
fn test_session_survives_save_and_reload() {
    let mut board = BoardState::new();
    board.create_tiles_with_font("HELLO WORLD", 17, SpacesPolicy::Keep, "Z340");
    board.select_only(0);
    board.apply_color(Some("#cc0000"), StyleTarget::Text);

    let json = save_document(board.tiles(), board.board_font(), 1_754_438_400_000).unwrap();

    let document = load_document(&json).unwrap();
    let font = document.board_font.clone();
    let mut reloaded = BoardState::new();
    reloaded.load_document(document.into_tiles(), font);

    assert_eq!(reloaded.tiles(), board.tiles());
    assert_eq!(reloaded.board_font(), "Z340");
    assert!(!reloaded.can_undo());
}

#[test]
fn test_failed_load_leaves_state_untouched() {
    let mut board = BoardState::new();
    board.create_tiles("ABC", 3, SpacesPolicy::Keep);
    let before = board.tiles().to_vec();

    // All-or-nothing: the document never parses, so the caller never
    // reaches load_document() on the state.
    let result = load_document(r#"{"version":"1.0","timestamp":0,"boardFont":"Arial"}"#);
    assert!(matches!(result, Err(PersistError::MissingTiles)));
    assert_eq!(board.tiles(), &before[..]);
}

#[test]
fn test_loaded_ids_do_not_collide_with_new_tiles() {
    let json = r#"{
        "version": "1.0",
        "timestamp": 1754438400000,
        "boardFont": "Arial",
        "tiles": [
            { "id": 5, "char": "A", "col": 41, "row": 41 },
            { "id": 2, "char": "B", "col": 42, "row": 41 }
        ]
    }"#;
    let document = load_document(json).unwrap();
    let font = document.board_font.clone();

    let mut board = BoardState::new();
    board.load_document(document.into_tiles(), font);

    let new_id = board.place_new_tile("C", 1, 1).unwrap();
    assert_eq!(new_id, 6);
}
