//! Explorer walkthrough: lay text out under both transposition layouts.

use board_core::{ExploreMode, ExplorerState};

fn main() {
    let mut explorer = ExplorerState::new();
    explorer.set_dimensions(17, 9);
    explorer.set_text(&"HERONSTARNIGHTCAVE".repeat(19));

    for mode in [ExploreMode::Untranspose, ExploreMode::Transpose] {
        explorer.set_mode(Some(mode));
        let cells = explorer.cells();
        let map = explorer.position_map().expect("mode chosen");
        println!(
            "{:?}: {} cells, {} visual cols x {} visual rows",
            mode,
            cells.len(),
            map.visual_cols(),
            map.visual_rows(),
        );

        // Where did the first block's first characters land?
        for i in 0..4 {
            let p = map.visual_position(i).unwrap();
            println!("  text[{}] -> row {}, col {}", i, p.row, p.col);
        }
    }
}
