//! Board behavior through the public API.

use blockfall::core::{Board, Piece};
use blockfall::types::{ShapeKind, BOARD_COLS, BOARD_ROWS};

#[test]
fn test_new_board_is_empty() {
    let board = Board::new();
    assert_eq!(board.cols(), BOARD_COLS);
    assert_eq!(board.rows(), BOARD_ROWS);

    for y in 0..BOARD_ROWS as i8 {
        for x in 0..BOARD_COLS as i8 {
            assert_eq!(board.get(x, y), Some(None));
        }
    }
}

#[test]
fn test_get_out_of_bounds() {
    let board = Board::new();
    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_COLS as i8, 0), None);
    assert_eq!(board.get(0, BOARD_ROWS as i8), None);
}

#[test]
fn test_set_and_get() {
    let mut board = Board::new();
    board.set(5, 10, Some(ShapeKind::T));
    assert_eq!(board.get(5, 10), Some(Some(ShapeKind::T)));
    assert_eq!(board.get(5, 9), Some(None));
}

#[test]
fn test_collision_with_walls_and_floor() {
    let board = Board::new();

    let mut piece = Piece::spawn(ShapeKind::O);
    assert!(!board.collides(&piece));

    // O occupies a 2x2 block at (x, y)..(x+1, y+1).
    piece.x = -1;
    assert!(board.collides(&piece));
    piece.x = BOARD_COLS as i8 - 1;
    assert!(board.collides(&piece));
    piece.x = BOARD_COLS as i8 - 2;
    assert!(!board.collides(&piece));

    piece.y = BOARD_ROWS as i8 - 2;
    assert!(!board.collides(&piece));
    piece.y = BOARD_ROWS as i8 - 1;
    assert!(board.collides(&piece));
}

#[test]
fn test_cells_above_the_top_do_not_collide() {
    let board = Board::new();

    // Vertical I poking above row 0: negative rows are legal as long as the
    // in-board cells are clear and horizontally in bounds.
    let mut piece = Piece::spawn(ShapeKind::I);
    piece.rotate();
    piece.y = -2;
    assert!(!board.collides(&piece));

    piece.x = -1;
    assert!(board.collides(&piece));
}

#[test]
fn test_merge_tags_cells_with_the_piece_kind() {
    let mut board = Board::new();
    let mut piece = Piece::spawn(ShapeKind::O);
    piece.x = 0;
    piece.y = BOARD_ROWS as i8 - 2;
    board.merge(&piece);

    assert_eq!(board.get(0, BOARD_ROWS as i8 - 2), Some(Some(ShapeKind::O)));
    assert_eq!(board.get(1, BOARD_ROWS as i8 - 1), Some(Some(ShapeKind::O)));
    assert_eq!(board.get(2, BOARD_ROWS as i8 - 1), Some(None));
}

#[test]
fn test_clear_single_full_row() {
    let mut board = Board::new();
    let bottom = BOARD_ROWS as i8 - 1;
    for x in 0..BOARD_COLS as i8 {
        board.set(x, bottom, Some(ShapeKind::I));
    }
    // A survivor one row up.
    board.set(3, bottom - 1, Some(ShapeKind::T));

    assert_eq!(board.clear_lines(), 1);
    assert_eq!(board.get(3, bottom), Some(Some(ShapeKind::T)));
    assert_eq!(board.get(3, bottom - 1), Some(None));
}

#[test]
fn test_clear_multiple_rows_compacts_in_one_pass() {
    let mut board = Board::new();
    let bottom = BOARD_ROWS as i8 - 1;

    // Full rows at the bottom and one partial row sandwiched between.
    for x in 0..BOARD_COLS as i8 {
        board.set(x, bottom, Some(ShapeKind::S));
        board.set(x, bottom - 2, Some(ShapeKind::Z));
    }
    board.set(0, bottom - 1, Some(ShapeKind::L));

    assert_eq!(board.clear_lines(), 2);
    assert_eq!(board.get(0, bottom), Some(Some(ShapeKind::L)));
    assert_eq!(board.get(1, bottom), Some(None));
    for y in 0..bottom {
        for x in 0..BOARD_COLS as i8 {
            assert_eq!(board.get(x, y), Some(None));
        }
    }
}

#[test]
fn test_clear_on_empty_board_is_a_no_op() {
    let mut board = Board::new();
    assert_eq!(board.clear_lines(), 0);
}
