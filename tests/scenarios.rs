// End-to-end checks of the public bingo API against pinned values.

use bingo::board::{Board, CELLS};
use bingo::game::Game;
use bingo::number::{NUMBERSCOUNT, Number};
use bingo::shuffle::{self, FixedShuffler, SeededShuffler};
use bingo::BingoError;

const BOARD_CELLS: [u8; CELLS] = [
    15, 8, 4, 12, 10, 19, 27, 16, 28, 25, 42, 41, 0, 31, 40, 49, 52, 50, 46, 57, 64, 72, 67, 70, 74,
];
const BOARD_ID: &str = "5zuTsMm6CTZAs7ad";

/// Order of the first reset after seeding with 1257894000.
const FIRST_DRAW_ORDER: [u8; NUMBERSCOUNT] = [
    24, 20, 64, 54, 6, 62, 25, 43, 22, 57, 10, 40, 28, 29, 30, 73, 75, 69, 68, 23, 2, 37, 36, 15,
    38, 26, 8, 18, 51, 49, 53, 42, 1, 32, 52, 71, 16, 65, 5, 35, 31, 9, 12, 59, 34, 4, 33, 39, 17,
    41, 27, 67, 70, 11, 55, 56, 13, 72, 46, 19, 58, 3, 47, 14, 74, 45, 66, 48, 44, 63, 21, 50, 61,
    60, 7,
];

const GAME_ID: &str = "3-QSMsSRIBJSlFPkgNCR4OPAIQQEcYFQZLNx09NgwXNSowKxxGDzEuP0QbHy9DNDgZCwQnO0ITGkoWJC0KMiIDBTkUIBEoCDoHMyYh";

fn values(numbers: &[Number]) -> Vec<u8> {
    numbers.iter().map(|n| n.value()).collect()
}

fn game_with_drawn(drawn: &[u8]) -> Game {
    let mut order = drawn.to_vec();
    order.extend((1..=75).filter(|n| !drawn.contains(n)));
    let numbers: [Number; NUMBERSCOUNT] = std::array::from_fn(|i| Number::new(order[i]));
    Game::from_parts(numbers, drawn.len() as i64)
}

/// Draw order of a game reset after seeding with 1257894001, up to the last board cell.
const BOARD_SEED_DRAWS: [u8; 32] = [
    64, 49, 42, 19, 27, 41, 31, 15, 8, 4, 52, 12, 50, 72, 46, 67, 57, 10, 40, 33, 47, 9, 55, 16, 7,
    28, 70, 56, 25, 38, 20, 74,
];

#[test]
fn board_built_from_seeded_game() {
    let mut game = Game::default();
    let mut shuffler = SeededShuffler::seeded(1257894001);
    for _ in 0..BOARD_SEED_DRAWS.len() {
        game.draw_number_with(&mut shuffler);
    }
    assert_eq!(values(game.drawn_numbers()), BOARD_SEED_DRAWS.to_vec());

    let board = Board::new_with(&mut SeededShuffler::seeded(1257894001));
    assert_eq!(values(board.cells()), BOARD_CELLS.to_vec());
    assert_eq!(board.id().unwrap(), BOARD_ID);
}

#[test]
fn board_built_from_replayed_draws() {
    // 1 lands in a full B column and is skipped
    let draws = [
        15, 8, 4, 12, 10, 1, 19, 42, 49, 64, 27, 41, 52, 72, 16, 31, 50, 67, 28, 40, 46, 70, 25,
        57, 74,
    ];
    let board = Board::new_with(&mut FixedShuffler::new(draws));
    assert_eq!(board.id().unwrap(), BOARD_ID);
}

#[test]
fn first_draw_of_zero_game() {
    let mut game = Game::default();
    game.draw_number_with(&mut SeededShuffler::seeded(1257894000));
    assert_eq!(game.previous_number_drawn(), Number::new(24));
    assert_eq!(values(game.numbers()), FIRST_DRAW_ORDER.to_vec());
    assert_eq!(game.numbers_left(), 74);
}

// The only test in this file that touches the process-wide shuffler.
#[test]
fn process_wide_seed_is_observed() {
    shuffle::seed(1257894000);
    let mut game = Game::default();
    game.draw_number();
    assert_eq!(values(game.numbers()), FIRST_DRAW_ORDER.to_vec());

    shuffle::seed(1257894000);
    let mut again = Game::default();
    again.reset();
    assert_eq!(values(again.numbers()), FIRST_DRAW_ORDER.to_vec());
    assert_eq!(again.numbers_drawn(), 0);

    for _ in 0..2 {
        shuffle::seed(1257894001);
        let board = Board::new();
        assert_eq!(board.id().unwrap(), BOARD_ID);
    }
}

#[test]
fn decode_pinned_game_id() {
    let game = Game::from_id(GAME_ID).unwrap();
    assert_eq!(game.numbers_drawn(), 3);
    assert_eq!(values(game.drawn_numbers()), vec![65, 35, 44]);
    assert_eq!(game.id().unwrap(), GAME_ID);
}

#[test]
fn encode_pinned_board() {
    assert_eq!(Board::from(BOARD_CELLS).id().unwrap(), BOARD_ID);
    assert_eq!(Board::from_id(BOARD_ID).unwrap(), Board::from(BOARD_CELLS));
}

#[test]
fn column_line_is_bingo() {
    let board = Board::from(BOARD_CELLS);
    let game = game_with_drawn(&[15, 8, 4, 12, 10]);
    assert!(board.has_line(&game));
    assert!(!board.is_filled(&game));
}

#[test]
fn diagonal_line_uses_free_cell() {
    let board = Board::from(BOARD_CELLS);
    let game = game_with_drawn(&[15, 27, 46, 74]);
    assert!(board.has_line(&game));
    assert!(!board.is_filled(&game));
}

#[test]
fn swapped_columns_are_rejected() {
    let mut cells = BOARD_CELLS;
    cells.swap(0, 24);
    assert!(matches!(
        Board::from(cells).id(),
        Err(BingoError::InvalidValue(_))
    ));
}

#[test]
fn full_game_fills_every_board() {
    let mut shuffler = SeededShuffler::seeded(1257894001);
    let board = Board::new_with(&mut shuffler);
    let mut game = Game::default();
    let mut seen_line = false;
    while game.numbers_left() > 0 {
        game.draw_number_with(&mut shuffler);
        let line = board.has_line(&game);
        assert!(line || !seen_line, "lines never disappear");
        seen_line = line;
        let id = game.id().unwrap();
        assert_eq!(Game::from_id(&id).unwrap(), game);
    }
    assert!(board.is_filled(&game));
    assert!(board.has_line(&game));

    let before = game.clone();
    game.draw_number_with(&mut shuffler);
    assert_eq!(game, before);
}
