// bingo/src/board.rs
// This module handles the 5x5 bingo board: construction from a game's draw stream,
// the 16 character identifier codec and the line / full card checks.

use std::collections::HashSet;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Serialize;

use crate::error::BingoError;
use crate::game::Game;
use crate::number::{COLUMNS, LASTNUMBER, Number};
use crate::shuffle::{self, Shuffler};

pub const ROWS: usize = 5;
pub const CELLS: usize = COLUMNS * ROWS;
pub const FREE_COLUMN: usize = 2;
pub const FREE_ROW: usize = 2;
pub const FREE_CELL: usize = FREE_COLUMN * ROWS + FREE_ROW;
pub const BOARD_ID_LEN: usize = 16;
const BOARD_ID_BYTES: usize = (CELLS - 1) / 2;
const INVALID_OFFSET: u8 = 15;

// Rows, columns and both diagonals as cell indexes (column * 5 + row).
const LINES: [[usize; 5]; 12] = [
    [0, 5, 10, 15, 20],
    [1, 6, 11, 16, 21],
    [2, 7, 12, 17, 22],
    [3, 8, 13, 18, 23],
    [4, 9, 14, 19, 24],
    [0, 1, 2, 3, 4],
    [5, 6, 7, 8, 9],
    [10, 11, 12, 13, 14],
    [15, 16, 17, 18, 19],
    [20, 21, 22, 23, 24],
    [0, 6, 12, 18, 24],
    [4, 8, 12, 16, 20],
];

/// A bingo board, stored column by column. The centre cell holds `Number::FREE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Board([Number; CELLS]);

impl Board {
    /// Create a board from the process-wide shuffler.
    pub fn new() -> Self {
        shuffle::with_shared(|shuffler| Self::new_with(shuffler))
    }

    /// Create a board by drawing from a fresh game until every column is full.
    /// Numbers drawn for an already full column are skipped.
    pub fn new_with<S: Shuffler + ?Sized>(shuffler: &mut S) -> Self {
        const FULL: [usize; COLUMNS] = [ROWS; COLUMNS];
        let mut game = Game::default();
        let mut cells = [Number::FREE; CELLS];
        let mut row_counts = [0usize; COLUMNS];
        while row_counts != FULL {
            game.draw_number_with(shuffler);
            let number = game.previous_number_drawn();
            let column = number.column();
            let row = row_counts[column];
            if row >= ROWS {
                continue;
            }
            cells[column * ROWS + row] = number;
            row_counts[column] += 1;
            if column == FREE_COLUMN && row_counts[column] == FREE_ROW {
                row_counts[column] += 1;
            }
        }
        Board(cells)
    }

    /// Build a board from raw cells without validation. `id()` reports invalid boards.
    pub fn from_cells(cells: [Number; CELLS]) -> Self {
        Board(cells)
    }

    pub fn cells(&self) -> &[Number; CELLS] {
        &self.0
    }

    pub fn cell(&self, column: usize, row: usize) -> Number {
        self.0[column * ROWS + row]
    }

    /// True if any row, column or diagonal is fully drawn in the game.
    pub fn has_line(&self, game: &Game) -> bool {
        let covered = covered_numbers(game);
        LINES
            .iter()
            .any(|line| line.iter().all(|&i| is_covered(&covered, self.0[i])))
    }

    /// True if every number of the board is drawn in the game.
    pub fn is_filled(&self, game: &Game) -> bool {
        let covered = covered_numbers(game);
        self.0.iter().all(|&n| is_covered(&covered, n))
    }

    /// Encode the board as 16 base64url characters.
    ///
    /// Each non-free cell is stored as its 0..14 offset in its column, two cells per byte,
    /// giving 24 nibbles = 12 bytes = 16 characters.
    pub fn id(&self) -> Result<String, BingoError> {
        if !self.is_valid() {
            return Err(BingoError::invalid_value("board has duplicate/invalid numbers"));
        }
        let nibbles: Vec<u8> = (0..CELLS)
            .filter(|&i| i != FREE_CELL)
            .map(|i| self.0[i].value() - Number::column_base(i / ROWS))
            .collect();
        let bytes: Vec<u8> = nibbles.chunks(2).map(|pair| pair[0] << 4 | pair[1]).collect();
        Ok(URL_SAFE_NO_PAD.encode(bytes))
    }

    /// Decode a board identifier produced by `id()`.
    pub fn from_id(id: &str) -> Result<Self, BingoError> {
        if id.len() != BOARD_ID_LEN {
            return Err(BingoError::invalid_id(format!(
                "board id must be {BOARD_ID_LEN} characters long"
            )));
        }
        let bytes = URL_SAFE_NO_PAD
            .decode(id)
            .map_err(|e| BingoError::invalid_id(format!("decoding board from id: {e}")))?;
        if bytes.len() != BOARD_ID_BYTES {
            return Err(BingoError::invalid_id("decoded board has the wrong size"));
        }
        let indexes = (0..CELLS).filter(|&i| i != FREE_CELL);
        let nibbles = bytes.iter().flat_map(|b| [b >> 4, b & 0x0f]);
        let mut cells = [Number::FREE; CELLS];
        for (i, offset) in indexes.zip(nibbles) {
            if offset == INVALID_OFFSET {
                return Err(BingoError::invalid_id(format!(
                    "board has invalid number at index {i}"
                )));
            }
            cells[i] = Number::new(Number::column_base(i / ROWS) + offset);
        }
        let board = Board(cells);
        if !board.is_valid() {
            return Err(BingoError::invalid_id("board has duplicate/invalid numbers"));
        }
        Ok(board)
    }

    /// The centre is free, every other cell holds a number of its column, and none repeats.
    fn is_valid(&self) -> bool {
        if self.0[FREE_CELL] != Number::FREE {
            return false;
        }
        let mut seen = HashSet::with_capacity(CELLS - 1);
        self.0.iter().enumerate().all(|(i, &n)| {
            i == FREE_CELL || (n.is_valid() && n.column() == i / ROWS && seen.insert(n))
        })
    }
}

impl From<[u8; CELLS]> for Board {
    fn from(values: [u8; CELLS]) -> Self {
        Board(values.map(Number::new))
    }
}

/// Drawn numbers of the game as a lookup table, with the free cell always covered.
fn covered_numbers(game: &Game) -> [bool; LASTNUMBER as usize + 1] {
    let mut covered = [false; LASTNUMBER as usize + 1];
    covered[Number::FREE.value() as usize] = true;
    for n in game.drawn_numbers() {
        if let Some(slot) = covered.get_mut(n.value() as usize) {
            *slot = true;
        }
    }
    covered
}

fn is_covered(covered: &[bool], number: Number) -> bool {
    covered.get(number.value() as usize).copied().unwrap_or(false)
}
