// bingo/src/number.rs
// This module defines the numbers of a 75-ball bingo game and their B-I-N-G-O columns.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const FIRSTNUMBER: u8 = 1;
pub const LASTNUMBER: u8 = 75;
pub const NUMBERSCOUNT: usize = (LASTNUMBER - FIRSTNUMBER + 1) as usize;
pub const COLUMNS: usize = 5;
pub const NUMBERSPERCOLUMN: u8 = 15;
pub const COLUMNLETTERS: [char; COLUMNS] = ['B', 'I', 'N', 'G', 'O'];

/// A bingo number. Only 1..=75 are valid; 0 marks the free cell of a board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Number(u8);

impl Number {
    pub const FREE: Number = Number(0);

    pub const fn new(value: u8) -> Self {
        Number(value)
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    pub const fn is_valid(self) -> bool {
        FIRSTNUMBER <= self.0 && self.0 <= LASTNUMBER
    }

    /// Column index (0 = B .. 4 = O). Only meaningful for valid numbers.
    pub const fn column(self) -> usize {
        (self.0.wrapping_sub(1) / NUMBERSPERCOLUMN) as usize
    }

    /// First number of a column.
    pub const fn column_base(column: usize) -> u8 {
        FIRSTNUMBER + column as u8 * NUMBERSPERCOLUMN
    }
}

impl From<u8> for Number {
    fn from(value: u8) -> Self {
        Number(value)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return f.write_str("?");
        }
        write!(f, "{} {}", COLUMNLETTERS[self.column()], self.0)
    }
}
