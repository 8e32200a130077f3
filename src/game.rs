// bingo/src/game.rs
// This module provides the Game value: a shuffled pouch of the 75 numbers plus a draw cursor.
// A game is fully described by its identifier, so the server keeps no per-game state.

use std::collections::{BTreeMap, HashSet};

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::error::BingoError;
use crate::number::{NUMBERSCOUNT, Number};
use crate::shuffle::{self, Shuffler};

/// Identifier of a game where no number has been drawn yet.
pub const ZERO_GAME_ID: &str = "0";

/// A bingo game. The zero value is an unstarted game that shuffles on its first draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    numbers: [Number; NUMBERSCOUNT],
    numbers_drawn: i64,
}

impl Default for Game {
    fn default() -> Self {
        Self {
            numbers: [Number::FREE; NUMBERSCOUNT],
            numbers_drawn: 0,
        }
    }
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a game from raw parts without validation. `id()` reports invalid numbers.
    pub fn from_parts(numbers: [Number; NUMBERSCOUNT], numbers_drawn: i64) -> Self {
        Self { numbers, numbers_drawn }
    }

    pub fn numbers(&self) -> &[Number; NUMBERSCOUNT] {
        &self.numbers
    }

    pub fn numbers_drawn(&self) -> i64 {
        self.numbers_drawn
    }

    fn is_uninitialized(&self) -> bool {
        self.numbers[0] == Number::FREE
    }

    fn drawn_count(&self) -> usize {
        self.numbers_drawn.clamp(0, NUMBERSCOUNT as i64) as usize
    }

    /// How many numbers can still be drawn.
    pub fn numbers_left(&self) -> usize {
        if self.numbers_drawn >= NUMBERSCOUNT as i64 {
            return 0;
        }
        // An unshuffled pouch reads as freshly reset: nothing drawn yet.
        if self.is_uninitialized() {
            return NUMBERSCOUNT;
        }
        NUMBERSCOUNT - self.drawn_count()
    }

    /// Drawn numbers in draw order.
    pub fn drawn_numbers(&self) -> &[Number] {
        &self.numbers[..self.drawn_count()]
    }

    /// Draw the next number with the process-wide shuffler.
    pub fn draw_number(&mut self) {
        shuffle::with_shared(|shuffler| self.draw_number_with(shuffler));
    }

    /// Draw the next number. A game with nothing drawn is reshuffled first;
    /// a game with every number drawn is left untouched.
    pub fn draw_number_with<S: Shuffler + ?Sized>(&mut self, shuffler: &mut S) {
        if self.numbers_drawn <= 0 {
            self.reset_with(shuffler);
            self.numbers_drawn = 1;
        } else if self.numbers_drawn < NUMBERSCOUNT as i64 {
            self.numbers_drawn += 1;
        }
    }

    /// Last number drawn, or `Number::FREE` when nothing has been drawn.
    pub fn previous_number_drawn(&self) -> Number {
        self.drawn_numbers().last().copied().unwrap_or(Number::FREE)
    }

    /// Refill the pouch with the process-wide shuffler.
    pub fn reset(&mut self) {
        shuffle::with_shared(|shuffler| self.reset_with(shuffler));
    }

    /// Refill the pouch with 1..=75, shuffle it and clear the drawn numbers.
    pub fn reset_with<S: Shuffler + ?Sized>(&mut self, shuffler: &mut S) {
        for (i, slot) in self.numbers.iter_mut().enumerate() {
            *slot = Number::new(i as u8 + 1);
        }
        let numbers = &mut self.numbers;
        shuffler.shuffle(NUMBERSCOUNT, &mut |i, j| numbers.swap(i, j));
        self.numbers_drawn = 0;
    }

    /// Drawn numbers grouped by column, in draw order within each column.
    pub fn drawn_number_columns(&self) -> BTreeMap<usize, Vec<Number>> {
        let mut columns: BTreeMap<usize, Vec<Number>> = BTreeMap::new();
        for &number in self.drawn_numbers() {
            columns.entry(number.column()).or_default().push(number);
        }
        columns
    }

    /// Encode the game as `"<drawn>-<base64url numbers>"`, or `"0"` if nothing was drawn.
    pub fn id(&self) -> Result<String, BingoError> {
        if self.numbers_drawn <= 0 {
            return Ok(ZERO_GAME_ID.to_string());
        }
        if !valid_numbers(&self.numbers) {
            return Err(BingoError::invalid_value("game numbers not valid"));
        }
        let bytes: Vec<u8> = self.numbers.iter().map(|n| n.value()).collect();
        let encoded = URL_SAFE_NO_PAD.encode(bytes);
        Ok(format!("{}-{}", self.numbers_drawn, encoded))
    }

    /// Decode a game identifier produced by `id()`.
    pub fn from_id(id: &str) -> Result<Self, BingoError> {
        if id == ZERO_GAME_ID {
            return Ok(Self::default());
        }
        let (drawn, encoded) = id.split_once('-').ok_or_else(|| {
            BingoError::invalid_id("could not split id into numbers drawn and numbers")
        })?;
        let numbers_drawn: i64 = drawn
            .parse()
            .map_err(|e| BingoError::invalid_id(format!("parsing numbers drawn: {e}")))?;
        if numbers_drawn < 0 {
            return Err(BingoError::invalid_id("numbers drawn must not be negative"));
        }
        let bytes = URL_SAFE_NO_PAD
            .decode(encoded)
            .map_err(|e| BingoError::invalid_id(format!("decoding game numbers: {e}")))?;
        let bytes: [u8; NUMBERSCOUNT] = bytes.try_into().map_err(|bytes: Vec<u8>| {
            BingoError::invalid_id(format!(
                "decoded {} numbers, wanted {NUMBERSCOUNT}",
                bytes.len()
            ))
        })?;
        let numbers = bytes.map(Number::new);
        if !valid_numbers(&numbers) {
            return Err(BingoError::invalid_id("game numbers not valid"));
        }
        Ok(Self { numbers, numbers_drawn })
    }
}

/// True if every number is valid and none repeats.
fn valid_numbers(numbers: &[Number]) -> bool {
    let mut seen = HashSet::with_capacity(numbers.len());
    numbers.iter().all(|&n| n.is_valid() && seen.insert(n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shuffle::{FixedShuffler, SeededShuffler};

    /// Order of the first reset after seeding with 1257894000.
    const GOLDEN_ORDER: [u8; NUMBERSCOUNT] = [
        24, 20, 64, 54, 6, 62, 25, 43, 22, 57, 10, 40, 28, 29, 30, 73, 75, 69, 68, 23, 2, 37, 36,
        15, 38, 26, 8, 18, 51, 49, 53, 42, 1, 32, 52, 71, 16, 65, 5, 35, 31, 9, 12, 59, 34, 4, 33,
        39, 17, 41, 27, 67, 70, 11, 55, 56, 13, 72, 46, 19, 58, 3, 47, 14, 74, 45, 66, 48, 44, 63,
        21, 50, 61, 60, 7,
    ];

    const GOLDEN_ID: &str = "3-QSMsSRIBJSlFPkgNCR4OPAIQQEcYFQZLNx09NgwXNSowKxxGDzEuP0QbHy9DNDgZCwQnO0ITGkoWJC0KMiIDBTkUIBEoCDoHMyYh";

    fn ascending() -> [Number; NUMBERSCOUNT] {
        std::array::from_fn(|i| Number::new(i as u8 + 1))
    }

    fn is_permutation(numbers: &[Number]) -> bool {
        let mut values: Vec<u8> = numbers.iter().map(|n| n.value()).collect();
        values.sort_unstable();
        values == (1..=75).collect::<Vec<u8>>()
    }

    #[test]
    fn test_numbers_left() {
        let cases = [
            (Game::default(), 75),
            (Game::from_parts(ascending(), 0), 75),
            (Game::from_parts(ascending(), 1), 74),
            (Game::from_parts(ascending(), 74), 1),
            (Game::from_parts(ascending(), 75), 0),
            (Game::from_parts(ascending(), 999), 0),
            (Game::from_parts(ascending(), -4), 75),
        ];
        for (i, (game, want)) in cases.iter().enumerate() {
            assert_eq!(game.numbers_left(), *want, "case {i}");
        }
    }

    #[test]
    fn test_numbers_left_does_not_reset_caller() {
        let game = Game::default();
        assert_eq!(game.numbers_left(), 75);
        assert_eq!(game, Game::default());
    }

    #[test]
    fn test_draw_number_first_draw_shuffles() {
        let mut shuffler = SeededShuffler::seeded(1257894000);
        let mut game = Game::default();
        game.draw_number_with(&mut shuffler);
        assert_eq!(game.numbers_drawn(), 1);
        assert_eq!(game.previous_number_drawn(), Number::new(24));
        let values: Vec<u8> = game.numbers().iter().map(|n| n.value()).collect();
        assert_eq!(values, GOLDEN_ORDER.to_vec());
    }

    #[test]
    fn test_draw_number_shared_shuffler() {
        let mut game = Game::default();
        game.draw_number();
        assert_eq!(game.numbers_drawn(), 1);
        assert!(is_permutation(game.numbers()));
    }

    #[test]
    fn test_reset_with_shared_seed() {
        let reset_seeded = || {
            let mut game = Game::from_parts(ascending(), 12);
            shuffle::with_shared(|shuffler| {
                shuffler.seed(1257894000);
                game.reset_with(shuffler);
            });
            game
        };
        let game = reset_seeded();
        assert_eq!(game.numbers_drawn(), 0);
        let values: Vec<u8> = game.numbers().iter().map(|n| n.value()).collect();
        assert_eq!(values, GOLDEN_ORDER.to_vec());
        assert_eq!(reset_seeded(), game);
    }

    #[test]
    fn test_reset_replays_fixed_order() {
        let mut game = Game::new();
        game.reset_with(&mut FixedShuffler::new(vec![75, 1, 40]));
        let values: Vec<u8> = game.numbers()[..4].iter().map(|n| n.value()).collect();
        assert_eq!(values, vec![75, 1, 40, 4]);
    }

    #[test]
    fn test_draw_number_advances() {
        let mut shuffler = SeededShuffler::seeded(1);
        let mut game = Game::from_parts(ascending(), 3);
        game.draw_number_with(&mut shuffler);
        assert_eq!(game, Game::from_parts(ascending(), 4));
        assert_eq!(game.previous_number_drawn(), Number::new(4));
    }

    #[test]
    fn test_draw_number_all_drawn_is_noop() {
        let mut shuffler = SeededShuffler::seeded(1);
        for drawn in [75, 76, 1_000_000] {
            let mut game = Game::from_parts(ascending(), drawn);
            game.draw_number_with(&mut shuffler);
            assert_eq!(game, Game::from_parts(ascending(), drawn));
        }
    }

    #[test]
    fn test_draw_number_negative_resets() {
        let mut shuffler = SeededShuffler::seeded(1257894000);
        let mut game = Game::from_parts(ascending(), -5);
        game.draw_number_with(&mut shuffler);
        assert_eq!(game.numbers_drawn(), 1);
        assert_eq!(game.previous_number_drawn(), Number::new(24));
    }

    #[test]
    fn test_reset() {
        let mut shuffler = SeededShuffler::seeded(1257894000);
        let mut game = Game::from_parts(ascending(), 23);
        game.reset_with(&mut shuffler);
        assert_eq!(game.numbers_drawn(), 0);
        assert!(is_permutation(game.numbers()));
    }

    #[test]
    fn test_reset_same_seed_same_game() {
        let mut a = Game::default();
        let mut b = Game::default();
        a.reset_with(&mut SeededShuffler::seeded(1257894001));
        b.reset_with(&mut SeededShuffler::seeded(1257894001));
        assert_eq!(a, b);
    }

    #[test]
    fn test_previous_number_drawn_none() {
        assert_eq!(Game::default().previous_number_drawn(), Number::FREE);
        assert_eq!(Game::from_parts(ascending(), 0).previous_number_drawn(), Number::FREE);
    }

    #[test]
    fn test_drawn_numbers_clamped() {
        let game = Game::from_parts(ascending(), 80);
        assert_eq!(game.drawn_numbers().len(), 75);
        let game = Game::from_parts(ascending(), -1);
        assert!(game.drawn_numbers().is_empty());
    }

    #[test]
    fn test_drawn_number_columns() {
        let mut numbers = ascending();
        let order = [61u8, 3, 47, 14, 74, 45];
        for (i, &value) in order.iter().enumerate() {
            let j = numbers.iter().position(|n| n.value() == value).unwrap();
            numbers.swap(i, j);
        }
        let game = Game::from_parts(numbers, order.len() as i64);
        let columns = game.drawn_number_columns();
        let values = |c: usize| -> Vec<u8> { columns[&c].iter().map(|n| n.value()).collect() };
        assert_eq!(values(0), vec![3, 14]);
        assert_eq!(values(3), vec![47]);
        assert_eq!(values(4), vec![61, 74]);
        assert_eq!(values(2), vec![45]);
        assert!(!columns.contains_key(&1));
    }

    #[test]
    fn test_zero_game_id() {
        assert_eq!(Game::default().id().unwrap(), "0");
        assert_eq!(Game::from_id("0").unwrap(), Game::default());
    }

    #[test]
    fn test_game_id_decode_golden() {
        let game = Game::from_id(GOLDEN_ID).unwrap();
        assert_eq!(game.numbers_drawn(), 3);
        let drawn: Vec<u8> = game.drawn_numbers().iter().map(|n| n.value()).collect();
        assert_eq!(drawn, vec![65, 35, 44]);
        assert_eq!(game.id().unwrap(), GOLDEN_ID);
    }

    #[test]
    fn test_game_id_round_trip() {
        let mut shuffler = SeededShuffler::seeded(42);
        let mut game = Game::default();
        for _ in 0..10 {
            game.draw_number_with(&mut shuffler);
        }
        let id = game.id().unwrap();
        let (drawn, encoded) = id.split_once('-').unwrap();
        assert_eq!(drawn, "10");
        assert_eq!(encoded.len(), 100);
        assert_eq!(Game::from_id(&id).unwrap(), game);
    }

    #[test]
    fn test_game_id_keeps_large_drawn_count() {
        let id = GOLDEN_ID.replacen("3-", "80-", 1);
        let game = Game::from_id(&id).unwrap();
        assert_eq!(game.numbers_drawn(), 80);
        assert_eq!(game.numbers_left(), 0);
        assert_eq!(game.id().unwrap(), id);
    }

    #[test]
    fn test_game_id_keeps_64_bit_drawn_count() {
        let id = GOLDEN_ID.replacen("3-", "4294967296-", 1);
        let game = Game::from_id(&id).unwrap();
        assert_eq!(game.numbers_drawn(), 4_294_967_296);
        assert_eq!(game.numbers_left(), 0);
        assert_eq!(game.drawn_numbers().len(), 75);
        assert_eq!(game.id().unwrap(), id);

        let too_large = GOLDEN_ID.replacen("3-", "9223372036854775808-", 1);
        assert!(Game::from_id(&too_large).is_err());
    }

    #[test]
    fn test_game_id_invalid_numbers() {
        let mut numbers = ascending();
        numbers[5] = numbers[6];
        let game = Game::from_parts(numbers, 2);
        assert!(matches!(game.id(), Err(BingoError::InvalidValue(_))));
    }

    #[test]
    fn test_game_from_id_errors() {
        let all_zero = format!("75-{}", "A".repeat(100));
        let short = format!("3-{}", &GOLDEN_ID[2..98]);
        let cases = [
            "",
            "1",
            "abc-QSMs",
            "-QSMs",
            "3-not*base64",
            short.as_str(),
            all_zero.as_str(),
        ];
        for id in cases {
            assert!(
                matches!(Game::from_id(id), Err(BingoError::InvalidId(_))),
                "wanted error for {id:?}"
            );
        }
    }

    #[test]
    fn test_game_from_id_duplicate_numbers() {
        let mut bytes: Vec<u8> = (1..=75).collect();
        bytes[74] = 1;
        let id = format!("4-{}", URL_SAFE_NO_PAD.encode(bytes));
        assert!(matches!(Game::from_id(&id), Err(BingoError::InvalidId(_))));
    }
}
