// bingo/src/shuffle.rs
// Random source used to shuffle the numbers of a game.
//
// Games and boards take any `Shuffler`; the process-wide `SeededShuffler` is used when none is given.

use std::sync::{LazyLock, Mutex, PoisonError};

use crate::additive::AdditiveSource;

pub trait Shuffler {
    /// Reset the generator to a deterministic state.
    fn seed(&mut self, seed: i64);

    /// Permute `len` slots by calling `swap(i, j)` for each exchange.
    fn shuffle(&mut self, len: usize, swap: &mut dyn FnMut(usize, usize));
}

/// Fisher-Yates shuffler driven by an `AdditiveSource`. The same seed always gives the same order.
#[derive(Debug, Clone)]
pub struct SeededShuffler {
    source: AdditiveSource,
}

impl SeededShuffler {
    /// Seeded from OS entropy.
    pub fn new() -> Self {
        Self::seeded(rand::random::<i64>())
    }

    pub fn seeded(seed: i64) -> Self {
        Self { source: AdditiveSource::new(seed) }
    }
}

impl Default for SeededShuffler {
    fn default() -> Self {
        Self::new()
    }
}

impl Shuffler for SeededShuffler {
    fn seed(&mut self, seed: i64) {
        self.source.seed(seed);
    }

    fn shuffle(&mut self, len: usize, swap: &mut dyn FnMut(usize, usize)) {
        self.source.shuffle(len, swap);
    }
}

/// Shuffler that always arranges the slots `1..=len` into a fixed order.
///
/// Useful to replay a known draw sequence. The slots must hold `1..=len` in
/// ascending order when `shuffle` is called, which is what `Game::reset` writes.
#[derive(Debug, Clone)]
pub struct FixedShuffler {
    order: Vec<u8>,
}

impl FixedShuffler {
    pub fn new(order: impl Into<Vec<u8>>) -> Self {
        Self { order: order.into() }
    }
}

impl Shuffler for FixedShuffler {
    fn seed(&mut self, _seed: i64) {}

    fn shuffle(&mut self, len: usize, swap: &mut dyn FnMut(usize, usize)) {
        let mut current: Vec<u8> = (1..=len).map(|n| n as u8).collect();
        for (i, &wanted) in self.order.iter().enumerate().take(len) {
            let Some(offset) = current[i..].iter().position(|&n| n == wanted) else {
                continue;
            };
            let j = i + offset;
            if i != j {
                current.swap(i, j);
                swap(i, j);
            }
        }
    }
}

static SHARED: LazyLock<Mutex<SeededShuffler>> =
    LazyLock::new(|| Mutex::new(SeededShuffler::new()));

/// Seed the process-wide shuffler. Later resets without an explicit shuffler observe it.
pub fn seed(seed: i64) {
    with_shared(|shuffler| shuffler.seed(seed));
}

/// Run `f` with exclusive access to the process-wide shuffler.
pub fn with_shared<R>(f: impl FnOnce(&mut SeededShuffler) -> R) -> R {
    let mut shuffler = SHARED.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut *shuffler)
}
