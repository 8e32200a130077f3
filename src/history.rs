// bingo/src/history.rs
// Keeps the most recent game states so the server can list them.

use std::collections::VecDeque;

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Display value of a game at the time it was last drawn from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameInfo {
    pub id: String,
    pub mod_time: String,
    pub numbers_left: usize,
}

/// Fixed size list of game infos, newest first.
#[derive(Debug, Clone)]
pub struct GameHistory {
    capacity: usize,
    entries: VecDeque<GameInfo>,
}

impl GameHistory {
    /// A capacity below one still keeps the latest game.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record a game stamped with the current UTC time, dropping the oldest when full.
    pub fn add(&mut self, id: &str, numbers_left: usize) {
        let mod_time = Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();
        self.add_at(id, numbers_left, mod_time);
    }

    pub fn add_at(&mut self, id: &str, numbers_left: usize, mod_time: String) {
        if self.entries.len() == self.capacity {
            self.entries.pop_back();
        }
        self.entries.push_front(GameInfo {
            id: id.to_string(),
            mod_time,
            numbers_left,
        });
    }

    pub fn entries(&self) -> Vec<GameInfo> {
        self.entries.iter().cloned().collect()
    }
}
