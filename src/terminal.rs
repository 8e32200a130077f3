// bingo/src/terminal.rs
// This module handles terminal input/output for the bingo caller.

use std::io;

use crossterm::{
    event::{self, Event, KeyCode},
    terminal::{disable_raw_mode, enable_raw_mode},
};

use crate::board::{Board, ROWS};
use crate::handlers::GameView;
use crate::number::{COLUMNLETTERS, COLUMNS, Number};

/// Result of checking the caller's board after a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardStatus {
    Open,
    Line,
    Filled,
}

// Previous numbers, most recent first, excluding the last one drawn
pub fn last_numbers(drawn: &[u8], n: usize) -> Vec<u8> {
    if drawn.len() <= 1 {
        return Vec::new();
    }
    drawn[..drawn.len() - 1].iter().rev().take(n).copied().collect()
}

// Board as text rows, drawn numbers in bold green and the free cell as "**"
pub fn board_lines(board: &Board, drawn: &[u8]) -> Vec<String> {
    let mut lines = vec![COLUMNLETTERS.iter().map(|c| format!(" {c} ")).collect::<Vec<_>>().join(" ")];
    for row in 0..ROWS {
        let cells: Vec<String> = (0..COLUMNS)
            .map(|column| {
                let number = board.cell(column, row);
                if number == Number::FREE {
                    " **".to_string()
                } else if drawn.contains(&number.value()) {
                    format!("\x1b[1;32m{:3}\x1b[0m", number.value())
                } else {
                    format!("{:3}", number.value())
                }
            })
            .collect();
        lines.push(cells.join(" "));
    }
    lines
}

pub fn show_on_terminal(view: &GameView, board: Option<(&Board, BoardStatus)>) {
    match &view.previous_number {
        Some(last) => println!("Last number: \x1b[1;32m{last}\x1b[0m"),
        None => println!("No numbers drawn yet"),
    }
    println!("Previous numbers: {:?}", last_numbers(&view.drawn_numbers, 3));
    println!();
    for letter in COLUMNLETTERS {
        let numbers = view
            .columns
            .get(&letter.to_string())
            .map(|numbers| {
                numbers
                    .iter()
                    .map(|n| format!("{n:2}"))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default();
        println!("{letter}: {numbers}");
    }

    if let Some((board, status)) = board {
        println!("\nYour board:");
        for line in board_lines(board, &view.drawn_numbers) {
            println!("{line}");
        }
        match status {
            BoardStatus::Line => println!("\n\x1b[1;33mBINGO! (line)\x1b[0m"),
            BoardStatus::Filled => println!("\n\x1b[1;33mBINGO!!! (full card)\x1b[0m"),
            BoardStatus::Open => {}
        }
    }

    match view.numbers_left {
        0 => println!("\nAll numbers have been drawn!"),
        left => println!("\nNumbers left: {left}"),
    }
    println!("Game id: {}", view.game_id);
    println!();
}

// Wait for a key press; returns true if ESC is pressed
pub fn hitkey() -> io::Result<bool> {
    println!("\nPress any key to draw a number or ESC to exit");

    enable_raw_mode()?;
    let result = wait_for_key();
    // Always leave raw mode, even if reading failed
    disable_raw_mode()?;
    print!("\x1Bc"); // Clear the screen
    result
}

fn wait_for_key() -> io::Result<bool> {
    // Clear any pending events in the buffer
    while event::poll(std::time::Duration::from_millis(0))? {
        event::read()?;
    }

    loop {
        if let Event::Key(key_event) = event::read()? {
            // Only process key press events, not key release events
            if key_event.kind == event::KeyEventKind::Press {
                return Ok(key_event.code == KeyCode::Esc);
            }
        }
    }
}
