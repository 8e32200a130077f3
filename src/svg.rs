// bingo/src/svg.rs
// Renders a board as a printable SVG document.

use std::fmt::Write;

use crate::board::{Board, FREE_CELL, ROWS};
use crate::number::{COLUMNLETTERS, COLUMNS};

const CELL_SIZE: usize = 100;
const MARGIN: usize = 10;
const WIDTH: usize = COLUMNS * CELL_SIZE + 2 * MARGIN;
// header row + 5 rows + footer with the board id
const HEIGHT: usize = (ROWS + 1) * CELL_SIZE + 2 * MARGIN + 40;

/// Render the board with its identifier printed under the grid.
pub fn render_board(board: &Board, board_id: &str) -> String {
    let mut svg = String::with_capacity(4096);
    // Writing to a String never fails.
    let _ = write_board(&mut svg, board, board_id);
    svg
}

fn write_board(w: &mut impl Write, board: &Board, board_id: &str) -> std::fmt::Result {
    writeln!(
        w,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}">"#
    )?;
    writeln!(w, r#"<rect width="100%" height="100%" fill="white"/>"#)?;
    writeln!(
        w,
        r#"<g font-family="sans-serif" text-anchor="middle" dominant-baseline="middle">"#
    )?;
    for (column, letter) in COLUMNLETTERS.iter().enumerate() {
        let x = MARGIN + column * CELL_SIZE + CELL_SIZE / 2;
        let y = MARGIN + CELL_SIZE / 2;
        writeln!(
            w,
            r#"<text x="{x}" y="{y}" font-size="64" font-weight="bold">{letter}</text>"#
        )?;
    }
    for (i, number) in board.cells().iter().enumerate() {
        let (column, row) = (i / ROWS, i % ROWS);
        let x = MARGIN + column * CELL_SIZE;
        let y = MARGIN + (row + 1) * CELL_SIZE;
        writeln!(
            w,
            r#"<rect x="{x}" y="{y}" width="{CELL_SIZE}" height="{CELL_SIZE}" fill="none" stroke="black" stroke-width="2"/>"#
        )?;
        let (cx, cy) = (x + CELL_SIZE / 2, y + CELL_SIZE / 2);
        if i == FREE_CELL {
            writeln!(w, r#"<text x="{cx}" y="{cy}" font-size="28">FREE</text>"#)?;
        } else {
            writeln!(
                w,
                r#"<text x="{cx}" y="{cy}" font-size="48">{}</text>"#,
                number.value()
            )?;
        }
    }
    let footer_y = MARGIN + (ROWS + 1) * CELL_SIZE + 25;
    writeln!(
        w,
        r#"<text x="{}" y="{footer_y}" font-size="20" font-family="monospace">{board_id}</text>"#,
        WIDTH / 2
    )?;
    writeln!(w, "</g>")?;
    writeln!(w, "</svg>")
}
