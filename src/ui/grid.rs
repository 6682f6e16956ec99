//! In-memory character grid behind a pixel panel.
//!
//! Tracks whether any cell actually changed so the panel is only pushed
//! over the bus when the picture differs.

use super::CharDisplay;
use crate::config::{DISPLAY_BLANK_GLYPH, DISPLAY_COLS, DISPLAY_ROWS};

const COLS: usize = DISPLAY_COLS as usize;
const ROWS: usize = DISPLAY_ROWS as usize;

#[derive(Debug, Clone)]
pub struct CellGrid {
    cells: [[u8; COLS]; ROWS],
    col: usize,
    row: usize,
    dirty: bool,
}

impl CellGrid {
    /// Blank grid, dirty so the first flush paints the panel.
    pub const fn new() -> Self {
        Self {
            cells: [[b' '; COLS]; ROWS],
            col: 0,
            row: 0,
            dirty: true,
        }
    }

    /// One row as drawable ASCII.
    pub fn line(&self, row: usize) -> [u8; COLS] {
        let mut line = [b' '; COLS];
        if let Some(cells) = self.cells.get(row) {
            for (out, &cell) in line.iter_mut().zip(cells.iter()) {
                *out = printable(cell);
            }
        }
        line
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    fn put(&mut self, byte: u8) {
        if self.row < ROWS && self.col < COLS {
            let cell = &mut self.cells[self.row][self.col];
            if *cell != byte {
                *cell = byte;
                self.dirty = true;
            }
        }
        self.col += 1;
    }
}

impl Default for CellGrid {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a cell code to an ASCII byte a mono font can draw.
fn printable(cell: u8) -> u8 {
    match cell {
        DISPLAY_BLANK_GLYPH => b' ',
        0x20..=0x7E => cell,
        _ => b'?',
    }
}

impl CharDisplay for CellGrid {
    fn clear(&mut self) {
        for row in 0..ROWS {
            self.set_cursor(0, row as u8);
            for _ in 0..COLS {
                self.put(b' ');
            }
        }
        self.set_cursor(0, 0);
    }

    fn set_cursor(&mut self, col: u8, row: u8) {
        self.col = col as usize;
        self.row = row as usize;
    }

    fn print(&mut self, text: &str) {
        for byte in text.bytes() {
            self.put(byte);
        }
    }

    fn write_glyph(&mut self, glyph: u8) {
        self.put(glyph);
    }
}
