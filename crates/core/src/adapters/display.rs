// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ten-cell display sink and its cell model
//!
//! Cell 0 is the rightmost cell. Every cell holds a glyph and three
//! decorations drawn after it: dot, comma and colon.

use std::fmt;

/// Number of addressable cells
pub const CELL_COUNT: usize = 10;

/// Literal written by [`DisplaySink::set_error_indicator`]
pub const ERROR_TEXT: &str = "Error";

/// Imperative command surface of the physical display
///
/// Indices outside `0..CELL_COUNT` are ignored by every implementation.
pub trait DisplaySink: Send + Sync {
    /// Show a digit 0-9, or blank the glyph when `None` or above 9
    fn set_digit(&self, index: usize, value: Option<u8>);

    fn set_dot(&self, index: usize, on: bool);

    fn set_comma(&self, index: usize, on: bool);

    /// Colon drawn after the cell
    fn set_colon(&self, index: usize, on: bool);

    fn set_minus(&self, index: usize);

    /// Blank the glyph and all decorations of one cell
    fn clear_cell(&self, index: usize);

    fn clear_all(&self);

    /// Clear everything and show the error literal in the rightmost cells
    fn set_error_indicator(&self);
}

/// State of one display cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub dot: bool,
    pub comma: bool,
    pub colon: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            glyph: ' ',
            dot: false,
            comma: false,
            colon: false,
        }
    }
}

/// In-memory model of the ten cells, for sinks that keep state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellMatrix {
    cells: [Cell; CELL_COUNT],
}

impl CellMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub fn set_digit(&mut self, index: usize, value: Option<u8>) {
        if let Some(cell) = self.cells.get_mut(index) {
            cell.glyph = match value {
                Some(d) => char::from_digit(u32::from(d), 10).unwrap_or(' '),
                None => ' ',
            };
        }
    }

    pub fn set_dot(&mut self, index: usize, on: bool) {
        if let Some(cell) = self.cells.get_mut(index) {
            cell.dot = on;
        }
    }

    pub fn set_comma(&mut self, index: usize, on: bool) {
        if let Some(cell) = self.cells.get_mut(index) {
            cell.comma = on;
        }
    }

    pub fn set_colon(&mut self, index: usize, on: bool) {
        if let Some(cell) = self.cells.get_mut(index) {
            cell.colon = on;
        }
    }

    pub fn set_minus(&mut self, index: usize) {
        if let Some(cell) = self.cells.get_mut(index) {
            cell.glyph = '-';
        }
    }

    pub fn clear_cell(&mut self, index: usize) {
        if let Some(cell) = self.cells.get_mut(index) {
            *cell = Cell::default();
        }
    }

    pub fn clear_all(&mut self) {
        self.cells = [Cell::default(); CELL_COUNT];
    }

    pub fn set_error_indicator(&mut self) {
        self.clear_all();
        let len = ERROR_TEXT.len().min(CELL_COUNT);
        for (i, ch) in ERROR_TEXT.chars().enumerate().take(len) {
            self.cells[len - 1 - i].glyph = ch;
        }
    }

    /// True when no glyph or decoration is lit
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|c| *c == Cell::default())
    }
}

impl fmt::Display for CellMatrix {
    /// Cells left to right (9 down to 0), each glyph followed by its lit
    /// decorations
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in self.cells.iter().rev() {
            write!(f, "{}", cell.glyph)?;
            if cell.dot {
                f.write_str(".")?;
            }
            if cell.comma {
                f.write_str(",")?;
            }
            if cell.colon {
                f.write_str(":")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
