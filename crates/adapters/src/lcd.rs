// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory LCD panel rendered as a line of text

use lcd_core::adapters::{CellMatrix, DisplaySink};
use std::sync::{Arc, Mutex, MutexGuard};

/// Display sink that keeps the ten cells in memory
///
/// Clones share the same panel, so a front-end can keep one handle for
/// rendering while the controllers drive another.
#[derive(Clone, Default)]
pub struct LcdDisplay {
    cells: Arc<Mutex<CellMatrix>>,
}

impl LcdDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    fn cells(&self) -> MutexGuard<'_, CellMatrix> {
        self.cells.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Current panel, left to right, padded to the full cell width
    pub fn render(&self) -> String {
        self.cells().to_string()
    }

    pub fn snapshot(&self) -> CellMatrix {
        self.cells().clone()
    }
}

impl DisplaySink for LcdDisplay {
    fn set_digit(&self, index: usize, value: Option<u8>) {
        self.cells().set_digit(index, value);
    }

    fn set_dot(&self, index: usize, on: bool) {
        self.cells().set_dot(index, on);
    }

    fn set_comma(&self, index: usize, on: bool) {
        self.cells().set_comma(index, on);
    }

    fn set_colon(&self, index: usize, on: bool) {
        self.cells().set_colon(index, on);
    }

    fn set_minus(&self, index: usize) {
        self.cells().set_minus(index);
    }

    fn clear_cell(&self, index: usize) {
        self.cells().clear_cell(index);
    }

    fn clear_all(&self) {
        self.cells().clear_all();
    }

    fn set_error_indicator(&self) {
        self.cells().set_error_indicator();
    }
}

#[cfg(test)]
#[path = "lcd_tests.rs"]
mod tests;
