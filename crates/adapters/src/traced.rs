// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use lcd_core::adapters::DisplaySink;

/// Wrapper that adds tracing to any DisplaySink
#[derive(Clone)]
pub struct TracedDisplay<S> {
    inner: S,
}

impl<S> TracedDisplay<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: DisplaySink> DisplaySink for TracedDisplay<S> {
    fn set_digit(&self, index: usize, value: Option<u8>) {
        tracing::trace!(index, ?value, "display.set_digit");
        self.inner.set_digit(index, value);
    }

    fn set_dot(&self, index: usize, on: bool) {
        tracing::trace!(index, on, "display.set_dot");
        self.inner.set_dot(index, on);
    }

    fn set_comma(&self, index: usize, on: bool) {
        tracing::trace!(index, on, "display.set_comma");
        self.inner.set_comma(index, on);
    }

    fn set_colon(&self, index: usize, on: bool) {
        tracing::trace!(index, on, "display.set_colon");
        self.inner.set_colon(index, on);
    }

    fn set_minus(&self, index: usize) {
        tracing::trace!(index, "display.set_minus");
        self.inner.set_minus(index);
    }

    fn clear_cell(&self, index: usize) {
        tracing::trace!(index, "display.clear_cell");
        self.inner.clear_cell(index);
    }

    fn clear_all(&self) {
        let span = tracing::debug_span!("display.clear_all");
        let _guard = span.enter();

        let start = std::time::Instant::now();
        self.inner.clear_all();
        tracing::debug!(elapsed_ms = start.elapsed().as_millis() as u64, "cleared");
    }

    fn set_error_indicator(&self) {
        let span = tracing::info_span!("display.error");
        let _guard = span.enter();

        self.inner.set_error_indicator();
        tracing::info!("error indicator shown");
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
