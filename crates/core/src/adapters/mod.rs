// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Adapter contracts for the display and timer collaborators

mod display;
mod timer;

pub use display::{Cell, CellMatrix, DisplaySink, CELL_COUNT, ERROR_TEXT};
pub use timer::{TimerHandle, TimerService};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{DisplayCall, EventRecorder, FakeDisplay, FakeTimer, TimerCall};
