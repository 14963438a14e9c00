// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake adapter implementations for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::display::{CellMatrix, DisplaySink};
use super::timer::{TimerHandle, TimerService};
use crate::event::Event;
use crate::events::Subscriber;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Recorded display call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayCall {
    SetDigit { index: usize, value: Option<u8> },
    SetDot { index: usize, on: bool },
    SetComma { index: usize, on: bool },
    SetColon { index: usize, on: bool },
    SetMinus { index: usize },
    ClearCell { index: usize },
    ClearAll,
    SetErrorIndicator,
}

#[derive(Default)]
struct FakeDisplayState {
    calls: Vec<DisplayCall>,
    cells: CellMatrix,
}

/// Display sink that records calls and keeps a cell matrix
#[derive(Clone, Default)]
pub struct FakeDisplay {
    state: Arc<Mutex<FakeDisplayState>>,
}

impl FakeDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<DisplayCall> {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .clone()
    }

    pub fn clear_calls(&self) {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .clear();
    }

    /// Snapshot of the cell matrix
    pub fn cells(&self) -> CellMatrix {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .cells
            .clone()
    }

    /// Rendered cells with leading blanks removed
    pub fn text(&self) -> String {
        self.cells().to_string().trim_start().to_string()
    }

    fn record(&self, call: DisplayCall, apply: impl FnOnce(&mut CellMatrix)) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.calls.push(call);
        apply(&mut state.cells);
    }
}

impl DisplaySink for FakeDisplay {
    fn set_digit(&self, index: usize, value: Option<u8>) {
        self.record(DisplayCall::SetDigit { index, value }, |m| {
            m.set_digit(index, value)
        });
    }

    fn set_dot(&self, index: usize, on: bool) {
        self.record(DisplayCall::SetDot { index, on }, |m| m.set_dot(index, on));
    }

    fn set_comma(&self, index: usize, on: bool) {
        self.record(DisplayCall::SetComma { index, on }, |m| {
            m.set_comma(index, on)
        });
    }

    fn set_colon(&self, index: usize, on: bool) {
        self.record(DisplayCall::SetColon { index, on }, |m| {
            m.set_colon(index, on)
        });
    }

    fn set_minus(&self, index: usize) {
        self.record(DisplayCall::SetMinus { index }, |m| m.set_minus(index));
    }

    fn clear_cell(&self, index: usize) {
        self.record(DisplayCall::ClearCell { index }, |m| m.clear_cell(index));
    }

    fn clear_all(&self) {
        self.record(DisplayCall::ClearAll, CellMatrix::clear_all);
    }

    fn set_error_indicator(&self) {
        self.record(DisplayCall::SetErrorIndicator, CellMatrix::set_error_indicator);
    }
}

/// Recorded timer schedule
#[derive(Debug, Clone)]
pub struct TimerCall {
    pub name: String,
    pub ticks: u32,
    pub interval: Duration,
    pub handle: TimerHandle,
}

/// Timer service that only records schedules; tests deliver ticks by hand
#[derive(Clone, Default)]
pub struct FakeTimer {
    calls: Arc<Mutex<Vec<TimerCall>>>,
}

impl FakeTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded schedules
    pub fn calls(&self) -> Vec<TimerCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Most recently scheduled timer
    pub fn last(&self) -> Option<TimerCall> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .cloned()
    }
}

impl TimerService for FakeTimer {
    fn schedule(&self, name: &str, ticks: u32, interval: Duration) -> TimerHandle {
        let handle = TimerHandle::new();
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(TimerCall {
                name: name.to_string(),
                ticks,
                interval,
                handle: handle.clone(),
            });
        handle
    }
}

/// Subscriber that collects every event it is notified of
pub struct EventRecorder {
    name: String,
    events: Mutex<Vec<Event>>,
}

impl EventRecorder {
    pub fn new(name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            events: Mutex::new(Vec::new()),
        })
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Messages of recorded log events, in order
    pub fn messages(&self) -> Vec<String> {
        self.events()
            .iter()
            .filter_map(|e| e.message().map(str::to_string))
            .collect()
    }
}

impl Subscriber for EventRecorder {
    fn name(&self) -> &str {
        &self.name
    }

    fn notify(&self, event: &Event) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event.clone());
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
