// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Input processor
//!
//! Interprets key events according to the current mode, edits the entry
//! buffers, drives the calculator and pushes the visible buffer to the
//! display. Calculator errors are caught here and nowhere else.

use super::display::DisplayController;
use super::{ControlPublisher, Controller, OpState, ProbeReply};
use crate::adapters::CELL_COUNT;
use crate::calculator::Calculator;
use crate::error::CalcError;
use crate::event::{Event, EventFactory, Key};
use crate::events::{Publisher, Subscriber};
use std::ops::RangeInclusive;
use std::sync::{Arc, Mutex};

/// Results outside this range cannot be shown
const DISPLAY_RANGE: RangeInclusive<f64> = -999_999_999.999_999..=9_999_999_999.999_999;

const NUMBER_RESET: &str = "0";
const TIME_RESET: [u8; 8] = *b"12:00:00";
const TIME_MAX: [u8; 8] = *b"23:59:59";

/// Top-level input mode, toggled by [`Key::Mode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Calculator,
    Timer,
}

/// Whether the next digit continues the operand or starts a fresh one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubMode {
    Numbers,
    Operator,
}

struct InputState {
    mode: InputMode,
    sub_mode: SubMode,
    error: bool,
    number: String,
    time: [u8; 8],
    calc: Calculator,
}

impl InputState {
    fn time_str(&self) -> String {
        self.time.iter().map(|&b| char::from(b)).collect()
    }
}

pub struct InputProcessor {
    name: String,
    display: Arc<DisplayController>,
    factory: EventFactory,
    publisher: ControlPublisher,
    state: Mutex<InputState>,
}

impl InputProcessor {
    pub fn new(
        name: impl Into<String>,
        calc: Calculator,
        display: Arc<DisplayController>,
        publisher: Option<Arc<dyn Publisher>>,
    ) -> Self {
        let name = name.into();
        Self {
            publisher: ControlPublisher::new(name.clone(), publisher),
            name,
            display,
            factory: EventFactory::new(),
            state: Mutex::new(InputState {
                mode: InputMode::Calculator,
                sub_mode: SubMode::Numbers,
                error: false,
                number: NUMBER_RESET.to_string(),
                time: TIME_RESET,
                calc,
            }),
        }
    }

    pub fn mode(&self) -> InputMode {
        self.lock().mode
    }

    pub fn sub_mode(&self) -> SubMode {
        self.lock().sub_mode
    }

    pub fn has_error(&self) -> bool {
        self.lock().error
    }

    /// Buffer of the current mode, as last sent to the display
    pub fn buffer(&self) -> String {
        let state = self.lock();
        match state.mode {
            InputMode::Calculator => state.number.clone(),
            InputMode::Timer => state.time_str(),
        }
    }

    /// Calculator operand stack, bottom first
    pub fn operands(&self) -> Vec<f64> {
        self.lock().calc.operands().to_vec()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, InputState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Process one key, ignoring everything but mode and clears while in error
    fn handle(&self, state: &mut InputState, key: Key) -> Result<(), CalcError> {
        match key {
            Key::Mode => {
                state.mode = match state.mode {
                    InputMode::Calculator => InputMode::Timer,
                    InputMode::Timer => InputMode::Calculator,
                };
                tracing::debug!(mode = ?state.mode, "{} mode switched", self.name);
            }
            Key::C | Key::Ce => state.error = false,
            _ => {}
        }
        if state.error {
            tracing::trace!(%key, "{} ignoring key while in error", self.name);
            return Ok(());
        }
        match state.mode {
            InputMode::Calculator => self.calculator_key(state, key),
            InputMode::Timer => {
                self.timer_key(state, key);
                Ok(())
            }
        }
    }

    fn calculator_key(&self, state: &mut InputState, key: Key) -> Result<(), CalcError> {
        let has_dot = state.number.contains('.');
        match key {
            Key::Eq
            | Key::Minus
            | Key::Plus
            | Key::Mul
            | Key::Div
            | Key::Percent
            | Key::Vat => {
                if state.sub_mode == SubMode::Numbers {
                    let value: f64 = state
                        .number
                        .parse()
                        .map_err(|_| CalcError::InvalidNumber(state.number.clone()))?;
                    state.calc.push(value);
                    state.calc.push_op(key)?;
                }
                state.calc.set_op(key)?;
                let result = state.calc.top();
                if !DISPLAY_RANGE.contains(&result) {
                    return Err(CalcError::Overflow);
                }
                state.number = format_number(result);
                state.sub_mode = SubMode::Operator;
            }
            Key::ParOpen | Key::ParClose => {}
            Key::Comma if has_dot => {}
            Key::Comma
            | Key::K0
            | Key::K1
            | Key::K2
            | Key::K3
            | Key::K4
            | Key::K5
            | Key::K6
            | Key::K7
            | Key::K8
            | Key::K9 => {
                let ch = key
                    .digit()
                    .map(|d| char::from(b'0' + d))
                    .unwrap_or('.');
                if state.sub_mode == SubMode::Operator {
                    state.number = NUMBER_RESET.to_string();
                }
                let max_len = CELL_COUNT + usize::from(has_dot);
                let leading_zero = state.number == NUMBER_RESET;
                if !leading_zero || key == Key::Comma {
                    if state.number.len() < max_len {
                        state.number.push(ch);
                    }
                } else {
                    state.number = ch.to_string();
                }
                state.sub_mode = SubMode::Numbers;
            }
            Key::Bs => {
                if state.number.len() > 1 {
                    state.number.pop();
                } else {
                    state.number = NUMBER_RESET.to_string();
                }
            }
            Key::C | Key::Ce => {
                if key == Key::C {
                    state.calc.clear_all();
                }
                state.calc.clear_top();
                state.number = NUMBER_RESET.to_string();
            }
            Key::K000 => {
                for _ in 0..3 {
                    self.handle(state, Key::K0)?;
                }
            }
            Key::Mode | Key::Start | Key::Stop => {}
        }
        self.display.update_display(&state.number);
        Ok(())
    }

    fn timer_key(&self, state: &mut InputState, key: Key) {
        if let Some(d) = key.digit() {
            // Shift left across the colons at 2 and 5
            let t = &mut state.time;
            t[0] = t[1];
            t[1] = t[3];
            t[3] = t[4];
            t[4] = t[6];
            t[6] = t[7];
            t[7] = b'0' + d;
        } else {
            match key {
                Key::Bs | Key::C => state.time = TIME_RESET,
                Key::Ce => state.time = TIME_MAX,
                // Countdown not implemented
                Key::Start | Key::Stop => {}
                _ => {}
            }
        }
        self.display.update_display(&state.time_str());
    }
}

/// Format a result for the ten-cell display
///
/// Nine decimals with trailing zeros and a trailing dot removed, cut to ten
/// characters, or eleven when a dot is present.
pub fn format_number(value: f64) -> String {
    let fixed = format!("{:.9}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    let limit = if trimmed.contains('.') {
        CELL_COUNT + 1
    } else {
        CELL_COUNT
    };
    trimmed.chars().take(limit).collect()
}

impl Subscriber for InputProcessor {
    fn name(&self) -> &str {
        &self.name
    }

    fn notify(&self, event: &Event) {
        let Some(key) = event.key() else {
            tracing::debug!(%event, "{} ignoring non-key event", self.name);
            return;
        };
        let mut state = self.lock();
        if let Err(err) = self.handle(&mut state, key) {
            state.error = true;
            tracing::warn!(%key, error = %err, "{} input error", self.name);
            self.publisher
                .publish(&self.factory.log(format!("{}: {}", self.name, err)));
            self.display.set_error();
        }
    }
}

impl Controller for InputProcessor {
    fn name(&self) -> &str {
        &self.name
    }

    /// Nothing to test; completes immediately
    fn probe(&self, reply: Option<ProbeReply>) {
        if let Some(reply) = reply {
            let _ = reply.send(self.factory.callback(OpState::Running.code()));
        }
    }

    fn start(&self) {
        self.publisher
            .publish(&self.factory.log(format!("{} started.", self.name)));
    }

    fn stop(&self, _exit: bool) {
        self.publisher
            .publish(&self.factory.log(format!("{} stopped.", self.name)));
    }

    fn publisher(&self) -> &ControlPublisher {
        &self.publisher
    }
}

impl Drop for InputProcessor {
    fn drop(&mut self) {
        tracing::debug!("{} destructor.", self.name);
    }
}

#[cfg(test)]
#[path = "input_tests.rs"]
mod tests;
