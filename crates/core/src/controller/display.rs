// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Display controller
//!
//! Maps formatted buffers onto the ten display cells and runs the
//! timer-driven self-test waveform.

use super::{ControlPublisher, Controller, OpState, ProbeReply};
use crate::adapters::{DisplaySink, TimerHandle, TimerService, CELL_COUNT};
use crate::event::EventFactory;
use crate::events::Publisher;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Name of the self-test timer
pub const PROBE_TIMER: &str = "Display, Cycle_1";

/// Entries with this bit set switch the waveform mode instead of rendering
const MODE_SWITCH: u16 = 0x8000;

const MODE_SWEEP: u16 = 0x0;
const MODE_BLINK: u16 = 0x1;
const MODE_RESET: u16 = 0xf;

/// Self-test waveform, one entry per tick
///
/// Mode 0 lights the dot of cell `j` for each set bit `j`. Mode 1 shows a
/// blank frame (0), all eights with dots (1) or the clock pattern (2). Mode
/// 0xf restores the default frame and completes the cycle.
#[rustfmt::skip]
pub const WAVEFORM: [u16; 82] = [
    // mode 0: dots advancing and receding
    0, 0, 0, 0, 0, 0, 0, 0, 0,
    0x01, 0x03, 0x07, 0x0f, 0x1f, 0x3f, 0x7f, 0xff, 0x1ff, 0x3ff,
    0x1ff, 0xff, 0x7f, 0x3f, 0x1f, 0x0f, 0x0f, 0x03, 0x01, 0x00,
    0x01, 0x03, 0x07, 0x0f, 0x1f, 0x3f, 0x7f, 0xff, 0x1ff, 0x3ff,
    0x1ff, 0xff, 0x7f, 0x3f, 0x1f, 0x0f, 0x0f, 0x03, 0x01, 0x00,
    // mode 1: "8.8.8.8.8.8.8.8.8.8." alternating with "12:00:00"
    0x8001,
    1, 1, 1, 1, 0, 0, 0, 0,
    1, 1, 1, 1, 0, 0, 0, 0,
    2, 2, 2, 2, 0, 0,
    2, 2, 2, 2, 0, 0, 0, 0,
    // mode f: back to "0."
    0x800f, 0,
];

/// In-flight self-test
struct ProbeCycle {
    mode: u16,
    next_tick: u32,
    timer: TimerHandle,
    reply: Option<ProbeReply>,
}

pub struct DisplayController {
    name: String,
    sink: Arc<dyn DisplaySink>,
    timer: Arc<dyn TimerService>,
    interval: Duration,
    factory: EventFactory,
    publisher: ControlPublisher,
    cycle: Mutex<Option<ProbeCycle>>,
}

impl DisplayController {
    pub fn new(
        name: impl Into<String>,
        sink: Arc<dyn DisplaySink>,
        timer: Arc<dyn TimerService>,
        interval: Duration,
        publisher: Option<Arc<dyn Publisher>>,
    ) -> Self {
        let name = name.into();
        Self {
            publisher: ControlPublisher::new(name.clone(), publisher),
            name,
            sink,
            timer,
            interval,
            factory: EventFactory::new(),
            cycle: Mutex::new(None),
        }
    }

    /// Render a buffer such as `"-12.5"` or `"12:00:00"`
    ///
    /// The buffer is scanned right to left starting at cell 0. A dot or colon
    /// decorates the cell of the digit before it and does not consume a cell.
    /// Buffers with neither get the dot of cell 0, so integers read `"127."`.
    pub fn update_display(&self, buffer: &str) {
        self.sink.clear_all();
        let chars: Vec<char> = buffer.chars().collect();
        let dots = chars.iter().filter(|&&c| c == '.').count();
        let colons = chars.iter().filter(|&&c| c == ':').count();
        self.sink.set_dot(0, dots == 0 && colons == 0);

        let len = chars.len().min(CELL_COUNT + dots + colons);
        let mut j: isize = 0;
        for &ch in chars[..len].iter().rev() {
            let cell = usize::try_from(j).ok().filter(|&i| i < CELL_COUNT);
            match ch {
                '0'..='9' => {
                    if let Some(i) = cell {
                        self.sink.set_digit(i, ch.to_digit(10).map(|d| d as u8));
                    }
                }
                '.' => {
                    if let Some(i) = cell {
                        self.sink.set_dot(i, true);
                    }
                    j -= 1;
                }
                ':' => {
                    if let Some(i) = cell {
                        self.sink.set_colon(i, true);
                    }
                    j -= 1;
                }
                '-' => {
                    if let Some(i) = cell {
                        self.sink.set_minus(i);
                    }
                }
                _ => {}
            }
            j += 1;
        }
    }

    /// Replace the display with the error indicator
    pub fn set_error(&self) {
        self.sink.clear_all();
        self.sink.set_error_indicator();
    }

    /// Whether a self-test is in flight
    pub fn is_probing(&self) -> bool {
        self.cycle.lock().unwrap_or_else(|e| e.into_inner()).is_some()
    }

    /// Advance the self-test by one tick
    ///
    /// Ticks must arrive in order starting at 0; stale, out-of-order and
    /// out-of-table ticks are ignored.
    pub fn on_tick(&self, tick: u32) {
        let mut guard = self.cycle.lock().unwrap_or_else(|e| e.into_inner());
        let Some(cycle) = guard.as_mut() else {
            tracing::trace!(tick, "tick without probe cycle");
            return;
        };
        if tick != cycle.next_tick {
            tracing::debug!(tick, expected = cycle.next_tick, "out-of-order tick ignored");
            return;
        }
        cycle.next_tick += 1;

        let Some(&entry) = WAVEFORM.get(tick as usize) else {
            return;
        };
        if entry & MODE_SWITCH != 0 {
            cycle.mode = entry & 0xf;
            return;
        }

        match cycle.mode {
            MODE_SWEEP => self.sweep(entry),
            MODE_BLINK => self.blink(entry),
            MODE_RESET => {
                self.show_default();
                if let Some(reply) = cycle.reply.take() {
                    // Receiver gone means the caller gave up; nothing to do
                    let _ = reply.send(self.factory.callback(OpState::Running.code()));
                }
                *guard = None;
                tracing::debug!("{} probe cycle complete", self.name);
            }
            _ => {}
        }
    }

    fn sweep(&self, mut bits: u16) {
        for j in 0..CELL_COUNT {
            self.sink.set_dot(j, bits & 0x01 != 0);
            bits >>= 1;
        }
    }

    fn blink(&self, frame: u16) {
        match frame {
            0 => self.sink.clear_all(),
            1 => {
                for i in 0..CELL_COUNT {
                    self.sink.set_digit(i, Some(8));
                    self.sink.set_dot(i, true);
                    self.sink.set_comma(i, false);
                    self.sink.set_colon(i, false);
                }
            }
            2 => {
                for (i, d) in [0u8, 0, 0, 0, 2, 1].into_iter().enumerate() {
                    self.sink.set_digit(i, Some(d));
                }
                self.sink.set_colon(2, true);
                self.sink.set_colon(4, true);
            }
            _ => {}
        }
    }

    fn show_default(&self) {
        self.sink.clear_all();
        self.sink.set_digit(0, Some(0));
        self.sink.set_dot(0, true);
    }

    /// Cancel an in-flight cycle, dropping its reply unsent
    fn cancel_cycle(&self) {
        if let Some(cycle) = self.cycle.lock().unwrap_or_else(|e| e.into_inner()).take() {
            cycle.timer.cancel();
            tracing::debug!(
                next_tick = cycle.next_tick,
                "{} probe cycle cancelled",
                self.name
            );
        }
    }
}

impl Controller for DisplayController {
    fn name(&self) -> &str {
        &self.name
    }

    fn probe(&self, reply: Option<ProbeReply>) {
        self.cancel_cycle();
        self.publisher
            .publish(&self.factory.log(format!("{} probing...", self.name)));
        self.sink.clear_all();

        let ticks = WAVEFORM.len() as u32;
        let timer = self.timer.schedule(PROBE_TIMER, ticks, self.interval);
        *self.cycle.lock().unwrap_or_else(|e| e.into_inner()) = Some(ProbeCycle {
            mode: MODE_SWEEP,
            next_tick: 0,
            timer,
            reply,
        });
    }

    fn start(&self) {
        self.cancel_cycle();
        self.show_default();
        self.publisher
            .publish(&self.factory.log(format!("{} started.", self.name)));
    }

    fn stop(&self, _exit: bool) {
        self.cancel_cycle();
        self.sink.clear_all();
        self.publisher
            .publish(&self.factory.log(format!("{} stopped.", self.name)));
    }

    fn publisher(&self) -> &ControlPublisher {
        &self.publisher
    }
}

impl Drop for DisplayController {
    fn drop(&mut self) {
        self.cancel_cycle();
        tracing::debug!("{} destructor.", self.name);
    }
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
