// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tokio-backed interval timer
//!
//! Each schedule spawns a task that sleeps one interval, then enqueues a
//! timer event, until the tick budget is spent or the handle is cancelled.
//! Ticks only land in the event queue; the consumer processes them.

use lcd_core::adapters::{TimerHandle, TimerService};
use lcd_core::{EventFactory, EventSender};
use std::time::Duration;
use tokio::runtime::Handle;

pub struct IntervalTimer {
    tx: EventSender,
}

impl IntervalTimer {
    pub fn new(tx: EventSender) -> Self {
        Self { tx }
    }
}

impl TimerService for IntervalTimer {
    fn schedule(&self, name: &str, ticks: u32, interval: Duration) -> TimerHandle {
        let handle = TimerHandle::new();
        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                tracing::error!(timer = name, error = %e, "no runtime, timer not started");
                handle.cancel();
                return handle;
            }
        };

        let cancel = handle.clone();
        let tx = self.tx.clone();
        let name = name.to_string();
        tracing::debug!(timer = %name, ticks, interval = ?interval, "scheduled");

        runtime.spawn(async move {
            let factory = EventFactory::new();
            for tick in 0..ticks {
                tokio::time::sleep(interval).await;
                if cancel.is_cancelled() {
                    tracing::debug!(timer = %name, tick, "cancelled");
                    return;
                }
                if tx.send(factory.timer(tick)).is_err() {
                    tracing::debug!(timer = %name, tick, "event queue closed");
                    return;
                }
            }
            tracing::debug!(timer = %name, "finished");
        });

        handle
    }
}

#[cfg(test)]
#[path = "timer_tests.rs"]
mod tests;
