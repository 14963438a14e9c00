// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Interval timer service contract

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Delivers a bounded series of tick events
///
/// Implementations emit `ticks` timer events with indices `0..ticks`, one
/// per `interval`, into the event queue and then stop on their own. Ticks
/// are never processed on the timer's own execution context.
pub trait TimerService: Send + Sync {
    fn schedule(&self, name: &str, ticks: u32, interval: Duration) -> TimerHandle;
}

/// Cancellation handle of a scheduled timer
#[derive(Debug, Clone, Default)]
pub struct TimerHandle {
    cancelled: Arc<AtomicBool>,
}

impl TimerHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop delivering further ticks
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
