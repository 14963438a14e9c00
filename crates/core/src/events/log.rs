// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Log sink subscribers

use super::bus::Subscriber;
use crate::event::{Category, Event};

/// Forwards every received event to `tracing`
///
/// Log events are emitted at `info`, everything else (key input, ticks) at
/// `debug`.
pub struct TracingLogger {
    name: String,
}

impl TracingLogger {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Subscriber for TracingLogger {
    fn name(&self) -> &str {
        &self.name
    }

    fn notify(&self, event: &Event) {
        match event.category() {
            Category::Log => tracing::info!(logger = %self.name, "{}", event),
            _ => tracing::debug!(logger = %self.name, category = ?event.category(), "{}", event),
        }
    }
}

impl Drop for TracingLogger {
    fn drop(&mut self) {
        tracing::debug!("{} destructor.", self.name);
    }
}
