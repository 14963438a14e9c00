// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Controllers of the device
//!
//! Each controller exposes the probe/start/stop lifecycle and publishes its
//! log messages through a [`ControlPublisher`] that forwards to an injected
//! bus.

mod display;
mod input;
mod main;

pub use display::{DisplayController, PROBE_TIMER, WAVEFORM};
pub use input::{format_number, InputMode, InputProcessor, SubMode};
pub use main::MainController;

use crate::event::Event;
use crate::events::{Publisher, Subscriber};
use std::fmt;
use std::sync::Arc;
use tokio::sync::oneshot;

/// One-shot completion channel handed to [`Controller::probe`]
pub type ProbeReply = oneshot::Sender<Event>;

/// Lifecycle contract shared by every controller
pub trait Controller: Send + Sync {
    fn name(&self) -> &str;

    /// Run the self-test
    ///
    /// When a reply channel is given, exactly one completion event is sent on
    /// it once the test finishes. Callers must not overlap probes.
    fn probe(&self, reply: Option<ProbeReply>);

    fn start(&self);

    /// `exit` signals that the whole process is terminating
    fn stop(&self, exit: bool);

    /// Log-event publisher of this controller
    fn publisher(&self) -> &ControlPublisher;
}

/// Lifecycle state of the main controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum OpState {
    Undefined = 0,
    Stopped = 1,
    Probing = 2,
    Running = 3,
    Stopping = 4,
}

impl OpState {
    /// Numeric code, carried by probe completion events
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for OpState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OpState::Undefined => "undefined",
            OpState::Stopped => "stopped",
            OpState::Probing => "probing",
            OpState::Running => "running",
            OpState::Stopping => "stopping",
        };
        f.write_str(s)
    }
}

/// Publisher facade embedded in every controller
///
/// Forwards to the injected bus. Without one, published events are
/// discarded and subscriptions are ignored.
pub struct ControlPublisher {
    name: String,
    inner: Option<Arc<dyn Publisher>>,
}

impl ControlPublisher {
    pub fn new(name: impl Into<String>, inner: Option<Arc<dyn Publisher>>) -> Self {
        Self {
            name: name.into(),
            inner,
        }
    }
}

impl Publisher for ControlPublisher {
    fn name(&self) -> &str {
        &self.name
    }

    fn publish(&self, event: &Event) {
        if let Some(inner) = &self.inner {
            inner.publish(event);
        }
    }

    fn subscribe(&self, subscriber: Arc<dyn Subscriber>) {
        if let Some(inner) = &self.inner {
            inner.subscribe(subscriber);
        }
    }

    fn unsubscribe(&self, subscriber: &Arc<dyn Subscriber>) {
        if let Some(inner) = &self.inner {
            inner.unsubscribe(subscriber);
        }
    }

    fn clear_subscriptions(&self) {
        if let Some(inner) = &self.inner {
            inner.clear_subscriptions();
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
