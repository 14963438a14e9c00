// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Main controller
//!
//! Top-level lifecycle state machine. Entering `Running` starts the input
//! processor and leaving it stops it; no other transition touches it.

use super::display::DisplayController;
use super::input::InputProcessor;
use super::{ControlPublisher, Controller, OpState, ProbeReply};
use crate::event::{Event, EventFactory, Key};
use crate::events::{Publisher, Subscriber};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;

/// Controllers driven by the main controller, released on exit
struct Collaborators {
    input: Arc<InputProcessor>,
    display: Arc<DisplayController>,
}

struct MainState {
    op_state: OpState,
    /// Completion of the display self-test in flight
    pending: Option<oneshot::Receiver<Event>>,
    /// Caller waiting on our own probe
    reply: Option<ProbeReply>,
    parts: Option<Collaborators>,
}

pub struct MainController {
    name: String,
    probing: bool,
    factory: EventFactory,
    publisher: ControlPublisher,
    state: Mutex<MainState>,
}

impl MainController {
    /// `probing` enables the display self-test on start
    pub fn new(
        name: impl Into<String>,
        input: Arc<InputProcessor>,
        display: Arc<DisplayController>,
        probing: bool,
        publisher: Option<Arc<dyn Publisher>>,
    ) -> Self {
        let name = name.into();
        Self {
            publisher: ControlPublisher::new(name.clone(), publisher),
            name,
            probing,
            factory: EventFactory::new(),
            state: Mutex::new(MainState {
                op_state: OpState::Undefined,
                pending: None,
                reply: None,
                parts: Some(Collaborators { input, display }),
            }),
        }
    }

    pub fn state(&self) -> OpState {
        self.lock().op_state
    }

    pub fn is_running(&self) -> bool {
        self.state() == OpState::Running
    }

    /// Whether collaborators were released by `stop(true)`
    pub fn has_exited(&self) -> bool {
        self.lock().parts.is_none()
    }

    /// Check for a finished display self-test and complete probing
    ///
    /// Called by the event loop after every tick it delivers.
    pub fn poll_probe(&self) {
        let mut state = self.lock();
        let Some(rx) = state.pending.as_mut() else {
            return;
        };
        match rx.try_recv() {
            Ok(event) => {
                state.pending = None;
                self.complete_probe(&mut state, event);
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Closed) => {
                tracing::debug!("{} probe abandoned", self.name);
                state.pending = None;
                state.reply = None;
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, MainState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn parts(state: &MainState) -> Option<(Arc<InputProcessor>, Arc<DisplayController>)> {
        state
            .parts
            .as_ref()
            .map(|p| (Arc::clone(&p.input), Arc::clone(&p.display)))
    }

    fn log(&self, message: impl Into<String>) {
        self.publisher.publish(&self.factory.log(message));
    }

    fn transition_to(&self, state: &mut MainState, to: OpState) {
        let from = state.op_state;
        if let Some((input, _)) = Self::parts(state) {
            if from != OpState::Running && to == OpState::Running {
                input.start();
            }
            if from == OpState::Running && to != OpState::Running {
                input.stop(false);
            }
        }
        tracing::debug!(%from, %to, "{} transition", self.name);
        state.op_state = to;
    }

    fn probe_locked(&self, state: &mut MainState, reply: Option<ProbeReply>) {
        if !matches!(state.op_state, OpState::Stopped | OpState::Running) {
            tracing::debug!(state = %state.op_state, "{} probe ignored", self.name);
            return;
        }
        let Some((input, display)) = Self::parts(state) else {
            return;
        };
        self.transition_to(state, OpState::Probing);
        input.probe(None);

        let (tx, rx) = oneshot::channel();
        state.pending = Some(rx);
        state.reply = reply;
        display.probe(Some(tx));
    }

    fn complete_probe(&self, state: &mut MainState, event: Event) {
        if event.code() != Some(OpState::Running.code()) || state.op_state != OpState::Probing {
            tracing::debug!(%event, state = %state.op_state, "{} stale completion", self.name);
            return;
        }
        let Some((input, display)) = Self::parts(state) else {
            return;
        };
        self.transition_to(state, OpState::Running);
        display.start();
        input.notify(&self.factory.input(Key::C));
        if let Some(reply) = state.reply.take() {
            let _ = reply.send(event);
        }
    }
}

impl Controller for MainController {
    fn name(&self) -> &str {
        &self.name
    }

    fn probe(&self, reply: Option<ProbeReply>) {
        let mut state = self.lock();
        self.probe_locked(&mut state, reply);
    }

    fn start(&self) {
        let mut state = self.lock();
        let Some((_, display)) = Self::parts(&state) else {
            tracing::debug!("{} already exited", self.name);
            return;
        };
        if state.op_state == OpState::Undefined {
            self.transition_to(&mut state, OpState::Stopped);
        }
        if state.op_state == OpState::Stopped {
            if self.probing {
                self.probe_locked(&mut state, None);
            } else {
                self.transition_to(&mut state, OpState::Running);
                display.start();
            }
            self.log(format!("{} started.", self.name));
        }
    }

    fn stop(&self, exit: bool) {
        let mut state = self.lock();
        let Some((_, display)) = Self::parts(&state) else {
            tracing::debug!("{} already exited", self.name);
            return;
        };
        if matches!(state.op_state, OpState::Probing | OpState::Running) {
            self.log(format!("{} stopping.", self.name));
            self.transition_to(&mut state, OpState::Stopping);
            state.pending = None;
            state.reply = None;
            display.stop(false);
            self.log(format!("{} stopped.", self.name));
            self.transition_to(&mut state, OpState::Stopped);
        }
        if exit {
            self.transition_to(&mut state, OpState::Undefined);
            self.log("Exiting.");
            state.parts = None;
        }
    }

    fn publisher(&self) -> &ControlPublisher {
        &self.publisher
    }
}

impl Drop for MainController {
    fn drop(&mut self) {
        tracing::debug!("{} destructor.", self.name);
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
