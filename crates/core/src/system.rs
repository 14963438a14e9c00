// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Composition root
//!
//! Builds one instance of every controller, wires buses and loggers, routes
//! queued events into the controller graph and tears everything down in
//! reverse construction order.

use crate::adapters::{DisplaySink, TimerService};
use crate::calculator::Calculator;
use crate::config::DeviceConfig;
use crate::controller::{Controller, DisplayController, InputProcessor, MainController};
use crate::event::{Category, Event, EventFactory, Key};
use crate::events::{Publisher, SimplePublisher, Subscriber, TracingLogger};
use std::sync::Arc;

pub const MAIN_CONTROLLER: &str = "MainController";
pub const DISPLAY_CONTROLLER: &str = "DisplayController";
pub const INPUT_PROCESSOR: &str = "InputProcessor";
pub const CALCULATOR_UNIT: &str = "CalculatorUnit";
pub const CTRL_MSG_PUBLISHER: &str = "CtrlMsgPublisher";
pub const INPUT_EVENT_PUBLISHER: &str = "InputEventPublisher";
pub const CTRL_MSG_LOGGER: &str = "Simple Ctrl-msg logger";
pub const KEY_INPUT_LOGGER: &str = "Key Input Logger";

/// Front-end controls besides the keypad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Start when not running, stop otherwise
    Power,
    /// Re-run the self-test
    Probe,
    /// Stop and release everything
    Exit,
}

/// The wired device
pub struct System {
    factory: EventFactory,
    ctrl_bus: Arc<SimplePublisher>,
    input_bus: Arc<SimplePublisher>,
    main: Arc<MainController>,
    display: Arc<DisplayController>,
    input: Arc<InputProcessor>,
    ctrl_logger: Arc<dyn Subscriber>,
    key_logger: Arc<dyn Subscriber>,
}

impl System {
    /// Build with `tracing` loggers
    pub fn build(
        config: &DeviceConfig,
        sink: Arc<dyn DisplaySink>,
        timer: Arc<dyn TimerService>,
    ) -> Self {
        Self::build_with_loggers(
            config,
            sink,
            timer,
            Arc::new(TracingLogger::new(CTRL_MSG_LOGGER)),
            Arc::new(TracingLogger::new(KEY_INPUT_LOGGER)),
        )
    }

    pub fn build_with_loggers(
        config: &DeviceConfig,
        sink: Arc<dyn DisplaySink>,
        timer: Arc<dyn TimerService>,
        ctrl_logger: Arc<dyn Subscriber>,
        key_logger: Arc<dyn Subscriber>,
    ) -> Self {
        let ctrl_bus = Arc::new(SimplePublisher::new(CTRL_MSG_PUBLISHER));
        let input_bus = Arc::new(SimplePublisher::new(INPUT_EVENT_PUBLISHER));
        let ctrl: Arc<dyn Publisher> = ctrl_bus.clone();

        let display = Arc::new(DisplayController::new(
            DISPLAY_CONTROLLER,
            sink,
            timer,
            config.probe.interval,
            Some(Arc::clone(&ctrl)),
        ));
        let input = Arc::new(InputProcessor::new(
            INPUT_PROCESSOR,
            Calculator::new(CALCULATOR_UNIT),
            Arc::clone(&display),
            Some(Arc::clone(&ctrl)),
        ));
        let main = Arc::new(MainController::new(
            MAIN_CONTROLLER,
            Arc::clone(&input),
            Arc::clone(&display),
            config.probe.enabled,
            Some(ctrl),
        ));

        input_bus.subscribe(input.clone());

        main.publisher().subscribe(Arc::clone(&ctrl_logger));
        display.publisher().subscribe(Arc::clone(&ctrl_logger));
        input.publisher().subscribe(Arc::clone(&ctrl_logger));
        input_bus.subscribe(Arc::clone(&key_logger));

        tracing::debug!(probe = config.probe.enabled, interval = ?config.probe.interval, "system built");
        Self {
            factory: EventFactory::new(),
            ctrl_bus,
            input_bus,
            main,
            display,
            input,
            ctrl_logger,
            key_logger,
        }
    }

    pub fn main(&self) -> &MainController {
        &self.main
    }

    pub fn display(&self) -> &DisplayController {
        &self.display
    }

    pub fn input(&self) -> &InputProcessor {
        &self.input
    }

    pub fn is_running(&self) -> bool {
        self.main.is_running()
    }

    /// Whether `Control::Exit` has been processed
    pub fn has_exited(&self) -> bool {
        self.main.has_exited()
    }

    /// Start the main controller
    pub fn start(&self) {
        self.main.start();
    }

    /// Route one queued event into the controller graph
    pub fn dispatch(&self, event: &Event) {
        match event.category() {
            Category::Input => {
                if self.main.is_running() {
                    self.input_bus.publish(event);
                } else {
                    tracing::debug!(%event, state = %self.main.state(), "input dropped");
                }
            }
            Category::Timer => {
                if let Some(tick) = event.tick() {
                    self.display.on_tick(tick);
                }
                self.main.poll_probe();
            }
            Category::Log => self.ctrl_bus.publish(event),
            Category::Callback => tracing::debug!(%event, "unrouted callback"),
        }
    }

    /// Press one keypad key
    pub fn press(&self, key: Key) {
        self.dispatch(&self.factory.input(key));
    }

    pub fn control(&self, control: Control) {
        tracing::debug!(?control, "control");
        match control {
            Control::Power => {
                if self.main.is_running() {
                    self.main.stop(false);
                } else {
                    self.main.start();
                }
            }
            Control::Probe => self.main.probe(None),
            Control::Exit => self.main.stop(true),
        }
    }

    /// Unsubscribe loggers, then release controllers and buses in reverse
    /// construction order
    pub fn teardown(self) {
        let System {
            factory: _,
            ctrl_bus,
            input_bus,
            main,
            display,
            input,
            ctrl_logger,
            key_logger,
        } = self;

        input_bus.unsubscribe(&key_logger);
        input.publisher().unsubscribe(&ctrl_logger);
        display.publisher().unsubscribe(&ctrl_logger);
        main.publisher().unsubscribe(&ctrl_logger);
        drop(key_logger);
        drop(ctrl_logger);

        input_bus.clear_subscriptions();
        main.stop(true);
        drop(input);
        drop(display);
        drop(main);
        drop(input_bus);
        drop(ctrl_bus);
    }
}

#[cfg(test)]
#[path = "system_tests.rs"]
mod tests;
