// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::adapters::{EventRecorder, FakeDisplay, FakeTimer};
use crate::calculator::Calculator;
use crate::controller::WAVEFORM;
use crate::events::SimplePublisher;
use std::time::Duration;

struct Fixture {
    main: MainController,
    input: Arc<InputProcessor>,
    display: Arc<DisplayController>,
    sink: FakeDisplay,
    timer: FakeTimer,
    log: Arc<EventRecorder>,
    _bus: Arc<SimplePublisher>,
}

fn fixture(probing: bool) -> Fixture {
    let sink = FakeDisplay::new();
    let timer = FakeTimer::new();
    let bus = Arc::new(SimplePublisher::new("CtrlMsgPublisher"));
    let log = EventRecorder::new("log");
    bus.subscribe(log.clone());
    let display = Arc::new(DisplayController::new(
        "DisplayController",
        Arc::new(sink.clone()),
        Arc::new(timer.clone()),
        Duration::from_millis(20),
        Some(bus.clone()),
    ));
    let input = Arc::new(InputProcessor::new(
        "InputProcessor",
        Calculator::new("CalculatorUnit"),
        Arc::clone(&display),
        Some(bus.clone()),
    ));
    let main = MainController::new(
        "MainController",
        Arc::clone(&input),
        Arc::clone(&display),
        probing,
        Some(bus.clone()),
    );
    Fixture {
        main,
        input,
        display,
        sink,
        timer,
        log,
        _bus: bus,
    }
}

impl Fixture {
    /// Deliver ticks the way the event loop does
    fn run_ticks(&self, ticks: std::ops::Range<u32>) {
        for tick in ticks {
            self.display.on_tick(tick);
            self.main.poll_probe();
        }
    }

    fn count(&self, message: &str) -> usize {
        self.log.messages().iter().filter(|m| *m == message).count()
    }
}

#[test]
fn start_without_probing_runs_immediately() {
    let f = fixture(false);
    f.main.start();

    assert_eq!(f.main.state(), OpState::Running);
    assert!(f.main.is_running());
    assert_eq!(f.sink.text(), "0.");
    assert_eq!(
        f.log.messages(),
        vec![
            "InputProcessor started.",
            "DisplayController started.",
            "MainController started.",
        ]
    );
    assert!(f.timer.calls().is_empty());
}

#[test]
fn start_with_probing_waits_for_self_test() {
    let f = fixture(true);
    f.main.start();

    assert_eq!(f.main.state(), OpState::Probing);
    assert_eq!(
        f.log.messages(),
        vec!["DisplayController probing...", "MainController started."]
    );
    assert_eq!(f.timer.last().unwrap().ticks as usize, WAVEFORM.len());

    f.run_ticks(0..81);
    assert_eq!(f.main.state(), OpState::Probing);
    assert_eq!(f.count("InputProcessor started."), 0);

    f.run_ticks(81..82);
    assert_eq!(f.main.state(), OpState::Running);
    assert_eq!(f.count("InputProcessor started."), 1);
    assert_eq!(f.count("DisplayController started."), 1);
    assert_eq!(f.sink.text(), "0.");
    assert_eq!(f.input.buffer(), "0");
}

#[test]
fn start_when_running_is_a_no_op() {
    let f = fixture(false);
    f.main.start();
    f.main.start();

    assert_eq!(f.count("MainController started."), 1);
    assert_eq!(f.count("InputProcessor started."), 1);
}

#[test]
fn stop_from_running_returns_to_stopped() {
    let f = fixture(false);
    f.main.start();
    f.main.stop(false);

    assert_eq!(f.main.state(), OpState::Stopped);
    assert!(f.sink.cells().is_blank());
    let messages = f.log.messages();
    assert_eq!(
        messages[3..],
        [
            "MainController stopping.",
            "InputProcessor stopped.",
            "DisplayController stopped.",
            "MainController stopped.",
        ]
    );
}

#[test]
fn stop_when_stopped_does_nothing() {
    let f = fixture(false);
    f.main.stop(false);
    assert_eq!(f.main.state(), OpState::Undefined);
    assert!(f.log.messages().is_empty());
}

#[test]
fn restart_after_stop_starts_input_again() {
    let f = fixture(false);
    f.main.start();
    f.main.stop(false);
    f.main.start();

    assert_eq!(f.main.state(), OpState::Running);
    assert_eq!(f.count("InputProcessor started."), 2);
}

#[test]
fn stop_mid_probe_cancels_the_self_test() {
    let f = fixture(true);
    f.main.start();
    f.run_ticks(0..30);

    f.main.stop(false);
    assert_eq!(f.main.state(), OpState::Stopped);
    assert!(f.timer.last().unwrap().handle.is_cancelled());

    f.run_ticks(30..82);
    assert_eq!(f.main.state(), OpState::Stopped);
    assert_eq!(f.count("InputProcessor started."), 0);
    // input was never running, so it is not stopped either
    assert_eq!(f.count("InputProcessor stopped."), 0);
}

#[test]
fn reprobe_from_running_cycles_input() {
    let f = fixture(false);
    f.main.start();
    f.input.notify(&EventFactory::new().input(Key::K7));
    assert_eq!(f.input.buffer(), "7");

    f.main.probe(None);
    assert_eq!(f.main.state(), OpState::Probing);
    assert_eq!(f.count("InputProcessor stopped."), 1);

    f.run_ticks(0..82);
    assert_eq!(f.main.state(), OpState::Running);
    assert_eq!(f.count("InputProcessor started."), 2);
    assert_eq!(f.input.buffer(), "0");
}

#[test]
fn probe_reply_receives_completion() {
    let f = fixture(false);
    f.main.start();
    let (tx, mut rx) = oneshot::channel();
    f.main.probe(Some(tx));

    f.run_ticks(0..82);
    let done = rx.try_recv().unwrap();
    assert_eq!(done.code(), Some(OpState::Running.code()));
}

#[test]
fn probe_is_ignored_before_start() {
    let f = fixture(true);
    f.main.probe(None);
    assert_eq!(f.main.state(), OpState::Undefined);
    assert!(f.timer.calls().is_empty());
}

#[test]
fn probe_is_ignored_while_probing() {
    let f = fixture(true);
    f.main.start();
    f.main.probe(None);
    assert_eq!(f.timer.calls().len(), 1);
}

#[test]
fn exit_releases_collaborators_and_ignores_later_calls() {
    let f = fixture(false);
    f.main.start();
    assert_eq!(Arc::strong_count(&f.input), 2);

    f.main.stop(true);
    assert_eq!(f.main.state(), OpState::Undefined);
    assert!(f.main.has_exited());
    assert_eq!(f.log.messages().last().map(String::as_str), Some("Exiting."));
    assert_eq!(Arc::strong_count(&f.input), 1);

    let logged = f.log.messages().len();
    f.main.start();
    f.main.stop(true);
    assert_eq!(f.main.state(), OpState::Undefined);
    assert_eq!(f.log.messages().len(), logged);
}

#[test]
fn exit_from_undefined_still_announces() {
    let f = fixture(true);
    f.main.stop(true);
    assert_eq!(f.log.messages(), vec!["Exiting."]);
}
