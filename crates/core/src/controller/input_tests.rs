// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::adapters::{EventRecorder, FakeDisplay, FakeTimer};
use crate::events::SimplePublisher;
use proptest::prelude::*;
use std::time::Duration;
use tokio::sync::oneshot;
use yare::parameterized;

struct Fixture {
    input: InputProcessor,
    sink: FakeDisplay,
    log: Arc<EventRecorder>,
    _bus: Arc<SimplePublisher>,
}

fn fixture() -> Fixture {
    let sink = FakeDisplay::new();
    let bus = Arc::new(SimplePublisher::new("CtrlMsgPublisher"));
    let log = EventRecorder::new("log");
    bus.subscribe(log.clone());
    let display = Arc::new(DisplayController::new(
        "DisplayController",
        Arc::new(sink.clone()),
        Arc::new(FakeTimer::new()),
        Duration::from_millis(20),
        Some(bus.clone()),
    ));
    let input = InputProcessor::new(
        "InputProcessor",
        Calculator::new("CalculatorUnit"),
        display,
        Some(bus.clone()),
    );
    Fixture {
        input,
        sink,
        log,
        _bus: bus,
    }
}

fn key(ch: char) -> Key {
    match ch {
        '0'..='9' => Key::from_digit(ch as u8 - b'0').unwrap(),
        '.' => Key::Comma,
        '+' => Key::Plus,
        '-' => Key::Minus,
        '*' => Key::Mul,
        '/' => Key::Div,
        '%' => Key::Percent,
        'v' => Key::Vat,
        '=' => Key::Eq,
        'b' => Key::Bs,
        'c' => Key::C,
        'e' => Key::Ce,
        'm' => Key::Mode,
        't' => Key::K000,
        '(' => Key::ParOpen,
        ')' => Key::ParClose,
        other => panic!("no key for {:?}", other),
    }
}

impl Fixture {
    fn type_keys(&self, script: &str) {
        let ef = EventFactory::new();
        for ch in script.chars() {
            self.input.notify(&ef.input(key(ch)));
        }
    }
}

#[parameterized(
    addition = { "123+4=", "127" },
    left_to_right = { "2+3*4=", "20" },
    subtraction_below_zero = { "3-5=", "-2" },
    division = { "10/4=", "2.5" },
    repeating_fraction = { "1/3=", "0.333333333" },
    decimal_operands = { "1.5+1=", "2.5" },
    changed_operator = { "9+-3=", "6" },
    chained_equals = { "5=", "5" },
    running_total = { "1+2+3+", "6" },
    percent_does_no_arithmetic = { "50%10=", "10" },
    vat_does_no_arithmetic = { "50v10=", "10" },
)]
fn calculator_results(script: &str, expected: &str) {
    let f = fixture();
    f.type_keys(script);
    assert_eq!(f.input.buffer(), expected);
    assert!(!f.input.has_error());
}

#[test]
fn result_is_rendered_with_trailing_dot() {
    let f = fixture();
    f.type_keys("123+4=");
    assert_eq!(f.sink.text(), "127.");
    assert_eq!(f.input.sub_mode(), SubMode::Operator);
}

#[parameterized(
    leading_zero_replaced = { "07", "7" },
    second_separator_ignored = { "1..2", "1.2" },
    separator_on_zero = { ".5", "0.5" },
    triple_zero_on_zero = { "t", "0" },
    triple_zero_appends = { "5t", "5000" },
    capped_at_ten_digits = { "123456789012", "1234567890" },
    separator_allows_one_more = { "1.234567890123", "1.234567890" },
    backspace = { "123b", "12" },
    backspace_last_digit = { "7b", "0" },
    parens_ignored = { "4(2)", "42" },
)]
fn entry_buffer(script: &str, expected: &str) {
    let f = fixture();
    f.type_keys(script);
    assert_eq!(f.input.buffer(), expected);
}

#[test]
fn digit_after_operator_starts_fresh_operand() {
    let f = fixture();
    f.type_keys("12+");
    assert_eq!(f.input.buffer(), "12");
    f.type_keys("3");
    assert_eq!(f.input.buffer(), "3");
    assert_eq!(f.input.sub_mode(), SubMode::Numbers);
}

#[test]
fn separator_after_fractional_result_is_ignored() {
    let f = fixture();
    f.type_keys("10/4=.");
    assert_eq!(f.input.buffer(), "2.5");
}

#[test]
fn clear_discards_pending_operation() {
    let f = fixture();
    f.type_keys("5+c3=");
    assert_eq!(f.input.buffer(), "3");
    assert_eq!(f.sink.text(), "3.");
}

#[test]
fn clear_entry_zeroes_top_operand() {
    let f = fixture();
    f.type_keys("5+3e");
    assert_eq!(f.input.buffer(), "0");
    assert_eq!(f.input.operands(), vec![0.0]);
    f.type_keys("4=");
    assert_eq!(f.input.buffer(), "4");
}

#[test]
fn divide_by_zero_shows_error_until_cleared() {
    let f = fixture();
    f.type_keys("1/0=");

    assert!(f.input.has_error());
    assert_eq!(f.sink.text(), "Error");
    assert_eq!(f.log.messages(), vec!["InputProcessor: div/0"]);

    f.type_keys("57+");
    assert_eq!(f.sink.text(), "Error");
    assert_eq!(f.input.buffer(), "0");

    f.type_keys("e");
    assert!(!f.input.has_error());
    assert_eq!(f.sink.text(), "0.");
    f.type_keys("7");
    assert_eq!(f.input.buffer(), "7");
}

#[test]
fn overflow_blocks_digits_until_clear_entry() {
    let f = fixture();
    f.type_keys("9999999999*9=");
    assert!(f.input.has_error());
    assert_eq!(f.log.messages(), vec!["InputProcessor: OVERFLOW."]);

    let before = f.input.buffer();
    f.type_keys("123");
    assert_eq!(f.input.buffer(), before);

    f.type_keys("e12");
    assert_eq!(f.input.buffer(), "12");
}

#[test]
fn large_negative_result_overflows() {
    let f = fixture();
    f.type_keys("0-999999999*2=");
    assert!(f.input.has_error());
}

#[test]
fn clear_also_leaves_error_state() {
    let f = fixture();
    f.type_keys("1/0=c");
    assert!(!f.input.has_error());
    assert_eq!(f.input.buffer(), "0");
}

#[test]
fn mode_toggle_is_processed_while_in_error() {
    let f = fixture();
    f.type_keys("1/0=m");
    assert_eq!(f.input.mode(), InputMode::Timer);
    assert_eq!(f.sink.text(), "Error");
}

#[test]
fn mode_toggle_renders_the_other_buffer() {
    let f = fixture();
    f.type_keys("42m");
    assert_eq!(f.input.mode(), InputMode::Timer);
    assert_eq!(f.sink.text(), "12:00:00");

    f.type_keys("m");
    assert_eq!(f.input.mode(), InputMode::Calculator);
    assert_eq!(f.sink.text(), "42.");
}

#[test]
fn timer_digits_shift_in_from_the_right() {
    let f = fixture();
    f.type_keys("m1");
    assert_eq!(f.input.buffer(), "20:00:01");
    f.type_keys("23456");
    assert_eq!(f.input.buffer(), "12:34:56");
    assert_eq!(f.sink.text(), "12:34:56");
}

#[test]
fn timer_resets_differ_for_clear_and_clear_entry() {
    let f = fixture();
    f.type_keys("m987");
    f.type_keys("b");
    assert_eq!(f.input.buffer(), "12:00:00");

    f.type_keys("e");
    assert_eq!(f.input.buffer(), "23:59:59");

    f.type_keys("c");
    assert_eq!(f.input.buffer(), "12:00:00");
}

#[test]
fn timer_ignores_start_stop_and_operators() {
    let f = fixture();
    f.type_keys("m5");
    let ef = EventFactory::new();
    for k in [Key::Start, Key::Stop, Key::Plus, Key::Comma] {
        f.input.notify(&ef.input(k));
    }
    assert_eq!(f.input.buffer(), "20:00:05");
}

#[test]
fn non_key_events_are_ignored() {
    let f = fixture();
    let ef = EventFactory::new();
    f.input.notify(&ef.timer(0));
    f.input.notify(&ef.input_code(99));
    f.input.notify(&ef.log("noise"));

    assert!(f.sink.calls().is_empty());
    assert_eq!(f.input.buffer(), "0");
}

#[test]
fn lifecycle_logs_start_and_stop() {
    let f = fixture();
    f.input.start();
    f.input.stop(false);
    assert_eq!(
        f.log.messages(),
        vec!["InputProcessor started.", "InputProcessor stopped."]
    );
}

#[test]
fn probe_completes_immediately() {
    let f = fixture();
    let (tx, mut rx) = oneshot::channel();
    f.input.probe(Some(tx));
    assert_eq!(rx.try_recv().unwrap().code(), Some(OpState::Running.code()));
    f.input.probe(None);
}

#[parameterized(
    integer = { 127.0, "127" },
    zero = { 0.0, "0" },
    negative_zero = { -0.0, "-0" },
    hundreds = { 700.0, "700" },
    fraction = { 2.5, "2.5" },
    third = { 1.0 / 3.0, "0.333333333" },
    large_fraction = { 123456.789, "123456.789" },
    truncated_fraction = { 12345678.123456, "12345678.12" },
    ten_digits = { 9999999999.0, "9999999999" },
    negative = { -42.125, "-42.125" },
)]
fn format_number_cases(value: f64, expected: &str) {
    assert_eq!(format_number(value), expected);
}

proptest! {
    #[test]
    fn typed_digits_are_buffered_verbatim(digits in "[1-9][0-9]{0,9}") {
        let f = fixture();
        f.type_keys(&digits);
        prop_assert_eq!(f.input.buffer(), digits);
    }

    #[test]
    fn single_separator_is_kept_in_place(
        int in "[1-9][0-9]{0,4}",
        frac in "[0-9]{1,4}",
        extra in 0usize..3,
    ) {
        let f = fixture();
        let script = format!("{}.{}{}", int, ".".repeat(extra), frac);
        f.type_keys(&script);
        prop_assert_eq!(f.input.buffer(), format!("{}.{}", int, frac));
    }
}
