// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event model
//!
//! Events are immutable values created only by [`EventFactory`]. Every event
//! has a category; log events carry a message, all others carry a code whose
//! meaning depends on the category.

use std::fmt;

/// Category of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Key or keypad input from the front-end
    Input,
    /// Tick delivered by a timer service
    Timer,
    /// Completion signal of an asynchronous operation
    Callback,
    /// Human-readable diagnostic message
    Log,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Payload {
    Code(i32),
    Message(String),
}

/// An immutable event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    category: Category,
    payload: Payload,
}

impl Event {
    pub fn category(&self) -> Category {
        self.category
    }

    /// Event code; log events have none.
    pub fn code(&self) -> Option<i32> {
        match self.payload {
            Payload::Code(code) => Some(code),
            Payload::Message(_) => None,
        }
    }

    /// Log message; only log events carry one.
    pub fn message(&self) -> Option<&str> {
        match &self.payload {
            Payload::Message(msg) => Some(msg),
            Payload::Code(_) => None,
        }
    }

    /// Decoded key of an input event
    pub fn key(&self) -> Option<Key> {
        match (self.category, &self.payload) {
            (Category::Input, Payload::Code(code)) => Key::from_code(*code),
            _ => None,
        }
    }

    /// Tick index of a timer event
    pub fn tick(&self) -> Option<u32> {
        match (self.category, &self.payload) {
            (Category::Timer, Payload::Code(code)) => u32::try_from(*code).ok(),
            _ => None,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.category, &self.payload) {
            (Category::Input, Payload::Code(code)) => match Key::from_code(*code) {
                Some(key) => write!(f, "{}", key.name()),
                None => write!(f, "key {}", code),
            },
            (Category::Timer, Payload::Code(code)) => write!(f, "tick {}", code),
            (Category::Callback, Payload::Code(code)) => write!(f, "callback {}", code),
            (_, Payload::Message(msg)) => write!(f, "{}", msg),
            (Category::Log, Payload::Code(code)) => write!(f, "{}", code),
        }
    }
}

/// Input key codes of the ten-digit device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Key {
    K0 = 0,
    K1 = 1,
    K2 = 2,
    K3 = 3,
    K4 = 4,
    K5 = 5,
    K6 = 6,
    K7 = 7,
    K8 = 8,
    K9 = 9,
    /// Decimal separator
    Comma = 10,
    /// Triple-zero shortcut
    K000 = 11,
    Plus = 12,
    Minus = 13,
    Mul = 14,
    Div = 15,
    Percent = 16,
    Vat = 17,
    Eq = 18,
    /// Backspace
    Bs = 19,
    /// Clear
    C = 20,
    /// Clear entry
    Ce = 21,
    /// Toggle calculator/timer mode
    Mode = 22,
    Start = 23,
    Stop = 24,
    ParOpen = 25,
    ParClose = 26,
}

/// Key registry in code order; used to decode codes and name events.
const KEYS: [(Key, &str); 27] = [
    (Key::K0, "K0"),
    (Key::K1, "K1"),
    (Key::K2, "K2"),
    (Key::K3, "K3"),
    (Key::K4, "K4"),
    (Key::K5, "K5"),
    (Key::K6, "K6"),
    (Key::K7, "K7"),
    (Key::K8, "K8"),
    (Key::K9, "K9"),
    (Key::Comma, "Comma"),
    (Key::K000, "K000"),
    (Key::Plus, "Plus"),
    (Key::Minus, "Minus"),
    (Key::Mul, "Mul"),
    (Key::Div, "Div"),
    (Key::Percent, "Percent"),
    (Key::Vat, "VAT"),
    (Key::Eq, "EQ"),
    (Key::Bs, "BS"),
    (Key::C, "C"),
    (Key::Ce, "CE"),
    (Key::Mode, "Mode"),
    (Key::Start, "Start"),
    (Key::Stop, "Stop"),
    (Key::ParOpen, "ParOpen"),
    (Key::ParClose, "ParClose"),
];

impl Key {
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> Option<Key> {
        usize::try_from(code)
            .ok()
            .and_then(|i| KEYS.get(i))
            .map(|(key, _)| *key)
    }

    pub fn name(self) -> &'static str {
        KEYS[self as usize].1
    }

    /// Digit value of `K0`..`K9`
    pub fn digit(self) -> Option<u8> {
        match self.code() {
            code @ 0..=9 => u8::try_from(code).ok(),
            _ => None,
        }
    }

    /// Key for a single digit 0..=9
    pub fn from_digit(digit: u8) -> Option<Key> {
        if digit <= 9 {
            Key::from_code(i32::from(digit))
        } else {
            None
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The single point of event construction
///
/// A fresh event is produced for every emission; the factory itself is a
/// stateless value that components copy freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventFactory;

impl EventFactory {
    pub fn new() -> Self {
        Self
    }

    /// Input event for a key
    pub fn input(&self, key: Key) -> Event {
        Event {
            category: Category::Input,
            payload: Payload::Code(key.code()),
        }
    }

    /// Input event from a raw key code, as emitted by an input source
    pub fn input_code(&self, code: i32) -> Event {
        Event {
            category: Category::Input,
            payload: Payload::Code(code),
        }
    }

    /// Timer event carrying its tick index
    pub fn timer(&self, tick: u32) -> Event {
        Event {
            category: Category::Timer,
            payload: Payload::Code(i32::try_from(tick).unwrap_or(i32::MAX)),
        }
    }

    /// Completion event
    pub fn callback(&self, code: i32) -> Event {
        Event {
            category: Category::Callback,
            payload: Payload::Code(code),
        }
    }

    /// Log event
    pub fn log(&self, message: impl Into<String>) -> Event {
        Event {
            category: Category::Log,
            payload: Payload::Message(message.into()),
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
