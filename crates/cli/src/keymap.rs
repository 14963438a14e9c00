// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal key map

use lcd_core::{Control, Key};

/// What one typed character does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Press(Key),
    Control(Control),
}

/// Map a typed character, `None` for unmapped characters
pub fn action_for(ch: char) -> Option<Action> {
    if let Some(digit) = ch.to_digit(10) {
        return Key::from_digit(digit as u8).map(Action::Press);
    }
    let key = match ch {
        't' => Key::K000,
        '.' | ',' => Key::Comma,
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
        's' => Key::Start,
        'h' => Key::Stop,
        '(' => Key::ParOpen,
        ')' => Key::ParClose,
        'o' => return Some(Action::Control(Control::Power)),
        'p' => return Some(Action::Control(Control::Probe)),
        'x' => return Some(Action::Control(Control::Exit)),
        _ => return None,
    };
    Some(Action::Press(key))
}

#[cfg(test)]
#[path = "keymap_tests.rs"]
mod tests;
