// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dual-stack arithmetic evaluator
//!
//! Operators are applied strictly left to right: every new operator first
//! evaluates the pending one, so the operator stack holds at most one entry
//! and `2 + 3 * 4` yields `20`. Percent and VAT are accepted onto the stack
//! but evaluate to nothing.

use crate::error::CalcError;
use crate::event::Key;

/// Divisors smaller than this in magnitude are treated as zero
const DIV_EPSILON: f64 = 1e-9;

/// Operand and operator stacks with deferred evaluation
#[derive(Debug)]
pub struct Calculator {
    name: String,
    operands: Vec<f64>,
    ops: Vec<Key>,
}

impl Calculator {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            operands: Vec::new(),
            ops: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn push(&mut self, value: f64) {
        self.operands.push(value);
    }

    /// Most recent operand, `0.0` when empty
    pub fn top(&self) -> f64 {
        self.operands.last().copied().unwrap_or(0.0)
    }

    /// Remove and return the most recent operand, `0.0` when empty
    pub fn pop(&mut self) -> f64 {
        self.operands.pop().unwrap_or(0.0)
    }

    /// Evaluate the pending operator, then push `op` unless it is `Eq`
    pub fn push_op(&mut self, op: Key) -> Result<(), CalcError> {
        self.calc()?;
        if op != Key::Eq {
            self.ops.push(op);
        }
        Ok(())
    }

    /// Replace the pending operator with `op`
    ///
    /// `Eq` never displaces the pending operator; it is evaluated instead.
    pub fn set_op(&mut self, op: Key) -> Result<(), CalcError> {
        if op != Key::Eq && !self.ops.is_empty() {
            self.ops.pop();
        }
        self.push_op(op)
    }

    /// Pending operator, `Eq` when none
    pub fn top_op(&self) -> Key {
        self.ops.last().copied().unwrap_or(Key::Eq)
    }

    pub fn pop_op(&mut self) -> Key {
        self.ops.pop().unwrap_or(Key::Eq)
    }

    pub fn clear_all(&mut self) {
        self.operands.clear();
        self.ops.clear();
        self.trace_stacks("cleared");
    }

    /// Zero the most recent operand, keeping earlier sub-results
    pub fn clear_top(&mut self) {
        if let Some(top) = self.operands.last_mut() {
            *top = 0.0;
        }
        self.trace_stacks("clear entry");
    }

    pub fn operands(&self) -> &[f64] {
        &self.operands
    }

    pub fn ops(&self) -> &[Key] {
        &self.ops
    }

    fn calc(&mut self) -> Result<(), CalcError> {
        self.trace_stacks("calculate");
        if self.ops.is_empty() || self.operands.len() < 2 {
            return Ok(());
        }

        let op = self.pop_op();
        if !matches!(op, Key::Eq | Key::Plus | Key::Minus | Key::Mul | Key::Div) {
            return Ok(());
        }

        let d2 = self.pop();
        let d1 = self.pop();
        let result = match op {
            Key::Plus => d1 + d2,
            Key::Minus => d1 - d2,
            Key::Mul => d1 * d2,
            Key::Div => {
                if d2.abs() < DIV_EPSILON {
                    return Err(CalcError::DivideByZero);
                }
                d1 / d2
            }
            _ => d1,
        };
        self.push(result);
        self.trace_stacks("result");
        Ok(())
    }

    fn trace_stacks(&self, step: &str) {
        tracing::trace!(
            calculator = %self.name,
            step,
            ops = ?self.ops,
            operands = ?self.operands,
        );
    }
}

impl Drop for Calculator {
    fn drop(&mut self) {
        tracing::debug!("{} destructor.", self.name);
    }
}

#[cfg(test)]
#[path = "calculator_tests.rs"]
mod tests;
