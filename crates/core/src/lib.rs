// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! lcd-core: control core of a ten-digit calculator/clock device
//!
//! This crate provides:
//! - The event model, event factory and publish/subscribe bus
//! - A left-to-right stack calculator
//! - Controllers for input, display and the device lifecycle
//! - Adapter contracts for the display sink and timer service
//! - The `System` composition root

pub mod adapters;
pub mod calculator;
pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod events;
pub mod system;

pub use calculator::Calculator;
pub use config::{DeviceConfig, LogConfig, ProbeConfig};
pub use controller::{
    Controller, DisplayController, InputProcessor, MainController, OpState, ProbeReply,
};
pub use error::{CalcError, ConfigError};
pub use event::{Category, Event, EventFactory, Key};
pub use events::{EventReceiver, EventSender, Publisher, SimplePublisher, Subscriber};
pub use system::{Control, System};
