// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Events system for loose coupling and observability
//!
//! This module provides:
//! - `Publisher` / `Subscriber` - the publish/subscribe contract
//! - `SimplePublisher` - ordered, deduplicated in-memory publisher
//! - `TracingLogger` - log sink forwarding events to `tracing`

mod bus;
mod log;

pub use bus::{
    same_subscriber, EventReceiver, EventSender, Publisher, SimplePublisher, Subscriber,
};
pub use log::TracingLogger;
