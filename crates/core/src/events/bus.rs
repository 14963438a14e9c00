// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Publish/subscribe primitives
//!
//! Delivery is synchronous and in subscription order. Publishers hold
//! subscriber handles but never decide their lifetime: whoever created a
//! subscriber unsubscribes it before dropping it.

use crate::event::Event;
use std::sync::{Arc, RwLock};
use tokio::sync::mpsc;

/// Sender side of the single event queue feeding the controller graph
pub type EventSender = mpsc::UnboundedSender<Event>;
/// Receiver side of the single event queue feeding the controller graph
pub type EventReceiver = mpsc::UnboundedReceiver<Event>;

/// Receives published events
pub trait Subscriber: Send + Sync {
    fn name(&self) -> &str;

    /// Invoked for every event published to a publisher this subscriber
    /// is subscribed to
    fn notify(&self, event: &Event);
}

/// Publishes events to a set of subscribers
pub trait Publisher: Send + Sync {
    fn name(&self) -> &str;

    /// Deliver an event to every current subscriber
    fn publish(&self, event: &Event);

    /// Add a subscriber unless it is already subscribed
    fn subscribe(&self, subscriber: Arc<dyn Subscriber>);

    /// Remove a subscriber if present
    fn unsubscribe(&self, subscriber: &Arc<dyn Subscriber>);

    fn clear_subscriptions(&self);
}

/// Identity comparison of subscriber handles (data pointer only)
pub fn same_subscriber(a: &Arc<dyn Subscriber>, b: &Arc<dyn Subscriber>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

/// In-memory publisher with an ordered, identity-unique subscriber list
pub struct SimplePublisher {
    name: String,
    subscribers: RwLock<Vec<Arc<dyn Subscriber>>>,
}

impl SimplePublisher {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subscribers: RwLock::new(Vec::new()),
        }
    }

    /// Get count of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    /// Names of current subscribers in delivery order
    pub fn subscriber_names(&self) -> Vec<String> {
        self.subscribers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|s| s.name().to_string())
            .collect()
    }
}

impl Publisher for SimplePublisher {
    fn name(&self) -> &str {
        &self.name
    }

    fn publish(&self, event: &Event) {
        // Snapshot so subscribers may (un)subscribe while being notified
        let subscribers = self
            .subscribers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        for subscriber in subscribers {
            subscriber.notify(event);
        }
    }

    fn subscribe(&self, subscriber: Arc<dyn Subscriber>) {
        let mut subs = self.subscribers.write().unwrap_or_else(|e| e.into_inner());
        if subs.iter().any(|s| same_subscriber(s, &subscriber)) {
            return;
        }
        tracing::info!("{} subscribed to {}.", subscriber.name(), self.name);
        subs.push(subscriber);
    }

    fn unsubscribe(&self, subscriber: &Arc<dyn Subscriber>) {
        let mut subs = self.subscribers.write().unwrap_or_else(|e| e.into_inner());
        if let Some(pos) = subs.iter().position(|s| same_subscriber(s, subscriber)) {
            let removed = subs.remove(pos);
            tracing::info!("{} unsubscribed from {}.", removed.name(), self.name);
        }
    }

    fn clear_subscriptions(&self) {
        self.subscribers
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}

impl Drop for SimplePublisher {
    fn drop(&mut self) {
        tracing::debug!("{} destructor.", self.name);
    }
}

#[cfg(test)]
#[path = "bus_tests.rs"]
mod tests;
