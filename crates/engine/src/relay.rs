// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-manager broadcast relay for host callback events
//!
//! Each pending wait registers a listener under its own token; publishing
//! clones the event to every live listener. Dropping a listener removes its
//! token, so a cancelled wait leaves nothing behind. Events published with
//! no listeners are dropped silently.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

struct RelayInner<T> {
    next_token: u64,
    listeners: HashMap<u64, mpsc::UnboundedSender<T>>,
}

/// Broadcast relay owned by one manager instance
pub struct Relay<T> {
    inner: Arc<Mutex<RelayInner<T>>>,
}

impl<T> Clone for Relay<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for Relay<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Relay<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(RelayInner {
                next_token: 0,
                listeners: HashMap::new(),
            })),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RelayInner<T>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Number of currently registered listeners
    pub fn listener_count(&self) -> usize {
        self.lock().listeners.len()
    }

    fn deregister(&self, token: u64) {
        self.lock().listeners.remove(&token);
    }
}

impl<T: Clone> Relay<T> {
    /// Deliver an event to every live listener
    pub fn publish(&self, event: T) {
        let mut inner = self.lock();
        inner
            .listeners
            .retain(|_, sender| sender.send(event.clone()).is_ok());
    }

    /// Register a new listener
    pub fn listen(&self) -> Listener<T> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut inner = self.lock();
        let token = inner.next_token;
        inner.next_token += 1;
        inner.listeners.insert(token, tx);
        drop(inner);
        Listener {
            token,
            events: rx,
            relay: self.clone(),
        }
    }
}

/// One registered wait on a [`Relay`]; deregisters itself on drop
pub struct Listener<T> {
    token: u64,
    events: mpsc::UnboundedReceiver<T>,
    relay: Relay<T>,
}

impl<T> Listener<T> {
    /// Wait for the next event. `None` only if the relay somehow outlives
    /// its manager, which callers treat as a broken wait.
    pub async fn recv(&mut self) -> Option<T> {
        self.events.recv().await
    }
}

impl<T> Drop for Listener<T> {
    fn drop(&mut self) {
        self.relay.deregister(self.token);
    }
}

#[cfg(test)]
#[path = "relay_tests.rs"]
mod tests;
