//! Toast bus for broadcasting notifications to whatever renders them
//!
//! Uses tokio broadcast channel for pub/sub pattern.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{debug, warn};

use super::events::{Toast, ToastLevel};
use crate::shared::AppError;

/// Default channel capacity
const DEFAULT_CAPACITY: usize = 64;

#[derive(Clone)]
pub struct Notifier {
    sender: broadcast::Sender<Toast>,
    subscriber_count: Arc<AtomicUsize>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            subscriber_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Publish a toast to all subscribers
    pub fn publish(&self, toast: Toast) {
        let level = toast.level;
        match self.sender.send(toast) {
            Ok(count) => debug!(?level, subscribers = count, "Toast published"),
            // Nobody is rendering toasts right now
            Err(_) => debug!(?level, "Toast published (no subscribers)"),
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.publish(Toast::new(ToastLevel::Success, message));
    }

    pub fn info(&self, message: impl Into<String>) {
        self.publish(Toast::new(ToastLevel::Info, message));
    }

    pub fn error(&self, err: &AppError) {
        self.publish(Toast::from(err));
    }

    pub fn subscribe(&self) -> ToastSubscriber {
        let receiver = self.sender.subscribe();
        let count = self.subscriber_count.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(subscribers = count, "New toast subscriber");

        ToastSubscriber {
            receiver,
            subscriber_count: self.subscriber_count.clone(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscriber_count.load(Ordering::SeqCst)
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ToastSubscriber {
    receiver: broadcast::Receiver<Toast>,
    subscriber_count: Arc<AtomicUsize>,
}

impl ToastSubscriber {
    /// Receive the next toast; `None` once the notifier is gone.
    pub async fn recv(&mut self) -> Option<Toast> {
        loop {
            match self.receiver.recv().await {
                Ok(toast) => return Some(toast),
                Err(broadcast::error::RecvError::Lagged(count)) => {
                    warn!(missed = count, "Toast subscriber lagged");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Next toast if one is already queued
    pub fn try_recv(&mut self) -> Option<Toast> {
        loop {
            match self.receiver.try_recv() {
                Ok(toast) => return Some(toast),
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
                Err(_) => return None,
            }
        }
    }
}

impl Drop for ToastSubscriber {
    fn drop(&mut self) {
        self.subscriber_count.fetch_sub(1, Ordering::SeqCst);
    }
}

pub type SharedNotifier = Arc<Notifier>;

pub fn create_notifier() -> SharedNotifier {
    Arc::new(Notifier::new())
}
