//! Notifications module
//!
//! Success and error toasts raised by the workflow and gateways.
//!
//! # Usage
//! ```ignore
//! use swapstation::notifications::create_notifier;
//!
//! let notifier = create_notifier();
//! let mut toasts = notifier.subscribe();
//! notifier.success("Swap completed");
//! let toast = toasts.recv().await;
//! ```

pub mod event_bus;
pub mod events;

pub use event_bus::{create_notifier, Notifier, SharedNotifier, ToastSubscriber};
pub use events::{Toast, ToastLevel};
