//! Host notification events.
//!
//! The toolbox never renders anything itself. Whenever an operation needs the host page
//! to do something visible outside the normal state read-back (pop a blocking alert,
//! open a tab) it emits a [`ToolboxEvent`] through an [`EventHandler`].
//!
//! # Example
//!
//! ```rust,no_run
//! use devtoolbox::event::{EventHandler, ToolboxEvent};
//! use async_trait::async_trait;
//!
//! struct ConsoleHost;
//!
//! #[async_trait]
//! impl EventHandler for ConsoleHost {
//!     async fn on_toolbox_event(&self, event: &ToolboxEvent) {
//!         match event {
//!             ToolboxEvent::Alert { message } => eprintln!("ALERT: {}", message),
//!             ToolboxEvent::OpenWindow { url } => println!("open {}", url),
//!         }
//!     }
//! }
//! ```

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Something the host has to surface to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolboxEvent {
    /// Blocking user notification (the page's `alert()`).
    Alert {
        /// Message shown to the user.
        message: String,
    },
    /// Open `url` in a new browsing context.
    OpenWindow {
        /// Path of the full tool page, relative to the site root.
        url: String,
    },
}

/// Receiver for [`ToolboxEvent`]s. The default implementation ignores everything.
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn on_toolbox_event(&self, _event: &ToolboxEvent) {}
}

/// Handler that records every event, for hosts that poll and for tests.
#[derive(Debug, Default)]
pub struct RecordingEventHandler {
    events: Mutex<Vec<ToolboxEvent>>,
}

impl RecordingEventHandler {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Snapshot of events received so far.
    pub fn events(&self) -> Vec<ToolboxEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Messages of the `Alert` events received so far.
    pub fn alerts(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ToolboxEvent::Alert { message } => Some(message),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl EventHandler for RecordingEventHandler {
    async fn on_toolbox_event(&self, event: &ToolboxEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event.clone()),
            Err(poisoned) => poisoned.into_inner().push(event.clone()),
        }
    }
}

/// Emit `event` to `handler` if one is installed, logging it either way.
pub(crate) async fn emit(handler: Option<&Arc<dyn EventHandler>>, event: ToolboxEvent) {
    log::debug!("event: {:?}", event);
    if let Some(handler) = handler {
        handler.on_toolbox_event(&event).await;
    }
}
