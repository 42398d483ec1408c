//! Navigation messages
//!
//! Views and loaders don't call each other. They publish a [`NavEvent`] on
//! the [`NavigationBus`] and whoever drives the screen subscribes. The bus is
//! owned by [`ServiceContext`](crate::ServiceContext), not a process global.

use serde::Serialize;
use tokio::sync::broadcast;

/// Default channel capacity. Lagging receivers drop the oldest events.
pub const DEFAULT_CAPACITY: usize = 64;

/// Navigation message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum NavEvent {
    /// Make this container current
    SelectContainer { container_id: String },
    /// Move the cursor of a container onto a content item
    SelectContent {
        container_id: String,
        content_id: String,
    },
    /// Step to the next container (cursor ran past the last item)
    NextContainer,
    /// Step to the previous container (cursor ran before the first item)
    PrevContainer,
    /// Ask for the next page of a container
    LoadMore { container_id: String },
    /// Show one item fullscreen
    ViewFullscreen { content_id: String },
    /// Leave fullscreen
    HideFullscreen,
}

/// Broadcast channel for [`NavEvent`]s.
///
/// Cloning shares the channel.
#[derive(Debug, Clone)]
pub struct NavigationBus {
    sender: broadcast::Sender<NavEvent>,
}

impl Default for NavigationBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl NavigationBus {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<NavEvent> {
        self.sender.subscribe()
    }

    /// Publish an event. Returns how many subscribers will see it; an event
    /// nobody listens for is dropped silently.
    pub fn emit(&self, event: NavEvent) -> usize {
        log::debug!("nav: {event:?}");
        self.sender.send(event).unwrap_or(0)
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}
