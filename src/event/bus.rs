use std::cell::RefCell;

use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use uuid::Uuid;

use crate::event::{EventHandler, StoreEvent};

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

struct ChannelHandler(UnboundedSender<StoreEvent>);

impl EventHandler for ChannelHandler {
    fn handle_event(&mut self, event: &StoreEvent) {
        // A dropped receiver is noticed through `is_closed`
        let _ = self.0.unbounded_send(event.clone());
    }

    fn is_closed(&self) -> bool {
        self.0.is_closed()
    }
}

/// A simple event bus for broadcasting store events to registered handlers
pub struct EventBus {
    handlers: RefCell<Vec<(SubscriptionId, Box<dyn EventHandler>)>>,
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        // Subscribers stay with the bus they joined; a clone starts empty
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &format!("<{} handlers>", self.handlers.borrow().len()))
            .finish()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    /// Creates a new event bus
    pub fn new() -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
        }
    }

    /// Subscribe a handler to receive events
    pub fn subscribe(&self, handler: impl EventHandler + 'static) -> SubscriptionId {
        let id = SubscriptionId::new();
        self.handlers.borrow_mut().push((id, Box::new(handler)));
        id
    }

    /// Subscribe through a channel. The subscription ends when the receiver is dropped.
    pub fn subscribe_channel(&self) -> UnboundedReceiver<StoreEvent> {
        let (tx, rx) = mpsc::unbounded();
        self.subscribe(ChannelHandler(tx));
        rx
    }

    /// Remove a handler. Returns false if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        let before = handlers.len();
        handlers.retain(|(handler_id, _)| *handler_id != id);
        handlers.len() != before
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.borrow().len()
    }

    /// Emit an event to all registered handlers, in subscription order
    pub fn emit(&self, event: StoreEvent) {
        let mut handlers = self.handlers.borrow_mut();
        log::trace!("Emitting {} to {} handlers", event.name(), handlers.len());
        for (_, handler) in handlers.iter_mut() {
            handler.handle_event(&event);
        }
        handlers.retain(|(_, handler)| !handler.is_closed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::ToolKind;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn size_event(new: f32) -> StoreEvent {
        StoreEvent::SizeChanged {
            kind: ToolKind::Brush,
            old: 8.0,
            new,
        }
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let bus = EventBus::new();
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let id = bus.subscribe(move |_: &StoreEvent| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        bus.emit(size_event(9.0));
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.emit(size_event(10.0));

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_dropped_channel_is_pruned() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe_channel();
        assert_eq!(bus.handler_count(), 1);

        bus.emit(size_event(9.0));
        assert_eq!(rx.try_next().ok().flatten(), Some(size_event(9.0)));

        drop(rx);
        bus.emit(size_event(10.0));
        assert_eq!(bus.handler_count(), 0);
    }

    #[test]
    fn test_clone_starts_empty() {
        let bus = EventBus::new();
        bus.subscribe(|_: &StoreEvent| {});
        assert_eq!(bus.clone().handler_count(), 0);
    }
}
