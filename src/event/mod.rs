mod bus;
mod events;

pub use bus::{EventBus, SubscriptionId};
pub use events::StoreEvent;

pub trait EventHandler: Send {
    fn handle_event(&mut self, event: &StoreEvent);

    /// A closed handler is dropped from the bus after the next emit.
    fn is_closed(&self) -> bool {
        false
    }
}

impl<F> EventHandler for F
where
    F: FnMut(&StoreEvent) + Send,
{
    fn handle_event(&mut self, event: &StoreEvent) {
        self(event)
    }
}
