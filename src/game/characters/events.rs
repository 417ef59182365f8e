// Hero movement events

use super::state::DiscreteState;

/// Something that happened to the hero during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionEvent {
    /// A jump started
    Jump,
    /// Touched ground softly
    Land,
    /// Touched ground fast enough to be forced into a crouch
    HardLand,
    /// The discrete state differs from the previous tick
    StateChanged(DiscreteState),
}

/// Token returned by [`EventBus::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Box<dyn FnMut(&MotionEvent)>;

/// Synchronous observer list. Every dispatched event reaches every
/// subscriber, in subscription order, before `dispatch` returns.
#[derive(Default)]
pub struct EventBus {
    handlers: Vec<(SubscriptionId, Handler)>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, handler: impl FnMut(&MotionEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Remove a subscriber. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(handler_id, _)| *handler_id != id);
        self.handlers.len() != before
    }

    pub fn dispatch(&mut self, event: &MotionEvent) {
        log::trace!("Dispatching {:?} to {} handlers", event, self.handlers.len());
        for (_, handler) in self.handlers.iter_mut() {
            handler(event);
        }
    }

    /// Dispatch a tick's events in order
    pub fn dispatch_all(&mut self, events: &[MotionEvent]) {
        for event in events {
            self.dispatch(event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.len()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.handlers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_dispatch_reaches_subscribers_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();

        let first = Rc::clone(&log);
        bus.subscribe(move |event| first.borrow_mut().push(("first", *event)));
        let second = Rc::clone(&log);
        bus.subscribe(move |event| second.borrow_mut().push(("second", *event)));

        bus.dispatch_all(&[MotionEvent::Jump, MotionEvent::StateChanged(DiscreteState::Rise)]);

        assert_eq!(
            *log.borrow(),
            vec![
                ("first", MotionEvent::Jump),
                ("second", MotionEvent::Jump),
                ("first", MotionEvent::StateChanged(DiscreteState::Rise)),
                ("second", MotionEvent::StateChanged(DiscreteState::Rise)),
            ]
        );
    }

    #[test]
    fn test_unsubscribe() {
        let count = Rc::new(RefCell::new(0));
        let mut bus = EventBus::new();

        let counter = Rc::clone(&count);
        let id = bus.subscribe(move |_| *counter.borrow_mut() += 1);
        bus.dispatch(&MotionEvent::Land);

        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.dispatch(&MotionEvent::Land);

        assert_eq!(*count.borrow(), 1);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_dispatch_without_subscribers() {
        let mut bus = EventBus::new();
        bus.dispatch(&MotionEvent::HardLand);
        assert_eq!(bus.subscriber_count(), 0);
    }
}
