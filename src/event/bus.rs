use std::cell::RefCell;

use crate::event::{CanvasEvent, EventHandler};

/// Fans canvas events out to listeners, in subscription order
///
/// Lives on the UI thread next to the controller; handlers must not
/// subscribe from inside `emit`.
#[derive(Default)]
pub struct EventBus {
    handlers: RefCell<Vec<Box<dyn EventHandler>>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EventBus({} listeners)", self.handler_count())
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.handlers.borrow_mut().push(handler);
    }

    pub fn emit(&self, event: CanvasEvent) {
        let mut handlers = self.handlers.borrow_mut();
        log::trace!("{event:?} -> {} listeners", handlers.len());
        for handler in handlers.iter_mut() {
            handler.handle_event(&event);
        }
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.borrow().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_every_handler_sees_events_in_order() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for _ in 0..2 {
            let seen = seen.clone();
            bus.subscribe(Box::new(move |event: &CanvasEvent| seen.lock().push(*event)));
        }
        bus.emit(CanvasEvent::CollectionChanged { strokes: 1 });
        bus.emit(CanvasEvent::HistoryChanged { can_undo: true, can_redo: false });

        let seen = seen.lock();
        assert_eq!(seen.len(), 4);
        assert_eq!(seen[0], CanvasEvent::CollectionChanged { strokes: 1 });
        assert_eq!(seen[3], CanvasEvent::HistoryChanged { can_undo: true, can_redo: false });
        assert_eq!(bus.handler_count(), 2);
    }
}
