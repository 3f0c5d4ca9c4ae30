mod bus;
mod events;

pub use bus::EventBus;
pub use events::CanvasEvent;

pub trait EventHandler: Send {
    fn handle_event(&mut self, event: &CanvasEvent);
}

impl<F> EventHandler for F
where
    F: FnMut(&CanvasEvent) + Send,
{
    fn handle_event(&mut self, event: &CanvasEvent) {
        self(event)
    }
}
